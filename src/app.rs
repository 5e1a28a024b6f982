use crate::config::Settings;
use crate::endpoints::EndpointSelector;
use crate::state::AppState;
use crate::types::InputMode;
use crate::ui;
use crate::ui::draw;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    DefaultTerminal, Frame,
};
use std::sync::{Arc, RwLock};
use std::time::Instant;

#[derive(Debug)]
pub struct App {
    state: Arc<RwLock<AppState>>,
    settings: Arc<Settings>,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: ui::EventHandler,
}

impl App {
    pub fn new(settings: Settings) -> Result<Self> {
        let mut selector = EndpointSelector::new(settings.endpoints.clone())
            .ok_or_else(|| eyre!("No endpoints configured"))?;

        if let Some(name) = &settings.default_endpoint {
            if !selector.select_endpoint(name) {
                tracing::warn!(endpoint = %name, "default endpoint not configured, using the first");
            }
        }

        let mut state = AppState::new(selector);
        // Start in the token field, there is nothing to show without one
        state.input.mode = InputMode::EnteringToken;

        let settings = Arc::new(settings);

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            event_handler: ui::EventHandler::new(Arc::clone(&settings)),
            settings,
            spinner_index: 0,
            last_tick: Instant::now(),
        })
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        // Main UI loop
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % 4;
                self.last_tick = Instant::now();
            }

            if let Ok(mut s) = self.state.write() {
                s.expire_notices(Instant::now());
            }

            terminal.draw(|frame| self.draw(frame))?;

            self.event_handler.handle_events(Arc::clone(&self.state))?;
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let Ok(state) = self.state.read() else {
            return;
        };

        let tabs_height = if state.selector.shows_tabs() { 1 } else { 0 };

        // Header, endpoint tabs, token input, body, footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(tabs_height),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        draw::render_header(frame, main_chunks[0], &state, self.spinner_index);

        if state.selector.shows_tabs() {
            draw::render_endpoint_tabs(frame, main_chunks[1], &state);
        }

        draw::render_token_input(frame, main_chunks[2], &state);
        draw::render_body(
            frame,
            main_chunks[3],
            &state,
            &self.settings.features,
            self.spinner_index,
        );
        draw::render_footer(frame, main_chunks[4], &state.input.mode);

        // Overlays LAST - after everything else
        draw::render_notices(frame, &state.notices);

        if state.input.mode == InputMode::JumpToPage {
            draw::render_jump_modal(frame, &state);
        }

        if let Some(dialog) = &state.dialog {
            draw::render_dialog(frame, dialog);
        }
    }
}
