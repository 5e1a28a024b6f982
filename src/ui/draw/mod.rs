//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: Header, endpoint tabs, token input and footer
//! - `modals`: Notices, the manual-copy dialog and the page jump prompt
//! - `panels`: Token information and call details panels
//! - `table`: The call log table, pager and row detail pane
//! - `styling`: Color schemes and style constants

mod components;
mod modals;
mod panels;
mod styling;
mod table;

pub use components::{render_endpoint_tabs, render_footer, render_header, render_token_input};
pub use modals::{render_dialog, render_jump_modal, render_notices};
pub use panels::render_body;
