//! Terminal front end: drawing and key handling

pub mod draw;
pub mod events;

pub use events::EventHandler;
