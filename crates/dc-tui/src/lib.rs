//! dc-tui: Terminal UI layer using ratatui
//!
//! Provides the terminal interface for the game.

pub mod app;
pub mod input;
pub mod theme;

pub use app::App;
pub use input::UiCommand;
pub use theme::Theme;
