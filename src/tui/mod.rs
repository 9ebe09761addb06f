//! Terminal user interface for PlatePal.
//!
//! A conversation sidebar, a message thread, and a multi-line input box,
//! with mouse support throughout.

mod app;
mod theme;
mod ui;

pub mod event;
pub mod hit_test;
pub mod responder;
pub mod sidebar;
pub mod widgets;

pub use app::TuiApp;

use anyhow::Result;

/// Run the TUI application
pub async fn run() -> Result<()> {
    let mut app = TuiApp::new()?;
    app.run().await
}
