//! Widgets for the PlatePal TUI.

mod menu;
mod messages;
mod sidebar;

pub use menu::ActionMenu;
pub use messages::{MessageList, MessageListState};
pub use sidebar::{ConversationList, ROW_HEIGHT};
