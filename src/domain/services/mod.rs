pub mod actions;
mod analyzer;
mod app_state;
mod auth_forms;
mod bubble;
mod bubble_list;
mod chat;
pub mod events;
mod menu;
mod navbar;
mod route_guard;
mod scroll;
mod session_store;
mod sidebar;
mod syntaxes;
mod themes;

pub use analyzer::*;
pub use app_state::*;
pub use auth_forms::*;
pub use bubble::*;
pub use bubble_list::*;
pub use chat::*;
pub use menu::*;
pub use navbar::*;
pub use route_guard::*;
pub use scroll::*;
pub use session_store::*;
pub use sidebar::*;
pub use syntaxes::*;
pub use themes::*;
