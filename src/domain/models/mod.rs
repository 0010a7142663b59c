mod action;
mod analysis;
mod api;
mod author;
mod claims;
mod conversation;
mod credentials;
mod event;
mod loading;
mod message;
mod route;
mod session;
mod textarea;

pub use action::*;
pub use analysis::*;
pub use api::*;
pub use author::*;
pub use claims::*;
pub use conversation::*;
pub use credentials::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use route::*;
pub use session::*;
pub use textarea::*;
