mod action;
mod author;
mod event;
mod loading;
mod message;
mod overlay;
mod relay;
mod textarea;

pub use action::*;
pub use author::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use overlay::*;
pub use relay::*;
pub use textarea::*;
