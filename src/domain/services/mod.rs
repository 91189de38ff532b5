pub mod actions;
mod app_state;
mod card_view;
pub mod events;
mod export;
mod session_store;
mod study_session;
mod uploader;

pub use app_state::*;
pub use card_view::*;
pub use export::*;
pub use session_store::*;
pub use study_session::*;
pub use uploader::*;
