mod action;
mod document;
mod event;
mod flashcard;
mod generator;
mod language;
mod loading;
mod session;
mod status;
mod textarea;

pub use action::*;
pub use document::*;
pub use event::*;
pub use flashcard::*;
pub use generator::*;
pub use language::*;
pub use loading::*;
pub use session::*;
pub use status::*;
pub use textarea::*;
