use anyhow::Result;
use tui_textarea::Input;

use super::Flashcard;

pub enum Event {
    GenerationResult(Result<Vec<Flashcard>>),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UITick(),
}
