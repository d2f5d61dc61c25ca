pub mod history;
pub mod language;
pub mod text;
pub mod translation;
pub mod tts;
