pub mod batching;
pub mod error;
pub mod google_translation_repository;
pub mod google_tts_repository;
pub mod history_repository;
pub mod openai_tts_repository;
pub mod polly_tts_repository;
pub mod translation_repository;
pub mod tts_repository;

pub use error::UpstreamError;
pub use google_translation_repository::GoogleTranslationRepository;
pub use google_tts_repository::GoogleTtsRepository;
pub use history_repository::HistoryRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use polly_tts_repository::PollyTtsRepository;
pub use translation_repository::{TranslationRepository, UpstreamTranslation};
pub use tts_repository::TtsRepository;
