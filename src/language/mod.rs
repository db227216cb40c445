// file: src/language/mod.rs
// description: language detection and translation module exports
// reference: internal module structure

pub mod detector;
pub mod translator;

pub use detector::detect_language;
pub use translator::{GoogleTranslateClient, TranslationService, Translator};
