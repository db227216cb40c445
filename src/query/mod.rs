// file: src/query/mod.rs
// description: query interpretation module exports
// reference: internal module structure

pub mod interpreter;
pub mod model;
pub mod prompt;

pub use interpreter::{QueryInterpreter, parse_model_reply};
pub use model::{HuggingFaceClient, LanguageModel};
