// file: src/parser/mod.rs
// description: article text parsing module exports
// reference: internal module structure

pub mod article;
pub mod patterns;

pub use article::{ArticleParser, extract_embedded_date};
