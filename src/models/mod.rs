// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod article;
pub mod corpus_file;
pub mod lang;
pub mod query;
pub mod session;

pub use article::Article;
pub use corpus_file::{CorpusEntry, CorpusStats, RawCorpusFile};
pub use lang::Lang;
pub use query::QueryResult;
pub use session::{HistoryEntry, SearchSession};
