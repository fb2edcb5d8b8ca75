//! Query understanding
//!
//! Types for the structured form of a question, the canned intent table,
//! and the parser that ties them to the generation service.

pub mod parser;
pub mod shortcuts;
pub mod types;

pub use parser::QueryParser;
pub use types::{BoundingBox, Coordinates, StructuredQuery};
