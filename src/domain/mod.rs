//! Domain layer: tree model, parsing and record mapping
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod attribute;
pub mod error;
pub mod node;
pub mod parser;
pub mod records;
pub mod syntax;
pub mod value;

pub use attribute::{AttributeField, AttributeMap, AttributeValue, Record, ValueKind};
pub use error::{DomainError, DomainResult};
pub use node::Node;
pub use parser::{ParseOptions, Parser};
pub use records::*;
pub use value::ValueSplitter;
