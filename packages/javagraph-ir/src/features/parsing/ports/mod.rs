//! Parsing ports (interfaces)

mod parser;
mod span_ext;

pub use parser::Parser;
pub use span_ext::SpanExt;
