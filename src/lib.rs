pub mod ast;
pub mod diagnostic;
pub mod error;
pub mod parser;
pub mod result;
pub mod tokenizer;

pub use ast::collect_diagnostics;
pub use parser::{parse, parse_extended};
pub use tokenizer::tokenize;
