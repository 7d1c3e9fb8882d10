//! Parser module for MiniLang

mod parser;

pub use parser::{ParseOutput, Parser};
