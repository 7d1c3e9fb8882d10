//! Semantic analysis module
//!
//! Naming and typing rules the grammar cannot enforce: duplicate
//! declarations, parameter shadowing, initializer compatibility and call
//! resolution.

mod analyzer;
mod bodies;
mod calls;
mod declarations;
pub mod literal;
mod scope;

pub use analyzer::{Analysis, AnalyzerConfig, SemanticAnalyzer};
pub use bodies::FunctionBodyAnalyzer;
pub use calls::{CallChecker, CallDepth};
pub use declarations::DeclarationAnalyzer;
pub use scope::{FunctionScope, FunctionSignature, GlobalScope};
