//! MiniLang checker - static semantic analysis for a small imperative language
//!
//! Given a syntax tree, the analyzer verifies the naming and typing rules the
//! grammar alone cannot enforce and produces an ordered list of diagnostics.
//!
//! ## Architecture
//!
//! The crate is organized into:
//! - **Common** (`common/`): spans, errors and the diagnostic collector
//! - **Syntax** (`syntax/`): the immutable tree handed to the analyzer
//! - **Frontend** (`frontend/`): MiniLang lexer and parser
//! - **Sema** (`sema/`): scopes, declaration, body, literal and call checks
//! - **Report** (`report/`): diagnostic serialization and listings
//! - **Driver** (`driver/`): the parse-then-analyze pipeline

pub mod common;
pub mod syntax;
pub mod frontend;
pub mod sema;
pub mod report;
pub mod driver;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, Diagnostic, DiagnosticReporter, Diagnostics, ErrorKind, Span};
pub use driver::{CheckOutput, Pipeline, PipelineConfig};
pub use sema::{Analysis, AnalyzerConfig, CallDepth, SemanticAnalyzer};
