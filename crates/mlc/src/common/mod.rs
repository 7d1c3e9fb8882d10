//! Common infrastructure shared by the front-end, the analyzer and reporting

mod diagnostics;
mod error;
mod span;

pub use diagnostics::{Diagnostic, DiagnosticId, Diagnostics, ErrorKind, Family};
pub use error::{CompileError, CompileResult, DiagnosticReporter};
pub use span::{LineIndex, Span};
