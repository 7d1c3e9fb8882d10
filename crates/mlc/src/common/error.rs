//! Error types and terminal diagnostic rendering

use codespan_reporting::diagnostic::{Diagnostic as Report, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};
use thiserror::Error;

use super::{Diagnostic, Diagnostics, Family, Span};

/// Failure of a front-end step or of an output sink
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Lexer error at {span:?}: {message}")]
    Lexer { message: String, span: Span },

    #[error("Parser error at {span:?}: {message}")]
    Parser { message: String, span: Span },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Render every collected diagnostic to stderr
    pub fn report_all(&self, file_id: usize, diagnostics: &Diagnostics) {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let mut lock = writer.lock();
        for diagnostic in diagnostics {
            let _ = self.emit(&mut lock, file_id, diagnostic);
        }
    }

    /// Render one diagnostic to any color-capable writer
    pub fn emit(
        &self,
        writer: &mut dyn WriteColor,
        file_id: usize,
        diagnostic: &Diagnostic,
    ) -> Result<(), codespan_reporting::files::Error> {
        let title = match diagnostic.kind.family() {
            Family::Lexical => "Lexer error",
            Family::Syntax => "Syntax error",
            Family::Semantic => "Semantic error",
        };

        let report = match diagnostic.span {
            Some(span) => Report::error()
                .with_message(title)
                .with_code(diagnostic.kind.to_string())
                .with_labels(vec![
                    Label::primary(file_id, span.start..span.end).with_message(&diagnostic.message)
                ]),
            None => Report::error()
                .with_message(title)
                .with_code(diagnostic.kind.to_string())
                .with_notes(vec![format!("line {}: {}", diagnostic.line, diagnostic.message)]),
        };

        term::emit(writer, &self.config, &self.files, &report)
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
