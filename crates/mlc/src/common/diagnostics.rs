//! Ordered diagnostic collection
//!
//! Every check, front-end and semantic alike, writes through a single
//! [`Diagnostics`] value. Entries keep their insertion order and get a stable
//! [`DiagnosticId`] when recorded.

use std::fmt;

use super::Span;

/// Every kind of problem the tool can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    LexicalError,
    SyntaxError,
    DuplicateGlobalVariable,
    DuplicateFunctionSignature,
    DuplicateLocalVariable,
    ParameterShadowing,
    TypeMismatch,
    UndefinedFunctionCall,
}

/// Which stage produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Lexical,
    Syntax,
    Semantic,
}

impl ErrorKind {
    pub fn family(self) -> Family {
        match self {
            ErrorKind::LexicalError => Family::Lexical,
            ErrorKind::SyntaxError => Family::Syntax,
            ErrorKind::DuplicateGlobalVariable
            | ErrorKind::DuplicateFunctionSignature
            | ErrorKind::DuplicateLocalVariable
            | ErrorKind::ParameterShadowing
            | ErrorKind::TypeMismatch
            | ErrorKind::UndefinedFunctionCall => Family::Semantic,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::LexicalError => "lexical error",
            ErrorKind::SyntaxError => "syntax error",
            ErrorKind::DuplicateGlobalVariable => "duplicate global variable",
            ErrorKind::DuplicateFunctionSignature => "duplicate function signature",
            ErrorKind::DuplicateLocalVariable => "duplicate local variable",
            ErrorKind::ParameterShadowing => "parameter shadowing",
            ErrorKind::TypeMismatch => "type mismatch",
            ErrorKind::UndefinedFunctionCall => "undefined function call",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Family::Lexical => "lexical error",
            Family::Syntax => "syntax error",
            Family::Semantic => "semantic error",
        })
    }
}

/// Position of a diagnostic within its collector
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiagnosticId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub id: DiagnosticId,
    pub kind: ErrorKind,
    pub message: String,
    pub line: u32,
    /// Precise source range, when the producer had one
    pub span: Option<Span>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) if self.kind.family() != Family::Semantic => write!(
                f,
                "[{}] line {}, column {}: {}",
                self.kind.family(),
                self.line,
                span.column,
                self.message
            ),
            _ => write!(f, "[{}] line {}: {}", self.kind.family(), self.line, self.message),
        }
    }
}

/// Append-only, ordered sink for diagnostics
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    next_id: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: ErrorKind, message: impl Into<String>, line: u32) -> DiagnosticId {
        self.push(kind, message.into(), line, None)
    }

    pub fn record_at(&mut self, kind: ErrorKind, message: impl Into<String>, span: Span) -> DiagnosticId {
        self.push(kind, message.into(), span.line, Some(span))
    }

    fn push(&mut self, kind: ErrorKind, message: String, line: u32, span: Option<Span>) -> DiagnosticId {
        let id = DiagnosticId(self.next_id);
        self.next_id += 1;
        self.entries.push(Diagnostic { id, kind, message, line, span });
        id
    }

    pub fn all(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn get(&self, id: DiagnosticId) -> Option<&Diagnostic> {
        self.entries.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: ErrorKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    /// Drop every entry. Ids keep increasing across a clear.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keep only the entry with the given id
    pub fn retain_only(&mut self, id: DiagnosticId) {
        self.entries.retain(|d| d.id == id);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_keeps_order() {
        let mut diags = Diagnostics::new();
        diags.record(ErrorKind::SyntaxError, "expected ';'", 1);
        diags.record(ErrorKind::TypeMismatch, "bad value", 3);
        diags.record(ErrorKind::DuplicateGlobalVariable, "twice", 2);

        let kinds: Vec<_> = diags.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ErrorKind::SyntaxError,
                ErrorKind::TypeMismatch,
                ErrorKind::DuplicateGlobalVariable
            ]
        );
        assert_eq!(diags.count(ErrorKind::TypeMismatch), 1);
    }

    #[test]
    fn test_ids_are_stable_across_clear() {
        let mut diags = Diagnostics::new();
        let first = diags.record(ErrorKind::TypeMismatch, "a", 1);
        diags.clear();
        assert!(diags.is_empty());
        assert!(diags.get(first).is_none());

        let second = diags.record(ErrorKind::TypeMismatch, "b", 2);
        assert_ne!(first, second);
        assert_eq!(diags.get(second).map(|d| d.line), Some(2));
    }

    #[test]
    fn test_retain_only() {
        let mut diags = Diagnostics::new();
        diags.record(ErrorKind::TypeMismatch, "a", 1);
        let keep = diags.record(ErrorKind::UndefinedFunctionCall, "b", 2);
        diags.record(ErrorKind::TypeMismatch, "c", 3);

        diags.retain_only(keep);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.all()[0].id, keep);
    }

    #[test]
    fn test_display_tags() {
        let mut diags = Diagnostics::new();
        diags.record_at(ErrorKind::LexicalError, "unexpected character '@'", Span::new(5, 6, 2, 4));
        diags.record(ErrorKind::ParameterShadowing, "shadowed", 7);

        let lines: Vec<String> = diags.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "[lexical error] line 2, column 4: unexpected character '@'".to_string(),
                "[semantic error] line 7: shadowed".to_string(),
            ]
        );
    }
}
