//! MiniLang front-end
//!
//! Turns source text into a [`Program`] tree. Lexical and syntax errors go
//! into the shared [`Diagnostics`] sink ahead of any semantic finding, and
//! parsing always yields a (possibly partial) tree.

pub mod lexer;
pub mod parser;

use crate::common::{CompileError, Diagnostics, ErrorKind};
use crate::syntax::Program;

pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseOutput, Parser};

/// Parse `source`, recording front-end errors into `diagnostics`
pub fn parse(source: &str, diagnostics: &mut Diagnostics) -> Program {
    let output = Parser::new(source).parse();
    for error in output.errors {
        record_error(diagnostics, error);
    }
    output.program
}

/// Token dump used by `--dump-tokens`
pub fn dump_tokens(source: &str) -> String {
    let mut lexer = Lexer::new(source);
    let mut output = String::new();
    loop {
        match lexer.next_token() {
            Ok(token) => {
                let is_eof = matches!(token.kind, TokenKind::Eof);
                output.push_str(&format!("{}:{} {}\n", token.span.line, token.span.column, token.kind));
                if is_eof {
                    break;
                }
            }
            Err(e) => output.push_str(&format!("{}\n", e)),
        }
    }
    output
}

fn record_error(diagnostics: &mut Diagnostics, error: CompileError) {
    match error {
        CompileError::Lexer { message, span } => {
            diagnostics.record_at(ErrorKind::LexicalError, message, span);
        }
        CompileError::Parser { message, span } => {
            diagnostics.record_at(ErrorKind::SyntaxError, message, span);
        }
        CompileError::Io(e) => {
            diagnostics.record(ErrorKind::SyntaxError, e.to_string(), 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_end_errors_are_recorded_in_order() {
        let mut diags = Diagnostics::new();
        let program = parse("int a = 1 # 2;\nint b = ;\nint c;", &mut diags);

        let kinds: Vec<_> = diags.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![ErrorKind::LexicalError, ErrorKind::SyntaxError, ErrorKind::SyntaxError]
        );
        assert_eq!(diags.all()[2].line, 2);
        assert_eq!(program.globals().map(|v| v.name.as_str()).collect::<Vec<_>>(), vec!["c"]);
    }

    #[test]
    fn test_dump_tokens() {
        let dump = dump_tokens("int x;");
        assert_eq!(dump, "1:1 'int'\n1:5 identifier 'x'\n1:6 ';'\n1:7 end of file\n");
    }
}
