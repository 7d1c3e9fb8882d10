//! Output side: diagnostic serialization and declaration listings
//!
//! Listings are derived straight from the tree and do not depend on the
//! analysis result.

use std::fmt;
use std::io::Write;

use crate::common::{CompileResult, Diagnostics};
use crate::syntax::{FuncDecl, Program, VarDecl};

/// Line written after every listing entry
pub const SEPARATOR: &str = "----------------------";

/// Write one tagged line per diagnostic, in recorded order
pub fn write_diagnostics(diagnostics: &Diagnostics, mut out: impl Write) -> CompileResult<()> {
    for diagnostic in diagnostics {
        writeln!(out, "{}", diagnostic)?;
    }
    out.flush()?;
    Ok(())
}

/// Write each entry followed by a separator line
pub fn write_listing<T: fmt::Display>(items: &[T], mut out: impl Write) -> CompileResult<()> {
    for item in items {
        writeln!(out, "{}", item.to_string().trim_end())?;
        writeln!(out, "{}", SEPARATOR)?;
    }
    out.flush()?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStyle {
    Recursive,
    Iterative,
}

impl fmt::Display for CallStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CallStyle::Recursive => "recursive",
            CallStyle::Iterative => "iterative",
        })
    }
}

/// One declared function, as shown in the functions listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionListing {
    pub name: String,
    pub return_type: String,
    /// `"int a, int b"`, or `None` when the function takes nothing
    pub params: Option<String>,
    pub style: CallStyle,
}

impl FunctionListing {
    pub fn of(func: &FuncDecl) -> Self {
        let params = func.params.as_ref().map(|params| {
            params
                .iter()
                .map(|p| format!("{} {}", p.ty, p.name))
                .collect::<Vec<_>>()
                .join(", ")
        });

        // Substring match on the compact body text, so a longer identifier
        // containing the name also counts.
        let recursive = func.body.as_ref().is_some_and(|body| body.text().contains(&func.name));

        Self {
            name: func.name.clone(),
            return_type: func.return_type.clone(),
            params,
            style: if recursive { CallStyle::Recursive } else { CallStyle::Iterative },
        }
    }
}

impl fmt::Display for FunctionListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Function: {}", self.name)?;
        writeln!(f, "Kind: {}", self.style)?;
        writeln!(f, "Return type: {}", self.return_type)?;
        write!(f, "Parameters: {}", self.params.as_deref().unwrap_or("none"))
    }
}

/// One top-level variable, as shown in the globals listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalListing {
    pub ty: String,
    pub name: String,
    pub value: Option<String>,
}

impl GlobalListing {
    pub fn of(var: &VarDecl) -> Self {
        Self {
            ty: var.ty.clone(),
            name: var.name.clone(),
            value: var.init_text(),
        }
    }
}

impl fmt::Display for GlobalListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Type: {}, Name: {}, Value: {}>",
            self.ty,
            self.name,
            self.value.as_deref().unwrap_or("null")
        )
    }
}

pub fn function_listing(program: &Program) -> Vec<FunctionListing> {
    program.functions().map(FunctionListing::of).collect()
}

pub fn global_listing(program: &Program) -> Vec<GlobalListing> {
    program.globals().map(GlobalListing::of).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;
    use crate::frontend;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Program {
        let mut diags = Diagnostics::new();
        let program = frontend::parse(source, &mut diags);
        assert!(diags.is_empty(), "front-end errors: {:?}", diags.all());
        program
    }

    #[test]
    fn test_function_listing() {
        let program = parse(
            "int fact(int n) { if (n < 2) { return 1; } return n * fact(n - 1); }\n\
             void tick() { int t = 0; }",
        );

        let listing = function_listing(&program);
        assert_eq!(
            listing,
            vec![
                FunctionListing {
                    name: "fact".into(),
                    return_type: "int".into(),
                    params: Some("int n".into()),
                    style: CallStyle::Recursive,
                },
                FunctionListing {
                    name: "tick".into(),
                    return_type: "void".into(),
                    params: None,
                    style: CallStyle::Iterative,
                },
            ]
        );
    }

    #[test]
    fn test_recursion_is_substring_match() {
        let program = parse("int f() { int fx = 1; return fx; }");
        assert_eq!(function_listing(&program)[0].style, CallStyle::Recursive);
    }

    #[test]
    fn test_global_listing_skips_locals() {
        let program = parse("int x = 5;\nvoid f() { int y = 1; }\nstring s;\nfloat z = -2.5;");

        let rendered: Vec<String> = global_listing(&program).iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "<Type: int, Name: x, Value: 5>",
                "<Type: string, Name: s, Value: null>",
                "<Type: float, Name: z, Value: -2.5>",
            ]
        );
    }

    #[test]
    fn test_write_listing() {
        let program = parse("int add(int a, int b) { return a + b; }");
        let mut out = Vec::new();
        write_listing(&function_listing(&program), &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Function: add\nKind: iterative\nReturn type: int\nParameters: int a, int b\n----------------------\n"
        );
    }

    #[test]
    fn test_write_diagnostics() {
        let mut diags = Diagnostics::new();
        diags.record(ErrorKind::DuplicateGlobalVariable, "global variable 'total' is declared more than once", 2);
        diags.record(ErrorKind::UndefinedFunctionCall, "function 'foo' is called but never defined", 5);

        let mut out = Vec::new();
        write_diagnostics(&diags, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[semantic error] line 2: global variable 'total' is declared more than once\n\
             [semantic error] line 5: function 'foo' is called but never defined\n"
        );
    }
}
