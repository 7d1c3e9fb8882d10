//! Per-function local scope checks

use crate::common::{Diagnostics, ErrorKind};
use crate::syntax::{FuncDecl, VarDecl};

use super::scope::{FunctionScope, GlobalScope};

/// Builds the local scope of each function and reports parameter
/// shadowing and duplicate locals.
///
/// Only statements directly inside the function body are looked at;
/// declarations nested in `if`/`while`/block statements are skipped.
pub struct FunctionBodyAnalyzer<'g, 'd> {
    global: &'g GlobalScope,
    diagnostics: &'d mut Diagnostics,
}

impl<'g, 'd> FunctionBodyAnalyzer<'g, 'd> {
    pub fn new(global: &'g GlobalScope, diagnostics: &'d mut Diagnostics) -> Self {
        Self { global, diagnostics }
    }

    pub fn analyze(&mut self, func: &FuncDecl) -> FunctionScope<'g> {
        let mut scope = FunctionScope::new(func.name.clone(), self.global);
        for param in func.params() {
            scope.declare_parameter(&param.name);
        }

        for var in func.statements().iter().filter_map(|stmt| stmt.declaration()) {
            self.declare_local(&mut scope, var);
        }

        scope
    }

    fn declare_local(&mut self, scope: &mut FunctionScope<'g>, var: &VarDecl) {
        // Shadowing and duplication are independent; both may fire
        if scope.has_parameter(&var.name) {
            self.diagnostics.record_at(
                ErrorKind::ParameterShadowing,
                format!(
                    "local variable '{}' in function '{}' has the same name as a parameter",
                    var.name,
                    scope.function()
                ),
                var.span,
            );
        }

        if !scope.declare_local(&var.name) {
            self.diagnostics.record_at(
                ErrorKind::DuplicateLocalVariable,
                format!(
                    "local variable '{}' is declared more than once in function '{}'",
                    var.name,
                    scope.function()
                ),
                var.span,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend;
    use crate::syntax::Program;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Program {
        let mut diags = Diagnostics::new();
        let program = frontend::parse(source, &mut diags);
        assert!(diags.is_empty(), "front-end errors: {:?}", diags.all());
        program
    }

    fn analyze(source: &str) -> Diagnostics {
        let program = parse(source);
        let global = GlobalScope::new();
        let mut diags = Diagnostics::new();
        let mut analyzer = FunctionBodyAnalyzer::new(&global, &mut diags);
        for func in program.functions() {
            analyzer.analyze(func);
        }
        diags
    }

    #[test]
    fn test_parameter_shadowing() {
        let diags = analyze("int add(int a, int b) {\n  int a;\n}");

        assert_eq!(diags.len(), 1);
        let d = &diags.all()[0];
        assert_eq!(d.kind, ErrorKind::ParameterShadowing);
        assert_eq!(d.line, 2);
        assert!(d.message.contains("'a'"));
        assert!(d.message.contains("'add'"));
    }

    #[test]
    fn test_duplicate_local() {
        let source = "void f() {\n  int i;\n  float i;\n}";
        let diags = analyze(source);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags.all()[0].kind, ErrorKind::DuplicateLocalVariable);
        assert_eq!(diags.all()[0].line, 3);
        let span = diags.all()[0].span.unwrap();
        assert_eq!(&source[span.start..span.end], "float i;");
    }

    #[test]
    fn test_shadowing_and_duplicate_both_fire() {
        let diags = analyze("void f(int n) {\n  int n;\n  int n;\n}");

        let kinds: Vec<_> = diags.iter().map(|d| (d.kind, d.line)).collect();
        assert_eq!(
            kinds,
            vec![
                (ErrorKind::ParameterShadowing, 2),
                (ErrorKind::ParameterShadowing, 3),
                (ErrorKind::DuplicateLocalVariable, 3),
            ]
        );
    }

    #[test]
    fn test_nested_blocks_are_not_descended() {
        let diags = analyze("void f(int n) {\n  if (n) { int n; }\n  while (n) { int k; int k; }\n}");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_scopes_are_per_function() {
        let diags = analyze("void f() { int x; }\nvoid g() { int x; }");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_returned_scope_holds_names() {
        let program = parse("int f(int a) { int b; }");
        let global = GlobalScope::new();
        let mut diags = Diagnostics::new();
        let scope = FunctionBodyAnalyzer::new(&global, &mut diags).analyze(program.functions().next().unwrap());

        assert!(scope.has_parameter("a"));
        assert!(!scope.has_parameter("b"));
        assert_eq!(scope.local_count(), 1);
        assert_eq!(scope.function(), "f");
    }
}
