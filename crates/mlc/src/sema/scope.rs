//! Global and per-function scopes

use std::collections::HashSet;
use std::fmt;

use crate::syntax::FuncDecl;

/// Function name plus ordered parameter types.
///
/// Two declarations collide only when both parts match; the same name with
/// different parameter types is an overload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionSignature {
    pub name: String,
    pub param_types: Vec<String>,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, param_types: Vec<String>) -> Self {
        Self {
            name: name.into(),
            param_types,
        }
    }

    pub fn of(func: &FuncDecl) -> Self {
        Self::new(
            func.name.clone(),
            func.params().iter().map(|p| p.ty.clone()).collect(),
        )
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.param_types.join(", "))
    }
}

/// Names visible everywhere: top-level variables and function signatures
#[derive(Debug, Default)]
pub struct GlobalScope {
    variables: HashSet<String>,
    signatures: HashSet<FunctionSignature>,
    function_names: HashSet<String>,
}

impl GlobalScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false, without inserting, when the name is already taken
    pub fn declare_variable(&mut self, name: &str) -> bool {
        self.variables.insert(name.to_string())
    }

    /// Returns false, without inserting, when the exact signature exists
    pub fn declare_function(&mut self, signature: FunctionSignature) -> bool {
        let name = signature.name.clone();
        if !self.signatures.insert(signature) {
            return false;
        }
        self.function_names.insert(name);
        true
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains(name)
    }

    /// Bare-name lookup used by call resolution; argument types are ignored
    pub fn has_function_named(&self, name: &str) -> bool {
        self.function_names.contains(name)
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn function_count(&self) -> usize {
        self.signatures.len()
    }
}

/// Parameters and locals of one function, linked to the global scope for
/// name resolution. The local scope borrows the global scope; it never owns it.
#[derive(Debug)]
pub struct FunctionScope<'g> {
    function: String,
    global: &'g GlobalScope,
    params: HashSet<String>,
    locals: HashSet<String>,
}

impl<'g> FunctionScope<'g> {
    pub fn new(function: impl Into<String>, global: &'g GlobalScope) -> Self {
        Self {
            function: function.into(),
            global,
            params: HashSet::new(),
            locals: HashSet::new(),
        }
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    /// Enclosing scope, used to resolve calls made from this function
    pub fn global(&self) -> &'g GlobalScope {
        self.global
    }

    pub fn declare_parameter(&mut self, name: &str) -> bool {
        self.params.insert(name.to_string())
    }

    /// Returns false, without inserting, when the local already exists
    pub fn declare_local(&mut self, name: &str) -> bool {
        self.locals.insert(name.to_string())
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.params.contains(name)
    }

    pub fn parameter_count(&self) -> usize {
        self.params.len()
    }

    pub fn local_count(&self) -> usize {
        self.locals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(name: &str, types: &[&str]) -> FunctionSignature {
        FunctionSignature::new(name, types.iter().map(|t| (*t).to_string()).collect())
    }

    #[test]
    fn test_duplicate_variable_rejected() {
        let mut global = GlobalScope::new();
        assert!(global.declare_variable("total"));
        assert!(!global.declare_variable("total"));
        assert_eq!(global.variable_count(), 1);
    }

    #[test]
    fn test_signature_overloads() {
        let mut global = GlobalScope::new();
        assert!(global.declare_function(sig("add", &["int", "int"])));
        assert!(global.declare_function(sig("add", &["float", "float"])));
        assert!(!global.declare_function(sig("add", &["int", "int"])));

        assert_eq!(global.function_count(), 2);
        assert!(global.has_function_named("add"));
        assert!(!global.has_function_named("sub"));
    }

    #[test]
    fn test_signature_display() {
        assert_eq!(sig("f", &[]).to_string(), "f()");
        assert_eq!(sig("mix", &["int", "string"]).to_string(), "mix(int, string)");
    }

    #[test]
    fn test_function_scope() {
        let mut global = GlobalScope::new();
        global.declare_variable("limit");
        global.declare_function(sig("helper", &[]));

        let mut scope = FunctionScope::new("run", &global);
        assert!(scope.declare_parameter("n"));
        assert!(scope.declare_local("i"));
        assert!(!scope.declare_local("i"));

        assert!(scope.has_parameter("n"));
        assert!(!scope.has_parameter("i"));
        assert_eq!(scope.parameter_count(), 1);
        assert_eq!(scope.local_count(), 1);
        assert!(scope.global().has_function_named("helper"));
        assert_eq!(scope.function(), "run");
    }
}
