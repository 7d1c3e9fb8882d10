//! Checking pipeline: front-end, semantic analysis, legacy output policy

use crate::common::Diagnostics;
use crate::frontend;
use crate::sema::{Analysis, AnalyzerConfig, SemanticAnalyzer};
use crate::syntax::Program;

/// Options for one pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub analyzer: AnalyzerConfig,
    /// Reproduce the historical output: the first undefined call ends the
    /// pass and replaces every other diagnostic.
    pub legacy_call_reset: bool,
    pub verbose: bool,
}

/// Everything a run produced
#[derive(Debug)]
pub struct CheckOutput {
    pub program: Program,
    pub diagnostics: Diagnostics,
    /// `None` when the tree was empty and analysis was skipped
    pub analysis: Option<Analysis>,
}

impl CheckOutput {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Coordinates the front-end and the analyzer for one source text
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn check_source(&self, source: &str) -> CheckOutput {
        let mut diagnostics = Diagnostics::new();

        if self.config.verbose {
            eprintln!("Parsing...");
        }
        let program = frontend::parse(source, &mut diagnostics);
        if self.config.verbose {
            eprintln!("  {} item(s), {} front-end diagnostic(s)", program.items.len(), diagnostics.len());
        }

        if program.is_empty() {
            if self.config.verbose {
                eprintln!("Syntax tree is empty, skipping analysis");
            }
            return CheckOutput {
                program,
                diagnostics,
                analysis: None,
            };
        }

        let analysis = self.analyze(&program, &mut diagnostics);
        CheckOutput {
            program,
            diagnostics,
            analysis: Some(analysis),
        }
    }

    /// Run the analyzer over an already parsed tree
    pub fn analyze(&self, program: &Program, diagnostics: &mut Diagnostics) -> Analysis {
        let mut config = self.config.analyzer.clone();
        config.verbose |= self.config.verbose;
        if self.config.legacy_call_reset {
            config.halt_on_undefined_call = true;
        }

        let analysis = SemanticAnalyzer::new(config).analyze(program, diagnostics);

        if self.config.legacy_call_reset {
            if let Some(id) = analysis.halted_by {
                diagnostics.retain_only(id);
            }
        }

        analysis
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "int total;\nint total;\nint x = \"abc\";\nfoo();\nbar();\n";

    #[test]
    fn test_default_keeps_everything() {
        let output = Pipeline::default().check_source(SOURCE);

        let kinds: Vec<_> = output.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ErrorKind::DuplicateGlobalVariable,
                ErrorKind::TypeMismatch,
                ErrorKind::UndefinedFunctionCall,
                ErrorKind::UndefinedFunctionCall,
            ]
        );
    }

    #[test]
    fn test_legacy_reset_leaves_single_call_error() {
        let pipeline = Pipeline::new(PipelineConfig {
            legacy_call_reset: true,
            ..PipelineConfig::default()
        });
        let output = pipeline.check_source(SOURCE);

        assert_eq!(output.diagnostics.len(), 1);
        let only = &output.diagnostics.all()[0];
        assert_eq!(only.kind, ErrorKind::UndefinedFunctionCall);
        assert_eq!(only.line, 4);
        assert!(only.message.contains("'foo'"));
    }

    #[test]
    fn test_legacy_reset_without_bad_call_changes_nothing() {
        let pipeline = Pipeline::new(PipelineConfig {
            legacy_call_reset: true,
            ..PipelineConfig::default()
        });
        let output = pipeline.check_source("int a;\nint a;\n");

        assert_eq!(output.diagnostics.count(ErrorKind::DuplicateGlobalVariable), 1);
        assert!(!output.analysis.unwrap().halted());
    }

    #[test]
    fn test_empty_tree_skips_analysis() {
        let output = Pipeline::default().check_source("int = ;");

        assert!(output.analysis.is_none());
        assert_eq!(output.diagnostics.count(ErrorKind::SyntaxError), 1);
        assert!(!output.is_clean());
    }
}
