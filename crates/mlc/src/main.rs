//! mlc - semantic checker for MiniLang
//!
//! Usage: mlc [OPTIONS] <input>

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use minilang::common::DiagnosticReporter;
use minilang::report;
use minilang::{CallDepth, Pipeline, PipelineConfig};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "mlc")]
#[command(author = "MiniLang Team")]
#[command(version)]
#[command(about = "Semantic checker for the MiniLang teaching language", long_about = None)]
struct Args {
    /// Input source file
    #[arg(required = true)]
    input: PathBuf,

    /// Write diagnostics to this file, one per line
    #[arg(long)]
    errors: Option<PathBuf>,

    /// Write the declared functions listing to this file
    #[arg(long)]
    functions: Option<PathBuf>,

    /// Write the global variables listing to this file
    #[arg(long)]
    globals: Option<PathBuf>,

    /// Look for calls in every nested sub-expression
    #[arg(long)]
    deep_calls: bool,

    /// Stop analysis at the first call to an undefined function
    #[arg(long)]
    halt_on_undefined_call: bool,

    /// Report only the first undefined call, dropping every other diagnostic
    #[arg(long)]
    legacy_call_reset: bool,

    /// Print tagged one-line diagnostics instead of annotated source
    #[arg(long)]
    plain: bool,

    /// Dump AST (for debugging)
    #[arg(long)]
    dump_ast: bool,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(2),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Returns whether the input was free of diagnostics
fn run(args: &Args) -> Result<bool> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read '{}'", args.input.display()))?;
    let filename = args.input.display().to_string();

    if args.dump_tokens {
        eprintln!("=== Tokens ===");
        eprint!("{}", minilang::frontend::dump_tokens(&source));
        eprintln!("=== End Tokens ===\n");
    }

    let mut config = PipelineConfig {
        legacy_call_reset: args.legacy_call_reset,
        verbose: args.verbose,
        ..PipelineConfig::default()
    };
    config.analyzer.halt_on_undefined_call = args.halt_on_undefined_call;
    if args.deep_calls {
        config.analyzer.call_depth = CallDepth::Deep;
    }

    if args.verbose {
        eprintln!("Checking {}", filename);
    }
    let output = Pipeline::new(config).check_source(&source);

    if args.dump_ast {
        eprintln!("=== AST ===");
        eprintln!("{:#?}", output.program);
        eprintln!("=== End AST ===\n");
    }

    if output.is_clean() {
        println!("No errors found.");
    } else if args.plain {
        report::write_diagnostics(&output.diagnostics, io::stdout().lock())?;
    } else {
        let mut reporter = DiagnosticReporter::new();
        let file_id = reporter.add_file(&filename, &source);
        reporter.report_all(file_id, &output.diagnostics);
    }

    if let Some(path) = &args.errors {
        report::write_diagnostics(&output.diagnostics, create(path)?)?;
        if args.verbose {
            eprintln!("Diagnostics written to {}", path.display());
        }
    }

    if let Some(path) = &args.functions {
        report::write_listing(&report::function_listing(&output.program), create(path)?)?;
        if args.verbose {
            eprintln!("Functions written to {}", path.display());
        }
    }

    if let Some(path) = &args.globals {
        report::write_listing(&report::global_listing(&output.program), create(path)?)?;
        if args.verbose {
            eprintln!("Global variables written to {}", path.display());
        }
    }

    Ok(output.is_clean())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("cannot create '{}'", path.display()))?;
    Ok(BufWriter::new(file))
}
