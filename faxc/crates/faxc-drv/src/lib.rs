//! faxc-drv - compiler driver.
//!
//! Orchestrates the four pipeline stages (lex, parse, analyze, generate)
//! in order, stopping at the first stage that reports an error. Every
//! stage but the parser is fail-fast; the parser alone resynchronizes and
//! can accumulate more than one diagnostic in a single run.

use std::fmt;
use std::path::{Path, PathBuf};

use faxc_util::{Handler, Interner};
use inkwell::context::Context;

const DEFAULT_OUTPUT: &str = "output.ll";

#[derive(Debug, Clone)]
pub struct Config {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub verbose: bool,
}

impl Config {
    /// Parses `compiler <input_file> [output_file] [-v]` out of `args`
    /// (excluding the program name). `-v` may appear anywhere; the first
    /// and second non-flag arguments are the input and output files.
    pub fn from_args(args: &[String]) -> Result<Config, DriverError> {
        let mut positional = Vec::new();
        let mut verbose = false;

        for arg in args {
            if arg == "-v" {
                verbose = true;
            } else {
                positional.push(arg.clone());
            }
        }

        let input_file = positional
            .first()
            .ok_or(DriverError::Usage("expected an input file"))?
            .into();
        let output_file = positional.get(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

        Ok(Config { input_file, output_file, verbose })
    }
}

#[derive(Debug)]
pub enum DriverError {
    Usage(&'static str),
    Io(PathBuf, std::io::Error),
    Stage(String),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Usage(msg) => write!(f, "usage error: {msg} (compiler <input_file> [output_file] [-v])"),
            DriverError::Io(path, err) => write!(f, "io error: could not read {}: {err}", path.display()),
            DriverError::Stage(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for DriverError {}

/// Runs the full pipeline against an already-parsed [`Config`]. Returns
/// the rendered LLVM IR text on success; callers are responsible for
/// writing it to `config.output_file`.
pub fn compile(config: &Config) -> Result<String, DriverError> {
    let source = std::fs::read_to_string(&config.input_file).map_err(|e| DriverError::Io(config.input_file.clone(), e))?;

    let mut interner = Interner::new();
    let tokens = faxc_lex::tokenize(&source, &mut interner).map_err(|err| DriverError::Stage(format!("lexical error: {err}")))?;

    if config.verbose {
        dump_tokens(&tokens, &interner);
    }

    let mut handler = Handler::new();
    let program = faxc_par::parse(&tokens, &interner, &mut handler);
    if handler.has_errors() {
        return Err(first_diagnostic_error(&handler));
    }

    if config.verbose {
        println!("{program:#?}");
    }

    let analyzed = faxc_sem::analyze(&program, &interner, &mut handler);
    if !analyzed {
        return Err(first_diagnostic_error(&handler));
    }

    if config.verbose {
        dump_symbol_table(&program, &interner);
    }

    let context = Context::create();
    let module_name = config.input_file.file_stem().and_then(|s| s.to_str()).unwrap_or("module");
    let codegen = faxc_gen::CodeGen::new(&context, module_name, &interner);
    codegen.generate(&program).map_err(|err| DriverError::Stage(format!("lowering error: {err}")))
}

fn first_diagnostic_error(handler: &Handler) -> DriverError {
    let diag = handler.diagnostics().iter().find(|d| d.level == faxc_util::Level::Error).expect("has_errors() was true");
    DriverError::Stage(diag.to_string())
}

fn dump_tokens(tokens: &[faxc_lex::Token], interner: &Interner) {
    println!("-- tokens --");
    for token in tokens {
        println!("{:?} {:?}", token.kind, interner.resolve(token.lexeme));
    }
}

/// A flat listing of every declaration name the program introduces at
/// top level, as a cheap stand-in for a full symbol-table dump — the
/// analyzer's scope tree does not outlive `analyze`.
fn dump_symbol_table(program: &faxc_par::Program, interner: &Interner) {
    println!("-- symbols --");
    for decl in program {
        match decl {
            faxc_par::Decl::Function(f) => {
                println!("function {} ({} params)", interner.resolve(f.name), f.params.len());
            }
            faxc_par::Decl::Variable(v) => {
                println!("variable {}", interner.resolve(v.name));
            }
        }
    }
}

/// Runs the driver end to end against the real process argv, writing
/// the generated module to disk. Returns an exit code.
pub fn run() -> Result<(), DriverError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::from_args(&args)?;
    let ir = compile(&config)?;
    std::fs::write(&config.output_file, ir).map_err(|e| DriverError::Io(config.output_file.clone(), e))?;
    Ok(())
}

/// Compiles a single file into a string without touching the filesystem
/// for output, for callers (tests, embedders) that want the IR text
/// directly.
pub fn compile_file(path: &Path, verbose: bool) -> Result<String, DriverError> {
    let config = Config { input_file: path.to_path_buf(), output_file: PathBuf::from(DEFAULT_OUTPUT), verbose };
    compile(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_output_file_when_omitted() {
        let config = Config::from_args(&["main.fax".to_string()]).unwrap();
        assert_eq!(config.output_file, PathBuf::from(DEFAULT_OUTPUT));
        assert!(!config.verbose);
    }

    #[test]
    fn accepts_an_explicit_output_file_and_verbose_flag() {
        let args = ["main.fax".to_string(), "out.ll".to_string(), "-v".to_string()];
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.output_file, PathBuf::from("out.ll"));
        assert!(config.verbose);
    }

    #[test]
    fn verbose_flag_may_precede_the_positional_arguments() {
        let args = ["-v".to_string(), "main.fax".to_string()];
        let config = Config::from_args(&args).unwrap();
        assert_eq!(config.input_file, PathBuf::from("main.fax"));
        assert!(config.verbose);
    }

    #[test]
    fn missing_input_file_is_a_usage_error() {
        assert!(Config::from_args(&[]).is_err());
    }

    #[test]
    fn compiles_a_minimal_program_to_ir_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.fax");
        std::fs::write(&path, "int main() { return 0; }").unwrap();
        let ir = compile_file(&path, false).unwrap();
        assert!(ir.contains("define i32 @main"));
        assert!(ir.starts_with("; LLVM IR Generated Code"));
    }

    #[test]
    fn reports_a_lexical_error_with_the_stage_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.fax");
        std::fs::write(&path, "int main() { return \"unterminated; }").unwrap();
        let err = compile_file(&path, false).unwrap_err().to_string();
        assert!(err.starts_with("lexical error:"));
    }

    #[test]
    fn an_unrecognized_character_surfaces_as_a_syntactic_error_not_a_lexical_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.fax");
        std::fs::write(&path, "int main() { return 1 @ 2; }").unwrap();
        let err = compile_file(&path, false).unwrap_err().to_string();
        assert!(err.starts_with("parser error:"));
    }

    #[test]
    fn reports_a_semantic_error_with_the_stage_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.fax");
        std::fs::write(&path, "int main() { return x; }").unwrap();
        let err = compile_file(&path, false).unwrap_err().to_string();
        assert!(err.contains("semantic error"));
    }
}
