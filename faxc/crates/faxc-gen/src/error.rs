use thiserror::Error;

/// Failures the backend can hit while lowering an already-validated
/// AST. Most of these are defensive: the semantic analyzer rejects the
/// inputs that would trigger them, but the backend does not trust that
/// silently — an unsupported node still halts the walk here too.
#[derive(Debug, Error)]
pub enum CodeGenError {
    #[error("unsupported construct: {0}")]
    UnsupportedConstruct(String),

    #[error("undefined variable at emission time: {0}")]
    UndefinedVariable(String),

    #[error("LLVM operation failed: {0}")]
    LlvmOperationFailed(String),
}

pub type Result<T> = std::result::Result<T, CodeGenError>;
