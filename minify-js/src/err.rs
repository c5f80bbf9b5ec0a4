use emit_js::EmitError;
use parse_js::error::SyntaxError;
use std::str::Utf8Error;
use symbol_js::mangle::MangleError;
use thiserror::Error;

/// A failure in one stage of [`crate::minify`]. No output is written when any stage fails.
#[derive(Debug, Error)]
pub enum MinifyError {
  #[error("source is not valid UTF-8: {0}")]
  InvalidUtf8(#[from] Utf8Error),
  #[error("syntax error: {0}")]
  Syntax(#[from] SyntaxError),
  #[error("mangling failed: {0}")]
  Mangle(#[from] MangleError),
  #[error("code generation failed: {0}")]
  Emit(#[from] EmitError),
}
