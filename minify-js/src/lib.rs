//! Minifies classic JavaScript: parse, resolve scopes, mangle, squeeze, then write compact (or beautified) output.

use emit_js::emit_js;
use emit_js::EmitOptions;
use parse_js::parse_with_options;
use parse_js::parse::ParseOptions;
use symbol_js::compute_scopes;
use symbol_js::mangle::mangle;
use symbol_js::mangle::MangleOptions;
use tracing::debug;
use tracing::debug_span;

pub use err::MinifyError;
pub use squeeze::squeeze;
pub use squeeze::SqueezeOptions;

mod err;
mod squeeze;

/// Settings for each stage. A stage whose options are `None` is skipped.
#[derive(Clone, Debug)]
pub struct MinifyOptions {
  pub parse: ParseOptions,
  pub mangle: Option<MangleOptions>,
  pub squeeze: Option<SqueezeOptions>,
  pub emit: EmitOptions,
}

impl Default for MinifyOptions {
  fn default() -> Self {
    MinifyOptions {
      parse: ParseOptions::default(),
      mangle: Some(MangleOptions::default()),
      squeeze: Some(SqueezeOptions::default()),
      emit: EmitOptions::default(),
    }
  }
}

/// Minifies UTF-8 JavaScript code.
///
/// # Arguments
///
/// * `source` - The source code to minify.
/// * `opts` - Which stages to run, and how.
/// * `output` - Destination to write the generated code to. Nothing is written on error.
///
/// # Examples
///
/// ```
/// use minify_js::{minify, MinifyOptions};
///
/// let code: &str = "function main(first_variable) { var two = 1 + 1; return first_variable * two; }";
/// let mut out = Vec::new();
/// minify(code.as_bytes(), &MinifyOptions::default(), &mut out).unwrap();
/// assert_eq!(out.as_slice(), b"function main(a){var b=2;return a*b}");
/// ```
pub fn minify(source: &[u8], opts: &MinifyOptions, output: &mut Vec<u8>) -> Result<(), MinifyError> {
  let span = debug_span!("minify", len = source.len());
  let _guard = span.enter();

  let source_str = std::str::from_utf8(source)?;
  let mut top_level_node = parse_with_options(source_str, opts.parse)?;
  compute_scopes(&mut top_level_node);
  if let Some(mangle_opts) = &opts.mangle {
    let result = mangle(&mut top_level_node, mangle_opts)?;
    debug!(renamed = result.renamed.len(), "mangle stage done");
  };
  if let Some(squeeze_opts) = &opts.squeeze {
    squeeze(&mut top_level_node, squeeze_opts);
  };
  let code = emit_js(&top_level_node, &opts.emit)?;
  debug!(out_len = code.len(), "emitted");
  output.extend_from_slice(code.as_bytes());
  Ok(())
}
