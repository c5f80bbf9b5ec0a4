/// Renders a string literal delimited by double quotes, using JSON-style escapes. Non-ASCII characters are preserved as UTF-8 except for the line separators U+2028/U+2029, which would terminate the literal.
pub fn string_literal_double_quoted(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('"');
  for ch in value.chars() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '"' => out.push_str("\\\""),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\x08' => out.push_str("\\b"),
      '\x0c' => out.push_str("\\f"),
      '\u{2028}' => out.push_str("\\u2028"),
      '\u{2029}' => out.push_str("\\u2029"),
      ch if ch < '\u{20}' || ch == '\u{7f}' => {
        out.push_str(&format!("\\u{:04x}", ch as u32));
      }
      ch => out.push(ch),
    }
  }
  out.push('"');
  out
}
