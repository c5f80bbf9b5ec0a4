use core::hash::Hash;
use core::hash::Hasher;
use serde::Serialize;
use serde::Serializer;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

// This provides Eq for f64.
#[derive(Copy, Clone, Debug)]
pub struct JsNumber(pub f64);

impl JsNumber {
  /// Parses the numeric value of a string the way the language's `ToNumber` does: surrounding whitespace is ignored, an empty string is zero, and anything unparseable is NaN.
  pub fn from_js_str(raw: &str) -> JsNumber {
    let s = raw.trim();
    if s.is_empty() {
      return JsNumber(0.0);
    };
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
      return JsNumber(parse_radix(hex, 16).unwrap_or(f64::NAN));
    };
    let (sign, unsigned) = match s.as_bytes()[0] {
      b'-' => (-1.0, &s[1..]),
      b'+' => (1.0, &s[1..]),
      _ => (1.0, s),
    };
    if unsigned == "Infinity" {
      return JsNumber(sign * f64::INFINITY);
    };
    if !is_decimal_literal(unsigned) {
      return JsNumber(f64::NAN);
    };
    JsNumber(sign * parse_decimal(unsigned).unwrap_or(f64::NAN))
  }
}

/// Parses digits in the given radix. Returns None if there are no digits or any digit is invalid.
pub fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
  if digits.is_empty() {
    return None;
  };
  let mut value = 0.0f64;
  for c in digits.chars() {
    value = value * radix as f64 + c.to_digit(radix)? as f64;
  }
  Some(value)
}

/// Checks the shape `digits? (. digits?)? ([eE] [+-]? digits)?` with at least one mantissa digit.
pub fn is_decimal_literal(raw: &str) -> bool {
  let (mantissa, exponent) = match raw.find(|c| c == 'e' || c == 'E') {
    Some(i) => (&raw[..i], Some(&raw[i + 1..])),
    None => (raw, None),
  };
  let (int, frac) = match mantissa.find('.') {
    Some(i) => (&mantissa[..i], &mantissa[i + 1..]),
    None => (mantissa, ""),
  };
  if int.is_empty() && frac.is_empty() {
    return false;
  };
  if !int.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
    return false;
  };
  match exponent {
    None => true,
    Some(exp) => {
      let exp = exp.strip_prefix(|c| c == '+' || c == '-').unwrap_or(exp);
      !exp.is_empty() && exp.chars().all(|c| c.is_ascii_digit())
    }
  }
}

/// Parses a string already validated by `is_decimal_literal`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
  // Rust's parser rejects a mantissa ending in `.` when an exponent follows, so drop the dot.
  let normalized = match raw.find(|c| c == 'e' || c == 'E') {
    Some(i) if raw[..i].ends_with('.') => format!("{}{}", &raw[..i - 1], &raw[i..]),
    _ => raw.to_string(),
  };
  let normalized = if normalized.starts_with('.') {
    format!("0{}", normalized)
  } else {
    normalized
  };
  normalized.parse::<f64>().ok()
}

/// Formats like `Number.prototype.toString()`: shortest round-trip digits, with exponent notation outside [1e-6, 1e21).
fn format_js_number(value: f64) -> String {
  if value.is_nan() {
    return "NaN".into();
  };
  if value == 0.0 {
    return "0".into();
  };
  if value.is_infinite() {
    return if value < 0.0 { "-Infinity" } else { "Infinity" }.into();
  };
  if value < 0.0 {
    return format!("-{}", format_js_number(-value));
  };
  let sci = format!("{:e}", value);
  let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
  let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
  let k = digits.len() as i32;
  let n = exp.parse::<i32>().unwrap_or(0) + 1;
  if k <= n && n <= 21 {
    format!("{}{}", digits, "0".repeat((n - k) as usize))
  } else if 0 < n && n <= 21 {
    format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
  } else if -6 < n && n <= 0 {
    format!("0.{}{}", "0".repeat((-n) as usize), digits)
  } else {
    let e = n - 1;
    let sign = if e < 0 { '-' } else { '+' };
    if k == 1 {
      format!("{}e{}{}", digits, sign, e.abs())
    } else {
      format!("{}.{}e{}{}", &digits[..1], &digits[1..], sign, e.abs())
    }
  }
}

impl Display for JsNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(&format_js_number(self.0))
  }
}

impl PartialEq for JsNumber {
  fn eq(&self, other: &Self) -> bool {
    if self.0.is_nan() {
      return other.0.is_nan();
    };
    self.0.eq(&other.0)
  }
}

impl Eq for JsNumber {}

impl Ord for JsNumber {
  fn cmp(&self, other: &Self) -> Ordering {
    // Only NaNs cannot be compared, and we treat them as equal.
    self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
  }
}

impl PartialOrd for JsNumber {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Hash for JsNumber {
  fn hash<H: Hasher>(&self, state: &mut H) {
    if !self.0.is_nan() {
      self.0.to_bits().hash(state);
    };
  }
}

impl Serialize for JsNumber {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.0)
  }
}
