//! Static word, operator, and precedence tables shared by the lexer, parser, and downstream crates.

use crate::char::is_identifier_char;
use crate::char::is_identifier_start;
use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use once_cell::sync::Lazy;

fn set(words: &[&'static str]) -> HashSet<&'static str> {
  words.iter().copied().collect()
}

#[rustfmt::skip]
pub static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| set(&[
  "break", "case", "catch", "const", "continue", "debugger", "default", "delete", "do", "else",
  "false", "finally", "for", "function", "if", "in", "instanceof", "new", "null", "return",
  "switch", "throw", "true", "try", "typeof", "var", "void", "while", "with",
]));

#[rustfmt::skip]
pub static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| set(&[
  "abstract", "boolean", "byte", "char", "class", "double", "enum", "export", "extends", "final",
  "float", "goto", "implements", "import", "int", "interface", "long", "native", "package",
  "private", "protected", "public", "short", "static", "super", "synchronized", "throws",
  "transient", "volatile",
]));

/// Keywords after which a `/` begins a regular expression.
#[rustfmt::skip]
pub static KEYWORDS_BEFORE_EXPRESSION: Lazy<HashSet<&'static str>> = Lazy::new(|| set(&[
  "return", "new", "delete", "throw", "else", "case", "in", "instanceof", "typeof", "void",
]));

pub static KEYWORDS_ATOM: Lazy<HashSet<&'static str>> =
  Lazy::new(|| set(&["false", "null", "true"]));

/// Every operator the lexer recognizes, including word operators.
#[rustfmt::skip]
pub static OPERATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| set(&[
  "in", "instanceof", "typeof", "new", "void", "delete",
  "++", "--", "+", "-", "!", "~", "&", "|", "^", "*", "/", "%",
  ">>", "<<", ">>>", "<", ">", "<=", ">=", "==", "===", "!=", "!==",
  "?", "=", "+=", "-=", "/=", "*=", "%=", ">>=", "<<=", ">>>=", "|=", "^=", "&=",
  "&&", "||",
]));

/// Punctuation after which a `/` begins a regular expression.
pub static PUNC_BEFORE_EXPRESSION: Lazy<HashSet<&'static str>> =
  Lazy::new(|| set(&["[", "{", "}", "(", ",", ".", ";", ":"]));

#[rustfmt::skip]
pub static UNARY_PREFIX: Lazy<HashSet<&'static str>> = Lazy::new(|| set(&[
  "typeof", "void", "delete", "--", "++", "!", "~", "-", "+",
]));

pub static UNARY_POSTFIX: Lazy<HashSet<&'static str>> = Lazy::new(|| set(&["--", "++"]));

/// Maps an assignment operator to its underlying binary operator; plain `=` maps to None.
#[rustfmt::skip]
pub static ASSIGNMENT: Lazy<HashMap<&'static str, Option<&'static str>>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, Option<&'static str>>::new();
  map.insert("=", None);
  for op in ["+=", "-=", "/=", "*=", "%=", ">>=", "<<=", ">>>=", "|=", "^=", "&="] {
    map.insert(op, Some(&op[..op.len() - 1]));
  }
  map
});

/// Binary operator precedence, 1 (`||`) to 10 (`* / %`). Higher binds tighter.
#[rustfmt::skip]
pub static PRECEDENCE: Lazy<HashMap<&'static str, u8>> = Lazy::new(|| {
  let levels: [&[&'static str]; 10] = [
    &["||"],
    &["&&"],
    &["|"],
    &["^"],
    &["&"],
    &["==", "===", "!=", "!=="],
    &["<", ">", "<=", ">=", "in", "instanceof"],
    &[">>", "<<", ">>>"],
    &["+", "-"],
    &["*", "/", "%"],
  ];
  let mut map = HashMap::<&'static str, u8>::new();
  for (i, ops) in levels.iter().enumerate() {
    for op in ops.iter() {
      map.insert(*op, i as u8 + 1);
    }
  }
  map
});

pub static STATEMENTS_WITH_LABELS: Lazy<HashSet<&'static str>> =
  Lazy::new(|| set(&["for", "do", "while", "switch"]));

/// Whether `name` can be written as a bare identifier: matches `[a-z_$][a-z0-9_$]*` (case-insensitively) and is not a keyword, reserved word, or atom.
pub fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  let Some(first) = chars.next() else {
    return false;
  };
  is_identifier_start(first)
    && chars.all(is_identifier_char)
    && !KEYWORDS.contains(name)
    && !RESERVED_WORDS.contains(name)
    && !KEYWORDS_ATOM.contains(name)
}
