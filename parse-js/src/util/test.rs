use serde::Serialize;
use serde_json::to_string_pretty;
use serde_json::Value;
use similar::ChangeTag;
use similar::TextDiff;

/// Compares the JSON form of `actual` against `expected`, panicking with a line diff on mismatch.
pub fn assert_json_eq<T: Serialize>(actual: &T, expected: Value) {
  let actual = serde_json::to_value(actual).unwrap();
  if actual == expected {
    return;
  };
  let expected_str = to_string_pretty(&expected).unwrap();
  let actual_str = to_string_pretty(&actual).unwrap();
  let mut diff = String::new();
  for change in TextDiff::from_lines(&expected_str, &actual_str).iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    diff.push_str(&format!("{}{}", sign, change));
  }
  panic!("JSON mismatch (- expected, + actual):\n{}", diff);
}
