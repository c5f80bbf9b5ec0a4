use minify_js::{minify, MinifyOptions};

const SOURCE: &str = r#"function add(first, second) {
  var total = first + second;
  if (total > 100) {
    return "big";
  }
  return total;
}
"#;

fn main() {
  let mut out = Vec::new();
  match minify(SOURCE.as_bytes(), &MinifyOptions::default(), &mut out) {
    Ok(()) => println!("{}", String::from_utf8_lossy(&out)),
    Err(err) => eprintln!("{err}"),
  }
}
