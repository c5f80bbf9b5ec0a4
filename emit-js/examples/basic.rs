use emit_js::{emit_js, EmitOptions};
use parse_js::parse;

const SOURCE: &str = r#"function add(a, b) {
  if (a) { return a + b; } else { return b; }
}
var point = { "x": 1, y: 2, "not an identifier": 3 };
"#;

fn main() {
  let ast = match parse(SOURCE) {
    Ok(ast) => ast,
    Err(err) => {
      eprintln!("{err}");
      return;
    }
  };
  for opts in [EmitOptions::default(), EmitOptions::beautified()] {
    match emit_js(&ast, &opts) {
      Ok(code) => println!("{code}"),
      Err(err) => eprintln!("{err}"),
    }
  }
}
