use parse_js::parse::ParseOptions;
use parse_js::parse_with_options;

const SOURCE: &str = r#"var origin = { x: 0, y: 0 };
function distance(a, b) {
  return Math.sqrt((a.x - b.x) * (a.x - b.x) + (a.y - b.y) * (a.y - b.y));
}
"#;

fn main() {
  let parsed = parse_with_options(SOURCE, ParseOptions {
    strict_semicolons: true,
    ..ParseOptions::default()
  });

  match parsed {
    Ok(ast) => {
      println!("statements: {}", ast.stx.body.len());
      if let Some(first) = ast.stx.body.first() {
        println!("first_stmt_span: {}..{}", first.loc.0, first.loc.1);
      }
    }
    Err(err) => eprintln!("{err}"),
  }
}
