use emit_js::EmitOptions;
use minify_js::minify;
use minify_js::MinifyError;
use minify_js::MinifyOptions;
use parse_js::parse::ParseOptions;
use symbol_js::mangle::MangleOptions;

fn run(source: &str, opts: &MinifyOptions) -> Result<String, MinifyError> {
  let mut out = Vec::new();
  minify(source.as_bytes(), opts, &mut out)?;
  Ok(String::from_utf8(out).unwrap())
}

fn minified(source: &str) -> String {
  run(source, &MinifyOptions::default()).unwrap()
}

#[test]
fn mangles_and_squeezes_function_bodies() {
  assert_eq!(
    minified("function add(first, second) { var total = first + second; if (total > 100) { return 'big'; } return total; }"),
    r#"function add(a,b){var c=a+b;return c>100?"big":c}"#
  );
}

#[test]
fn eval_keeps_names_visible_to_it() {
  let out = minified(
    r#"(function(b){
      (function(){ return eval("x") })();
      (function(){ var foo=5; var bar=10; return b+foo+bar; })();
    })()"#,
  );
  assert_eq!(
    out,
    r#"(function(b){(function(){return eval("x")}());(function(){var a=5,c=10;return b+a+c}())}())"#
  );
}

#[test]
fn keeps_the_else_with_its_if() {
  assert_eq!(minified("if (a) if (b) x(); else y();"), "if(a)b?x():y()");
  assert_eq!(
    minified("if (a) { if (b) for (;;); } else y();"),
    "if(a){if(b)for(;;);}else y()"
  );
}

#[test]
fn stages_can_be_disabled() {
  let opts = MinifyOptions {
    mangle: None,
    squeeze: None,
    ..MinifyOptions::default()
  };
  assert_eq!(
    run("function f(value) { var x = 1 + 2; return value; }", &opts).unwrap(),
    "function f(value){var x=1+2;return value}"
  );
}

#[test]
fn mangles_toplevel_on_request() {
  let opts = MinifyOptions {
    mangle: Some(MangleOptions {
      include_toplevel: true,
      except: vec!["keep".to_string()],
    }),
    ..MinifyOptions::default()
  };
  assert_eq!(
    run("var total = 1; function f() { return total; }", &opts).unwrap(),
    "var a=1;function b(){return a}"
  );
  assert_eq!(
    run("var keep = 1, other = 2; x(keep, other);", &opts).unwrap(),
    "var keep=1,a=2;x(keep,a)"
  );
}

#[test]
fn beautifies_on_request() {
  let opts = MinifyOptions {
    mangle: None,
    emit: EmitOptions::beautified(),
    ..MinifyOptions::default()
  };
  assert_eq!(
    run("function f(a){if(a){g();}else{h();}}", &opts).unwrap(),
    "function f(a) {\n    a ? g() : h();\n}\n"
  );
}

#[test]
fn reports_syntax_errors_without_output() {
  let mut out = Vec::new();
  let err = minify(b"var = 1;", &MinifyOptions::default(), &mut out).unwrap_err();
  assert!(matches!(err, MinifyError::Syntax(_)));
  assert!(out.is_empty());
}

#[test]
fn honours_strict_semicolons() {
  let opts = MinifyOptions {
    parse: ParseOptions {
      strict_semicolons: true,
      ..ParseOptions::default()
    },
    ..MinifyOptions::default()
  };
  assert!(run("a = 1;", &opts).is_ok());
  assert!(matches!(run("a = 1", &opts), Err(MinifyError::Syntax(_))));
}

#[test]
fn rejects_invalid_utf8() {
  let mut out = Vec::new();
  let err = minify(&[b'a', 0xff], &MinifyOptions::default(), &mut out).unwrap_err();
  assert!(matches!(err, MinifyError::InvalidUtf8(_)));
}
