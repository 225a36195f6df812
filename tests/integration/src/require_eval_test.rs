//! Cross-crate flow: resolve a transform's configuration for a fixture
//! file, then evaluate the argument expressions of the require() calls
//! the transform would rewrite.

use pretty_assertions::assert_eq;
use std::path::{MAIN_SEPARATOR, PathBuf};
use xform_config::ConfigResolver;
use xform_eval::{
    EvalEnv, EvalError, EvalOptions, Expr, RequireArguments, Span, Value, evaluate,
    evaluate_require_arguments,
};

/// Path to the test-fixtures directory (relative to the workspace root).
fn fixtures_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> ../../test-fixtures
    manifest_dir
        .join("../../test-fixtures")
        .canonicalize()
        .expect("test-fixtures directory should exist")
}

fn project_dir(name: &str) -> PathBuf {
    fixtures_dir().join("projects").join(name)
}

fn sp() -> Span {
    Span::new(0, 1)
}

#[test]
fn test_ambient_bindings_come_from_the_fixture_file() {
    let file = project_dir("inline").join("src/index.js");
    let env = EvalEnv::for_file(&file);

    let filename = evaluate(&Expr::ident("__filename", sp()), &env).unwrap();
    assert_eq!(filename, Value::Str(file.to_string_lossy().into_owned()));

    let dirname = evaluate(&Expr::ident("__dirname", sp()), &env).unwrap();
    assert_eq!(
        dirname,
        Value::Str(file.parent().unwrap().to_string_lossy().into_owned())
    );
}

#[test]
fn test_rewrite_combines_config_and_ambient_bindings() {
    // A template-loading transform: the configured mode picks which
    // template file sits next to the source file.
    let file = project_dir("indirect").join("lib/nested/entry.js");
    let data = ConfigResolver::new("unbundle").load(&file).unwrap();
    let mode = data
        .config
        .as_ref()
        .and_then(|c| c.get("mode"))
        .and_then(|m| m.as_str())
        .unwrap()
        .to_string();

    // path.join(__dirname, mode + ".tmpl")
    let expr = Expr::call(
        Expr::member(Expr::ident("path", sp()), "join", sp()),
        vec![
            Expr::ident("__dirname", sp()),
            Expr::add(Expr::string(mode, sp()), Expr::string(".tmpl", sp()), sp()),
        ],
        sp(),
    );

    let env = EvalEnv::for_file(&file);
    let value = evaluate(&expr, &env).unwrap();
    let expected = format!(
        "{}{}strict.tmpl",
        file.parent().unwrap().to_string_lossy(),
        MAIN_SEPARATOR
    );
    assert_eq!(value, Value::Str(expected));
}

#[test]
fn test_disabled_evaluation_returns_the_argument_source_text() {
    let source = r#"require(locales[lang])"#;
    // A computed member access is not evaluable, so the adapter lowers
    // it to a catchall node.
    let args = [Expr::unsupported("MemberExpression", Span::new(8, 21))];
    let env = EvalEnv::for_file("/srv/app/index.js");

    let on = evaluate_require_arguments(&args, source, &env, &EvalOptions::default());
    assert_eq!(
        on,
        Err(EvalError::Unsupported {
            what: "MemberExpression".into(),
            span: Span::new(8, 21),
        })
    );

    let off = evaluate_require_arguments(
        &args,
        source,
        &env,
        &EvalOptions {
            evaluate_arguments: false,
        },
    );
    assert_eq!(off, Ok(RequireArguments::Raw("locales[lang]".to_string())));
}

#[test]
fn test_unknown_call_reports_and_raw_text_recovers() {
    let source = r#"require(fetch(name))"#;
    let args = [Expr::call(
        Expr::ident("fetch", Span::new(8, 13)),
        vec![Expr::ident("name", Span::new(14, 18))],
        Span::new(8, 19),
    )];
    let env = EvalEnv::for_file("/srv/app/index.js");

    let on = evaluate_require_arguments(&args, source, &env, &EvalOptions::default());
    assert_eq!(
        on,
        Err(EvalError::UnknownCall {
            span: Span::new(8, 19),
        })
    );

    // The caller's fallback policy: take the source text instead.
    let off = evaluate_require_arguments(
        &args,
        source,
        &env,
        &EvalOptions {
            evaluate_arguments: false,
        },
    );
    assert_eq!(off, Ok(RequireArguments::Raw("fetch(name)".to_string())));
}

#[test]
fn test_evaluated_arguments_keep_call_order() {
    let file = project_dir("inline").join("src/index.js");
    let env = EvalEnv::for_file(&file);
    let source = r#"require("./greeting.txt", __dirname)"#;
    let args = [
        Expr::string("./greeting.txt", Span::new(8, 24)),
        Expr::ident("__dirname", Span::new(26, 35)),
    ];

    let result = evaluate_require_arguments(&args, source, &env, &EvalOptions::default()).unwrap();
    assert_eq!(
        result,
        RequireArguments::Evaluated(vec![
            Value::Str("./greeting.txt".to_string()),
            Value::Str(file.parent().unwrap().to_string_lossy().into_owned()),
        ])
    );
}
