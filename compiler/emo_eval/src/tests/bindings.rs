use pretty_assertions::assert_eq;

use super::{run_display, run_error, run_in};
use crate::{Environment, EvalErrorKind, Value};

#[test]
fn test_var_and_define_evaluate_to_null() {
    assert_eq!(run_display("var x = 1"), "null");
    assert_eq!(run_display("define(MAX, 1)"), "null");
}

#[test]
fn test_constants() {
    assert_eq!(run_display("define(MAX, 10)\nMAX * 2"), "20");
    assert_eq!(
        run_display(r#"define(GREETING, "Hello, " + "Emo")
GREETING"#),
        "Hello, Emo"
    );
}

#[test]
fn test_constants_cannot_be_reassigned() {
    assert_eq!(
        run_error("define(MAX, 10)\nMAX = 11"),
        EvalErrorKind::ImmutableBinding {
            name: "MAX".to_string()
        }
    );
}

#[test]
fn test_constants_cannot_be_redefined_in_the_same_scope() {
    let redefinition = EvalErrorKind::ConstantRedefinition {
        name: "MAX".to_string(),
    };
    assert_eq!(run_error("define(MAX, 1)\ndefine(MAX, 2)"), redefinition);
    assert_eq!(run_error("define(MAX, 1)\nvar MAX = 2"), redefinition);
}

#[test]
fn test_constants_can_be_shadowed_in_a_call() {
    assert_eq!(
        run_display("define(LIMIT, 1)\nfunc f() { define(LIMIT, 2); LIMIT }\n[f(), LIMIT]"),
        "[2, 1]"
    );
}

#[test]
fn test_var_redeclaration_overwrites() {
    assert_eq!(run_display("var x = 1\nvar x = 2\nx"), "2");
}

#[test]
fn test_assignment() {
    assert_eq!(run_display("var x = 1\nx = 7"), "7");
    assert_eq!(run_display("var x = 1\nx = x + 41\nx"), "42");
}

#[test]
fn test_assignment_to_undefined_name() {
    assert_eq!(
        run_error("y = 3"),
        EvalErrorKind::UndefinedVariable {
            name: "y".to_string()
        }
    );
}

#[test]
fn test_import_is_not_evaluated() {
    assert_eq!(run_display("import \"math\"\n1"), "1");
    assert_eq!(run_display("import undefinedModule"), "null");
}

#[test]
fn test_environment_persists_across_programs() {
    let env = Environment::new();
    run_in("var a = 2", &env);
    run_in("func triple(n: Int) { n * 3 }", &env);
    assert_eq!(run_in("triple(a)", &env).to_string(), "6");
    assert!(matches!(env.lookup("a"), Some(Value::Integer(2))));
}
