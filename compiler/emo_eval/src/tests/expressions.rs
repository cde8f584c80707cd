use pretty_assertions::assert_eq;

use super::{assert_displays, run, run_display};

#[test]
fn test_integer_arithmetic() {
    assert_displays(&[
        ("5", "5"),
        ("-5", "-5"),
        ("5 + 5 + 5 + 5 - 10", "10"),
        ("2 * 2 * 2 * 2 * 2", "32"),
        ("-50 + 100 + -50", "0"),
        ("5 * 2 + 10", "20"),
        ("20 + 2 * -10", "0"),
        ("50 / 2 * 2 + 10", "60"),
        ("2 * (5 + 10)", "30"),
        ("3 * 3 * 3 + 10", "37"),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", "50"),
    ]);
}

#[test]
fn test_boolean_expressions() {
    assert_displays(&[
        ("true", "true"),
        ("false", "false"),
        ("1 < 2", "true"),
        ("1 > 2", "false"),
        ("1 == 1", "true"),
        ("1 != 1", "false"),
        ("true == true", "true"),
        ("true != false", "true"),
        ("(1 < 2) == true", "true"),
        ("(1 > 2) == true", "false"),
    ]);
}

#[test]
fn test_bang_operator() {
    assert_displays(&[
        ("!true", "false"),
        ("!false", "true"),
        ("!5", "false"),
        ("!!true", "true"),
        ("!!5", "true"),
        ("!0", "false"),
    ]);
}

#[test]
fn test_string_operations() {
    assert_displays(&[
        (r#""Hello" + " " + "World!""#, "Hello World!"),
        (r#""a" == "a""#, "true"),
        (r#""a" != "a""#, "false"),
    ]);
}

#[test]
fn test_equality_across_kinds_is_false() {
    assert_displays(&[
        (r#"1 == "1""#, "false"),
        ("1 != true", "true"),
        ("[1, 2] == [1, 2]", "true"),
        ("[1, 2] == [2, 1]", "false"),
    ]);
}

#[test]
fn test_if_else_expressions() {
    assert_displays(&[
        ("if (true) { 10 }", "10"),
        ("if (false) { 10 }", "null"),
        ("if (1) { 10 }", "10"),
        ("if (0) { 10 }", "10"),
        ("if (1 < 2) { 10 }", "10"),
        ("if (1 > 2) { 10 }", "null"),
        ("if (1 > 2) { 10 } else { 20 }", "20"),
        ("if (1 < 2) { 10 } else { 20 }", "10"),
        ("if 1 < 2 { 10 }", "10"),
    ]);
}

#[test]
fn test_if_branches_share_the_enclosing_scope() {
    assert_eq!(run_display("var x = 1\nif (true) { var x = 2 }\nx"), "2");
}

#[test]
fn test_program_value_is_last_statement() {
    assert_eq!(run_display("1; 2; 3"), "3");
    assert_eq!(run_display("var a = 1\nvar b = 2\na + b"), "3");
}

#[test]
fn test_empty_program_is_null() {
    assert!(run("").is_null());
    assert!(run("\n\n// only a comment\n").is_null());
}

#[test]
fn test_top_level_return_stops_the_program() {
    assert_eq!(run_display("return 5; 10"), "5");
    assert_eq!(run_display("1\nreturn\n2"), "null");
    assert_eq!(run_display("if (true) { return 7 }\n99"), "7");
}
