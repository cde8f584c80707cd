use emo_ir::Stmt;
use pretty_assertions::assert_eq;

use super::error_messages;
use crate::{parse, MAX_NESTING_DEPTH};

#[test]
fn test_expect_peek_messages() {
    assert_eq!(
        error_messages("var = 5"),
        vec!["expected next token to be IDENT, got (=):<=> instead"]
    );
    assert_eq!(
        error_messages("var x 5"),
        vec!["expected next token to be =, got (INT):<5> instead"]
    );
    assert_eq!(
        error_messages("var x\n"),
        vec!["expected next token to be =, got <NEWLINE> instead"]
    );
}

#[test]
fn test_no_prefix_parse_function() {
    assert_eq!(
        error_messages("@"),
        vec!["no prefix parse function for ILLEGAL found"]
    );
    assert_eq!(
        error_messages(")"),
        vec!["no prefix parse function for ) found"]
    );
}

#[test]
fn test_integer_out_of_range() {
    assert_eq!(
        error_messages("99999999999999999999"),
        vec!["could not parse \"99999999999999999999\" as integer"]
    );
}

#[test]
fn test_error_then_valid_statement() {
    let output = parse("define(maxAge, 35)\nvar x = 1");
    assert!(output.has_errors());
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.program.to_string(), "var x = 1;");
}

#[test]
fn test_multiple_independent_errors() {
    let output = parse("var = 1\nvar y 2\nvar z = 3");
    assert_eq!(
        output.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec![
            "expected next token to be IDENT, got (=):<=> instead",
            "expected next token to be =, got (INT):<2> instead",
        ]
    );
    assert_eq!(output.program.to_string(), "var z = 3;");
}

#[test]
fn test_errors_inside_blocks_do_not_lose_the_block() {
    let output = parse("func f() {\n  var = 1\n  return 2\n}\nf()");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.program.statements.len(), 2);
    assert_eq!(
        output.program.statements[0].to_string(),
        "func f() { return 2; }"
    );
    assert!(matches!(output.program.statements[1], Stmt::Expression(_)));
}

#[test]
fn test_unterminated_block() {
    assert_eq!(
        error_messages("if x { 1"),
        vec!["expected next token to be }, got (EOF):<> instead"]
    );
}

#[test]
fn test_dangling_operator() {
    assert_eq!(
        error_messages("1 +"),
        vec!["no prefix parse function for EOF found"]
    );
}

#[test]
fn test_bad_parameter_list() {
    assert_eq!(
        error_messages("func f(a Int) { a }"),
        vec!["expected next token to be :, got (IDENT):<Int> instead"]
    );
}

fn nesting_message() -> String {
    format!("expression nested too deeply (limit is {MAX_NESTING_DEPTH} levels)")
}

#[test]
fn test_nesting_limit_prefix_and_grouping() {
    let negations = format!("{}1", "-".repeat(MAX_NESTING_DEPTH + 1));
    assert_eq!(error_messages(&negations), vec![nesting_message()]);

    let levels = MAX_NESTING_DEPTH * 2;
    let parens = format!("{}1{}", "(".repeat(levels), ")".repeat(levels));
    assert_eq!(error_messages(&parens), vec![nesting_message()]);
}

#[test]
fn test_nesting_limit_counts_operator_chains() {
    let chain = vec!["1"; MAX_NESTING_DEPTH * 2].join(" + ");
    assert_eq!(error_messages(&chain), vec![nesting_message()]);

    let calls = format!("f{}", "()".repeat(MAX_NESTING_DEPTH * 2));
    assert_eq!(error_messages(&calls), vec![nesting_message()]);
}

#[test]
fn test_nesting_limit_skips_rejected_block() {
    let levels = MAX_NESTING_DEPTH * 2;
    let functions = format!(
        "{}1{}\nvar after = 2",
        "func f() { ".repeat(levels),
        " }".repeat(levels)
    );
    let output = parse(&functions);
    assert_eq!(
        output.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec![nesting_message()]
    );
    assert_eq!(output.program.statements.len(), 2);
    assert_eq!(output.program.statements[1].to_string(), "var after = 2;");

    let ifs = format!("{}1{}", "if (true) { ".repeat(levels), " }".repeat(levels));
    assert_eq!(error_messages(&ifs), vec![nesting_message()]);
}

#[test]
fn test_nesting_below_limit_parses() {
    let negations = format!("{}1", "-".repeat(MAX_NESTING_DEPTH / 2));
    assert!(error_messages(&negations).is_empty());

    let chain = vec!["1"; MAX_NESTING_DEPTH / 2].join(" + ");
    assert!(error_messages(&chain).is_empty());
}
