use emo_ir::{ClassExpr, Expr, Stmt};
use pretty_assertions::assert_eq;

use super::{error_messages, parse_ok};
use crate::parse;

fn class_of(stmt: &Stmt) -> &ClassExpr {
    match stmt {
        Stmt::Expression(stmt) => match &stmt.expression {
            Expr::Class(class) => class,
            other => panic!("expected class expression, got {other}"),
        },
        other => panic!("expected expression statement, got {other}"),
    }
}

const POINT: &str = "\
class Point {
    public var x: Int
    var y: Int

    func sum() -> Int { return self.x + self.y }
    private func helper() { }
}
";

#[test]
fn test_class_members_and_visibility_defaults() {
    let program = parse_ok(POINT);
    let class = class_of(&program.statements[0]);

    assert_eq!(class.name.as_str(), "Point");
    assert_eq!(class.to_string(), "<class Point>");

    let fields: Vec<_> = class.fields.iter().map(|f| (f.name(), f.public)).collect();
    assert_eq!(fields, vec![("x", true), ("y", false)]);

    let methods: Vec<_> = class.methods.iter().map(|m| (m.name(), m.public)).collect();
    assert_eq!(methods, vec![("sum", true), ("helper", false)]);

    let sum = class.method("sum").unwrap();
    assert_eq!(
        sum.function.to_string(),
        "func sum() -> Int { return ((self.x) + (self.y)); }"
    );
    assert_eq!(class.field("y").unwrap().field.type_name.as_str(), "Int");
}

#[test]
fn test_modifier_may_stand_on_its_own_line() {
    let program = parse_ok("class A {\n    public\n    var x: Int\n}");
    let class = class_of(&program.statements[0]);
    assert!(class.field("x").unwrap().public);
}

#[test]
fn test_empty_class() {
    let program = parse_ok("class Empty {}");
    let class = class_of(&program.statements[0]);
    assert!(class.fields.is_empty());
    assert!(class.methods.is_empty());
}

#[test]
fn test_duplicate_members_keep_first_declaration() {
    let output = parse("class A {\n  var x: Int\n  var x: String\n  func x() { }\n}");
    assert_eq!(
        output.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec![
            "duplicate member `x` in class A",
            "duplicate member `x` in class A",
        ]
    );

    let class = class_of(&output.program.statements[0]);
    assert_eq!(class.fields.len(), 1);
    assert_eq!(class.fields[0].field.type_name.as_str(), "Int");
    assert!(class.methods.is_empty());
}

#[test]
fn test_unexpected_member_is_reported_and_skipped() {
    let output = parse("class A {\n  5\n  var x: Int\n}");
    assert_eq!(
        output.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["expected `var` or `func` in class A, got (INT):<5> instead"]
    );
    let class = class_of(&output.program.statements[0]);
    assert!(class.declares("x"));
}

#[test]
fn test_unterminated_class() {
    assert_eq!(
        error_messages("class A {\n  var x: Int\n"),
        vec!["expected next token to be }, got (EOF):<> instead"]
    );
}

#[test]
fn test_new_expression() {
    assert_eq!(parse_ok("new(Point)").to_string(), "new(Point)");
    assert_eq!(
        parse_ok("new(Point, {\"x\": 1, \"y\": 2})").to_string(),
        "new(Point, {x: 1, y: 2})"
    );
    assert_eq!(
        parse_ok("var p = new(Point, {\n  \"x\": 1\n})").to_string(),
        "var p = new(Point, {x: 1});"
    );
}

#[test]
fn test_new_requires_class_name() {
    assert_eq!(
        error_messages("new(1)"),
        vec!["expected next token to be IDENT, got (INT):<1> instead"]
    );
}
