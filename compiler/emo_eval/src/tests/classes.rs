use pretty_assertions::assert_eq;

use super::{run_display, run_error};
use crate::EvalErrorKind;

const POINT: &str = "\
class Point {
    public var x: Int
    public var y: Int
    var secret: Int

    func sum() -> Int { return self.x + self.y }
    func shift(dx: Int) { self.x = self.x + dx }
    func reveal() -> Int { return self.secret }
    private func hidden() -> Int { return 42 }
    func callHidden() -> Int { return self.hidden() }
}
";

fn with_point(source: &str) -> String {
    format!("{POINT}{source}")
}

fn private_member(member: &str) -> EvalErrorKind {
    EvalErrorKind::PrivateMember {
        member: member.to_string(),
        class: "Point".to_string(),
    }
}

#[test]
fn test_class_declaration_binds_its_name() {
    assert_eq!(run_display(&with_point("Point")), "class Point {}");
    assert_eq!(
        run_display(&with_point("new(Point)")),
        "<object:Point>(class Point {})"
    );
}

#[test]
fn test_new_initialises_fields() {
    assert_eq!(
        run_display(&with_point(
            "var p = new(Point, {\"x\": 1, \"y\": 2})\n[p.x, p.y, p.sum()]"
        )),
        "[1, 2, 3]"
    );
}

#[test]
fn test_uninitialised_fields_are_null() {
    assert_eq!(run_display(&with_point("var p = new(Point)\np.x")), "null");
    assert_eq!(
        run_display(&with_point("var p = new(Point, {\"x\": 1})\np.y")),
        "null"
    );
}

#[test]
fn test_methods_mutate_their_own_instance() {
    let source = "\
var a = new(Point, {\"x\": 1, \"y\": 0})
var b = new(Point, {\"x\": 100, \"y\": 0})
a.shift(5)
a.shift(5)
b.shift(1)
[a.x, b.x]";
    assert_eq!(run_display(&with_point(source)), "[11, 101]");
}

#[test]
fn test_public_field_assignment() {
    assert_eq!(
        run_display(&with_point("var p = new(Point)\np.y = 9")),
        "9"
    );
    assert_eq!(
        run_display(&with_point("var p = new(Point)\np.y = 9\np.y = p.y + 1\np.y")),
        "10"
    );
}

#[test]
fn test_bound_method_keeps_its_instance() {
    let source = "\
var p = new(Point, {\"x\": 1, \"y\": 2})
var total = p.sum
p.x = 10
total()";
    assert_eq!(run_display(&with_point(source)), "12");
}

#[test]
fn test_private_members_are_reachable_through_self() {
    assert_eq!(
        run_display(&with_point("new(Point, {\"secret\": 7}).reveal()")),
        "7"
    );
    assert_eq!(run_display(&with_point("new(Point).callHidden()")), "42");
}

#[test]
fn test_private_members_are_hidden_from_outside() {
    assert_eq!(
        run_error(&with_point("new(Point).secret")),
        private_member("secret")
    );
    assert_eq!(
        run_error(&with_point("var p = new(Point)\np.secret = 1")),
        private_member("secret")
    );
    assert_eq!(
        run_error(&with_point("new(Point).hidden()")),
        private_member("hidden")
    );
}

#[test]
fn test_methods_cannot_be_assigned() {
    assert_eq!(
        run_error(&with_point("var p = new(Point)\np.sum = 1")),
        EvalErrorKind::MethodAssignment {
            member: "sum".to_string(),
            class: "Point".to_string()
        }
    );
}

#[test]
fn test_undefined_members() {
    let undefined = EvalErrorKind::UndefinedMember {
        member: "z".to_string(),
        class: "Point".to_string(),
    };
    assert_eq!(run_error(&with_point("new(Point).z")), undefined);
    assert_eq!(
        run_error(&with_point("var p = new(Point)\np.z = 1")),
        undefined
    );
}

#[test]
fn test_new_rejects_bad_initialisers() {
    assert_eq!(
        run_error(&with_point("new(Point, {\"z\": 1})")),
        EvalErrorKind::UnknownField {
            field: "z".to_string(),
            class: "Point".to_string()
        }
    );
    assert_eq!(
        run_error(&with_point("new(Point, 5)")),
        EvalErrorKind::InvalidInitializer {
            type_name: "INTEGER"
        }
    );
    assert_eq!(
        run_error(&with_point("new(Point, {1: 2})")),
        EvalErrorKind::InvalidFieldKey {
            type_name: "INTEGER"
        }
    );
}

#[test]
fn test_new_requires_a_class() {
    assert_eq!(
        run_error("var NotClass = 1\nnew(NotClass)"),
        EvalErrorKind::NotAClass {
            type_name: "INTEGER"
        }
    );
    assert_eq!(
        run_error("new(Missing)"),
        EvalErrorKind::UndefinedVariable {
            name: "Missing".to_string()
        }
    );
}

#[test]
fn test_member_access_requires_an_instance() {
    assert_eq!(
        run_error("var n = 5\nn.x"),
        EvalErrorKind::NotAnInstance {
            type_name: "INTEGER"
        }
    );
}

#[test]
fn test_methods_see_fields_and_the_declaring_scope() {
    let source = "\
var greeting = \"hi\"
class Box {
    public var v: Int
    func get() { return v }
    func greet() { return greeting }
}
var box = new(Box, {\"v\": 3})
[box.get(), box.greet()]";
    assert_eq!(run_display(source), r#"[3, "hi"]"#);
}

#[test]
fn test_instances_compare_by_identity() {
    assert_eq!(
        run_display(&with_point("var p = new(Point)\n[p == p, p == new(Point)]")),
        "[true, false]"
    );
}
