use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;

fn array(values: Vec<Value>) -> Value {
    Value::Array(Rc::new(values))
}

fn hash(entries: Vec<(HashKey, Value)>) -> Value {
    let mut hash = HashValue::new();
    for (key, value) in entries {
        hash.insert(key, value);
    }
    Value::Hash(Rc::new(hash))
}

#[test]
fn test_scalar_display() {
    assert_eq!(Value::Integer(-42).to_string(), "-42");
    assert_eq!(Value::Boolean(true).to_string(), "true");
    assert_eq!(Value::string("hello").to_string(), "hello");
    assert_eq!(Value::Null.to_string(), "null");
}

#[test]
fn test_collections_quote_nested_strings() {
    let value = array(vec![Value::Integer(1), Value::string("x"), array(vec![])]);
    assert_eq!(value.to_string(), "[1, \"x\", []]");

    let value = hash(vec![
        (HashKey::Str(Rc::from("a")), Value::Integer(1)),
        (HashKey::Integer(2), Value::Boolean(true)),
        (HashKey::Boolean(false), Value::string("no")),
    ]);
    assert_eq!(value.to_string(), "{\"a\": 1, 2: true, false: \"no\"}");
}

#[test]
fn test_hash_overwrite_keeps_position() {
    let mut hash = HashValue::new();
    hash.insert(HashKey::Integer(1), Value::string("one"));
    hash.insert(HashKey::Integer(2), Value::string("two"));
    hash.insert(HashKey::Integer(1), Value::string("uno"));

    assert_eq!(hash.len(), 2);
    assert_eq!(hash.to_string(), "{1: \"uno\", 2: \"two\"}");
    assert!(hash.get(&HashKey::Integer(3)).is_none());
}

#[test]
fn test_hash_keys_only_from_scalars() {
    assert_eq!(
        HashKey::from_value(&Value::string("k")),
        Some(HashKey::Str(Rc::from("k")))
    );
    assert_eq!(HashKey::from_value(&Value::Boolean(true)), Some(HashKey::Boolean(true)));
    assert_eq!(HashKey::from_value(&Value::Null), None);
    assert_eq!(HashKey::from_value(&array(vec![])), None);
}

#[test]
fn test_truthiness() {
    assert!(!Value::Boolean(false).is_truthy());
    assert!(!Value::Null.is_truthy());
    assert!(Value::Integer(0).is_truthy());
    assert!(Value::string("").is_truthy());
    assert!(array(vec![]).is_truthy());
}

#[test]
fn test_equality() {
    assert!(Value::Integer(1).equals(&Value::Integer(1)));
    assert!(!Value::Integer(1).equals(&Value::string("1")));
    assert!(Value::Null.equals(&Value::Null));
    assert!(!Value::Null.equals(&Value::Boolean(false)));
    assert!(array(vec![Value::Integer(1), Value::Integer(2)]).equals(&array(vec![Value::Integer(1), Value::Integer(2)])));
    assert!(!array(vec![Value::Integer(1)]).equals(&array(vec![Value::Integer(1), Value::Integer(2)])));
    assert!(hash(vec![(HashKey::Integer(1), Value::Integer(1))])
        .equals(&hash(vec![(HashKey::Integer(1), Value::Integer(1))])));
}

#[test]
fn test_class_and_instance_display() {
    let class = Rc::new(ClassValue {
        name: "Point".to_string(),
        fields: Vec::new(),
        methods: Vec::new(),
        env: Environment::new(),
    });
    assert_eq!(Value::Class(Rc::clone(&class)).to_string(), "class Point {}");

    let instance = Value::Instance(Rc::new(InstanceValue {
        class,
        env: Environment::new(),
    }));
    assert_eq!(instance.to_string(), "<object:Point>(class Point {})");
    assert_eq!(instance.type_name(), "INSTANCE");
}

#[test]
fn test_error_display() {
    let error = Value::Error(crate::errors::division_by_zero());
    assert_eq!(error.to_string(), "ERROR: division by zero");
    assert!(error.is_error());
}
