use std::collections::BTreeMap;
use std::time::Duration;

use condcfg::{Config, Value};
use pretty_assertions::assert_eq;

#[test]
fn test_exists() {
    assert!(!Value::Null.exists());
    assert!(Value::Int(0).exists());
    assert!(!Value::from(None::<i64>).exists());
}

#[test]
fn test_to_pattern() {
    let v = Value::from("N>1");
    assert!(v.pattern().validate_int(2));
    assert!(!Value::Int(3).pattern().validate_int(2));
}

#[test]
fn test_to_map() {
    let v = Value::from(BTreeMap::from([("foo".to_string(), Value::from("bar"))]));
    let m = v.map();
    assert_eq!(m.len(), 1);
    assert_eq!(m["foo"].string(), "bar");
    assert!(Value::from("x").map().is_empty());
}

#[test]
fn test_to_list() {
    let v = Value::from(vec!["bar", "baz"]);
    let l = v.list();
    assert_eq!(l.len(), 2);
    assert_eq!(l[0].string(), "bar");
    assert_eq!(l[1].string(), "baz");
    assert!(Value::Int(1).list().is_empty());
}

#[test]
fn test_to_config() {
    let v = Value::from(Config::from_yaml("a: 1\nb: two").unwrap());
    let c = v.config();
    assert_eq!(c.raw("a"), Some(&Value::Int(1)));
    assert_eq!(c.raw("b"), Some(&Value::from("two")));
    assert!(Value::Null.config().kv().is_empty());
}

#[test]
fn test_to_string() {
    let v = Value::from("wow");
    assert_eq!(v.string(), "wow");
    assert_eq!(v.string_or("xx"), "wow");
    assert_eq!(v.string_and("^w"), Some("wow".to_string()));
    assert_eq!(v.string_and("^o"), None);
    assert_eq!(v.string_and_or("^o", "dflt"), "dflt");

    let v = Value::Int(1);
    assert_eq!(v.string(), "");
    assert_eq!(v.string_or("bad"), "bad");
}

#[test]
fn test_to_bool() {
    assert!(Value::Bool(true).bool());
    assert!(Value::Bool(true).bool_or(false));
    assert!(!Value::Bool(false).bool());
    assert!(!Value::Bool(false).bool_or(true));
    assert!(!Value::from("").bool());
    assert!(Value::from("").bool_or(true));
}

#[test]
fn test_to_int() {
    let v = Value::Int(1);
    assert_eq!(v.int(), 1);
    assert_eq!(v.int_or(2), 1);
    assert_eq!(v.int_and("N>0"), Some(1));

    let v = Value::Float(1.0);
    assert_eq!(v.int(), 1);
    assert_eq!(v.int_or(2), 1);
    assert_eq!(v.int_and("N<0"), None);
    assert_eq!(v.int_and_or("N<0", 9), 9);

    let v = Value::from("");
    assert_eq!(v.int(), 0);
    assert_eq!(v.int_or(1), 1);

    assert_eq!(Value::Null.int_and("N==0"), None);
}

#[test]
fn test_to_float() {
    let v = Value::Float(3.0);
    assert_eq!(v.float(), 3.0);
    assert_eq!(v.float_or(4.0), 3.0);
    assert_eq!(v.float_and("N>=3.0"), Some(3.0));
    assert_eq!(v.float_and_or("N>3.0", 0.5), 0.5);

    let v = Value::Int(3);
    assert_eq!(v.float(), 3.0);
    assert_eq!(v.float_or(4.0), 3.0);

    let v = Value::from("");
    assert_eq!(v.float(), 0.0);
    assert_eq!(v.float_or(0.5), 0.5);
}

#[test]
fn test_to_duration() {
    let v = Value::Int(23);
    assert_eq!(v.duration(), Duration::from_nanos(23));
    assert_eq!(v.duration_or(Duration::from_nanos(32)), Duration::from_nanos(23));
    assert_eq!(v.duration_and("N>20"), Some(Duration::from_nanos(23)));
    assert_eq!(
        v.duration_and_or("N>30", Duration::from_nanos(32)),
        Duration::from_nanos(32)
    );

    let v = Value::from("");
    assert_eq!(v.duration(), Duration::ZERO);
    assert_eq!(v.duration_or(Duration::from_nanos(32)), Duration::from_nanos(32));
}

#[test]
fn test_display() {
    assert_eq!(Value::Int(12345).to_string(), "12345");
    assert_eq!(Value::Null.to_string(), "null");
    let json: serde_json::Value = serde_json::from_str(r#"{"b": [1, 2.5], "a": true}"#).unwrap();
    assert_eq!(Value::from(json).to_string(), "{a: true, b: [1, 2.5]}");
}
