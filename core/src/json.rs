//! Field readers for loosely typed request bodies.
//!
//! Absent keys, `null` and the falsy values the API historically rejected
//! (`0`, `""`) are all reported as missing.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntField {
    Missing,
    Invalid,
    Value(i64),
}

pub fn int_field(value: Option<&Value>) -> IntField {
    match value {
        None | Some(Value::Null) => IntField::Missing,
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => IntField::Missing,
            Some(v) => IntField::Value(v),
            None => IntField::Invalid,
        },
        Some(_) => IntField::Invalid,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextField<'a> {
    Missing,
    Invalid,
    Value(&'a str),
}

/// Blank strings count as missing.
pub fn text_field(value: Option<&Value>) -> TextField<'_> {
    match value {
        None | Some(Value::Null) => TextField::Missing,
        Some(Value::String(s)) if s.trim().is_empty() => TextField::Missing,
        Some(Value::String(s)) => TextField::Value(s),
        Some(_) => TextField::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn int_field_treats_zero_as_missing() {
        let body = json!({"a": 0, "b": 3, "c": "3", "d": 1.5, "e": null});
        assert_eq!(int_field(body.get("a")), IntField::Missing);
        assert_eq!(int_field(body.get("b")), IntField::Value(3));
        assert_eq!(int_field(body.get("c")), IntField::Invalid);
        assert_eq!(int_field(body.get("d")), IntField::Invalid);
        assert_eq!(int_field(body.get("e")), IntField::Missing);
        assert_eq!(int_field(body.get("zz")), IntField::Missing);
    }

    #[test]
    fn text_field_rejects_blank() {
        let body = json!({"a": "  ", "b": "Mix", "c": 4});
        assert_eq!(text_field(body.get("a")), TextField::Missing);
        assert_eq!(text_field(body.get("b")), TextField::Value("Mix"));
        assert_eq!(text_field(body.get("c")), TextField::Invalid);
    }
}
