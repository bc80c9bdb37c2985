//! `#define` matching and value type inference.

use crate::model::Value;
use regex::Regex;
use std::sync::LazyLock;

/// `[//] #define NAME [VALUE] [// comment]`
static RE_DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(//)?\s*#define\s+([A-Za-z0-9_]+)\s*(.*?)\s*(//.+)?$").unwrap()
});

static RE_COMMENTED_DEFINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//\s*#define").unwrap());

const FLT: &str = r"[-+]?\s*(?:\d+\.|\d*\.\d+)(?:[eE][-+]?\d+)?[fF]?";

static RE_INT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-+]?\s*\d+$").unwrap());

static RE_INTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\s*\d+(?:\s*,\s*[-+]?\s*\d+)+$").unwrap());

static RE_FLOATS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{FLT}(?:\s*,\s*{FLT})+$")).unwrap());

static RE_FLOAT: LazyLock<Regex> = LazyLock::new(|| Regex::new(&format!(r"^{FLT}$")).unwrap());

static RE_ENUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{3,}$").unwrap());

static RE_INT_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\{\s*[-+]?\s*\d+(?:\s*,\s*[-+]?\s*\d+)*\s*\}$").unwrap()
});

static RE_FLOAT_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^\{{\s*{FLT}(?:\s*,\s*{FLT})*\s*\}}$")).unwrap());

/// The parts of a matched definition line.
#[derive(Debug, PartialEq, Eq)]
pub struct DefineLine<'a> {
    pub enabled: bool,
    pub name: &'a str,
    /// Value text, trimmed; empty for a switch.
    pub value: &'a str,
}

pub fn match_define(line: &str) -> Option<DefineLine<'_>> {
    let caps = RE_DEFINE.captures(line)?;
    Some(DefineLine {
        enabled: caps.get(1).is_none(),
        name: caps.get(2)?.as_str(),
        value: caps.get(3).map_or("", |m| m.as_str()),
    })
}

pub fn is_define(line: &str) -> bool {
    RE_DEFINE.is_match(line)
}

/// A `//#define` line, whose leading slashes must not open a comment.
pub fn is_commented_define(line: &str) -> bool {
    RE_COMMENTED_DEFINE.is_match(line)
}

/// Infer a typed value from literal text. The first matching shape wins.
/// Returns `None` for an empty value (a switch).
pub fn infer(text: &str) -> Option<Value> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let value = if RE_INT.is_match(text) {
        let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        digits
            .parse()
            .map_or_else(|_| Value::BigInt(text.to_string()), Value::Int)
    } else if RE_INTS.is_match(text) {
        Value::Ints(text.to_string())
    } else if RE_FLOATS.is_match(text) {
        Value::Floats(text.replace(['f', 'F'], ""))
    } else if RE_FLOAT.is_match(text) {
        let digits: String = text
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, 'f' | 'F'))
            .collect();
        digits
            .parse()
            .map_or_else(|_| Value::Raw(text.to_string()), Value::Float)
    } else if text.starts_with('"') {
        Value::String(text.to_string())
    } else if text.starts_with('\'') {
        Value::Char(text.to_string())
    } else if text == "true" || text == "false" {
        Value::Bool(text == "true")
    } else if text == "HIGH" || text == "LOW" {
        Value::State(text.to_string())
    } else if RE_ENUM.is_match(text) {
        Value::Enum(text.to_string())
    } else if RE_INT_ARRAY.is_match(text) {
        Value::IntArray(text.to_string())
    } else if RE_FLOAT_ARRAY.is_match(text) {
        Value::FloatArray(text.to_string())
    } else if text.starts_with('{') {
        Value::Array(text.to_string())
    } else {
        Value::Raw(text.to_string())
    };

    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValueType;

    fn kind(text: &str) -> Option<ValueType> {
        infer(text).and_then(|v| v.value_type())
    }

    #[test]
    fn matches_enabled_define() {
        let d = match_define("#define FOO 123").unwrap();
        assert!(d.enabled);
        assert_eq!(d.name, "FOO");
        assert_eq!(d.value, "123");
    }

    #[test]
    fn matches_disabled_define() {
        let d = match_define("//#define BAR").unwrap();
        assert!(!d.enabled);
        assert_eq!(d.name, "BAR");
        assert_eq!(d.value, "");

        let d = match_define("// #define BAZ { 1, 2 }").unwrap();
        assert!(!d.enabled);
        assert_eq!(d.value, "{ 1, 2 }");
    }

    #[test]
    fn trailing_comment_is_not_value() {
        let d = match_define("#define FOO 10   // ten").unwrap();
        assert_eq!(d.value, "10");
    }

    #[test]
    fn non_defines() {
        assert!(match_define("#include \"x.h\"").is_none());
        assert!(match_define("// just a comment").is_none());
        assert!(match_define("#undef FOO").is_none());
        assert!(is_commented_define("//  #define X"));
        assert!(!is_commented_define("#define X // y"));
    }

    #[test]
    fn scalar_types() {
        assert_eq!(infer(""), None);
        assert_eq!(infer("123"), Some(Value::Int(123)));
        assert_eq!(infer("- 5"), Some(Value::Int(-5)));
        assert_eq!(infer("1.5f"), Some(Value::Float(1.5)));
        assert_eq!(infer(".25"), Some(Value::Float(0.25)));
        assert_eq!(infer("2."), Some(Value::Float(2.0)));
        assert_eq!(infer("1.0e3"), Some(Value::Float(1000.0)));
        assert_eq!(infer("true"), Some(Value::Bool(true)));
        assert_eq!(infer("false"), Some(Value::Bool(false)));
        assert_eq!(infer("\"hi\""), Some(Value::String("\"hi\"".into())));
        assert_eq!(infer("'x'"), Some(Value::Char("'x'".into())));
        assert_eq!(infer("HIGH"), Some(Value::State("HIGH".into())));
        assert_eq!(infer("BOARD_RAMPS_14_EFB"), Some(Value::Enum("BOARD_RAMPS_14_EFB".into())));
    }

    #[test]
    fn list_types() {
        assert_eq!(infer("1, 2, 3"), Some(Value::Ints("1, 2, 3".into())));
        assert_eq!(infer("80.0f, 80, 400.5f"), Some(Value::Raw("80.0f, 80, 400.5f".into())));
        assert_eq!(infer("80.0f, 80.5, 4000.0"), Some(Value::Floats("80.0, 80.5, 4000.0".into())));
        assert_eq!(kind("{ 1, 2, 3 }"), Some(ValueType::IntArray));
        assert_eq!(kind("{ 1.5, -2.0f }"), Some(ValueType::FloatArray));
        assert_eq!(kind("{ 'a', \"b\" }"), Some(ValueType::Array));
    }

    #[test]
    fn short_or_odd_tokens_are_untyped() {
        assert_eq!(kind("AB"), None);
        assert_eq!(kind("(X_BED_SIZE / 2)"), None);
        assert!(infer("a + b").is_some());
    }

    #[test]
    fn wide_integer_keeps_text() {
        let v = infer("99999999999999999999").unwrap();
        assert_eq!(v, Value::BigInt("99999999999999999999".into()));
        assert_eq!(v.value_type(), Some(ValueType::Int));
    }
}
