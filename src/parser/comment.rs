//! Comment classification helpers for the line state machine.

use regex::Regex;
use std::sync::LazyLock;

const BANNER: &str = "========";

static RE_SECTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^@section\s*(.+)").unwrap());

static RE_LEADING_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\* ?").unwrap());

static RE_SENSOR_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^temperature sensors.*:").unwrap());

static RE_SENSOR_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-?\d+)\s*:\s*(.+)$").unwrap());

static RE_UNITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\(([^)]+)\)").unwrap());

/// What a single line of comment text contributes.
#[derive(Debug, PartialEq, Eq)]
pub enum CommentLine<'a> {
    /// `: [..]`, `: {..}` or `: literal`: an options payload. Text after the
    /// closing bracket is still documentation.
    Magic {
        options: &'a str,
        rest: Option<&'a str>,
    },
    /// `@section label`
    Section(&'a str),
    /// A `=` separator or a `======== Banner ========` heading.
    Rule,
    Text,
}

pub fn classify(comment: &str) -> CommentLine<'_> {
    let sc = comment.trim();

    if let Some(body) = sc.strip_prefix(':') {
        let payload = body.trim_start();
        let closer = match payload.chars().next() {
            Some('{') => Some('}'),
            Some('[') => Some(']'),
            _ => None,
        };
        return match closer.and_then(|c| body.rfind(c)) {
            Some(end) => {
                let rest = body[end + 1..].trim();
                CommentLine::Magic {
                    options: body[..=end].trim(),
                    rest: (!rest.is_empty()).then_some(rest),
                }
            }
            None => CommentLine::Magic {
                options: payload.trim_end(),
                rest: None,
            },
        };
    }

    if let Some(caps) = RE_SECTION.captures(sc) {
        if let Some(label) = caps.get(1) {
            return CommentLine::Section(label.as_str());
        }
    }

    if sc.starts_with(BANNER) || (!sc.is_empty() && sc.chars().all(|c| c == '=')) {
        return CommentLine::Rule;
    }

    CommentLine::Text
}

/// Remove the `* ` that prefixes lines inside a block comment.
pub fn strip_star(line: &str) -> &str {
    match RE_LEADING_STAR.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

pub fn is_sensor_heading(line: &str) -> bool {
    RE_SENSOR_HEADING.is_match(line)
}

/// Parse `<code> : <description>` into an options-table entry.
pub fn sensor_entry(line: &str) -> Option<String> {
    let caps = RE_SENSOR_ENTRY.captures(line)?;
    let code = &caps[1];
    let description = caps[2].replace('\'', "''");
    Some(format!("{code}:'{code} - {description}'"))
}

/// Units from a leading parenthesized token, e.g. `(mm/s) Max speed`.
pub fn units(comment: &str) -> Option<String> {
    let caps = RE_UNITS.captures(comment)?;
    let units = match &caps[1] {
        "s" | "sec" => "seconds",
        other => other,
    };
    Some(units.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_bracket_list() {
        assert_eq!(
            classify(": [0, 1, 2]"),
            CommentLine::Magic {
                options: "[0, 1, 2]",
                rest: None
            }
        );
    }

    #[test]
    fn magic_object_with_trailing_text() {
        assert_eq!(
            classify(":{ 0:'Off', 1:'On' } Toggle it"),
            CommentLine::Magic {
                options: "{ 0:'Off', 1:'On' }",
                rest: Some("Toggle it")
            }
        );
    }

    #[test]
    fn magic_uses_last_closer() {
        let CommentLine::Magic { options, .. } = classify(":['a', ['b']] x") else {
            panic!("expected magic");
        };
        assert_eq!(options, "['a', ['b']]");
    }

    #[test]
    fn magic_literal_without_brackets() {
        assert_eq!(
            classify(": 0.5 ... 2.0"),
            CommentLine::Magic {
                options: "0.5 ... 2.0",
                rest: None
            }
        );
    }

    #[test]
    fn magic_unclosed_bracket_is_taken_whole() {
        assert_eq!(
            classify(":[1, 2"),
            CommentLine::Magic {
                options: "[1, 2",
                rest: None
            }
        );
    }

    #[test]
    fn section_marker() {
        assert_eq!(classify("@section  motion"), CommentLine::Section("motion"));
        assert_eq!(classify("@section"), CommentLine::Text);
    }

    #[test]
    fn rule_and_text() {
        assert_eq!(classify("=============="), CommentLine::Rule);
        assert_eq!(classify("=="), CommentLine::Rule);
        assert_eq!(classify("======== Getting Started ========"), CommentLine::Rule);
        assert_eq!(classify("== Heading =="), CommentLine::Text);
        assert_eq!(classify(""), CommentLine::Text);
    }

    #[test]
    fn star_prefix() {
        assert_eq!(strip_star("* hello"), "hello");
        assert_eq!(strip_star("*   indented"), "  indented");
        assert_eq!(strip_star("*"), "");
        assert_eq!(strip_star("plain"), "plain");
    }

    #[test]
    fn sensor_lines() {
        assert!(is_sensor_heading("Temperature sensors available:"));
        assert!(is_sensor_heading("TEMPERATURE SENSORS:"));
        assert!(!is_sensor_heading("Other temperature sensors:"));
        assert_eq!(
            sensor_entry("   -2 : thermocouple with MAX6675"),
            Some("-2:'-2 - thermocouple with MAX6675'".to_string())
        );
        assert_eq!(
            sensor_entry("1 : 100k thermistor (4.7k pullup) 'EPCOS'"),
            Some("1:'1 - 100k thermistor (4.7k pullup) ''EPCOS'''".to_string())
        );
        assert_eq!(sensor_entry("Use this for boards"), None);
    }

    #[test]
    fn units_prefix() {
        assert_eq!(units("(mm) Distance").as_deref(), Some("mm"));
        assert_eq!(units("(s) Timeout").as_deref(), Some("seconds"));
        assert_eq!(units("(sec)").as_deref(), Some("seconds"));
        assert_eq!(units("Distance (mm)"), None);
    }
}
