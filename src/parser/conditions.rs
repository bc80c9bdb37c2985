//! Conditional-compilation stack.
//!
//! The stack holds one frame per open `#if` block. A frame lists the
//! conditions ANDed for the current branch: `#elif` and `#else` negate the
//! frame's last condition, and `#elif` appends its own.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static RE_ATOM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]*(\([^)]+\))?$").unwrap());

static RE_COMPARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+ == \d+$").unwrap());

/// `#elif`, `#else` or `#endif` reached with no open `#if`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackUnderflow;

#[derive(Debug, Default)]
pub struct ConditionStack {
    frames: Vec<Vec<String>>,
}

impl ConditionStack {
    /// Apply `code` if it is a conditional directive. Returns whether it was one.
    pub fn apply(&mut self, code: &str) -> Result<bool, StackUnderflow> {
        let Some(head) = code.split_whitespace().next() else {
            return Ok(false);
        };

        match head {
            "#elif" | "#else" | "#endif" => {
                let mut frame = self.frames.pop().ok_or(StackUnderflow)?;
                if head != "#endif" {
                    if let Some(last) = frame.last_mut() {
                        *last = format!("!{last}");
                    }
                    if head == "#elif" {
                        frame.push(atomize(code["#elif".len()..].trim()));
                    }
                    self.frames.push(frame);
                }
            }
            "#if" => self.push(atomize(code["#if".len()..].trim())),
            "#ifdef" => self.push(format!("defined({})", code["#ifdef".len()..].trim())),
            "#ifndef" => self.push(format!("!defined({})", code["#ifndef".len()..].trim())),
            _ => return Ok(false),
        }

        Ok(true)
    }

    fn push(&mut self, condition: String) {
        debug!(depth = self.frames.len() + 1, %condition, "open conditional block");
        self.frames.push(vec![condition]);
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        self.frames.len()
    }

    /// AND of every condition in every open frame, or `None` at top level.
    pub fn requires(&self) -> Option<String> {
        if self.frames.is_empty() {
            return None;
        }
        let all: Vec<&str> = self.frames.iter().flatten().map(String::as_str).collect();
        Some(format!("({})", all.join(") && (")))
    }
}

/// Parenthesize an expression unless it is already atomic: a bare
/// identifier, a single call like `ENABLED(FOO)`, or `NAME == 3`.
pub fn atomize(expr: &str) -> String {
    if expr.is_empty() || RE_ATOM.is_match(expr) || RE_COMPARE.is_match(expr) {
        expr.to_string()
    } else {
        format!("({expr})")
    }
}
