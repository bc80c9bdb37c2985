//! Joins backslash-continued physical lines into logical lines.

use std::str::Lines;

/// One logical line with the physical line span it came from (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Iterator over the logical lines of a file.
///
/// Physical lines are trimmed. A trailing `\` drops the backslash and appends
/// the next physical line after a single space. A continuation still open at
/// end of input is dropped.
pub struct LineAssembler<'a> {
    lines: Lines<'a>,
    number: usize,
}

impl<'a> LineAssembler<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines(),
            number: 0,
        }
    }
}

impl Iterator for LineAssembler<'_> {
    type Item = LogicalLine;

    fn next(&mut self) -> Option<LogicalLine> {
        let mut text = String::new();
        let mut start = None;

        for raw in self.lines.by_ref() {
            self.number += 1;
            let physical = raw.trim();
            if start.is_none() {
                start = Some(self.number);
                text.push_str(physical);
            } else {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(physical);
            }

            match text.strip_suffix('\\') {
                Some(head) => {
                    text = head.trim().to_string();
                }
                None => {
                    return Some(LogicalLine {
                        text,
                        start: start.unwrap_or(self.number),
                        end: self.number,
                    });
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<LogicalLine> {
        LineAssembler::new(input).collect()
    }

    #[test]
    fn plain_lines_are_trimmed() {
        let lines = collect("  a  \n\tb\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "a");
        assert_eq!((lines[1].start, lines[1].end), (2, 2));
    }

    #[test]
    fn continuation_joins_with_single_space() {
        let lines = collect("#define FOO 1, \\\n   2, \\\n 3\n#define BAR\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "#define FOO 1, 2, 3");
        assert_eq!((lines[0].start, lines[0].end), (1, 3));
        assert_eq!(lines[1].text, "#define BAR");
        assert_eq!(lines[1].start, 4);
    }

    #[test]
    fn empty_continued_line_adds_no_leading_space() {
        let lines = collect("\\\nfoo\n");
        assert_eq!(lines[0].text, "foo");
    }

    #[test]
    fn unterminated_continuation_is_dropped() {
        let lines = collect("a\nb \\\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "a");
    }

    #[test]
    fn crlf_is_handled() {
        let lines = collect("a \\\r\nb\r\n");
        assert_eq!(lines[0].text, "a b");
    }
}
