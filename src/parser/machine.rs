//! Per-file line state machine.
//!
//! [`FileParser::step`] takes the current [`State`] and one logical line and
//! returns the next state. Everything the line produces (comment text,
//! pending options, section changes, finished records) lands in the parser
//! context. A structural error ends the file with an `Err` instead of a
//! terminal state.

use super::comment::{self, CommentLine};
use super::conditions::ConditionStack;
use super::define;
use super::lines::LogicalLine;
use super::Extractor;
use crate::error::{Error, Result};
use crate::model::{Define, Options};
use tracing::{debug, trace};

/// Only the option with this name receives the board list.
const MOTHERBOARD: &str = "MOTHERBOARD";

/// A `//` whose byte offset on a definition line is at most this value opens
/// an aligned slash comment. Past it, the comment trails the definition.
const EOL_COMMENT_COLUMN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Normal,
    /// Inside `/* ... */`.
    BlockComment,
    /// After a definition with a trailing `//` comment that may continue.
    EolComment,
    /// Consecutive `//` lines documenting the next definition.
    SlashComment,
    /// Inside a block comment listing temperature sensor codes.
    GetSensors,
}

/// An options payload waiting for a definition.
#[derive(Debug)]
struct PendingOptions {
    literal: String,
    /// Found on a line's opening `//` comment; used by one definition only.
    once: bool,
}

pub(crate) struct FileParser<'a> {
    extractor: &'a mut Extractor,
    file: &'a str,
    section: String,
    conditions: ConditionStack,
    comments: Vec<String>,
    /// Comment block preceding a definition that has its own trailing comment.
    prev_comment: String,
    options: Option<PendingOptions>,
    sensors: Vec<String>,
    /// Definition still collecting trailing comment lines.
    pending: Option<Define>,
}

impl<'a> FileParser<'a> {
    pub(crate) fn new(extractor: &'a mut Extractor, file: &'a str) -> Self {
        Self {
            extractor,
            file,
            section: "none".to_string(),
            conditions: ConditionStack::default(),
            comments: Vec::new(),
            prev_comment: String::new(),
            options: None,
            sensors: Vec::new(),
            pending: None,
        }
    }

    pub(crate) fn step(&mut self, state: State, line: &LogicalLine) -> Result<State> {
        let text = line.text.as_str();
        let is_define = define::is_define(text);
        let continues_comment = !is_define && text.starts_with("//");

        let state = match state {
            State::EolComment if continues_comment => {
                self.comments.push(text[2..].trim().to_string());
                return Ok(State::EolComment);
            }
            State::EolComment => {
                self.flush_eol_comment();
                State::Normal
            }
            State::SlashComment if continues_comment => {
                self.absorb(text[2..].trim(), false);
                return Ok(State::SlashComment);
            }
            State::SlashComment => State::Normal,
            other => other,
        };

        match state {
            State::BlockComment | State::GetSensors => Ok(self.block_line(state, text)),
            _ => self.normal_line(text, line, is_define),
        }
    }

    /// End of input: a trailing comment still being collected is applied.
    pub(crate) fn finish(mut self, state: State) {
        if state == State::EolComment {
            self.flush_eol_comment();
        }
        if let Some(record) = self.pending.take() {
            self.emit(record);
        }
    }

    fn block_line(&mut self, state: State, text: &str) -> State {
        let (body, closed) = match text.find("*/") {
            Some(end) => (text[..end].trim(), true),
            None => (text, false),
        };
        let body = comment::strip_star(body);

        let next = match state {
            State::GetSensors => {
                if let Some(entry) = comment::sensor_entry(body) {
                    self.sensors.push(entry);
                }
                State::GetSensors
            }
            _ if closed && body.is_empty() => State::BlockComment,
            _ if comment::is_sensor_heading(body) => {
                self.absorb("Temperature Sensors", false);
                self.sensors.clear();
                State::GetSensors
            }
            _ => {
                self.absorb(body, false);
                State::BlockComment
            }
        };

        if !closed {
            return next;
        }
        if next == State::GetSensors {
            self.options = Some(PendingOptions {
                literal: format!("[ {} ]", self.sensors.join(", ")),
                once: false,
            });
            self.sensors.clear();
        }
        State::Normal
    }

    fn normal_line(&mut self, text: &str, line: &LogicalLine, is_define: bool) -> Result<State> {
        let skip = if define::is_commented_define(text) { 2 } else { 0 };
        let block = text.find("/*");
        let slash = text[skip..].find("//").map(|p| p + skip);

        let mut state = State::Normal;
        let mut code = text;
        let mut magic_here = false;

        match (block, slash) {
            (Some(b), s) if s.map_or(true, |s| b < s) => {
                self.comments.clear();
                code = text[..b].trim();
                // A payload beside code belongs to that line only
                let once = !code.is_empty();
                let rest = &text[b + 2..];
                let body = match rest.find("*/") {
                    Some(end) => rest[..end].trim(),
                    None => {
                        state = State::BlockComment;
                        rest.trim()
                    }
                };
                let body = comment::strip_star(body);
                if !body.is_empty() {
                    magic_here = self.absorb(body, once);
                }
            }
            (_, Some(s)) => {
                if is_define && s > EOL_COMMENT_COLUMN {
                    self.prev_comment = self.comments.join("\n");
                    state = State::EolComment;
                } else {
                    state = State::SlashComment;
                }
                self.comments.clear();
                code = text[..s].trim();
                let body = text[s + 2..].trim();
                if !body.is_empty() {
                    magic_here = self.absorb(body, true);
                }
            }
            _ => {}
        }

        if code.is_empty() {
            if !magic_here {
                self.options = None;
            }
            return Ok(state);
        }

        let is_directive = self
            .conditions
            .apply(code)
            .map_err(|_| Error::Unbalanced {
                file: self.file.to_string(),
                line: line.end,
            })?;

        if !is_directive {
            if let Some(def) = define::match_define(code) {
                self.add_define(&def, line, state);
            }
        }

        Ok(state)
    }

    /// Add one comment line to the buffer, or apply it as a magic payload or
    /// section marker. Returns whether it carried an options payload.
    fn absorb(&mut self, text: &str, once: bool) -> bool {
        match comment::classify(text) {
            CommentLine::Magic { options, rest } => {
                self.options = Some(PendingOptions {
                    literal: options.to_string(),
                    once,
                });
                if let Some(rest) = rest {
                    self.comments.push(rest.to_string());
                }
                true
            }
            CommentLine::Section(label) => {
                debug!(file = self.file, section = label, "section");
                self.section = label.to_string();
                false
            }
            CommentLine::Rule => false,
            CommentLine::Text => {
                self.comments.push(text.to_string());
                false
            }
        }
    }

    fn add_define(&mut self, def: &define::DefineLine<'_>, line: &LogicalLine, state: State) {
        let mut record = Define {
            section: self.section.clone(),
            name: def.name.to_string(),
            enabled: def.enabled,
            line: line.start,
            sid: self.extractor.next_sid(),
            value: define::infer(def.value),
            requires: self.conditions.requires(),
            comment: None,
            notes: None,
            units: None,
            options: None,
        };

        if !self.comments.is_empty() {
            let full = self.comments.join("\n");
            let full = full.trim();
            record.units = comment::units(full);
            // A trailing comment is applied when its last line has been read
            if state != State::EolComment {
                record.comment = Some(full.to_string());
                self.comments.clear();
            }
        }

        if record.comment.as_deref().map_or(true, str::is_empty) && !self.prev_comment.is_empty() {
            record.comment = Some(std::mem::take(&mut self.prev_comment));
        }
        if record.comment.as_deref() == Some("") {
            record.comment = None;
        }

        let boards = self.extractor.boards();
        let board_list = (record.name == MOTHERBOARD && !boards.is_empty()).then(|| boards.to_vec());
        if let Some(pending) = self.options.take() {
            if board_list.is_none() {
                record.options = Some(Options::Literal(pending.literal.clone()));
            }
            if !pending.once {
                self.options = Some(pending);
            }
        }
        if let Some(list) = board_list {
            record.options = Some(Options::List(list));
        }

        trace!(
            file = self.file,
            name = %record.name,
            sid = record.sid,
            line = record.line,
            "define"
        );

        if state == State::EolComment {
            self.pending = Some(record);
        } else {
            self.emit(record);
        }
    }

    /// Move the collected trailing comment onto the pending record and emit
    /// it. Text goes to `notes` when the record already has a comment.
    fn flush_eol_comment(&mut self) {
        let text = self.comments.join("\n");
        self.comments.clear();

        if let Some(mut record) = self.pending.take() {
            if !text.is_empty() {
                if record.comment.is_some() {
                    record.notes = Some(text);
                } else {
                    record.comment = Some(text);
                }
            }
            self.emit(record);
        }
    }

    fn emit(&mut self, record: Define) {
        let section = record.section.clone();
        let name = record.name.clone();
        self.extractor.builder.insert(self.file, &section, &name, record);
    }
}
