//! Schema types shared by the parser, the grouping pass and the renderers.
//!
//! The schema is indexed as `schema[file][section][name]`, where each leaf is
//! a single [`Define`], a sequence of them for repeated names, or a wildcard
//! [`Group`] produced by [`crate::group::group_options`].

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Options within one `@section` of a file.
pub type Section = IndexMap<String, Entry>;

/// Sections of one configuration file, in source order.
pub type FileSchema = IndexMap<String, Section>;

/// Complete schema, keyed by file shorthand (`basic`, `advanced`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schema(pub(crate) IndexMap<String, FileSchema>);

impl Schema {
    pub fn file(&self, key: &str) -> Option<&FileSchema> {
        self.0.get(key)
    }

    pub fn files(&self) -> impl Iterator<Item = (&String, &FileSchema)> {
        self.0.iter()
    }

    pub fn get(&self, file: &str, section: &str, name: &str) -> Option<&Entry> {
        self.0.get(file)?.get(section)?.get(name)
    }

    pub(crate) fn section_mut(&mut self, file: &str, section: &str) -> Option<&mut Section> {
        self.0.get_mut(file)?.get_mut(section)
    }

    /// Every record in the schema, walking files, sections and groups in order.
    pub fn defines(&self) -> Vec<&Define> {
        let mut out = Vec::new();
        for sections in self.0.values() {
            for options in sections.values() {
                for entry in options.values() {
                    entry.collect_into(&mut out);
                }
            }
        }
        out
    }
}

/// One schema leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Define(Define),
    /// The same name defined more than once in a section, in encounter order.
    Repeated(Vec<Define>),
    Group(Group),
}

impl Entry {
    pub fn as_define(&self) -> Option<&Define> {
        match self {
            Entry::Define(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_repeated(&self) -> Option<&[Define]> {
        match self {
            Entry::Repeated(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Entry::Group(g) => Some(g),
            _ => None,
        }
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Define>) {
        match self {
            Entry::Define(d) => out.push(d),
            Entry::Repeated(v) => out.extend(v.iter()),
            Entry::Group(g) => {
                for entry in g.0.values() {
                    entry.collect_into(out);
                }
            }
        }
    }
}

/// Wildcard option: sibling entries keyed by the token the `*` replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Group(pub(crate) IndexMap<String, Entry>);

impl Group {
    pub fn get(&self, subkey: &str) -> Option<&Entry> {
        self.0.get(subkey)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

/// A single parsed `#define`.
#[derive(Debug, Clone, PartialEq)]
pub struct Define {
    /// Active `@section` label, `none` before the first marker.
    pub section: String,
    pub name: String,
    /// False when the definition is commented out (`//#define`).
    pub enabled: bool,
    /// Physical line where the logical definition starts.
    pub line: usize,
    /// Serial ID, unique and increasing across all parsed files.
    pub sid: u32,
    /// `None` for a bare switch.
    pub value: Option<Value>,
    /// AND of all enclosing conditional blocks.
    pub requires: Option<String>,
    pub comment: Option<String>,
    /// Trailing comment demoted here when `comment` was already set.
    pub notes: Option<String>,
    pub units: Option<String>,
    pub options: Option<Options>,
}

impl Define {
    /// Inferred type tag. `None` means the value has an unrecognized shape.
    pub fn value_type(&self) -> Option<ValueType> {
        match &self.value {
            None => Some(ValueType::Switch),
            Some(v) => v.value_type(),
        }
    }
}

impl Serialize for Define {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("section", &self.section)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("enabled", &self.enabled)?;
        map.serialize_entry("line", &self.line)?;
        map.serialize_entry("sid", &self.sid)?;
        if let Some(ref value) = self.value {
            map.serialize_entry("value", value)?;
        }
        if let Some(kind) = self.value_type() {
            map.serialize_entry("type", &kind)?;
        }
        if let Some(ref requires) = self.requires {
            map.serialize_entry("requires", requires)?;
        }
        if let Some(ref comment) = self.comment {
            map.serialize_entry("comment", comment)?;
        }
        if let Some(ref notes) = self.notes {
            map.serialize_entry("notes", notes)?;
        }
        if let Some(ref units) = self.units {
            map.serialize_entry("units", units)?;
        }
        if let Some(ref options) = self.options {
            map.serialize_entry("options", options)?;
        }
        map.end()
    }
}

/// A definition's value, typed by the shape of its literal.
///
/// Only booleans, integers and single floats are converted; every other
/// shape keeps the literal text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    /// Integer literal too wide for `i64`.
    BigInt(String),
    Ints(String),
    Float(f64),
    Floats(String),
    String(String),
    Char(String),
    Bool(bool),
    /// `HIGH` or `LOW`.
    State(String),
    Enum(String),
    IntArray(String),
    FloatArray(String),
    Array(String),
    /// Anything else; carries no type tag.
    Raw(String),
}

impl Value {
    pub fn value_type(&self) -> Option<ValueType> {
        let kind = match self {
            Value::Int(_) | Value::BigInt(_) => ValueType::Int,
            Value::Ints(_) => ValueType::Ints,
            Value::Float(_) => ValueType::Float,
            Value::Floats(_) => ValueType::Floats,
            Value::String(_) => ValueType::String,
            Value::Char(_) => ValueType::Char,
            Value::Bool(_) => ValueType::Bool,
            Value::State(_) => ValueType::State,
            Value::Enum(_) => ValueType::Enum,
            Value::IntArray(_) => ValueType::IntArray,
            Value::FloatArray(_) => ValueType::FloatArray,
            Value::Array(_) => ValueType::Array,
            Value::Raw(_) => return None,
        };
        Some(kind)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::BigInt(s)
            | Value::Ints(s)
            | Value::Floats(s)
            | Value::String(s)
            | Value::Char(s)
            | Value::State(s)
            | Value::Enum(s)
            | Value::IntArray(s)
            | Value::FloatArray(s)
            | Value::Array(s)
            | Value::Raw(s) => serializer.serialize_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Switch,
    Int,
    Ints,
    Float,
    Floats,
    String,
    Char,
    Bool,
    State,
    Enum,
    #[serde(rename = "int[]")]
    IntArray,
    #[serde(rename = "float[]")]
    FloatArray,
    Array,
}

/// Allowed values for an option.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Options {
    /// Literal from a magic comment or a sensor table, e.g. `[0, 1, 2]`.
    Literal(String),
    /// Board identifiers for `MOTHERBOARD`.
    List(Vec<String>),
}
