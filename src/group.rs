//! Wildcard grouping of index-varying sibling options.
//!
//! Options whose names differ only in one `_`-separated token (an axis, an
//! index, `MIN`/`MAX`, ...) are moved under a synthetic name with that token
//! replaced by `*`, keyed by the token. Token positions are visited from the
//! right. Each position is handled in two phases: candidates are collected
//! from the schema as it stands, then merged into it. The next position sees
//! the merged schema, so groups formed at one position can themselves be
//! grouped at a lower one, e.g. `X_MIN_POS`, `X_MAX_POS`, `Y_MIN_POS`,
//! `Y_MAX_POS` become `*_*_POS` holding `X` and `Y`, each holding `MIN` and
//! `MAX`.

use crate::model::{Entry, Group, Schema};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Highest token position considered.
pub const MAX_TOKEN_POSITION: usize = 11;

static GROUPING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^([XYZIJKUVW]|[XYZ]2|Z[34]|E[0-7])$",
        r"^AXIS\d$",
        r"^(MIN|MAX)$",
        r"^[0-8]$",
        r"^HOTEND[0-7]$",
        r"^(HOTENDS|BED|PROBE|COOLER)$",
        r"^[XYZIJKUVW]M(IN|AX)$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// `(file, section, wildcard name)`
type GroupKey = (String, String, String);

/// `(token, full name)` for each member of a candidate group.
type Members = Vec<(String, String)>;

/// Group sibling options across the whole schema in place.
pub fn group_options(schema: &mut Schema) {
    for position in (0..=MAX_TOKEN_POSITION).rev() {
        let candidates = find_groups(schema, position);
        apply_groups(schema, candidates);
    }
}

/// Split `name` at `position` into `(token, wildcard name)` when the token
/// there is one of the grouping patterns.
pub fn wildcard(name: &str, position: usize) -> Option<(String, String)> {
    let mut parts: Vec<&str> = name.split('_').collect();
    if parts.len() < 2 || position >= parts.len() {
        return None;
    }
    let token = parts[position];
    if !GROUPING_PATTERNS.iter().any(|re| re.is_match(token)) {
        return None;
    }
    parts[position] = "*";
    Some((token.to_string(), parts.join("_")))
}

fn find_groups(schema: &Schema, position: usize) -> IndexMap<GroupKey, Members> {
    let mut found: IndexMap<GroupKey, Members> = IndexMap::new();
    for (file, sections) in schema.files() {
        for (section, options) in sections {
            for name in options.keys() {
                if let Some((token, wild)) = wildcard(name, position) {
                    found
                        .entry((file.clone(), section.clone(), wild))
                        .or_default()
                        .push((token, name.clone()));
                }
            }
        }
    }
    found
}

fn apply_groups(schema: &mut Schema, candidates: IndexMap<GroupKey, Members>) {
    for ((file, section, wild), members) in candidates {
        if members.len() < 2 {
            continue;
        }
        let Some(options) = schema.section_mut(&file, &section) else {
            continue;
        };

        let mut group = match options.get_mut(&wild) {
            Some(Entry::Group(existing)) => std::mem::take(existing),
            _ => Group::default(),
        };
        for (token, name) in members {
            if let Some(entry) = options.shift_remove(&name) {
                group.0.insert(token, entry);
            }
        }

        debug!(%file, %section, name = %wild, members = group.len(), "group");
        options.insert(wild, Entry::Group(group));
    }
}
