//! Subject-row records and the ordered gradebook mapping.
//!
//! # Responsibility
//! - Define `SubjectRow` (three raw component scores plus optional display
//!   color) and its two persisted shapes.
//! - Define `Gradebook`, an insertion-ordered subject mapping whose JSON
//!   round-trip preserves document order.
//!
//! # Invariants
//! - A well-formed row always carries exactly three raw score fields.
//! - Entries that do not decode as a row are kept verbatim as
//!   [`RowValue::Malformed`]; they survive round-trips but are never
//!   surfaced as rows.
//! - Overwriting an existing subject keeps its original position.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt::{self, Formatter};

/// Number of raw score components per row (CA, CBT, Exam).
pub const SCORE_FIELDS: usize = 3;

/// Display color assigned to a row by the color cycle.
///
/// Absent until the first change-color action on the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowColor {
    /// CSS background value, e.g. `#ff9999`.
    pub background: String,
    /// Human-readable palette name, e.g. `Red`.
    pub name: String,
    /// Position in the palette cycle.
    pub index: usize,
}

/// One gradebook row: raw component scores plus optional display color.
///
/// Scores are kept as the unparsed strings the user entered; totals and
/// grades are derived at snapshot time and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RowRepr", into = "RowRepr")]
pub struct SubjectRow {
    /// Raw CA, CBT and Exam inputs, in that order. May be empty strings.
    pub scores: [String; SCORE_FIELDS],
    /// Display color, once assigned.
    pub color: Option<RowColor>,
}

impl SubjectRow {
    /// Creates a fresh row with three empty scores and no color.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Persisted shapes of a row value.
///
/// A never-colored row is stored as a bare 3-element array; a colored row
/// as an attributed object. Variant order matters for untagged decoding:
/// objects must be tried before arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RowRepr {
    Attributed {
        scores: [String; SCORE_FIELDS],
        background_color: String,
        color_name: String,
        color_index: usize,
    },
    Triple([String; SCORE_FIELDS]),
}

impl From<SubjectRow> for RowRepr {
    fn from(row: SubjectRow) -> Self {
        match row.color {
            Some(color) => Self::Attributed {
                scores: row.scores,
                background_color: color.background,
                color_name: color.name,
                color_index: color.index,
            },
            None => Self::Triple(row.scores),
        }
    }
}

impl From<RowRepr> for SubjectRow {
    fn from(repr: RowRepr) -> Self {
        match repr {
            RowRepr::Attributed {
                scores,
                background_color,
                color_name,
                color_index,
            } => Self {
                scores,
                color: Some(RowColor {
                    background: background_color,
                    name: color_name,
                    index: color_index,
                }),
            },
            RowRepr::Triple(scores) => Self {
                scores,
                color: None,
            },
        }
    }
}

/// A stored gradebook entry: either a decoded row or a retained legacy
/// value that failed structural decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    Row(SubjectRow),
    Malformed(Value),
}

impl RowValue {
    /// Classifies one raw persisted value.
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<SubjectRow>(value.clone()) {
            Ok(row) => Self::Row(row),
            Err(_) => Self::Malformed(value),
        }
    }

    /// The decoded row, when well-formed.
    pub fn as_row(&self) -> Option<&SubjectRow> {
        match self {
            Self::Row(row) => Some(row),
            Self::Malformed(_) => None,
        }
    }

    /// Mutable access to the decoded row, when well-formed.
    pub fn as_row_mut(&mut self) -> Option<&mut SubjectRow> {
        match self {
            Self::Row(row) => Some(row),
            Self::Malformed(_) => None,
        }
    }
}

impl Serialize for RowValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Row(row) => row.serialize(serializer),
            Self::Malformed(value) => value.serialize(serializer),
        }
    }
}

/// Insertion-ordered mapping from subject name to stored row value.
///
/// Backed by an entry vector rather than a hash map so that display order
/// stays stable and survives the JSON round-trip in document order. The
/// mapping stays small (one entry per subject), so linear key lookup is
/// deliberate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gradebook {
    entries: Vec<(String, RowValue)>,
}

impl Gradebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites one subject. Overwrites keep the subject's
    /// original position; new subjects append.
    pub fn insert(&mut self, subject: String, value: RowValue) {
        match self.entries.iter_mut().find(|(name, _)| *name == subject) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((subject, value)),
        }
    }

    pub fn get(&self, subject: &str) -> Option<&RowValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == subject)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, subject: &str) -> Option<&mut RowValue> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == subject)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, subject: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == subject)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Gradebook {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (subject, value) in &self.entries {
            map.serialize_entry(subject, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Gradebook {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct GradebookVisitor;

        impl<'de> Visitor<'de> for GradebookVisitor {
            type Value = Gradebook;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("a subject-to-row object")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Gradebook, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut book = Gradebook::new();
                while let Some((subject, value)) = access.next_entry::<String, Value>()? {
                    // Duplicate keys in the document resolve last-write-wins.
                    book.insert(subject, RowValue::from_value(value));
                }
                Ok(book)
            }
        }

        deserializer.deserialize_map(GradebookVisitor)
    }
}
