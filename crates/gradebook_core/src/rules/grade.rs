//! Total-mark and letter-grade derivation.
//!
//! # Responsibility
//! - Coerce raw component scores (CA, CBT, Exam) into integers.
//! - Sum coerced scores into a total mark.
//! - Classify a total mark into a letter grade via fixed bands.
//!
//! # Invariants
//! - Coercion never fails: empty or non-numeric input contributes 0.
//! - Grade bands are descending, non-overlapping, first match wins, and
//!   cover every integer (negative totals fall through to `F`).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static LEADING_INT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[+-]?[0-9]+").expect("valid leading integer regex"));

/// Letter classification of a total mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
        };
        write!(f, "{letter}")
    }
}

/// Inclusive lower bound of each band, best grade first.
const GRADE_BANDS: &[(i64, Grade)] = &[
    (70, Grade::A),
    (60, Grade::B),
    (50, Grade::C),
    (45, Grade::D),
    (40, Grade::E),
];

/// Coerces one raw score string into its integer contribution.
///
/// Parses a leading integer prefix (optional whitespace and sign, then
/// digits) and ignores any trailing text. Empty input, non-numeric input,
/// and values outside `i64` all contribute 0.
pub fn coerce_score(raw: &str) -> i64 {
    LEADING_INT_RE
        .find(raw)
        .and_then(|m| m.as_str().trim_start().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Sums the three coerced component scores into a total mark.
///
/// Negative numeric input passes through arithmetic unmodified; there is
/// no clamping.
pub fn compute_total(ca: &str, cbt: &str, exam: &str) -> i64 {
    coerce_score(ca) + coerce_score(cbt) + coerce_score(exam)
}

/// Classifies a total mark into a letter grade.
pub fn compute_grade(total: i64) -> Grade {
    for &(floor, grade) in GRADE_BANDS {
        if total >= floor {
            return grade;
        }
    }
    Grade::F
}
