//! Metric extraction from free-text literature fields.
//!
//! Both extractors are total: any input, including `None`, produces a
//! (possibly empty) vector. Text that does not match is dropped silently.

use std::sync::LazyLock;

use regex::Regex;

use super::model::{CapacityPoint, CycleLifePoint, DensityUnit};

/// `<capacity> mAh g-1 [at|,|and] <density> (A|mA) g-1`
static CAPACITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([0-9]+(?:\.[0-9]+)?)\s*mAh\s*g-1\s*(?:at\s*|,|and)?\s*([0-9]+(?:\.[0-9]+)?)\s*(mA|A)\s*g-1",
    )
    .unwrap()
});

/// `<capacity> mAh g-1 at <density> (A|mA) g-1 ... <n> cycles`
static CYCLE_LIFE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([0-9]+(?:\.[0-9]+)?)\s*mAh\s*g-1\s*at\s*([0-9]+(?:\.[0-9]+)?)\s*(mA|A)\s*g-1.*?([0-9]+)\s*cycles",
    )
    .unwrap()
});

/// Fold typographic spaces and dashes onto their ASCII forms.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2009}' | '\u{202F}' | '\u{00A0}' => ' ',
            '\u{2013}' | '\u{2212}' => '-',
            other => other,
        })
        .collect()
}

/// Parse a captured decimal. Digit runs too long for `f64` come back as
/// infinity and are rejected along with parse failures.
fn finite(digits: &str) -> Option<f64> {
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Extract `(capacity, density)` pairs from a "Specific Capacity" cell.
pub fn parse_specific_capacity(text: Option<&str>) -> Vec<CapacityPoint> {
    let Some(text) = text else {
        return Vec::new();
    };
    let text = normalize(text);

    CAPACITY_RE
        .captures_iter(&text)
        .filter_map(|caps| {
            Some(CapacityPoint {
                capacity: finite(&caps[1])?,
                density: finite(&caps[2])?,
                unit: DensityUnit::from_token(&caps[3]),
            })
        })
        .collect()
}

/// Extract `(capacity, density, cycles)` triples from a "Cycle Life" cell.
pub fn parse_cycle_life(text: Option<&str>) -> Vec<CycleLifePoint> {
    let Some(text) = text else {
        return Vec::new();
    };
    let text = normalize(text);

    CYCLE_LIFE_RE
        .captures_iter(&text)
        .filter_map(|caps| {
            Some(CycleLifePoint {
                capacity: finite(&caps[1])?,
                density: finite(&caps[2])?,
                unit: DensityUnit::from_token(&caps[3]),
                // Absurdly long digit runs overflow u32 and are skipped.
                cycles: caps[4].parse().ok()?,
            })
        })
        .collect()
}

/// Outcome of running an extractor over one text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMatch {
    /// Missing or whitespace-only.
    Empty,
    Matched,
    /// Text was present but nothing matched.
    Unmatched,
}

pub fn classify(text: Option<&str>, matches: usize) -> FieldMatch {
    match text {
        None => FieldMatch::Empty,
        Some(t) if t.trim().is_empty() => FieldMatch::Empty,
        Some(_) if matches > 0 => FieldMatch::Matched,
        Some(_) => FieldMatch::Unmatched,
    }
}
