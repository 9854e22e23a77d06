use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use super::extract::{self, FieldMatch};

// ---------------------------------------------------------------------------
// Derived tuples
// ---------------------------------------------------------------------------

/// Unit token that followed a current-density value in the source text.
///
/// The numeric density is kept exactly as written; the unit is carried
/// alongside it for display and is never used to rescale the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityUnit {
    AmpsPerGram,
    MilliampsPerGram,
}

impl DensityUnit {
    pub fn from_token(token: &str) -> Self {
        if token == "mA" {
            DensityUnit::MilliampsPerGram
        } else {
            DensityUnit::AmpsPerGram
        }
    }
}

impl fmt::Display for DensityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DensityUnit::AmpsPerGram => write!(f, "A g-1"),
            DensityUnit::MilliampsPerGram => write!(f, "mA g-1"),
        }
    }
}

/// One (specific capacity, current density) pair from the "Specific Capacity" field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityPoint {
    /// mAh g-1.
    pub capacity: f64,
    pub density: f64,
    pub unit: DensityUnit,
}

/// One (capacity, density, cycle count) triple from the "Cycle Life" field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleLifePoint {
    pub capacity: f64,
    pub density: f64,
    pub unit: DensityUnit,
    pub cycles: u32,
}

// ---------------------------------------------------------------------------
// Record – one row of the source sheet
// ---------------------------------------------------------------------------

/// A single literature row as read from the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Trimmed, non-empty material title.
    pub label: String,
    pub specific_capacity: Option<String>,
    pub cycle_life: Option<String>,
    pub doi: Option<String>,
}

/// A [`Record`] with its extracted tuples attached.
#[derive(Debug, Clone)]
pub struct AnodeRecord {
    pub record: Record,
    pub capacity: Vec<CapacityPoint>,
    pub cycle_life: Vec<CycleLifePoint>,
}

impl AnodeRecord {
    pub fn enrich(record: Record) -> Self {
        let capacity = extract::parse_specific_capacity(record.specific_capacity.as_deref());
        let cycle_life = extract::parse_cycle_life(record.cycle_life.as_deref());
        AnodeRecord {
            record,
            capacity,
            cycle_life,
        }
    }

    pub fn label(&self) -> &str {
        &self.record.label
    }

    /// Number of non-blank text fields on this record that produced no tuples.
    pub fn unmatched_fields(&self) -> usize {
        let capacity = extract::classify(self.record.specific_capacity.as_deref(), self.capacity.len());
        let cycle = extract::classify(self.record.cycle_life.as_deref(), self.cycle_life.len());
        [capacity, cycle]
            .into_iter()
            .filter(|m| *m == FieldMatch::Unmatched)
            .count()
    }
}

// ---------------------------------------------------------------------------
// AnodeDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Where a dataset was read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSource {
    pub path: PathBuf,
    /// Sheet name for spreadsheet sources.
    pub sheet: Option<String>,
}

/// The enriched dataset with the pre-computed label index.
#[derive(Debug, Clone)]
pub struct AnodeDataset {
    /// All records in source order.
    pub records: Vec<AnodeRecord>,
    /// Distinct labels, sorted.
    pub labels: Vec<String>,
    pub source: DatasetSource,
}

impl AnodeDataset {
    /// Run extraction over every record and build the label index.
    pub fn from_records(records: Vec<Record>, source: DatasetSource) -> Self {
        let records: Vec<AnodeRecord> = records.into_iter().map(AnodeRecord::enrich).collect();

        for rec in &records {
            if rec.unmatched_fields() > 0 {
                log::debug!("no metrics extracted from text of '{}'", rec.label());
            }
        }

        let labels: Vec<String> = records
            .iter()
            .map(|r| r.record.label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        AnodeDataset {
            records,
            labels,
            source,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record carrying `label`, if any.
    pub fn first_with_label(&self, label: &str) -> Option<&AnodeRecord> {
        self.records.iter().find(|r| r.label() == label)
    }

    /// Total count of non-blank text fields that yielded no tuples.
    pub fn unmatched_fields(&self) -> usize {
        self.records.iter().map(AnodeRecord::unmatched_fields).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::record;

    #[test]
    fn labels_are_sorted_and_distinct() {
        let ds = AnodeDataset::from_records(
            vec![
                record("SnO2", None, None),
                record("Sn-C", None, None),
                record("SnO2", None, None),
            ],
            DatasetSource::default(),
        );
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.labels, vec!["Sn-C", "SnO2"]);
    }

    #[test]
    fn enrich_attaches_both_sequences() {
        let rec = AnodeRecord::enrich(record(
            "Sn",
            Some("37.2 mAh g-1 at 1.5 A g-1"),
            Some("45.0 mAh g-1 at 0.5 A g-1 over 200 cycles"),
        ));
        assert_eq!(rec.capacity.len(), 1);
        assert_eq!(rec.cycle_life.len(), 1);
        assert_eq!(rec.cycle_life[0].cycles, 200);
        assert_eq!(rec.unmatched_fields(), 0);
    }

    #[test]
    fn unmatched_counts_only_non_blank_text() {
        let ds = AnodeDataset::from_records(
            vec![
                record("A", Some("high capacity"), None),
                record("B", Some("  "), Some("stable for many cycles")),
            ],
            DatasetSource::default(),
        );
        assert_eq!(ds.unmatched_fields(), 2);
    }

    #[test]
    fn first_with_label_picks_source_order() {
        let mut second = record("SnS", None, None);
        second.doi = Some("second".into());
        let ds = AnodeDataset::from_records(
            vec![record("SnS", None, None), second],
            DatasetSource::default(),
        );
        let first = ds.first_with_label("SnS").unwrap();
        assert_eq!(first.record.doi.as_deref(), Some("10.1000/SnS"));
        assert!(ds.first_with_label("missing").is_none());
    }

    #[test]
    fn density_unit_tokens() {
        assert_eq!(DensityUnit::from_token("mA"), DensityUnit::MilliampsPerGram);
        assert_eq!(DensityUnit::from_token("A"), DensityUnit::AmpsPerGram);
        assert_eq!(DensityUnit::MilliampsPerGram.to_string(), "mA g-1");
    }
}
