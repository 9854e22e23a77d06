/// Data layer: core types, loading, extraction, and selection.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read sheet → RawTable → Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  extract  │  free text → CapacityPoint / CycleLifePoint
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ AnodeDataset  │  Vec<AnodeRecord>, sorted label index
///   └──────────────┘
///        │
///        ▼
///   ┌─────────────────────┐
///   │ filter/table/chart   │  selection → table rows, plot series
///   └─────────────────────┘
/// ```

pub mod chart;
pub mod error;
pub mod extract;
pub mod filter;
pub mod loader;
pub mod model;
pub mod table;

#[cfg(test)]
pub(crate) mod fixtures {
    use super::model::{AnodeDataset, DatasetSource, Record};

    pub fn record(label: &str, capacity: Option<&str>, cycle: Option<&str>) -> Record {
        Record {
            label: label.to_string(),
            specific_capacity: capacity.map(str::to_string),
            cycle_life: cycle.map(str::to_string),
            doi: Some(format!("10.1000/{label}")),
        }
    }

    /// Four records, three distinct labels; `SnO2` appears twice.
    pub fn dataset() -> AnodeDataset {
        AnodeDataset::from_records(
            vec![
                record(
                    "SnO2",
                    Some("520 mAh g-1 at 0.1 A g-1, 410 mAh g-1 at 1 A g-1"),
                    Some("380 mAh g-1 at 1 A g-1 after 1000 cycles"),
                ),
                record("Sn4P3", Some("650 mAh g-1 at 2 A g-1"), None),
                record(
                    "SnO2",
                    Some("300 mAh g-1 at 5 A g-1"),
                    Some("200 mAh g-1 at 3 A g-1 over 500 cycles"),
                ),
                record(
                    "Sn-C",
                    Some("no numeric data"),
                    Some("250 mAh g-1 at 4 A g-1 after 2000 cycles"),
                ),
            ],
            DatasetSource::default(),
        )
    }
}
