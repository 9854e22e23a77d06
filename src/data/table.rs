use super::model::{AnodeDataset, AnodeRecord, CycleLifePoint};

/// Column headers of the flattened summary table, in display order.
pub const SUMMARY_HEADERS: [&str; 7] = [
    "Title",
    "Specific Capacity (mAh g-1)",
    "Current Density (A g-1)",
    "Cycle Specific Capacity (mAh g-1)",
    "Cycle Current Density (A g-1)",
    "No. of Cycles",
    "DOI",
];

const NOT_AVAILABLE: &str = "N/A";

/// Shortest round-trip form, but whole floats keep one fractional digit
/// (`1.0`, not `1`).
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Join values with `", "`, or `N/A` when there are none.
fn join_or_na<I>(values: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let joined = values.into_iter().collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

/// One display row of the "All" table: each record's tuples flattened into strings.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub title: String,
    pub capacities: String,
    pub densities: String,
    pub cycle_capacities: String,
    pub cycle_densities: String,
    pub cycles: String,
    pub doi: String,
}

impl SummaryRow {
    pub fn from_record(rec: &AnodeRecord) -> Self {
        SummaryRow {
            title: rec.record.label.clone(),
            capacities: join_or_na(rec.capacity.iter().map(|p| format_number(p.capacity))),
            densities: join_or_na(rec.capacity.iter().map(|p| format_number(p.density))),
            cycle_capacities: join_or_na(rec.cycle_life.iter().map(|p| format_number(p.capacity))),
            cycle_densities: join_or_na(rec.cycle_life.iter().map(|p| format_number(p.density))),
            cycles: join_or_na(rec.cycle_life.iter().map(|p| p.cycles.to_string())),
            doi: rec.record.doi.clone().unwrap_or_default(),
        }
    }

    /// Cells in [`SUMMARY_HEADERS`] order.
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.title,
            &self.capacities,
            &self.densities,
            &self.cycle_capacities,
            &self.cycle_densities,
            &self.cycles,
            &self.doi,
        ]
    }
}

/// Flatten every record of the dataset, in source order.
pub fn summary_rows(dataset: &AnodeDataset) -> Vec<SummaryRow> {
    dataset.records.iter().map(SummaryRow::from_record).collect()
}

/// Link target for a DOI cell; bare identifiers resolve through doi.org.
pub fn doi_url(doi: &str) -> String {
    let doi = doi.trim();
    if doi.starts_with("http://") || doi.starts_with("https://") {
        doi.to_string()
    } else {
        format!("https://doi.org/{doi}")
    }
}

/// `"200 cycles at 0.5 A g-1: 45.0 mAh g-1"`
pub fn cycle_life_line(point: &CycleLifePoint) -> String {
    format!(
        "{} cycles at {} {}: {} mAh g-1",
        point.cycles,
        format_number(point.density),
        point.unit,
        format_number(point.capacity)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{dataset, record};
    use crate::data::model::DensityUnit;

    #[test]
    fn numbers_keep_python_like_form() {
        assert_eq!(format_number(1.0), "1.0");
        assert_eq!(format_number(37.2), "37.2");
        assert_eq!(format_number(0.05), "0.05");
        assert_eq!(format_number(1500.0), "1500.0");
    }

    #[test]
    fn empty_sequences_render_na() {
        let rec = AnodeRecord::enrich(record("SnO2", Some("no numbers"), None));
        let row = SummaryRow::from_record(&rec);
        assert_eq!(row.capacities, "N/A");
        assert_eq!(row.densities, "N/A");
        assert_eq!(row.cycles, "N/A");
        assert_eq!(row.doi, "10.1000/SnO2");
    }

    #[test]
    fn multiple_tuples_join_with_commas() {
        let rec = AnodeRecord::enrich(record(
            "Sn",
            Some("520 mAh g-1 at 0.1 A g-1, 410 mAh g-1 at 1 A g-1"),
            Some("380 mAh g-1 at 1 A g-1 after 1000 cycles; 250 mAh g-1 at 5 A g-1 after 3000 cycles"),
        ));
        let row = SummaryRow::from_record(&rec);
        assert_eq!(row.capacities, "520.0, 410.0");
        assert_eq!(row.densities, "0.1, 1.0");
        assert_eq!(row.cycle_capacities, "380.0, 250.0");
        assert_eq!(row.cycle_densities, "1.0, 5.0");
        assert_eq!(row.cycles, "1000, 3000");
        assert_eq!(row.cells()[0], "Sn");
    }

    #[test]
    fn summary_keeps_source_order() {
        let ds = dataset();
        let titles: Vec<String> = summary_rows(&ds).into_iter().map(|r| r.title).collect();
        let expected: Vec<String> = ds.records.iter().map(|r| r.label().to_string()).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn doi_links() {
        assert_eq!(doi_url("10.1016/j.x.2020"), "https://doi.org/10.1016/j.x.2020");
        assert_eq!(doi_url(" https://doi.org/10.1/a "), "https://doi.org/10.1/a");
    }

    #[test]
    fn cycle_line_format() {
        let p = CycleLifePoint {
            capacity: 45.0,
            density: 0.5,
            unit: DensityUnit::AmpsPerGram,
            cycles: 200,
        };
        assert_eq!(cycle_life_line(&p), "200 cycles at 0.5 A g-1: 45.0 mAh g-1");

        // Milliamp densities keep their own unit rather than reading as A g-1.
        let p = CycleLifePoint {
            capacity: 610.0,
            density: 100.0,
            unit: DensityUnit::MilliampsPerGram,
            cycles: 500,
        };
        assert_eq!(cycle_life_line(&p), "500 cycles at 100.0 mA g-1: 610.0 mAh g-1");
    }
}
