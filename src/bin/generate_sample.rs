//! Writes `sample_anodes.parquet` and `sample_anodes.csv` with synthetic
//! literature rows for trying the dashboard without the source workbook.

use std::sync::Arc;

use arrow::array::StringArray;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// One generated literature row.
struct SampleRow {
    title: Option<String>,
    capacity: Option<String>,
    cycle_life: Option<String>,
    doi: String,
}

/// Capacity fades with current density; text style rotates through the
/// connector and spacing variants found in real papers.
fn capacity_text(rng: &mut SimpleRng, base: f64, style: usize) -> String {
    let densities = [0.1, 0.5, 1.0, 2.0, 5.0];
    let parts: Vec<String> = densities
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let cap = (base * (1.0 - 0.12 * i as f64) + rng.range(-15.0, 15.0)).round();
            match style % 3 {
                0 => format!("{cap} mAh g-1 at {d} A g-1"),
                // Narrow no-break spaces and minus signs, as pasted from PDFs.
                1 => format!("{cap}\u{202F}mAh\u{2009}g\u{2212}1 at {d}\u{202F}A\u{2009}g\u{2212}1"),
                _ => format!("{cap} mAh g\u{2013}1, {} mA g\u{2013}1", d * 1000.0),
            }
        })
        .collect();
    parts.join("; ")
}

fn cycle_text(rng: &mut SimpleRng, base: f64) -> String {
    let cycles = [200u32, 500, 1000, 2000];
    let n = 1 + (rng.next_u64() % 2) as usize;
    (0..n)
        .map(|i| {
            let c = cycles[(rng.next_u64() as usize + i) % cycles.len()];
            let cap = (base * rng.range(0.55, 0.9)).round();
            let d = [0.5, 1.0, 2.0][i % 3];
            let retention = rng.range(70.0, 98.0).round();
            format!("{cap} mAh g-1 at {d} A g-1 with {retention}% retention after {c} cycles")
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let materials = [
        ("SnO2@C nanospheres", 720.0),
        ("Sn4P3/rGO", 680.0),
        ("SnS2 nanosheets", 610.0),
        ("Sn-Cu alloy film", 450.0),
        ("SnSe@N-doped carbon", 560.0),
        ("Sn nanoparticles in CNF", 500.0),
        ("SnSb yolk-shell", 590.0),
    ];

    let mut rows: Vec<SampleRow> = Vec::new();
    for (i, &(title, base)) in materials.iter().enumerate() {
        rows.push(SampleRow {
            title: Some(title.to_string()),
            capacity: Some(capacity_text(&mut rng, base, i)),
            cycle_life: (i % 4 != 3).then(|| cycle_text(&mut rng, base)),
            doi: format!("10.1016/j.sample.2024.{:04}", 100 + i),
        });
    }

    // A duplicate study, an unparseable entry and rows the loader must drop.
    rows.push(SampleRow {
        title: Some("SnO2@C nanospheres".to_string()),
        capacity: Some(capacity_text(&mut rng, 650.0, 0)),
        cycle_life: Some(cycle_text(&mut rng, 650.0)),
        doi: "10.1016/j.sample.2024.0200".to_string(),
    });
    rows.push(SampleRow {
        title: Some("Tin oxide thin film".to_string()),
        capacity: Some("high reversible capacity reported".to_string()),
        cycle_life: Some("stable over long cycling".to_string()),
        doi: "10.1016/j.sample.2024.0201".to_string(),
    });
    rows.push(SampleRow {
        title: Some("Unknown".to_string()),
        capacity: Some("400 mAh g-1 at 1 A g-1".to_string()),
        cycle_life: None,
        doi: "10.1016/j.sample.2024.0202".to_string(),
    });
    rows.push(SampleRow {
        title: None,
        capacity: Some("300 mAh g-1 at 2 A g-1".to_string()),
        cycle_life: None,
        doi: "10.1016/j.sample.2024.0203".to_string(),
    });

    write_parquet(&rows, "sample_anodes.parquet");
    write_csv(&rows, "sample_anodes.csv");

    println!(
        "Written {} rows to sample_anodes.parquet and sample_anodes.csv",
        rows.len()
    );
}

fn write_parquet(rows: &[SampleRow], path: &str) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Title", DataType::Utf8, true),
        Field::new("Specific Capacity", DataType::Utf8, true),
        Field::new("Cycle Life", DataType::Utf8, true),
        Field::new("DOI", DataType::Utf8, false),
    ]));

    let title: StringArray = rows.iter().map(|r| r.title.as_deref()).collect();
    let capacity: StringArray = rows.iter().map(|r| r.capacity.as_deref()).collect();
    let cycle: StringArray = rows.iter().map(|r| r.cycle_life.as_deref()).collect();
    let doi: StringArray = rows.iter().map(|r| Some(r.doi.as_str())).collect();

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(title),
            Arc::new(capacity),
            Arc::new(cycle),
            Arc::new(doi),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn write_csv(rows: &[SampleRow], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer
        .write_record(["Title", "Specific Capacity", "Cycle Life", "DOI"])
        .expect("Failed to write CSV header");
    for r in rows {
        writer
            .write_record([
                r.title.as_deref().unwrap_or(""),
                r.capacity.as_deref().unwrap_or(""),
                r.cycle_life.as_deref().unwrap_or(""),
                r.doi.as_str(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");
}
