use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const PHASES: [&str; 6] = [
    "Phase 2 (Aug 19 - Aug 31, 2020)",
    "Phase 2 (Sep 2 - Sep 14, 2020)",
    "Phase 3 (Oct 28 - Nov 9, 2020)",
    "Phase 3 (Dec 9 - Dec 21, 2020)",
    "Phase 3.1 (Apr 14 - Apr 26, 2021)",
    "Phase 3.2 (Jul 21 - Aug 2, 2021)",
];

/// (group, subgroup, baseline %) for every stratum in the sample.
const STRATA: [(&str, &str, f64); 9] = [
    ("National Estimate", "United States", 10.3),
    ("By Sex", "Female", 12.6),
    ("By Sex", "Male", 7.8),
    ("By State", "California", 10.1),
    ("By State", "Colorado", 12.4),
    ("By State", "New York", 9.9),
    ("By State", "Ohio", 10.8),
    ("By State", "Texas", 8.2),
    ("By State", "Vermont", 14.0),
];

/// Deterministic SplitMix64 stream, enough for demo noise.
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

struct Row {
    group: String,
    subgroup: Option<String>,
    period: String,
    value: Option<f64>,
}

fn generate_rows(rng: &mut SplitMix) -> Vec<Row> {
    let mut rows = Vec::new();
    for (p, period) in PHASES.iter().enumerate() {
        // Access drifts upward over the pandemic.
        let trend = p as f64 * 0.35;
        for &(group, subgroup, base) in &STRATA {
            let noise = (rng.next_f64() - 0.5) * 2.0;
            let value = ((base + trend + noise) * 10.0).round() / 10.0;
            rows.push(Row {
                group: group.to_string(),
                subgroup: Some(subgroup.to_string()),
                period: period.to_string(),
                // Small states occasionally have suppressed estimates.
                value: (rng.next_f64() > 0.05).then_some(value.clamp(0.0, 100.0)),
            });
        }
    }
    // A row with no subgroup, as found in real exports.
    rows.push(Row {
        group: "By State".to_string(),
        subgroup: None,
        period: PHASES[0].to_string(),
        value: Some(11.0),
    });
    rows
}

fn write_csv(path: &str, rows: &[Row]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Indicator", "Group", "Subgroup", "Time Period Label", "Value"])?;
    for row in rows {
        let value = row.value.map(|v| v.to_string()).unwrap_or_default();
        writer.write_record([
            "Received Counseling or Therapy, Last 4 Weeks",
            row.group.as_str(),
            row.subgroup.as_deref().unwrap_or(""),
            row.period.as_str(),
            value.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Row]) -> anyhow::Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Group", DataType::Utf8, false),
        Field::new("Subgroup", DataType::Utf8, true),
        Field::new("Time Period Label", DataType::Utf8, false),
        Field::new("Value", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.group.as_str()))),
            Arc::new(StringArray::from_iter(rows.iter().map(|r| r.subgroup.as_deref()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.period.as_str()))),
            Arc::new(Float64Array::from_iter(rows.iter().map(|r| r.value))),
        ],
    )?;

    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut rng = SplitMix(42);
    let rows = generate_rows(&mut rng);

    write_csv("sample_survey.csv", &rows)?;
    write_parquet("sample_survey.parquet", &rows)?;

    println!(
        "Wrote {} rows ({} strata x {} periods) to sample_survey.csv and sample_survey.parquet",
        rows.len(),
        STRATA.len(),
        PHASES.len()
    );
    Ok(())
}
