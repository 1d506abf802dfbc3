use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::Workbook;

/// Write sample input files for every dashboard.
#[derive(Debug, Parser)]
#[command(name = "generate-sample")]
struct Args {
    /// Output directory (created if missing).
    #[arg(short, long, default_value = "sample_data")]
    out: PathBuf,

    /// Seed for the value noise.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    /// Uniform noise in `[-amplitude, amplitude)`, rounded to one decimal.
    fn jitter(&mut self, amplitude: f64) -> f64 {
        ((self.next_f64() * 2.0 - 1.0) * amplitude * 10.0).round() / 10.0
    }
}

struct HealthRow {
    indicator: &'static str,
    year: f64,
    sex: Option<&'static str>,
    value: f64,
}

fn health_rows(rng: &mut SimpleRng) -> Vec<HealthRow> {
    // (indicator, 2010 baseline, yearly trend, split by sex)
    let indicators = [
        ("Life expectancy at birth (years)", 81.5, 0.15, true),
        ("Prevalence of obesity among adults (%)", 24.0, 0.2, true),
        ("Infant mortality rate (per 1,000 live births)", 3.7, -0.08, false),
        ("Current tobacco use (%)", 24.5, -0.3, true),
    ];

    let mut rows = Vec::new();
    for (indicator, base, trend, by_sex) in indicators {
        for year in 2010..=2022 {
            let level = base + trend * f64::from(year - 2010);
            let sexes: &[Option<&'static str>] = if by_sex {
                &[Some("Male"), Some("Female")]
            } else {
                &[None]
            };
            for &sex in sexes {
                let offset = match sex {
                    Some("Female") => base * 0.03,
                    Some(_) => -base * 0.03,
                    None => 0.0,
                };
                rows.push(HealthRow {
                    indicator,
                    year: f64::from(year),
                    sex,
                    value: level + offset + rng.jitter(base * 0.01),
                });
            }
        }
    }
    rows
}

fn write_health_csv(path: &Path, rows: &[HealthRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Indicator_Code", "Indicator_Name", "Year", "Sex", "Value"])?;
    for (i, row) in rows.iter().enumerate() {
        writer.write_record([
            format!("ISR{:03}", i % 97),
            row.indicator.to_string(),
            row.year.to_string(),
            row.sex.unwrap_or_default().to_string(),
            format!("{:.1}", row.value),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_health_parquet(path: &Path, rows: &[HealthRow]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Indicator_Name", DataType::Utf8, false),
        Field::new("Year", DataType::Float64, false),
        Field::new("Sex", DataType::Utf8, true),
        Field::new("Value", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.indicator))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(StringArray::from(rows.iter().map(|r| r.sex).collect::<Vec<_>>())),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.value))),
        ],
    )
    .context("building health record batch")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(batch)
}

fn write_drinking_csv(path: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Country", "Year", "Sex", "Value"])?;
    let mut rows = 0;
    // Years outside 2015–2025 are written on purpose; the dashboard drops them.
    for year in 2010..=2024 {
        for (sex, base) in [("Male", 31.0), ("Female", 7.5), ("Both sexes", 19.0)] {
            let value = base - 0.2 * f64::from(year - 2010) + rng.jitter(1.0);
            writer.write_record([
                "Israel".to_string(),
                year.to_string(),
                sex.to_string(),
                format!("{value:.1}"),
            ])?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}

fn write_casualties_xlsx(path: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let municipalities = [
        "Ashkelon", "Sderot", "Ofakim", "Netivot", "Beersheba", "Tel Aviv - Yafo",
        "Jerusalem", "Kiryat Shmona", "Nahariya", "Metula", "Shlomi", "Safed",
        "Haifa", "Ashdod", "Eshkol", "Sha'ar HaNegev", "Sdot Negev", "Hof Ashkelon",
        "Yavne", "Rishon LeZion", "Holon", "Bat Yam",
    ];
    let headers = [
        "Municipality",
        "Total Casualties",
        "Total Deaths",
        "Currently Hospitalized",
    ];

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in (0u16..).zip(headers) {
        sheet.write_string(0, col, header)?;
    }
    for (row, (i, name)) in (1u32..).zip(municipalities.iter().enumerate()) {
        let casualties = (rng.next_f64() * 900.0).round() + 10.0;
        let deaths = (casualties * rng.next_f64() * 0.1).round();
        sheet.write_string(row, 0, *name)?;
        sheet.write_number(row, 1, casualties)?;
        sheet.write_number(row, 2, deaths)?;
        // Every fifth row carries a text placeholder instead of a count.
        if i % 5 == 4 {
            sheet.write_string(row, 3, "-")?;
        } else {
            let hospitalized = ((casualties - deaths) * rng.next_f64() * 0.05).round();
            sheet.write_number(row, 3, hospitalized)?;
        }
    }
    workbook.save(path)?;
    Ok(municipalities.len())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let health = health_rows(&mut rng);
    let health_csv = args.out.join("health_indicators_isr_cleaned.csv");
    write_health_csv(&health_csv, &health)
        .with_context(|| format!("writing {}", health_csv.display()))?;
    println!("Wrote {} rows to {}", health.len(), health_csv.display());

    let health_parquet = args.out.join("health_indicators_isr_cleaned.parquet");
    let batch = write_health_parquet(&health_parquet, &health)
        .with_context(|| format!("writing {}", health_parquet.display()))?;
    println!("Wrote {} rows to {}", batch.num_rows(), health_parquet.display());
    println!("{}", pretty_format_batches(&[batch.slice(0, batch.num_rows().min(4))])?);

    let drinking_csv = args.out.join("alcohol_heavy_drinking_israel.csv");
    let n = write_drinking_csv(&drinking_csv, &mut rng)
        .with_context(|| format!("writing {}", drinking_csv.display()))?;
    println!("Wrote {n} rows to {}", drinking_csv.display());

    let casualties_xlsx = args.out.join("total_casualties_by_municipality.xlsx");
    let n = write_casualties_xlsx(&casualties_xlsx, &mut rng)
        .with_context(|| format!("writing {}", casualties_xlsx.display()))?;
    println!("Wrote {n} rows to {}", casualties_xlsx.display());

    Ok(())
}
