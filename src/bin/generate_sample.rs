use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// One row of the weekly Top 10 sample file.
#[derive(Debug, Serialize)]
struct SampleRow {
    week: String,
    category: &'static str,
    weekly_rank: u32,
    show_title: &'static str,
    season_title: Option<String>,
    weekly_hours_viewed: Option<u64>,
    runtime: Option<f64>,
    weekly_views: Option<u64>,
    cumulative_weeks_in_top_10: u32,
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// (title, category, runtime in minutes, base weekly hours in millions)
const CATALOGUE: &[(&str, &str, f64, f64)] = &[
    ("Night Harbor", "Films (English)", 114.0, 38.0),
    ("The Last Orchard", "Films (English)", 126.0, 27.0),
    ("Paper Kingdoms", "Films (English)", 96.0, 19.0),
    ("Velvet Static", "Films (Non-English)", 120.0, 22.0),
    ("Casa Lumière", "Films (Non-English)", 108.0, 15.0),
    ("Deep Current", "TV (English)", 450.0, 64.0),
    ("Glass Parish", "TV (English)", 312.0, 41.0),
    ("Northbound", "TV (English)", 384.0, 33.0),
    ("Hanabi Street", "TV (Non-English)", 486.0, 52.0),
    ("El Faro", "TV (Non-English)", 414.0, 29.0),
    ("Quiet Signals", "TV (Non-English)", 264.0, 18.0),
    ("Copper Saints", "TV (English)", 558.0, 24.0),
];

const WEEKS: i64 = 16;
const OUTPUT_PATH: &str = "netflix_cleaned_sample.csv";

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let first_week = NaiveDate::from_ymd_opt(2024, 1, 7).context("invalid start date")?;

    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;
    let mut rows = 0usize;

    for week in 0..WEEKS {
        let date = first_week + Duration::weeks(week);

        for &category in &["Films (English)", "Films (Non-English)", "TV (English)", "TV (Non-English)"] {
            // Rank this category's titles by this week's noisy hours.
            let mut week_rows: Vec<(&'static str, f64, f64, u32)> = CATALOGUE
                .iter()
                .enumerate()
                .filter(|(_, (_, c, _, _))| *c == category)
                .map(|(i, &(title, _, runtime, base))| {
                    // Later weeks decay; each title peaks at a different week.
                    let peak_week = (i as i64 * 3) % WEEKS;
                    let distance = (week - peak_week).abs() as f64;
                    let hours = (base * (-distance / 4.0).exp() + rng.gauss(0.0, 1.5)).max(0.4);
                    let weeks_in_top = (week - peak_week + 1).clamp(1, WEEKS) as u32;
                    (title, hours * 1_000_000.0, runtime, weeks_in_top)
                })
                .collect();
            week_rows.sort_by(|a, b| b.1.total_cmp(&a.1));

            for (rank, (title, hours, runtime, weeks_in_top)) in week_rows.into_iter().enumerate() {
                // A few gaps so the dashboard's missing-value handling shows.
                let drop_hours = rng.next_f64() < 0.03;
                let drop_runtime = rng.next_f64() < 0.05;
                let views = (hours / (runtime / 60.0)).round() as u64;

                writer
                    .serialize(SampleRow {
                        week: date.format("%Y-%m-%d").to_string(),
                        category,
                        weekly_rank: rank as u32 + 1,
                        show_title: title,
                        season_title: category
                            .starts_with("TV")
                            .then(|| format!("{title}: Season {}", 1 + (week / 8))),
                        weekly_hours_viewed: (!drop_hours).then_some(hours.round() as u64),
                        runtime: (!drop_runtime).then_some(runtime),
                        weekly_views: (!drop_hours).then_some(views),
                        cumulative_weeks_in_top_10: weeks_in_top,
                    })
                    .with_context(|| format!("writing row for {title}"))?;
                rows += 1;
            }
        }
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {rows} rows ({WEEKS} weeks) to {OUTPUT_PATH}");
    Ok(())
}
