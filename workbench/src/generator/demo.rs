use photocore::table::Row;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for seeding the demo photometry table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub rows: usize,
    pub seed: u64,
    pub jd_step: f64,
    pub jd_jitter: f64,
    pub mag_range: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rows: 14,
            seed: 0,
            jd_step: 10.0,
            jd_jitter: 5.0,
            mag_range: 20.0,
        }
    }
}

/// Builds evenly stepped, jittered observation rows with random magnitudes,
/// seeded deterministically so sessions replay consistently.
pub fn build_demo_rows(config: &DemoConfig) -> Vec<Row> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mag_range = config.mag_range.max(f64::EPSILON);

    (0..config.rows)
        .map(|i| {
            let jitter = if config.jd_jitter > 0.0 {
                rng.gen_range(-config.jd_jitter..config.jd_jitter)
            } else {
                0.0
            };
            Row::new(
                i as f64 * config.jd_step + jitter,
                rng.gen_range(0.0..mag_range),
                rng.gen_range(0.0..mag_range),
            )
        })
        .collect()
}
