//! Writes a deterministic synthetic `insurance.csv` for trying out the
//! dashboard without real data.

use serde::Serialize;

#[derive(Serialize)]
struct Row {
    age: u32,
    sex: &'static str,
    bmi: f64,
    children: u32,
    smoker: &'static str,
    region: &'static str,
    charges: f64,
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

    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as u32
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const REGIONS: [&str; 4] = ["southwest", "southeast", "northwest", "northeast"];

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path("insurance.csv")?;

    for _ in 0..400 {
        let age = rng.range(18, 64);
        let sex = if rng.next_f64() < 0.5 { "female" } else { "male" };
        let bmi = (rng.gauss(30.5, 6.0).clamp(16.0, 52.0) * 10.0).round() / 10.0;
        let children = rng.range(0, 5);
        let smoker = rng.next_f64() < 0.2;
        let region = REGIONS[rng.range(0, 3) as usize];

        // Rough cost model: smoking dominates, age and BMI trend upward.
        let base = 2000.0
            + age as f64 * 240.0
            + (bmi - 25.0).max(0.0) * 320.0
            + children as f64 * 450.0
            + if smoker { 22000.0 } else { 0.0 };
        let charges = ((base + rng.gauss(0.0, 1800.0)).max(1000.0) * 100.0).round() / 100.0;

        writer.serialize(Row {
            age,
            sex,
            bmi,
            children,
            smoker: if smoker { "yes" } else { "no" },
            region,
            charges,
        })?;
    }

    writer.flush()?;
    println!("Wrote insurance.csv (400 records)");
    Ok(())
}
