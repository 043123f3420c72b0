use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Aggregates over optionally-missing values
// ---------------------------------------------------------------------------

/// Arithmetic mean.  `None` when the input is empty, so an all-missing
/// column reads as "unavailable" rather than zero.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        sum += v;
        n += 1;
    }
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

/// Quantile with linear interpolation between order statistics, matching the
/// conventional dataframe default.  `q` is clamped to `[0, 1]`.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Pairwise-complete Pearson correlation.  `None` when fewer than two
/// complete pairs exist or either side has zero variance.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let my = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in &pairs {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx == 0.0 || vy == 0.0 {
        return None;
    }
    Some(cov / (vx.sqrt() * vy.sqrt()))
}

// ---------------------------------------------------------------------------
// Summary metrics (the three dashboard tiles)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean_charges: Option<f64>,
    pub mean_bmi: Option<f64>,
    pub mean_age: Option<f64>,
}

/// Compute the tile metrics over the full dataset, missing values excluded.
pub fn summarize(dataset: &Dataset) -> Summary {
    Summary {
        mean_charges: mean(dataset.present(|r| r.charges)),
        mean_bmi: mean(dataset.present(|r| r.bmi)),
        mean_age: mean(dataset.present(|r| r.age)),
    }
}

// ---------------------------------------------------------------------------
// Five-number summary (box plots)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumber {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Five-number summary of the given values; `None` for empty input.
/// Whiskers sit at the observed min/max.
pub fn five_number(values: &[f64]) -> Option<FiveNumber> {
    if values.is_empty() {
        return None;
    }
    Some(FiveNumber {
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        q1: quantile(values, 0.25)?,
        median: quantile(values, 0.5)?,
        q3: quantile(values, 0.75)?,
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;

    #[test]
    fn mean_excludes_missing_and_matches_hand_computation() {
        let csv = "\
age,bmi,children,smoker,region,charges
19,27.9,0,yes,southwest,100.0
18,33.7,1,no,southeast,bad
28,33.0,3,no,southeast,500.0
";
        let ds = read_csv(csv.as_bytes()).unwrap();
        let s = summarize(&ds);
        // charges: (100 + 500) / 2, the unparseable row excluded entirely
        assert_eq!(s.mean_charges, Some(300.0));
        assert_eq!(s.mean_age, Some((19.0 + 18.0 + 28.0) / 3.0));
    }

    #[test]
    fn mean_of_empty_is_unavailable() {
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let v = [1.0, 2.0, 3.0, 4.0];
        // pos = 0.75 * 3 = 2.25 → 3 + 0.25 * (4 - 3)
        assert_eq!(quantile(&v, 0.75), Some(3.25));
        assert_eq!(quantile(&v, 0.0), Some(1.0));
        assert_eq!(quantile(&v, 1.0), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn quantile_ignores_input_order() {
        let v = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(quantile(&v, 0.5), Some(2.5));
    }

    #[test]
    fn pearson_perfect_correlation() {
        let xs: Vec<Option<f64>> = vec![Some(1.0), Some(2.0), Some(3.0)];
        let ys: Vec<Option<f64>> = vec![Some(2.0), Some(4.0), Some(6.0)];
        let r = pearson(&xs, &ys).unwrap();
        assert!((r - 1.0).abs() < 1e-12);

        let neg: Vec<Option<f64>> = vec![Some(6.0), Some(4.0), Some(2.0)];
        let r = pearson(&xs, &neg).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_skips_incomplete_pairs() {
        let xs: Vec<Option<f64>> = vec![Some(1.0), None, Some(2.0), Some(3.0)];
        let ys: Vec<Option<f64>> = vec![Some(2.0), Some(9.0), Some(4.0), None];
        // Only (1,2) and (2,4) remain, a perfect line.
        let r = pearson(&xs, &ys).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_undefined_for_zero_variance() {
        let xs: Vec<Option<f64>> = vec![Some(5.0), Some(5.0), Some(5.0)];
        let ys: Vec<Option<f64>> = vec![Some(1.0), Some(2.0), Some(3.0)];
        assert_eq!(pearson(&xs, &ys), None);
    }

    #[test]
    fn five_number_summary() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        let f = five_number(&v).unwrap();
        assert_eq!(f.min, 1.0);
        assert_eq!(f.median, 3.0);
        assert_eq!(f.max, 5.0);
        assert_eq!(f.q1, 2.0);
        assert_eq!(f.q3, 4.0);
        assert_eq!(five_number(&[]), None);
    }
}
