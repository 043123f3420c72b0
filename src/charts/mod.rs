//! Chart builders: pure functions from `(dataset, optional filter)` to
//! renderer-agnostic spec structs.  The UI layer turns these into egui_plot
//! items; nothing here touches the screen.

use crate::data::filter::region_indices;
use crate::data::model::{Dataset, Record, Smoker};
use crate::stats::{self, FiveNumber};

/// The numeric columns, in display order.
const NUMERIC_COLUMNS: [(&str, fn(&Record) -> Option<f64>); 4] = [
    ("age", |r| r.age),
    ("bmi", |r| r.bmi),
    ("children", |r| r.children.map(|c| c as f64)),
    ("charges", |r| r.charges),
];

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Symmetric Pearson correlation matrix, row-major.  Undefined cells are
/// stored as NaN and rendered as a dash.
#[derive(Debug, Clone)]
pub struct HeatmapSpec {
    pub labels: Vec<String>,
    values: Vec<f64>,
}

impl HeatmapSpec {
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.labels.len() + col]
    }
}

/// Correlate every pair of numeric columns.  Columns with no present values
/// are dropped; `None` when nothing numeric survives.
pub fn correlation_heatmap(dataset: &Dataset) -> Option<HeatmapSpec> {
    let columns: Vec<(&str, Vec<Option<f64>>)> = NUMERIC_COLUMNS
        .iter()
        .map(|(label, field)| {
            let values: Vec<Option<f64>> = dataset.records.iter().map(field).collect();
            (*label, values)
        })
        .filter(|(_, values)| values.iter().any(|v| v.is_some()))
        .collect();

    if columns.is_empty() {
        return None;
    }

    let n = columns.len();
    let mut values = vec![f64::NAN; n * n];
    for i in 0..n {
        values[i * n + i] = 1.0;
        for j in (i + 1)..n {
            let r = stats::pearson(&columns[i].1, &columns[j].1).unwrap_or(f64::NAN);
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }

    Some(HeatmapSpec {
        labels: columns.iter().map(|(l, _)| l.to_string()).collect(),
        values,
    })
}

// ---------------------------------------------------------------------------
// Age / charges scatter (size = BMI, color = smoker)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SmokerPoint {
    pub x: f64,
    pub y: f64,
    /// Raw size-encoding value (BMI).
    pub size: f64,
    pub smoker: Smoker,
    /// Hover label.
    pub region: String,
}

#[derive(Debug, Clone)]
pub struct ScatterSpec {
    pub points: Vec<SmokerPoint>,
    pub size_min: f64,
    pub size_max: f64,
}

impl ScatterSpec {
    /// Normalise a raw size value into `[0, 1]` for radius mapping.
    pub fn size_t(&self, size: f64) -> f64 {
        let range = self.size_max - self.size_min;
        if range <= f64::EPSILON {
            0.5
        } else {
            ((size - self.size_min) / range).clamp(0.0, 1.0)
        }
    }
}

/// Full dataset, no filter.  Rows missing any encoded value are skipped,
/// matching how the plotting stack treats NaN sizes.
pub fn age_charges_scatter(dataset: &Dataset) -> ScatterSpec {
    let points: Vec<SmokerPoint> = dataset
        .records
        .iter()
        .filter_map(|r| {
            Some(SmokerPoint {
                x: r.age?,
                y: r.charges?,
                size: r.bmi?,
                smoker: r.smoker,
                region: r.region.clone(),
            })
        })
        .collect();

    let size_min = points.iter().map(|p| p.size).fold(f64::INFINITY, f64::min);
    let size_max = points
        .iter()
        .map(|p| p.size)
        .fold(f64::NEG_INFINITY, f64::max);
    ScatterSpec {
        points,
        size_min,
        size_max,
    }
}

// ---------------------------------------------------------------------------
// Smoker vs non-smoker mean charges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BarSpec {
    /// One entry per subset with a defined mean; an empty subset's bar is
    /// omitted rather than drawn as zero.
    pub bars: Vec<(Smoker, f64)>,
}

pub fn smoker_bars(dataset: &Dataset) -> BarSpec {
    let mut bars = Vec::new();
    for smoker in [Smoker::Yes, Smoker::No] {
        let mean = stats::mean(
            dataset
                .records
                .iter()
                .filter(|r| r.smoker == smoker)
                .filter_map(|r| r.charges),
        );
        if let Some(m) = mean {
            bars.push((smoker, m));
        }
    }
    BarSpec { bars }
}

// ---------------------------------------------------------------------------
// Region box plot (the one interactive chart)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BoxGroup {
    pub smoker: Smoker,
    pub summary: FiveNumber,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct BoxSpec {
    pub region: Option<String>,
    /// Empty when the selected region has no rows (or no charges).
    pub groups: Vec<BoxGroup>,
}

/// Charges by smoker status within one region.  The region value comes from
/// the selector; `None` (no regions in the data) renders empty.
pub fn region_box(dataset: &Dataset, region: Option<&str>) -> BoxSpec {
    let Some(region) = region else {
        return BoxSpec {
            region: None,
            groups: Vec::new(),
        };
    };

    let indices = region_indices(dataset, region);
    let mut groups = Vec::new();
    for smoker in [Smoker::Yes, Smoker::No] {
        let charges: Vec<f64> = indices
            .iter()
            .map(|&i| &dataset.records[i])
            .filter(|r| r.smoker == smoker)
            .filter_map(|r| r.charges)
            .collect();
        if let Some(summary) = stats::five_number(&charges) {
            groups.push(BoxGroup {
                smoker,
                summary,
                count: charges.len(),
            });
        }
    }

    BoxSpec {
        region: Some(region.to_string()),
        groups,
    }
}

// ---------------------------------------------------------------------------
// BMI / charges scatter (color and size = age)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GradientPoint {
    pub x: f64,
    pub y: f64,
    /// Continuous color/size value (age).
    pub value: f64,
    pub region: String,
}

#[derive(Debug, Clone)]
pub struct GradientScatterSpec {
    pub points: Vec<GradientPoint>,
    pub value_min: f64,
    pub value_max: f64,
}

impl GradientScatterSpec {
    /// Normalise a value into `[0, 1]` for the continuous scale.
    pub fn value_t(&self, value: f64) -> f64 {
        let range = self.value_max - self.value_min;
        if range <= f64::EPSILON {
            0.5
        } else {
            ((value - self.value_min) / range).clamp(0.0, 1.0)
        }
    }
}

pub fn bmi_charges_scatter(dataset: &Dataset) -> GradientScatterSpec {
    let points: Vec<GradientPoint> = dataset
        .records
        .iter()
        .filter_map(|r| {
            Some(GradientPoint {
                x: r.bmi?,
                y: r.charges?,
                value: r.age?,
                region: r.region.clone(),
            })
        })
        .collect();

    let value_min = points
        .iter()
        .map(|p| p.value)
        .fold(f64::INFINITY, f64::min);
    let value_max = points
        .iter()
        .map(|p| p.value)
        .fold(f64::NEG_INFINITY, f64::max);
    GradientScatterSpec {
        points,
        value_min,
        value_max,
    }
}

// ---------------------------------------------------------------------------
// High-cost profile scatter matrix
// ---------------------------------------------------------------------------

pub const MATRIX_DIMENSIONS: [&str; 4] = ["age", "bmi", "children", "charges"];

#[derive(Debug, Clone)]
pub struct MatrixRow {
    /// Values in `MATRIX_DIMENSIONS` order; missing cells are simply not
    /// plotted in the panes that need them.
    pub values: [Option<f64>; 4],
    pub smoker: Smoker,
}

#[derive(Debug, Clone)]
pub struct MatrixSpec {
    /// 75th percentile of charges over the FULL dataset.  Independent of the
    /// region selection; `None` when no charges exist at all.
    pub threshold: Option<f64>,
    pub rows: Vec<MatrixRow>,
}

/// Profile of the beneficiaries whose charges exceed the 75th percentile.
pub fn high_cost_matrix(dataset: &Dataset) -> MatrixSpec {
    let charges: Vec<f64> = dataset.present(|r| r.charges).collect();
    let Some(threshold) = stats::quantile(&charges, 0.75) else {
        return MatrixSpec {
            threshold: None,
            rows: Vec::new(),
        };
    };

    let rows: Vec<MatrixRow> = dataset
        .records
        .iter()
        .filter(|r| r.charges.is_some_and(|c| c > threshold))
        .map(|r| MatrixRow {
            values: [r.age, r.bmi, r.children.map(|c| c as f64), r.charges],
            smoker: r.smoker,
        })
        .collect();

    MatrixSpec {
        threshold: Some(threshold),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use crate::stats;

    fn rec(age: f64, bmi: f64, smoker: Smoker, region: &str, charges: f64) -> Record {
        Record {
            age: Some(age),
            sex: None,
            bmi: Some(bmi),
            children: Some(1),
            smoker,
            region: region.to_string(),
            charges: Some(charges),
        }
    }

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            rec(19.0, 27.9, Smoker::Yes, "southwest", 30000.0),
            rec(18.0, 33.7, Smoker::No, "southeast", 8000.0),
            rec(28.0, 33.0, Smoker::No, "southeast", 8000.0),
            rec(33.0, 22.7, Smoker::Yes, "northwest", 30000.0),
        ])
    }

    #[test]
    fn heatmap_is_symmetric_with_unit_diagonal() {
        let spec = correlation_heatmap(&sample()).unwrap();
        let n = spec.size();
        assert_eq!(n, 4);
        for i in 0..n {
            assert_eq!(spec.value(i, i), 1.0);
            for j in 0..n {
                let a = spec.value(i, j);
                let b = spec.value(j, i);
                assert!(a == b || (a.is_nan() && b.is_nan()));
            }
        }
    }

    #[test]
    fn heatmap_skipped_when_everything_is_missing() {
        let ds = Dataset::from_records(vec![Record {
            age: None,
            sex: None,
            bmi: None,
            children: None,
            smoker: Smoker::No,
            region: "southwest".to_string(),
            charges: None,
        }]);
        assert!(correlation_heatmap(&ds).is_none());
    }

    #[test]
    fn bar_means_are_exact() {
        let spec = smoker_bars(&sample());
        assert_eq!(
            spec.bars,
            vec![(Smoker::Yes, 30000.0), (Smoker::No, 8000.0)]
        );
    }

    #[test]
    fn empty_smoker_subset_omits_its_bar() {
        let ds = Dataset::from_records(vec![
            rec(19.0, 27.9, Smoker::No, "southwest", 8000.0),
            rec(28.0, 33.0, Smoker::No, "southeast", 8000.0),
        ]);
        let spec = smoker_bars(&ds);
        assert_eq!(spec.bars, vec![(Smoker::No, 8000.0)]);
    }

    #[test]
    fn box_plot_of_absent_region_is_empty() {
        let spec = region_box(&sample(), Some("atlantis"));
        assert!(spec.groups.is_empty());
        let spec = region_box(&sample(), None);
        assert!(spec.groups.is_empty());
    }

    #[test]
    fn box_plot_groups_by_smoker_within_region() {
        let spec = region_box(&sample(), Some("southeast"));
        assert_eq!(spec.groups.len(), 1);
        let group = &spec.groups[0];
        assert_eq!(group.smoker, Smoker::No);
        assert_eq!(group.count, 2);
        assert_eq!(group.summary.median, 8000.0);
    }

    #[test]
    fn high_cost_threshold_uses_the_full_dataset() {
        let ds = sample();
        let all_charges: Vec<f64> = ds.present(|r| r.charges).collect();
        let expected = stats::quantile(&all_charges, 0.75).unwrap();

        let spec = high_cost_matrix(&ds);
        assert_eq!(spec.threshold, Some(expected));
        // Every kept row is strictly above the threshold.
        for row in &spec.rows {
            assert!(row.values[3].unwrap() > expected);
        }
        // The threshold does not move when a region filter is applied
        // elsewhere; the builder only ever sees the full table.
        assert_eq!(high_cost_matrix(&ds).threshold, spec.threshold);
    }

    #[test]
    fn scatter_skips_rows_with_missing_encodings() {
        let mut records = sample().records;
        records.push(Record {
            age: Some(40.0),
            sex: None,
            bmi: None,
            children: Some(0),
            smoker: Smoker::No,
            region: "southwest".to_string(),
            charges: Some(1234.0),
        });
        let ds = Dataset::from_records(records);
        let spec = age_charges_scatter(&ds);
        assert_eq!(spec.points.len(), 4);
    }
}
