use crate::charts::{
    self, BarSpec, BoxSpec, GradientScatterSpec, HeatmapSpec, MatrixSpec, ScatterSpec,
};
use crate::data::model::Dataset;
use crate::stats::{self, Summary};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is loaded before the UI starts and is always present; the
/// static chart specs are built once per dataset.  The only interactive
/// input is the region selection, which rebuilds the box-plot spec alone.
pub struct AppState {
    pub dataset: Dataset,
    pub summary: Summary,

    // Prebuilt chart specs (pure functions of the dataset).
    pub heatmap: Option<HeatmapSpec>,
    pub age_scatter: ScatterSpec,
    pub smoker_bars: BarSpec,
    pub bmi_scatter: GradientScatterSpec,
    pub high_cost: MatrixSpec,

    /// Currently selected region; defaults to the first distinct value.
    pub selected_region: Option<String>,
    /// The one spec rebuilt on selection change.
    pub region_box: BoxSpec,

    /// Raw-records table toggle.
    pub show_table: bool,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        let summary = stats::summarize(&dataset);
        let selected_region = dataset.regions.first().cloned();
        let region_box = charts::region_box(&dataset, selected_region.as_deref());

        Self {
            summary,
            heatmap: charts::correlation_heatmap(&dataset),
            age_scatter: charts::age_charges_scatter(&dataset),
            smoker_bars: charts::smoker_bars(&dataset),
            bmi_scatter: charts::bmi_charges_scatter(&dataset),
            high_cost: charts::high_cost_matrix(&dataset),
            selected_region,
            region_box,
            show_table: false,
            status_message: None,
            dataset,
        }
    }

    /// Replace the dataset (File → Open) and rebuild everything.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let show_table = self.show_table;
        *self = AppState::new(dataset);
        self.show_table = show_table;
    }

    /// Change the region selection and rebuild only the box-plot spec.
    pub fn set_region(&mut self, region: String) {
        if self.selected_region.as_deref() == Some(region.as_str()) {
            return;
        }
        self.region_box = charts::region_box(&self.dataset, Some(&region));
        self.selected_region = Some(region);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;

    const SAMPLE: &str = "\
age,sex,bmi,children,smoker,region,charges
19,female,27.9,0,yes,southwest,30000
18,male,33.7,1,no,southeast,8000
28,male,33.0,3,no,southeast,8000
33,male,22.7,0,yes,northwest,30000
";

    #[test]
    fn default_region_is_first_encountered() {
        let state = AppState::new(read_csv(SAMPLE.as_bytes()).unwrap());
        assert_eq!(state.selected_region.as_deref(), Some("southwest"));
        assert_eq!(state.region_box.region.as_deref(), Some("southwest"));
    }

    #[test]
    fn region_change_leaves_the_high_cost_threshold_alone() {
        let mut state = AppState::new(read_csv(SAMPLE.as_bytes()).unwrap());
        let before = state.high_cost.threshold;
        state.set_region("southeast".to_string());
        assert_eq!(state.high_cost.threshold, before);
        assert_eq!(state.region_box.region.as_deref(), Some("southeast"));
    }

    #[test]
    fn empty_dataset_has_no_selection() {
        let empty = "age,sex,bmi,children,smoker,region,charges\n";
        let state = AppState::new(read_csv(empty.as_bytes()).unwrap());
        assert_eq!(state.selected_region, None);
        assert!(state.region_box.groups.is_empty());
        assert_eq!(state.summary.mean_charges, None);
        assert!(state.heatmap.is_none());
    }
}
