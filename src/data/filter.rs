use super::model::Dataset;

// ---------------------------------------------------------------------------
// Region filter – the one interactive predicate
// ---------------------------------------------------------------------------

/// Return indices of records whose region equals `region`.
///
/// The selector's choices come from `Dataset::regions`, so a selected value
/// normally matches at least one row; an unknown value simply yields an
/// empty set, which downstream charts render as empty.
pub fn region_indices(dataset: &Dataset, region: &str) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.region == region)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Record, Smoker};

    fn rec(region: &str, charges: f64) -> Record {
        Record {
            age: Some(40.0),
            sex: None,
            bmi: Some(28.0),
            children: Some(1),
            smoker: Smoker::No,
            region: region.to_string(),
            charges: Some(charges),
        }
    }

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            rec("southwest", 100.0),
            rec("northeast", 200.0),
            rec("southwest", 300.0),
            rec("northwest", 400.0),
            rec("northeast", 500.0),
        ])
    }

    #[test]
    fn filter_matches_only_the_region() {
        let ds = sample();
        let idx = region_indices(&ds, "southwest");
        assert_eq!(idx, vec![0, 2]);
        for i in idx {
            assert_eq!(ds.records[i].region, "southwest");
        }
    }

    #[test]
    fn per_region_filters_partition_the_dataset() {
        let ds = sample();
        let mut seen: Vec<usize> = ds
            .regions
            .iter()
            .flat_map(|r| region_indices(&ds, r))
            .collect();
        seen.sort_unstable();
        let all: Vec<usize> = (0..ds.len()).collect();
        assert_eq!(seen, all);
    }

    #[test]
    fn unknown_region_yields_empty_set() {
        let ds = sample();
        assert!(region_indices(&ds, "atlantis").is_empty());
    }
}
