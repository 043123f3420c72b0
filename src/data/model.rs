use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Smoker – boolean-like categorical, "yes" / "no"
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Smoker {
    Yes,
    No,
}

impl Smoker {
    /// Parse the CSV/JSON encoding, case-insensitively.
    pub fn parse(s: &str) -> Option<Smoker> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(Smoker::Yes),
            "no" => Some(Smoker::No),
            _ => None,
        }
    }
}

impl fmt::Display for Smoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Smoker::Yes => write!(f, "yes"),
            Smoker::No => write!(f, "no"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset (one insured individual)
// ---------------------------------------------------------------------------

/// A single insurance record. The numeric fields are optional: unparseable
/// source values are stored as missing, not rejected.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub age: Option<f64>,
    /// Present in the source files but not used by any chart.
    pub sex: Option<String>,
    pub bmi: Option<f64>,
    pub children: Option<i64>,
    pub smoker: Smoker,
    pub region: String,
    pub charges: Option<f64>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Read-only for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records (rows).
    pub records: Vec<Record>,
    /// Distinct region values in first-encountered order. Drives the region
    /// selector choices and its default selection.
    pub regions: Vec<String>,
}

impl Dataset {
    /// Build the region index from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut regions: Vec<String> = Vec::new();
        for rec in &records {
            if !regions.contains(&rec.region) {
                regions.push(rec.region.clone());
            }
        }
        Dataset { records, regions }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterator over the non-missing values of one numeric field.
    pub fn present<'a, F>(&'a self, field: F) -> impl Iterator<Item = f64> + 'a
    where
        F: Fn(&Record) -> Option<f64> + 'a,
    {
        self.records.iter().filter_map(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(region: &str) -> Record {
        Record {
            age: Some(30.0),
            sex: None,
            bmi: Some(25.0),
            children: Some(0),
            smoker: Smoker::No,
            region: region.to_string(),
            charges: Some(1000.0),
        }
    }

    #[test]
    fn regions_keep_first_encountered_order() {
        let ds = Dataset::from_records(vec![
            rec("southwest"),
            rec("northeast"),
            rec("southwest"),
            rec("northwest"),
        ]);
        assert_eq!(ds.regions, vec!["southwest", "northeast", "northwest"]);
    }

    #[test]
    fn smoker_parse_is_case_insensitive() {
        assert_eq!(Smoker::parse("Yes"), Some(Smoker::Yes));
        assert_eq!(Smoker::parse(" NO "), Some(Smoker::No));
        assert_eq!(Smoker::parse("maybe"), None);
    }
}
