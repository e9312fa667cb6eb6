use std::collections::BTreeSet;

use serde::Deserialize;

/// Column names exactly as they appear in the survey export.
pub const GROUP_COLUMN: &str = "Group";
pub const SUBGROUP_COLUMN: &str = "Subgroup";
pub const TIME_PERIOD_COLUMN: &str = "Time Period Label";
pub const VALUE_COLUMN: &str = "Value";

/// Every column a loaded table must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    GROUP_COLUMN,
    SUBGROUP_COLUMN,
    TIME_PERIOD_COLUMN,
    VALUE_COLUMN,
];

// ---------------------------------------------------------------------------
// Record – one row of the survey table
// ---------------------------------------------------------------------------

/// A single survey row. `None` marks a missing cell; missing categorical
/// cells never match any filter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "Group")]
    pub group: Option<String>,
    #[serde(rename = "Subgroup")]
    pub subgroup: Option<String>,
    #[serde(rename = "Time Period Label")]
    pub time_period: Option<String>,
    /// Percentage of adults receiving care. Not range-checked.
    #[serde(rename = "Value")]
    pub value: Option<f64>,
}

impl Record {
    /// Convenience constructor for fully populated rows.
    #[cfg(test)]
    pub fn new(group: &str, subgroup: &str, time_period: &str, value: f64) -> Self {
        Record {
            group: Some(group.to_string()),
            subgroup: Some(subgroup.to_string()),
            time_period: Some(time_period.to_string()),
            value: Some(value),
        }
    }
}

// ---------------------------------------------------------------------------
// SurveyTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full survey, loaded once and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyTable {
    records: Vec<Record>,
}

impl SurveyTable {
    pub fn from_records(records: Vec<Record>) -> Self {
        SurveyTable { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows whose Value cell is missing.
    pub fn missing_value_count(&self) -> usize {
        self.records.iter().filter(|r| r.value.is_none()).count()
    }

    /// Sorted distinct non-missing values of one categorical field over the
    /// rows accepted by `keep`.
    pub(crate) fn distinct_by<'a, F, P>(&'a self, field: F, keep: P) -> Vec<String>
    where
        F: Fn(&'a Record) -> Option<&'a String>,
        P: Fn(&Record) -> bool,
    {
        self.records
            .iter()
            .filter(|r| keep(*r))
            .filter_map(field)
            .collect::<BTreeSet<&String>>()
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new_populates_all_fields() {
        let r = Record::new("By State", "Texas", "Phase 1", 15.0);
        assert_eq!(r.group.as_deref(), Some("By State"));
        assert_eq!(r.subgroup.as_deref(), Some("Texas"));
        assert_eq!(r.time_period.as_deref(), Some("Phase 1"));
        assert_eq!(r.value, Some(15.0));
    }

    #[test]
    fn test_distinct_by_skips_missing_and_sorts() {
        let mut missing = Record::new("By Sex", "Male", "Phase 1", 9.0);
        missing.subgroup = None;
        let table = SurveyTable::from_records(vec![
            Record::new("By Sex", "Male", "Phase 1", 9.0),
            Record::new("By Sex", "Female", "Phase 1", 12.0),
            missing,
        ]);
        let subs = table.distinct_by(|r| r.subgroup.as_ref(), |_| true);
        assert_eq!(subs, vec!["Female".to_string(), "Male".to_string()]);
    }

    #[test]
    fn test_missing_value_count() {
        let mut blank = Record::new("By Sex", "Female", "Phase 2", 0.0);
        blank.value = None;
        let table = SurveyTable::from_records(vec![
            Record::new("By Sex", "Female", "Phase 1", 12.0),
            blank,
        ]);
        assert_eq!(table.missing_value_count(), 1);
    }

    #[test]
    fn test_empty_table() {
        let table = SurveyTable::default();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }
}
