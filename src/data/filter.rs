use std::collections::BTreeSet;

use super::model::{Record, SurveyTable};

// ---------------------------------------------------------------------------
// Selection: the three user choices driving one pipeline run
// ---------------------------------------------------------------------------

/// What the user has picked in the side panel.
///
/// Unlike a "show everything" default, an empty subgroup or time period set
/// selects nothing: that is the normal state before the user has chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub group: Option<String>,
    pub subgroups: BTreeSet<String>,
    pub time_periods: BTreeSet<String>,
}

impl Selection {
    /// Whether `record` satisfies all three clauses. Missing cells never match.
    pub fn matches(&self, record: &Record) -> bool {
        let Some(group) = &self.group else {
            return false;
        };
        record.group.as_ref() == Some(group)
            && record
                .subgroup
                .as_ref()
                .is_some_and(|s| self.subgroups.contains(s))
            && record
                .time_period
                .as_ref()
                .is_some_and(|t| self.time_periods.contains(t))
    }
}

// ---------------------------------------------------------------------------
// Option lists for the selection widgets
// ---------------------------------------------------------------------------

/// All distinct groups, sorted.
pub fn distinct_groups(table: &SurveyTable) -> Vec<String> {
    table.distinct_by(|r| r.group.as_ref(), |_| true)
}

/// Distinct subgroups occurring under `group`, sorted.
pub fn distinct_subgroups(table: &SurveyTable, group: &str) -> Vec<String> {
    table.distinct_by(
        |r| r.subgroup.as_ref(),
        |r| r.group.as_deref() == Some(group),
    )
}

/// Distinct time period labels across the whole table, sorted.
///
/// Not restricted to a group: survey waves are shared by all groups.
pub fn distinct_time_periods(table: &SurveyTable) -> Vec<String> {
    table.distinct_by(|r| r.time_period.as_ref(), |_| true)
}

// ---------------------------------------------------------------------------
// FilteredView
// ---------------------------------------------------------------------------

/// Rows of a [`SurveyTable`] passing a [`Selection`], in table order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilteredView<'a> {
    records: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Apply `selection` to `table`.
pub fn filter<'a>(table: &'a SurveyTable, selection: &Selection) -> FilteredView<'a> {
    FilteredView {
        records: table
            .records()
            .iter()
            .filter(|r| selection.matches(r))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> SurveyTable {
        SurveyTable::from_records(vec![
            Record::new("By State", "California", "Phase 1", 20.0),
            Record::new("By State", "California", "Phase 2", 25.0),
            Record::new("By State", "Texas", "Phase 1", 15.0),
        ])
    }

    fn selection(group: &str, subgroups: &[&str], periods: &[&str]) -> Selection {
        Selection {
            group: Some(group.to_string()),
            subgroups: subgroups.iter().map(|s| s.to_string()).collect(),
            time_periods: periods.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_filter_keeps_only_selected_subgroup() {
        let table = sample_table();
        let view = filter(
            &table,
            &selection("By State", &["California"], &["Phase 1", "Phase 2"]),
        );
        assert_eq!(view.len(), 2);
        assert!(view
            .records()
            .iter()
            .all(|r| r.subgroup.as_deref() == Some("California")));
    }

    #[test]
    fn test_filter_empty_subgroups_yields_empty_view() {
        let table = sample_table();
        let view = filter(&table, &selection("By State", &[], &["Phase 1", "Phase 2"]));
        assert!(view.is_empty());
    }

    #[test]
    fn test_filter_empty_time_periods_yields_empty_view() {
        let table = sample_table();
        let view = filter(&table, &selection("By State", &["Texas"], &[]));
        assert!(view.is_empty());
    }

    #[test]
    fn test_filter_unknown_group_yields_empty_view() {
        let table = sample_table();
        let view = filter(
            &table,
            &selection("By Planet", &["California", "Texas"], &["Phase 1", "Phase 2"]),
        );
        assert!(view.is_empty());
    }

    #[test]
    fn test_filter_without_group_yields_empty_view() {
        let table = sample_table();
        let mut sel = selection("By State", &["Texas"], &["Phase 1"]);
        sel.group = None;
        assert!(filter(&table, &sel).is_empty());
    }

    #[test]
    fn test_filter_never_matches_missing_subgroup() {
        let mut orphan = Record::new("By State", "", "Phase 1", 30.0);
        orphan.subgroup = None;
        let table = SurveyTable::from_records(vec![
            orphan,
            Record::new("By State", "Texas", "Phase 1", 15.0),
        ]);
        let all_subs = distinct_subgroups(&table, "By State");
        let sel = Selection {
            group: Some("By State".to_string()),
            subgroups: all_subs.into_iter().collect(),
            time_periods: distinct_time_periods(&table).into_iter().collect(),
        };
        let view = filter(&table, &sel);
        assert_eq!(view.len(), 1);
        assert!(view.records().iter().all(|r| r.subgroup.is_some()));
    }

    #[test]
    fn test_filter_never_matches_missing_group_or_time_period() {
        let mut no_group = Record::new("By State", "Texas", "Phase 1", 30.0);
        no_group.group = None;
        let mut no_period = Record::new("By State", "Texas", "Phase 1", 40.0);
        no_period.time_period = None;
        let table = SurveyTable::from_records(vec![
            no_group,
            no_period,
            Record::new("By State", "Texas", "Phase 1", 15.0),
        ]);

        let view = filter(&table, &selection("By State", &["Texas"], &["Phase 1"]));
        assert_eq!(view.len(), 1);
        assert_eq!(view.records()[0].value, Some(15.0));
    }

    #[test]
    fn test_distinct_groups_and_time_periods_skip_missing() {
        let mut no_group = Record::new("By Sex", "Male", "Phase 2", 9.0);
        no_group.group = None;
        let mut no_period = Record::new("By Age", "18 - 29", "Phase 3", 11.0);
        no_period.time_period = None;
        let table = SurveyTable::from_records(vec![
            no_group,
            no_period,
            Record::new("By State", "Texas", "Phase 1", 15.0),
        ]);

        assert_eq!(distinct_groups(&table), vec!["By Age", "By State"]);
        assert_eq!(distinct_time_periods(&table), vec!["Phase 1", "Phase 2"]);
    }

    #[test]
    fn test_filter_is_idempotent_and_preserves_order() {
        let table = sample_table();
        let sel = selection("By State", &["Texas", "California"], &["Phase 1"]);
        let first = filter(&table, &sel);
        let second = filter(&table, &sel);
        assert_eq!(first, second);
        assert_eq!(first.records()[0].subgroup.as_deref(), Some("California"));
        assert_eq!(first.records()[1].subgroup.as_deref(), Some("Texas"));
    }

    #[test]
    fn test_distinct_time_periods_sorted() {
        let table = sample_table();
        assert_eq!(distinct_time_periods(&table), vec!["Phase 1", "Phase 2"]);
    }

    #[test]
    fn test_distinct_groups_sorted_and_unique() {
        let table = SurveyTable::from_records(vec![
            Record::new("By State", "Texas", "Phase 1", 15.0),
            Record::new("By Sex", "Male", "Phase 1", 9.0),
            Record::new("By State", "Ohio", "Phase 1", 11.0),
        ]);
        assert_eq!(distinct_groups(&table), vec!["By Sex", "By State"]);
    }

    #[test]
    fn test_distinct_subgroups_restricted_to_group() {
        let table = SurveyTable::from_records(vec![
            Record::new("By State", "Texas", "Phase 1", 15.0),
            Record::new("By Sex", "Male", "Phase 1", 9.0),
            Record::new("By State", "Alabama", "Phase 2", 11.0),
            Record::new("By State", "Texas", "Phase 2", 16.0),
        ]);
        assert_eq!(
            distinct_subgroups(&table, "By State"),
            vec!["Alabama", "Texas"]
        );
        assert!(distinct_subgroups(&table, "By Age").is_empty());
    }
}
