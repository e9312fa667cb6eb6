use super::filter::FilteredView;

/// Mean `Value` of one subgroup within a filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub subgroup: String,
    pub mean_value: f64,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: u32,
}

/// Group `view` by subgroup and average `Value` per group.
///
/// Rows come out in order of each subgroup's first appearance in `view`.
/// Missing values contribute nothing; a subgroup left without any value is
/// dropped rather than reported as NaN.
pub fn aggregate_mean_by_subgroup(view: &FilteredView<'_>) -> Vec<AggregateRow> {
    // Vec rather than a map: keeps first-appearance order.
    let mut groups: Vec<(&str, Accumulator)> = Vec::new();
    let mut skipped = 0usize;

    for record in view.records() {
        let Some(subgroup) = record.subgroup.as_deref() else {
            continue;
        };
        let idx = match groups.iter().position(|(name, _)| *name == subgroup) {
            Some(idx) => idx,
            None => {
                groups.push((subgroup, Accumulator::default()));
                groups.len() - 1
            }
        };
        match record.value {
            Some(v) => {
                let acc = &mut groups[idx].1;
                acc.sum += v;
                acc.count += 1;
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!("{skipped} filtered rows have no Value and were left out of the averages");
    }

    groups
        .into_iter()
        .filter(|(_, acc)| acc.count > 0)
        .map(|(name, acc)| AggregateRow {
            subgroup: name.to_string(),
            mean_value: acc.sum / f64::from(acc.count),
        })
        .collect()
}
