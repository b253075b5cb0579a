use std::collections::HashSet;

use crate::record::ServiceRecord;
use crate::view::state::ViewState;

/// Everything the templates need, derived from the records and the view state
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    /// Distinct non-empty facilities, in first-seen order
    pub facilities: Vec<String>,
    /// Records matching the selections, oldest first
    pub sorted: Vec<ServiceRecord>,
    pub total: f64,
}

/// Distinct non-empty facility names in first-seen order
pub fn facilities(records: &[ServiceRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|r| r.facility.as_deref())
        .filter(|f| !f.is_empty())
        .filter(|f| seen.insert(*f))
        .map(str::to_string)
        .collect()
}

/// Turn a month picker value (`2024-05`) into the history's date prefix (`2024/05`)
pub fn month_prefix(selected_month: &str) -> String {
    selected_month.replace('-', "/")
}

/// Month prefix match plus exact facility match (empty facility matches all)
pub fn matches(record: &ServiceRecord, month_prefix: &str, facility: &str) -> bool {
    let in_month = record.date_key().starts_with(month_prefix);
    let at_facility = facility.is_empty() || record.facility.as_deref() == Some(facility);
    in_month && at_facility
}

/// Filter, sort by date and total the records for the given view state
pub fn derive(records: &[ServiceRecord], state: &ViewState) -> DerivedView {
    let prefix = month_prefix(&state.selected_month);

    let mut sorted: Vec<ServiceRecord> = records
        .iter()
        .filter(|r| matches(r, &prefix, &state.selected_facility))
        .cloned()
        .collect();
    // stable: same-day records keep history order
    sorted.sort_by_key(|r| r.date);

    let total: f64 = sorted.iter().map(|r| r.price).sum();

    tracing::debug!(
        month = %state.selected_month,
        facility = %state.selected_facility,
        matched = sorted.len(),
        total,
        "derived view"
    );

    DerivedView {
        facilities: facilities(records),
        sorted,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::record;
    use chrono::NaiveDate;

    fn scenario() -> Vec<ServiceRecord> {
        vec![
            record("2024/05/10", "A", "Sato", 1000.0),
            record("2024/05/02", "B", "Ito", 500.0),
            record("2024/06/01", "A", "Kato", 700.0),
        ]
    }

    fn state(month: &str, facility: &str) -> ViewState {
        ViewState {
            selected_month: month.to_string(),
            selected_facility: facility.to_string(),
            ..ViewState::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        }
    }

    fn dates(view: &DerivedView) -> Vec<String> {
        view.sorted.iter().map(ServiceRecord::date_key).collect()
    }

    #[test]
    fn month_filter_sorts_and_totals() {
        let view = derive(&scenario(), &state("2024-05", ""));
        assert_eq!(dates(&view), ["2024/05/02", "2024/05/10"]);
        assert_eq!(view.total, 1500.0);
    }

    #[test]
    fn facility_filter_is_exact() {
        let view = derive(&scenario(), &state("2024-05", "A"));
        assert_eq!(dates(&view), ["2024/05/10"]);
        assert_eq!(view.total, 1000.0);

        let view = derive(&scenario(), &state("2024-05", "a"));
        assert!(view.sorted.is_empty());
    }

    #[test]
    fn facilities_are_distinct_in_first_seen_order() {
        let mut records = scenario();
        records.push(record("2024/05/03", "", "Mori", 100.0));
        records.push(record("2024/05/04", "C", "Abe", 100.0));
        records.push(record("2024/05/05", "B", "Ueno", 100.0));

        assert_eq!(facilities(&records), ["A", "B", "C"]);
        // facility list ignores the current selections
        assert_eq!(derive(&records, &state("1999-01", "Z")).facilities, ["A", "B", "C"]);
    }

    #[test]
    fn filter_is_sound_and_complete() {
        let records = scenario();
        for (month, facility) in [("2024-05", ""), ("2024-05", "B"), ("2024-06", "A"), ("2024", "")] {
            let view = derive(&records, &state(month, facility));
            let prefix = month_prefix(month);
            assert!(view.sorted.iter().all(|r| matches(r, &prefix, facility)));
            let expected = records.iter().filter(|r| matches(r, &prefix, facility)).count();
            assert_eq!(view.sorted.len(), expected);
        }
    }

    #[test]
    fn sorted_is_non_decreasing_and_stable() {
        let records = vec![
            record("2024/05/20", "A", "first", 1.0),
            record("2024/05/01", "A", "early", 1.0),
            record("2024/05/20", "A", "second", 1.0),
        ];
        let view = derive(&records, &state("2024-05", ""));
        assert!(view.sorted.windows(2).all(|w| w[0].date_key() <= w[1].date_key()));
        let names: Vec<_> = view.sorted.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["early", "first", "second"]);
    }

    #[test]
    fn malformed_month_matches_nothing() {
        for month in ["May 2024", "2024/13", "05-2024"] {
            assert!(derive(&scenario(), &state(month, "")).sorted.is_empty());
        }
    }

    #[test]
    fn empty_input_totals_zero() {
        let view = derive(&[], &state("2024-05", ""));
        assert!(view.facilities.is_empty());
        assert!(view.sorted.is_empty());
        assert_eq!(view.total, 0.0);
    }
}
