//! Idempotent series extension.
//!
//! Series are generated a year ahead; as time passes their tails shrink.
//! `extend_all` tops up every series whose latest date has fallen more
//! than one month short of the rolling one-year horizon, generating only
//! the missing occurrences.

use chrono::{Months, NaiveDate};

use bloomlog_garden_model::notebook::TimelineItem;

use crate::series::{horizon, tail, Series};

/// Result of a reconciliation pass.
///
/// An empty `added` is a valid, expected outcome (every series already
/// reaches far enough), distinct from an error.
#[derive(Debug, Clone, Default)]
pub struct Extension {
    /// Newly generated occurrences, never duplicating existing members.
    pub added: Vec<TimelineItem>,
}

impl Extension {
    /// Number of items added across all series.
    pub fn count(&self) -> usize {
        self.added.len()
    }
}

/// Reconcile every known series against the one-year horizon.
///
/// For each series the member with the maximum date is found; if that
/// date is more than one month short of `today + 1 year`, the missing
/// tail is generated anchored at that member (so the newest edits to
/// title/description carry forward). Running this twice without time
/// advancing adds nothing the second time.
pub fn extend_all(items: &[TimelineItem], today: NaiveDate) -> Extension {
    let limit = horizon(today);
    let threshold = limit.checked_sub_months(Months::new(1)).unwrap_or(limit);

    let mut added = vec![];
    for series in Series::collect(items) {
        let latest = series.latest();
        if latest.date >= threshold {
            continue;
        }
        let new_items = tail(latest, series.id.clone(), today);
        if !new_items.is_empty() {
            tracing::debug!(
                series = %series.id,
                count = new_items.len(),
                "Extending series"
            );
        }
        added.extend(new_items);
    }

    Extension { added }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloomlog_garden_model::notebook::{ItemKind, Recurrence};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn task(id: &str, date: NaiveDate, rule: Recurrence) -> TimelineItem {
        TimelineItem {
            id: id.to_string(),
            kind: ItemKind::Task,
            title: "Prune".to_string(),
            description: None,
            date,
            photo_path: None,
            done: false,
            recurrence: rule,
            series_id: None,
        }
    }

    #[test]
    fn test_stale_series_gets_extended() {
        // Series generated six months ago: its tail ends six months short.
        let generated_on = d(2024, 1, 1);
        let items = crate::series::generate(&task("a", generated_on, Recurrence::Weekly), generated_on);

        let today = d(2024, 7, 1);
        let ext = extend_all(&items, today);

        assert!(ext.count() > 0);
        let limit = horizon(today);
        let max_existing = items.iter().map(|i| i.date).max().unwrap();
        for item in &ext.added {
            assert!(item.date > max_existing, "never regenerates existing dates");
            assert!(item.date <= limit);
            assert_eq!(item.series_id.as_deref(), Some("a"));
        }
    }

    #[test]
    fn test_fresh_series_needs_nothing() {
        let today = d(2024, 7, 1);
        let items = crate::series::generate(&task("a", today, Recurrence::Weekly), today);
        assert_eq!(extend_all(&items, today).count(), 0);
    }

    #[test]
    fn test_extend_is_idempotent() {
        let generated_on = d(2024, 1, 1);
        let mut items =
            crate::series::generate(&task("a", generated_on, Recurrence::Biweekly), generated_on);

        let today = d(2024, 9, 1);
        let first = extend_all(&items, today);
        assert!(first.count() > 0);

        items.extend(first.added);
        let second = extend_all(&items, today);
        assert_eq!(second.count(), 0);
    }

    #[test]
    fn test_yearly_series_at_horizon_left_alone() {
        let today = d(2024, 3, 1);
        let items = crate::series::generate(&task("a", today, Recurrence::Yearly), today);
        // Latest member sits exactly at the horizon; the slack test never fires.
        assert_eq!(extend_all(&items, today).count(), 0);
    }

    #[test]
    fn test_non_recurring_items_ignored() {
        let today = d(2024, 3, 1);
        let items = vec![task("solo", d(2023, 1, 1), Recurrence::None)];
        assert_eq!(extend_all(&items, today).count(), 0);
    }

    #[test]
    fn test_extension_uses_latest_member_fields() {
        let generated_on = d(2024, 1, 1);
        let mut items =
            crate::series::generate(&task("a", generated_on, Recurrence::Monthly), generated_on);

        // Rename the latest occurrence; the extension should carry it forward.
        let last_date = items.iter().map(|i| i.date).max().unwrap();
        for item in &mut items {
            if item.date == last_date {
                item.title = "Prune hard".to_string();
            }
        }

        let ext = extend_all(&items, d(2024, 10, 1));
        assert!(ext.count() > 0);
        assert!(ext.added.iter().all(|i| i.title == "Prune hard"));
    }
}
