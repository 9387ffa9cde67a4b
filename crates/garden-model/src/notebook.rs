//! Notebook items: notes, tasks, and recurrence rules.
//!
//! Recurring tasks form a *series*: the first-created item (the anchor)
//! keeps `series_id = None`, every later occurrence carries
//! `series_id = Some(anchor_id)`. Non-recurring items never belong to a
//! series.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Kind of notebook item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Note,
    Task,
}

/// Recurrence rule for tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Weekly,
    Biweekly,
    Fourweekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Recurrence {
    /// Step a date forward by one interval.
    ///
    /// Day-based rules add fixed day counts; month/year rules step by
    /// calendar months with end-of-month clamping (Jan 31 -> Feb 28/29).
    /// `Recurrence::None` returns the date unchanged.
    pub fn step(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Recurrence::None => date,
            Recurrence::Weekly => date.checked_add_days(Days::new(7)).unwrap_or(date),
            Recurrence::Biweekly => date.checked_add_days(Days::new(14)).unwrap_or(date),
            Recurrence::Fourweekly => date.checked_add_days(Days::new(28)).unwrap_or(date),
            Recurrence::Monthly => date.checked_add_months(Months::new(1)).unwrap_or(date),
            Recurrence::Quarterly => date.checked_add_months(Months::new(3)).unwrap_or(date),
            Recurrence::Yearly => date.checked_add_months(Months::new(12)).unwrap_or(date),
        }
    }

    /// Whether this rule produces a series at all.
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }
}

impl std::str::FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Recurrence::None),
            "weekly" => Ok(Recurrence::Weekly),
            "biweekly" => Ok(Recurrence::Biweekly),
            "fourweekly" => Ok(Recurrence::Fourweekly),
            "monthly" => Ok(Recurrence::Monthly),
            "quarterly" => Ok(Recurrence::Quarterly),
            "yearly" => Ok(Recurrence::Yearly),
            other => Err(format!(
                "Unknown recurrence: {other}. Use: none, weekly, biweekly, fourweekly, monthly, quarterly, yearly"
            )),
        }
    }
}

/// A single notebook timeline item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Unique item identifier.
    pub id: String,

    /// Note or task.
    pub kind: ItemKind,

    /// Title (required for persistence; empty titles are rejected upstream).
    pub title: String,

    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Item date.
    pub date: NaiveDate,

    /// Optional attached photo path (relative to the garden root).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_path: Option<String>,

    /// Completion flag (tasks only; notes stay false).
    #[serde(default)]
    pub done: bool,

    /// Recurrence rule (tasks only).
    #[serde(default)]
    pub recurrence: Recurrence,

    /// Series linkage: `Some(anchor_id)` for generated occurrences,
    /// `None` for the anchor itself and for non-recurring items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,
}

impl TimelineItem {
    /// Whether this item participates in a recurring series.
    pub fn is_recurring(&self) -> bool {
        self.kind == ItemKind::Task && self.recurrence.is_recurring()
    }

    /// The identity of the series this item belongs to: the anchor's id.
    pub fn series_key(&self) -> &str {
        self.series_id.as_deref().unwrap_or(&self.id)
    }
}

/// The notebook store (`meta/notebook.json`).
///
/// The recurrence engine never touches this directly; it returns item
/// arrays and callers persist them through these methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    /// Schema version.
    pub version: String,

    /// All items, unordered on disk.
    pub items: Vec<TimelineItem>,
}

impl Notebook {
    pub fn new() -> Self {
        Self {
            version: "1.0".to_string(),
            items: vec![],
        }
    }

    /// Append a batch of items (e.g. a freshly generated series).
    pub fn add_items(&mut self, items: Vec<TimelineItem>) {
        self.items.extend(items);
    }

    /// Replace an item in place by id. Returns `false` if the id is unknown.
    pub fn update_item(&mut self, item: TimelineItem) -> bool {
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove all items whose id appears in `ids`. Returns removed count.
    pub fn delete_items(&mut self, ids: &[String]) -> usize {
        let before = self.items.len();
        self.items.retain(|i| !ids.contains(&i.id));
        before - self.items.len()
    }

    /// Find an item by id.
    pub fn find(&self, id: &str) -> Option<&TimelineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items within an inclusive date window, sorted by date then title.
    pub fn window(&self, from: NaiveDate, to: NaiveDate) -> Vec<&TimelineItem> {
        let mut items: Vec<_> = self
            .items
            .iter()
            .filter(|i| i.date >= from && i.date <= to)
            .collect();
        items.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));
        items
    }
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_day_based_steps() {
        assert_eq!(Recurrence::Weekly.step(d(2024, 3, 1)), d(2024, 3, 8));
        assert_eq!(Recurrence::Biweekly.step(d(2024, 3, 1)), d(2024, 3, 15));
        assert_eq!(Recurrence::Fourweekly.step(d(2024, 3, 1)), d(2024, 3, 29));
    }

    #[test]
    fn test_month_step_clamps_end_of_month() {
        assert_eq!(Recurrence::Monthly.step(d(2024, 1, 31)), d(2024, 2, 29));
        assert_eq!(Recurrence::Monthly.step(d(2023, 1, 31)), d(2023, 2, 28));
        assert_eq!(Recurrence::Quarterly.step(d(2024, 11, 30)), d(2025, 2, 28));
    }

    #[test]
    fn test_yearly_step_on_leap_day() {
        assert_eq!(Recurrence::Yearly.step(d(2024, 2, 29)), d(2025, 2, 28));
    }

    #[test]
    fn test_none_step_is_identity() {
        assert_eq!(Recurrence::None.step(d(2024, 6, 15)), d(2024, 6, 15));
    }

    #[test]
    fn test_notebook_update_and_delete() {
        let mut nb = Notebook::new();
        let item = TimelineItem {
            id: "t1".to_string(),
            kind: ItemKind::Task,
            title: "Water ferns".to_string(),
            description: None,
            date: d(2024, 6, 1),
            photo_path: None,
            done: false,
            recurrence: Recurrence::None,
            series_id: None,
        };
        nb.add_items(vec![item.clone()]);

        let mut edited = item.clone();
        edited.done = true;
        assert!(nb.update_item(edited));
        assert!(nb.find("t1").unwrap().done);

        assert!(!nb.update_item(TimelineItem {
            id: "missing".to_string(),
            ..item.clone()
        }));

        assert_eq!(nb.delete_items(&["t1".to_string()]), 1);
        assert!(nb.find("t1").is_none());
    }

    #[test]
    fn test_window_sorted_by_date() {
        let mut nb = Notebook::new();
        for (id, date) in [("a", d(2024, 6, 3)), ("b", d(2024, 6, 1)), ("c", d(2024, 7, 1))] {
            nb.add_items(vec![TimelineItem {
                id: id.to_string(),
                kind: ItemKind::Note,
                title: id.to_string(),
                description: None,
                date,
                photo_path: None,
                done: false,
                recurrence: Recurrence::None,
                series_id: None,
            }]);
        }
        let ids: Vec<_> = nb
            .window(d(2024, 6, 1), d(2024, 6, 30))
            .iter()
            .map(|i| i.id.clone())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    proptest! {
        #[test]
        fn step_always_moves_forward(
            days in 0u32..20_000,
            rule_idx in 0usize..6,
        ) {
            let base = d(2000, 1, 1) + chrono::Duration::days(days as i64);
            let rule = [
                Recurrence::Weekly,
                Recurrence::Biweekly,
                Recurrence::Fourweekly,
                Recurrence::Monthly,
                Recurrence::Quarterly,
                Recurrence::Yearly,
            ][rule_idx];
            prop_assert!(rule.step(base) > base);
        }
    }
}
