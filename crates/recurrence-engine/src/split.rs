//! Split-on-edit and split-on-delete semantics for series.
//!
//! Editing or deleting an occurrence can affect only that occurrence, or
//! "this and all future" members. A future-scoped update is implemented
//! as delete-suffix plus regenerate, so the tail picks up every edited
//! field rather than patching one field across existing items.

use chrono::NaiveDate;

use bloomlog_garden_model::notebook::TimelineItem;

use crate::series::tail;

/// How far an edit or delete reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditScope {
    /// Only the named occurrence.
    Single,
    /// The named occurrence and every later member of its series.
    Future,
}

impl EditScope {
    /// Non-recurring items never offer a future scope.
    pub fn effective(self, item: &TimelineItem) -> EditScope {
        if item.is_recurring() {
            self
        } else {
            EditScope::Single
        }
    }
}

/// A storage delta for the caller to persist. The engine never mutates
/// the notebook itself.
#[derive(Debug, Clone, Default)]
pub struct Revision {
    /// Ids to delete.
    pub remove: Vec<String>,

    /// Items to update in place.
    pub update: Vec<TimelineItem>,

    /// Items to add.
    pub add: Vec<TimelineItem>,
}

/// Apply an edit to one occurrence or to its whole future.
///
/// `edited` is the occurrence with its new field values already set.
/// Future scope removes every series member dated at or after the
/// occurrence (anchor included, its stored record too when the edit
/// moves the date) and regenerates a fresh tail from the edited values,
/// preserving the original series identity.
pub fn split_update(
    items: &[TimelineItem],
    edited: &TimelineItem,
    scope: EditScope,
    today: NaiveDate,
) -> Revision {
    match scope.effective(edited) {
        EditScope::Single => Revision {
            update: vec![edited.clone()],
            ..Default::default()
        },
        EditScope::Future => {
            let series_id = edited.series_key().to_string();

            // The cut-off must cover the occurrence's stored date as well
            // as its edited date: an edit may move the date, and the old
            // record has to fall inside the removed range or it would
            // survive alongside the re-added item under the same id.
            let stored_date = items
                .iter()
                .find(|i| i.id == edited.id)
                .map(|i| i.date)
                .unwrap_or(edited.date);
            let cutoff = stored_date.min(edited.date);
            let remove = future_member_ids(items, &series_id, cutoff);

            // The edited occurrence survives as the head of the new tail,
            // keeping its id and series linkage.
            let mut add = vec![edited.clone()];
            add.extend(tail(edited, series_id, today));

            Revision {
                remove,
                update: vec![],
                add,
            }
        }
    }
}

/// Delete one occurrence or its whole future.
pub fn split_delete(items: &[TimelineItem], target: &TimelineItem, scope: EditScope) -> Revision {
    match scope.effective(target) {
        EditScope::Single => Revision {
            remove: vec![target.id.clone()],
            ..Default::default()
        },
        EditScope::Future => Revision {
            remove: future_member_ids(items, target.series_key(), target.date),
            ..Default::default()
        },
    }
}

/// Ids of every series member dated at or after `from`, anchor included.
fn future_member_ids(items: &[TimelineItem], series_id: &str, from: NaiveDate) -> Vec<String> {
    items
        .iter()
        .filter(|i| i.series_key() == series_id && i.is_recurring() && i.date >= from)
        .map(|i| i.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::generate;
    use bloomlog_garden_model::notebook::{ItemKind, Notebook, Recurrence};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn task(id: &str, date: NaiveDate, rule: Recurrence) -> TimelineItem {
        TimelineItem {
            id: id.to_string(),
            kind: ItemKind::Task,
            title: "Water".to_string(),
            description: None,
            date,
            photo_path: None,
            done: false,
            recurrence: rule,
            series_id: None,
        }
    }

    /// A weekly series of exactly 10 occurrences (anchor + 9).
    fn ten_weekly() -> Vec<TimelineItem> {
        let today = d(2024, 3, 4);
        let mut items = generate(&task("anchor", today, Recurrence::Weekly), today);
        items.truncate(10);
        items
    }

    #[test]
    fn test_future_delete_removes_suffix_only() {
        let items = ten_weekly();
        let fifth = items[4].clone();

        let revision = split_delete(&items, &fifth, EditScope::Future);

        let expected: Vec<String> = items[4..].iter().map(|i| i.id.clone()).collect();
        assert_eq!(revision.remove, expected);

        let mut nb = Notebook::new();
        nb.add_items(items.clone());
        nb.delete_items(&revision.remove);
        assert_eq!(nb.items.len(), 4);
        for (kept, original) in nb.items.iter().zip(&items[..4]) {
            assert_eq!(kept, original);
        }
    }

    #[test]
    fn test_future_delete_from_anchor_removes_everything() {
        let items = ten_weekly();
        let revision = split_delete(&items, &items[0], EditScope::Future);
        assert_eq!(revision.remove.len(), 10);
    }

    #[test]
    fn test_single_delete_removes_exactly_one() {
        let items = ten_weekly();
        let revision = split_delete(&items, &items[4], EditScope::Single);
        assert_eq!(revision.remove, vec![items[4].id.clone()]);
    }

    #[test]
    fn test_non_recurring_future_degrades_to_single() {
        let solo = task("solo", d(2024, 5, 1), Recurrence::None);
        let items = vec![solo.clone()];

        let revision = split_delete(&items, &solo, EditScope::Future);
        assert_eq!(revision.remove, vec!["solo".to_string()]);

        let mut note = solo.clone();
        note.kind = ItemKind::Note;
        let revision = split_delete(&[note.clone()], &note, EditScope::Future);
        assert_eq!(revision.remove.len(), 1);
    }

    #[test]
    fn test_single_update_touches_only_item() {
        let items = ten_weekly();
        let mut edited = items[2].clone();
        edited.title = "Deep water".to_string();

        let revision = split_update(&items, &edited, EditScope::Single, d(2024, 3, 10));
        assert!(revision.remove.is_empty());
        assert!(revision.add.is_empty());
        assert_eq!(revision.update, vec![edited]);
    }

    #[test]
    fn test_future_update_regenerates_tail_with_all_fields() {
        let today = d(2024, 3, 4);
        let items = ten_weekly();
        let mut edited = items[4].clone();
        edited.title = "Mist".to_string();
        edited.description = Some("mornings only".to_string());

        let revision = split_update(&items, &edited, EditScope::Future, today);

        // Everything from the edit point onward is replaced.
        assert_eq!(revision.remove.len(), 6);
        assert!(revision.add.len() > 1);

        // Head of the new tail is the edited occurrence itself.
        assert_eq!(revision.add[0].id, edited.id);
        assert_eq!(revision.add[0].title, "Mist");

        // The regenerated tail keeps the original series identity and
        // carries every edited field.
        for item in &revision.add[1..] {
            assert_eq!(item.series_id.as_deref(), Some("anchor"));
            assert_eq!(item.title, "Mist");
            assert_eq!(item.description.as_deref(), Some("mornings only"));
        }

        // Dates step weekly from the edited date.
        assert_eq!(revision.add[1].date, edited.date + chrono::Duration::days(7));
    }

    #[test]
    fn test_future_update_with_moved_date_replaces_old_record() {
        let today = d(2024, 3, 4);
        let items = ten_weekly();
        let mut edited = items[4].clone();
        edited.date += chrono::Duration::days(3);

        let revision = split_update(&items, &edited, EditScope::Future, today);

        // The stored record at the old date must be removed, not left
        // behind next to the re-added edited occurrence.
        assert!(revision.remove.contains(&edited.id));

        let mut nb = Notebook::new();
        nb.add_items(items);
        nb.delete_items(&revision.remove);
        for item in revision.update.clone() {
            nb.update_item(item);
        }
        nb.add_items(revision.add);

        let occurrences = nb.items.iter().filter(|i| i.id == edited.id).count();
        assert_eq!(occurrences, 1, "ids stay unique after the rewrite");
        assert_eq!(nb.find(&edited.id).unwrap().date, edited.date);

        // Moving a date earlier must not leave stale members either.
        let items = ten_weekly();
        let mut earlier = items[4].clone();
        earlier.date -= chrono::Duration::days(3);
        let revision = split_update(&items, &earlier, EditScope::Future, today);
        assert!(revision.remove.contains(&earlier.id));
        assert_eq!(revision.remove.len(), 6);
    }

    #[test]
    fn test_future_update_applied_through_store() {
        let today = d(2024, 3, 4);
        let items = ten_weekly();
        let mut edited = items[4].clone();
        edited.title = "Mist".to_string();

        let revision = split_update(&items, &edited, EditScope::Future, today);

        let mut nb = Notebook::new();
        nb.add_items(items);
        nb.delete_items(&revision.remove);
        for item in revision.update.clone() {
            nb.update_item(item);
        }
        nb.add_items(revision.add);

        assert!(nb.items[..4].iter().all(|i| i.title == "Water"));
        assert!(nb.items[4..].iter().all(|i| i.title == "Mist"));
    }
}
