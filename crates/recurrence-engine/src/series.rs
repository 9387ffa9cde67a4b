//! Series aggregate and bounded occurrence generation.

use chrono::{Months, NaiveDate};

use bloomlog_garden_model::garden::uuid_v4;
use bloomlog_garden_model::notebook::TimelineItem;

/// Maximum occurrences generated per call, after the anchor.
pub const MAX_GENERATED: usize = 60;

/// Generation horizon: series are filled up to one year past `today`.
pub fn horizon(today: NaiveDate) -> NaiveDate {
    today.checked_add_months(Months::new(12)).unwrap_or(today)
}

/// A recurring series reconstructed from an item slice.
///
/// Identity is the anchor item's id; members are every task sharing that
/// identity (the anchor included), sorted ascending by date.
#[derive(Debug, Clone)]
pub struct Series {
    /// The anchor item's id.
    pub id: String,

    /// Members sorted ascending by date. Each member carries the shared
    /// recurrence rule, so stepping always uses the member itself.
    pub members: Vec<TimelineItem>,
}

impl Series {
    /// Group all recurring tasks in `items` into series.
    pub fn collect(items: &[TimelineItem]) -> Vec<Series> {
        let mut series: Vec<Series> = vec![];
        for item in items {
            if !item.is_recurring() {
                continue;
            }
            let key = item.series_key().to_string();
            match series.iter_mut().find(|s| s.id == key) {
                Some(s) => s.members.push(item.clone()),
                None => series.push(Series {
                    id: key,
                    members: vec![item.clone()],
                }),
            }
        }
        for s in &mut series {
            s.members.sort_by(|a, b| a.date.cmp(&b.date));
        }
        series
    }

    /// The member with the latest date. Members are never empty.
    pub fn latest(&self) -> &TimelineItem {
        self.members.last().expect("series has at least one member")
    }
}

/// Expand a base item into its full series.
///
/// Returns the base itself first, then up to [`MAX_GENERATED`] occurrences
/// stepped forward by the base's recurrence rule, stopping as soon as a
/// stepped date would pass `today + 1 year`. Generated occurrences carry
/// fresh ids, `series_id = Some(base.id)`, `done = false`, and copy the
/// base's title, description, and recurrence.
///
/// Non-recurring items (notes, `Recurrence::None` tasks) expand to just
/// themselves.
pub fn generate(base: &TimelineItem, today: NaiveDate) -> Vec<TimelineItem> {
    let mut items = vec![base.clone()];
    if !base.is_recurring() {
        return items;
    }

    items.extend(tail(base, base.id.clone(), today));
    items
}

/// Occurrences stepped forward from `template.date`, excluding the
/// template itself. Shared by generation and series extension.
pub(crate) fn tail(
    template: &TimelineItem,
    series_id: String,
    today: NaiveDate,
) -> Vec<TimelineItem> {
    let limit = horizon(today);
    let mut out = vec![];
    let mut date = template.date;

    for _ in 0..MAX_GENERATED {
        date = template.recurrence.step(date);
        if date > limit {
            break;
        }
        out.push(TimelineItem {
            id: uuid_v4(),
            kind: template.kind,
            title: template.title.clone(),
            description: template.description.clone(),
            date,
            photo_path: None,
            done: false,
            recurrence: template.recurrence,
            series_id: Some(series_id.clone()),
        });
    }
    out
}
