//! CSV export of notebook items.
//!
//! Field values are neutralized against spreadsheet formula injection:
//! a leading `=`, `+`, `-` or `@` gets a `'` prefix before quoting.

use chrono::NaiveDate;

use crate::notebook::{ItemKind, Notebook};

/// Serialize all items within an inclusive date window to CSV.
pub fn export_window(notebook: &Notebook, from: NaiveDate, to: NaiveDate) -> String {
    let mut out = String::from("kind,title,description,date,done\n");
    for item in notebook.window(from, to) {
        let kind = match item.kind {
            ItemKind::Note => "note",
            ItemKind::Task => "task",
        };
        let row = [
            field(kind),
            field(&item.title),
            field(item.description.as_deref().unwrap_or("")),
            field(&item.date.to_string()),
            field(if item.done { "true" } else { "false" }),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Sanitize and quote a single CSV field.
fn field(value: &str) -> String {
    let sanitized = sanitize(value);
    if sanitized.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", sanitized.replace('"', "\"\""))
    } else {
        sanitized
    }
}

/// Neutralize values a spreadsheet would evaluate as a formula.
fn sanitize(value: &str) -> String {
    match value.chars().next() {
        Some('=') | Some('+') | Some('-') | Some('@') => format!("'{value}"),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::{Recurrence, TimelineItem};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn item(title: &str, date: NaiveDate) -> TimelineItem {
        TimelineItem {
            id: title.to_string(),
            kind: ItemKind::Task,
            title: title.to_string(),
            description: None,
            date,
            photo_path: None,
            done: false,
            recurrence: Recurrence::None,
            series_id: None,
        }
    }

    #[test]
    fn test_formula_titles_are_neutralized() {
        let mut nb = Notebook::new();
        nb.add_items(vec![item("=1+1", d(2024, 6, 1))]);

        let csv = export_window(&nb, d(2024, 6, 1), d(2024, 6, 30));
        assert!(csv.contains("'=1+1"));
        assert!(!csv.contains(",=1+1"));
    }

    #[test]
    fn test_quoting_commas_and_quotes() {
        let mut nb = Notebook::new();
        let mut i = item("water, then \"feed\"", d(2024, 6, 2));
        i.description = Some("line1\nline2".to_string());
        nb.add_items(vec![i]);

        let csv = export_window(&nb, d(2024, 6, 1), d(2024, 6, 30));
        assert!(csv.contains("\"water, then \"\"feed\"\"\""));
        assert!(csv.contains("\"line1\nline2\""));
    }

    #[test]
    fn test_window_excludes_outside_dates() {
        let mut nb = Notebook::new();
        nb.add_items(vec![item("in", d(2024, 6, 5)), item("out", d(2024, 7, 5))]);

        let csv = export_window(&nb, d(2024, 6, 1), d(2024, 6, 30));
        assert!(csv.contains("in"));
        assert!(!csv.contains("out"));
    }

    #[test]
    fn test_leading_minus_and_at() {
        assert_eq!(sanitize("-2+3"), "'-2+3");
        assert_eq!(sanitize("@cmd"), "'@cmd");
        assert_eq!(sanitize("plain"), "plain");
    }
}
