//! Grouping of pass slots into the rows of the timeline view.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use satnet_client::PassSlot;

#[derive(Clone, Debug, PartialEq)]
pub struct GanttTask {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GanttRow {
    pub id: String,
    pub gs: String,
    pub sc: String,
    pub tasks: Vec<GanttTask>,
}

/// Groups pass slots into one row per ground station / spacecraft pair.
///
/// A row is keyed `"<gs> / <sc>"`. Rows appear in the order their pair was
/// first seen in the input and tasks keep the input order within their row,
/// so regrouping an extended listing never reshuffles existing rows.
pub fn group_slots(slots: &[PassSlot]) -> Vec<GanttRow> {
    let mut rows: Vec<GanttRow> = vec![];
    let mut index: HashMap<String, usize> = HashMap::new();

    for slot in slots {
        let row_id = format!("{} / {}", slot.gs_identifier, slot.sc_identifier);
        let at = *index.entry(row_id.clone()).or_insert_with(|| {
            rows.push(GanttRow {
                id: row_id.clone(),
                gs: slot.gs_identifier.clone(),
                sc: slot.sc_identifier.clone(),
                tasks: vec![],
            });
            rows.len() - 1
        });

        rows[at].tasks.push(GanttTask {
            id: slot.identifier,
            start: slot.slot_start,
            end: slot.slot_end,
        });
    }

    rows
}

/// Maps a task interval onto cell coordinates inside a render window of
/// `width` cells. Gives the x offset and width of the bar, or `None` when
/// the task lies outside the window. Any visible part takes at least one
/// cell, no matter how short the task is.
pub fn bar_cells(
    width: u16,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    task_start: DateTime<Utc>,
    task_end: DateTime<Utc>,
) -> Option<(u16, u16)> {
    if width == 0
        || window_end <= window_start
        || task_end <= window_start
        || task_start >= window_end
    {
        return None;
    }

    let window = (window_end - window_start).num_seconds() as f64;
    let clamp = |at: DateTime<Utc>| -> f64 {
        let offset = (at - window_start).num_seconds() as f64;
        offset.max(0.0).min(window)
    };

    let from = clamp(task_start) / window * f64::from(width);
    let to = clamp(task_end) / window * f64::from(width);

    let x = (from.floor() as u16).min(width - 1);
    let bar = ((to - from).ceil() as u16).max(1).min(width - x);

    Some((x, bar))
}

/// Cell column of a point in time inside the render window, used for the
/// current time cursor.
pub fn cursor_cell(
    width: u16,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    at: DateTime<Utc>,
) -> Option<u16> {
    if width == 0 || window_end <= window_start || at < window_start || at >= window_end {
        return None;
    }

    let window = (window_end - window_start).num_seconds() as f64;
    let offset = (at - window_start).num_seconds() as f64;

    Some(((offset / window * f64::from(width)).floor() as u16).min(width - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: i64, gs: &str, sc: &str, start: &str, end: &str) -> PassSlot {
        PassSlot {
            identifier: id,
            gs_identifier: gs.to_string(),
            sc_identifier: sc.to_string(),
            slot_start: start.parse().unwrap(),
            slot_end: end.parse().unwrap(),
        }
    }

    fn ts(at: &str) -> DateTime<Utc> {
        at.parse().unwrap()
    }

    #[test]
    fn rows_keep_first_seen_order() {
        let slots = vec![
            slot(1, "gs-vigo", "sc-serpens", "2026-08-25T10:00:00Z", "2026-08-25T10:12:00Z"),
            slot(2, "gs-berlin", "sc-serpens", "2026-08-25T10:30:00Z", "2026-08-25T10:41:00Z"),
            slot(3, "gs-vigo", "sc-serpens", "2026-08-25T12:02:00Z", "2026-08-25T12:13:00Z"),
        ];

        let rows = group_slots(&slots);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "gs-vigo / sc-serpens");
        assert_eq!(rows[0].gs, "gs-vigo");
        assert_eq!(rows[0].sc, "sc-serpens");
        assert_eq!(rows[1].id, "gs-berlin / sc-serpens");

        let ids: Vec<i64> = rows[0].tasks.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn regrouping_extended_input_is_stable() {
        let mut slots = vec![
            slot(1, "gs-vigo", "sc-serpens", "2026-08-25T10:00:00Z", "2026-08-25T10:12:00Z"),
            slot(2, "gs-berlin", "sc-beesat", "2026-08-25T10:30:00Z", "2026-08-25T10:41:00Z"),
        ];
        let before = group_slots(&slots);

        slots.push(slot(3, "gs-kiruna", "sc-beesat", "2026-08-25T11:00:00Z", "2026-08-25T11:09:00Z"));
        slots.push(slot(4, "gs-vigo", "sc-serpens", "2026-08-25T12:00:00Z", "2026-08-25T12:11:00Z"));
        let after = group_slots(&slots);

        assert_eq!(after[0].id, before[0].id);
        assert_eq!(after[1].id, before[1].id);
        assert_eq!(after[2].id, "gs-kiruna / sc-beesat");
        assert_eq!(after[0].tasks.len(), 2);
    }

    #[test]
    fn empty_input_gives_no_rows() {
        assert!(group_slots(&[]).is_empty());
    }

    #[test]
    fn bar_spans_its_share_of_the_window() {
        let window_start = ts("2026-08-25T10:00:00Z");
        let window_end = ts("2026-08-25T12:00:00Z");

        let bar = bar_cells(
            120,
            window_start,
            window_end,
            ts("2026-08-25T10:30:00Z"),
            ts("2026-08-25T11:00:00Z"),
        );
        assert_eq!(bar, Some((30, 30)));
    }

    #[test]
    fn bar_is_clamped_to_the_window() {
        let window_start = ts("2026-08-25T10:00:00Z");
        let window_end = ts("2026-08-25T12:00:00Z");

        let left = bar_cells(
            120,
            window_start,
            window_end,
            ts("2026-08-25T09:00:00Z"),
            ts("2026-08-25T10:30:00Z"),
        );
        assert_eq!(left, Some((0, 30)));

        let right = bar_cells(
            120,
            window_start,
            window_end,
            ts("2026-08-25T11:30:00Z"),
            ts("2026-08-25T13:00:00Z"),
        );
        assert_eq!(right, Some((90, 30)));
    }

    #[test]
    fn task_outside_the_window_is_hidden() {
        let window_start = ts("2026-08-25T10:00:00Z");
        let window_end = ts("2026-08-25T12:00:00Z");

        let before = bar_cells(
            120,
            window_start,
            window_end,
            ts("2026-08-25T08:00:00Z"),
            ts("2026-08-25T09:00:00Z"),
        );
        assert_eq!(before, None);

        let after = bar_cells(
            120,
            window_start,
            window_end,
            ts("2026-08-25T12:00:00Z"),
            ts("2026-08-25T12:30:00Z"),
        );
        assert_eq!(after, None);
    }

    #[test]
    fn short_task_still_gets_one_cell() {
        let window_start = ts("2026-08-25T10:00:00Z");
        let window_end = ts("2026-08-25T12:00:00Z");

        let bar = bar_cells(
            60,
            window_start,
            window_end,
            ts("2026-08-25T10:20:00Z"),
            ts("2026-08-25T10:20:30Z"),
        );
        assert_eq!(bar, Some((10, 1)));
    }

    #[test]
    fn zero_width_window_is_hidden() {
        let window_start = ts("2026-08-25T10:00:00Z");
        let window_end = ts("2026-08-25T12:00:00Z");

        assert_eq!(
            bar_cells(0, window_start, window_end, window_start, window_end),
            None
        );
        assert_eq!(bar_cells(120, window_start, window_start, window_start, window_end), None);
    }

    #[test]
    fn cursor_tracks_the_window() {
        let window_start = ts("2026-08-25T10:00:00Z");
        let window_end = ts("2026-08-25T12:00:00Z");

        assert_eq!(cursor_cell(120, window_start, window_end, window_start), Some(0));
        assert_eq!(
            cursor_cell(120, window_start, window_end, ts("2026-08-25T11:00:00Z")),
            Some(60)
        );
        assert_eq!(
            cursor_cell(120, window_start, window_end, ts("2026-08-25T09:59:59Z")),
            None
        );
    }
}
