use chrono::{DateTime, Utc};
use tui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::timeline::{bar_cells, cursor_cell, GanttRow};

/// Gantt chart of the scheduled passes.
///
/// One row per ground station / spacecraft pair, one bar per pass slot,
/// rendered into the window between `window_start` and `window_end`. The
/// first line is a time ruler with the current time cursor.
pub struct Timeline<'a> {
    block: Option<Block<'a>>,
    rows: &'a [GanttRow],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    now: DateTime<Utc>,
    label_width: u16,
    label_style: Style,
    bar_style: Style,
    active_style: Style,
    cursor_style: Style,
}

impl<'a> Timeline<'a> {
    pub fn new(rows: &'a [GanttRow], window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> Self {
        Timeline {
            block: None,
            rows,
            window_start,
            window_end,
            now: Utc::now(),
            label_width: 28,
            label_style: Style::default().fg(Color::Cyan),
            bar_style: Style::default().fg(Color::Yellow),
            active_style: Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD),
            cursor_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

impl<'a> Widget for Timeline<'a> {
    fn render(mut self, area: Rect, buf: &mut Buffer) {
        let area = match self.block.take() {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        if area.height < 2 || area.width <= self.label_width + 1 {
            return;
        }

        let bar_x = area.left() + self.label_width + 1;
        let bar_width = area.right() - bar_x;
        let cursor = cursor_cell(bar_width, self.window_start, self.window_end, self.now);

        // time ruler
        let start_label = self.window_start.format("%m-%d %H:%M").to_string();
        buf.set_string(bar_x, area.top(), &start_label, self.cursor_style);

        let end_label = self.window_end.format("%H:%M").to_string();
        let end_width = UnicodeWidthStr::width(end_label.as_str()) as u16;
        if area.right() > end_width {
            buf.set_string(area.right() - end_width, area.top(), &end_label, self.cursor_style);
        }

        if let Some(cursor) = cursor {
            buf.set_string(bar_x + cursor, area.top(), "▼", self.active_style);
        }

        for (at, row) in self.rows.iter().take(area.height as usize - 1).enumerate() {
            let y = area.top() + 1 + at as u16;

            buf.set_stringn(
                area.left(),
                y,
                &row.id,
                self.label_width as usize,
                self.label_style,
            );

            if let Some(cursor) = cursor {
                buf.set_string(bar_x + cursor, y, "┆", self.cursor_style);
            }

            for task in &row.tasks {
                let cells = bar_cells(
                    bar_width,
                    self.window_start,
                    self.window_end,
                    task.start,
                    task.end,
                );

                if let Some((x, width)) = cells {
                    let style = if task.start <= self.now && self.now < task.end {
                        self.active_style
                    } else {
                        self.bar_style
                    };

                    for dx in 0..width {
                        buf.set_string(bar_x + x + dx, y, "█", style);
                    }
                }
            }
        }
    }
}
