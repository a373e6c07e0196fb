use chrono::prelude::*;
use tui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::View;

/// Two line header with the server connectivity indicator, the view tabs
/// and the UTC clock.
pub struct InfoBar<'a> {
    active: View,
    connected: bool,
    leop: Option<&'a str>,
    tab_style: Style,
    active_color: Color,
    online_color: Color,
    offline_color: Color,
}

impl<'a> InfoBar<'a> {
    pub fn new(active: View, connected: bool) -> Self {
        InfoBar {
            active,
            connected,
            leop: None,
            tab_style: Style::default().fg(Color::White).bg(Color::DarkGray),
            active_color: Color::LightCyan,
            online_color: Color::LightGreen,
            offline_color: Color::LightRed,
        }
    }

    pub fn leop(mut self, leop: Option<&'a str>) -> Self {
        self.leop = leop;
        self
    }
}

impl<'a> Widget for InfoBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let space_between_tabs = 3;
        let status_color = if self.connected {
            self.online_color
        } else {
            self.offline_color
        };

        let mut x = area.left();
        buf.set_string(x, area.top(), " ▲ ", Style::default().fg(status_color).bg(Color::DarkGray));
        if area.height > 1 {
            buf.set_string(x, area.top() + 1, "▀▀▀", Style::default().fg(status_color));
        }
        x += 3 + space_between_tabs;

        for view in View::ALL {
            let title = format!(" {} ", view.title());
            let title_width = UnicodeWidthStr::width(title.as_str()) as u16;
            if x + title_width >= area.right() {
                break;
            }

            buf.set_string(x, area.top(), &title, self.tab_style);
            if area.height > 1 {
                let decal_color = if view == self.active {
                    self.active_color
                } else {
                    Color::DarkGray
                };
                let decal = (0..title_width).map(|_| "▀").collect::<String>();
                buf.set_string(x, area.top() + 1, decal, Style::default().fg(decal_color));
            }

            x += title_width + space_between_tabs;
        }

        if let Some(leop) = self.leop {
            let badge = format!(" LEOP {} ", leop);
            let badge_width = UnicodeWidthStr::width(badge.as_str()) as u16;
            if x + badge_width < area.right() {
                buf.set_string(
                    x,
                    area.top(),
                    &badge,
                    Style::default().fg(Color::Yellow).bg(Color::DarkGray),
                );
                if area.height > 1 {
                    let decal = (0..badge_width).map(|_| "▀").collect::<String>();
                    buf.set_string(x, area.top() + 1, decal, Style::default().fg(Color::DarkGray));
                }
            }
        }

        let utc: DateTime<Utc> = Utc::now();
        let utc = utc.format(" %F %Z %T").to_string();
        let clock_width = utc.chars().count() as u16;

        if area.right() >= clock_width {
            buf.set_string(area.right() - clock_width, area.top(), utc, self.tab_style);
            if area.height > 1 {
                let decal = (0..clock_width).map(|_| "▀").collect::<String>();
                buf.set_string(
                    area.right() - clock_width,
                    area.top() + 1,
                    decal,
                    Style::default().fg(Color::DarkGray),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(info_bar: InfoBar, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        info_bar.render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf.get(x, y).symbol.as_str()).collect()
    }

    #[test]
    fn lists_every_view_tab() {
        let buf = render(InfoBar::new(View::Map, true), 120, 2);

        let header = row(&buf, 0);
        for view in View::ALL {
            assert!(header.contains(view.title()), "missing {}", view.title());
        }
    }

    #[test]
    fn connectivity_colors_the_indicator() {
        let online = render(InfoBar::new(View::Map, true), 40, 2);
        assert_eq!(online.get(1, 0).symbol, "▲");
        assert_eq!(online.get(1, 0).fg, Color::LightGreen);

        let offline = render(InfoBar::new(View::Map, false), 40, 2);
        assert_eq!(offline.get(1, 0).fg, Color::LightRed);
    }

    #[test]
    fn leop_badge_follows_the_tabs() {
        let info_bar = InfoBar::new(View::Timeline, true).leop(Some("d-2026-08"));
        let buf = render(info_bar, 120, 2);

        assert!(row(&buf, 0).contains("LEOP d-2026-08"));
    }

    #[test]
    fn single_line_area_skips_the_decals() {
        let buf = render(InfoBar::new(View::Map, true), 60, 1);

        assert!(row(&buf, 0).contains("MAP"));
        assert_eq!(buf.area.height, 1);
    }
}
