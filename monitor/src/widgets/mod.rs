mod info_bar;
mod timeline;

pub use self::info_bar::InfoBar;
pub use self::timeline::Timeline;
