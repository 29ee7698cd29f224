use std::time::Duration;

use chrono::FixedOffset;
use embedded_graphics::prelude::Point;
use image::Rgba;

use crate::display::DisplayRotation;

pub const WIDTH: u32 = 240;
pub const HEIGHT: u32 = 320;

/// The panel is mounted sideways; the background and every text block get the same turn.
pub const PANEL_ROTATION: DisplayRotation = DisplayRotation::Rotate90;

pub const WINDOW_TITLE: &str = "Graphical Clock";

pub const BACKGROUND_PATH: &str = "assets/rainbow.jpg";
pub const FONT_PATH: &str = "assets/font-bold.ttf";

pub const TIME_API_URL: &str = "http://worldtimeapi.org/api/timezone/Asia/Kolkata";

/// Asia/Kolkata, which observes no daylight saving.
pub const ZONE_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

pub const RESYNC_INTERVAL: Duration = Duration::from_secs(60 * 60);
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
pub const TICK: Duration = Duration::from_secs(1);

pub const TIME_FONT_SIZE: u32 = 60;
pub const DATE_FONT_SIZE: u32 = 24;

pub const COLOR_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const COLOR_OUTLINE: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub const BORDER_THICKNESS: i64 = 2;
pub const SHADOW_OFFSET: i64 = 2;

/// Centers of the rotated text blocks on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub time_position: Point,
    pub date_position: Point,
}

// Tuned by hand for the 240x320 panel; the date sits one time-line (plus 10px) below.
pub const LAYOUT: Layout = Layout {
    time_position: Point::new(WIDTH as i32 - 100, HEIGHT as i32 - 162),
    date_position: Point::new(WIDTH as i32 - 50, HEIGHT as i32 - 162 + TIME_FONT_SIZE as i32 + 10),
};

pub const ZONE: FixedOffset = match FixedOffset::east_opt(ZONE_OFFSET_SECS) {
    Some(offset) => offset,
    None => panic!("zone offset out of range"),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_tuned_coordinates() {
        assert_eq!(LAYOUT.time_position, Point::new(140, 158));
        assert_eq!(LAYOUT.date_position, Point::new(190, 228));
    }

    #[test]
    fn zone_is_india_standard_time() {
        assert_eq!(ZONE.local_minus_utc(), 19800);
    }
}
