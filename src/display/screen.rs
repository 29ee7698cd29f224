use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{DrawTarget, Point, Size},
    Pixel,
};
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use image::RgbaImage;

use crate::log;

/// The window standing in for the panel. Dropping it closes the window.
pub struct Screen {
    display: SimulatorDisplay<Rgb888>,
    window: Window,
}

impl Screen {
    pub fn open(title: &str, width: u32, height: u32) -> Self {
        println!("{} Opening {}x{} window", log::SCREEN, width, height);
        let output_settings = OutputSettingsBuilder::new().scale(1).build();
        Self {
            display: SimulatorDisplay::new(Size::new(width, height)),
            window: Window::new(title, &output_settings),
        }
    }

    /// Copies `frame` into the window and flips it.
    pub fn present(&mut self, frame: &RgbaImage) {
        self.display.draw_iter(frame_pixels(frame)).ok();
        self.window.update(&self.display);
    }

    /// Drains pending window events; true if any of them asked to close.
    ///
    /// The window only exists after the first `present`.
    pub fn quit_requested(&mut self) -> bool {
        self.window
            .events()
            .fold(false, |quit, event| quit || event == SimulatorEvent::Quit)
    }
}

/// Opaque pixels of `frame`; the alpha channel is dropped.
pub fn frame_pixels(frame: &RgbaImage) -> impl Iterator<Item = Pixel<Rgb888>> + '_ {
    frame.enumerate_pixels().map(|(x, y, pixel)| {
        Pixel(
            Point::new(x as i32, y as i32),
            Rgb888::new(pixel.0[0], pixel.0[1], pixel.0[2]),
        )
    })
}
