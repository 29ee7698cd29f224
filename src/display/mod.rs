pub mod screen;
pub mod text;

use embedded_graphics::prelude::Point;
use image::{imageops, imageops::FilterType, RgbaImage};
use thiserror::Error;

use crate::config;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("could not load background: {0}")]
    Image(#[from] image::ImageError),
    #[error("could not read font {path}: {source}")]
    FontIo {
        path: &'static str,
        source: std::io::Error,
    },
    #[error("could not parse font: {0}")]
    FontParse(String),
}

/// Counter-clockwise rotation between the drawing buffer and the panel.
#[allow(dead_code)]
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum DisplayRotation {
    Zero,
    Rotate90,
    Rotate180,
    Rotate270,
}

pub fn rotate(image: &RgbaImage, rotation: DisplayRotation) -> RgbaImage {
    // imageops rotates clockwise
    match rotation {
        DisplayRotation::Zero => image.clone(),
        DisplayRotation::Rotate90 => imageops::rotate270(image),
        DisplayRotation::Rotate180 => imageops::rotate180(image),
        DisplayRotation::Rotate270 => imageops::rotate90(image),
    }
}

/// The offset to apply before `rotate` so that it ends up as `screen` after it.
pub fn text_offset(rotation: DisplayRotation, screen: (i64, i64)) -> (i64, i64) {
    let (x, y) = screen;
    match rotation {
        DisplayRotation::Zero => (x, y),
        DisplayRotation::Rotate90 => (-y, x),
        DisplayRotation::Rotate180 => (-x, -y),
        DisplayRotation::Rotate270 => (y, -x),
    }
}

pub fn load_background(path: &str, width: u32, height: u32) -> Result<RgbaImage, StartupError> {
    let image = image::open(path)?.to_rgba8();
    Ok(fit_background(&image, width, height))
}

/// Scales into the landscape buffer (dimensions swapped) and turns it to the panel orientation.
pub fn fit_background(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let scaled = imageops::resize(image, height, width, FilterType::Triangle);
    rotate(&scaled, config::PANEL_ROTATION)
}

/// Alpha-blends `layer` onto `frame` so that its center lands on `center`.
/// Parts falling outside the frame are clipped.
pub fn blit_centered(frame: &mut RgbaImage, layer: &RgbaImage, center: Point) {
    let x = center.x as i64 - (layer.width() / 2) as i64;
    let y = center.y as i64 - (layer.height() / 2) as i64;
    imageops::overlay(frame, layer, x, y);
}
