use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use image::{imageops, GrayImage, Rgba, RgbaImage};
use itertools::iproduct;

use super::{rotate, text_offset, StartupError};
use crate::config;

/// Turns a string into a coverage mask: 0 is empty, 255 is fully inked.
pub trait Typeface {
    fn rasterize(&self, text: &str) -> GrayImage;
}

pub fn load_font(path: &'static str) -> Result<fontdue::Font, StartupError> {
    let bytes = std::fs::read(path).map_err(|source| StartupError::FontIo { path, source })?;
    parse_font(bytes)
}

pub fn parse_font(bytes: Vec<u8>) -> Result<fontdue::Font, StartupError> {
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
        .map_err(|e| StartupError::FontParse(e.to_string()))
}

/// Anti-aliased outline font at a fixed pixel size.
pub struct TrueTypeFace {
    font: fontdue::Font,
    px: f32,
}

impl TrueTypeFace {
    pub fn new(font: fontdue::Font, px: f32) -> Self {
        Self { font, px }
    }

    fn layout(&self, text: &str) -> Layout<()> {
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.font], &TextStyle::new(text, self.px, 0));
        layout
    }
}

impl Typeface for TrueTypeFace {
    fn rasterize(&self, text: &str) -> GrayImage {
        let layout = self.layout(text);

        let width = layout
            .glyphs()
            .iter()
            .map(|g| g.x + g.width as f32)
            .fold(0.0f32, f32::max)
            .ceil() as u32;
        let height = layout.height().ceil() as u32;

        let mut mask = GrayImage::new(width.max(1), height.max(1));

        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (_, coverage) = self.font.rasterize_config(glyph.key);
            let left = glyph.x.round() as i64;
            let top = glyph.y.round() as i64;

            for (i, value) in coverage.iter().enumerate() {
                let x = left + (i % glyph.width) as i64;
                let y = top + (i / glyph.width) as i64;
                if x < 0 || y < 0 || x >= mask.width() as i64 || y >= mask.height() as i64 {
                    continue;
                }
                let pixel = mask.get_pixel_mut(x as u32, y as u32);
                // Neighbouring glyph boxes can overlap
                pixel.0[0] = pixel.0[0].max(*value);
            }
        }

        mask
    }
}

/// Fixed-cell bitmap font, no anti-aliasing. Needs no font file.
#[cfg(test)]
pub mod bitmap {
    use std::convert::Infallible;

    use embedded_graphics::{
        mono_font::{MonoFont, MonoTextStyle},
        pixelcolor::BinaryColor,
        prelude::*,
        text::{renderer::TextRenderer, Baseline, Text},
    };
    use image::{GrayImage, Luma};

    use super::Typeface;

    pub struct BitmapFace {
        font: &'static MonoFont<'static>,
    }

    impl BitmapFace {
        pub const fn new(font: &'static MonoFont<'static>) -> Self {
            Self { font }
        }
    }

    impl Typeface for BitmapFace {
        fn rasterize(&self, text: &str) -> GrayImage {
            let style = MonoTextStyle::new(self.font, BinaryColor::On);
            let size = style
                .measure_string(text, Point::zero(), Baseline::Top)
                .bounding_box
                .size;

            let mut target = CoverageTarget(GrayImage::new(size.width.max(1), size.height.max(1)));
            Text::with_baseline(text, Point::zero(), style, Baseline::Top)
                .draw(&mut target)
                .ok();

            target.0
        }
    }

    struct CoverageTarget(GrayImage);

    impl DrawTarget for CoverageTarget {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            let (width, height) = self.0.dimensions();
            for Pixel(coord, color) in pixels.into_iter() {
                // Out of bounds pixels are discarded, same as any DrawTarget.
                if let Ok((x, y)) = <(u32, u32)>::try_from(coord) {
                    if x < width && y < height {
                        let value = if color.is_on() { 255 } else { 0 };
                        self.0.put_pixel(x, y, Luma([value]));
                    }
                }
            }
            Ok(())
        }
    }

    impl OriginDimensions for CoverageTarget {
        fn size(&self) -> Size {
            Size::new(self.0.width(), self.0.height())
        }
    }
}

fn tint(mask: &GrayImage, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_fn(mask.width(), mask.height(), |x, y| {
        let coverage = mask.get_pixel(x, y).0[0] as u16;
        let alpha = (color.0[3] as u16 * coverage / 255) as u8;
        Rgba([color.0[0], color.0[1], color.0[2], alpha])
    })
}

/// Bordered, shadowed text turned to the panel orientation.
///
/// Back to front: the outline color stamped at every offset of a 5x5 square
/// around the origin (a solid border), the same color again as a drop shadow,
/// and the fill on top. The shadow falls down-right on the panel, so its
/// offset is taken back through the panel rotation. The result keeps a
/// transparent margin so the fill sits exactly in the middle.
pub fn render_layered<F: Typeface + ?Sized>(
    text: &str,
    face: &F,
    fill: Rgba<u8>,
    outline: Rgba<u8>,
) -> RgbaImage {
    let mask = face.rasterize(text);
    let outline_layer = tint(&mask, outline);
    let fill_layer = tint(&mask, fill);

    let border = config::BORDER_THICKNESS;
    let shadow = config::SHADOW_OFFSET;
    let margin = border.max(shadow);

    let mut composed = RgbaImage::new(
        mask.width() + 2 * margin as u32,
        mask.height() + 2 * margin as u32,
    );

    for (dx, dy) in iproduct!(-border..=border, -border..=border).filter(|&o| o != (0, 0)) {
        imageops::overlay(&mut composed, &outline_layer, margin + dx, margin + dy);
    }
    let (sx, sy) = text_offset(config::PANEL_ROTATION, (shadow, shadow));
    imageops::overlay(&mut composed, &outline_layer, margin + sx, margin + sy);
    imageops::overlay(&mut composed, &fill_layer, margin, margin);

    rotate(&composed, config::PANEL_ROTATION)
}
