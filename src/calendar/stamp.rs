use std::fs;
use std::path::Path;

use image::{Pixel, Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

use crate::calendar::ErrorKind;
use crate::time::Date;

/// The display face every page is stamped with.
pub const FONT_FILE: &str = "SF-Pro-Text-Black.ttf";

/// Right edge and baseline of the date line, in page pixels.
const ANCHOR: (f32, f32) = (3274.0, 114.0);
const POINT_SIZE: f32 = 80.0;
const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Something that can put the date onto a page.
pub trait Stamper {
    fn stamp(&self, page: &mut RgbaImage, date: Date);
}

/// Draws `"{Weekday} — {Mon}, {DD}, {YYYY}"` right aligned at the fixed
/// anchor position.
#[derive(Debug)]
pub struct DateStamp {
    font: Font<'static>,
}

impl DateStamp {
    /// Loads the display font from the asset directory.
    pub fn load(assets_dir: &Path) -> Result<Self, ErrorKind> {
        let path = assets_dir.join(FONT_FILE);
        let font_unavailable = || ErrorKind::FontUnavailable { path: path.clone() };

        let bytes = fs::read(&path).map_err(|_| font_unavailable())?;
        let font = Font::try_from_vec(bytes).ok_or_else(font_unavailable)?;

        Ok(Self { font })
    }

    /// The text printed on a page, for example `"Friday — Dec, 05, 2025"`.
    #[must_use]
    pub fn date_line(date: Date) -> String {
        format!(
            "{} — {}, {:02}, {:04}",
            date.week_day(),
            date.month().short_name(),
            date.day(),
            date.year().as_usize()
        )
    }
}

impl Stamper for DateStamp {
    fn stamp(&self, page: &mut RgbaImage, date: Date) {
        let line = Self::date_line(date);
        let scale = Scale::uniform(POINT_SIZE);

        let width = text_width(&self.font, scale, &line);
        draw_text(page, &self.font, scale, ANCHOR.0 - width, ANCHOR.1, &line);
    }
}

/// The horizontal extent of `text`, measured from the pen position.
fn text_width(font: &Font<'_>, scale: Scale, text: &str) -> f32 {
    font.layout(text, scale, point(0.0, 0.0))
        .filter_map(|glyph| glyph.pixel_bounding_box())
        .map(|bounds| bounds.max.x as f32)
        .fold(0.0, f32::max)
}

/// Rasterizes `text` with its baseline at `baseline`, blending the glyph
/// coverage into the page so antialiased edges stay smooth.
fn draw_text(
    page: &mut RgbaImage,
    font: &Font<'_>,
    scale: Scale,
    x: f32,
    baseline: f32,
    text: &str,
) {
    for glyph in font.layout(text, scale, point(x, baseline)) {
        let Some(bounds) = glyph.pixel_bounding_box() else {
            continue;
        };

        glyph.draw(|glyph_x, glyph_y, coverage| {
            let page_x = glyph_x as i32 + bounds.min.x;
            let page_y = glyph_y as i32 + bounds.min.y;

            if page_x < 0 || page_y < 0 {
                return;
            }

            let (page_x, page_y) = (page_x as u32, page_y as u32);
            if page_x >= page.width() || page_y >= page.height() {
                return;
            }

            let alpha = (coverage * 255.0) as u8;
            if alpha == 0 {
                return;
            }

            let mut ink = INK;
            ink.0[3] = alpha;
            page.get_pixel_mut(page_x, page_y).blend(&ink);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::date;

    #[test]
    fn test_date_line_format() {
        assert_eq!(
            DateStamp::date_line(date!(2025:12:05)),
            "Friday — Dec, 05, 2025"
        );
        assert_eq!(
            DateStamp::date_line(date!(2026:01:01)),
            "Thursday — Jan, 01, 2026"
        );
    }

    #[test]
    fn test_load_reports_the_missing_font_path() {
        let error = DateStamp::load(Path::new("does/not/exist")).unwrap_err();

        match error {
            ErrorKind::FontUnavailable { path } => {
                assert_eq!(path, Path::new("does/not/exist").join(FONT_FILE));
            }
            other => panic!("expected FontUnavailable, got {:?}", other),
        }
    }
}
