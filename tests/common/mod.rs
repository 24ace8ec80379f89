use std::path::Path;

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

use room_calendar::calendar::{StaticOverrideStore, Stamper, CLOSED_STAMP_FILE};
use room_calendar::input::toml_input::OverrideFile;
use room_calendar::time::Date;

/// A stamper that leaves the page untouched, so pipeline tests do not
/// need a real font on disk.
#[allow(dead_code)]
pub struct NoopStamp;

impl Stamper for NoopStamp {
    fn stamp(&self, _page: &mut RgbaImage, _date: Date) {}
}

/// A 60x40 single colour "template".
#[allow(dead_code)]
pub fn solid(pixel: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(60, 40, Rgba(pixel))
}

#[allow(dead_code)]
fn save(dir: &Path, name: &str, image: &RgbaImage) {
    image
        .save(dir.join(name))
        .unwrap_or_else(|e| panic!("fixture {} should save: {}", name, e));
}

/// Writes the full template set for both rooms plus the closure stamp
/// into a fresh directory: white templates, a green closure stamp.
#[must_use]
#[allow(dead_code)]
pub fn make_assets() -> TempDir {
    let dir = TempDir::new().expect("temp dir for assets");

    for prefix in ["SR", "PR"] {
        for name in [
            "0_Asset_WeekdayHours.png",
            "1_Asset_FridayHours.png",
            "2_Asset_SaturdayHours.png",
            "3_Asset_SundayHours.png",
        ] {
            save(
                dir.path(),
                &format!("{}_{}", prefix, name),
                &solid([255, 255, 255, 255]),
            );
        }
    }

    save(dir.path(), CLOSED_STAMP_FILE, &solid([10, 200, 10, 255]));

    dir
}

#[must_use]
#[allow(dead_code)]
pub fn make_store(input: &str) -> StaticOverrideStore {
    let file: OverrideFile = toml::from_str(input).expect("override toml should parse");

    StaticOverrideStore::new(file.into_stored().expect("overrides should be valid"))
}

#[allow(dead_code)]
pub fn debug_setup() {
    std::env::set_var("RUST_BACKTRACE", "1");
    std::env::set_var("RUST_APP_LOG", "trace");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");
}
