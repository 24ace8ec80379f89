use std::path::Path;

use image::{imageops, RgbaImage};

use crate::calendar::{load_image, DayResolution, ErrorKind, CLOSED_STAMP_FILE};

/// Alpha composites `overlay` onto `page` at the origin.
///
/// Both images are in an alpha capable mode and the blend is a true over
/// operator, so semi transparent artwork edges do not fringe. A fully
/// transparent overlay leaves the page pixel identical.
pub fn overlay_image(page: &mut RgbaImage, overlay: &RgbaImage) {
    imageops::overlay(page, overlay, 0, 0);
}

/// Applies what the resolver decided for one day: holiday artwork first,
/// the closure stamp second, so a closed marker is never hidden behind
/// artwork. A day without overrides passes through untouched.
///
/// Artwork paths are resolved relative to the asset directory; absolute
/// paths are used as given.
pub fn apply_overlays(
    page: &mut RgbaImage,
    resolution: &DayResolution,
    assets_dir: &Path,
) -> Result<(), ErrorKind> {
    if let Some(artwork) = resolution.artwork() {
        overlay_file(page, &assets_dir.join(artwork))?;
    }

    if resolution.is_closed() {
        overlay_file(page, &assets_dir.join(CLOSED_STAMP_FILE))?;
    }

    Ok(())
}

fn overlay_file(page: &mut RgbaImage, path: &Path) -> Result<(), ErrorKind> {
    let overlay = load_image(path)?.into_rgba8();
    overlay_image(page, &overlay);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::Rgba;
    use pretty_assertions::assert_eq;

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(pixel))
    }

    #[test]
    fn test_transparent_overlay_is_a_no_op() {
        let mut page = solid(8, 8, [180, 20, 20, 255]);
        let untouched = page.clone();

        overlay_image(&mut page, &solid(8, 8, [0, 0, 0, 0]));

        assert_eq!(page.as_raw(), untouched.as_raw());
    }

    #[test]
    fn test_opaque_overlay_replaces_the_page() {
        let mut page = solid(4, 4, [180, 20, 20, 255]);

        overlay_image(&mut page, &solid(4, 4, [10, 200, 10, 255]));

        assert_eq!(page.get_pixel(0, 0), &Rgba([10, 200, 10, 255]));
    }

    #[test]
    fn test_semi_transparent_overlay_blends() {
        let mut page = solid(2, 2, [0, 0, 0, 255]);

        // half transparent white over black lands in the middle
        overlay_image(&mut page, &solid(2, 2, [255, 255, 255, 128]));

        let Rgba([r, g, b, a]) = *page.get_pixel(0, 0);
        assert!(r > 100 && r < 155, "expected a mid grey, got {}", r);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_closure_sits_above_artwork() {
        let assets = tempfile::tempdir().expect("temp dir for assets");

        solid(4, 4, [10, 10, 200, 255])
            .save(assets.path().join("artwork.png"))
            .expect("artwork should save");
        solid(4, 4, [10, 200, 10, 255])
            .save(assets.path().join(CLOSED_STAMP_FILE))
            .expect("stamp should save");

        let resolution = DayResolution::from(crate::calendar::StoredOverride::new(
            crate::calendar::Matcher::Name("Test".to_string()),
            Some("artwork.png".into()),
            true,
        ));

        let mut page = solid(4, 4, [255, 255, 255, 255]);
        apply_overlays(&mut page, &resolution, assets.path()).expect("overlays should apply");

        // the closure stamp is drawn last, so its colour wins
        assert_eq!(page.get_pixel(2, 2), &Rgba([10, 200, 10, 255]));
    }

    #[test]
    fn test_missing_artwork_is_fatal() {
        let assets = tempfile::tempdir().expect("temp dir for assets");

        let resolution = DayResolution::from(crate::calendar::StoredOverride::new(
            crate::calendar::Matcher::Name("Test".to_string()),
            Some("not-there.png".into()),
            false,
        ));

        let mut page = solid(4, 4, [255, 255, 255, 255]);
        let error = apply_overlays(&mut page, &resolution, assets.path()).unwrap_err();

        match error {
            ErrorKind::MissingAsset { path, .. } => {
                assert_eq!(path, assets.path().join("not-there.png"));
            }
            other => panic!("expected MissingAsset, got {:?}", other),
        }
    }
}
