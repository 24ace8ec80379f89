use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use log::{debug, info};
use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument,
    PdfLayerReference, Px,
};
use tempfile::TempDir;

use crate::calendar::ErrorKind;
use crate::input::RoomType;
use crate::time::{Date, Month, Year};

/// Templates are scanned at 300 dpi; page sizes in the document derive
/// from the pixel dimensions at that density.
const PAGE_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;

/// File name of the final document, for example `Study_December_2025.pdf`.
#[must_use]
pub fn document_file_name(room: RoomType, month: Month, year: Year) -> String {
    format!("{}_{}_{:04}.pdf", room.label(), month.name(), year.as_usize())
}

/// File name of a per day intermediate, for example
/// `Calendar Friday Dec 05 2025.png`.
#[must_use]
pub fn page_file_name(date: Date) -> String {
    format!(
        "Calendar {} {} {:02} {:04}.png",
        date.week_day(),
        date.month().short_name(),
        date.day(),
        date.year().as_usize()
    )
}

/// Collects finished pages and turns them into one multi page document.
///
/// Pages are keyed by their date, so the final order never depends on the
/// order they were produced in. Intermediates live in a run scoped
/// temporary directory: concurrent runs can not clobber each other, and a
/// dropped assembler cleans up after itself. Call [`Self::preserve`]
/// instead of dropping to keep the intermediates of a failed run around.
pub struct PageAssembler {
    working_dir: TempDir,
    pages: BTreeMap<Date, RgbImage>,
}

impl PageAssembler {
    pub fn new() -> Result<Self, ErrorKind> {
        let working_dir = TempDir::with_prefix("room-calendar-pages-").map_err(|source| {
            ErrorKind::AssemblyIo {
                path: std::env::temp_dir(),
                source,
            }
        })?;

        debug!("assembling pages in {}", working_dir.path().display());

        Ok(Self {
            working_dir,
            pages: BTreeMap::new(),
        })
    }

    pub fn working_dir(&self) -> &Path {
        self.working_dir.path()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The queued dates in the order their pages will appear.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.pages.keys().copied()
    }

    /// Flattens a finished page, writes the PNG intermediate and queues
    /// the page under its date.
    pub fn add_page(&mut self, date: Date, page: &RgbaImage) -> Result<(), ErrorKind> {
        let flattened = flatten_onto_white(page);

        let path = self.working_dir.path().join(page_file_name(date));
        debug!("writing intermediate page {}", path.display());
        flattened
            .save(&path)
            .map_err(|error| ErrorKind::AssemblyIo {
                path: path.clone(),
                source: io_from_image_error(error),
            })?;

        let previous = self.pages.insert(date, flattened);
        debug_assert!(previous.is_none(), "one page per calendar day");

        Ok(())
    }

    /// Builds the document from all queued pages, in date order, and
    /// writes it to `path`. The intermediates are only removed once the
    /// assembler is dropped, which callers should delay until the write
    /// has succeeded.
    pub fn finish(&mut self, path: &Path, title: &str) -> Result<(), ErrorKind> {
        let assembly_error = |source: io::Error| ErrorKind::AssemblyIo {
            path: path.to_path_buf(),
            source,
        };

        let pages = std::mem::take(&mut self.pages);
        let mut queue = pages.iter();

        let (first_date, first_page) = queue.next().ok_or_else(|| {
            assembly_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "a document needs at least one page",
            ))
        })?;

        debug!("document starts with {}", first_date);
        let (doc, page_index, layer_index) = PdfDocument::new(
            title,
            mm_from_px(first_page.width()),
            mm_from_px(first_page.height()),
            "Page",
        );
        embed_page(&doc.get_page(page_index).get_layer(layer_index), first_page);

        for (_, page) in queue {
            let (page_index, layer_index) = doc.add_page(
                mm_from_px(page.width()),
                mm_from_px(page.height()),
                "Page",
            );
            embed_page(&doc.get_page(page_index).get_layer(layer_index), page);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(assembly_error)?;
        }

        let file = File::create(path).map_err(assembly_error)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|error| assembly_error(io::Error::new(io::ErrorKind::Other, error)))?;

        info!("wrote {} pages to {}", pages.len(), path.display());

        Ok(())
    }

    /// Keeps the intermediates of a failed run for diagnosis and returns
    /// where they ended up: copied into `preserve_dir` when one is
    /// configured, otherwise the temp directory is left on disk.
    pub fn preserve(self, preserve_dir: Option<&Path>) -> io::Result<PathBuf> {
        match preserve_dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                fs_extra::dir::copy(
                    self.working_dir.path(),
                    dir,
                    &fs_extra::dir::CopyOptions {
                        overwrite: true,
                        skip_exist: false,
                        ..Default::default()
                    },
                )
                .map_err(|error| io::Error::new(io::ErrorKind::Other, error))?;

                Ok(dir.to_path_buf())
            }
            None => Ok(self.working_dir.keep()),
        }
    }
}

/// Composites the page against white and drops the alpha channel, which
/// is what the PDF stream stores.
fn flatten_onto_white(page: &RgbaImage) -> RgbImage {
    let mut flattened = RgbImage::new(page.width(), page.height());

    for (x, y, pixel) in page.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let matte = 255.0 * (1.0 - alpha);

        flattened.put_pixel(
            x,
            y,
            Rgb([
                (r as f32 * alpha + matte) as u8,
                (g as f32 * alpha + matte) as u8,
                (b as f32 * alpha + matte) as u8,
            ]),
        );
    }

    flattened
}

fn mm_from_px(px: u32) -> Mm {
    Mm(px as f32 / PAGE_DPI * MM_PER_INCH)
}

fn embed_page(layer: &PdfLayerReference, page: &RgbImage) {
    let image = Image::from(ImageXObject {
        width: Px(page.width() as usize),
        height: Px(page.height() as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: page.as_raw().clone(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(0.0)),
            dpi: Some(PAGE_DPI),
            ..Default::default()
        },
    );
}

fn io_from_image_error(error: image::ImageError) -> io::Error {
    match error {
        image::ImageError::IoError(inner) => inner,
        other => io::Error::new(io::ErrorKind::Other, other),
    }
}
