use core::fmt;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use log::{debug, info, warn};
use thiserror::Error;

use crate::input::Config;
use crate::time::{Date, InvalidMonth};

mod assembler;
mod compositor;
mod holidays;
mod planner;
mod resolver;
mod stamp;
mod template;

pub use assembler::*;
pub use compositor::*;
pub use holidays::*;
pub use planner::*;
pub use resolver::*;
pub use stamp::*;
pub use template::*;

/// Where a generation run currently is. A run plans the dates, renders
/// one page per day and then assembles the document; a failure in any
/// phase ends the run and is reported together with the phase it
/// happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Planning,
    Rendering { index: usize },
    Assembling,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planning => f.write_str("planning the date range"),
            Self::Rendering { index } => write!(f, "rendering page {}", index + 1),
            Self::Assembling => f.write_str("assembling the document"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error(transparent)]
    InvalidMonth(#[from] InvalidMonth),
    #[error("missing image asset \"{path}\"")]
    MissingAsset {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("can not load the display font \"{path}\"")]
    FontUnavailable { path: PathBuf },
    #[error(transparent)]
    ResolverIo(#[from] StoreError),
    #[error("can not write \"{path}\"")]
    AssemblyIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A failed generation run. The caller gets the failing phase and the
/// originating error; it never gets a partial document.
#[derive(Debug, Error)]
#[error("calendar generation failed while {phase}")]
pub struct GenerateError {
    phase: Phase,
    #[source]
    kind: ErrorKind,
}

impl GenerateError {
    #[must_use]
    pub fn new(phase: Phase, kind: ErrorKind) -> Self {
        Self { phase, kind }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

pub(crate) fn load_image(path: &Path) -> Result<DynamicImage, ErrorKind> {
    debug!("loading image {}", path.display());

    image::open(path).map_err(|source| ErrorKind::MissingAsset {
        path: path.to_path_buf(),
        source,
    })
}

/// One generation run: plan the dates, render a page per day, assemble
/// the document.
///
/// The holiday calendar, the override store and the stamper are injected
/// so the pipeline can be exercised without a live environment.
pub struct Pipeline<'a> {
    config: &'a Config,
    store: &'a dyn OverrideStore,
    holidays: &'a dyn HolidayCalendar,
    stamper: &'a dyn Stamper,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        store: &'a dyn OverrideStore,
        holidays: &'a dyn HolidayCalendar,
        stamper: &'a dyn Stamper,
    ) -> Self {
        Self {
            config,
            store,
            holidays,
            stamper,
        }
    }

    /// Runs the whole pipeline and returns the path of the finished
    /// document. On failure the per day intermediates are kept for
    /// diagnosis and no document is written.
    pub fn run(&self) -> Result<PathBuf, GenerateError> {
        let config = self.config;

        let plan = PrintPlan::from_token(config.month_token(), config.year(), config.today())
            .map_err(|error| GenerateError::new(Phase::Planning, error.into()))?;

        info!(
            "printing {} {} pages for {} {}",
            plan.number_of_pages(),
            config.room(),
            plan.month().name(),
            plan.year()
        );

        let mut assembler = PageAssembler::new()
            .map_err(|kind| GenerateError::new(Phase::Planning, kind))?;

        if let Err(error) = self.render_all(&plan, &mut assembler) {
            return Err(self.preserve_and_fail(assembler, error));
        }

        let output = config.output_dir().join(document_file_name(
            config.room(),
            plan.month(),
            plan.year(),
        ));
        let title = format!(
            "{} Room Calendar {} {}",
            config.room(),
            plan.month().name(),
            plan.year()
        );

        if let Err(kind) = assembler.finish(&output, &title) {
            return Err(self.preserve_and_fail(
                assembler,
                GenerateError::new(Phase::Assembling, kind),
            ));
        }

        // dropping the assembler removes the intermediates of this run
        drop(assembler);
        info!("finished {}", output.display());

        Ok(output)
    }

    fn render_all(
        &self,
        plan: &PrintPlan,
        assembler: &mut PageAssembler,
    ) -> Result<(), GenerateError> {
        let resolver = Resolver::new(self.store, self.holidays);

        for (index, date) in plan.dates().enumerate() {
            self.render_page(date, &resolver, assembler)
                .map_err(|kind| GenerateError::new(Phase::Rendering { index }, kind))?;
        }

        Ok(())
    }

    /// Renders one day: pick the template, stamp the date, resolve
    /// overrides, composite, queue the page.
    fn render_page(
        &self,
        date: Date,
        resolver: &Resolver<'_>,
        assembler: &mut PageAssembler,
    ) -> Result<(), ErrorKind> {
        debug!("rendering {}", date);

        let slot = DaySlot::of(date.week_day());
        let template = load_template(self.config.assets_dir(), self.config.room(), slot)?;

        let mut page = template.into_rgba8();
        self.stamper.stamp(&mut page, date);

        let resolution = resolver.resolve(date)?;
        apply_overlays(&mut page, &resolution, self.config.assets_dir())?;

        assembler.add_page(date, &page)
    }

    fn preserve_and_fail(&self, assembler: PageAssembler, error: GenerateError) -> GenerateError {
        match assembler.preserve(self.config.preserve_dir()) {
            Ok(kept) => warn!("kept the finished pages in {} for diagnosis", kept.display()),
            Err(io_error) => warn!("could not keep the finished pages: {}", io_error),
        }

        error
    }
}
