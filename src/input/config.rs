use std::path::{Path, PathBuf};

use crate::input::RoomType;
use crate::time::{Date, Year};

/// Everything one generation run needs to know. Created by the intake
/// layer (CLI) and immutable once handed to the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    room: RoomType,
    month_token: String,
    year: Option<Year>,
    today: Date,
    assets_dir: PathBuf,
    overrides_file: Option<PathBuf>,
    output_dir: PathBuf,
    preserve_dir: Option<PathBuf>,
}

pub struct ConfigBuilder {
    room: RoomType,
    month_token: String,
    year: Option<Year>,
    today: Option<Date>,
    assets_dir: Option<PathBuf>,
    overrides_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    preserve_dir: Option<PathBuf>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new(room: RoomType, month_token: impl Into<String>) -> Self {
        Self {
            room,
            month_token: month_token.into(),
            year: None,
            today: None,
            assets_dir: None,
            overrides_file: None,
            output_dir: None,
            preserve_dir: None,
        }
    }

    /// Overrides the inferred target year with an explicit one.
    pub fn year(&mut self, year: impl Into<Year>) -> &mut Self {
        self.year = Some(year.into());
        self
    }

    /// The reference date used for year inference. Defaults to the system
    /// clock; tests inject a fixed date here.
    pub fn today(&mut self, today: Date) -> &mut Self {
        self.today = Some(today);
        self
    }

    pub fn assets_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.assets_dir = Some(dir.into());
        self
    }

    pub fn overrides_file(&mut self, file: impl Into<PathBuf>) -> &mut Self {
        self.overrides_file = Some(file.into());
        self
    }

    pub fn output_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Where the per day intermediates are copied when a run fails.
    pub fn preserve_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.preserve_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn build(&self) -> Config {
        Config {
            room: self.room,
            month_token: self.month_token.clone(),
            year: self.year,
            today: self.today.unwrap_or_else(Date::today),
            assets_dir: self.assets_dir.clone().unwrap_or_else(|| "assets".into()),
            overrides_file: self.overrides_file.clone(),
            output_dir: self.output_dir.clone().unwrap_or_else(|| "months".into()),
            preserve_dir: self.preserve_dir.clone(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn builder(room: RoomType, month_token: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder::new(room, month_token)
    }

    pub fn room(&self) -> RoomType {
        self.room
    }

    /// The raw month token as typed by the operator. Parsed (and possibly
    /// rejected) by the date range planner.
    pub fn month_token(&self) -> &str {
        &self.month_token
    }

    pub fn year(&self) -> Option<Year> {
        self.year
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn overrides_file(&self) -> Option<&Path> {
        self.overrides_file.as_deref()
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn preserve_dir(&self) -> Option<&Path> {
        self.preserve_dir.as_deref()
    }
}
