mod utils;

pub mod calendar;
pub mod input;
pub mod time;

use std::fs::File;
use std::path::PathBuf;

use log::info;

use crate::calendar::{
    DateStamp, GenerateError, MichiganHolidays, Phase, Pipeline, StaticOverrideStore, StoreError,
};
use crate::input::toml_input::OverrideFile;
use crate::input::Config;

fn load_override_store(config: &Config) -> Result<StaticOverrideStore, StoreError> {
    let Some(path) = config.overrides_file() else {
        return Ok(StaticOverrideStore::default());
    };

    info!("loading holiday overrides from {}", path.display());

    let file = File::open(path)?;
    let parsed: OverrideFile =
        utils::toml_from_reader(file).map_err(|error| StoreError::Malformed(error.to_string()))?;

    let stored = parsed
        .into_stored()
        .map_err(|error| StoreError::Malformed(error.to_string()))?;

    Ok(StaticOverrideStore::new(stored))
}

/// Generates the calendar document described by `config` and returns the
/// path it was written to.
pub fn generate_calendar(config: &Config) -> Result<PathBuf, GenerateError> {
    let setup_error = |kind| GenerateError::new(Phase::Planning, kind);

    let store = load_override_store(config).map_err(|error| setup_error(error.into()))?;
    let stamp = DateStamp::load(config.assets_dir()).map_err(setup_error)?;
    let holidays = MichiganHolidays;

    info!("generating the {} room calendar", config.room());

    Pipeline::new(config, &store, &holidays, &stamp).run()
}
