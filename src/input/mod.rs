mod config;
mod room;

pub mod toml_input;

pub use config::*;
pub use room::*;
