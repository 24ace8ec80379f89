use std::env;
use std::ffi::OsStr;

use anyhow::Context as _;
use log::{error, info};
use seahorse::{App, Command, Context, Flag, FlagType};

use room_calendar::generate_calendar;
use room_calendar::input::{Config, RoomType};
use room_calendar::time::Year;

fn set_env_if_absent<K: AsRef<OsStr>, V: AsRef<OsStr>>(var: K, default: impl FnOnce() -> V) {
    if env::var(var.as_ref()).is_err() {
        env::set_var(var, default());
    }
}

fn main() {
    set_env_if_absent("RUST_APP_LOG", || "info");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");

    run();
}

mod seahorse_exts {
    use std::path::PathBuf;

    use anyhow::Context as _;
    use seahorse::Context;

    pub trait ContextExt {
        fn context(&self) -> &Context;

        fn required_string_flag(&self, name: &str) -> Result<String, anyhow::Error> {
            self.context()
                .string_flag(name)
                .with_context(|| anyhow::anyhow!("missing required flag \"{}\"", name))
        }

        fn optional_path_flag(&self, name: &str) -> Option<PathBuf> {
            self.context().string_flag(name).ok().map(PathBuf::from)
        }
    }

    impl ContextExt for Context {
        fn context(&self) -> &Context {
            self
        }
    }
}

use seahorse_exts::ContextExt;

fn build_config(context: &Context) -> anyhow::Result<Config> {
    let room: RoomType = context.required_string_flag("room")?.parse()?;
    let month = context.required_string_flag("month")?;

    let mut builder = Config::builder(room, month);

    if let Ok(year) = context.int_flag("year") {
        builder.year(Year::new(year as usize));
    }

    if let Some(assets) = context.optional_path_flag("assets") {
        let assets = dunce::canonicalize(&assets)
            .with_context(|| format!("asset directory \"{}\" not found", assets.display()))?;
        builder.assets_dir(assets);
    }

    if let Some(overrides) = context.optional_path_flag("overrides") {
        builder.overrides_file(overrides);
    }

    if let Some(output) = context.optional_path_flag("output") {
        builder.output_dir(output);
    }

    if let Some(preserve) = context.optional_path_flag("preserve-dir") {
        builder.preserve_dir(preserve);
    }

    Ok(builder.build())
}

fn try_make(context: &Context) -> anyhow::Result<()> {
    let config = build_config(context)?;

    let document = generate_calendar(&config)?;
    info!(
        "the calendar is ready: {} (send it to the staff printer to collect it)",
        document.display()
    );

    Ok(())
}

// seahorse actions are plain function pointers, so the error handling
// lives in a small named wrapper
fn make(context: &Context) {
    if let Err(e) = try_make(context) {
        error!("{:?}", e);
        ::std::process::exit(1);
    }
}

fn run() {
    let args: Vec<String> = env::args().collect();

    let make_command = Command::new("make")
        .usage(format!("{} make [args]", args[0]))
        .description("Renders one month of calendar pages and assembles the document.")
        .flag(
            Flag::new("room", FlagType::String)
                .description("Which room to print for: \"study\" or \"program\"."),
        )
        .flag(
            Flag::new("month", FlagType::String)
                .description("The month to print, as a name like \"June\" or a number."),
        )
        .flag(
            Flag::new("year", FlagType::Int)
                .description("[optional] Explicit year. Default: inferred from today."),
        )
        .flag(
            Flag::new("assets", FlagType::String).description(
                "[optional] Directory with templates, artwork and the font. Default: `assets/`",
            ),
        )
        .flag(
            Flag::new("overrides", FlagType::String)
                .description("[optional] Path to the holiday override file."),
        )
        .flag(Flag::new("output", FlagType::String).description(
            "[optional] Directory the finished document is written to. Default: `months/`",
        ))
        .flag(
            Flag::new("preserve-dir", FlagType::String)
                .description("[optional] Where to keep the per-day pages when a run fails."),
        )
        .action(make);

    let app = App::new(env!("CARGO_PKG_NAME"))
        .description(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .usage(format!("{} [command] [args]", args[0]))
        .command(make_command);

    app.run(args);
}
