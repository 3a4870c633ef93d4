use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use oxide_icon::config::{self, Config};
use oxide_icon::output::{default_output_path, open_in_viewer, save_png};
use oxide_icon::{CandidateCache, ExtractOptions, IconSource, extract_icon};

#[derive(Parser)]
#[command(version, about = "Extract the highest-resolution icon of a file as PNG.", long_about = None)]
struct Args {
    /// File (or package folder) whose icon to extract.
    input: PathBuf,

    /// Where to write the PNG. Defaults to `<output_dir>/<input stem>.png`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Resize the icon to SIZE×SIZE pixels.
    #[arg(short, long)]
    size: Option<u32>,

    /// Only accept package logos at least as large as the 256px target.
    /// Adds to the config file setting; it cannot switch it off.
    #[arg(long)]
    require_larger: bool,

    /// Allow a splash screen when no suitable package logo exists.
    /// Adds to the config file setting; it cannot switch it off.
    #[arg(long)]
    splash_fallback: bool,

    /// Config file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// External resize tool to use instead of `magick` on PATH.
    #[arg(long)]
    resize_tool: Option<PathBuf>,

    /// Open the written PNG in the default viewer.
    #[arg(long)]
    open: bool,

    /// Log per-candidate decisions.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "oxide_icon=debug"
    } else {
        "oxide_icon=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(args: &Args) -> Result<Config> {
    match args.config.clone().or_else(config::find_config) {
        Some(path) => {
            info!("Loading config from {:?}", path);
            config::load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))
        }
        None => Ok(Config::default()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;

    let mut options = ExtractOptions::from(&config);
    if args.size.is_some() {
        options.size = args.size;
    }
    options.require_larger |= args.require_larger;
    options.allow_splash_fallback |= args.splash_fallback;
    if args.resize_tool.is_some() {
        options.resize_tool = args.resize_tool.clone();
    }

    let cache = CandidateCache::new();
    let icon = extract_icon(&args.input, &options, &cache)
        .with_context(|| format!("Failed to extract an icon for {:?}", args.input))?;

    match &icon.source {
        IconSource::Package { path, native_size } => {
            info!("Source: package logo {:?} ({}px)", path, native_size)
        }
        IconSource::Shell { native_size } => info!("Source: shell icon ({}px)", native_size),
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, &config.output_dir));
    save_png(&icon.image, &output)
        .with_context(|| format!("Failed to write {:?}", output))?;

    println!("{}", output.display());

    if args.open || config.open_after {
        open_in_viewer(&output);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn boolean_flags_only_switch_settings_on() {
        Args::command().debug_assert();

        let args = Args::try_parse_from(["oxide-icon", "Game.exe", "--splash-fallback"]).unwrap();
        assert!(args.splash_fallback);
        assert!(!args.require_larger);

        let help = Args::command().render_long_help().to_string();
        assert_eq!(help.matches("cannot switch it off").count(), 2);
    }
}
