//! Lectio - a reader for bilingual critical editions.
//!
//! # Usage
//!
//! ```bash
//! lectio                      # view ./body.json in the terminal
//! lectio edition/body.json --no-witnesses
//! lectio --export site/index.html --expand-all
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lectio::app::App;
use lectio::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, preferences_path, save_config_flags,
};
use lectio::export::{ExportOptions, export_html};
use lectio::payload::{DEFAULT_PAYLOAD_PATH, PayloadSource};
use lectio::perf;
use lectio::theme::FilePreferenceStore;

/// A reader for bilingual critical editions
#[derive(Parser, Debug)]
#[command(name = "lectio", version, about, long_about = None)]
struct Cli {
    /// Edition payload (JSON)
    #[arg(value_name = "PAYLOAD", default_value = DEFAULT_PAYLOAD_PATH)]
    payload: PathBuf,

    /// Hide the table of contents pane
    #[arg(long)]
    no_toc: bool,

    /// Leave out the witness card
    #[arg(long)]
    no_witnesses: bool,

    /// Open every section's notes
    #[arg(long)]
    expand_all: bool,

    /// Write a standalone HTML page instead of starting the viewer
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Enable timing logs
    #[arg(long)]
    perf: bool,

    /// Write detailed render debug events to a file
    #[arg(long, value_name = "PATH")]
    render_debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    let render_debug_log_path = effective
        .render_debug_log
        .clone()
        .or_else(|| std::env::var_os("LECTIO_RENDER_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(render_debug_log_path.as_deref()) {
        tracing::warn!(
            "Failed to initialize render debug log {}: {err:#}",
            render_debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
        );
    }

    let source = PayloadSource::from_path(cli.payload);
    let prefs = FilePreferenceStore::new(preferences_path());

    if let Some(out) = cli.export {
        let options = ExportOptions {
            witnesses: !effective.no_witnesses,
            expand_all: effective.expand_all,
        };
        let sections = export_html(&source, &out, options, &prefs)?;
        println!("Wrote {} ({sections} sections)", out.display());
        return Ok(());
    }

    let mut app = App::new(source)
        .with_toc_visible(!effective.no_toc)
        .with_witnesses_visible(!effective.no_witnesses)
        .with_expand_all(effective.expand_all)
        .with_preferences(Box::new(prefs))
        .with_config_paths(
            Some(global_path),
            local_path.exists().then_some(local_path),
        );

    app.run().context("Application error")
}
