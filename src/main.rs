use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use helix_keys::cli::{self, CliArgs, CliCommand};
use helix_keys::config_paths;
use helix_keys::keymap::default_keymap_toml;
use helix_keys::settings::EngineSettings;

fn main() -> Result<ExitCode> {
    let args = CliArgs::parse();
    helix_keys::tracing::init(args.verbose);

    let settings = EngineSettings::load();
    let inherit_defaults = args.inherit_defaults || settings.inherit_defaults;

    match args.command {
        CliCommand::Check { path } => {
            let path = cli::resolve_keymap_path(path).context("No config directory available")?;
            let report = match cli::load_for_cli(Some(&path), false) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("{}: {}", path.display(), e);
                    return Ok(ExitCode::FAILURE);
                }
            };
            print!("{}", cli::render_check(&report));
        }

        CliCommand::Show { path, mode } => {
            let path = cli::resolve_keymap_path(path);
            let report = cli::load_for_cli(path.as_deref(), inherit_defaults)
                .context("Failed to load keymap")?;
            match report.bindings.root(mode) {
                Some(root) if !root.is_empty() => print!("{}", cli::render_tree(root)),
                _ => println!("no bindings for {} mode", mode),
            }
        }

        CliCommand::Simulate { keymap, mode, keys } => {
            let path = cli::resolve_keymap_path(keymap);
            let report = cli::load_for_cli(path.as_deref(), inherit_defaults)
                .context("Failed to load keymap")?;
            for warning in &report.warnings {
                eprintln!("warning: {}", warning);
            }

            let lines = cli::simulate(
                report.bindings,
                settings.dispatch_options(),
                mode.unwrap_or(settings.initial_mode),
                &keys,
            )?;
            for line in lines {
                println!("{}", line);
            }
        }

        CliCommand::Paths => {
            let show = |path: Option<std::path::PathBuf>| {
                path.map_or_else(|| "<unavailable>".to_string(), |p| p.display().to_string())
            };
            println!("config:   {}", show(config_paths::config_dir()));
            println!("keymap:   {}", show(config_paths::keymap_file()));
            println!("settings: {}", show(config_paths::settings_file()));
            println!("logs:     {}", show(config_paths::log_file()));
        }

        CliCommand::Defaults => print!("{}", default_keymap_toml()),

        CliCommand::Settings { init } => {
            if init {
                let path = config_paths::settings_file().context("No config directory available")?;
                if cli::init_settings(&path).map_err(anyhow::Error::msg)? {
                    println!("wrote {}", path.display());
                } else {
                    println!("{} already exists", path.display());
                }
            } else {
                print!("{}", cli::render_settings(&settings).map_err(anyhow::Error::msg)?);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
