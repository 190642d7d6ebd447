//! Config subcommand handlers.

use rmspivot_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

const OUTPUT_VALUES: [&str; 5] = ["table", "json", "json-compact", "yaml", "plain"];
const COLOR_VALUES: [&str; 3] = ["auto", "always", "never"];

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init => {
            let path = config::config_path();
            if path.exists()
                && !util::confirm(
                    &format!("'{}' already exists. Overwrite with defaults?", path.display()),
                    global.yes,
                )?
            {
                return Ok(());
            }

            config::save_config(&Config::default())?;
            if !global.quiet {
                eprintln!("Configuration written to {}", path.display());
            }
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = match global.output {
                OutputFormat::Json => output::render_json_pretty(&cfg),
                OutputFormat::JsonCompact => output::render_json_compact(&cfg),
                OutputFormat::Yaml => output::render_yaml(&cfg),
                // Table and plain both show the TOML the file would hold.
                _ => toml::to_string_pretty(&cfg).map_err(config::ConfigError::from)?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();

            match key.as_str() {
                "priority_alarms" | "priority-alarms" => {
                    let alarms: Vec<String> = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_owned)
                        .collect();
                    if alarms.is_empty() {
                        return Err(CliError::Validation {
                            field: "priority_alarms".into(),
                            reason: "expected a comma-separated list of alarm names".into(),
                        });
                    }
                    cfg.priority_alarms = alarms;
                }
                "defaults.output" => {
                    if !OUTPUT_VALUES.contains(&value.as_str()) {
                        return Err(CliError::Validation {
                            field: "defaults.output".into(),
                            reason: format!("must be one of: {}", OUTPUT_VALUES.join(", ")),
                        });
                    }
                    cfg.defaults.output = value;
                }
                "defaults.color" => {
                    if !COLOR_VALUES.contains(&value.as_str()) {
                        return Err(CliError::Validation {
                            field: "defaults.color".into(),
                            reason: format!("must be one of: {}", COLOR_VALUES.join(", ")),
                        });
                    }
                    cfg.defaults.color = value;
                }
                other => {
                    return Err(CliError::Validation {
                        field: other.into(),
                        reason: format!(
                            "unknown config key '{other}'. Valid keys: priority_alarms, \
                             defaults.output, defaults.color"
                        ),
                    });
                }
            }

            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Set {key}");
            }
            Ok(())
        }
    }
}
