//! Config subcommand handlers.

use tabled::Tabled;

use meraki_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

const MASK: &str = "********";

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Network")]
    network_id: String,
    #[tabled(rename = "API URL")]
    api_url: String,
}

#[derive(serde::Serialize)]
struct ProfileSummary {
    name: String,
    default: bool,
    network_id: String,
    api_url: String,
}

/// Replace stored secrets so `config show` is safe to paste.
fn masked(mut cfg: Config) -> Config {
    for profile in cfg.profiles.values_mut() {
        if profile.api_key.is_some() {
            profile.api_key = Some(MASK.into());
        }
        if profile.cmx_secret.is_some() {
            profile.cmx_secret = Some(MASK.into());
        }
    }
    cfg
}

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = masked(config::load()?);
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| format!("{c:#?}"),
                |_| "config".into(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load()?;
            let active = config::active_profile_name(global, &cfg);

            let mut profiles: Vec<ProfileSummary> = cfg
                .profiles
                .iter()
                .map(|(name, p)| ProfileSummary {
                    default: *name == active,
                    name: name.clone(),
                    network_id: p.network_id.clone(),
                    api_url: p.api_url.clone(),
                })
                .collect();
            profiles.sort_by(|a, b| a.name.cmp(&b.name));

            let out = output::render_list(
                &global.output,
                &profiles,
                |p| ProfileRow {
                    name: p.name.clone(),
                    default: if p.default { "*" } else { "" }.into(),
                    network_id: p.network_id.clone(),
                    api_url: p.api_url.clone(),
                },
                |p| p.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
