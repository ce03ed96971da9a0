//! CLI configuration: `webdash_config` plus `GlobalOpts` overrides.

use webdash_core::DashboardConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use webdash_config::{
    Config, Profile, config_path, load_config_or_default, resolve_password, save_config,
    store_password,
};

/// The profile in effect for this invocation.
#[derive(Debug)]
pub struct Resolved {
    pub name: String,
    pub profile: Profile,
    pub dashboard: DashboardConfig,
}

pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Resolve the active profile and apply flag overrides.
///
/// An unconfigured default profile falls back to built-in defaults; an
/// explicitly requested profile must exist.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let cfg = load_config_or_default();
    let name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profiles.get(&name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                available: available_profiles(&cfg),
                name,
            });
        }
        None => Profile::default(),
    };

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    profile.timeout = global.timeout.or(profile.timeout).or(Some(cfg.defaults.timeout));

    let dashboard = webdash_config::profile_to_dashboard_config(&profile)?;
    Ok(Resolved {
        name,
        profile,
        dashboard,
    })
}
