//! Config subcommand handlers.

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

const MASK: &str = "********";

fn parse_flag<T: std::str::FromStr>(field: &str, value: &str, expected: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be {expected}"),
    })
}

fn check_environment(value: &str) -> Result<(), CliError> {
    value
        .parse::<webdash_core::Environment>()
        .map(|_| ())
        .map_err(|_| CliError::Validation {
            field: "environment".into(),
            reason: "must be 'production' or 'development'".into(),
        })
}

/// Copy of `cfg` safe to print: plaintext passwords are masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(MASK.into());
        }
    }
    cfg
}

fn summary(cfg: &Config) -> String {
    let mut lines = vec![
        format!("config: {}", config::config_path().display()),
        format!(
            "default profile: {}",
            cfg.default_profile.as_deref().unwrap_or("default")
        ),
        format!(
            "defaults: output={} color={} timeout={}s",
            cfg.defaults.output, cfg.defaults.color, cfg.defaults.timeout
        ),
    ];
    for (name, p) in &cfg.profiles {
        lines.push(String::new());
        lines.push(format!("[{name}]"));
        lines.push(output::detail(&[
            ("api_url", p.api_url.clone()),
            ("environment", p.environment.clone()),
            ("email", p.email.clone().unwrap_or_default()),
            ("password", p.password.clone().unwrap_or_default()),
            ("password_env", p.password_env.clone().unwrap_or_default()),
            (
                "ca_cert",
                p.ca_cert
                    .as_ref()
                    .map(|c| c.display().to_string())
                    .unwrap_or_default(),
            ),
            ("insecure", p.insecure.map(|b| b.to_string()).unwrap_or_default()),
            ("timeout", p.timeout.map(|t| t.to_string()).unwrap_or_default()),
        ]));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("webdash configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let api_url: String = Input::new()
                .with_prompt("API URL")
                .default(webdash_config::DEFAULT_API_URL.into())
                .interact_text()
                .map_err(prompt_err)?;

            let env_choices = &["production", "development"];
            let env_selection = Select::new()
                .with_prompt("Environment (development disables secure cookies)")
                .items(env_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let email: String = Input::new()
                .with_prompt("Login email")
                .interact_text()
                .map_err(prompt_err)?;

            let pass = rpassword::prompt_password("Password (leave empty to be prompted at login): ")
                .map_err(prompt_err)?;

            let password = if pass.is_empty() {
                None
            } else {
                let store_choices = &[
                    "Store in system keyring (recommended)",
                    "Save to config file (plaintext)",
                ];
                let store_selection = Select::new()
                    .with_prompt("Where to store the password?")
                    .items(store_choices)
                    .default(0)
                    .interact()
                    .map_err(prompt_err)?;

                if store_selection == 0 {
                    config::store_password(&profile_name, &pass)?;
                    eprintln!("   ✓ Password stored in system keyring");
                    None
                } else {
                    Some(pass)
                }
            };

            let profile = Profile {
                api_url,
                environment: env_choices[env_selection].into(),
                email: Some(email).filter(|e| !e.is_empty()),
                password,
                ..Profile::default()
            };

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Sign in with: webdash login");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, summary, |_| {
                config::config_path().display().to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();

            match key.as_str() {
                "api_url" | "api-url" => {
                    let _: url::Url = parse_flag("api_url", &value, "an absolute URL")?;
                    profile.api_url = value;
                }
                "environment" | "env" => {
                    check_environment(&value)?;
                    profile.environment = value.to_ascii_lowercase();
                }
                "email" => profile.email = Some(value),
                "password_env" | "password-env" => profile.password_env = Some(value),
                "insecure" => profile.insecure = Some(parse_flag("insecure", &value, "'true' or 'false'")?),
                "timeout" => profile.timeout = Some(parse_flag("timeout", &value, "a number (seconds)")?),
                "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
                other => {
                    return Err(CliError::Validation {
                        field: other.into(),
                        reason: format!(
                            "unknown config key '{other}'. Valid keys: api_url, environment, \
                             email, password_env, insecure, timeout, ca_cert"
                        ),
                    });
                }
            }

            config::save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: webdash config init");
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name: profile_name,
                });
            }

            let secret = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if secret.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "value cannot be empty".into(),
                });
            }

            config::store_password(&profile_name, &secret)?;
            eprintln!("✓ Password stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}
