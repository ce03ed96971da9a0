#![allow(clippy::unwrap_used)]
// Config loading through figment's sandboxed `Jail`.

use std::path::Path;

use figment::Jail;
use secrecy::ExposeSecret;

use webdash_config::{Config, Profile, load_config_from, resolve_password, save_config_to};

#[test]
fn test_missing_file_yields_defaults() {
    Jail::expect_with(|_jail| {
        let cfg = load_config_from(Path::new("absent.toml")).map_err(|e| e.to_string())?;
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.timeout, 30);
        assert!(cfg.profiles.is_empty());
        Ok(())
    });
}

#[test]
fn test_file_then_env_layering() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
            default_profile = "staging"

            [defaults]
            timeout = 10

            [profiles.staging]
            api_url = "https://staging.example.com/api"
            email = "admin@x.com"
            environment = "development"
            "#,
        )?;
        jail.set_env("WEBDASH_DEFAULTS__TIMEOUT", "5");
        jail.set_env("WEBDASH_PROFILES__STAGING__EMAIL", "ops@x.com");

        let cfg = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;
        assert_eq!(cfg.active_profile_name(None), "staging");
        assert_eq!(cfg.active_profile_name(Some("prod")), "prod");
        assert_eq!(cfg.defaults.timeout, 5);

        let staging = &cfg.profiles["staging"];
        assert_eq!(staging.api_url, "https://staging.example.com/api");
        assert_eq!(staging.email.as_deref(), Some("ops@x.com"));
        assert_eq!(staging.environment, "development");
        Ok(())
    });
}

#[test]
fn test_profile_defaults_fill_missing_fields() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[profiles.bare]\nemail = \"a@x.com\"\n")?;

        let cfg = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;
        let bare = &cfg.profiles["bare"];
        assert_eq!(bare.api_url, "https://wa.acibd.com/api/webdynamo/api");
        assert_eq!(bare.environment, "production");
        Ok(())
    });
}

#[test]
fn test_password_from_profile_env_var() {
    Jail::expect_with(|jail| {
        jail.set_env("MY_DASH_PW", "hunter22");
        let profile = Profile {
            password_env: Some("MY_DASH_PW".into()),
            password: Some("plaintext".into()),
            ..Profile::default()
        };

        let secret = resolve_password(&profile, "jail").map_err(|e| e.to_string())?;
        assert_eq!(secret.expose_secret(), "hunter22");
        Ok(())
    });
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut cfg = Config::default();
    cfg.profiles.insert(
        "default".into(),
        Profile {
            email: Some("admin@x.com".into()),
            timeout: Some(12),
            ..Profile::default()
        },
    );
    save_config_to(&cfg, &path).unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.profiles["default"], cfg.profiles["default"]);
}
