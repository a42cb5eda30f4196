use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let supabase_url = require("SUPABASE_URL")?;
    let supabase_anon_key = require("SUPABASE_ANON_KEY")?;

    let env = parse_environment(&or_default("GEOLENS_ENV", "development"));
    let log_level = or_default("GEOLENS_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("GEOLENS_REQUEST_TIMEOUT_SECS", "30")?;
    let score_window_days = parse_i64("GEOLENS_SCORE_WINDOW_DAYS", "30")?;
    if score_window_days <= 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GEOLENS_SCORE_WINDOW_DAYS".to_string(),
            reason: "must be a positive number of days".to_string(),
        });
    }
    let refresh_token = lookup("GEOLENS_REFRESH_TOKEN").ok();

    Ok(AppConfig {
        supabase_url,
        supabase_anon_key,
        env,
        log_level,
        request_timeout_secs,
        score_window_days,
        refresh_token,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("SUPABASE_URL", "https://project.supabase.co");
        m.insert("SUPABASE_ANON_KEY", "test-anon-key");
        m
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_supabase_url() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SUPABASE_URL"),
            "expected MissingEnvVar(SUPABASE_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_anon_key() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("SUPABASE_URL", "https://project.supabase.co");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SUPABASE_ANON_KEY"),
            "expected MissingEnvVar(SUPABASE_ANON_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_defaults() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.score_window_days, 30);
        assert!(cfg.refresh_token.is_none());
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = full_env();
        map.insert("GEOLENS_ENV", "production");
        map.insert("GEOLENS_LOG_LEVEL", "debug");
        map.insert("GEOLENS_REQUEST_TIMEOUT_SECS", "5");
        map.insert("GEOLENS_SCORE_WINDOW_DAYS", "90");
        map.insert("GEOLENS_REFRESH_TOKEN", "tok-123");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.request_timeout_secs, 5);
        assert_eq!(cfg.score_window_days, 90);
        assert_eq!(cfg.refresh_token.as_deref(), Some("tok-123"));
    }

    #[test]
    fn build_app_config_rejects_invalid_timeout() {
        let mut map = full_env();
        map.insert("GEOLENS_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GEOLENS_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(GEOLENS_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_nonpositive_window() {
        let mut map = full_env();
        map.insert("GEOLENS_SCORE_WINDOW_DAYS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GEOLENS_SCORE_WINDOW_DAYS"),
            "expected InvalidEnvVar(GEOLENS_SCORE_WINDOW_DAYS), got: {result:?}"
        );
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("test-anon-key"), "anon key leaked: {debug}");
        assert!(debug.contains("[redacted]"));
    }
}
