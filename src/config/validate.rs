use anyhow::{Result, bail};
use axum::http::HeaderValue;

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if cfg.general.port == 0 {
        errors.push("general.port must be > 0".to_string());
    }

    if let Some(database) = cfg.database.as_ref() {
        if database.url.trim().is_empty() {
            errors.push("database.url must not be empty".to_string());
        }

        if database.max_connections == 0 {
            errors.push("database.max_connections must be > 0".to_string());
        }

        if database.min_idle > database.max_connections {
            errors.push(format!(
                "database.min_idle ({}) must be <= database.max_connections ({})",
                database.min_idle, database.max_connections
            ));
        }
    }

    if !cfg.cors.allows_any_origin() {
        let origins = cfg.cors.origins();
        if origins.is_empty() {
            errors.push("cors.allowed_origins must list at least one origin".to_string());
        }
        for origin in origins {
            if origin == "*" || HeaderValue::from_str(origin).is_err() {
                errors.push(format!("cors.allowed_origins contains invalid origin '{origin}'"));
            }
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::config::{AppConfig, CorsConfig, DatabaseConfig};

    #[test]
    fn default_config_is_valid() {
        validate(&AppConfig::default()).expect("defaults should validate");
    }

    #[test]
    fn collects_every_problem() {
        let mut cfg = AppConfig::default();
        cfg.general.host = "  ".to_string();
        cfg.general.port = 0;
        cfg.database = Some(DatabaseConfig {
            url: String::new(),
            max_connections: 2,
            min_idle: 5,
        });

        let message = validate(&cfg).expect_err("config should fail").to_string();
        assert!(message.contains("general.host must not be empty"));
        assert!(message.contains("general.port must be > 0"));
        assert!(message.contains("database.url must not be empty"));
        assert!(message.contains("database.min_idle (5) must be <= database.max_connections (2)"));
    }

    #[test]
    fn accepts_explicit_origin_list() {
        let cfg = AppConfig {
            cors: CorsConfig {
                allowed_origins: "http://localhost:5173, https://todos.example.com".to_string(),
            },
            ..AppConfig::default()
        };
        validate(&cfg).expect("origin list should validate");
        assert_eq!(
            cfg.cors.origins(),
            vec!["http://localhost:5173", "https://todos.example.com"]
        );
    }

    #[test]
    fn rejects_empty_or_mixed_origin_list() {
        let mut cfg = AppConfig::default();
        cfg.cors.allowed_origins = " , ".to_string();
        assert!(validate(&cfg).is_err());

        cfg.cors.allowed_origins = "http://a.example, *".to_string();
        let message = validate(&cfg).expect_err("wildcard in list").to_string();
        assert!(message.contains("invalid origin '*'"));
    }
}
