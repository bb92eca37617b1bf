use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    let database = &cfg.database;
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

    if database.connect_timeout_secs == 0 {
        errors.push("database.connect_timeout_secs must be > 0".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::config::{AppConfig, DatabaseConfig};

    #[test]
    fn accepts_config_with_database_url() {
        let cfg = AppConfig {
            database: DatabaseConfig::with_url("sqlite::memory:"),
            ..AppConfig::default()
        };

        validate(&cfg).expect("config should be valid");
    }

    #[test]
    fn reports_every_problem_at_once() {
        let mut cfg = AppConfig::default();
        cfg.general.host = "  ".to_string();
        cfg.database.min_idle = 20;
        cfg.database.connect_timeout_secs = 0;

        let message = validate(&cfg)
            .expect_err("config should be rejected")
            .to_string();

        assert!(message.contains("general.host must not be empty"));
        assert!(message.contains("database.url must not be empty"));
        assert!(message.contains("database.min_idle (20) must be <= database.max_connections (10)"));
        assert!(message.contains("database.connect_timeout_secs must be > 0"));
    }
}
