//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::{Config, DemoSection};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: &[&str] = &["pretty", "compact", "json", "full"];

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_logging(config)?;
    validate_demo(&config.demo)?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let logging = &config.logging;

    if !LOG_LEVELS.contains(&logging.level.to_ascii_lowercase().as_str()) {
        return Err(invalid(
            "logging.level",
            format!(
                "unknown level '{}'; expected one of: {}",
                logging.level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }

    if !LOG_FORMATS.contains(&logging.format.to_ascii_lowercase().as_str()) {
        return Err(invalid(
            "logging.format",
            format!(
                "unknown format '{}'; expected one of: {}",
                logging.format,
                LOG_FORMATS.join(", ")
            ),
        ));
    }

    if logging.directives.iter().any(|d| d.trim().is_empty()) {
        return Err(invalid("logging.directives", "directives must not be blank"));
    }

    Ok(())
}

/// Validate the `[demo]` section on its own.
///
/// Callers that override people or menu after loading run this on the
/// merged section.
///
/// # Errors
///
/// Returns [`ConfigError::ValidationError`] for an empty roster, a blank
/// name or an empty menu.
pub fn validate_demo(demo: &DemoSection) -> ConfigResult<()> {
    if demo.people.is_empty() {
        return Err(invalid("demo.people", "at least one person is required"));
    }

    if demo.people.iter().any(|name| name.trim().is_empty()) {
        return Err(invalid("demo.people", "names must not be blank"));
    }

    if demo.menu.is_empty() {
        return Err(invalid("demo.menu", "the menu must list at least one item"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_unknown_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_owned();

        let err = validate(&config).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { ref field, .. } if field == "logging.level")
        );
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let mut config = Config::default();
        config.logging.level = "DEBUG".to_owned();
        config.logging.format = "Json".to_owned();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_unknown_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_owned();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_blank_directive() {
        let mut config = Config::default();
        config.logging.directives.push("  ".to_owned());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_no_people() {
        let mut config = Config::default();
        config.demo.people.clear();

        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("demo.people"));
    }

    #[test]
    fn test_blank_person() {
        let mut config = Config::default();
        config.demo.people.push(String::new());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_whitespace_person_in_section() {
        let demo = DemoSection {
            people: vec!["John".to_owned(), "   ".to_owned()],
            ..DemoSection::default()
        };

        let err = validate_demo(&demo).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { ref field, .. } if field == "demo.people")
        );
    }

    #[test]
    fn test_empty_menu() {
        let mut config = Config::default();
        config.demo.menu.clear();

        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("demo.menu"));
    }
}
