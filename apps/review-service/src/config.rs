//! Engine configuration loading.

use progress_core::EngineConfig;

use crate::error::Result;

/// Parse an engine config from JSON and validate it.
///
/// Missing sections and fields fall back to their defaults.
pub fn parse_engine_config(json: &str) -> Result<EngineConfig> {
    let config: EngineConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use progress_core::StreakMode;

    #[test]
    fn test_empty_object_is_default() {
        let config = parse_engine_config("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = parse_engine_config(
            r#"{"mastery": {"min_attempts": 3}, "stats": {"streak_mode": "consecutive"}}"#,
        )
        .unwrap();
        assert_eq!(config.mastery.min_attempts, 3);
        assert_eq!(config.stats.streak_mode, StreakMode::Consecutive);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let error = parse_engine_config("{not json").unwrap_err();
        assert!(matches!(error, ServiceError::Config(_)));
        assert_eq!(error.kind(), "invalid_input");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let error = parse_engine_config(r#"{"stats": {"lookback_days": 0}}"#).unwrap_err();
        assert!(matches!(error, ServiceError::Progress(_)));
    }
}
