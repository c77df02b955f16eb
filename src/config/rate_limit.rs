//! Rate limit configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Fixed-window rate limit settings, per client IP.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    /// Window duration in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u32,

    /// General traffic cap per window
    #[serde(default = "default_general_max")]
    pub general_max: u32,

    /// Analyze endpoint cap per window
    #[serde(default = "default_analyze_max")]
    pub analyze_max: u32,
}

impl RateLimitSettings {
    /// Validate rate limit settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_secs == 0 || self.general_max == 0 || self.analyze_max == 0 {
            return Err(ValidationError::InvalidRateLimit);
        }
        Ok(())
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            general_max: default_general_max(),
            analyze_max: default_analyze_max(),
        }
    }
}

fn default_window_secs() -> u32 {
    900 // 15 minutes
}

fn default_general_max() -> u32 {
    100
}

fn default_analyze_max() -> u32 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_defaults() {
        let settings = RateLimitSettings::default();
        assert_eq!(settings.window_secs, 900);
        assert_eq!(settings.general_max, 100);
        assert_eq!(settings.analyze_max, 30);
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        let settings = RateLimitSettings {
            window_secs: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = RateLimitSettings {
            analyze_max: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
