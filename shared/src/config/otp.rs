//! One-time passcode configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lifetime and eviction settings for issued passcodes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds an issued code stays valid
    pub ttl_secs: u64,

    /// Seconds between background sweeps of expired codes
    pub sweep_interval_secs: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 300,           // 5 minutes
            sweep_interval_secs: 60, // 1 minute
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let ttl_secs = std::env::var("OTP_TTL_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .unwrap_or(300);
        let sweep_interval_secs = std::env::var("OTP_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .unwrap_or(60);

        Self {
            ttl_secs,
            sweep_interval_secs,
        }
    }

    /// Code lifetime as a `Duration`
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Sweep cadence as a `Duration`
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.ttl(), Duration::from_secs(300));
        assert_eq!(config.sweep_interval(), Duration::from_secs(60));
    }
}
