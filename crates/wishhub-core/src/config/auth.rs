//! Bearer-credential validation configuration.

use serde::{Deserialize, Serialize};

/// Settings for validating bearer credentials issued by the external
/// identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the identity provider.
    pub jwt_secret: String,
    /// Clock-skew leeway in seconds when validating expiry.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

fn default_leeway() -> u64 {
    5
}
