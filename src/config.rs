#[cfg(feature = "cli")]
use crate::common::{ConfigSnafu, Result};

/// Standard AWS variables, used unless an `R53SYNC_` variable overrides them.
#[cfg(feature = "cli")]
const AWS_ENV: [(&str, &str); 3] = [
    ("AWS_ACCESS_KEY_ID", "route53.access_key_id"),
    ("AWS_SECRET_ACCESS_KEY", "route53.secret_access_key"),
    ("AWS_SESSION_TOKEN", "route53.session_token"),
];

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    pub route53: crate::route53::Config,
}

impl Config {
    pub fn into_client(self) -> crate::common::Result<crate::route53::Route53Client> {
        crate::route53::Route53Client::try_from(self.route53)
    }
}

#[cfg(feature = "cli")]
impl Config {
    /// Reads `R53SYNC_ROUTE53__<FIELD>` variables, falling back to `AWS_*`.
    pub fn from_env() -> Result<Self> {
        let to_config_error = |err: ::config::ConfigError| {
            ConfigSnafu {
                message: err.to_string(),
                prefix: "R53SYNC",
            }
            .build()
        };

        let mut builder = ::config::Config::builder();
        for (var, key) in AWS_ENV {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_default(key, value).map_err(to_config_error)?;
            }
        }

        builder
            .add_source(
                ::config::Environment::with_prefix("R53SYNC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(to_config_error)
    }
}
