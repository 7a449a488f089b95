pub const DEFAULT_ENDPOINT: &str = "https://route53.amazonaws.com";

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    pub access_key_id: String,
    /// Prefix with '@' to read the key from a file.
    pub secret_access_key: String,
    pub session_token: Option<String>,
    #[serde(default = "default_endpoint")]
    pub endpoint: url::Url,
}

fn default_endpoint() -> url::Url {
    url::Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL")
}
