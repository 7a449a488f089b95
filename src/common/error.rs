use snafu::prelude::*;

use super::MatchKey;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Hosted zone {zone:?} not found"))]
    NotFound { zone: String },
    #[snafu(display("More than 1 hosted zone found for name {zone:?} ({count} matches)"))]
    Ambiguous { zone: String, count: usize },
    #[snafu(display("Duplicate key {key} in {side} records"))]
    DuplicateKey { side: &'static str, key: MatchKey },
    #[snafu(display("Invalid record {name:?}: {message}"))]
    ValidationError { name: String, message: String },
    #[snafu(display("{method} {url} failed: {source}"))]
    RequestError {
        url: String,
        method: String,
        source: ureq::Error,
    },
    #[snafu(display("{message}"))]
    ResponseError { message: String },
    #[snafu(display("{message}: {source}"))]
    ProviderError {
        message: String,
        source: Box<dyn std::error::Error>,
    },
    #[snafu(display("{message}: {source}"))]
    DocumentError {
        message: String,
        source: Box<dyn std::error::Error>,
    },
    #[snafu(display("Invalid configuration for {prefix}: {message}"))]
    ConfigError { message: String, prefix: String },
    #[snafu(display("Failed to read confirmation: {source}"))]
    PromptError { source: std::io::Error },
    #[snafu(display("Input closed while waiting for confirmation"))]
    Interrupted,
    #[snafu(display("Failed to write output: {source}"))]
    OutputError { source: std::io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
