pub mod common;
pub mod config;
pub mod display;
pub mod document;
pub mod route53;
pub mod service;

pub use crate::config::Config;
