mod client;
mod config;
mod models;
mod sign;

pub use client::*;
pub use config::*;
