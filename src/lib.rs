//! Aries Bridge - a thin REST front for a Hyperledger Aries agent's admin API

pub mod config;
pub mod error;

pub mod agent;
pub mod api;

pub use config::Config;
pub use error::{Error, Result};
