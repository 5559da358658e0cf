//! Infrastructure-level concerns shared by the binary and the web layer:
//! runtime configuration and logger setup.

pub mod config;
pub mod logging;

pub use config::Config;
