//! Sender resolution: turns a named sender configuration into a validated signing
//! identity and serializes it into the environment contract read by deployment scripts.

pub mod config;
pub mod env;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod types;
pub mod validation;
pub mod validator;

pub use env::EnvironmentContract;
pub use error::{Result, SenderError};
pub use registry::SenderRegistry;
pub use resolver::SenderResolver;
pub use types::{ProposerConfig, SenderConfig, SenderType, SigningMethod};
