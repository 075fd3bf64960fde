use thiserror::Error;

use crate::types::SenderType;

pub type Result<T> = core::result::Result<T, SenderError>;

/// Errors raised while loading, validating or resolving senders.
///
/// Messages name the sender, kind and field involved but never echo key material.
#[derive(Debug, Error)]
pub enum SenderError {
	#[error("Sender '{0}' not found")]
	NotFound(String),

	#[error("No default sender configured: add a sender named 'default' or one of the fallback names")]
	NoDefaultConfigured,

	#[error("Sender '{sender}' of type {kind} is missing required field '{field}'")]
	MissingField { sender: String, kind: SenderType, field: &'static str },

	#[error("Sender '{sender}' has an invalid {field}")]
	InvalidFormat { sender: String, field: &'static str },

	#[error("Sender '{0}' has no type; overrides must target a sender declared in the configuration file or set its type")]
	UntypedSender(String),

	#[error("Unsupported sender type '{value}' for {key}")]
	UnsupportedKind { key: String, value: String },

	#[error("Failed to load sender configuration: {0}")]
	Config(#[from] ::config::ConfigError),
}
