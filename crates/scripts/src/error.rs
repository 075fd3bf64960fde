use thiserror::Error;

pub type Result<T> = core::result::Result<T, ScriptError>;

#[derive(Debug, Error)]
pub enum ScriptError {
	#[error("Unknown script kind '{0}'")]
	UnknownScriptKind(String),

	#[error("Unknown deployment strategy '{0}'")]
	UnknownStrategy(String),

	#[error("Proxy script for '{contract}' requires proxy info")]
	MissingProxyInfo { contract: String },

	#[error("Cannot generate arguments for parameter '{param}': {reason}")]
	AbiParse { param: String, reason: String },

	/// The template itself is broken; not recoverable by changing the input.
	#[error("Failed to render script template: {0}")]
	Render(String),
}

impl From<std::fmt::Error> for ScriptError {
	fn from(e: std::fmt::Error) -> Self {
		ScriptError::Render(e.to_string())
	}
}
