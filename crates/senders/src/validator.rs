use crate::error::{Result, SenderError};
use crate::types::{ProposerConfig, SenderConfig, SenderType, SigningMethod};
use crate::validation::{is_valid_address, is_valid_derivation_path, is_valid_private_key};

/// Checks that the field required by the sender's kind is present and well formed.
///
/// Safe senders with a proposer also have the proposer checked.
pub fn validate(sender: &SenderConfig) -> Result<()> {
	let name = sender.name.as_str();
	match &sender.method {
		SigningMethod::PrivateKey { private_key } => {
			require(name, SenderType::PrivateKey, "private_key", private_key, is_valid_private_key)
		}
		SigningMethod::Ledger { derivation_path } => {
			require(name, SenderType::Ledger, "derivation_path", derivation_path, is_valid_derivation_path)
		}
		SigningMethod::Safe { safe_address, proposer } => {
			require(name, SenderType::Safe, "safe_address", safe_address, is_valid_address)?;
			match proposer {
				Some(proposer) => validate_proposer(name, proposer),
				None => Ok(()),
			}
		}
	}
}

fn validate_proposer(sender: &str, proposer: &ProposerConfig) -> Result<()> {
	match proposer {
		ProposerConfig::PrivateKey { private_key } => {
			require(sender, SenderType::PrivateKey, "proposer.private_key", private_key, is_valid_private_key)
		}
		ProposerConfig::Ledger { derivation_path } => {
			require(sender, SenderType::Ledger, "proposer.derivation_path", derivation_path, is_valid_derivation_path)
		}
	}
}

fn require(
	sender: &str,
	kind: SenderType,
	field: &'static str,
	value: &str,
	is_valid: fn(&str) -> bool,
) -> Result<()> {
	if value.is_empty() {
		return Err(SenderError::MissingField { sender: sender.to_string(), kind, field });
	}
	if !is_valid(value) {
		return Err(SenderError::InvalidFormat { sender: sender.to_string(), field });
	}
	Ok(())
}
