use std::fmt;
use std::str::FromStr;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::error::{Result, SenderError};

/// The signing backend of a sender or proposer.
///
/// The string forms are the values written to `SENDER_TYPE` / `PROPOSER_TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SenderType {
	PrivateKey,
	Ledger,
	Safe,
}

impl SenderType {
	pub const fn as_str(&self) -> &'static str {
		match self {
			SenderType::PrivateKey => "private_key",
			SenderType::Ledger => "ledger",
			SenderType::Safe => "safe",
		}
	}
}

impl fmt::Display for SenderType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SenderType {
	type Err = SenderError;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"private_key" => Ok(SenderType::PrivateKey),
			"ledger" => Ok(SenderType::Ledger),
			"safe" => Ok(SenderType::Safe),
			other => Err(SenderError::UnsupportedKind { key: "type".to_string(), value: other.to_string() }),
		}
	}
}

/// Identity that proposes transactions to a Safe. Never itself a Safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposerConfig {
	PrivateKey { private_key: String },
	Ledger { derivation_path: String },
}

impl ProposerConfig {
	pub fn sender_type(&self) -> SenderType {
		match self {
			ProposerConfig::PrivateKey { .. } => SenderType::PrivateKey,
			ProposerConfig::Ledger { .. } => SenderType::Ledger,
		}
	}
}

/// How a sender signs, with exactly the fields its kind requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningMethod {
	PrivateKey { private_key: String },
	Ledger { derivation_path: String },
	Safe { safe_address: String, proposer: Option<ProposerConfig> },
}

impl SigningMethod {
	pub fn sender_type(&self) -> SenderType {
		match self {
			SigningMethod::PrivateKey { .. } => SenderType::PrivateKey,
			SigningMethod::Ledger { .. } => SenderType::Ledger,
			SigningMethod::Safe { .. } => SenderType::Safe,
		}
	}
}

/// A named signing identity loaded from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderConfig {
	pub name: String,
	pub method: SigningMethod,
}

impl SenderConfig {
	pub fn new(name: impl Into<String>, method: SigningMethod) -> Self {
		Self { name: name.into(), method }
	}

	pub fn sender_type(&self) -> SenderType {
		self.method.sender_type()
	}

	/// Account address of the sender when it can be derived without external devices.
	///
	/// Ledger senders return `None`; their address is only known to the device.
	pub fn address(&self) -> Result<Option<Address>> {
		match &self.method {
			SigningMethod::PrivateKey { private_key } => {
				let signer = PrivateKeySigner::from_str(private_key)
					.map_err(|_| SenderError::InvalidFormat { sender: self.name.clone(), field: "private_key" })?;
				Ok(Some(signer.address()))
			}
			SigningMethod::Ledger { .. } => Ok(None),
			SigningMethod::Safe { safe_address, .. } => {
				let address = Address::from_str(safe_address)
					.map_err(|_| SenderError::InvalidFormat { sender: self.name.clone(), field: "safe_address" })?;
				Ok(Some(address))
			}
		}
	}
}
