//! Environment contract exchanged with the script runner.
//!
//! The key names are read by deployment scripts and must not change. Optional
//! values are represented by absent keys, never by empty strings.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Result, SenderError};
use crate::types::{ProposerConfig, SenderConfig, SenderType, SigningMethod};
use crate::validator::validate;

pub const SENDER_TYPE: &str = "SENDER_TYPE";
pub const SENDER_NAME: &str = "SENDER_NAME";
pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
pub const DERIVATION_PATH: &str = "DERIVATION_PATH";
pub const SAFE_ADDRESS: &str = "SAFE_ADDRESS";
pub const PROPOSER_TYPE: &str = "PROPOSER_TYPE";
pub const PROPOSER_PRIVATE_KEY: &str = "PROPOSER_PRIVATE_KEY";
pub const PROPOSER_DERIVATION_PATH: &str = "PROPOSER_DERIVATION_PATH";

/// Every key the contract can carry.
pub const CONTRACT_KEYS: [&str; 8] = [
	SENDER_TYPE,
	SENDER_NAME,
	PRIVATE_KEY,
	DERIVATION_PATH,
	SAFE_ADDRESS,
	PROPOSER_TYPE,
	PROPOSER_PRIVATE_KEY,
	PROPOSER_DERIVATION_PATH,
];

/// Flat string mapping passed to the script runner as process environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentContract(BTreeMap<String, String>);

impl EnvironmentContract {
	pub fn new() -> Self {
		Self::default()
	}

	/// Captures the contract keys that are set in the current process environment.
	pub fn from_process_env() -> Self {
		CONTRACT_KEYS.iter().filter_map(|key| std::env::var(key).ok().map(|value| (*key, value))).collect()
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.0.insert(key.into(), value.into());
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Key/value pairs in key order, suitable for `Command::envs`.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentContract {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}

/// Serializes a sender into the environment contract.
///
/// `SENDER_NAME` is written for the script's benefit but is not read back by [`decode`].
pub fn encode(sender: &SenderConfig) -> EnvironmentContract {
	let mut env = EnvironmentContract::new();
	env.insert(SENDER_TYPE, sender.sender_type().as_str());
	env.insert(SENDER_NAME, sender.name.as_str());

	match &sender.method {
		SigningMethod::PrivateKey { private_key } => env.insert(PRIVATE_KEY, private_key.as_str()),
		SigningMethod::Ledger { derivation_path } => env.insert(DERIVATION_PATH, derivation_path.as_str()),
		SigningMethod::Safe { safe_address, proposer } => {
			env.insert(SAFE_ADDRESS, safe_address.as_str());
			if let Some(proposer) = proposer {
				env.insert(PROPOSER_TYPE, proposer.sender_type().as_str());
				match proposer {
					ProposerConfig::PrivateKey { private_key } => {
						env.insert(PROPOSER_PRIVATE_KEY, private_key.as_str())
					}
					ProposerConfig::Ledger { derivation_path } => {
						env.insert(PROPOSER_DERIVATION_PATH, derivation_path.as_str())
					}
				}
			}
		}
	}

	env
}

/// Rebuilds a sender from the environment contract and validates it.
///
/// The contract does not carry a usable name, so the caller supplies one.
pub fn decode(env: &EnvironmentContract, name: &str) -> Result<SenderConfig> {
	let kind = parse_kind(env, SENDER_TYPE)?;
	let field = |key: &str| env.get(key).unwrap_or_default().to_string();

	let method = match kind {
		SenderType::PrivateKey => SigningMethod::PrivateKey { private_key: field(PRIVATE_KEY) },
		SenderType::Ledger => SigningMethod::Ledger { derivation_path: field(DERIVATION_PATH) },
		SenderType::Safe => {
			let proposer = match env.get(PROPOSER_TYPE) {
				None => None,
				Some(_) => Some(match parse_kind(env, PROPOSER_TYPE)? {
					SenderType::PrivateKey => ProposerConfig::PrivateKey { private_key: field(PROPOSER_PRIVATE_KEY) },
					SenderType::Ledger => {
						ProposerConfig::Ledger { derivation_path: field(PROPOSER_DERIVATION_PATH) }
					}
					SenderType::Safe => {
						return Err(SenderError::UnsupportedKind {
							key: PROPOSER_TYPE.to_string(),
							value: SenderType::Safe.to_string(),
						});
					}
				}),
			};
			SigningMethod::Safe { safe_address: field(SAFE_ADDRESS), proposer }
		}
	};

	let sender = SenderConfig::new(name, method);
	validate(&sender)?;
	debug!(sender = name, kind = %kind, "Decoded sender from environment");
	Ok(sender)
}

fn parse_kind(env: &EnvironmentContract, key: &str) -> Result<SenderType> {
	let value = env.get(key).unwrap_or_default();
	value.parse().map_err(|_| SenderError::UnsupportedKind { key: key.to_string(), value: value.to_string() })
}
