use tracing::debug;

use crate::env::{self, EnvironmentContract, SENDER_TYPE};
use crate::error::Result;
use crate::registry::SenderRegistry;
use crate::types::SenderConfig;
use crate::validator::validate;

/// Name given to senders rebuilt from the environment contract.
pub const ENV_SENDER_NAME: &str = "env";

/// Resolves the sender for a deployment.
///
/// Tiers, each only entered when the previous one does not apply:
/// 1. a non-empty `name` must be found in the registry,
/// 2. a `SENDER_TYPE` in the environment contract is decoded,
/// 3. the registry's default sender is used.
///
/// Errors from a tier are returned as is; a failed lookup never falls through.
pub struct SenderResolver<'a> {
	registry: &'a SenderRegistry,
}

impl<'a> SenderResolver<'a> {
	pub fn new(registry: &'a SenderRegistry) -> Self {
		Self { registry }
	}

	pub fn resolve(&self, name: &str, env: &EnvironmentContract) -> Result<SenderConfig> {
		if !name.is_empty() {
			debug!(sender = name, "Resolving sender by name");
			let sender = self.registry.lookup(name)?;
			validate(sender)?;
			return Ok(sender.clone());
		}

		if env.contains_key(SENDER_TYPE) {
			debug!("Resolving sender from environment");
			return env::decode(env, ENV_SENDER_NAME);
		}

		debug!("Resolving default sender");
		let sender = self.registry.default_sender()?;
		validate(sender)?;
		Ok(sender.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::env::{PRIVATE_KEY, SENDER_NAME};
	use crate::error::SenderError;
	use crate::types::SigningMethod;

	const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	fn key_sender(name: &str, private_key: &str) -> (String, SenderConfig) {
		(
			name.to_string(),
			SenderConfig::new(name, SigningMethod::PrivateKey { private_key: private_key.to_string() }),
		)
	}

	fn env_sender() -> EnvironmentContract {
		[(SENDER_TYPE, "private_key"), (SENDER_NAME, "ci"), (PRIVATE_KEY, KEY)].into_iter().collect()
	}

	#[test]
	fn test_empty_everything_has_no_default() {
		let registry = SenderRegistry::new();
		let err = SenderResolver::new(&registry).resolve("", &EnvironmentContract::new()).unwrap_err();
		assert!(matches!(err, SenderError::NoDefaultConfigured));
	}

	#[test]
	fn test_named_sender_wins_over_environment() {
		let mut registry = SenderRegistry::new();
		registry.load([key_sender("deployer", KEY)]);

		let sender = SenderResolver::new(&registry).resolve("DEPLOYER", &env_sender()).unwrap();
		assert_eq!(sender.name, "deployer");
	}

	#[test]
	fn test_named_miss_does_not_fall_back() {
		let mut registry = SenderRegistry::new();
		registry.load([key_sender("default", KEY)]);

		let err = SenderResolver::new(&registry).resolve("missing", &env_sender()).unwrap_err();
		assert!(matches!(err, SenderError::NotFound(name) if name == "missing"));
	}

	#[test]
	fn test_environment_used_when_no_name() {
		let mut registry = SenderRegistry::new();
		registry.load([key_sender("default", KEY)]);

		let sender = SenderResolver::new(&registry).resolve("", &env_sender()).unwrap();
		assert_eq!(sender.name, ENV_SENDER_NAME);
		assert_eq!(sender.method, SigningMethod::PrivateKey { private_key: KEY.to_string() });
	}

	#[test]
	fn test_environment_error_does_not_fall_back() {
		let mut registry = SenderRegistry::new();
		registry.load([key_sender("default", KEY)]);
		let env: EnvironmentContract = [(SENDER_TYPE, "hsm")].into_iter().collect();

		let err = SenderResolver::new(&registry).resolve("", &env).unwrap_err();
		assert!(matches!(err, SenderError::UnsupportedKind { .. }));
	}

	#[test]
	fn test_default_sender_used_last() {
		let mut registry = SenderRegistry::new();
		registry.load([key_sender("local", KEY), key_sender("other", KEY)]);

		let sender = SenderResolver::new(&registry).resolve("", &EnvironmentContract::new()).unwrap();
		assert_eq!(sender.name, "local");
	}

	#[test]
	fn test_ill_formed_registry_sender_is_rejected() {
		let mut registry = SenderRegistry::new();
		registry.load([key_sender("broken", "0x1234")]);
		let resolver = SenderResolver::new(&registry);

		assert!(matches!(
			resolver.resolve("broken", &EnvironmentContract::new()),
			Err(SenderError::InvalidFormat { field: "private_key", .. })
		));
		assert!(matches!(
			resolver.resolve("", &EnvironmentContract::new()),
			Err(SenderError::InvalidFormat { field: "private_key", .. })
		));
	}
}
