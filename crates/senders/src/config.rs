use std::collections::BTreeMap;
use std::path::Path;

use ::config::{Config, Environment, File, FileFormat, Map};
use common::utils::expand_env_vars;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Result, SenderError};
use crate::types::{ProposerConfig, SenderConfig, SenderType, SigningMethod};

/// Prefix for environment overrides, eg. `TREB__SENDERS__DEPLOYER__PRIVATE_KEY`.
pub const ENV_OVERRIDE_PREFIX: &str = "TREB";

/// Top level of the sender configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendersFile {
	/// Senders keyed by name
	#[serde(default)]
	pub senders: BTreeMap<String, SenderEntry>,
}

/// A sender as written in the configuration file, or a partial override of one.
///
/// Only the field matching `type` is used; `${VAR}` references are expanded on conversion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SenderEntry {
	/// One of `private_key`, `ledger`, `safe`
	#[serde(rename = "type")]
	pub kind: Option<String>,

	/// Hex private key (private_key senders)
	pub private_key: Option<String>,

	/// BIP32 path (ledger senders)
	pub derivation_path: Option<String>,

	/// Safe address (safe senders)
	pub safe_address: Option<String>,

	/// Identity proposing transactions to the Safe
	pub proposer: Option<ProposerEntry>,
}

/// A Safe proposer as written in the configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProposerEntry {
	/// One of `private_key`, `ledger`
	#[serde(rename = "type")]
	pub kind: Option<String>,

	pub private_key: Option<String>,

	pub derivation_path: Option<String>,
}

impl ProposerEntry {
	fn apply(&mut self, patch: ProposerEntry) {
		self.kind = patch.kind.or(self.kind.take());
		self.private_key = patch.private_key.or(self.private_key.take());
		self.derivation_path = patch.derivation_path.or(self.derivation_path.take());
	}
}

impl SenderEntry {
	/// Overwrites every field `patch` sets.
	pub fn apply(&mut self, patch: SenderEntry) {
		self.kind = patch.kind.or(self.kind.take());
		self.private_key = patch.private_key.or(self.private_key.take());
		self.derivation_path = patch.derivation_path.or(self.derivation_path.take());
		self.safe_address = patch.safe_address.or(self.safe_address.take());
		match (&mut self.proposer, patch.proposer) {
			(Some(proposer), Some(patch)) => proposer.apply(patch),
			(proposer, patch @ Some(_)) => *proposer = patch,
			(_, None) => {}
		}
	}

	/// Converts the raw entry into a typed sender named `name`.
	///
	/// Missing fields become empty strings so that validation reports them.
	pub fn into_sender<F>(self, name: &str, expand: F) -> Result<SenderConfig>
	where
		F: Fn(&str) -> String,
	{
		let value = |field: Option<String>| field.map(|v| expand(&v)).unwrap_or_default();

		let kind = self.kind.ok_or_else(|| SenderError::UntypedSender(name.to_string()))?;
		let method = match kind.parse::<SenderType>()? {
			SenderType::PrivateKey => SigningMethod::PrivateKey { private_key: value(self.private_key) },
			SenderType::Ledger => SigningMethod::Ledger { derivation_path: value(self.derivation_path) },
			SenderType::Safe => {
				let proposer = match self.proposer {
					Some(proposer) => Some(match proposer.kind.as_deref().unwrap_or_default().parse::<SenderType>()? {
						SenderType::PrivateKey => {
							ProposerConfig::PrivateKey { private_key: value(proposer.private_key) }
						}
						SenderType::Ledger => {
							ProposerConfig::Ledger { derivation_path: value(proposer.derivation_path) }
						}
						SenderType::Safe => {
							return Err(SenderError::UnsupportedKind {
								key: "proposer.type".to_string(),
								value: SenderType::Safe.to_string(),
							});
						}
					}),
					None => None,
				};
				SigningMethod::Safe { safe_address: value(self.safe_address), proposer }
			}
		};

		Ok(SenderConfig::new(name, method))
	}
}

impl SendersFile {
	/// Layers `overrides` on top of the file's senders.
	///
	/// Override names are matched case-insensitively, exact match first, since
	/// environment keys arrive lowercased. Unmatched overrides become new entries.
	pub fn merge(&mut self, overrides: SendersFile) {
		for (name, patch) in overrides.senders {
			let folded = name.to_lowercase();
			let key = if self.senders.contains_key(&name) {
				Some(name.clone())
			} else {
				self.senders.keys().find(|key| key.to_lowercase() == folded).cloned()
			};

			match key.and_then(|key| self.senders.get_mut(&key)) {
				Some(entry) => {
					debug!(sender = %name, "Applying environment override");
					entry.apply(patch);
				}
				None => {
					debug!(sender = %name, "Environment override declares a new sender");
					self.senders.insert(name, patch);
				}
			}
		}
	}

	/// Converts every entry, keyed by its configured name.
	pub fn into_senders<F>(self, expand: F) -> Result<BTreeMap<String, SenderConfig>>
	where
		F: Fn(&str) -> String,
	{
		self.senders
			.into_iter()
			.map(|(name, entry)| -> Result<(String, SenderConfig)> {
				let sender = entry.into_sender(&name, &expand)?;
				Ok((name, sender))
			})
			.collect()
	}
}

/// Loads senders from a TOML file, layered with `TREB__` environment overrides.
pub fn load_senders(path: &Path) -> Result<BTreeMap<String, SenderConfig>> {
	load_senders_with_env(path, None)
}

/// Like [`load_senders`], reading overrides from `env` instead of the process
/// environment when given.
pub fn load_senders_with_env(path: &Path, env: Option<Map<String, String>>) -> Result<BTreeMap<String, SenderConfig>> {
	let mut file: SendersFile =
		Config::builder().add_source(File::from(path).format(FileFormat::Toml)).build()?.try_deserialize()?;

	let overrides: SendersFile = Config::builder()
		.add_source(Environment::with_prefix(ENV_OVERRIDE_PREFIX).prefix_separator("__").separator("__").source(env))
		.build()?
		.try_deserialize()?;
	file.merge(overrides);

	let senders = file.into_senders(expand_env_vars)?;
	info!(path = %path.display(), count = senders.len(), "Read sender configuration");
	Ok(senders)
}

/// Parses senders from TOML text without environment overrides.
pub fn parse_senders<F>(toml: &str, expand: F) -> Result<BTreeMap<String, SenderConfig>>
where
	F: Fn(&str) -> String,
{
	let file: SendersFile =
		Config::builder().add_source(File::from_str(toml, FileFormat::Toml)).build()?.try_deserialize()?;
	file.into_senders(expand)
}

#[cfg(test)]
mod tests {
	use super::*;
	use common::utils::expand_env_vars_with;
	use eyre::Result;
	use std::io::Write;

	const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	const SENDERS_TOML: &str = r#"
[senders.deployer]
type = "private_key"
private_key = "${DEPLOYER_KEY}"

[senders.hardware]
type = "ledger"
derivation_path = "m/44'/60'/0'/0/0"

[senders.multisig]
type = "safe"
safe_address = "0x742d35cc6634c0532925a3b844bc454e4438f44e"

[senders.multisig.proposer]
type = "ledger"
derivation_path = "m/44'/60'/0'/0/1"
"#;

	fn lookup(name: &str) -> Option<String> {
		(name == "DEPLOYER_KEY").then(|| KEY.to_string())
	}

	#[test]
	fn test_parse_senders() -> Result<()> {
		let senders = parse_senders(SENDERS_TOML, |v| expand_env_vars_with(v, lookup))?;

		assert_eq!(senders.len(), 3);
		assert_eq!(senders["deployer"].method, SigningMethod::PrivateKey { private_key: KEY.to_string() });
		assert_eq!(senders["hardware"].name, "hardware");
		assert_eq!(
			senders["multisig"].method,
			SigningMethod::Safe {
				safe_address: "0x742d35cc6634c0532925a3b844bc454e4438f44e".to_string(),
				proposer: Some(ProposerConfig::Ledger { derivation_path: "m/44'/60'/0'/0/1".to_string() }),
			}
		);
		Ok(())
	}

	#[test]
	fn test_unset_variable_becomes_empty_field() -> Result<()> {
		let senders = parse_senders(SENDERS_TOML, |v| expand_env_vars_with(v, |_| None))?;
		assert_eq!(senders["deployer"].method, SigningMethod::PrivateKey { private_key: String::new() });
		Ok(())
	}

	#[test]
	fn test_missing_field_is_empty() -> Result<()> {
		let toml = "[senders.hw]\ntype = \"ledger\"\n";
		let senders = parse_senders(toml, |v| v.to_string())?;
		assert_eq!(senders["hw"].method, SigningMethod::Ledger { derivation_path: String::new() });
		Ok(())
	}

	#[test]
	fn test_unknown_type() {
		let toml = "[senders.kms]\ntype = \"aws_kms\"\n";
		let err = parse_senders(toml, |v| v.to_string()).unwrap_err();
		assert!(matches!(err, SenderError::UnsupportedKind { ref value, .. } if value == "aws_kms"));
	}

	#[test]
	fn test_safe_proposer_rejected() {
		let toml = "[senders.s]\ntype = \"safe\"\nsafe_address = \"0x742d35cc6634c0532925a3b844bc454e4438f44e\"\n\n[senders.s.proposer]\ntype = \"safe\"\n";
		let err = parse_senders(toml, |v| v.to_string()).unwrap_err();
		assert!(matches!(err, SenderError::UnsupportedKind { ref key, .. } if key == "proposer.type"));
	}

	#[test]
	fn test_load_senders_from_file() -> Result<()> {
		let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
		file.write_all(b"[senders.hardware]\ntype = \"ledger\"\nderivation_path = \"m/44'/60'/0'/0/0\"\n")?;

		let senders = load_senders(file.path())?;
		assert_eq!(senders["hardware"].method, SigningMethod::Ledger { derivation_path: "m/44'/60'/0'/0/0".to_string() });
		Ok(())
	}

	fn overrides(vars: &[(&str, &str)]) -> Map<String, String> {
		vars.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect()
	}

	fn senders_file(contents: &str) -> Result<tempfile::NamedTempFile> {
		let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
		file.write_all(contents.as_bytes())?;
		Ok(file)
	}

	#[test]
	fn test_env_override_matches_file_name_case_insensitively() -> Result<()> {
		let file = senders_file(
			"[senders.Deployer]\ntype = \"ledger\"\nderivation_path = \"m/44'/60'/0'/0/0\"\n\n\
			 [senders.multisig]\ntype = \"safe\"\nsafe_address = \"0x742d35cc6634c0532925a3b844bc454e4438f44e\"\n\n\
			 [senders.multisig.proposer]\ntype = \"ledger\"\nderivation_path = \"m/44'/60'/0'/0/1\"\n",
		)?;
		let env = overrides(&[
			("TREB__SENDERS__DEPLOYER__DERIVATION_PATH", "m/44'/60'/1'/0/0"),
			("TREB__SENDERS__MULTISIG__PROPOSER__DERIVATION_PATH", "m/44'/60'/0'/0/7"),
		]);

		let senders = load_senders_with_env(file.path(), Some(env))?;

		assert_eq!(senders.len(), 2);
		assert_eq!(senders["Deployer"].method, SigningMethod::Ledger { derivation_path: "m/44'/60'/1'/0/0".to_string() });
		assert_eq!(
			senders["multisig"].method,
			SigningMethod::Safe {
				safe_address: "0x742d35cc6634c0532925a3b844bc454e4438f44e".to_string(),
				proposer: Some(ProposerConfig::Ledger { derivation_path: "m/44'/60'/0'/0/7".to_string() }),
			}
		);
		Ok(())
	}

	#[test]
	fn test_env_override_for_undeclared_sender_names_it() -> Result<()> {
		let file = senders_file("[senders.hardware]\ntype = \"ledger\"\nderivation_path = \"m/44'/60'/0'/0/0\"\n")?;
		let env = overrides(&[("TREB__SENDERS__GHOST__PRIVATE_KEY", KEY)]);

		let err = load_senders_with_env(file.path(), Some(env)).unwrap_err();
		assert!(matches!(err, SenderError::UntypedSender(ref name) if name == "ghost"));
		assert!(!err.to_string().contains(KEY));
		Ok(())
	}

	#[test]
	fn test_env_override_declares_typed_sender() -> Result<()> {
		let file = senders_file("[senders.hardware]\ntype = \"ledger\"\nderivation_path = \"m/44'/60'/0'/0/0\"\n")?;
		let env = overrides(&[("TREB__SENDERS__CI__TYPE", "private_key"), ("TREB__SENDERS__CI__PRIVATE_KEY", KEY)]);

		let senders = load_senders_with_env(file.path(), Some(env))?;
		assert_eq!(senders["ci"].method, SigningMethod::PrivateKey { private_key: KEY.to_string() });
		assert!(senders.contains_key("hardware"));
		Ok(())
	}

	#[test]
	fn test_merge_prefers_exact_name() {
		let entry = |path: &str| SenderEntry {
			kind: Some("ledger".to_string()),
			derivation_path: Some(path.to_string()),
			..Default::default()
		};
		let mut file = SendersFile {
			senders: BTreeMap::from([("DEV".to_string(), entry("m/0")), ("dev".to_string(), entry("m/1"))]),
		};
		let patch = SenderEntry { derivation_path: Some("m/2".to_string()), ..Default::default() };
		file.merge(SendersFile { senders: BTreeMap::from([("dev".to_string(), patch)]) });

		assert_eq!(file.senders["DEV"].derivation_path.as_deref(), Some("m/0"));
		assert_eq!(file.senders["dev"].derivation_path.as_deref(), Some("m/2"));
		assert_eq!(file.senders["dev"].kind.as_deref(), Some("ledger"));
	}

	#[test]
	fn test_untyped_file_entry() {
		let err = parse_senders("[senders.hw]\nderivation_path = \"m/44'/60'/0'/0/0\"\n", |v| v.to_string()).unwrap_err();
		assert!(matches!(err, SenderError::UntypedSender(ref name) if name == "hw"));
	}

	#[test]
	fn test_load_senders_missing_file() {
		let err = load_senders(Path::new("/nonexistent/treb.toml")).unwrap_err();
		assert!(matches!(err, SenderError::Config(_)));
	}
}
