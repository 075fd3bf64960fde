use std::fmt;
use std::str::FromStr;

use alloy::json_abi::{Function, JsonAbi, Param};
use serde::{Deserialize, Serialize};

use crate::error::ScriptError;

/// Deployment topology of a generated script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ScriptKind {
	Library,
	Contract,
	Proxy,
}

impl fmt::Display for ScriptKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			ScriptKind::Library => "library",
			ScriptKind::Contract => "contract",
			ScriptKind::Proxy => "proxy",
		})
	}
}

impl FromStr for ScriptKind {
	type Err = ScriptError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"library" => Ok(ScriptKind::Library),
			"contract" => Ok(ScriptKind::Contract),
			"proxy" => Ok(ScriptKind::Proxy),
			_ => Err(ScriptError::UnknownScriptKind(s.to_string())),
		}
	}
}

impl TryFrom<String> for ScriptKind {
	type Error = ScriptError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// Deterministic address strategy used by the deployer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DeployStrategy {
	Create2,
	#[default]
	Create3,
}

impl DeployStrategy {
	/// Name of the deployer method in the generated script.
	pub const fn method(&self) -> &'static str {
		match self {
			DeployStrategy::Create2 => "create2",
			DeployStrategy::Create3 => "create3",
		}
	}
}

impl fmt::Display for DeployStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.method())
	}
}

impl FromStr for DeployStrategy {
	type Err = ScriptError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"create2" => Ok(DeployStrategy::Create2),
			"create3" => Ok(DeployStrategy::Create3),
			_ => Err(ScriptError::UnknownStrategy(s.to_string())),
		}
	}
}

impl TryFrom<String> for DeployStrategy {
	type Error = ScriptError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// Constructor of the contract being deployed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorInfo {
	pub has_constructor: bool,
	#[serde(default)]
	pub inputs: Vec<Param>,
}

impl ConstructorInfo {
	pub fn from_abi(abi: &JsonAbi) -> Self {
		match &abi.constructor {
			Some(constructor) => Self { has_constructor: true, inputs: constructor.inputs.clone() },
			None => Self::default(),
		}
	}

	pub fn takes_arguments(&self) -> bool {
		self.has_constructor && !self.inputs.is_empty()
	}
}

/// Proxy wrapped around the implementation in proxy scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyInfo {
	/// Solidity name of the proxy contract, eg. `ERC1967Proxy`
	pub name: String,
	/// Import path of the proxy source
	pub import_path: String,
	/// Artifact path handed to the deployer
	pub artifact_path: String,
	/// Initializer called through the proxy after deployment
	#[serde(default)]
	pub initializer: Option<Function>,
}

impl ProxyInfo {
	/// The initializer, when it takes at least one argument.
	pub fn initializer_with_args(&self) -> Option<&Function> {
		self.initializer.as_ref().filter(|method| !method.inputs.is_empty())
	}
}

/// Everything needed to render one deployment script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTemplate {
	pub contract_name: String,
	pub artifact_path: String,
	pub kind: ScriptKind,
	#[serde(default)]
	pub strategy: DeployStrategy,
	#[serde(default)]
	pub constructor: Option<ConstructorInfo>,
	#[serde(default)]
	pub proxy: Option<ProxyInfo>,
}

impl ScriptTemplate {
	pub fn library(contract_name: impl Into<String>, artifact_path: impl Into<String>) -> Self {
		Self {
			contract_name: contract_name.into(),
			artifact_path: artifact_path.into(),
			kind: ScriptKind::Library,
			strategy: DeployStrategy::Create2,
			constructor: None,
			proxy: None,
		}
	}

	pub fn contract(
		contract_name: impl Into<String>,
		artifact_path: impl Into<String>,
		strategy: DeployStrategy,
		constructor: Option<ConstructorInfo>,
	) -> Self {
		Self {
			contract_name: contract_name.into(),
			artifact_path: artifact_path.into(),
			kind: ScriptKind::Contract,
			strategy,
			constructor,
			proxy: None,
		}
	}

	pub fn proxy(
		contract_name: impl Into<String>,
		artifact_path: impl Into<String>,
		strategy: DeployStrategy,
		proxy: ProxyInfo,
	) -> Self {
		Self {
			contract_name: contract_name.into(),
			artifact_path: artifact_path.into(),
			kind: ScriptKind::Proxy,
			strategy,
			constructor: None,
			proxy: Some(proxy),
		}
	}

	/// Solidity contract name of the generated script, eg. `DeployCounter` or `DeployCounterProxy`.
	pub fn script_contract_name(&self) -> String {
		match self.kind {
			ScriptKind::Proxy => format!("Deploy{}Proxy", self.contract_name),
			ScriptKind::Library | ScriptKind::Contract => format!("Deploy{}", self.contract_name),
		}
	}

	/// Conventional location of the generated script inside a foundry project.
	pub fn script_path(&self) -> String {
		format!("script/deploy/{}.s.sol", self.script_contract_name())
	}
}
