use tracing::info;

use crate::abi::AbiParser;
use crate::error::Result;
use crate::templates::{contract, library, proxy};
use crate::types::{ScriptKind, ScriptTemplate};

/// Renders deployment scripts, delegating argument encoding to an [`AbiParser`].
pub struct ScriptGenerator<P> {
	abi_parser: P,
}

impl<P: AbiParser> ScriptGenerator<P> {
	pub fn new(abi_parser: P) -> Self {
		Self { abi_parser }
	}

	pub fn generate(&self, template: &ScriptTemplate) -> Result<String> {
		info!(
			contract = %template.contract_name,
			kind = %template.kind,
			strategy = %template.strategy,
			"Generating deployment script"
		);

		match template.kind {
			ScriptKind::Library => library::render(template),
			ScriptKind::Contract => contract::render(template, &self.abi_parser),
			ScriptKind::Proxy => proxy::render(template, &self.abi_parser),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::abi::{MockAbiParser, SolidityAbiParser};
	use crate::error::ScriptError;
	use crate::types::{DeployStrategy, ProxyInfo};

	#[test]
	fn test_dispatch_by_kind() {
		let generator = ScriptGenerator::new(SolidityAbiParser);

		let library = generator.generate(&ScriptTemplate::library("MathLib", "src/MathLib.sol:MathLib")).unwrap();
		assert!(library.contains("contract DeployMathLib is TrebScript"));

		let contract = generator
			.generate(&ScriptTemplate::contract("Counter", "src/Counter.sol:Counter", DeployStrategy::Create3, None))
			.unwrap();
		assert!(contract.contains("deployer.create3(\"src/Counter.sol:Counter\").setLabel(label).deploy();"));
		assert!(!contract.contains("_getConstructorArgs"));

		let proxy = generator
			.generate(&ScriptTemplate::proxy(
				"Counter",
				"src/Counter.sol:Counter",
				DeployStrategy::Create2,
				ProxyInfo {
					name: "ERC1967Proxy".to_string(),
					import_path: "@openzeppelin/contracts/proxy/ERC1967/ERC1967Proxy.sol".to_string(),
					artifact_path: "ERC1967Proxy.sol:ERC1967Proxy".to_string(),
					initializer: None,
				},
			))
			.unwrap();
		assert!(proxy.contains("contract DeployCounterProxy is TrebScript"));
	}

	#[test]
	fn test_proxy_without_info_fails() {
		let generator = ScriptGenerator::new(MockAbiParser::new());
		let mut template = ScriptTemplate::contract("Counter", "src/Counter.sol:Counter", DeployStrategy::Create3, None);
		template.kind = ScriptKind::Proxy;

		assert!(matches!(generator.generate(&template), Err(ScriptError::MissingProxyInfo { .. })));
	}

	#[test]
	fn test_collaborator_error_propagates() {
		let mut parser = MockAbiParser::new();
		parser.expect_generate_constructor_args().returning(|_| {
			Err(ScriptError::AbiParse { param: "config".to_string(), reason: "unsupported".to_string() })
		});
		let generator = ScriptGenerator::new(parser);

		let template = ScriptTemplate::contract(
			"Vault",
			"src/Vault.sol:Vault",
			DeployStrategy::Create2,
			Some(crate::types::ConstructorInfo {
				has_constructor: true,
				inputs: vec![alloy::json_abi::Param {
					ty: "tuple".to_string(),
					name: "config".to_string(),
					components: vec![],
					internal_type: None,
				}],
			}),
		);
		assert!(matches!(generator.generate(&template), Err(ScriptError::AbiParse { .. })));
	}
}
