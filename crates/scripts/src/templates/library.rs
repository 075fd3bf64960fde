use crate::error::Result;
use crate::templates::{write_preamble, write_run, write_title, write_usings};
use crate::types::{DeployStrategy, ScriptTemplate};
use crate::writer::ScriptWriter;

/// Libraries are always deployed with CREATE2 and take no constructor arguments.
pub fn render(template: &ScriptTemplate) -> Result<String> {
	let script_name = template.script_contract_name();
	let method = DeployStrategy::Create2.method();
	let mut w = ScriptWriter::new();

	write_preamble(&mut w, &[])?;
	write_title(&mut w, &script_name, &format!("Deployment script for the {} library", template.contract_name))?;
	w.block(format_args!("contract {script_name} is TrebScript"), |w| {
		write_usings(w)?;
		write_run(w, |w| {
			w.line(format_args!(
				"address deployed = deployer.{method}(\"{}\").setLabel(label).deploy();",
				template.artifact_path
			))?;
			w.line(format_args!("console.log(\"{} deployed at:\", deployed);", template.contract_name))
		})
	})?;

	Ok(w.finish())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_library_script() {
		let script = render(&ScriptTemplate::library("MathLib", "src/MathLib.sol:MathLib")).unwrap();

		assert!(script.starts_with("// SPDX-License-Identifier: UNLICENSED\npragma solidity ^0.8.0;\n"));
		assert!(script.contains("contract DeployMathLib is TrebScript {"));
		assert!(script.contains("deployer.create2(\"src/MathLib.sol:MathLib\").setLabel(label).deploy();"));
		assert!(script.contains("@custom:env {string} SENDER_NAME"));
		assert!(!script.contains("create3"));
	}

	#[test]
	fn test_library_ignores_strategy() {
		let mut template = ScriptTemplate::library("MathLib", "src/MathLib.sol:MathLib");
		template.strategy = DeployStrategy::Create3;

		assert!(render(&template).unwrap().contains("deployer.create2("));
	}
}
