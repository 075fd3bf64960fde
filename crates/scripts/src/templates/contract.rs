use tracing::debug;

use crate::abi::AbiParser;
use crate::error::Result;
use crate::templates::{write_encoded_accessor, write_preamble, write_run, write_title, write_usings};
use crate::types::ScriptTemplate;
use crate::writer::ScriptWriter;

pub const CONSTRUCTOR_ARGS_ACCESSOR: &str = "_getConstructorArgs()";

/// Plain contract deployment with the strategy's deployer method.
///
/// The ABI parser is only consulted when the constructor takes arguments.
pub fn render<P: AbiParser + ?Sized>(template: &ScriptTemplate, abi_parser: &P) -> Result<String> {
	let script_name = template.script_contract_name();
	let method = template.strategy.method();

	let constructor_args = match template.constructor.as_ref().filter(|c| c.takes_arguments()) {
		Some(constructor) => {
			debug!(contract = %template.contract_name, params = constructor.inputs.len(), "Generating constructor arguments");
			Some(abi_parser.generate_constructor_args(&constructor.inputs)?)
		}
		None => None,
	};

	let mut w = ScriptWriter::new();
	write_preamble(&mut w, &[])?;
	write_title(&mut w, &script_name, &format!("Deployment script for {}", template.contract_name))?;
	w.block(format_args!("contract {script_name} is TrebScript"), |w| {
		write_usings(w)?;
		write_run(w, |w| {
			let args = if constructor_args.is_some() { CONSTRUCTOR_ARGS_ACCESSOR } else { "" };
			w.line(format_args!(
				"address deployed = deployer.{method}(\"{}\").setLabel(label).deploy({args});",
				template.artifact_path
			))?;
			w.line(format_args!("console.log(\"{} deployed at:\", deployed);", template.contract_name))
		})?;

		if let Some(snippet) = &constructor_args {
			w.blank();
			write_encoded_accessor(
				w,
				CONSTRUCTOR_ARGS_ACCESSOR,
				"Constructor arguments: replace the placeholder values before deploying",
				&snippet.declarations,
				&snippet.encode,
			)?;
		}
		Ok(())
	})?;

	Ok(w.finish())
}
