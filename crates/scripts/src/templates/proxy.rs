use indoc::indoc;
use tracing::debug;

use crate::abi::AbiParser;
use crate::error::{Result, ScriptError};
use crate::templates::{write_encoded_accessor, write_preamble, write_run, write_title, write_usings};
use crate::types::ScriptTemplate;
use crate::writer::ScriptWriter;

pub const INITIALIZER_ACCESSOR: &str = "_getInitializerData()";
pub const PROXY_ARGS_ACCESSOR: &str = "_getProxyConstructorArgs(address implementation)";

const EMPTY_INITIALIZER_BODY: &str = indoc! {r#"
	// No initializer configured: the proxy is deployed without init data.
	// To initialize through the proxy, return the encoded call instead, eg.
	//   return abi.encodeWithSignature("initialize(address)", owner);
	return "";
"#};

const PROXY_ARGS_BODY: &str = indoc! {r#"
	// ERC1967Proxy style: constructor(address implementation, bytes memory data)
	return abi.encode(implementation, _getInitializerData());
	// TransparentUpgradeableProxy style: constructor(address implementation, address admin, bytes memory data)
	// return abi.encode(implementation, admin, _getInitializerData());
"#};

/// Implementation plus proxy, both deployed with the strategy's deployer method.
pub fn render<P: AbiParser + ?Sized>(template: &ScriptTemplate, abi_parser: &P) -> Result<String> {
	let proxy =
		template.proxy.as_ref().ok_or_else(|| ScriptError::MissingProxyInfo { contract: template.contract_name.clone() })?;

	let script_name = template.script_contract_name();
	let method = template.strategy.method();
	let name = &template.contract_name;

	let initializer_args = match proxy.initializer_with_args() {
		Some(initializer) => {
			debug!(contract = %name, initializer = %initializer.name, "Generating initializer arguments");
			Some((initializer.name.as_str(), abi_parser.generate_initializer_args(initializer)?))
		}
		None => None,
	};

	let mut w = ScriptWriter::new();
	write_preamble(&mut w, &[format!("import {{{}}} from \"{}\";", proxy.name, proxy.import_path)])?;
	write_title(&mut w, &script_name, &format!("Deployment script for {name} behind {}", proxy.name))?;
	w.block(format_args!("contract {script_name} is TrebScript"), |w| {
		write_usings(w)?;
		write_run(w, |w| {
			w.line("// Deploy implementation")?;
			w.line(format_args!(
				"address implementation = deployer.{method}(\"{}\").setLabel(label).deploy();",
				template.artifact_path
			))?;
			w.line(format_args!("console.log(\"{name} implementation deployed at:\", implementation);"))?;
			w.blank();
			w.line("// Deploy proxy")?;
			w.line(format_args!(
				"address proxy = deployer.{method}(\"{}\").setLabel(label).deploy(_getProxyConstructorArgs(implementation));",
				proxy.artifact_path
			))?;
			w.line(format_args!("console.log(\"{name} proxy deployed at:\", proxy);"))
		})?;

		w.blank();
		w.block(format_args!("function {PROXY_ARGS_ACCESSOR} internal pure returns (bytes memory)"), |w| {
			w.lines(PROXY_ARGS_BODY)
		})?;

		w.blank();
		match &initializer_args {
			Some((initializer, snippet)) => write_encoded_accessor(
				w,
				INITIALIZER_ACCESSOR,
				&format!("Arguments for {initializer}: replace the placeholder values before deploying"),
				&snippet.declarations,
				&snippet.encode,
			),
			None => w.block(format_args!("function {INITIALIZER_ACCESSOR} internal pure returns (bytes memory)"), |w| {
				w.lines(EMPTY_INITIALIZER_BODY)
			}),
		}
	})?;

	Ok(w.finish())
}
