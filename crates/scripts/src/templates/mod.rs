//! Script templates, one pure render function per deployment topology.
//!
//! Generated scripts are parsed by other tooling: the `Deploy<Name>` naming,
//! the import lines and the `@custom:env` annotations must stay stable.

pub mod contract;
pub mod library;
pub mod proxy;

use indoc::indoc;

use crate::error::Result;
use crate::writer::ScriptWriter;

pub const SOLIDITY_PRAGMA: &str = "pragma solidity ^0.8.0;";

const HEADER: &str = indoc! {r#"
	// SPDX-License-Identifier: UNLICENSED
"#};

const BASE_IMPORTS: &str = indoc! {r#"
	import {console} from "forge-std/console.sol";
	import {TrebScript} from "treb-sol/src/TrebScript.sol";
	import {Deployer} from "treb-sol/src/internal/sender/Deployer.sol";
	import {Senders} from "treb-sol/src/internal/sender/Senders.sol";
"#};

const ENV_ANNOTATIONS: &str = indoc! {r#"
	/**
	 * @custom:env {string} SENDER_NAME Sender used for the deployment
	 * @custom:env {string:optional} DEPLOYMENT_LABEL Label recorded with the deployment
	 */
"#};

/// License, pragma and imports shared by every script, plus any `extra_imports`.
pub(crate) fn write_preamble(w: &mut ScriptWriter, extra_imports: &[String]) -> Result<()> {
	w.lines(HEADER)?;
	w.line(SOLIDITY_PRAGMA)?;
	w.blank();
	w.lines(BASE_IMPORTS)?;
	for import in extra_imports {
		w.line(import)?;
	}
	w.blank();
	Ok(())
}

/// NatSpec block naming the generated script.
pub(crate) fn write_title(w: &mut ScriptWriter, script_name: &str, notice: &str) -> Result<()> {
	w.line("/**")?;
	w.line(format_args!(" * @title {script_name}"))?;
	w.line(format_args!(" * @notice {notice}"))?;
	w.line(" * @dev Generated by treb")?;
	w.line(" */")
}

/// `using` directives every script body starts with.
pub(crate) fn write_usings(w: &mut ScriptWriter) -> Result<()> {
	w.line("using Deployer for Senders.Sender;")?;
	w.line("using Deployer for Deployer.Deployment;")?;
	w.blank();
	Ok(())
}

/// Opens `run()`: env annotations, then the sender and label locals.
pub(crate) fn write_run<F>(w: &mut ScriptWriter, body: F) -> Result<()>
where
	F: FnOnce(&mut ScriptWriter) -> Result<()>,
{
	w.lines(ENV_ANNOTATIONS)?;
	w.block("function run() public broadcast", |w| {
		w.line("Senders.Sender storage deployer = sender(vm.envString(\"SENDER_NAME\"));")?;
		w.line("string memory label = vm.envOr(\"DEPLOYMENT_LABEL\", string(\"\"));")?;
		w.blank();
		body(w)
	})
}

/// Internal accessor returning encoded bytes built from an argument snippet.
pub(crate) fn write_encoded_accessor(
	w: &mut ScriptWriter,
	signature: &str,
	comment: &str,
	declarations: &str,
	encode: &str,
) -> Result<()> {
	w.block(format_args!("function {signature} internal pure returns (bytes memory)"), |w| {
		w.line(format_args!("// {comment}"))?;
		w.lines(declarations)?;
		w.blank();
		w.line(format_args!("return {encode};"))
	})
}
