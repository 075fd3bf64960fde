//! Generation of Solidity argument declarations and encoding expressions from ABI items.

use alloy::json_abi::{Function, InternalType, Param};

use crate::error::{Result, ScriptError};

/// Source fragments injected into a generated accessor function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgsSnippet {
	/// One Solidity variable declaration per line, unindented.
	pub declarations: String,
	/// Expression producing the ABI encoded bytes, eg. `abi.encode(owner, fee)`.
	pub encode: String,
}

/// Turns ABI descriptions into script fragments.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
pub trait AbiParser {
	/// Declarations and `abi.encode(..)` for constructor arguments.
	fn generate_constructor_args(&self, inputs: &[Param]) -> Result<ArgsSnippet>;

	/// Declarations and the encoded call for an initializer method.
	fn generate_initializer_args(&self, method: &Function) -> Result<ArgsSnippet>;
}

/// Declares every argument with a zero-value placeholder for the user to fill in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidityAbiParser;

impl AbiParser for SolidityAbiParser {
	fn generate_constructor_args(&self, inputs: &[Param]) -> Result<ArgsSnippet> {
		let (declarations, names) = declare_all(inputs)?;
		Ok(ArgsSnippet { declarations, encode: format!("abi.encode({})", names.join(", ")) })
	}

	fn generate_initializer_args(&self, method: &Function) -> Result<ArgsSnippet> {
		let (declarations, names) = declare_all(&method.inputs)?;
		let mut args = vec![format!("\"{}\"", method.signature())];
		args.extend(names);
		Ok(ArgsSnippet { declarations, encode: format!("abi.encodeWithSignature({})", args.join(", ")) })
	}
}

fn declare_all(params: &[Param]) -> Result<(String, Vec<String>)> {
	let mut declarations = Vec::with_capacity(params.len());
	let mut names: Vec<String> = Vec::with_capacity(params.len());

	for (index, param) in params.iter().enumerate() {
		let name = if param.name.is_empty() { unused_name(params, &names, index) } else { param.name.clone() };
		declarations.push(declaration(param, &name)?);
		names.push(name);
	}

	Ok((declarations.join("\n"), names))
}

/// `arg{index}` for an unnamed parameter, suffixed with `_` until no other parameter uses it.
fn unused_name(params: &[Param], assigned: &[String], index: usize) -> String {
	let mut name = format!("arg{index}");
	while params.iter().any(|p| p.name == name) || assigned.contains(&name) {
		name.push('_');
	}
	name
}

fn declaration(param: &Param, name: &str) -> Result<String> {
	let ty = solidity_type(param, name)?;
	let location = if needs_memory(&param.ty) { " memory" } else { "" };

	Ok(match placeholder(&param.ty, &ty) {
		Some(value) => format!("{ty}{location} {name} = {value};"),
		None => format!("{ty}{location} {name};"),
	})
}

/// The type as written in Solidity source. Tuples use their struct name from `internalType`.
fn solidity_type(param: &Param, name: &str) -> Result<String> {
	if !param.ty.starts_with("tuple") {
		return Ok(param.ty.clone());
	}

	match &param.internal_type {
		Some(InternalType::Struct { contract: Some(contract), ty }) => Ok(format!("{contract}.{ty}")),
		Some(InternalType::Struct { contract: None, ty }) => Ok(ty.clone()),
		_ => Err(ScriptError::AbiParse {
			param: name.to_string(),
			reason: "tuple parameter has no struct internalType".to_string(),
		}),
	}
}

fn needs_memory(abi_ty: &str) -> bool {
	abi_ty == "string" || abi_ty == "bytes" || abi_ty.ends_with(']') || abi_ty.starts_with("tuple")
}

/// Zero value for the type, or `None` when a bare declaration already zero-initializes it.
fn placeholder(abi_ty: &str, solidity_ty: &str) -> Option<String> {
	if let Some(element) = solidity_ty.strip_suffix("[]") {
		return Some(format!("new {element}[](0)"));
	}
	if abi_ty.ends_with(']') || abi_ty.starts_with("tuple") {
		return None;
	}

	match abi_ty {
		"address" => Some("address(0)".to_string()),
		"bool" => Some("false".to_string()),
		"string" | "bytes" => Some("\"\"".to_string()),
		ty if ty.starts_with("uint") || ty.starts_with("int") => Some("0".to_string()),
		ty if ty.starts_with("bytes") => Some(format!("{ty}(0)")),
		_ => None,
	}
}
