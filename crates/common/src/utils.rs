use std::sync::LazyLock;

use alloy::hex;
use eyre::{Result, eyre};
use regex::{Captures, Regex};

static ENV_VAR_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid"));

/// Strips a single leading `0x` from a hex string.
pub fn strip_hex_prefix(value: &str) -> &str {
	value.strip_prefix("0x").unwrap_or(value)
}

/// Decodes a hex string (optional `0x` prefix) that must encode exactly `expected_len` bytes.
///
/// The length is checked on the stripped string before decoding, so a doubled prefix
/// like `0x0x..` is rejected rather than silently stripped twice.
pub fn decode_hex_exact(value: &str, expected_len: usize) -> Result<Vec<u8>> {
	let stripped = strip_hex_prefix(value);
	if stripped.len() != expected_len * 2 {
		return Err(eyre!("Expected {} hex characters, got {}", expected_len * 2, stripped.len()));
	}
	if !stripped.bytes().all(|b| b.is_ascii_hexdigit()) {
		return Err(eyre!("Value contains non-hex characters"));
	}
	Ok(hex::decode(stripped)?)
}

/// Replaces every `${VAR}` in `input` with the value returned by `lookup`.
///
/// Unknown variables expand to the empty string.
pub fn expand_env_vars_with<F>(input: &str, lookup: F) -> String
where
	F: Fn(&str) -> Option<String>,
{
	ENV_VAR_PATTERN.replace_all(input, |caps: &Captures| lookup(&caps[1]).unwrap_or_default()).into_owned()
}

/// Replaces every `${VAR}` in `input` from the process environment.
pub fn expand_env_vars(input: &str) -> String {
	expand_env_vars_with(input, |name| std::env::var(name).ok())
}
