use common::utils::decode_hex_exact;

/// Private keys are 32 bytes: 64 hex characters after an optional `0x`.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Addresses are 20 bytes: 40 hex characters after an optional `0x`.
pub const ADDRESS_LEN: usize = 20;

const HARDENED_MARKER: char = '\'';

pub fn is_valid_private_key(value: &str) -> bool {
	decode_hex_exact(value, PRIVATE_KEY_LEN).is_ok()
}

pub fn is_valid_address(value: &str) -> bool {
	decode_hex_exact(value, ADDRESS_LEN).is_ok()
}

/// Checks BIP32 path syntax such as `m/44'/60'/0'/0/0`.
///
/// Every segment after the leading `m` must be a decimal index, optionally hardened
/// with a trailing `'`. Empty segments are rejected.
pub fn is_valid_derivation_path(path: &str) -> bool {
	if !path.starts_with("m/") {
		return false;
	}

	let segments: Vec<&str> = path.split('/').collect();
	if segments.len() < 2 {
		return false;
	}

	segments[1..].iter().all(|segment| {
		let index = segment.strip_suffix(HARDENED_MARKER).unwrap_or(segment);
		!index.is_empty() && index.bytes().all(|b| b.is_ascii_digit())
	})
}
