use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::{Result, SenderError};
use crate::types::SenderConfig;

/// Name that always wins default-sender inference.
pub const DEFAULT_SENDER_NAME: &str = "default";

/// Names tried, in order, when there is no `default` sender and more than one entry.
pub const DEFAULT_SENDER_FALLBACKS: [&str; 3] = ["local", "deployer", "dev"];

/// In-memory set of configured senders, keyed by name.
///
/// Storage is ordered so that case-insensitive lookups that match several keys
/// always return the same entry (the lexicographically smallest key).
/// The registry has no internal locking: callers sharing it across threads must
/// serialize `load` against reads.
#[derive(Debug, Clone)]
pub struct SenderRegistry {
	senders: BTreeMap<String, SenderConfig>,
	fallbacks: Vec<String>,
}

impl Default for SenderRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl SenderRegistry {
	pub fn new() -> Self {
		Self {
			senders: BTreeMap::new(),
			fallbacks: DEFAULT_SENDER_FALLBACKS.iter().map(|name| name.to_string()).collect(),
		}
	}

	/// Overrides the ordered fallback names used by [`SenderRegistry::default_sender`].
	pub fn with_default_fallbacks<I, S>(mut self, fallbacks: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.fallbacks = fallbacks.into_iter().map(Into::into).collect();
		self
	}

	/// Replaces the whole registry with `senders`. Nothing from a previous load survives.
	pub fn load<I>(&mut self, senders: I)
	where
		I: IntoIterator<Item = (String, SenderConfig)>,
	{
		self.senders = senders.into_iter().collect();
		info!(count = self.senders.len(), "Loaded sender configuration");
	}

	/// Finds a sender by exact name, falling back to a case-insensitive match.
	pub fn lookup(&self, name: &str) -> Result<&SenderConfig> {
		if let Some(sender) = self.senders.get(name) {
			return Ok(sender);
		}

		let folded = name.to_lowercase();
		self.senders
			.iter()
			.find(|(key, _)| key.to_lowercase() == folded)
			.map(|(key, sender)| {
				debug!(requested = name, matched = %key, "Matched sender case-insensitively");
				sender
			})
			.ok_or_else(|| SenderError::NotFound(name.to_string()))
	}

	/// Infers the sender to use when none was named.
	///
	/// Order: the `default` entry, the only entry, then the first fallback name present.
	pub fn default_sender(&self) -> Result<&SenderConfig> {
		if let Some(sender) = self.senders.get(DEFAULT_SENDER_NAME) {
			return Ok(sender);
		}

		if self.senders.len() == 1 {
			if let Some(sender) = self.senders.values().next() {
				return Ok(sender);
			}
		}

		self.fallbacks
			.iter()
			.find_map(|name| self.senders.get(name))
			.ok_or(SenderError::NoDefaultConfigured)
	}

	/// Configured sender names in sorted order.
	pub fn names(&self) -> Vec<&str> {
		self.senders.keys().map(String::as_str).collect()
	}

	pub fn len(&self) -> usize {
		self.senders.len()
	}

	pub fn is_empty(&self) -> bool {
		self.senders.is_empty()
	}
}
