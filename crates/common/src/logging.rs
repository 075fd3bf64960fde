use eyre::{Result, eyre};
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global tracing subscriber.
///
/// `filter` uses the `RUST_LOG` directive syntax (eg. `info` or `treb_senders=debug,info`).
/// Logs go to stderr so that stdout stays clean for generated scripts and env output.
pub fn setup_logging(filter: &str) -> Result<()> {
	let filter = EnvFilter::try_new(filter).map_err(|e| eyre!("Invalid log filter '{}': {}", filter, e))?;

	fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init()
		.map_err(|e| eyre!("Failed to install tracing subscriber: {}", e))?;

	Ok(())
}
