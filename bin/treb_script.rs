use std::path::PathBuf;

use alloy::json_abi::JsonAbi;
use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use tracing::info;

use scripts::{ConstructorInfo, ScriptGenerator, ScriptKind, ScriptTemplate, SolidityAbiParser};
use senders::config::load_senders;
use senders::{EnvironmentContract, SenderRegistry, SenderResolver, env};

/// Resolve deployment senders and generate deployment scripts
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print the environment contract for a sender as KEY=VALUE lines.
	Env {
		/// Sender configuration file
		#[arg(long, env = "TREB_CONFIG", default_value = "treb.toml")]
		config: PathBuf,

		/// Sender name; when omitted the environment contract or the default sender is used
		#[arg(long, default_value = "")]
		sender: String,
	},

	/// Render a deployment script from a JSON descriptor.
	Render {
		/// Script descriptor (JSON)
		#[arg(long)]
		descriptor: PathBuf,

		/// Contract ABI (JSON) used to fill in the constructor when the descriptor has none
		#[arg(long)]
		abi: Option<PathBuf>,

		/// Output file; stdout when omitted
		#[arg(long)]
		out: Option<PathBuf>,
	},
}

fn print_env(config: PathBuf, sender: String) -> Result<()> {
	info!("Loading senders from: {}", config.display());
	let senders = load_senders(&config).wrap_err("Failed to load sender configuration")?;

	let mut registry = SenderRegistry::new();
	registry.load(senders);

	let resolved = SenderResolver::new(&registry)
		.resolve(&sender, &EnvironmentContract::from_process_env())
		.wrap_err("Failed to resolve sender")?;

	info!("Resolved sender:");
	info!("  Name: {}", resolved.name);
	info!("  Type: {}", resolved.sender_type());
	if let Some(address) = resolved.address()? {
		info!("  Address: {}", address);
	}

	for (key, value) in env::encode(&resolved).iter() {
		println!("{key}={value}");
	}
	Ok(())
}

fn render(descriptor: PathBuf, abi: Option<PathBuf>, out: Option<PathBuf>) -> Result<()> {
	let content = std::fs::read_to_string(&descriptor)
		.wrap_err_with(|| format!("Failed to read descriptor {}", descriptor.display()))?;
	let mut template: ScriptTemplate = serde_json::from_str(&content).wrap_err("Failed to parse script descriptor")?;

	if let Some(abi_path) = abi {
		if template.kind == ScriptKind::Contract && template.constructor.is_none() {
			let abi_content = std::fs::read_to_string(&abi_path)
				.wrap_err_with(|| format!("Failed to read ABI {}", abi_path.display()))?;
			let abi: JsonAbi = serde_json::from_str(&abi_content).wrap_err("Failed to parse ABI")?;
			template.constructor = Some(ConstructorInfo::from_abi(&abi));
		}
	}

	let script = ScriptGenerator::new(SolidityAbiParser).generate(&template)?;

	match out {
		Some(path) => {
			std::fs::write(&path, script).wrap_err_with(|| format!("Failed to write {}", path.display()))?;
			info!("Wrote {} to {}", template.script_contract_name(), path.display());
		}
		None => print!("{script}"),
	}
	Ok(())
}

fn main() -> Result<()> {
	common::logging::setup_logging(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))?;

	match Cli::parse().command {
		Command::Env { config, sender } => print_env(config, sender),
		Command::Render { descriptor, abi, out } => render(descriptor, abi, out),
	}
}
