//! Deployment script generation for the forge script runner.

pub mod abi;
pub mod error;
pub mod generator;
pub mod templates;
pub mod types;
pub mod writer;

pub use abi::{AbiParser, ArgsSnippet, SolidityAbiParser};
pub use error::{Result, ScriptError};
pub use generator::ScriptGenerator;
pub use types::{ConstructorInfo, DeployStrategy, ProxyInfo, ScriptKind, ScriptTemplate};
