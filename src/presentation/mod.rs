//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap) and merging with the config layers
//! - Creating the use case with infrastructure dependencies
//! - Output formatting (text/JSON), including fatal errors
//!
//! ## Structure
//!
//! - `cli` - Flag definitions and `RunConfig` resolution
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Event sink selection and error rendering

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::Cli;
pub use factory::create_deploy_use_case;
