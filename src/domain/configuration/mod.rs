pub mod loader;
pub mod server_config;

pub use loader::{ConnectionArgs, load_config, parse_config_content};
pub use server_config::{DEFAULT_TIMEOUT_SECS, FileConfig, ServerConfig};
