pub mod cancel;
pub mod config;
pub mod reader;

pub use cancel::CancellationToken;
pub use config::{LoaderConfig, LoaderConfigBuilder};
pub use reader::{load, load_bytes, load_path, load_reader};
