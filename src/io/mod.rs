pub mod config_io;
pub mod data_io;

pub use config_io::{ConfigError, load_config};
pub use data_io::{DataError, load_portfolio};
