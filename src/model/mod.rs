pub mod config;
pub mod portfolio;
pub mod project;
pub mod task;

pub use config::*;
pub use portfolio::*;
pub use project::*;
pub use task::*;
