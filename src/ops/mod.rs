pub mod filter;
pub mod project_ops;
pub mod stats;
pub mod task_ops;
pub mod validate;

#[cfg(test)]
pub(crate) mod fixtures;

pub use validate::ValidationError;
