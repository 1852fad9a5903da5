pub mod app;
pub mod input;
pub mod modal;
pub mod render;
pub mod theme;
pub mod undo;

pub use app::run;
