//! Command implementations.

mod render;
mod run;
mod validate;

pub use render::run_render;
pub use run::run_export;
pub use validate::run_validate;
