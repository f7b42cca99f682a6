//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace: the
//! dispatcher-set data model, the `Exporter` trait, the error taxonomy and
//! the configuration blueprint.
//!
//! Business crates depend on this crate only; reverse dependencies are
//! prohibited.
//!
//! ## Data Model
//! - A snapshot is a borrowed, ordered `&[DispatcherSet]`
//! - Set and endpoint order is significant and is never changed

mod blueprint;
mod error;
mod exporter;
mod set;

pub use blueprint::*;
pub use error::*;
pub use exporter::Exporter;
pub use set::DispatcherSet;
