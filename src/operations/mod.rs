//! Operations module
//!
//! High-level workflows that coordinate:
//! - Rule table and plan (from rules and plan modules)
//! - Substitution and filesystem renames (from substitute and rename modules)
//! - Transaction: Rollback on error (from transaction module)
//! - Residual audit (from audit module)
//! - UI: Progress reporting (from ui module)

pub mod rebrand;

pub use rebrand::{RebrandOperation, RebrandOptions};
