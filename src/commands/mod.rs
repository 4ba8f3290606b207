//! Command implementations for the rebrand CLI

pub mod rebrand;
