//! Subcommand implementations

pub mod assemble;
pub mod compare;
pub mod measure;
pub mod segment;
