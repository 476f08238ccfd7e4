//! CLI command implementations.

pub mod count;

pub use count::CountCommand;
