//! Services built on top of the ports.

pub mod binary_resolver;

pub use binary_resolver::BinaryResolver;
