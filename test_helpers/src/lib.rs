//! Test helpers shared across crates.
//!
//! [`harness`] compiles a form declaration into a `clap::Command`, keeps the
//! registered arguments for inspection and runs simulated command lines
//! through bind and validate. [`jail`] wraps `figment::Jail` for
//! configuration-file tests and [`text`] normalizes rendered help output.

pub mod harness;
pub mod jail;
pub mod text;

pub use harness::Harness;
