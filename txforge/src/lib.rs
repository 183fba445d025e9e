#![deny(missing_docs)]

//! txforge - Complete transaction construction kit.
//!
//! Re-exports all txforge components for convenient single-crate usage.

pub use txforge_primitives as primitives;
pub use txforge_transaction as transaction;
