//! Test support for the customer service crates.
//!
//! [`generators`] holds proptest strategies, [`mocks`] the collaborator
//! doubles and the mocked transit engine, [`fixtures`] the reference
//! customer and Vault settings.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
