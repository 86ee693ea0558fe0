//! Protobuf wire messages for the Sommelier cork chain, plus the [`DomainType`] encoding trait
//! that maps them onto strongly-typed domain values.
//!
//! The messages are declared directly with `prost` derives, so building this crate does not
//! require `protoc`.

mod domain_type;
pub use domain_type::{DecodeError, DomainType};

/// Messages persisted in chain state.
pub mod cork;

/// Transactions and their signatures.
pub mod transaction;
