//! API response types for the sommelier query endpoints.
//!
//! These types are used for serializing responses from the query API and deserializing them in
//! clients and tests.

use serde::{Deserialize, Serialize};

use alloy_primitives::B256;

use crate::{CorkResult, ValidatorAddress};

/// Response structure from the `/sequences/{public_key}` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerSequence {
    /// Hex-encoded public key.
    pub signer: String,
    /// The highest sequence accepted from this key; zero if it has never signed an action.
    pub sequence: u64,
}

/// Response structure from the `/bridge/nonce` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidationNonce {
    /// The last nonce assigned to an outgoing contract call; zero if none has been queued yet.
    pub invalidation_nonce: u64,
}

/// Response structure from the `/validators/{address}/cork_count` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorCorkCount {
    pub validator: ValidatorAddress,
    /// How many corks this validator has submitted over its lifetime.
    pub count: u64,
}

/// Response structure from the `/status` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub chain_id: String,
    pub block_height: u64,
    /// Hex-encoded app hash of the latest committed block.
    pub app_hash: String,
}

/// One element of the response from the `/corks/results` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifiedCorkResult {
    pub id: B256,
    pub result: CorkResult,
}
