use prost::bytes::Bytes;

/// A contract call proposed by a validator.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Cork {
    /// ABI-encoded call payload.
    #[prost(bytes = "bytes", tag = "1")]
    pub encoded_contract_call: Bytes,
    /// Hex-encoded Ethereum address of the target contract.
    #[prost(string, tag = "2")]
    pub target_contract_address: String,
    /// Optional invalidation scope label; empty means the scope is derived from the call itself.
    #[prost(string, tag = "3")]
    pub scope: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ScheduledCork {
    #[prost(message, optional, tag = "1")]
    pub cork: Option<Cork>,
    #[prost(uint64, tag = "2")]
    pub block_height: u64,
    #[prost(bytes = "bytes", tag = "3")]
    pub validator: Bytes,
    #[prost(bytes = "bytes", tag = "4")]
    pub id: Bytes,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CorkResult {
    #[prost(message, optional, tag = "1")]
    pub cork: Option<Cork>,
    #[prost(uint64, tag = "2")]
    pub block_height: u64,
    #[prost(bool, tag = "3")]
    pub approved: bool,
    /// Decimal string, e.g. `"0.700000000000000000"`.
    #[prost(string, tag = "4")]
    pub approval_percentage: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Params {
    /// Decimal string in `[0, 1]`.
    #[prost(string, tag = "1")]
    pub vote_threshold: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Validator {
    #[prost(bytes = "bytes", tag = "1")]
    pub address: Bytes,
    #[prost(bytes = "bytes", tag = "2")]
    pub orchestrator: Bytes,
    #[prost(uint64, tag = "3")]
    pub power: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OutgoingContractCall {
    #[prost(uint64, tag = "1")]
    pub invalidation_nonce: u64,
    #[prost(bytes = "bytes", tag = "2")]
    pub invalidation_scope: Bytes,
    #[prost(string, tag = "3")]
    pub target_contract_address: String,
    #[prost(bytes = "bytes", tag = "4")]
    pub payload: Bytes,
    #[prost(uint64, tag = "5")]
    pub block_height: u64,
}
