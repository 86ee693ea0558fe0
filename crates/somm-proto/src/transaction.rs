use prost::bytes::Bytes;

use crate::cork::{Cork, Params};

mod sign;
pub use sign::{KeyPair, KeyPairs, SignError, Signer, VerifyError};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transaction {
    #[prost(string, tag = "1")]
    pub chain_id: String,
    #[prost(message, repeated, tag = "2")]
    pub actions: Vec<Action>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Action {
    #[prost(oneof = "action::Action", tags = "1, 2, 3, 4")]
    pub action: Option<action::Action>,
}

/// An Ed25519 public key and, once signed, a signature by it over the transaction hash.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Signature {
    #[prost(bytes = "bytes", tag = "1")]
    pub public_key: Bytes,
    #[prost(bytes = "bytes", tag = "2")]
    pub signature: Bytes,
}

pub mod action {
    use super::*;

    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Action {
        #[prost(message, tag = "1")]
        ScheduleCork(ScheduleCork),
        #[prost(message, tag = "2")]
        AddManagedCellars(AddManagedCellars),
        #[prost(message, tag = "3")]
        RemoveManagedCellars(RemoveManagedCellars),
        #[prost(message, tag = "4")]
        UpdateParams(UpdateParams),
    }

    /// Signed by an orchestrator key on behalf of its validator.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ScheduleCork {
        #[prost(message, optional, tag = "1")]
        pub signature: Option<Signature>,
        #[prost(message, optional, tag = "2")]
        pub cork: Option<Cork>,
        #[prost(uint64, tag = "3")]
        pub block_height: u64,
        /// Must exceed every sequence this key has had accepted before.
        #[prost(uint64, tag = "4")]
        pub sequence: u64,
    }

    /// Signed by the chain authority.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct AddManagedCellars {
        #[prost(message, optional, tag = "1")]
        pub signature: Option<Signature>,
        #[prost(string, repeated, tag = "2")]
        pub cellar_ids: Vec<String>,
        #[prost(uint64, tag = "3")]
        pub sequence: u64,
    }

    /// Signed by the chain authority.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct RemoveManagedCellars {
        #[prost(message, optional, tag = "1")]
        pub signature: Option<Signature>,
        #[prost(string, repeated, tag = "2")]
        pub cellar_ids: Vec<String>,
        #[prost(uint64, tag = "3")]
        pub sequence: u64,
    }

    /// Signed by the chain authority.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct UpdateParams {
        #[prost(message, optional, tag = "1")]
        pub signature: Option<Signature>,
        #[prost(message, optional, tag = "2")]
        pub params: Option<Params>,
        #[prost(uint64, tag = "3")]
        pub sequence: u64,
    }

    impl Action {
        pub fn signature(&self) -> Option<&Signature> {
            match self {
                Action::ScheduleCork(a) => a.signature.as_ref(),
                Action::AddManagedCellars(a) => a.signature.as_ref(),
                Action::RemoveManagedCellars(a) => a.signature.as_ref(),
                Action::UpdateParams(a) => a.signature.as_ref(),
            }
        }

        pub fn signature_mut(&mut self) -> Option<&mut Signature> {
            match self {
                Action::ScheduleCork(a) => a.signature.as_mut(),
                Action::AddManagedCellars(a) => a.signature.as_mut(),
                Action::RemoveManagedCellars(a) => a.signature.as_mut(),
                Action::UpdateParams(a) => a.signature.as_mut(),
            }
        }
    }
}
