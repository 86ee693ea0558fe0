use super::*;

/// Helper functions to construct and parse state keys.
mod keys;

mod authority;
pub use authority::AuthorityError;

mod bridge;
mod cellar;
mod chain_id;
mod cork_store;
mod height;
mod params;
mod genesis;
mod sequence;
pub use sequence::SequenceError;
mod validator;

/// Block lifecycle entrypoints.
mod abci;
pub use abci::CODE_REJECTED;
/// Handlers for each kind of transaction action.
mod action;

#[cfg(test)]
pub(crate) mod test;
