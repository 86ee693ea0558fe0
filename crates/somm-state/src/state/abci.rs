use super::*;

mod begin_block;
mod deliver_tx;
mod end_block;
mod init_chain;

/// Result code for transactions rejected for any reason without a more specific code.
pub const CODE_REJECTED: u32 = 1;
