use super::*;

/// A signed action that does not advance its signer's sequence.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("sequence {sequence} from signer {signer} does not exceed its last sequence {last}")]
pub struct SequenceError {
    pub signer: String,
    pub sequence: u64,
    pub last: u64,
}

impl<S: StateReadExt> State<S> {
    /// The highest sequence accepted from a signing key; zero if it has never signed anything.
    pub async fn sequence(&self, signer: &[u8]) -> Result<u64, Report> {
        Ok(self
            .store
            .get::<u64>(Internal, &keys::sequence(signer))
            .await?
            .unwrap_or(0))
    }
}

impl<S: StateReadExt + StateWriteExt> State<S> {
    /// Accept an action's sequence, refusing any that do not exceed the signer's last one.
    ///
    /// Every signed action passes through here, so the same signed bytes can never be applied
    /// twice.
    pub(crate) async fn advance_sequence(
        &mut self,
        signer: &[u8],
        sequence: u64,
    ) -> Result<(), Report> {
        let last = self.sequence(signer).await?;
        if sequence <= last {
            return Err(SequenceError {
                signer: hex::encode(signer),
                sequence,
                last,
            }
            .into());
        }
        self.store.put(Internal, &keys::sequence(signer), sequence);
        Ok(())
    }
}
