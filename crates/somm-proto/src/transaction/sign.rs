use prost::{Message as _, bytes::Bytes};
pub use ring::error::Unspecified as VerifyError;
use ring::{
    digest::{Context, Digest},
    signature::{ED25519, UnparsedPublicKey},
};

mod signer;
pub use signer::{KeyPair, KeyPairs, Signer};

#[derive(thiserror::Error, Debug)]
pub enum SignError {
    #[error("No keypair available for public key in transaction")]
    MissingKeypair,
    #[error("Transaction already contains a signature")]
    AlreadySigned,
    #[error("Transaction action is missing its signature slot")]
    MissingSlot,
}

impl super::Signature {
    /// Create a new blank signature for the given public key.
    pub fn unsigned(public_key: Bytes) -> Self {
        Self {
            public_key,
            signature: Bytes::new(),
        }
    }
}

impl super::Transaction {
    /// Decode a transaction and verify all its signatures, stripping them in the process.
    pub fn authenticate_from_proto<B: AsRef<[u8]>>(
        context: Context,
        buf: B,
    ) -> Result<Self, VerifyError> {
        let tx = Self::decode(buf.as_ref()).map_err(|_| VerifyError)?;
        let mut tx = tx.verify_all(context)?;
        tx.unsign_all();
        Ok(tx)
    }

    /// Encode a transaction and fill in all its signatures using the given signer.
    pub fn sign_to_proto(
        self,
        context: Context,
        signer: impl Signer,
    ) -> Result<Vec<u8>, SignError> {
        let tx = self.sign_all(signer, context)?;
        Ok(tx.encode_to_vec())
    }

    /// Compute the hash of the transaction as a protobuf message.
    ///
    /// The hash is computed after removing all signatures from the transaction, so that it can
    /// be computed as an *input* to signing.
    pub fn hash(&self, mut context: Context) -> Digest {
        let mut unbound = self.clone();
        unbound.unsign_all();
        context.update(&unbound.encode_to_vec());
        context.finish()
    }

    fn signatures_mut(&mut self) -> impl Iterator<Item = Option<&mut super::Signature>> {
        self.actions
            .iter_mut()
            .map(|action| action.action.as_mut().and_then(|a| a.signature_mut()))
    }

    /// Fill in every blank signature with a valid signature over the hash of the transaction.
    fn sign_all(mut self, signer: impl Signer, context: Context) -> Result<Self, SignError> {
        let digest = self.hash(context);

        for slot in self.signatures_mut() {
            let super::Signature {
                public_key,
                signature,
            } = slot.ok_or(SignError::MissingSlot)?;
            if !signature.is_empty() {
                return Err(SignError::AlreadySigned);
            }
            let sig = signer
                .sign_with(public_key.as_ref(), digest)
                .ok_or(SignError::MissingKeypair)?;
            *signature = sig.into();
        }

        Ok(self)
    }

    /// Remove all signatures from this object and its sub-objects.
    fn unsign_all(&mut self) {
        for super::Signature { signature, .. } in self.signatures_mut().flatten() {
            *signature = Bytes::new();
        }
    }

    /// Verify every signature in the transaction against the hash of the transaction.
    ///
    /// Every action must carry a signature: an unsigned action is a verification failure.
    fn verify_all(self, context: Context) -> Result<Self, VerifyError> {
        let digest = self.hash(context);
        for action in &self.actions {
            let super::Signature {
                public_key,
                signature,
            } = action
                .action
                .as_ref()
                .and_then(|a| a.signature())
                .ok_or(VerifyError)?;
            if signature.is_empty() {
                return Err(VerifyError);
            }
            UnparsedPublicKey::new(&ED25519, public_key).verify(digest.as_ref(), signature)?;
        }
        Ok(self)
    }
}
