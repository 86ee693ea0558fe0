use std::collections::HashMap;

use ring::{
    rand::SystemRandom,
    signature::{Ed25519KeyPair, KeyPair as _},
};

use super::*;

/// A signer is something that can sign a digest using one or more Ed25519 keypairs.
pub trait Signer {
    /// This should return the signature if and only if the public key matches a keypair that can
    /// produce a signature through the signer.
    fn sign_with(&self, public_key: &[u8], digest: Digest) -> Option<Vec<u8>>;
}

impl<T: Signer> Signer for &T {
    fn sign_with(&self, public_key: &[u8], digest: Digest) -> Option<Vec<u8>> {
        (**self).sign_with(public_key, digest)
    }
}

/// An Ed25519 keypair that remembers its PKCS#8 encoding, so it can be written back to disk.
pub struct KeyPair {
    pkcs8: Vec<u8>,
    inner: Ed25519KeyPair,
}

impl KeyPair {
    /// Generate a fresh keypair from the system's secure random source.
    pub fn generate() -> Result<Self, VerifyError> {
        let document = Ed25519KeyPair::generate_pkcs8(&SystemRandom::new())?;
        Self::decode(document.as_ref())
    }

    /// Parse a keypair from its PKCS#8 v2 encoding.
    pub fn decode(pkcs8: &[u8]) -> Result<Self, VerifyError> {
        let inner = Ed25519KeyPair::from_pkcs8(pkcs8).map_err(|_| VerifyError)?;
        Ok(Self {
            pkcs8: pkcs8.to_vec(),
            inner,
        })
    }

    pub fn encode(&self) -> &[u8] {
        &self.pkcs8
    }

    pub fn public_key(&self) -> &[u8] {
        self.inner.public_key().as_ref()
    }
}

impl Signer for KeyPair {
    fn sign_with(&self, public_key: &[u8], digest: Digest) -> Option<Vec<u8>> {
        if self.public_key() == public_key {
            Some(self.inner.sign(digest.as_ref()).as_ref().to_vec())
        } else {
            None
        }
    }
}

/// A collection of keypairs, indexed by public key.
#[derive(Default)]
pub struct KeyPairs {
    keypairs: HashMap<Bytes, KeyPair>,
}

impl KeyPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, keypair: KeyPair) {
        self.keypairs
            .insert(Bytes::copy_from_slice(keypair.public_key()), keypair);
    }
}

impl FromIterator<KeyPair> for KeyPairs {
    fn from_iter<T: IntoIterator<Item = KeyPair>>(iter: T) -> Self {
        let mut keypairs = Self::new();
        for kp in iter {
            keypairs.insert(kp);
        }
        keypairs
    }
}

impl Signer for KeyPairs {
    fn sign_with(&self, public_key: &[u8], digest: Digest) -> Option<Vec<u8>> {
        self.keypairs
            .get(public_key)
            .and_then(|kp| kp.sign_with(public_key, digest))
    }
}
