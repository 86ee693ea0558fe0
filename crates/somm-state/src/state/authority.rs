use super::*;

/// Reasons an authority action is turned away.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    #[error("no authority is configured on this chain")]
    NotConfigured,
    #[error("signer {0} is not the chain authority")]
    Unauthorized(String),
}

impl AuthorityError {
    /// The transaction result code reported to the submitter.
    pub fn code(&self) -> u32 {
        2
    }
}

impl<S: StateReadExt> State<S> {
    /// The public key allowed to manage cellars and parameters, if any.
    pub async fn authority(&self) -> Result<Option<Bytes>, Report> {
        Ok(self
            .store
            .get::<Vec<u8>>(Internal, keys::AUTHORITY)
            .await?
            .map(Bytes::from))
    }

    /// Ensure that an action was signed by the chain authority.
    pub(crate) async fn check_authority(
        &self,
        Authority { identity }: &Authority,
    ) -> Result<(), Report> {
        match self.authority().await? {
            Some(authority) if authority == *identity => Ok(()),
            Some(_) => Err(AuthorityError::Unauthorized(hex::encode(identity)).into()),
            None => Err(AuthorityError::NotConfigured.into()),
        }
    }
}

impl<S: StateReadExt + StateWriteExt> State<S> {
    pub(crate) fn set_authority(&mut self, authority: Option<&[u8]>) -> Result<(), Report> {
        match authority {
            Some(authority) if authority.is_empty() => bail!("authority key must not be empty"),
            Some(authority) => self.store.put(Internal, keys::AUTHORITY, authority.to_vec()),
            None => self.store.delete_key(Internal, keys::AUTHORITY),
        }
        Ok(())
    }
}
