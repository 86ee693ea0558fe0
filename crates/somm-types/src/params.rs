use serde::{Deserialize, Serialize};
use somm_proto::cork as proto;

use crate::{Decimal, ParseError};

/// Runtime parameters of the cork module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// The share of total bonded power a cork group needs in order to be approved.
    pub vote_threshold: Decimal,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            // 0.67 is exact in 18-digit fixed point
            vote_threshold: Decimal::from_ratio(67, 100).unwrap_or(Decimal::ONE),
        }
    }
}

impl Params {
    /// Check that the parameters are internally valid.
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.vote_threshold > Decimal::ONE {
            return Err(ParseError::new::<Params>(format!(
                "vote threshold {} is greater than 1",
                self.vote_threshold
            )));
        }
        Ok(())
    }
}

impl TryFrom<proto::Params> for Params {
    type Error = ParseError;

    fn try_from(proto: proto::Params) -> Result<Self, Self::Error> {
        let params = Params {
            vote_threshold: proto.vote_threshold.parse()?,
        };
        params.validate()?;
        Ok(params)
    }
}

impl From<Params> for proto::Params {
    fn from(params: Params) -> Self {
        proto::Params {
            vote_threshold: params.vote_threshold.to_string(),
        }
    }
}

domain_type!(Params => proto::Params);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_threshold() {
        assert_eq!(
            Params::default().vote_threshold.to_string(),
            "0.670000000000000000"
        );
    }

    #[test]
    fn threshold_above_one_is_invalid() {
        let proto = proto::Params {
            vote_threshold: "1.01".into(),
        };
        assert!(Params::try_from(proto).is_err());

        let proto = proto::Params {
            vote_threshold: "1".into(),
        };
        assert_eq!(Params::try_from(proto).unwrap().vote_threshold, Decimal::ONE);
    }
}
