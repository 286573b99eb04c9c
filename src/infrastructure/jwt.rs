use crate::domain::payout::PayoutAssertion;
use crate::domain::ports::AssertionSigner;
use crate::error::{GatewayError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// Signs assertions with HS256 and the secret shared with the marketplace.
#[derive(Clone)]
pub struct Hs256Signer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Hs256Signer {
    /// Creates a signer for `secret`. An empty secret is rejected.
    pub fn new(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(GatewayError::Config("JWT secret must not be empty".to_string()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Verifies `token` against the shared secret and returns its claims.
    ///
    /// Assertions carry no expiry, so none is required.
    pub fn decode(&self, token: &str) -> Result<PayoutAssertion> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        let data =
            jsonwebtoken::decode::<PayoutAssertion>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

impl AssertionSigner for Hs256Signer {
    fn sign(&self, assertion: &PayoutAssertion) -> Result<String> {
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            assertion,
            &self.encoding_key,
        )?)
    }
}
