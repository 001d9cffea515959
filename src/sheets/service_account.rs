//! Google service-account OAuth: build an RS256 JWT assertion and exchange
//! it at the token endpoint for a short-lived access token.

use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use ring::signature::RsaKeyPair;
use serde::{Deserialize, Serialize};

use crate::config::GoogleConfig;
use crate::error::{ApiError, Result};

const SHEETS_READ_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

#[derive(Serialize)]
struct JwtHeader {
    alg: &'static str,
    typ: &'static str,
}

#[derive(Serialize)]
struct JwtClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    exp: i64,
    iat: i64,
}

#[derive(Debug, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: u64,
}

/// Holds the parsed service-account key. Construction parses the PEM, so a
/// misconfigured key fails at startup rather than on the first request.
pub struct ServiceAccountSigner {
    key_pair: RsaKeyPair,
    client_email: String,
    token_uri: String,
}

impl ServiceAccountSigner {
    pub fn from_config(google: &GoogleConfig) -> Result<Self> {
        if google.client_email.is_empty() {
            return Err(ApiError::Config("google client_email not set".into()));
        }

        let mut reader = std::io::Cursor::new(google.private_key.as_bytes());
        let key = rustls_pemfile::read_one(&mut reader)
            .map_err(|_| ApiError::Config("invalid PEM private key".into()))?;
        let key_pair = match key {
            Some(rustls_pemfile::Item::Pkcs8Key(der)) => {
                RsaKeyPair::from_pkcs8(der.secret_pkcs8_der())
                    .map_err(|_| ApiError::Config("failed to parse pkcs8 rsa key".into()))?
            }
            Some(rustls_pemfile::Item::Pkcs1Key(der)) => {
                RsaKeyPair::from_der(der.secret_pkcs1_der())
                    .map_err(|_| ApiError::Config("failed to parse pkcs1 rsa key".into()))?
            }
            _ => return Err(ApiError::Config("missing private key".into())),
        };

        Ok(Self {
            key_pair,
            client_email: google.client_email.clone(),
            token_uri: google.token_uri.clone(),
        })
    }

    /// Build the signed JWT assertion for the jwt-bearer grant, valid for
    /// one hour.
    fn assertion(&self) -> Result<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            iss: &self.client_email,
            scope: SHEETS_READ_SCOPE,
            aud: &self.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let header = JwtHeader {
            alg: "RS256",
            typ: "JWT",
        };

        let header_b64 = BASE64_URL_SAFE_NO_PAD.encode(serde_json::to_string(&header)?);
        let claims_b64 = BASE64_URL_SAFE_NO_PAD.encode(serde_json::to_string(&claims)?);
        let signing_input = format!("{}.{}", header_b64, claims_b64);

        // RS256 = PKCS#1 v1.5 with SHA-256
        let mut signature = vec![0; self.key_pair.public().modulus_len()];
        self.key_pair
            .sign(
                &ring::signature::RSA_PKCS1_SHA256,
                &ring::rand::SystemRandom::new(),
                signing_input.as_bytes(),
                &mut signature,
            )
            .map_err(|_| ApiError::Internal("failed to sign jwt assertion".into()))?;

        let sig_b64 = BASE64_URL_SAFE_NO_PAD.encode(&signature);
        Ok(format!("{}.{}", signing_input, sig_b64))
    }

    /// Exchange a fresh assertion for an access token.
    pub async fn fetch_access_token(&self, client: &reqwest::Client) -> Result<AccessToken> {
        let jwt = self.assertion()?;
        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", &jwt),
        ];

        let response = client.post(&self.token_uri).form(&params).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}
