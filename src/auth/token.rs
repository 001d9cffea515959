//! Locally issued bearer tokens — HS256 JWTs signed with a shared secret.
//!
//! Three base64url segments: header.claims.signature, with the signature an
//! HMAC-SHA256 over the first two segments. Verification is constant-time
//! via `Mac::verify_slice` and checks expiry against the supplied clock.

use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{ApiError, Result};

type HmacSha256 = Hmac<Sha256>;

#[derive(Serialize)]
struct Header {
    alg: &'static str,
    typ: &'static str,
}

/// Claims carried by an issued token. `sub` is the account email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Sign a token for `email`, valid for `ttl_secs` from `now`.
pub fn sign_token(email: &str, secret: &str, now: i64, ttl_secs: i64) -> Result<String> {
    let header = Header {
        alg: "HS256",
        typ: "JWT",
    };
    let claims = Claims {
        sub: email.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };

    let header_b64 = BASE64_URL_SAFE_NO_PAD.encode(serde_json::to_string(&header)?);
    let claims_b64 = BASE64_URL_SAFE_NO_PAD.encode(serde_json::to_string(&claims)?);
    let signing_input = format!("{}.{}", header_b64, claims_b64);

    Ok(format!("{}.{}", signing_input, sign(&signing_input, secret)?))
}

/// Verify structure, signature, and expiry. Returns the decoded claims.
pub fn verify_token(token: &str, secret: &str, now: i64) -> Result<Claims> {
    let mut parts = token.split('.');
    let (header_b64, claims_b64, sig_b64) = match (parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(c), Some(s)) if parts.next().is_none() => (h, c, s),
        _ => return Err(ApiError::InvalidToken("malformed token".into())),
    };

    let signing_input = format!("{}.{}", header_b64, claims_b64);
    let sig = BASE64_URL_SAFE_NO_PAD
        .decode(sig_b64)
        .map_err(|_| ApiError::InvalidToken("bad signature encoding".into()))?;

    let mut mac = mac_for(secret)?;
    mac.update(signing_input.as_bytes());
    mac.verify_slice(&sig)
        .map_err(|_| ApiError::InvalidToken("signature mismatch".into()))?;

    let claims_json = BASE64_URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|_| ApiError::InvalidToken("bad claims encoding".into()))?;
    let claims: Claims = serde_json::from_slice(&claims_json)
        .map_err(|_| ApiError::InvalidToken("bad claims".into()))?;

    if claims.exp <= now {
        return Err(ApiError::InvalidToken("token expired".into()));
    }

    Ok(claims)
}

fn sign(input: &str, secret: &str) -> Result<String> {
    let mut mac = mac_for(secret)?;
    mac.update(input.as_bytes());
    Ok(BASE64_URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}

fn mac_for(secret: &str) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| ApiError::Config("empty jwt secret".into()))
}
