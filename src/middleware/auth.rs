use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::models::auth::{Claims, Session};

const SESSION_COOKIE: &str = "access_token";

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(secret) = parts.extensions.get::<JwtSecret>() else {
            tracing::warn!("JWT secret not configured, treating request as anonymous");
            return Ok(Session::Anonymous);
        };

        let Some(token) = bearer_token(parts).or_else(|| cookie_token(parts)) else {
            return Ok(Session::Anonymous);
        };

        match decode_access_token(token, &secret.0) {
            Ok(session) => Ok(session),
            Err(e) => {
                tracing::debug!("ignoring invalid session token: {e}");
                Ok(Session::Anonymous)
            }
        }
    }
}

/// Extension type to carry the JWT secret through request extensions.
#[derive(Clone)]
pub struct JwtSecret(pub String);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn cookie_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE).then_some(value)
        })
}

pub fn decode_access_token(token: &str, secret: &str) -> Result<Session, anyhow::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(token, &key, &validation)?;
    Ok(Session::User(data.claims.sub.parse()?))
}
