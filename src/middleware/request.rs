use std::{collections::HashMap, convert::Infallible};

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts, StatusCode},
    Form, Json,
};
use serde_json::{json, Map, Value};

/// Whether the client flagged the request as asynchronous
/// (`X-Requested-With: XMLHttpRequest`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AjaxRequest(pub bool);

impl<S> FromRequestParts<S> for AjaxRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ajax = parts
            .headers
            .get("X-Requested-With")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));
        Ok(AjaxRequest(ajax))
    }
}

/// Raw submitted fields, from a JSON object or an urlencoded form.
#[derive(Debug, Clone, Default)]
pub struct FormPayload(pub Map<String, Value>);

impl<S> FromRequest<S> for FormPayload
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|e| bad_request(e.body_text()))?;
            match value {
                Value::Object(fields) => Ok(FormPayload(fields)),
                _ => Err(bad_request("Expected a JSON object".into())),
            }
        } else {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| bad_request(e.body_text()))?;
            Ok(FormPayload(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect(),
            ))
        }
    }
}

fn bad_request(message: String) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}
