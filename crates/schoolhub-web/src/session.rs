//! Operator session extraction

use crate::handlers::ApiError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use schoolhub_core::{Error, Role, Session};

/// Header carrying the operator's user id
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the operator's role
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Session of the operator making the request
///
/// Built from `Authorization: Bearer <token>`, `X-User-Id` and
/// `X-User-Role`. Any missing or malformed header rejects with 401.
#[derive(Debug, Clone)]
pub struct OperatorSession(pub Session);

fn header<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, Error> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::Unauthenticated(format!("missing {name} header")))
}

#[async_trait]
impl<S> FromRequestParts<S> for OperatorSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = header(parts, "authorization")?
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Unauthenticated("expected a bearer token".to_string()))?
            .to_string();

        let id = header(parts, USER_ID_HEADER)?.to_string();
        let role: Role = header(parts, USER_ROLE_HEADER)?
            .parse()
            .map_err(|_| Error::Unauthenticated("unknown operator role".to_string()))?;

        Ok(Self(Session::new(id, role, token)))
    }
}
