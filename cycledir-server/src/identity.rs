//! Request identity.
//!
//! The caller's user id travels in the `x-cycledir-user` header, set by
//! whatever sits in front of the server and authenticates sessions.
//! Requests without it are anonymous.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use cycledir_core::{CycleError, Identity, UserId};

use crate::routes::AppError;

pub const USER_HEADER: &str = "x-cycledir-user";

/// Extracts the `Identity` of the caller.
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_HEADER) else {
            return Ok(CurrentIdentity(Identity::Anonymous));
        };

        let id = value
            .to_str()
            .map_err(|_| CycleError::InvalidUserId("<non-ascii header>".into()))?;

        Ok(CurrentIdentity(Identity::User(UserId::new(id)?)))
    }
}
