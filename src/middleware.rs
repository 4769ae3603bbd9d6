use std::sync::Arc;

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::IntoResponse,
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::{
    error::{ErrorMessage, HttpError},
    service::error::ServiceError,
    utils::token,
    AppState,
};

/// Who is making the request. Established once per request by [`identity`]
/// and handed explicitly to every service call that needs it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity(Option<Uuid>);

impl Identity {
    pub fn anonymous() -> Self {
        Identity(None)
    }

    pub fn authenticated(user_id: Uuid) -> Self {
        Identity(Some(user_id))
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.0
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    pub fn require(&self) -> Result<Uuid, ServiceError> {
        self.0.ok_or(ServiceError::AuthenticationRequired)
    }
}

fn bearer_token(req: &Request) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
        .map(|token| token.to_owned())
}

/// Resolves the session token, if any. A missing token is an anonymous
/// visitor; a token that does not verify is rejected.
pub async fn identity(
    cookie_jar: CookieJar,
    Extension(app_state): Extension<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| bearer_token(&req));

    let identity = match token {
        None => Identity::anonymous(),
        Some(token) => {
            let subject = token::decode_token(token, app_state.env.jwt_secret.as_bytes())?;
            let user_id = Uuid::parse_str(&subject)
                .map_err(|_| HttpError::unauthorized(ErrorMessage::InvalidToken.to_string()))?;
            Identity::authenticated(user_id)
        }
    };

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
