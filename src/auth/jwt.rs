use actix_web::{
    dev::Payload, error::ErrorUnauthorized, Error as ActixError, FromRequest, HttpMessage, HttpRequest,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::ExposeSecret;
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::config::jwt::JwtSettings;
use crate::middleware::auth::Claims;
use crate::models::context::{RequestContext, UserRole};

/// Handlers take the caller as a `RequestContext` argument. The claims are
/// put in place by `AuthMiddleware`.
impl FromRequest for RequestContext {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let context = req.extensions().get::<Claims>().and_then(Claims::context);
        match context {
            Some(ctx) => ready(Ok(ctx)),
            None => ready(Err(ErrorUnauthorized("Missing or invalid credentials"))),
        }
    }
}

/// Sign a token the way the identity service does. Used by tooling and tests.
pub fn issue_token(
    jwt_settings: &JwtSettings,
    user_id: Uuid,
    tenant_id: Uuid,
    role: UserRole,
    valid_for: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id.to_string(),
        tenant_id,
        role,
        exp: (Utc::now() + valid_for).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_settings.secret.expose_secret().as_bytes()),
    )
}
