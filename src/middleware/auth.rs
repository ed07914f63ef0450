use axum::{response::{Response, IntoResponse}};
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::Next;
use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::state::AppState;
use serde::Serialize;

/// Roles allowed to move stock into the destination store.
const TRANSMIT_ROLES: [&str; 2] = ["admin", "biller"];

#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub role: String,
    pub username: String,
}

impl AuthContext {
    pub fn require_transmit_role(&self) -> Result<(), AppError> {
        if TRANSMIT_ROLES.contains(&self.role.as_str()) {
            Ok(())
        } else {
            Err(AppError::forbidden("Only admins and billers can transmit packing lists"))
        }
    }
}

#[derive(Serialize)]
struct ErrorBody { error: String, code: &'static str }

use axum::http::Request;

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_header = match req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok()) {
        Some(h) => h,
        None => return unauthorized("Missing Authorization header"),
    };

    // Expect "Bearer <token>"
    let token = match auth_header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return unauthorized("Invalid Authorization format"),
    };

    let claims = match verify_token(token, &state.jwt_secret) {
        Ok(c) => c,
        Err(e) => return unauthorized(&e.to_string()),
    };

    // Attach context
    req.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
        role: claims.role,
        username: claims.username,
    });

    next.run(req).await
}

fn unauthorized(msg: &str) -> Response {
    let body = axum::Json(ErrorBody { error: msg.to_string(), code: "unauthorized" });
    (StatusCode::UNAUTHORIZED, body).into_response()
}
