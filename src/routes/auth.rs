use std::time::SystemTime;

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_access_token;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::validated_json::ValidatedJson;
use crate::services::auth::authenticate;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Authenticate with email and password, returning a JWT access token.
/// Credential failures are a generic 401 regardless of which check failed.
async fn login(
    req: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();

    if req.email.is_empty() {
        return Err(AppError::bad_request(
            "INVALID_EMAIL",
            "Email cannot be empty".to_string(),
        ));
    }

    if req.password.is_empty() {
        return Err(AppError::bad_request(
            "INVALID_PASSWORD",
            "Password cannot be empty".to_string(),
        ));
    }

    let user = authenticate(app_state.users.as_ref(), &req.email, &req.password)?;

    let token = mint_access_token(&user.email, SystemTime::now(), &app_state.security)?;

    let response = LoginResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Return the profile of the currently authenticated user.
async fn me(current_user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(current_user.into_inner()))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/auth/login").route(web::post().to(login)))
        .service(web::resource("/api/auth/me").route(web::get().to(me)));
}
