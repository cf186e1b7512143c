use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::auth::jwt::verify_access_token;
use crate::domain::user::User;
use crate::error::AppError;
use crate::extractors::auth_token::AuthToken;
use crate::state::app_state::AppState;

/// The authenticated user behind a protected request.
///
/// Extraction verifies the bearer token, resolves the subject claim against
/// the credential store, and checks the account is active. Token failures
/// and a vanished subject all produce the uniform unauthorized error; only
/// an inactive account is reported distinctly (the token already proves the
/// account exists).
#[derive(Debug, Clone)]
pub struct CurrentUser(User);

impl CurrentUser {
    pub fn into_inner(self) -> User {
        self.0
    }

    pub fn user(&self) -> &User {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let AuthToken { token } = AuthToken::extract(&req).await?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available".to_string()))?;

            let claims = verify_access_token(&token, &app_state.security)?;

            let record = app_state
                .users
                .find_by_email(&claims.sub)
                .ok_or_else(AppError::unauthorized)?;

            if !record.is_active {
                return Err(AppError::inactive_user());
            }

            Ok(CurrentUser(record.to_user()))
        })
    }
}
