use axum::extract::State;
use axum::Form;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::FieldError;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

/// Password login: verify credentials, then hand out an access/refresh pair.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginResponseData>, ApiError> {
    let (username, password) = form.require()?;

    // A username that cannot even be valid gets the same answer as a wrong
    // password; the login endpoint never reveals which part failed.
    let username = Username::new(username)
        .map_err(|_| ApiError::Unauthorized("Incorrect username or password".to_string()))?;

    let user = state
        .user_service
        .authenticate(&username, &password)
        .await
        .map_err(ApiError::from)?;

    let session = state
        .session_issuer
        .issue_session(user.id.0, Some(user.username.as_str()))?;

    Ok(Json(LoginResponseData {
        access_token: session.access_token,
        token_type: "bearer",
        expires_in: session.expires_in,
        refresh_token: session.refresh_token,
        user: (&user).into(),
    }))
}

/// Form-encoded login request; presence is checked in the handler so the
/// 422 body matches the field-validation contract.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    username: Option<String>,
    password: Option<String>,
}

impl LoginForm {
    fn require(self) -> Result<(String, String), ApiError> {
        let mut errors = Vec::new();
        if self.username.is_none() {
            errors.push(FieldError::missing("username"));
        }
        if self.password.is_none() {
            errors.push(FieldError::missing("password"));
        }
        match (self.username, self.password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub refresh_token: String,
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
