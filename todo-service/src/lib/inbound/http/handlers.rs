use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::todo::errors::TodoError;
use crate::user::errors::UserError;

pub mod create_todo;
pub mod delete_todo;
pub mod get_todo;
pub mod list_todos;
pub mod login;
pub mod me;
pub mod signup;
pub mod temp_code;
pub mod token;
pub mod update_todo;

/// Error half of every handler's return type.
///
/// Bodies follow the service's wire contract: failures are a `detail` field
/// holding either a message string, the structured OAuth error object, or a
/// list of field-validation errors. 401 responses carry `WWW-Authenticate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401 with a plain-message detail
    Unauthorized(String),
    /// 401 with the OAuth structured detail used by the grant flow
    InvalidGrant,
    /// 422 with a list of missing/invalid request fields
    Validation(Vec<FieldError>),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

/// One entry of a 422 validation body, e.g.
/// `{"type": "missing", "loc": ["body", "grant_type"], "msg": "Field required"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: (&'static str, &'static str),
    pub msg: String,
}

impl FieldError {
    /// A required body field was absent.
    pub fn missing(field: &'static str) -> Self {
        Self {
            kind: "missing",
            loc: ("body", field),
            msg: "Field required".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(json!({ "detail": msg })),
            )
                .into_response(),
            ApiError::InvalidGrant => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(json!({
                    "detail": {
                        "error": "invalid_token",
                        "error_description": "The access token expired",
                    }
                })),
            )
                .into_response(),
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": errors })),
            )
                .into_response(),
            ApiError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": msg })),
            )
                .into_response(),
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": msg }))).into_response()
            }
            ApiError::Conflict(msg) => {
                (StatusCode::CONFLICT, Json(json!({ "detail": msg }))).into_response()
            }
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidCredentials => {
                ApiError::Unauthorized("Incorrect username or password".to_string())
            }
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            // One message for both collisions; the field that collided is
            // never disclosed.
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict("Username or email already registered".to_string())
            }
            UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::Password(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TodoError::InvalidTitle(_) | TodoError::InvalidTodoId(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            TodoError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<auth::GrantError> for ApiError {
    fn from(err: auth::GrantError) -> Self {
        match err {
            auth::GrantError::InvalidGrant => ApiError::InvalidGrant,
            auth::GrantError::Issuance(e) => ApiError::InternalServerError(e.to_string()),
        }
    }
}

impl From<auth::TokenError> for ApiError {
    fn from(err: auth::TokenError) -> Self {
        // Issuance failures only; decode failures are mapped where the
        // caller knows which 401 message applies.
        ApiError::InternalServerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unauthorized_body_shape() {
        let response =
            ApiError::Unauthorized("Incorrect username or password".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        assert_eq!(
            body_json(response).await,
            json!({ "detail": "Incorrect username or password" })
        );
    }

    #[tokio::test]
    async fn test_invalid_grant_body_shape() {
        let response = ApiError::InvalidGrant.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({
                "detail": {
                    "error": "invalid_token",
                    "error_description": "The access token expired",
                }
            })
        );
    }

    #[tokio::test]
    async fn test_validation_body_shape() {
        let response =
            ApiError::Validation(vec![FieldError::missing("grant_type")]).into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await,
            json!({
                "detail": [{
                    "type": "missing",
                    "loc": ["body", "grant_type"],
                    "msg": "Field required",
                }]
            })
        );
    }

    #[test]
    fn test_duplicate_signup_does_not_disclose_field() {
        let by_username =
            ApiError::from(UserError::UsernameAlreadyExists("junaid".to_string()));
        let by_email = ApiError::from(UserError::EmailAlreadyExists(
            "junaid@example.com".to_string(),
        ));

        assert_eq!(by_username, by_email);
    }
}
