//! Authentication route handlers.
//!
//! Registration answers with a bare notice fragment, which `register.html`
//! inserts into the page. Login answers with a full page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

use crate::error::Result;
use crate::routes::FormFields;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Registration outcome fragment.
#[derive(Template, WebTemplate)]
#[template(path = "auth/notice.html")]
pub struct NoticeTemplate {
    pub success: bool,
    pub message: String,
}

impl NoticeTemplate {
    fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Login outcome page.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login_result.html")]
pub struct LoginResultTemplate {
    pub heading: String,
    /// Show a link back to the login form.
    pub retry: bool,
}

// =============================================================================
// Registration
// =============================================================================

/// Handle registration form submission.
///
/// Empty fields and taken usernames are reported inline without touching
/// the user file.
pub async fn register(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Response> {

    let (Ok(username), Ok(password)) = (fields.required("username"), fields.required("password"))
    else {
        return Ok(NoticeTemplate::error("Please fill in all fields!").into_response());
    };

    match AuthService::new(state.users())
        .register(&username, &password)
        .await
    {
        Ok(user) => Ok(NoticeTemplate::success(format!(
            "You have successfully registered, {}!",
            user.username
        ))
        .into_response()),
        Err(AuthError::UserAlreadyExists) => {
            tracing::info!(username = %username, "registration rejected: username taken");
            Ok(NoticeTemplate::error(format!("User '{username}' already exists!")).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Login
// =============================================================================

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Response> {

    let (Ok(username), Ok(password)) = (fields.required("username"), fields.required("password"))
    else {
        return Ok(LoginResultTemplate {
            heading: "Error: please fill in all fields".to_string(),
            retry: false,
        }
        .into_response());
    };

    match AuthService::new(state.users())
        .login(&username, &password)
        .await
    {
        Ok(user) => {
            tracing::info!(username = %user.username, "login succeeded");
            Ok(LoginResultTemplate {
                heading: format!("Welcome, {}!", user.username),
                retry: false,
            }
            .into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(username = %username, "login failed");
            Ok(LoginResultTemplate {
                heading: "Invalid username or password".to_string(),
                retry: true,
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}
