//! Raw form field access.
//!
//! Handlers read body fields first, from either an
//! `application/x-www-form-urlencoded` or a `multipart/form-data` body, then
//! the query string on any method.
//!
//! A request with no body, or a body of any other content type, contributes
//! no body fields. Missing fields are the handler's business, so only a body
//! that claims a form type and fails to parse is rejected.

use core::fmt;

use axum::{
    Form,
    extract::{FromRequest, Multipart, Query, Request},
    http::{Method, header},
};
use bookstall_core::{FieldError, Required};
use serde::Deserialize;

use crate::error::AppError;

/// Submitted form fields in submission order.
///
/// When a field is submitted more than once, the first value is used, so a
/// body field shadows a query field of the same name.
#[derive(Default, Deserialize)]
#[serde(transparent)]
pub struct FormFields(Vec<(String, String)>);

/// How a request body carries form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    UrlEncoded,
    Multipart,
    None,
}

impl BodyKind {
    fn of(request: &Request) -> Self {
        if matches!(*request.method(), Method::GET | Method::HEAD) {
            return Self::None;
        }

        let essence = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_ascii_lowercase());

        match essence.as_deref() {
            Some("application/x-www-form-urlencoded") => Self::UrlEncoded,
            Some("multipart/form-data") => Self::Multipart,
            _ => Self::None,
        }
    }
}

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = match request.uri().query() {
            Some(_) => {
                let Query(fields) = Query::<Self>::try_from_uri(request.uri())
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                fields
            }
            None => Self::default(),
        };

        let mut fields = match BodyKind::of(&request) {
            BodyKind::UrlEncoded => {
                let Form(fields) = Form::<Self>::from_request(request, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                fields
            }
            BodyKind::Multipart => {
                let multipart = Multipart::from_request(request, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Self::from_multipart(multipart).await?
            }
            BodyKind::None => Self::default(),
        };

        fields.0.extend(query.0);
        Ok(fields)
    }
}

impl FormFields {
    /// First value submitted for `name`, untrimmed.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value submitted for `name`, trimmed and required to be non-empty.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::Empty` if the field is missing or blank.
    pub fn required(&self, name: &str) -> Result<Required, FieldError> {
        Required::parse_opt(self.first(name))
    }

    /// Collect every named part of a multipart body as text.
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut fields = Vec::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            fields.push((name, value));
        }

        Ok(Self(fields))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// Values may hold passwords; only field names are printed.
impl fmt::Debug for FormFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|(key, _)| key))
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        let fields: FormFields = [("book", "Dune"), ("book", "Emma")].into_iter().collect();
        assert_eq!(fields.first("book"), Some("Dune"));
    }

    #[test]
    fn test_required_trims() {
        let fields: FormFields = [("name", "  Ann  ")].into_iter().collect();
        assert_eq!(fields.required("name").unwrap().as_str(), "Ann");
    }

    #[test]
    fn test_required_missing_or_blank() {
        let fields: FormFields = [("phone", "   ")].into_iter().collect();
        assert_eq!(fields.required("phone"), Err(FieldError::Empty));
        assert_eq!(fields.required("name"), Err(FieldError::Empty));
    }

    fn request(method: &str, uri: &str, content_type: Option<&str>, body: &str) -> Request {
        let mut builder = axum::http::Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(axum::body::Body::from(body.to_owned())).unwrap()
    }

    async fn extract(request: Request) -> Result<FormFields, AppError> {
        FormFields::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_body_fields_come_before_query_fields() {
        let fields = extract(request(
            "POST",
            "/buy?book=Dune&name=Query",
            Some("application/x-www-form-urlencoded"),
            "name=Ann&phone=555",
        ))
        .await
        .unwrap();

        assert_eq!(fields.first("book"), Some("Dune"));
        assert_eq!(fields.first("name"), Some("Ann"));
        assert_eq!(fields.first("phone"), Some("555"));
    }

    #[tokio::test]
    async fn test_bodiless_post_has_no_fields() {
        let fields = extract(request("POST", "/register", None, "")).await.unwrap();
        assert_eq!(fields.first("username"), None);
    }

    #[tokio::test]
    async fn test_unsupported_content_type_is_ignored() {
        let fields = extract(request(
            "POST",
            "/register?username=alice",
            Some("application/json"),
            r#"{"username":"bob"}"#,
        ))
        .await
        .unwrap();

        assert_eq!(fields.first("username"), Some("alice"));
    }

    #[tokio::test]
    async fn test_multipart_body() {
        let body = "--XYZ\r\n\
                    Content-Disposition: form-data; name=\"username\"\r\n\r\n\
                    zed\r\n\
                    --XYZ\r\n\
                    Content-Disposition: form-data; name=\"password\"\r\n\r\n\
                    pw\r\n\
                    --XYZ--\r\n";

        let fields = extract(request(
            "POST",
            "/register",
            Some("multipart/form-data; boundary=XYZ"),
            body,
        ))
        .await
        .unwrap();

        assert_eq!(fields.first("username"), Some("zed"));
        assert_eq!(fields.first("password"), Some("pw"));
    }

    #[tokio::test]
    async fn test_malformed_multipart_is_rejected() {
        let result = extract(request(
            "POST",
            "/register",
            Some("multipart/form-data"),
            "garbage",
        ))
        .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_debug_hides_values() {
        let fields: FormFields = [("password", "hunter2")].into_iter().collect();
        let debug = format!("{fields:?}");
        assert!(debug.contains("password"));
        assert!(!debug.contains("hunter2"));
    }
}
