//! Checkout route handler.
//!
//! A "Buy" button in the catalog submits only the book title. The handler
//! then asks for the buyer's name and phone, carrying the title in a hidden
//! field, and appends the order once all three are present.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use bookstall_core::OrderRecord;

use crate::error::{Result, add_breadcrumb};
use crate::routes::FormFields;
use crate::state::AppState;

/// Buyer details form, pre-filled with the chosen book.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/buyer_form.html")]
pub struct BuyerFormTemplate {
    pub book: String,
}

/// Checkout outcome page.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/message.html")]
pub struct CheckoutMessageTemplate {
    pub heading: String,
}

/// Handle a checkout submission (query string or form body).
pub async fn buy(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Response> {

    let Ok(book) = fields.required("book") else {
        return Ok(CheckoutMessageTemplate {
            heading: "Error: no book specified".to_string(),
        }
        .into_response());
    };

    let (Ok(name), Ok(phone)) = (fields.required("name"), fields.required("phone")) else {
        return Ok(BuyerFormTemplate {
            book: book.into_inner(),
        }
        .into_response());
    };

    let order = OrderRecord::new(book.as_str(), name.as_str(), phone.as_str());
    state.orders().append(&order).await?;

    add_breadcrumb("checkout", "Order placed", Some(&[("book", book.as_str())]));
    tracing::info!(book = %order.book, "order placed");

    Ok(CheckoutMessageTemplate {
        heading: format!("Thank you, {name}! Your order for “{book}” has been placed."),
    }
    .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{body_text, get, post, post_form, test_app};

    fn orders_file(root: &std::path::Path) -> std::path::PathBuf {
        root.join("data").join("orders.txt")
    }

    #[tokio::test]
    async fn test_missing_book() {
        let root = tempfile::tempdir().unwrap();
        let app = test_app(root.path());

        let response = post_form(app, "/cgi-bin/buy", "name=Ann&phone=555").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Error: no book specified"));
        assert!(!orders_file(root.path()).exists());
    }

    #[tokio::test]
    async fn test_book_only_renders_prefilled_form() {
        let root = tempfile::tempdir().unwrap();
        let app = test_app(root.path());

        let response = post_form(app, "/cgi-bin/buy", "book=Dune").await;

        let body = body_text(response).await;
        assert!(body.contains("Checkout: Dune"));
        assert!(body.contains(r#"name="book" value="Dune""#));
        assert!(body.contains(r#"action="/cgi-bin/buy""#));
        assert!(!orders_file(root.path()).exists());
    }

    #[tokio::test]
    async fn test_get_with_query_string() {
        let root = tempfile::tempdir().unwrap();
        let app = test_app(root.path());

        let response = get(app, "/cgi-bin/buy?book=Dune&name=Ann&phone=").await;

        assert!(body_text(response).await.contains("Checkout: Dune"));
        assert!(!orders_file(root.path()).exists());
    }

    #[tokio::test]
    async fn test_post_merges_query_string_fields() {
        let root = tempfile::tempdir().unwrap();
        let app = test_app(root.path());

        let response = post_form(app, "/cgi-bin/buy?book=Dune", "name=Ann&phone=555").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Thank you, Ann!"));
        assert_eq!(
            std::fs::read_to_string(orders_file(root.path())).unwrap(),
            "Dune|Ann|555\n"
        );
    }

    #[tokio::test]
    async fn test_bodiless_post_reports_missing_book() {
        let root = tempfile::tempdir().unwrap();
        let app = test_app(root.path());

        let response = post(app, "/cgi-bin/buy", None, "").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Error: no book specified"));
        assert!(!orders_file(root.path()).exists());
    }

    #[tokio::test]
    async fn test_malformed_multipart_is_bad_request() {
        let root = tempfile::tempdir().unwrap();
        let app = test_app(root.path());

        let response = post(app, "/cgi-bin/buy", Some("multipart/form-data"), "junk").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!orders_file(root.path()).exists());
    }

    #[tokio::test]
    async fn test_complete_order_appends_line() {
        let root = tempfile::tempdir().unwrap();
        let app = test_app(root.path());

        let response = post_form(app, "/cgi-bin/buy", "book=Dune&name=Ann&phone=555").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("Thank you, Ann!"));
        assert!(body.contains("Dune"));
        assert_eq!(
            std::fs::read_to_string(orders_file(root.path())).unwrap(),
            "Dune|Ann|555\n"
        );
    }

    #[tokio::test]
    async fn test_repeated_order_is_appended_twice() {
        let root = tempfile::tempdir().unwrap();
        let app = test_app(root.path());

        post_form(app.clone(), "/cgi-bin/buy", "book=Dune&name=Ann&phone=555").await;
        post_form(app, "/cgi-bin/buy", "book=Dune&name=Ann&phone=555").await;

        assert_eq!(
            std::fs::read_to_string(orders_file(root.path())).unwrap(),
            "Dune|Ann|555\nDune|Ann|555\n"
        );
    }

    #[tokio::test]
    async fn test_missing_data_dir_is_server_error() {
        let root = tempfile::tempdir().unwrap();
        let app = test_app(root.path());
        std::fs::remove_dir_all(root.path().join("data")).unwrap();

        let response = post_form(app, "/cgi-bin/buy", "book=Dune&name=Ann&phone=555").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal server error");
    }
}
