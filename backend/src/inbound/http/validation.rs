//! Extractor configuration turning malformed requests into domain errors.
//!
//! Actix rejects unparsable bodies, queries and path segments before a
//! handler runs. These handlers make such rejections use the same JSON error
//! payload as every other client error.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::Error;

/// Machine-readable codes for extractor failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidBody,
    InvalidQuery,
    InvalidPath,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::InvalidPath => "invalid_path",
        }
    }
}

fn rejection(code: ErrorCode, message: &str, reason: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "code": code.as_str(),
        "reason": reason,
    }))
}

fn body_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    rejection(ErrorCode::InvalidBody, "request body is invalid", err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    rejection(ErrorCode::InvalidQuery, "query string is invalid", err.to_string()).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    rejection(ErrorCode::InvalidPath, "path parameter is invalid", err.to_string()).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(body_error)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, http::StatusCode, test};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Flags {
        #[expect(dead_code, reason = "only the extractor outcome matters")]
        validate: bool,
    }

    async fn flags(_query: web::Query<Flags>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn malformed_query_uses_the_error_payload() {
        let app = test::init_service(
            App::new()
                .app_data(query_config())
                .route("/", web::get().to(flags)),
        )
        .await;
        let req = test::TestRequest::get().uri("/?validate=maybe").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Error = test::read_body_json(res).await;
        assert_eq!(
            body.details().and_then(|d| d.get("code")),
            Some(&json!("invalid_query"))
        );
    }

    #[actix_web::test]
    async fn malformed_json_uses_the_error_payload() {
        let app = test::init_service(App::new().app_data(json_config()).route(
            "/",
            web::post().to(|_body: web::Json<serde_json::Value>| async {
                HttpResponse::Ok().finish()
            }),
        ))
        .await;
        let req = test::TestRequest::post()
            .uri("/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Error = test::read_body_json(res).await;
        assert_eq!(body.code(), crate::domain::ErrorCode::InvalidRequest);
    }
}
