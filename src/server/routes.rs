//! Request routing for the document REST API.
//!
//! Routing is synchronous and independent of the connection machinery so it
//! can be exercised directly in tests; the server runs it on the blocking
//! pool because every route touches the filesystem.

use crate::error::{Result, ViewerError};
use crate::store::{DocumentStore, TreeSource};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::{Method, Response, StatusCode};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::json;
use chrono::{SecondsFormat, Utc};
use std::borrow::Cow;

pub type HttpResponse = Response<Full<Bytes>>;

/// Optional prefix every route may be mounted under.
pub const API_PREFIX: &str = "/api";

/// Mount point mirroring the outputs directory for image files.
pub const STATIC_MOUNT: &str = "images";

/// A parsed API route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Health,
    Documents,
    Document(String),
    Images(String),
    Image { document_id: String, image_name: String },
    /// `/images/<id>/images/<name>`, the outputs directory served as files.
    Static { document_id: String, image_name: String },
}

impl Route {
    /// Parses a request path, decoding each segment.
    ///
    /// Returns `Ok(None)` for unknown paths.
    pub fn parse(path: &str) -> Result<Option<Route>> {
        let path = path
            .strip_prefix(API_PREFIX)
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .unwrap_or(path);
        let trimmed = path.trim_matches('/');
        let raw: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };
        let segments = raw
            .into_iter()
            .map(decode_segment)
            .collect::<Result<Vec<_>>>()?;

        let route = match segments.as_slice() {
            [health] if health == "health" => Some(Route::Health),
            [documents] if documents == "documents" => Some(Route::Documents),
            [documents, id] if documents == "documents" => Some(Route::Document(id.to_string())),
            [documents, id, images] if documents == "documents" && images == "images" => {
                Some(Route::Images(id.to_string()))
            }
            [documents, id, images, name] if documents == "documents" && images == "images" => {
                Some(Route::Image {
                    document_id: id.to_string(),
                    image_name: name.to_string(),
                })
            }
            [mount, id, images, name] if mount == STATIC_MOUNT && images == "images" => {
                Some(Route::Static {
                    document_id: id.to_string(),
                    image_name: name.to_string(),
                })
            }
            _ => None,
        };
        Ok(route)
    }
}

fn decode_segment(segment: &str) -> Result<Cow<'_, str>> {
    percent_decode_str(segment)
        .decode_utf8()
        .map_err(|_| ViewerError::InvalidInput("path is not valid UTF-8".to_string()))
}

/// Handles one request against `store`.
pub fn route(store: &DocumentStore, method: &Method, path: &str) -> HttpResponse {
    if method != Method::GET {
        let mut response = error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed",
            None,
        );
        response
            .headers_mut()
            .insert(header::ALLOW, HeaderValue::from_static("GET"));
        return response;
    }

    let route = match Route::parse(path) {
        Ok(Some(route)) => route,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, "Route not found", None),
        Err(err) => return viewer_error_response(&err),
    };

    match handle(store, route) {
        Ok(response) => response,
        Err(err) => viewer_error_response(&err),
    }
}

fn handle(store: &DocumentStore, route: Route) -> Result<HttpResponse> {
    match route {
        Route::Health => Ok(json_response(
            StatusCode::OK,
            &json!({
                "success": true,
                "message": "Server is running",
                "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            }),
        )),
        Route::Documents => {
            let documents = store.list_documents()?;
            Ok(list_response(&documents))
        }
        Route::Document(id) => {
            let tree = store.fetch_tree(&id)?;
            Ok(json_response(
                StatusCode::OK,
                &json!({ "success": true, "data": tree }),
            ))
        }
        Route::Images(id) => {
            let images = store.list_images(&id)?;
            Ok(list_response(&images))
        }
        Route::Image {
            document_id,
            image_name,
        }
        | Route::Static {
            document_id,
            image_name,
        } => {
            let (bytes, content_type) = store.read_image(&document_id, &image_name)?;
            let mut response = Response::new(Full::new(Bytes::from(bytes)));
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
            Ok(with_cors(response))
        }
    }
}

fn list_response<T: Serialize>(items: &[T]) -> HttpResponse {
    json_response(
        StatusCode::OK,
        &json!({ "success": true, "data": items, "count": items.len() }),
    )
}

fn viewer_error_response(err: &ViewerError) -> HttpResponse {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    } else {
        tracing::debug!(error = %err, "request rejected");
    }
    let label = match err {
        ViewerError::NotFound(_) => "Not found",
        ViewerError::InvalidInput(_) => "Invalid request",
        ViewerError::Internal(_) => "Internal server error",
    };
    error_response(status, label, Some(err.client_message()))
}

fn error_response(status: StatusCode, error: &str, message: Option<String>) -> HttpResponse {
    let body = match message {
        Some(message) => json!({ "success": false, "error": error, "message": message }),
        None => json!({ "success": false, "error": error }),
    };
    json_response(status, &body)
}

fn json_response(status: StatusCode, body: &serde_json::Value) -> HttpResponse {
    let bytes = serde_json::to_vec(body).unwrap_or_default();
    let mut response = Response::new(Full::new(Bytes::from(bytes)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    with_cors(response)
}

/// Adds the permissive CORS header every response carries.
pub fn with_cors(mut response: HttpResponse) -> HttpResponse {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;

    fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(response.into_body().collect())
            .unwrap()
            .to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/health").unwrap(), Some(Route::Health));
        assert_eq!(Route::parse("/api/health").unwrap(), Some(Route::Health));
        assert_eq!(Route::parse("/api/documents/").unwrap(), Some(Route::Documents));
        assert_eq!(
            Route::parse("/documents/my%20paper/images/fig%201.png").unwrap(),
            Some(Route::Image {
                document_id: "my paper".into(),
                image_name: "fig 1.png".into(),
            })
        );
        assert_eq!(Route::parse("/apidocs").unwrap(), None);
        assert_eq!(Route::parse("/").unwrap(), None);
        assert!(Route::parse("/documents/%FF").is_err());
        assert_eq!(
            Route::parse("/images/paper/images/fig1.png").unwrap(),
            Some(Route::Static {
                document_id: "paper".into(),
                image_name: "fig1.png".into(),
            })
        );
        assert_eq!(Route::parse("/images/paper/fig1.png").unwrap(), None);
    }

    #[test]
    fn test_unknown_route() {
        let store = DocumentStore::new(std::env::temp_dir().join("outline_viewer_routes_none"));
        let response = route(&store, &Method::GET, "/nope");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            HeaderValue::from_static("*")
        );
        assert_eq!(
            body_json(response),
            json!({ "success": false, "error": "Route not found" })
        );
    }

    #[test]
    fn test_non_get_is_rejected() {
        let store = DocumentStore::new(std::env::temp_dir().join("outline_viewer_routes_none"));
        let response = route(&store, &Method::POST, "/health");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET");
    }

    #[test]
    fn test_health() {
        let store = DocumentStore::new(std::env::temp_dir().join("outline_viewer_routes_none"));
        let body = body_json(route(&store, &Method::GET, "/health"));
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["message"], json!("Server is running"));
        let timestamp = body["timestamp"].as_str().unwrap();
        let parsed = chrono::DateTime::parse_from_rfc3339(timestamp).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert!(timestamp.ends_with('Z'), "{timestamp}");
    }

    #[test]
    fn test_traversal_is_bad_request() {
        let store = DocumentStore::new(std::env::temp_dir().join("outline_viewer_routes_none"));
        let response = route(&store, &Method::GET, "/api/documents/x/images/..%5Csecret.png");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = route(&store, &Method::GET, "/api/documents/x/images/a%2Fb.png");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = route(&store, &Method::GET, "/images/x/images/..%2F..%2Fsecret.png");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
