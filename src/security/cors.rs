//! Cross-origin policy for the HTTP surface.

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::AllowedOrigins;

/// Build the CORS layer from the configured origin policy.
///
/// A wildcard allows any origin but cannot carry credentials; an explicit
/// allowlist echoes the matching origin and allows credentials, mirroring
/// browser CORS rules.
pub fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let methods = [Method::GET, Method::POST];
    let headers = [header::AUTHORIZATION, header::CONTENT_TYPE];

    match origins {
        AllowedOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers),
        AllowedOrigins::List(list) => {
            let parsed: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Ignoring unparseable allowed origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parsed))
                .allow_methods(methods)
                .allow_headers(headers)
                .allow_credentials(true)
        }
    }
}
