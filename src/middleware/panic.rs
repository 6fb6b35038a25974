use std::any::Any;

use axum::response::Response;

use crate::error::server_error_response;

/// Response for a handler that panicked. The payload is logged, never returned.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = %detail, "Handler panicked");

    server_error_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_panic_payloads_map_to_server_error() {
        let payloads: Vec<Box<dyn Any + Send>> = vec![
            Box::new("static message"),
            Box::new(String::from("owned message")),
            Box::new(42_u8),
        ];

        for payload in payloads {
            let response = handle_panic(payload);
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
