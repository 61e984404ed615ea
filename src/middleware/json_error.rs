use axum::{
    body::{Bytes, to_bytes},
    extract::Request,
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Rewrites error responses that did not come from a handler (extractor
/// rejections, unknown routes, wrong methods) into the `{"error": ...}`
/// envelope. 422 from the JSON extractor becomes 400.
pub async fn json_error_middleware(req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    if !response.status().is_client_error() && !response.status().is_server_error() {
        return response;
    }

    if is_json_response(&response) {
        return response;
    }

    let status = response.status();
    let (parts, body) = response.into_parts();
    let message = match to_bytes(body, MAX_ERROR_BODY_BYTES).await {
        Ok(bytes) => body_bytes_to_message(status, bytes),
        Err(_) => default_message(status),
    };

    let mut new_response = AppError::from_status(status, message).into_response();
    copy_headers(&parts.headers, &mut new_response);
    new_response
}

fn is_json_response(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let value = value.to_ascii_lowercase();
            value.contains("application/json") || value.contains("+json")
        })
        .unwrap_or(false)
}

fn body_bytes_to_message(status: StatusCode, bytes: Bytes) -> String {
    let message = String::from_utf8_lossy(&bytes).trim().to_string();
    if message.is_empty() {
        return default_message(status);
    }
    message
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

fn copy_headers(src: &HeaderMap, dest: &mut Response) {
    for (name, value) in src {
        if name == header::CONTENT_TYPE || name == header::CONTENT_LENGTH {
            continue;
        }
        dest.headers_mut().insert(name.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Bytes, http::StatusCode};

    use super::{body_bytes_to_message, default_message};

    #[test]
    fn empty_body_falls_back_to_reason_phrase() {
        assert_eq!(
            body_bytes_to_message(StatusCode::METHOD_NOT_ALLOWED, Bytes::from_static(b"  ")),
            "Method Not Allowed"
        );
        assert_eq!(default_message(StatusCode::NOT_FOUND), "Not Found");
    }

    #[test]
    fn body_text_becomes_message() {
        assert_eq!(
            body_bytes_to_message(
                StatusCode::BAD_REQUEST,
                Bytes::from_static(b"Invalid URL: Cannot parse `abc` to a `i64`\n"),
            ),
            "Invalid URL: Cannot parse `abc` to a `i64`"
        );
    }
}
