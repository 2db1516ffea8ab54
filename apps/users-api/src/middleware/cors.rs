use actix_cors::Cors;
use actix_web::http::header;

use super::request_trace::TRACE_ID_HEADER;

/// Origins used when none of the configured ones are usable.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Keep only `http(s)://` origins, dropping empty and `null` entries.
pub fn effective_origins(configured: &[String]) -> Vec<String> {
    let valid: Vec<String> = configured
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    if valid.is_empty() {
        DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        valid
    }
}

/// Build CORS middleware for a read-only API:
/// - explicit origins only
/// - only the methods the API serves
pub fn cors_middleware(configured_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static(TRACE_ID_HEADER)])
        .max_age(3600);

    for origin in effective_origins(configured_origins) {
        cors = cors.allowed_origin(&origin);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_origins_filters_garbage() {
        let configured = vec![
            " https://app.example.com ".to_string(),
            "null".to_string(),
            "".to_string(),
            "ftp://files.example.com".to_string(),
        ];

        assert_eq!(effective_origins(&configured), vec!["https://app.example.com"]);
    }

    #[test]
    fn test_effective_origins_falls_back_to_localhost() {
        assert_eq!(
            effective_origins(&["null".to_string()]),
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
        assert_eq!(effective_origins(&[]).len(), 2);
    }
}
