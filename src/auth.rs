use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use constant_time_eq::constant_time_eq;

use crate::error::ApiError;
use crate::settings::Settings;

/// Checks the shared admin secret, taken from a Bearer header or the `key`
/// query parameter. Comparison is constant-time.
pub fn verify_admin_key(
    settings: &Settings,
    auth: Option<Authorization<Bearer>>,
    query_key: Option<&str>,
) -> Result<(), ApiError> {
    let provided_key = auth
        .map(|a| a.token().to_string())
        .or_else(|| query_key.map(|s| s.to_string()));
    match provided_key {
        Some(key) if constant_time_eq(key.as_bytes(), settings.admin_key.as_bytes()) => Ok(()),
        _ => Err(ApiError::Unauthorized("Invalid admin key".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            admin_key: "secret".to_string(),
            debug: false,
            port: 8080,
            data_dir: "./data/bookings".to_string(),
            enable_swagger: true,
        }
    }

    #[test]
    fn test_verify_admin_key_header() {
        let auth = Authorization::bearer("secret").unwrap();
        assert!(verify_admin_key(&settings(), Some(auth), None).is_ok());
    }

    #[test]
    fn test_verify_admin_key_query() {
        assert!(verify_admin_key(&settings(), None, Some("secret")).is_ok());
        assert!(verify_admin_key(&settings(), None, Some("bad")).is_err());
        assert!(verify_admin_key(&settings(), None, None).is_err());
    }

    #[test]
    fn test_header_takes_precedence_over_query() {
        let auth = Authorization::bearer("bad").unwrap();
        assert!(verify_admin_key(&settings(), Some(auth), Some("secret")).is_err());
    }
}
