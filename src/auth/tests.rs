//! Tests for the auth module

use super::*;
use crate::request::RequestDescriptor;

#[test]
fn test_catalog_scope_sets_bearer_only() {
    let auth = Authenticator::new(Credentials::with_user_token("dev-token", "user-token"));
    let req = auth.apply(
        RequestDescriptor::get("https://api.music.apple.com/v1/storefronts"),
        TokenScope::Catalog,
    );

    assert_eq!(req.header_value("Authorization"), Some("Bearer dev-token"));
    assert_eq!(req.header_value(MUSIC_USER_TOKEN_HEADER), None);
}

#[test]
fn test_library_scope_sets_both_headers() {
    let auth = Authenticator::new(Credentials::with_user_token("dev-token", "user-token"));
    let req = auth.apply(
        RequestDescriptor::get("https://api.music.apple.com/v1/me/storefront"),
        TokenScope::Library,
    );

    assert_eq!(req.header_value("authorization"), Some("Bearer dev-token"));
    assert_eq!(req.header_value("Music-User-Token"), Some("user-token"));
}

#[test]
fn test_library_scope_without_user_token() {
    let auth = Authenticator::new(Credentials::new("dev-token"));
    let req = auth.apply(
        RequestDescriptor::get("https://api.music.apple.com/v1/me/library/songs"),
        TokenScope::Library,
    );

    assert_eq!(req.header_value("Authorization"), Some("Bearer dev-token"));
    assert_eq!(req.header_value(MUSIC_USER_TOKEN_HEADER), None);
    assert_eq!(req.headers.len(), 1);
}

#[test]
fn test_credentials_debug_redacts_tokens() {
    let creds = Credentials::with_user_token("secret-dev", "secret-user");
    let debug = format!("{creds:?}");

    assert!(!debug.contains("secret-dev"));
    assert!(!debug.contains("secret-user"));
    assert!(debug.contains("<redacted>"));
    assert!(creds.has_user_token());
    assert!(!Credentials::new("x").has_user_token());
}
