//! Redirect targets derived from the `Referer` header

use axum::http::{header, HeaderMap, HeaderValue};
use proptest::prelude::*;

use organize::backend::boards::handlers::referrer_path;

fn with_referer(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(header::REFERER, value);
    }
    headers
}

proptest! {
    #[test]
    fn prop_redirect_stays_local(referer in "[ -~]{0,40}") {
        let path = referrer_path(&with_referer(&referer));
        prop_assert!(path.starts_with('/'));
        prop_assert!(!path.starts_with("//"));
    }

    #[test]
    fn prop_board_path_is_kept(id in "[0-9a-f]{8}") {
        let referer = format!("http://localhost:3000/board/{}", id);
        prop_assert_eq!(referrer_path(&with_referer(&referer)), format!("/board/{}", id));
    }
}
