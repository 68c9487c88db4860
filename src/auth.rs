use http::HeaderValue;
use http::header::AUTHORIZATION;

use crate::options::RequestOptions;

/// Bearer credentials for authenticated API calls.
///
/// An empty or absent token means anonymous: the composer leaves the
/// options untouched, including any `Authorization` header already set.
/// Whitespace-only tokens count as present and are sent verbatim.
#[derive(Debug, Clone, Default)]
pub struct Auth {
    /// Raw bearer token, sent as `Authorization: Bearer {token}`
    pub token: Option<String>,
}

impl Auth {
    /// Credentials carrying a bearer token.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Anonymous credentials; [`Auth::apply`] becomes the identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Two-argument form of [`with_auth`]: decorate one set of options.
    ///
    /// Pure with respect to everything but the `Authorization` header: all
    /// other fields pass through unchanged. A non-empty token overrides a
    /// pre-existing `Authorization`; an empty or absent one leaves it be.
    /// A token with bytes invalid in a header value is deferred, surfacing
    /// when the request is sent.
    #[must_use]
    pub fn apply(&self, mut init: RequestOptions) -> RequestOptions {
        let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) else {
            return init;
        };
        match HeaderValue::try_from(format!("Bearer {token}")) {
            Ok(value) => {
                init.headers.insert(AUTHORIZATION, value);
            }
            Err(e) => {
                if init.error.is_none() {
                    init.error = Some(e.into());
                }
            }
        }
        init
    }
}

/// Build a reusable options decorator bound to one set of credentials.
///
/// The returned closure can be applied to any number of per-call options;
/// each application is independent.
///
/// ```
/// use simap_client::{Auth, RequestOptions, with_auth};
///
/// let authed = with_auth(Auth::bearer("abc"));
/// let options = authed(RequestOptions::new());
/// assert!(options.headers.contains_key(http::header::AUTHORIZATION));
/// ```
pub fn with_auth(auth: Auth) -> impl Fn(RequestOptions) -> RequestOptions {
    move |init| auth.apply(init)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;
    use http::header::{ACCEPT, CONTENT_TYPE};
    use std::time::Duration;

    #[test]
    fn adds_bearer_header_when_token_present() {
        let options = with_auth(Auth::bearer("test-token-123"))(RequestOptions::new());
        assert_eq!(
            options.headers.get(AUTHORIZATION).unwrap(),
            "Bearer test-token-123"
        );
        assert_eq!(options.headers.len(), 1);
    }

    #[test]
    fn leaves_options_untouched_without_token() {
        let options = with_auth(Auth::anonymous())(RequestOptions::new());
        assert!(options.headers.is_empty());
    }

    #[test]
    fn empty_token_is_treated_as_absent() {
        let options = with_auth(Auth::bearer(""))(RequestOptions::new());
        assert!(!options.headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn preserves_existing_headers() {
        let init = RequestOptions::new()
            .header("content-type", "application/json")
            .header("x-custom", "value");
        let options = with_auth(Auth::bearer("token"))(init);

        assert_eq!(
            options.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(options.headers.get("x-custom").unwrap(), "value");
        assert_eq!(options.headers.get(AUTHORIZATION).unwrap(), "Bearer token");
    }

    #[test]
    fn preserves_headers_supplied_as_a_typed_map() {
        // All header routes normalize into one map, so nothing is dropped
        // when the caller passes a HeaderMap instead of string pairs.
        let mut typed = HeaderMap::new();
        typed.insert(ACCEPT, "application/json".parse().unwrap());
        typed.insert(CONTENT_TYPE, "application/json".parse().unwrap());

        let options = with_auth(Auth::bearer("token"))(RequestOptions::new().header_map(typed));

        assert_eq!(options.headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(
            options.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(options.headers.get(AUTHORIZATION).unwrap(), "Bearer token");
        assert_eq!(options.headers.len(), 3);
    }

    #[test]
    fn overrides_existing_authorization() {
        let init = RequestOptions::new().header("authorization", "Bearer old");
        let options = with_auth(Auth::bearer("new"))(init);
        assert_eq!(options.headers.get(AUTHORIZATION).unwrap(), "Bearer new");
    }

    #[test]
    fn keeps_existing_authorization_without_token() {
        let init = RequestOptions::new().header("authorization", "Basic dXNlcjpwYXNz");
        let options = with_auth(Auth::anonymous())(init);
        assert_eq!(
            options.headers.get(AUTHORIZATION).unwrap(),
            "Basic dXNlcjpwYXNz"
        );
    }

    #[test]
    fn preserves_non_header_fields() {
        let init = RequestOptions::new().with_timeout(Duration::from_secs(3));
        let options = with_auth(Auth::bearer("token"))(init);
        assert_eq!(options.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn decorator_is_reusable_across_calls() {
        let authed = with_auth(Auth::bearer("shared"));
        let first = authed(RequestOptions::new());
        let second = authed(RequestOptions::new().header("x-call", "2"));

        assert_eq!(first.headers.get(AUTHORIZATION).unwrap(), "Bearer shared");
        assert_eq!(second.headers.get(AUTHORIZATION).unwrap(), "Bearer shared");
        assert_eq!(second.headers.get("x-call").unwrap(), "2");
        assert_eq!(first.headers.len(), 1);
    }

    #[test]
    fn token_special_characters_pass_through() {
        let token = "abc.def-123_456~789+/=";
        let options = with_auth(Auth::bearer(token))(RequestOptions::new());
        assert_eq!(
            options.headers.get(AUTHORIZATION).unwrap(),
            format!("Bearer {token}").as_str()
        );
    }

    #[test]
    fn long_tokens_are_not_truncated() {
        let token = "a".repeat(1000);
        let options = with_auth(Auth::bearer(token.clone()))(RequestOptions::new());
        let value = options.headers.get(AUTHORIZATION).unwrap();
        assert_eq!(value.len(), "Bearer ".len() + 1000);
        assert_eq!(value, format!("Bearer {token}").as_str());
    }

    #[test]
    fn whitespace_token_counts_as_present() {
        let options = with_auth(Auth::bearer("   "))(RequestOptions::new());
        assert_eq!(options.headers.get(AUTHORIZATION).unwrap(), "Bearer    ");
    }

    #[test]
    fn control_bytes_in_token_are_deferred() {
        let mut options = with_auth(Auth::bearer("bad\ntoken"))(RequestOptions::new());
        assert!(!options.headers.contains_key(AUTHORIZATION));
        assert!(options.take_error().is_some());
    }
}
