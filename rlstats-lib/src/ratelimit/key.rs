use std::fmt;

/// An API key for <https://rocketleaguestats.com>.
///
/// The key authorizes requests and partitions all rate-limiting state:
/// requests sharing a key share one admission queue, requests under
/// different keys never wait on each other. Keys are opaque and compared
/// byte-for-byte; no normalization is applied.
///
/// `Debug` and `Display` redact the key so it cannot leak into logs or
/// error messages.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key string
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, used as the `Authorization` header value
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_case_sensitive() {
        assert_ne!(ApiKey::from("abc123"), ApiKey::from("ABC123"));
    }

    #[test]
    fn test_debug_redacts() {
        let key = ApiKey::from("super-secret");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
        assert_eq!(key.to_string(), "***");
    }

    #[test]
    fn test_map_lookup() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(ApiKey::from("one"), 1);
        assert_eq!(map.get(&ApiKey::from("one")), Some(&1));
        assert_eq!(map.get(&ApiKey::from("ONE")), None);
    }
}
