//! Cookie Management Infrastructure
//!
//! Cookie building and extraction for token transport. Access and refresh
//! tokens are mirrored into `HttpOnly` cookies so browser clients never
//! touch them from script.

use axum::http::{HeaderMap, HeaderValue, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<i64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }
}

impl CookieConfig {
    /// Configuration for a token-bearing cookie
    ///
    /// HttpOnly, Path=/, with the token lifetime as Max-Age.
    pub fn token(name: impl Into<String>, max_age_secs: i64, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: Some(max_age_secs),
        }
    }

    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}", self.name, value);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));

        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }

        cookie
    }

    /// Build Set-Cookie header for deletion (expired)
    pub fn build_delete_cookie(&self) -> String {
        format!("{}=; HttpOnly; Path={}; Max-Age=0", self.name, self.path)
    }

    /// Append a Set-Cookie header carrying `value` to `headers`
    pub fn append_set_cookie(&self, headers: &mut HeaderMap, value: &str) {
        if let Ok(header_value) = HeaderValue::from_str(&self.build_set_cookie(value)) {
            headers.append(header::SET_COOKIE, header_value);
        }
    }

    /// Append an expiring Set-Cookie header to `headers`
    pub fn append_delete_cookie(&self, headers: &mut HeaderMap) {
        if let Ok(header_value) = HeaderValue::from_str(&self.build_delete_cookie()) {
            headers.append(header::SET_COOKIE, header_value);
        }
    }
}

/// Extract a cookie value from request headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name {
                Some(value.to_string())
            } else {
                None
            }
        })
}

/// Extract a bearer token from the Authorization header
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_cookie_build() {
        let config = CookieConfig::token("JWT_ACCESS_TOKEN", 900, true);

        let cookie = config.build_set_cookie("ey.token.value");
        assert!(cookie.starts_with("JWT_ACCESS_TOKEN=ey.token.value"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=900"));
    }

    #[test]
    fn test_delete_cookie_expires_immediately() {
        let config = CookieConfig::token("JWT_REFRESH_TOKEN", 604800, true);

        let cookie = config.build_delete_cookie();
        assert!(cookie.starts_with("JWT_REFRESH_TOKEN=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_append_set_cookie() {
        let config = CookieConfig::token("JWT_ACCESS_TOKEN", 900, false);
        let mut headers = HeaderMap::new();

        config.append_set_cookie(&mut headers, "abc");
        config.append_delete_cookie(&mut headers);

        let values: Vec<_> = headers.get_all(header::SET_COOKIE).iter().collect();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; JWT_ACCESS_TOKEN=abc123; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "JWT_ACCESS_TOKEN"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer token123"),
        );

        assert_eq!(extract_bearer(&headers), Some("token123".to_string()));

        let mut basic = HeaderMap::new();
        basic.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(extract_bearer(&basic), None);
    }
}
