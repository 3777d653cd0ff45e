//! Session cookie policy for the `token` cookie.

use axum::http::{header, HeaderMap, HeaderValue};

use crate::error::{AppError, AppResult};

pub const TOKEN_COOKIE: &str = "token";

const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
        }
    }
}

/// Fixed attributes for the identity cookie. Only `secure` and the max age
/// vary, both from configuration.
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    pub name: &'static str,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: &'static str,
    pub max_age_secs: i64,
}

impl CookiePolicy {
    pub fn new(secure: bool, max_age_secs: i64) -> Self {
        Self {
            name: TOKEN_COOKIE,
            secure,
            same_site: SameSite::default(),
            path: "/",
            max_age_secs,
        }
    }

    fn attributes(&self) -> String {
        let mut attrs = format!(
            "; HttpOnly; SameSite={}; Path={}",
            self.same_site.as_str(),
            self.path
        );
        if self.secure {
            attrs.push_str("; Secure");
        }
        attrs
    }

    /// `Set-Cookie` value carrying the signed token.
    pub fn attach(&self, token: &str) -> AppResult<HeaderValue> {
        let cookie = format!(
            "{}={}{}; Max-Age={}",
            self.name,
            token,
            self.attributes(),
            self.max_age_secs
        );
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("cookie header: {}", e)))
    }

    /// `Set-Cookie` value that empties and expires the cookie.
    pub fn clear(&self) -> HeaderValue {
        let cookie = format!(
            "{}={}; Max-Age=0; Expires={}",
            self.name,
            self.attributes(),
            EXPIRED
        );
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| {
            HeaderValue::from_static("token=; HttpOnly; Path=/; Max-Age=0")
        })
    }

    /// Value of our cookie from the request's `Cookie` header, if non-empty.
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .find_map(|pair| {
                let (key, value) = pair.trim().split_once('=')?;
                (key == self.name && !value.is_empty()).then(|| value.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_sets_security_attributes() {
        let cookie = CookiePolicy::new(false, 900).attach("abc.def.ghi").unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("token=abc.def.ghi"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=900"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn secure_flag_in_production() {
        let policy = CookiePolicy::new(true, 60);
        assert!(policy.attach("t").unwrap().to_str().unwrap().contains("; Secure"));
        assert!(policy.clear().to_str().unwrap().contains("; Secure"));
    }

    #[test]
    fn clear_empties_and_expires() {
        let cookie = CookiePolicy::new(false, 900).clear();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("token=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[test]
    fn read_finds_token_cookie() {
        let policy = CookiePolicy::new(false, 900);
        let mut headers = HeaderMap::new();
        assert_eq!(policy.read(&headers), None);

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; token=abc123; other=xyz"),
        );
        assert_eq!(policy.read(&headers), Some("abc123".to_string()));

        headers.insert(header::COOKIE, HeaderValue::from_static("token="));
        assert_eq!(policy.read(&headers), None);
    }
}
