use reqwest::header::{
    HeaderMap, HeaderValue, InvalidHeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT,
};

pub const APP_USER_AGENT: &str = concat!("Quill/", env!("CARGO_PKG_VERSION"));

/// Header set shared by every request to the backend.
pub fn headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(APP_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// `Authorization: Bearer <token>` for authenticated endpoints.
pub fn bearer(token: &str) -> Result<(reqwest::header::HeaderName, HeaderValue), InvalidHeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
    value.set_sensitive(true);
    Ok((AUTHORIZATION, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_headers() {
        let h = headers();
        assert_eq!(h.get(USER_AGENT).unwrap(), APP_USER_AGENT);
        assert_eq!(h.get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn bearer_header() {
        let (name, value) = bearer("abc123").unwrap();
        assert_eq!(name, AUTHORIZATION);
        assert!(value.is_sensitive());
        // Control characters can't go in a header.
        assert!(bearer("bad\ntoken").is_err());
    }
}
