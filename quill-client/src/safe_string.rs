//! HTML that has been run through a sanitizer and is safe to echo,
//! whether in a terminal or embedded in a page.

use ammonia::clean;
use std::{
    fmt::{self, Display},
    ops::Deref,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SafeString {
    value: String,
}

impl SafeString {
    pub fn new(value: &str) -> Self {
        SafeString {
            value: clean(value),
        }
    }

    pub fn get(&self) -> &String {
        &self.value
    }
}

impl Display for SafeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Deref for SafeString {
    type Target = str;
    fn deref(&self) -> &str {
        &self.value
    }
}

impl AsRef<str> for SafeString {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_are_stripped() {
        let s = SafeString::new("<p>fine</p><script>alert(1)</script>");
        assert_eq!(s.get(), "<p>fine</p>");
    }

    #[test]
    fn embeds_are_stripped() {
        let s = SafeString::new(r#"<b>bold</b><iframe src="x"></iframe>"#);
        assert_eq!(&*s, "<b>bold</b>");
    }
}
