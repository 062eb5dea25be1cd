use pulldown_cmark::{html, Options, Parser};

/// Turns a post title into a URL slug.
///
/// Lowercases, drops everything that is neither an ASCII word
/// character nor a separator, then collapses runs of whitespace,
/// underscores and hyphens into a single hyphen. Separators at either
/// end are trimmed so a title like "My Great, Post!" comes out as
/// "my-great-post".
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let kept: String = lowered
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut pending_sep = false;
    for c in kept.chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_sep = true;
        } else {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c);
        }
    }
    slug
}

/// Renders markdown to the HTML body stored on the backend.
pub fn md_to_html(md: &str) -> String {
    let parser = Parser::new_ext(md, Options::all());
    let mut buf = String::with_capacity(md.len());
    html::push_html(&mut buf, parser);
    buf
}

/// Strips every tag from an HTML fragment, keeping only the text.
pub fn strip_html(html: &str) -> String {
    ammonia::Builder::empty()
        .clean(html)
        .to_string()
}

/// Cuts a string down to `len` characters, marking the cut with an
/// ellipsis. Used for table cells and for raw error bodies.
pub fn truncate_chars(s: &str, len: usize) -> String {
    if s.chars().count() <= len {
        s.to_owned()
    } else {
        let cut: String = s.chars().take(len.saturating_sub(1)).collect();
        format!("{}…", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        let tests = vec![
            ("My Great, Post!", "my-great-post"),
            ("  Hello   World  ", "hello-world"),
            ("snake_case_title", "snake-case-title"),
            ("--already-sluggy--", "already-sluggy"),
            // Non-ASCII letters fall out entirely.
            ("C'est l'été!", "cest-lt"),
            ("Łódź 2024", "d-2024"),
            ("UPPER", "upper"),
            ("", ""),
            ("!!!", ""),
        ];

        for (title, slug) in tests {
            assert_eq!(slugify(title), slug, "slugify({:?})", title);
        }
    }

    #[test]
    fn test_md_to_html() {
        let html = md_to_html("# Title\n\nSome *text*.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>Hello <strong>world</strong></p>"),
            "Hello world"
        );
        assert_eq!(strip_html("<script>alert(1)</script>plain"), "plain");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        let cut = truncate_chars("a somewhat longer sentence", 10);
        assert!(cut.ends_with('…'));
        assert!(cut.chars().count() <= 10);
    }
}
