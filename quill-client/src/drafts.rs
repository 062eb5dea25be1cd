//! The in-memory mirror of a post while it is being composed.
//!
//! A draft starts empty (new post) or hydrated from a fetched post
//! (edit), and is turned into the multipart field list the backend
//! expects on submit. It may point at a local image file that has not
//! been uploaded yet; a draft hydrated from an existing post keeps the
//! persisted image URL instead.

use crate::{Error, Result};
use quill_api::posts::{Author, Blog};
use quill_common::utils::{md_to_html, slugify};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default)]
pub struct BlogDraft {
    pub title: String,
    pub slug: String,
    pub meta_description: String,
    pub excerpt: String,
    /// URL of an already-persisted image, if any.
    pub image: String,
    pub category: String,
    pub author: Author,
    pub date: String,
    /// HTML body, as the editor serialized it.
    pub content: String,
    pub tags: Vec<String>,
    pub cta_title: Option<String>,
    pub cta_link: Option<String>,
    pub cta_desc: Option<String>,
    pub cta_button_title: Option<String>,
    /// Raw JSON-LD snippets, stored verbatim.
    pub seo_scripts: Vec<String>,
    pub is_published: bool,
    /// Local file to upload as the post image.
    pub image_file: Option<PathBuf>,
}

/// One multipart field, before it is handed to the HTTP layer.
#[derive(Clone, Debug, PartialEq)]
pub enum FormValue {
    Text(String),
    File(PathBuf),
}

pub type FormFields = Vec<(&'static str, FormValue)>;

impl BlogDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrates a draft from a fetched post, for editing.
    pub fn from_blog(blog: &Blog) -> Self {
        BlogDraft {
            title: blog.title.clone(),
            slug: blog.slug.clone(),
            meta_description: blog.meta_description.clone(),
            excerpt: blog.excerpt.clone(),
            image: blog.image.clone(),
            category: blog.category.clone(),
            author: blog.author.clone(),
            // The backend sends a timestamp, the form edits a date.
            date: blog.date.split('T').next().unwrap_or_default().to_owned(),
            content: blog.content.clone(),
            tags: blog.tags.clone(),
            cta_title: blog.cta_title.clone(),
            cta_link: blog.cta_link.clone(),
            cta_desc: blog.cta_desc.clone(),
            cta_button_title: blog.cta_button_title.clone(),
            seo_scripts: blog.seo_scripts.clone(),
            is_published: blog.is_published,
            image_file: None,
        }
    }

    /// Sets the title, deriving the slug from it unless one was
    /// already given explicitly.
    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
        if self.slug.is_empty() {
            self.slug = slugify(title);
        }
    }

    pub fn add_tag(&mut self, tag: &str) {
        let tag = tag.trim();
        if !tag.is_empty() && !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_owned());
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Reads the post body from a file. Markdown is rendered to HTML,
    /// anything else is taken as HTML verbatim.
    pub fn set_content_from_file(&mut self, path: &Path) -> Result<()> {
        let raw = fs::read_to_string(path)?;
        let is_markdown = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("md") | Some("markdown")
        );
        self.content = if is_markdown { md_to_html(&raw) } else { raw };
        Ok(())
    }

    pub fn attach_image(&mut self, path: PathBuf) {
        self.image_file = Some(path);
    }

    pub fn add_seo_script(&mut self, script: String) {
        self.seo_scripts.push(script);
    }

    pub fn add_seo_script_from_file(&mut self, path: &Path) -> Result<()> {
        self.add_seo_script(fs::read_to_string(path)?);
        Ok(())
    }

    /// Checks the draft before anything is sent over the wire.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("a title is required".to_owned()));
        }
        if self.slug.trim().is_empty() {
            return Err(Error::Validation("a slug is required".to_owned()));
        }
        if self.content.trim().is_empty() {
            return Err(Error::Validation("the post body is empty".to_owned()));
        }
        if self.is_published && self.image_file.is_none() && self.image.is_empty() {
            return Err(Error::Validation(
                "a published post needs an image".to_owned(),
            ));
        }
        Ok(())
    }

    /// The multipart fields for create and update. Nested values
    /// (author, tags, seoScripts) are JSON-encoded; the image file, if
    /// any, rides along as the `blogImage` part. When there is no new
    /// file the part is simply absent and the backend keeps whatever
    /// image the post already has.
    pub fn form_fields(&self) -> Result<FormFields> {
        let mut fields: FormFields = vec![
            ("title", FormValue::Text(self.title.clone())),
            ("slug", FormValue::Text(self.slug.clone())),
            ("isPublished", FormValue::Text(self.is_published.to_string())),
        ];

        let optional = [
            ("metaDescription", &self.meta_description),
            ("excerpt", &self.excerpt),
            ("category", &self.category),
            ("date", &self.date),
            ("content", &self.content),
        ];
        for &(name, value) in &optional {
            if !value.is_empty() {
                fields.push((name, FormValue::Text(value.clone())));
            }
        }

        fields.push(("author", FormValue::Text(serde_json::to_string(&self.author)?)));
        fields.push(("tags", FormValue::Text(serde_json::to_string(&self.tags)?)));
        if !self.seo_scripts.is_empty() {
            fields.push((
                "seoScripts",
                FormValue::Text(serde_json::to_string(&self.seo_scripts)?),
            ));
        }

        let cta = [
            ("ctaTitle", &self.cta_title),
            ("ctaLink", &self.cta_link),
            ("ctaDesc", &self.cta_desc),
            ("ctaButtonTitle", &self.cta_button_title),
        ];
        for &(name, value) in &cta {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                fields.push((name, FormValue::Text(v.to_owned())));
            }
        }

        if let Some(ref path) = self.image_file {
            fields.push(("blogImage", FormValue::File(path.clone())));
        }

        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_blog() -> Blog {
        serde_json::from_value(serde_json::json!({
            "_id": "64f0c2",
            "title": "Hello",
            "slug": "hello",
            "metaDescription": "greeting",
            "excerpt": "hi",
            "image": "https://cdn.example.com/hello.png",
            "category": "misc",
            "author": { "name": "Jane", "avatar": "https://cdn.example.com/a.png" },
            "date": "2023-08-31T00:00:00.000Z",
            "content": "<p>hi</p>",
            "tags": ["intro"],
            "isPublished": true,
            "createdAt": "2023-08-31T10:00:00Z",
            "updatedAt": "2023-08-31T10:00:00Z"
        }))
        .unwrap()
    }

    fn field<'a>(fields: &'a FormFields, name: &str) -> Option<&'a FormValue> {
        fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    #[test]
    fn title_drives_slug_until_one_is_given() {
        let mut draft = BlogDraft::new();
        draft.set_title("My Great, Post!");
        assert_eq!(draft.slug, "my-great-post");

        // An explicit slug survives later title edits.
        draft.slug = "kept".to_owned();
        draft.set_title("Another Title");
        assert_eq!(draft.slug, "kept");
    }

    #[test]
    fn publishing_without_image_fails_validation() {
        let mut draft = BlogDraft::new();
        draft.set_title("Post");
        draft.content = "<p>body</p>".to_owned();

        draft.is_published = false;
        assert!(draft.validate().is_ok());

        draft.is_published = true;
        match draft.validate() {
            Err(Error::Validation(msg)) => assert!(msg.contains("image")),
            other => panic!("expected a validation error, got {:?}", other),
        }

        // A local file or a persisted URL both satisfy it.
        draft.attach_image(PathBuf::from("cover.png"));
        assert!(draft.validate().is_ok());
        draft.image_file = None;
        draft.image = "https://cdn.example.com/cover.png".to_owned();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn resubmit_without_new_file_has_no_image_part() {
        let blog = sample_blog();
        let draft = BlogDraft::from_blog(&blog);
        assert_eq!(draft.date, "2023-08-31");
        assert!(draft.validate().is_ok());

        let fields = draft.form_fields().unwrap();
        assert!(field(&fields, "blogImage").is_none());
        // The persisted URL stays on the draft for validation only.
        assert_eq!(draft.image, blog.image);
    }

    #[test]
    fn form_fields_shape() {
        let mut draft = BlogDraft::new();
        draft.set_title("Hello World");
        draft.content = "<p>hi</p>".to_owned();
        draft.author = Author {
            name: "Jane".to_owned(),
            avatar: "https://cdn.example.com/a.png".to_owned(),
            bio: None,
        };
        draft.add_tag("rust");
        draft.add_tag(" rust ");
        draft.add_tag("cli");
        draft.add_seo_script(r#"{"@type":"Article"}"#.to_owned());
        draft.cta_title = Some("Read more".to_owned());
        draft.attach_image(PathBuf::from("cover.png"));

        let fields = draft.form_fields().unwrap();
        assert_eq!(
            field(&fields, "tags"),
            Some(&FormValue::Text(r#"["rust","cli"]"#.to_owned()))
        );
        assert_eq!(
            field(&fields, "seoScripts"),
            Some(&FormValue::Text(r#"["{\"@type\":\"Article\"}"]"#.to_owned()))
        );
        assert_eq!(
            field(&fields, "author"),
            Some(&FormValue::Text(
                r#"{"name":"Jane","avatar":"https://cdn.example.com/a.png"}"#.to_owned()
            ))
        );
        assert_eq!(
            field(&fields, "blogImage"),
            Some(&FormValue::File(PathBuf::from("cover.png")))
        );
        assert_eq!(
            field(&fields, "ctaTitle"),
            Some(&FormValue::Text("Read more".to_owned()))
        );
        // Empty optionals stay out of the form.
        assert!(field(&fields, "metaDescription").is_none());
        assert!(field(&fields, "ctaLink").is_none());
    }

    #[test]
    fn markdown_content_is_rendered() {
        let dir = std::env::temp_dir().join(format!("quill-draft-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("body.md");
        fs::write(&path, "# Heading\n\nbody").unwrap();

        let mut draft = BlogDraft::new();
        draft.set_content_from_file(&path).unwrap();
        assert!(draft.content.contains("<h1>Heading</h1>"));

        let html = dir.join("body.html");
        fs::write(&html, "<p>as-is</p>").unwrap();
        draft.set_content_from_file(&html).unwrap();
        assert_eq!(draft.content, "<p>as-is</p>");
    }
}
