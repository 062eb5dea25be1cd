use chrono::{DateTime, Utc};

/// Number of posts per list page when the caller doesn't ask for
/// something else. Matches what the backend pages by default.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// A blog post as the backend stores it. Everything is owned
/// server-side, the client only ever holds a transient copy.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    pub author: Author,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_button_title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seo_scripts: Vec<String>,
    pub is_published: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Blog {
    /// The post has a complete call-to-action block when at least a
    /// title and a link are present.
    pub fn has_cta(&self) -> bool {
        self.cta_title.as_deref().map_or(false, |t| !t.is_empty())
            && self.cta_link.as_deref().map_or(false, |l| !l.is_empty())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BlogList {
    pub success: bool,
    pub data: Vec<Blog>,
    pub pagination: Pagination,
}

/// `{success, data}` wrapper the backend puts around a single post.
#[derive(Clone, Debug, Deserialize)]
pub struct BlogEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Blog,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApiMessage {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Filters and pagination for the list endpoint.
///
/// Changing any filter snaps back to the first page, so a narrowed
/// search never lands on a page that no longer exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub category: Option<String>,
    pub published: Option<bool>,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            category: None,
            published: None,
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn search<S: Into<String>>(mut self, search: S) -> Self {
        self.search = non_empty(search.into());
        self.page = 1;
        self
    }

    pub fn category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = non_empty(category.into());
        self.page = 1;
        self
    }

    pub fn published(mut self, published: Option<bool>) -> Self {
        self.published = published;
        self.page = 1;
        self
    }

    /// Key/value pairs for the query string. Unset and empty filters
    /// are left out entirely, the backend treats a present-but-empty
    /// parameter as a filter for the empty string.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(ref search) = self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(ref category) = self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(published) = self.published {
            pairs.push(("isPublished", published.to_string()));
        }
        pairs
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_include;

    #[test]
    fn filters_reset_page() {
        let q = ListQuery::new().page(4).search("rust");
        assert_eq!(q.page, 1);
        let q = ListQuery::new().page(4).category("news");
        assert_eq!(q.page, 1);
        let q = ListQuery::new().page(4).published(Some(true));
        assert_eq!(q.page, 1);
        // Paging after filtering keeps the filter.
        let q = ListQuery::new().search("rust").page(3);
        assert_eq!(q.page, 3);
        assert_eq!(q.search.as_deref(), Some("rust"));
    }

    #[test]
    fn empty_filters_are_omitted() {
        let q = ListQuery::new().search("").category("   ");
        let pairs = q.to_pairs();
        assert_eq!(
            pairs,
            vec![("page", "1".to_owned()), ("limit", "12".to_owned())]
        );

        let q = ListQuery::new().search("ferris").published(Some(false));
        let pairs = q.to_pairs();
        assert!(pairs.contains(&("search", "ferris".to_owned())));
        assert!(pairs.contains(&("isPublished", "false".to_owned())));
    }

    #[test]
    fn blog_wire_format() {
        let json = serde_json::json!({
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
        });
        let blog: Blog = serde_json::from_value(json).unwrap();
        assert_eq!(blog.id, "64f0c2");
        assert_eq!(blog.meta_description, "greeting");
        assert!(blog.is_published);
        assert!(!blog.has_cta());
        assert!(blog.seo_scripts.is_empty());

        // Unset options must not appear when serializing back.
        let back = serde_json::to_value(&blog).unwrap();
        assert_json_include!(
            actual: back.clone(),
            expected: serde_json::json!({ "_id": "64f0c2", "isPublished": true })
        );
        assert!(back.get("ctaTitle").is_none());
    }

    #[test]
    fn list_envelope() {
        let json = serde_json::json!({
            "success": true,
            "data": [],
            "pagination": { "page": 1, "limit": 12, "total": 0, "totalPages": 0 }
        });
        let list: BlogList = serde_json::from_value(json).unwrap();
        assert!(list.success);
        assert_eq!(list.pagination.total_pages, 0);
        assert!(list.data.is_empty());
    }
}
