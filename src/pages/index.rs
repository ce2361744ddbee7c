//! Index page assembler

use chrono::{DateTime, Utc};

use crate::cms::{self, GroqQuery};
use crate::config::SiteConfig;
use crate::content::Post;
use crate::error::Result;
use crate::helpers::{date_xml, full_date, post_path};
use crate::Blog;

/// Fields fetched for each index entry
pub const SUMMARY_PROJECTION: &str = r#"
  _id,
  title,
  "slug": slug.current,
  publishedAt,
  status,
  excerpt,
  "author": author->{_id, name},
  "categories": categories[]->{_id, title}
"#;

/// Published posts with a slug and a date, newest first
pub fn index_query(limit: usize) -> GroqQuery {
    GroqQuery::documents("post")
        .defined("slug.current")
        .defined("publishedAt")
        .eq("status", "status", "published")
        .order_desc("publishedAt")
        .limit(limit)
        .project(SUMMARY_PROJECTION)
}

/// One entry of the index
#[derive(Debug, Clone, PartialEq)]
pub struct PostSummary {
    pub title: String,
    pub slug: String,
    pub path: String,
    pub published_at: DateTime<Utc>,
    /// Human-readable publication date
    pub published: String,
    /// ISO 8601 publication date for `<time datetime>`
    pub published_iso: String,
    pub author_name: Option<String>,
    pub categories: Vec<String>,
    pub excerpt: Option<String>,
}

/// Outcome of the index flow
#[derive(Debug, Clone, PartialEq)]
pub enum IndexView {
    /// The query succeeded but there is nothing to show
    Empty,
    Posts(Vec<PostSummary>),
}

impl IndexView {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn posts(&self) -> &[PostSummary] {
        match self {
            Self::Empty => &[],
            Self::Posts(posts) => posts,
        }
    }
}

/// Map fetched posts to the index view.
///
/// Ineligible posts are dropped, and ordering and the limit are applied
/// again so the view holds regardless of what the backend returned.
pub fn build(posts: Vec<Post>, config: &SiteConfig) -> IndexView {
    let tz = config.tz();
    let mut posts: Vec<Post> = posts.into_iter().filter(Post::is_listable).collect();
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    posts.truncate(config.posts_per_page);

    let summaries: Vec<PostSummary> = posts
        .into_iter()
        .filter_map(|post| {
            let slug = post.slug?;
            let published_at = post.published_at?;
            Some(PostSummary {
                path: post_path(config, &slug),
                published: full_date(&published_at, &tz),
                published_iso: date_xml(&published_at, &tz),
                title: post.title,
                slug,
                published_at,
                author_name: post
                    .author
                    .map(|a| a.name)
                    .filter(|n| !n.trim().is_empty()),
                categories: post
                    .categories
                    .into_iter()
                    .map(|c| c.title)
                    .filter(|t| !t.trim().is_empty())
                    .collect(),
                excerpt: post.excerpt.filter(|e| !e.trim().is_empty()),
            })
        })
        .collect();

    if summaries.is_empty() {
        IndexView::Empty
    } else {
        IndexView::Posts(summaries)
    }
}

/// Fetch and assemble the index view
pub async fn assemble(blog: &Blog) -> Result<IndexView> {
    let query = index_query(blog.config.posts_per_page);
    let posts: Vec<Post> = cms::fetch_list(blog.source(), &query, blog.revalidate()).await?;
    tracing::debug!(fetched = posts.len(), "index posts fetched");
    Ok(build(posts, &blog.config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(slug: &str, date: &str, status: &str) -> Post {
        serde_json::from_value(json!({
            "_id": slug,
            "title": format!("Title {slug}"),
            "slug": slug,
            "publishedAt": date,
            "status": status,
            "author": {"_id": "a1", "name": "Ada"},
            "categories": [{"_id": "c1", "title": "Rust"}, {"_id": "c2", "title": ""}]
        }))
        .unwrap()
    }

    #[test]
    fn test_index_query_text() {
        let groq = index_query(12).to_groq();
        assert!(groq.starts_with(
            r#"*[_type == "post" && defined(slug.current) && defined(publishedAt) && status == $status] | order(publishedAt desc) [0...12] {"#
        ));
        assert!(groq.contains(r#""author": author->{_id, name}"#));
    }

    #[test]
    fn test_build_empty() {
        assert_eq!(build(vec![], &SiteConfig::default()), IndexView::Empty);
    }

    #[test]
    fn test_build_only_ineligible_is_empty() {
        let posts = vec![
            post("a", "2024-01-01", "draft"),
            post("b", "2024-01-02", "archived"),
        ];
        assert!(build(posts, &SiteConfig::default()).is_empty());
    }

    #[test]
    fn test_build_sorts_and_truncates() {
        let posts: Vec<Post> = (1..=20)
            .map(|day| post(&format!("p{day}"), &format!("2024-01-{day:02}"), "published"))
            .collect();
        let view = build(posts, &SiteConfig::default());
        let entries = view.posts();
        assert_eq!(entries.len(), 12);
        assert_eq!(entries[0].slug, "p20");
        assert_eq!(entries[11].slug, "p9");
        assert!(entries
            .windows(2)
            .all(|w| w[0].published_at > w[1].published_at));
    }

    #[test]
    fn test_summary_fields() {
        let view = build(vec![post("hello", "2024-01-01", "published")], &SiteConfig::default());
        let entry = &view.posts()[0];
        assert_eq!(entry.title, "Title hello");
        assert_eq!(entry.path, "/posts/hello");
        assert_eq!(entry.published, "January 1, 2024");
        assert_eq!(entry.author_name.as_deref(), Some("Ada"));
        assert_eq!(entry.categories, vec!["Rust".to_string()]);
        assert!(entry.excerpt.is_none());
    }
}
