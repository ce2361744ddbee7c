//! Page templates.
//!
//! Built with maud, so every dynamic value is escaped at compile time
//! unless explicitly wrapped in `PreEscaped` (only the rendered body and the
//! stylesheet are).

mod style;

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::config::SiteConfig;
use crate::helpers::url_for;
use crate::pages::{IndexView, PageMetadata, PostPage, PostSummary};

pub use style::PAGE_CSS;

/// Full HTML document around `body`
pub fn layout(config: &SiteConfig, meta: &PageMetadata, body: Markup) -> Markup {
    let title = if meta.title == config.title {
        meta.title.clone()
    } else {
        format!("{} | {}", meta.title, config.title)
    };

    html! {
        (DOCTYPE)
        html lang=(config.language) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                @if let Some(description) = &meta.description {
                    meta name="description" content=(description);
                    meta property="og:description" content=(description);
                }
                @if let Some(keywords) = &meta.keywords {
                    meta name="keywords" content=(keywords.join(", "));
                }
                meta property="og:title" content=(meta.title);
                @if let Some(url) = &meta.url {
                    link rel="canonical" href=(url);
                    meta property="og:url" content=(url);
                }
                meta property="og:site_name" content=(config.title);
                @if let Some(image) = &meta.image {
                    meta property="og:image" content=(image);
                    meta name="twitter:card" content="summary_large_image";
                }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                header class="site" {
                    a href=(url_for(config, "/")) { (config.title) }
                }
                main { (body) }
                footer class="site" {
                    p { (config.title) }
                }
            }
        }
    }
}

/// Index page: a list of summaries, or the empty state
pub fn index_page(config: &SiteConfig, meta: &PageMetadata, view: &IndexView) -> Markup {
    let body = match view {
        IndexView::Empty => html! {
            section class="empty-state" {
                h2 { "No posts yet" }
                p { "Nothing has been published here so far. Check back soon." }
            }
        },
        IndexView::Posts(posts) => html! {
            ul class="post-list" {
                @for post in posts {
                    (post_card(post))
                }
            }
        },
    };
    layout(config, meta, body)
}

fn post_card(post: &PostSummary) -> Markup {
    html! {
        li class="post-card" {
            h2 { a href=(post.path) { (post.title) } }
            div class="meta" {
                time datetime=(post.published_iso) { (post.published) }
                @if let Some(author) = &post.author_name {
                    span class="author" { (author) }
                }
                @if !post.categories.is_empty() {
                    span class="categories" {
                        @for category in &post.categories {
                            span class="category" { (category) }
                        }
                    }
                }
            }
            @if let Some(excerpt) = &post.excerpt {
                p class="excerpt" { (excerpt) }
            }
        }
    }
}

/// Detail page for a found post
pub fn post_page(config: &SiteConfig, meta: &PageMetadata, page: &PostPage) -> Markup {
    let body = html! {
        article class="post" {
            header class="post-header" {
                h1 { (page.title) }
                div class="meta" {
                    @if let (Some(published), Some(iso)) = (&page.published, &page.published_iso) {
                        time datetime=(iso) { (published) }
                    }
                    @if !page.categories.is_empty() {
                        span class="categories" {
                            @for category in &page.categories {
                                span class="category" { (category) }
                            }
                        }
                    }
                }
                @if let Some(author) = &page.author {
                    div class="author" {
                        @if let Some(avatar) = &author.avatar {
                            img class="avatar" src=(avatar) alt=(author.name) width="40" height="40";
                        }
                        span { (author.name) }
                    }
                }
            }
            @if let Some(main) = &page.main_image {
                figure class="main-image" {
                    img src=(main.image.url) alt=(main.alt)
                        width=(main.image.width) height=(main.image.height);
                    @if let Some(caption) = &main.caption {
                        figcaption { (caption) }
                    }
                }
            }
            div class="post-body" { (page.body) }
            @if !page.tags.is_empty() {
                footer class="post-footer" {
                    @for tag in &page.tags {
                        span class="tag" { "#" (tag) }
                    }
                }
            }
        }
    };
    layout(config, meta, body)
}

/// Page shown when no published post matches the requested slug
pub fn not_found_page(config: &SiteConfig, meta: &PageMetadata) -> Markup {
    let body = html! {
        section class="not-found" {
            h1 { "Post not found" }
            p { "The post you are looking for does not exist or is no longer available." }
            a href=(url_for(config, "/")) { "Back to all posts" }
        }
    };
    layout(config, meta, body)
}

/// Standalone error page, used when the backend cannot be reached
pub fn error_page(title: &str, message: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="robots" content="noindex";
                title { (title) }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                main class="error-page" {
                    h1 { (title) }
                    p { (message) }
                    a href="/" { "Back to home" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{AuthorView, PostSummary};
    use chrono::{TimeZone, Utc};

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.title = "My Blog".to_string();
        config
    }

    fn summary() -> PostSummary {
        PostSummary {
            title: "Hello <world>".to_string(),
            slug: "hello".to_string(),
            path: "/posts/hello".to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            published: "January 1, 2024".to_string(),
            published_iso: "2024-01-01T00:00:00+00:00".to_string(),
            author_name: Some("Ada".to_string()),
            categories: vec!["Rust".to_string()],
            excerpt: None,
        }
    }

    #[test]
    fn test_layout_head() {
        let meta = PageMetadata {
            title: "Post".to_string(),
            description: Some("Desc".to_string()),
            keywords: Some(vec!["a".to_string(), "b".to_string()]),
            image: None,
            url: Some("https://example.com/posts/post".to_string()),
        };
        let html = layout(&config(), &meta, html! {}).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Post | My Blog</title>"));
        assert!(html.contains(r#"<meta name="description" content="Desc">"#));
        assert!(html.contains(r#"<meta name="keywords" content="a, b">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://example.com/posts/post">"#));
        assert!(!html.contains("og:image"));
    }

    #[test]
    fn test_layout_omits_absent_description() {
        let html = layout(&config(), &PageMetadata::not_found(), html! {}).into_string();
        assert!(!html.contains(r#"name="description""#));
        assert!(!html.contains(r#"name="keywords""#));
    }

    #[test]
    fn test_index_page_lists_posts() {
        let view = IndexView::Posts(vec![summary()]);
        let meta = PageMetadata {
            title: "My Blog".to_string(),
            ..Default::default()
        };
        let html = index_page(&config(), &meta, &view).into_string();
        assert!(html.contains("<title>My Blog</title>"));
        assert!(html.contains(r#"<a href="/posts/hello">Hello &lt;world&gt;</a>"#));
        assert!(html.contains(r#"<time datetime="2024-01-01T00:00:00+00:00">January 1, 2024</time>"#));
        assert!(html.contains(r#"<span class="category">Rust</span>"#));
        assert!(!html.contains("empty-state"));
    }

    #[test]
    fn test_index_page_empty_state() {
        let html = index_page(&config(), &PageMetadata::default(), &IndexView::Empty).into_string();
        assert!(html.contains(r#"<section class="empty-state">"#));
        assert!(html.contains("No posts yet"));
        assert!(!html.contains("post-list"));
    }

    #[test]
    fn test_post_page() {
        let page = PostPage {
            title: "Hello".to_string(),
            slug: "hello".to_string(),
            published: Some("January 1, 2024".to_string()),
            published_iso: Some("2024-01-01T00:00:00+00:00".to_string()),
            author: Some(AuthorView {
                name: "Ada".to_string(),
                avatar: None,
            }),
            categories: vec![],
            tags: vec!["intro".to_string()],
            main_image: None,
            excerpt: None,
            body: PreEscaped("<p>Body</p>".to_string()),
        };
        let meta = PageMetadata {
            title: "Hello".to_string(),
            ..Default::default()
        };
        let html = post_page(&config(), &meta, &page).into_string();
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains(r#"<div class="post-body"><p>Body</p></div>"#));
        assert!(html.contains(r##"<span class="tag">#intro</span>"##));
        assert!(!html.contains("main-image"));
    }

    #[test]
    fn test_not_found_page() {
        let html = not_found_page(&config(), &PageMetadata::not_found()).into_string();
        assert!(html.contains("<title>Post Not Found | My Blog</title>"));
        assert!(html.contains(r#"<section class="not-found">"#));
    }
}
