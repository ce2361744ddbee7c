//! Post detail assembler

use maud::Markup;

use crate::cms::{self, GroqQuery};
use crate::config::SiteConfig;
use crate::content::{ImageRef, Post};
use crate::error::Result;
use crate::helpers::{date_xml, full_date};
use crate::image::DerivedImage;
use crate::render::PortableRenderer;
use crate::Blog;

/// Fields fetched for a detail page
pub const POST_PROJECTION: &str = r#"
  _id,
  title,
  "slug": slug.current,
  publishedAt,
  status,
  excerpt,
  body,
  "author": author->{_id, name, "slug": slug.current, image},
  "categories": categories[]->{_id, title},
  mainImage,
  tags,
  seo
"#;

/// Edge length of the square author avatar
pub const AVATAR_SIZE: u32 = 96;

/// The published post with the given slug, if any
pub fn post_query(slug: &str) -> GroqQuery {
    GroqQuery::documents("post")
        .eq("slug.current", "slug", slug)
        .eq("status", "status", "published")
        .first()
        .project(POST_PROJECTION)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorView {
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainImage {
    pub image: DerivedImage,
    pub alt: String,
    pub caption: Option<String>,
}

/// Everything the detail template needs
#[derive(Debug, Clone)]
pub struct PostPage {
    pub title: String,
    pub slug: String,
    pub published: Option<String>,
    pub published_iso: Option<String>,
    pub author: Option<AuthorView>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub main_image: Option<MainImage>,
    pub excerpt: Option<String>,
    pub body: Markup,
}

/// Outcome of the detail flow
#[derive(Debug, Clone)]
pub enum PostView {
    NotFound,
    Found(Box<PostPage>),
}

impl PostView {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn page(&self) -> Option<&PostPage> {
        match self {
            Self::NotFound => None,
            Self::Found(page) => Some(page),
        }
    }
}

/// Fetch the published post for `slug`.
///
/// Returns `None` when nothing matches or the match is not displayable.
pub async fn fetch_post(blog: &Blog, slug: &str) -> Result<Option<Post>> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Ok(None);
    }

    let post: Option<Post> =
        cms::fetch_one(blog.source(), &post_query(slug), blog.revalidate()).await?;
    let post = post.filter(|p| p.is_displayable() && p.slug.as_deref() == Some(slug));
    if post.is_none() {
        tracing::debug!(slug = %slug, "post not found");
    }
    Ok(post)
}

/// Map a fetched post to the detail view
pub fn build(post: Option<Post>, config: &SiteConfig, renderer: &PortableRenderer) -> PostView {
    let Some(post) = post.filter(Post::is_displayable) else {
        return PostView::NotFound;
    };

    let tz = config.tz();
    let images = renderer.images();

    let main_image = post
        .main_image
        .as_ref()
        .and_then(|img| main_image(img, config.main_image_width, renderer));

    let author = post
        .author
        .as_ref()
        .filter(|a| !a.name.trim().is_empty())
        .map(|a| AuthorView {
            name: a.name.clone(),
            avatar: a
                .image
                .as_ref()
                .and_then(|img| images.url(img, AVATAR_SIZE, Some(AVATAR_SIZE))),
        });

    let page = PostPage {
        title: post.title.clone(),
        slug: post.slug.clone().unwrap_or_default(),
        published: post.published_at.map(|d| full_date(&d, &tz)),
        published_iso: post.published_at.map(|d| date_xml(&d, &tz)),
        author,
        categories: post
            .categories
            .iter()
            .map(|c| c.title.clone())
            .filter(|t| !t.trim().is_empty())
            .collect(),
        tags: post.tag_list().into_iter().map(str::to_string).collect(),
        main_image,
        excerpt: post.excerpt.clone().filter(|e| !e.trim().is_empty()),
        body: renderer.render_body(&post.body),
    };

    PostView::Found(Box::new(page))
}

fn main_image(image: &ImageRef, width: u32, renderer: &PortableRenderer) -> Option<MainImage> {
    let derived = renderer.images().fit_width(image, width)?;
    Some(MainImage {
        image: derived,
        alt: image.alt.clone().unwrap_or_default(),
        caption: image.caption.clone().filter(|c| !c.trim().is_empty()),
    })
}

/// Fetch and assemble the detail view for `slug`
pub async fn assemble(blog: &Blog, slug: &str) -> Result<PostView> {
    let post = fetch_post(blog, slug).await?;
    Ok(build(post, &blog.config, blog.renderer()))
}
