//! Document head metadata for each view

use crate::cms;
use crate::config::SiteConfig;
use crate::content::Post;
use crate::error::Result;
use crate::helpers::full_url_for;
use crate::image::ImageUrlBuilder;
use crate::Blog;

/// Title used when the requested post does not exist
pub const NOT_FOUND_TITLE: &str = "Post Not Found";

/// Title, description and keywords for the document head
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMetadata {
    pub title: String,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
    /// Open Graph image
    pub image: Option<String>,
    /// Absolute canonical URL of the page
    pub url: Option<String>,
}

impl PageMetadata {
    pub fn not_found() -> Self {
        Self {
            title: NOT_FOUND_TITLE.to_string(),
            ..Default::default()
        }
    }
}

/// Metadata for the index view
pub fn index_metadata(config: &SiteConfig) -> PageMetadata {
    PageMetadata {
        title: config.title.clone(),
        description: non_blank(Some(config.description.as_str())),
        keywords: None,
        image: None,
        url: Some(full_url_for(config, "/")),
    }
}

/// Metadata for a detail view.
///
/// SEO overrides win; otherwise the title comes from the post and the
/// description from the excerpt. Blank strings count as absent.
pub fn post_metadata(post: Option<&Post>, images: &ImageUrlBuilder, image_width: u32) -> PageMetadata {
    let Some(post) = post.filter(|p| p.is_displayable()) else {
        return PageMetadata::not_found();
    };
    let seo = post.seo.as_ref();

    let title = non_blank(seo.and_then(|s| s.meta_title.as_deref()))
        .or_else(|| non_blank(Some(post.title.as_str())))
        .unwrap_or_else(|| NOT_FOUND_TITLE.to_string());

    let description = non_blank(seo.and_then(|s| s.meta_description.as_deref()))
        .or_else(|| non_blank(post.excerpt.as_deref()));

    let keywords = seo
        .and_then(|s| s.keywords.as_ref())
        .map(|k| {
            k.iter()
                .map(|w| w.trim())
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|k| !k.is_empty());

    let image = post
        .main_image
        .as_ref()
        .and_then(|img| images.fit_width(img, image_width))
        .map(|d| d.url);

    PageMetadata {
        title,
        description,
        keywords,
        image,
        url: None,
    }
}

/// Fetch the post for `slug` and derive its metadata.
///
/// Runs its own query (normally answered from the query cache) so it can be
/// used without assembling the page.
pub async fn assemble(blog: &Blog, slug: &str) -> Result<PageMetadata> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Ok(PageMetadata::not_found());
    }
    let query = super::detail::post_query(slug);
    let post: Option<Post> = cms::fetch_one(blog.source(), &query, blog.revalidate()).await?;
    Ok(post_metadata(
        post.as_ref(),
        blog.renderer().images(),
        blog.config.main_image_width,
    ))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
