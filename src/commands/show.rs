//! Render one post to stdout

use anyhow::Result;

use crate::pages::PostView;
use crate::templates;
use crate::Blog;

/// Print the full HTML page for `slug`
pub async fn run(blog: &Blog, slug: &str) -> Result<()> {
    let meta = blog.post_metadata(slug).await?;
    match blog.post(slug).await? {
        PostView::Found(page) => {
            println!("{}", templates::post_page(&blog.config, &meta, &page).into_string());
            Ok(())
        }
        PostView::NotFound => anyhow::bail!("No published post with slug {:?}", slug),
    }
}
