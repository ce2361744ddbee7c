//! List the posts shown on the index

use anyhow::Result;

use crate::pages::IndexView;
use crate::Blog;

/// Print the index entries, newest first
pub async fn run(blog: &Blog) -> Result<()> {
    match blog.index().await? {
        IndexView::Empty => println!("No posts published yet."),
        IndexView::Posts(posts) => {
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.published_at.format("%Y-%m-%d"),
                    post.title,
                    post.path
                );
            }
        }
    }

    Ok(())
}
