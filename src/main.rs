//! CLI entry point for cms-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cms_blog::{Blog, SiteConfig};

#[derive(Parser)]
#[command(name = "cms-blog")]
#[command(author = "Yukang Chen")]
#[command(version)]
#[command(about = "A server-rendered blog front-end for a hosted headless CMS", long_about = None)]
struct Cli {
    /// Path to the site configuration file
    #[arg(short, long, global = true, default_value = "_config.yml")]
    config: PathBuf,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the blog server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List the posts shown on the index
    List,

    /// Print the rendered page for one post
    Show {
        /// Slug of the post
        slug: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "cms_blog=debug,info"
    } else {
        "cms_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Commands::Version = cli.command {
        println!("cms-blog version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = SiteConfig::resolve(&cli.config)?;
    let blog = Blog::new(config)?;

    match cli.command {
        Commands::Server { port, ip } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            cms_blog::server::start(blog, &ip, port).await?;
        }
        Commands::List => cms_blog::commands::list::run(&blog).await?,
        Commands::Show { slug } => cms_blog::commands::show::run(&blog, &slug).await?,
        Commands::Version => {}
    }

    Ok(())
}
