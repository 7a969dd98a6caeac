use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    credentials::ask_github_credentials, BlogClient, CommentForm, PostForm, DEFAULT_COMMENTS_URL,
    DEFAULT_POSTS_URL,
};
use shared::domain::PostId;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "blog", about = "Talk to the blog posts and comments services")]
struct Cli {
    #[arg(long, default_value = DEFAULT_POSTS_URL)]
    posts_url: String,
    #[arg(long, default_value = DEFAULT_COMMENTS_URL)]
    comments_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a post.
    Post { title: String },
    /// Comment on a post.
    Comment { post_id: String, content: String },
    /// List all posts.
    List,
    /// Ask for GitHub credentials on the terminal.
    Login,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()))
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Post { title } => {
            let client = BlogClient::new(&cli.posts_url, &cli.comments_url)?;
            let mut form = PostForm::new();
            form.set_title(title);
            let post = form.submit(&client).await.context("failed to create post")?;
            println!("created post id={} title={:?}", post.id, post.title);
        }
        Command::Comment { post_id, content } => {
            let client = BlogClient::new(&cli.posts_url, &cli.comments_url)?;
            let mut form = CommentForm::new(PostId(post_id));
            form.set_content(content);
            form.submit(&client)
                .await
                .context("failed to create comment")?;
            println!("comment added to post {}", form.post_id());
        }
        Command::List => {
            let client = BlogClient::new(&cli.posts_url, &cli.comments_url)?;
            let listing = client.list_posts().await.context("failed to list posts")?;
            if listing.is_empty() {
                println!("no posts yet");
            }
            for post in listing.iter() {
                println!("{}\t{}", post.id, post.title);
            }
        }
        Command::Login => {
            let credentials = tokio::task::spawn_blocking(ask_github_credentials)
                .await
                .context("credential prompt panicked")??;
            info!(username = %credentials.username, "credentials collected");
            println!("credentials collected for {}", credentials.username);
        }
    }

    Ok(())
}
