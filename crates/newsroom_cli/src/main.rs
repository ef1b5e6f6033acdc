//! `newsroom` command-line entry point.
//!
//! # Responsibility
//! - Wire one SQLite connection to the news and comment managers.
//! - Print the news listing with the comments of each item.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use newsroom_core::{
    init_logging, open_db, Comment, CommentManager, ContentEntity, News, NewsManager,
    StoreConfig, Timestamp,
};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "newsroom")]
#[command(about = "News and comment store")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// SQLite database file (overrides NEWSROOM_DB_PATH)
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error (overrides NEWSROOM_LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for log files (overrides NEWSROOM_LOG_DIR)
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print every news item followed by its comments
    List,
    /// Store a news item and print its id
    AddNews {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Store a comment for a news item and print its id
    AddComment {
        #[arg(long)]
        news_id: String,
        #[arg(long)]
        body: String,
    },
    /// Delete a news item and all of its comments
    DeleteNews { id: String },
    /// Delete one comment
    DeleteComment { id: String },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = resolve_config(&cli);

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let news = NewsManager::try_new(&conn)?;
    let comments = CommentManager::try_new(&conn)?;
    let mut out = io::stdout().lock();

    match cli.command.unwrap_or(Command::List) {
        Command::List => print_listing(&mut out, &news.list_news()?, &comments.list_comments()?)?,
        Command::AddNews { title, body } => {
            let id = news.add_news(&News::new(title, body, Timestamp::now()))?;
            writeln!(out, "{id}")?;
        }
        Command::AddComment { news_id, body } => {
            let id = comments.add_comment_for_news(&Comment::new(news_id, body, Timestamp::now()))?;
            writeln!(out, "{id}")?;
        }
        Command::DeleteNews { id } => {
            let removed = news.delete_news(&id)?;
            writeln!(out, "{removed}")?;
        }
        Command::DeleteComment { id } => {
            let removed = comments.delete_comment(&id)?;
            writeln!(out, "{removed}")?;
        }
    }

    info!("event=cli_done module=cli status=ok");
    Ok(())
}

fn resolve_config(cli: &Cli) -> StoreConfig {
    let mut config = StoreConfig::from_env();
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    config
}

fn print_listing(out: &mut impl Write, news: &[News], comments: &[Comment]) -> io::Result<()> {
    for item in news {
        writeln!(out, "############ NEWS {} ############", item.title())?;
        writeln!(out, "{}", item.body())?;
        for comment in comments.iter().filter(|c| c.belongs_to(item.id())) {
            writeln!(out, "Comment {} : {}", comment.id(), comment.body())?;
        }
    }
    Ok(())
}
