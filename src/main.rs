use std::sync::Arc;

use newsdesk::{
    AppContext, Config,
    error::AppError,
    models::Article,
    news::NewsApiClient,
    presenters::{HomePresenter, LoadState, LogNotifier},
    services::BookmarkStore,
    storage::FileStore,
    telemetry::init_telemetry,
};

const USAGE: &str = "usage: newsdesk <headlines [country] | search <query> | bookmarks | bookmark <url> | remove <url>>";

#[derive(Debug)]
enum Command {
    Headlines(Option<String>),
    Search(String),
    Bookmarks,
    Bookmark(String),
    Remove(String),
}

impl Command {
    fn parse(args: &[String]) -> Result<Self, AppError> {
        let mut args = args.iter().map(String::as_str);
        let command = match (args.next(), args.next()) {
            (Some("headlines") | None, country) => Command::Headlines(country.map(str::to_string)),
            (Some("search"), Some(query)) => {
                let rest: Vec<&str> = args.collect();
                let query = std::iter::once(query).chain(rest).collect::<Vec<_>>().join(" ");
                return Ok(Command::Search(query));
            }
            (Some("bookmarks"), None) => Command::Bookmarks,
            (Some("bookmark"), Some(url)) => Command::Bookmark(url.to_string()),
            (Some("remove"), Some(url)) => Command::Remove(url.to_string()),
            _ => return Err(AppError::Config(USAGE.to_string())),
        };

        if args.next().is_some() {
            return Err(AppError::Config(USAGE.to_string()));
        }
        Ok(command)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let telemetry_guard = init_telemetry(&config)?;

    tracing::info!(
        environment = %config.environment,
        data_dir = %config.data_dir.display(),
        ?command,
        "Starting newsdesk"
    );

    let country = match &command {
        Command::Headlines(Some(country)) => country.clone(),
        _ => config.news_default_country.clone(),
    };

    let store = BookmarkStore::new(
        Arc::new(FileStore::new(config.data_dir.clone())),
        config.bookmarks_key.clone(),
    );
    let news = NewsApiClient::new(&config)?;
    let context = AppContext::new(store, Arc::new(news), Arc::new(LogNotifier), country);

    let result = run(&context, command).await;

    telemetry_guard.shutdown();

    result
}

async fn run(context: &AppContext, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Headlines(_) => {
            let mut home = context.home();
            home.activate().await;
            print_feed(&home)
        }
        Command::Search(query) => {
            let mut home = context.home();
            home.search(&query).await;
            print_feed(&home)
        }
        Command::Bookmarks => {
            let mut screen = context.bookmarks_screen();
            screen.activate().await;

            if screen.is_empty() {
                println!("No Bookmarked Articles");
                println!("Articles you bookmark will appear here");
            }
            for article in screen.bookmarks() {
                print_article(article, true);
            }
            Ok(())
        }
        Command::Bookmark(url) => {
            let mut home = context.home();
            home.activate().await;
            if home.state() == LoadState::Failed {
                anyhow::bail!("could not load headlines");
            }

            if home.toggle_bookmark(&url).await? {
                println!("Bookmarked {}", url);
            } else {
                println!("Removed bookmark {}", url);
            }
            Ok(())
        }
        Command::Remove(url) => {
            let mut screen = context.bookmarks_screen();
            screen.activate().await;
            if screen.remove_bookmark(&url).await? {
                println!("Removed bookmark {} ({} left)", url, screen.bookmarks().len());
            } else {
                println!("{} is not bookmarked", url);
            }
            Ok(())
        }
    }
}

fn print_feed(home: &HomePresenter) -> anyhow::Result<()> {
    if home.state() == LoadState::Failed {
        anyhow::bail!("could not load news");
    }

    for (article, bookmarked) in home.items() {
        print_article(article, bookmarked);
    }
    Ok(())
}

fn print_article(article: &Article, bookmarked: bool) {
    let marker = if bookmarked { "*" } else { " " };
    println!("[{}] {}", marker, article.title);
    println!("    {} | {}", article.source.name, article.formatted_date());
    println!("    {}", article.url);
}
