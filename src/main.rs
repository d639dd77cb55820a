use centauri::{Config, ContentStore, DirectoryStore, SearchEngine, Site, Ssg};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

type MainResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(name = "centauri")]
#[command(about = "Markdown blog builder and article search", long_about = None)]
struct Cli {
    /// Config file; `centauri.toml` is read when present otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory of markdown articles
    #[arg(long, global = true, env = "CENTAURI_CONTENT_DIR")]
    content_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `centauri=trace`; RUST_LOG wins when set
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render every static page into the output directory
    Build {
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        #[arg(long)]
        homepage_limit: Option<usize>,
    },
    /// Print matching article summaries as JSON
    Search { query: String },
    /// Answer one request target, e.g. `/articles/search?query=rust`
    Render {
        target: String,
        /// Print status and headers before the body
        #[arg(short = 'i', long)]
        include_headers: bool,
    },
}

/// A bare word must be a level name; anything with `=` or `,` is parsed as
/// a full filter directive.
fn log_filter(level: &str) -> MainResult<EnvFilter> {
    if !level.contains(['=', ',']) {
        level.trim().parse::<LevelFilter>()?;
    }
    Ok(EnvFilter::try_new(level)?)
}

fn init_tracing(level: &str) -> MainResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => log_filter(level)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> MainResult<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(content_dir) = cli.content_dir {
        config.content_dir = content_dir;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }
    init_tracing(&config.log_level)?;

    let store = DirectoryStore::open(&config.content_dir)?;

    match cli.command {
        Commands::Build {
            output_dir,
            homepage_limit,
        } => {
            if let Some(output_dir) = output_dir {
                config.output_dir = output_dir;
            }
            if let Some(limit) = homepage_limit {
                config.homepage_limit = limit;
            }
            let site = Site::new(&config, Box::new(store))?;
            let written = Ssg::new(config.output_dir.clone()).process(&site)?;
            info!("Built {} files", written.len());
        }
        Commands::Search { query } => {
            let engine = SearchEngine::new(config.search.empty_query);
            let hits: Vec<_> = engine
                .search(store.fetch_all(), &query)
                .into_iter()
                .map(|article| article.summary())
                .collect();
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        Commands::Render {
            target,
            include_headers,
        } => {
            let site = Site::new(&config, Box::new(store))?;
            let response = site.respond(&target);
            if include_headers {
                println!("{}", response.status);
                println!("Content-Type: {}", response.content_type);
                if let Some(location) = &response.location {
                    println!("Location: {location}");
                }
                println!();
            }
            println!("{}", response.body);
            if response.status >= 400 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
