//! Courier - Main Entry Point
//!
//! Command line front end over the collection repository and the request
//! executor. Log verbosity is controlled through `RUST_LOG`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use courier_application::ports::CollectionRepository;
use courier_domain::{RequestSpec, ResponseSpec, to_document};
use courier_infrastructure::{
    FileSystemCollectionRepository, TokioFileSystem, execute_request, serialize_request_document,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "courier", version, about = "Run OpenCollection HTTP requests")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the requests of a collection in listing order
    List {
        /// Collection directory (contains opencollection.yml)
        dir: PathBuf,
    },
    /// Print a request document in normalized form
    Show {
        /// Request document
        file: PathBuf,
    },
    /// Execute a request and print the response
    Run {
        /// Request document
        file: PathBuf,
        /// Override the document's timeout, in milliseconds
        #[arg(long)]
        timeout: Option<i64>,
        /// Do not follow redirects
        #[arg(long)]
        no_follow: bool,
        /// Print response headers
        #[arg(short = 'i', long)]
        include_headers: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let repository = FileSystemCollectionRepository::new(TokioFileSystem::new());

    match cli.command {
        Command::List { dir } => list(&repository, &dir).await,
        Command::Show { file } => show(&repository, &file).await,
        Command::Run {
            file,
            timeout,
            no_follow,
            include_headers,
        } => {
            let mut request = repository
                .load_request(&file)
                .await
                .with_context(|| format!("failed to load {}", file.display()))?;
            if let Some(timeout) = timeout {
                request.settings.timeout_ms = timeout;
            }
            if no_follow {
                request.settings.follow_redirects = false;
            }
            run(&request, include_headers).await
        }
    }
}

async fn list<R: CollectionRepository>(repository: &R, dir: &Path) -> anyhow::Result<()> {
    let tree = repository
        .load_collection(dir)
        .await
        .with_context(|| format!("failed to load collection {}", dir.display()))?;

    println!("{} (version {})", tree.root.name, tree.root.version);
    for request in &tree.requests {
        println!(
            "{:>4}  {:<7} {:<32} {}",
            request.seq,
            request.method,
            request.name,
            request.url
        );
    }
    Ok(())
}

async fn show<R: CollectionRepository>(repository: &R, file: &Path) -> anyhow::Result<()> {
    let request = repository
        .load_request(file)
        .await
        .with_context(|| format!("failed to load {}", file.display()))?;
    let yaml = serialize_request_document(&to_document(&request))?;
    print!("{yaml}");
    Ok(())
}

async fn run(request: &RequestSpec, include_headers: bool) -> anyhow::Result<()> {
    tracing::info!(name = %request.name, "running request");
    let response = execute_request(request)
        .await
        .with_context(|| format!("request '{}' failed", request.name))?;
    print_response(&response, include_headers);
    Ok(())
}

fn print_response(response: &ResponseSpec, include_headers: bool) {
    println!(
        "{} {} ({} ms, {} bytes)",
        response.status,
        response.status_text,
        response.duration_ms(),
        response.size()
    );
    if include_headers {
        for (name, value) in &response.headers {
            println!("{name}: {value}");
        }
    }
    println!();
    println!("{}", response.body);
}
