mod app_state;
mod tui;
mod ui;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use docchat_models::FileCandidate;
use docchat_sdk::{AppShell, ClientConfig, DocChatClient, GREETING};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::app_state::AppController;
use crate::tui::EventHandler;
use crate::ui::chat::DocChatApp;

#[derive(Parser, Debug)]
#[command(name = "docchat")]
#[command(about = "Upload PDFs and chat with them")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides DOCCHAT_API_URL, default http://localhost:8000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload PDF files, one after the other (other files are skipped)
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Ask a single question
    Ask { message: String },
    /// Interactive line-mode chat
    Chat,
    /// Check that the backend is reachable
    Status,
    /// Full-screen terminal UI
    Tui,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Commands::Tui) {
        init_file_logging()?;
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }

    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url);
    }
    let client = DocChatClient::new(&config)?;
    debug!(api_url = client.base_url(), "client ready");

    match cli.command {
        Commands::Upload { paths } => upload(&client, &paths).await,
        Commands::Ask { message } => ask(&client, &message).await,
        Commands::Chat => chat_repl(&client).await,
        Commands::Status => status(&client).await,
        Commands::Tui => run_tui(client).await,
    }
}

/// Logs go to `<cache dir>/docchat/docchat.log` while the TUI owns the screen.
fn init_file_logging() -> anyhow::Result<()> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("docchat");
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join("docchat.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    Ok(())
}

/// Read the PDFs among `paths`; anything else is skipped unopened.
fn pdf_candidates(paths: &[PathBuf]) -> anyhow::Result<Vec<FileCandidate>> {
    let mut candidates = Vec::new();
    for path in paths {
        match FileCandidate::pdf_from_path(path)
            .with_context(|| format!("reading {}", path.display()))?
        {
            Some(candidate) => candidates.push(candidate),
            None => debug!(path = %path.display(), "skipping non-PDF"),
        }
    }
    Ok(candidates)
}

async fn upload(client: &DocChatClient, paths: &[PathBuf]) -> anyhow::Result<()> {
    let candidates = pdf_candidates(paths)?;

    let mut shell = AppShell::new();
    let alert = shell.submit_files(client, candidates).await;

    for file in shell.files() {
        println!("✓ {} ({})", file.name, file.size_kb());
    }
    if let Some(alert) = alert {
        bail!(alert.message);
    }
    if shell.files().is_empty() {
        println!("No PDF among the given files, nothing uploaded.");
    }
    Ok(())
}

async fn ask(client: &DocChatClient, message: &str) -> anyhow::Result<()> {
    let mut shell = AppShell::new();
    match shell.send_chat(client, message).await {
        Some(reply) => println!("{reply}"),
        None => bail!("message is empty"),
    }
    Ok(())
}

async fn chat_repl(client: &DocChatClient) -> anyhow::Result<()> {
    let mut shell = AppShell::new();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Assistant: {GREETING}");
    println!("(Type 'exit' to quit)");

    loop {
        stdout.write_all(b"You: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let text = line.trim();
        if text.eq_ignore_ascii_case("exit") || text.eq_ignore_ascii_case("quit") {
            break;
        }
        if let Some(reply) = shell.send_chat(client, text).await {
            println!("Assistant: {reply}");
        }
    }
    Ok(())
}

async fn status(client: &DocChatClient) -> anyhow::Result<()> {
    let health = client
        .health()
        .await
        .with_context(|| format!("backend at {} is not reachable", client.base_url()))?;
    println!("{}: {}", client.base_url(), health.message);
    Ok(())
}

async fn run_tui(client: DocChatClient) -> anyhow::Result<()> {
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(120);
    let mut app = DocChatApp::new(client, events.sender());

    let result = async {
        while !app.should_quit() {
            terminal.draw(|f| app.render(f))?;
            match events.next().await {
                Some(action) => app.update(action),
                None => break,
            }
        }
        anyhow::Ok(())
    }
    .await;

    tui::restore()?;
    result
}
