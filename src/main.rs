use anyhow::{Context, Result};
use clap::Parser;
use legal_clause_researcher::cli::{Cli, Commands};
use legal_clause_researcher::tools::legal_clause::TOOL_NAME;
use legal_clause_researcher::tools::MESSAGE_BUFFER;
use legal_clause_researcher::{utils, LegalClauseResearcherProvider, Settings};
use serde_json::json;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::new(),
    }
    .context("Failed to load settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let provider = LegalClauseResearcherProvider::from_settings(&settings)?;

    match cli.command {
        Commands::Validate => handle_validate(&provider),
        Commands::Analyze {
            text,
            file,
            keywords,
        } => handle_analyze(&provider, text, file, keywords).await,
        Commands::Tools => handle_tools(&provider),
    }
}

fn handle_validate(provider: &LegalClauseResearcherProvider) -> Result<()> {
    let credentials = Settings::credentials_from_env();

    provider.validate_credentials(&credentials)?;
    utils::print_success("Credentials are valid");
    Ok(())
}

async fn handle_analyze(
    provider: &LegalClauseResearcherProvider,
    text: Option<String>,
    file: Option<PathBuf>,
    keywords: Vec<String>,
) -> Result<()> {
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => String::new(),
    };

    let params = json!({ "text": text, "keywords": keywords });
    let credentials = Settings::credentials_from_env();

    let (tx, mut rx) = mpsc::channel(MESSAGE_BUFFER);
    let invocation = provider.invoke_streaming(TOOL_NAME, params, &credentials, tx);
    let printer = async {
        while let Some(message) = rx.recv().await {
            utils::print_message(&message);
        }
    };

    let (result, ()) = tokio::join!(invocation, printer);
    result?;
    Ok(())
}

fn handle_tools(provider: &LegalClauseResearcherProvider) -> Result<()> {
    utils::print_header("Available tools");
    println!("{}", provider.tools().tools_description());
    Ok(())
}
