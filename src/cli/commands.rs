use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "legal-clause-researcher")]
#[command(author, version, about = "Run the legal clause tool outside a plugin host", long_about = None)]
pub struct Cli {
    /// Settings file to load instead of config/{CONFIG_ENV}
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate credentials taken from LEGAL_API_KEY / LEGAL_API_ENDPOINT
    Validate,

    /// Identify legal clauses in a piece of text
    Analyze {
        /// Text to analyze
        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Clause type to look for (repeatable)
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,
    },

    /// List the tools this plugin provides
    Tools,
}
