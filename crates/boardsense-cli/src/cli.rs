use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "boardsense")]
#[command(
    author,
    version,
    about = "Classify tic-tac-toe boards with pre-trained models"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (ignored when absent)
    #[arg(long, global = true, default_value = "boardsense.yaml")]
    pub config: PathBuf,

    /// Directory holding the exported model artifacts
    #[arg(long, global = true, env = "BOARDSENSE_MODELS_DIR")]
    pub models_dir: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the model aliases that have an artifact on disk
    Info,

    /// Classify one board with one model
    Predict {
        /// Model alias: mlp, random_forest, knn or decision_tree
        alias: Option<String>,

        /// Nine comma-separated cells, e.g. x,o,b,x,o,b,x,b,b
        #[arg(allow_hyphen_values = true)]
        board: Option<String>,
    },
}
