//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Hierarchical price aggregator: products, containers of products, and containers of containers
#[derive(Parser, Debug)]
#[command(name = "pricetree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Directory holding a local .pricetree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the total price of one or more manifests
    Total {
        /// Manifest files
        #[arg(required = true, value_hint = ValueHint::FilePath)]
        files: Vec<PathBuf>,
    },

    /// Show a manifest as a tree
    Tree {
        /// Manifest file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List products in traversal order
    Leaves {
        /// Manifest file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show name, total, item count and depth of a manifest
    Info {
        /// Manifest file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Replay the boxes-of-products example
    Demo,

    /// Inspect settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print the global config file location
    Path,
}
