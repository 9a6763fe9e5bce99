//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use safecalc::config::Config;

#[derive(Debug, Parser)]
#[command(name = "safecalc", version, about = "Evaluate arithmetic expressions safely")]
pub struct Args {
    /// Configuration file (defaults to the user config directory).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum expression length, in characters.
    #[arg(long, global = true, value_name = "N")]
    pub max_length: Option<usize>,

    /// Maximum nesting depth of parentheses.
    #[arg(long, global = true, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Group results with thousand separators.
    #[arg(long, global = true)]
    pub group_thousands: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate expressions and print their results.
    Eval {
        /// Expressions to evaluate. Quote them to keep the shell away from `*` and `(`.
        #[arg(required = true, allow_hyphen_values = true)]
        expressions: Vec<String>,

        /// Print one JSON object per expression.
        #[arg(long)]
        json: bool,
    },
    /// Read expressions from stdin, one per line, keeping the last result.
    Repl,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(max_length) = self.max_length {
            config.limits.max_length = max_length;
        }
        if let Some(max_depth) = self.max_depth {
            config.limits.max_depth = max_depth;
        }
        if self.group_thousands {
            config.display.group_thousands = true;
        }
        config
    }
}
