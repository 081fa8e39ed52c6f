//! CLI argument definitions using clap derive

use clap::Parser;

use crate::cli::commands::look_back::LookBackArgs;

#[derive(Parser)]
#[command(name = "look-back")]
#[command(author, version, about = "Look back at your BoardGameGeek video reviews")]
#[command(long_about = "Finds the video reviews a BoardGameGeek user posted in the same month or week 1, 5 and 10 years ago, \
adds the user's current collection rating and comment for each game, and writes one CSV report per period.")]
pub struct Cli {
    #[command(flatten)]
    pub args: LookBackArgs,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// Suppress progress output and the summary table
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

impl GlobalOpts {
    /// Default log filter for these flags (RUST_LOG takes precedence)
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
