//! the args for running yoloc

use clap::{value_parser, ArgAction};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Translates yolo programs into C")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// The yolo source file to compile
    #[clap(value_name = "source file", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,
    /// Where to write the generated C
    #[clap(short = 'o', long, default_value = "out.c", value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,
    /// Record the parse and write it as a graphviz dot file
    #[clap(long, value_name = "dot file")]
    pub graph: Option<PathBuf>,
    /// Print the token stream instead of compiling
    #[clap(long, conflicts_with = "graph")]
    pub tokens: bool,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }
}

/// Sets the logging level with `-v[v]` or `-q[q]`
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct LoggingArgs {
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// Gets the logging level, `INFO` when neither flag is given
    pub fn log_level_filter(&self) -> LevelFilter {
        match self.verbose as i8 - self.quiet as i8 {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            2..=i8::MAX => LevelFilter::TRACE,
        }
    }
}
