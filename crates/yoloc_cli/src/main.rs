use crate::args::Args;
use clap::Parser;
use eyre::WrapErr;
use owo_colors::{OwoColorize, Stream};
use std::io;
use std::io::{stderr, stdout, Stderr, StderrLock, Stdout, StdoutLock, Write};
use std::process::ExitCode;
use tracing::metadata::LevelFilter;
use tracing::{debug, trace, Level, Metadata};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;
use yolo_tokens::spanned::Spanned;
use yoloc::lexer::Lexer;
use yoloc::{Yoloc, YolocError, YolocResult};

mod args;

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.logging().log_level_filter())?;
    trace!("starting yoloc with args: {args:?}");
    debug!("yoloc version: {}", env!("CARGO_PKG_VERSION"));

    let source = std::fs::read_to_string(&args.file)
        .wrap_err_with(|| format!("could not read {:?}", args.file))?;

    let result = if args.tokens {
        print_tokens(&source)
    } else {
        let mut builder = Yoloc::builder().output(&args.output);
        if let Some(graph) = &args.graph {
            builder = builder.graph(graph);
        }
        let yoloc = builder.build()?;
        compile(&yoloc, &source)
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            report(&error, &source);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn compile(yoloc: &Yoloc, source: &str) -> YolocResult<()> {
    let compilation = yoloc.compile_str(source)?;
    yoloc.persist(&compilation)
}

/// Prints every token of the source with where it was found
fn print_tokens(source: &str) -> YolocResult<()> {
    let mut stdout = stdout().lock();
    for token in Lexer::new(source) {
        let token = token?;
        writeln!(
            stdout,
            "{:>8} {:<10} {:?}",
            token.span().to_string(),
            token.kind().to_string(),
            token.text()
        )?;
    }
    Ok(())
}

fn report(error: &YolocError, source: &str) {
    eprintln!(
        "{}: {}",
        "error".if_supports_color(Stream::Stderr, |text| text.bright_red()),
        error.render(source)
    );
}

struct StdioWriter {
    stdout: Stdout,
    stderr: Stderr,
}

enum StdioLock<'a> {
    Stdout(StdoutLock<'a>),
    Stderr(StderrLock<'a>),
}

impl<'a> io::Write for StdioLock<'a> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write(buf),
            StdioLock::Stderr(stderr) => stderr.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.flush(),
            StdioLock::Stderr(stderr) => stderr.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for StdioWriter {
    type Writer = StdioLock<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        StdioLock::Stdout(self.stdout.lock())
    }

    /// warnings and errors go to stderr
    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        if meta.level() <= &Level::WARN {
            StdioLock::Stderr(self.stderr.lock())
        } else {
            StdioLock::Stdout(self.stdout.lock())
        }
    }
}

fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(StdioWriter {
                    stdout: stdout(),
                    stderr: stderr(),
                })
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}
