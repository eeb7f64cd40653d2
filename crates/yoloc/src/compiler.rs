//! Responsible with compiling yolo files into C files

use crate::emitter::Emitter;
use crate::error::YolocResult;
use crate::lexer::Lexer;
use crate::parser::{Declarations, Parser};
use crate::visualizer::ParseGraph;
use itertools::Itertools;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info_span};

/// Responsible with compiling yolo files into C files.
///
/// Must be configured using a [YolocBuilder].
#[derive(Debug)]
pub struct Yoloc {
    output: PathBuf,
    graph: Option<PathBuf>,
}

impl Yoloc {
    /// Creates the default YolocBuilder
    #[inline]
    pub fn builder() -> YolocBuilder {
        YolocBuilder::new()
    }

    /// Where compiled C is written
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Where the parse graph is written, if one is being recorded
    pub fn graph(&self) -> Option<&Path> {
        self.graph.as_deref()
    }

    /// Compiles source text in memory. Nothing is written.
    pub fn compile_str(&self, source: &str) -> YolocResult<Compilation> {
        let mut emitter = Emitter::new(&self.output);
        let lexer = Lexer::new(source);
        let (declarations, graph) = if self.graph.is_some() {
            let mut graph = ParseGraph::new();
            let declarations = Parser::with_observer(lexer, &mut emitter, &mut graph)?.program()?;
            (declarations, Some(graph))
        } else {
            (Parser::new(lexer, &mut emitter)?.program()?, None)
        };
        debug!(
            "declared variables [{}] and labels [{}]",
            declarations.variables.iter().join(", "),
            declarations.labels.iter().join(", ")
        );
        Ok(Compilation {
            emitter,
            declarations,
            graph,
        })
    }

    /// Compiles the file at a given path, writing the output only if compilation succeeds
    pub fn compile(&self, path: &Path) -> YolocResult<Compilation> {
        let _span = info_span!("compile", path = ?path).entered();
        let source = std::fs::read_to_string(path)?;
        let compilation = self.compile_str(&source)?;
        self.persist(&compilation)?;
        Ok(compilation)
    }

    /// Writes a successful compilation, and its parse graph if one was recorded
    pub fn persist(&self, compilation: &Compilation) -> YolocResult<()> {
        compilation.emitter.write_output()?;
        if let (Some(path), Some(graph)) = (&self.graph, &compilation.graph) {
            graph.write_dot(path)?;
        }
        Ok(())
    }
}

/// The result of successfully compiling a yolo program
#[derive(Debug)]
pub struct Compilation {
    emitter: Emitter,
    declarations: Declarations,
    graph: Option<ParseGraph>,
}

impl Compilation {
    /// Boilerplate and variable declarations
    pub fn header(&self) -> &str {
        self.emitter.header()
    }

    /// The statements of the program
    pub fn code(&self) -> &str {
        self.emitter.code()
    }

    /// The complete C source
    pub fn output(&self) -> String {
        self.emitter.output()
    }

    pub fn declarations(&self) -> &Declarations {
        &self.declarations
    }

    /// The parse graph, if the compiler was configured to record one
    pub fn graph(&self) -> Option<&ParseGraph> {
        self.graph.as_ref()
    }
}

/// Builder for creating a [Yoloc] instance.
#[derive(Debug)]
pub struct YolocBuilder {
    pub output: PathBuf,
    pub graph: Option<PathBuf>,
}

impl YolocBuilder {
    /// Creates a YolocBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file compiled C is written to
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = path.as_ref().to_path_buf();
        self
    }

    /// Records the parse graph, writing it to the given file
    pub fn graph<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.graph = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds a [Yoloc] instance from this builder
    pub fn build(self) -> Result<Yoloc, BuildYolocError> {
        check_destination(&self.output)?;
        if let Some(graph) = &self.graph {
            check_destination(graph)?;
        }
        Ok(Yoloc {
            output: self.output,
            graph: self.graph,
        })
    }
}

impl Default for YolocBuilder {
    fn default() -> Self {
        Self {
            output: PathBuf::from("out.c"),
            graph: None,
        }
    }
}

/// A file can only be written if it isn't a directory, and its parent is one
fn check_destination(path: &Path) -> Result<(), BuildYolocError> {
    if path.is_dir() {
        return Err(BuildYolocError::DestinationIsADirectory(path.to_path_buf()));
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let meta = std::fs::metadata(parent)
        .map_err(|e| BuildYolocError::ParentDoesNotExist(parent.to_path_buf(), e))?;
    if !meta.is_dir() {
        return Err(BuildYolocError::ParentIsNotADirectory(parent.to_path_buf()));
    }
    Ok(())
}

/// An error occurred while building a [Yoloc] instance
#[derive(Debug, Error)]
pub enum BuildYolocError {
    #[error("{0:?} does not exist: {1}")]
    ParentDoesNotExist(PathBuf, io::Error),
    #[error("{0:?} is not a directory")]
    ParentIsNotADirectory(PathBuf),
    #[error("{0:?} is a directory, can't write to it")]
    DestinationIsADirectory(PathBuf),
}
