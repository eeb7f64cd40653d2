#![doc = include_str!("../README.md")]

pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod visualizer;

mod compiler;
pub use compiler::*;
pub use error::{ErrorKind, YolocError, YolocResult};
