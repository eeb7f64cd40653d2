//! Observing the parse, and rendering it as a graph

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::Path;
use tracing::info;
use yolo_tokens::token::{Token, TokenKind};

/// Notified by the parser as it walks the grammar. Every method does nothing by default.
///
/// Observers can't change how parsing proceeds.
pub trait ParseObserver {
    /// A grammar rule has been entered
    fn enter_rule(&mut self, _rule: &'static str) {}

    /// The most recently entered rule has finished
    fn exit_rule(&mut self) {}

    /// A token has been consumed by the current rule
    fn token(&mut self, _token: &Token) {}
}

/// The observer used when nothing is observing the parse
#[derive(Debug, Default, Clone, Copy)]
pub struct NoObserver;

impl ParseObserver for NoObserver {}

impl<O: ParseObserver + ?Sized> ParseObserver for &mut O {
    fn enter_rule(&mut self, rule: &'static str) {
        (**self).enter_rule(rule)
    }

    fn exit_rule(&mut self) {
        (**self).exit_rule()
    }

    fn token(&mut self, token: &Token) {
        (**self).token(token)
    }
}

/// A node in a [ParseGraph]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    Rule(&'static str),
    Token(TokenKind, String),
}

impl Display for ParseNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseNode::Rule(rule) => write!(f, "{rule}"),
            ParseNode::Token(TokenKind::Newline, _) => write!(f, "NEWLINE"),
            ParseNode::Token(TokenKind::Eof, _) => write!(f, "EOF"),
            ParseNode::Token(kind, text) => write!(f, "{kind}: {text}"),
        }
    }
}

/// Mirrors the recursion of the parser as a tree, rooted at the first rule entered.
///
/// Edges are weighted with the position of the child amongst its siblings.
#[derive(Debug, Default)]
pub struct ParseGraph {
    graph: DiGraph<ParseNode, usize>,
    open: Vec<NodeIndex>,
}

impl ParseGraph {
    /// Creates a new, empty parse graph
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &DiGraph<ParseNode, usize> {
        &self.graph
    }

    /// The first node added, if any
    pub fn root(&self) -> Option<NodeIndex> {
        self.graph.node_indices().next()
    }

    /// Gets the children of a node in the order they were added
    pub fn children(&self, node: NodeIndex) -> Vec<&ParseNode> {
        let mut children = self
            .graph
            .edges(node)
            .map(|edge| (*edge.weight(), edge.target()))
            .collect::<Vec<_>>();
        children.sort();
        children
            .into_iter()
            .map(|(_, child)| &self.graph[child])
            .collect()
    }

    fn add(&mut self, node: ParseNode) -> NodeIndex {
        let index = self.graph.add_node(node);
        if let Some(&parent) = self.open.last() {
            let position = self.graph.edges(parent).count();
            self.graph.add_edge(parent, index, position);
        }
        index
    }

    /// Renders this graph in the graphviz dot format
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }

    /// Writes this graph in the graphviz dot format to a path
    pub fn write_dot<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        std::fs::write(path.as_ref(), self.to_dot())?;
        info!("wrote parse graph to {:?}", path.as_ref());
        Ok(())
    }
}

impl ParseObserver for ParseGraph {
    fn enter_rule(&mut self, rule: &'static str) {
        let index = self.add(ParseNode::Rule(rule));
        self.open.push(index);
    }

    fn exit_rule(&mut self) {
        self.open.pop();
    }

    fn token(&mut self, token: &Token) {
        self.add(ParseNode::Token(token.kind(), token.text().to_string()));
    }
}
