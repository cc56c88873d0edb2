//! Parse token trees.
//!
//! One [`TokenTree`] is built per parse attempt and discarded once a command
//! is built or parsing fails. Nodes live in an arena and reference each other
//! by [`TokenId`], so child/sibling/parent links can never dangle; token text
//! is borrowed from the input line and must not outlive it.

use crate::symbol::{Symbol, Terminal};
use cmdgram_diagnostics::Span;

/// Index of a node in a [`TokenTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(u32);

impl TokenId {
    fn idx(self) -> usize {
        self.0 as usize
    }
}

/// An ephemeral node of one parse attempt.
#[derive(Debug)]
pub struct ParseToken<'a> {
    /// The grammar symbol this token matched.
    pub symbol: Symbol,
    /// Borrowed text span from the input line.
    pub text: &'a str,
    /// Byte span in the input line.
    pub span: Span,
    /// First child, if any.
    pub child: Option<TokenId>,
    /// Next sibling, if any.
    pub next: Option<TokenId>,
    /// Back-reference to the parent, for diagnostics.
    pub parent: Option<TokenId>,
}

/// Arena of parse tokens for a single parse call.
#[derive(Debug)]
pub struct TokenTree<'a> {
    /// The full input line the token spans borrow from.
    pub source: &'a str,
    nodes: Vec<ParseToken<'a>>,
}

impl<'a> TokenTree<'a> {
    /// Create a tree whose root spans the whole line.
    pub(crate) fn new(source: &'a str) -> Self {
        let root = ParseToken {
            symbol: Symbol::Terminal(Terminal::SlashCommand),
            text: source,
            span: Span::new(0, source.len()),
            child: None,
            next: None,
            parent: None,
        };
        Self {
            source,
            nodes: vec![root],
        }
    }

    /// The root node id.
    pub fn root(&self) -> TokenId {
        TokenId(0)
    }

    /// Borrow a node.
    pub fn get(&self, id: TokenId) -> &ParseToken<'a> {
        &self.nodes[id.idx()]
    }

    /// Mutably borrow a node.
    pub(crate) fn get_mut(&mut self, id: TokenId) -> &mut ParseToken<'a> {
        &mut self.nodes[id.idx()]
    }

    /// Append a node as the last child of `parent`.
    pub(crate) fn push_child(
        &mut self,
        parent: TokenId,
        symbol: Symbol,
        text: &'a str,
        span: Span,
    ) -> TokenId {
        let id = TokenId(u32::try_from(self.nodes.len()).expect("token arena overflow"));
        self.nodes.push(ParseToken {
            symbol,
            text,
            span,
            child: None,
            next: None,
            parent: Some(parent),
        });
        match self.nodes[parent.idx()].child {
            None => self.nodes[parent.idx()].child = Some(id),
            Some(first) => {
                let mut cur = first;
                while let Some(next) = self.nodes[cur.idx()].next {
                    cur = next;
                }
                self.nodes[cur.idx()].next = Some(id);
            }
        }
        id
    }

    /// Iterate a node's children in sibling order.
    pub fn children(&self, id: TokenId) -> impl Iterator<Item = TokenId> + '_ {
        let mut cur = self.nodes[id.idx()].child;
        std::iter::from_fn(move || {
            let id = cur?;
            cur = self.nodes[id.idx()].next;
            Some(id)
        })
    }

    /// Number of nodes in the arena (root included).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

impl std::fmt::Display for TokenTree<'_> {
    /// Renders the tree depth-first, one node per line, indented by level.
    /// Intended for diagnostics and test output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut to_visit = vec![(self.root(), 0usize)];
        while let Some((id, level)) = to_visit.pop() {
            let node = self.get(id);
            write!(f, "{:indent$}", "", indent = level * 4)?;
            write!(f, "Symbol: {:#x}", node.symbol.value())?;
            if !node.text.is_empty() {
                write!(f, ", Data: {}", node.text)?;
            }
            writeln!(f)?;
            if let Some(next) = node.next {
                to_visit.push((next, level));
            }
            if let Some(child) = node.child {
                to_visit.push((child, level + 1));
            }
        }
        Ok(())
    }
}
