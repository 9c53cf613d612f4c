//! Immutable, trivia-preserving syntax tree.
//!
//! Documents arrive from the host as a tree of [`SyntaxNode`]s whose leaves are
//! [`Token`]s. Every piece of source text, including whitespace and comments,
//! lives on a token as leading or trailing [`Trivia`], so rendering the tree
//! reproduces the document byte for byte.
//!
//! Edits never mutate a tree. [`SyntaxTree::replace_node`] copies the path from
//! the root to the edited node and shares every other subtree with the old
//! tree. Node ids survive edits, which lets a caller apply several edits to
//! one document in sequence by id.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Stable identity of a node across edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Byte range in the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub len: usize,
}

impl TextRange {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

impl From<TextRange> for miette::SourceSpan {
    fn from(range: TextRange) -> Self {
        (range.start, range.len).into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    /// Spaces and tabs.
    Whitespace,
    /// `\n` or `\r\n`.
    EndOfLine,
    /// `// ...` up to, not including, the line break.
    LineComment,
    /// `/* ... */`.
    BlockComment,
    /// `/// ...` or `/** ... */`.
    DocComment,
    /// Text the trivia lexer could not classify.
    Skipped,
}

/// A non-semantic fragment of source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: String,
}

impl Trivia {
    pub fn new(kind: TriviaKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn whitespace(text: impl Into<String>) -> Self {
        Self::new(TriviaKind::Whitespace, text)
    }

    pub fn end_of_line(text: impl Into<String>) -> Self {
        Self::new(TriviaKind::EndOfLine, text)
    }

    pub fn doc_comment(text: impl Into<String>) -> Self {
        Self::new(TriviaKind::DocComment, text)
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TriviaKind::Whitespace
    }

    pub fn is_end_of_line(&self) -> bool {
        self.kind == TriviaKind::EndOfLine
    }
}

/// Splits raw trivia text into classified fragments.
///
/// Concatenating the texts of the result always gives back `text`.
pub fn lex_trivia(text: &str) -> Vec<Trivia> {
    let mut out = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let (kind, len) = if rest.starts_with("\r\n") {
            (TriviaKind::EndOfLine, 2)
        } else if rest.starts_with('\n') {
            (TriviaKind::EndOfLine, 1)
        } else if rest.starts_with([' ', '\t']) {
            let len = rest
                .find(|c: char| c != ' ' && c != '\t')
                .unwrap_or(rest.len());
            (TriviaKind::Whitespace, len)
        } else if rest.starts_with("//") {
            let len = line_len(rest);
            let kind = if rest.starts_with("///") && !rest.starts_with("////") {
                TriviaKind::DocComment
            } else {
                TriviaKind::LineComment
            };
            (kind, len)
        } else if rest.starts_with("/*") {
            let len = rest[2..].find("*/").map_or(rest.len(), |idx| idx + 4);
            let kind = if rest.starts_with("/**") && !rest.starts_with("/**/") {
                TriviaKind::DocComment
            } else {
                TriviaKind::BlockComment
            };
            (kind, len)
        } else {
            let first = rest.chars().next().map_or(1, char::len_utf8);
            (TriviaKind::Skipped, line_len(rest).max(first))
        };

        out.push(Trivia::new(kind, &rest[..len]));
        rest = &rest[len..];
    }

    out
}

fn line_len(text: &str) -> usize {
    text.find(['\r', '\n']).unwrap_or(text.len())
}

fn trivia_len(trivia: &[Trivia]) -> usize {
    trivia.iter().map(|t| t.text.len()).sum()
}

/// A leaf of the tree: opaque text with its surrounding trivia.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token {
    pub leading: Vec<Trivia>,
    pub text: String,
    pub trailing: Vec<Trivia>,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            leading: Vec::new(),
            text: text.into(),
            trailing: Vec::new(),
        }
    }

    /// Length of the token including its trivia.
    pub fn full_len(&self) -> usize {
        trivia_len(&self.leading) + self.text.len() + trivia_len(&self.trailing)
    }

    fn write_to(&self, out: &mut String) {
        for trivia in &self.leading {
            out.push_str(&trivia.text);
        }
        out.push_str(&self.text);
        for trivia in &self.trailing {
            out.push_str(&trivia.text);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of a document.
    CompilationUnit,
    /// A declaration that may carry documentation.
    Declaration,
    /// `[Attribute]` list attached to a declaration.
    AttributeList,
    /// Any other grouping (bodies, parameter lists, ...).
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxElement {
    Token(Token),
    Node(Arc<SyntaxNode>),
}

impl SyntaxElement {
    fn full_len(&self) -> usize {
        match self {
            SyntaxElement::Token(token) => token.full_len(),
            SyntaxElement::Node(node) => node.full_len(),
        }
    }
}

/// An interior node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    id: NodeId,
    kind: NodeKind,
    elements: Vec<SyntaxElement>,
    /// Index into `elements` of the identifier token naming this node.
    name_token: Option<usize>,
}

impl SyntaxNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn elements(&self) -> &[SyntaxElement] {
        &self.elements
    }

    /// The identifier token naming this node, if marked.
    pub fn name_token(&self) -> Option<&Token> {
        match self.elements.get(self.name_token?)? {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        }
    }

    /// First token of the subtree.
    pub fn first_token(&self) -> Option<&Token> {
        self.elements.iter().find_map(|element| match element {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(node) => node.first_token(),
        })
    }

    /// Leading trivia of the node: the leading trivia of its first token.
    pub fn leading_trivia(&self) -> &[Trivia] {
        self.first_token()
            .map(|token| token.leading.as_slice())
            .unwrap_or(&[])
    }

    /// Copy of this node whose first token carries `leading`.
    ///
    /// Every other element is shared with `self`.
    pub fn with_leading_trivia(&self, leading: Vec<Trivia>) -> SyntaxNode {
        let mut node = self.clone();
        node.set_leading(leading);
        node
    }

    fn set_leading(&mut self, leading: Vec<Trivia>) -> bool {
        for element in &mut self.elements {
            match element {
                SyntaxElement::Token(token) => {
                    token.leading = leading;
                    return true;
                }
                SyntaxElement::Node(child) => {
                    if child.first_token().is_some() {
                        return Arc::make_mut(child).set_leading(leading);
                    }
                }
            }
        }
        false
    }

    /// Length of the rendered subtree.
    pub fn full_len(&self) -> usize {
        self.elements.iter().map(SyntaxElement::full_len).sum()
    }

    /// Renders the subtree, trivia included.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.full_len());
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        for element in &self.elements {
            match element {
                SyntaxElement::Token(token) => token.write_to(out),
                SyntaxElement::Node(node) => node.write_to(out),
            }
        }
    }

    /// Child nodes, in document order.
    pub fn children(&self) -> impl Iterator<Item = &Arc<SyntaxNode>> {
        self.elements.iter().filter_map(|element| match element {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        })
    }

    /// Depth-first search for `id` in this subtree.
    pub fn find(&self, id: NodeId) -> Option<&SyntaxNode> {
        if self.id == id {
            return Some(self);
        }
        self.children().find_map(|child| child.find(id))
    }

    /// Element indices leading from this node to `id`.
    fn path_to(&self, id: NodeId, path: &mut Vec<usize>) -> bool {
        if self.id == id {
            return true;
        }
        for (idx, element) in self.elements.iter().enumerate() {
            if let SyntaxElement::Node(child) = element {
                path.push(idx);
                if child.path_to(id, path) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }

    /// Offset of `id`'s name token relative to the start of this subtree.
    fn name_range(&self, id: NodeId, base: usize) -> Option<TextRange> {
        let mut offset = base;
        for (idx, element) in self.elements.iter().enumerate() {
            match element {
                SyntaxElement::Token(token) if self.id == id && self.name_token == Some(idx) => {
                    let start = offset + trivia_len(&token.leading);
                    return Some(TextRange::new(start, token.text.len()));
                }
                SyntaxElement::Node(child) if child.find(id).is_some() => {
                    return child.name_range(id, offset);
                }
                _ => offset += element.full_len(),
            }
        }
        None
    }
}

/// Builds a [`SyntaxNode`] token by token.
#[derive(Debug)]
pub struct NodeBuilder {
    id: NodeId,
    kind: NodeKind,
    elements: Vec<SyntaxElement>,
    name_token: Option<usize>,
    pending_leading: Vec<Trivia>,
}

impl NodeBuilder {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Trivia attached in front of the next token or child.
    pub fn leading(mut self, trivia: &str) -> Self {
        self.pending_leading.extend(lex_trivia(trivia));
        self
    }

    /// Appends a token. Token text is opaque and may contain spaces.
    pub fn token(mut self, text: impl Into<String>) -> Self {
        let mut token = Token::new(text);
        token.leading = std::mem::take(&mut self.pending_leading);
        self.elements.push(SyntaxElement::Token(token));
        self
    }

    /// Appends the identifier token that names this node.
    pub fn name(mut self, text: impl Into<String>) -> Self {
        self = self.token(text);
        self.name_token = Some(self.elements.len() - 1);
        self
    }

    /// Trivia attached after the last token of this builder.
    ///
    /// Ignored when the last element is a child node; give the child its own
    /// trailing trivia instead.
    pub fn trailing(mut self, trivia: &str) -> Self {
        if let Some(SyntaxElement::Token(token)) = self.elements.last_mut() {
            token.trailing.extend(lex_trivia(trivia));
        }
        self
    }

    /// Appends a child node. Pending leading trivia moves onto the child's first token.
    pub fn child(mut self, child: SyntaxNode) -> Self {
        let child = if self.pending_leading.is_empty() {
            child
        } else {
            let mut leading = std::mem::take(&mut self.pending_leading);
            leading.extend(child.leading_trivia().iter().cloned());
            child.with_leading_trivia(leading)
        };
        self.elements.push(SyntaxElement::Node(Arc::new(child)));
        self
    }

    pub fn build(mut self) -> SyntaxNode {
        if !self.pending_leading.is_empty() {
            // Dangling trivia at the end of a node becomes an empty token so no
            // text is lost.
            self = self.token("");
        }
        SyntaxNode {
            id: self.id,
            kind: self.kind,
            elements: self.elements,
            name_token: self.name_token,
        }
    }
}

/// Allocates node ids while building a tree.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    next_id: u32,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&mut self, kind: NodeKind) -> NodeBuilder {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        NodeBuilder {
            id,
            kind,
            elements: Vec::new(),
            name_token: None,
            pending_leading: Vec::new(),
        }
    }

    pub fn root(&mut self) -> NodeBuilder {
        self.node(NodeKind::CompilationUnit)
    }

    pub fn declaration(&mut self) -> NodeBuilder {
        self.node(NodeKind::Declaration)
    }

    pub fn attribute_list(&mut self) -> NodeBuilder {
        self.node(NodeKind::AttributeList)
    }
}

/// A whole document.
///
/// Cloning is cheap: the root is reference counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    root: Arc<SyntaxNode>,
}

impl SyntaxTree {
    pub fn new(root: SyntaxNode) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Renders the full document.
    pub fn text(&self) -> String {
        self.root.text()
    }

    pub fn find(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.root.find(id)
    }

    /// Span of the name token of `id`, when the node marks one.
    pub fn name_range(&self, id: NodeId) -> Option<TextRange> {
        self.root.name_range(id, 0)
    }

    /// Whether node `id` begins at the start of a line.
    ///
    /// True when the text rendered in front of the node's leading trivia is
    /// empty or ends with a line break. `None` when `id` is not in the tree.
    pub fn starts_line(&self, id: NodeId) -> Option<bool> {
        let mut at_line_start = true;
        line_start_before(&self.root, id, &mut at_line_start)
    }

    /// Line break used by the document: the first end-of-line trivia, or `\n`.
    pub fn line_ending(&self) -> &str {
        fn first_eol(node: &SyntaxNode) -> Option<&str> {
            node.elements.iter().find_map(|element| match element {
                SyntaxElement::Token(token) => token
                    .leading
                    .iter()
                    .chain(token.trailing.iter())
                    .find(|t| t.is_end_of_line())
                    .map(|t| t.text.as_str()),
                SyntaxElement::Node(child) => first_eol(child),
            })
        }
        first_eol(&self.root).unwrap_or("\n")
    }

    /// Returns a new tree in which node `id` is replaced by `edit(node)`.
    ///
    /// Only the nodes on the path from the root to `id` are copied. Returns
    /// `None` when `id` is not in the tree.
    pub fn replace_node<F>(&self, id: NodeId, edit: F) -> Option<SyntaxTree>
    where
        F: FnOnce(&SyntaxNode) -> SyntaxNode,
    {
        let mut path = Vec::new();
        if !self.root.path_to(id, &mut path) {
            return None;
        }
        Some(SyntaxTree {
            root: replace_along(&self.root, &path, edit),
        })
    }

    /// Whether `other` shares the subtree `id` with `self` without copying it.
    pub fn shares_node(&self, other: &SyntaxTree, id: NodeId) -> bool {
        fn find_arc(node: &Arc<SyntaxNode>, id: NodeId) -> Option<&Arc<SyntaxNode>> {
            if node.id == id {
                return Some(node);
            }
            node.children().find_map(|child| find_arc(child, id))
        }
        match (find_arc(&self.root, id), find_arc(&other.root, id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

fn line_start_before(node: &SyntaxNode, id: NodeId, at_line_start: &mut bool) -> Option<bool> {
    if node.id == id {
        return Some(*at_line_start);
    }
    for element in &node.elements {
        match element {
            SyntaxElement::Token(token) => {
                let texts = token
                    .leading
                    .iter()
                    .map(|t| t.text.as_str())
                    .chain(std::iter::once(token.text.as_str()))
                    .chain(token.trailing.iter().map(|t| t.text.as_str()));
                for text in texts.filter(|text| !text.is_empty()) {
                    *at_line_start = text.ends_with('\n');
                }
            }
            SyntaxElement::Node(child) => {
                if let Some(found) = line_start_before(child, id, at_line_start) {
                    return Some(found);
                }
            }
        }
    }
    None
}

fn replace_along<F>(node: &Arc<SyntaxNode>, path: &[usize], edit: F) -> Arc<SyntaxNode>
where
    F: FnOnce(&SyntaxNode) -> SyntaxNode,
{
    let Some((&idx, rest)) = path.split_first() else {
        return Arc::new(edit(node));
    };
    let mut copy = (**node).clone();
    if let SyntaxElement::Node(child) = &node.elements[idx] {
        copy.elements[idx] = SyntaxElement::Node(replace_along(child, rest, edit));
    }
    Arc::new(copy)
}
