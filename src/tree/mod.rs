mod value;

use std::fmt;

use indexmap::IndexMap;

pub type Map = IndexMap<String, Node>;

/// Sparse list; `None` marks a hole left by non-contiguous indices.
pub type List = Vec<Option<Node>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Map(Map),
    List(List),
    Leaf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Map,
    List,
    Leaf,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Map => "map",
            NodeKind::List => "list",
            NodeKind::Leaf => "leaf",
        };
        f.write_str(name)
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Map(_) => NodeKind::Map,
            Node::List(_) => NodeKind::List,
            Node::Leaf(_) => NodeKind::Leaf,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Node::List(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Leaf(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Node::List(list) => Some(list),
            _ => None,
        }
    }

    /// Turn this node into a map, discarding whatever it held unless it
    /// already was one.
    pub fn coerce_map(&mut self) -> &mut Map {
        if !self.is_map() {
            *self = Node::Map(Map::new());
        }
        match self {
            Node::Map(map) => map,
            _ => unreachable!("node was just replaced with a map"),
        }
    }

    /// Turn this node into a list, discarding whatever it held unless it
    /// already was one.
    pub fn coerce_list(&mut self) -> &mut List {
        if !self.is_list() {
            *self = Node::List(List::new());
        }
        match self {
            Node::List(list) => list,
            _ => unreachable!("node was just replaced with a list"),
        }
    }

    fn child(&self, token: &str) -> Option<&Node> {
        match self {
            Node::Map(map) => map.get(token),
            Node::List(list) => token
                .parse::<usize>()
                .ok()
                .and_then(|idx| list.get(idx))
                .and_then(Option::as_ref),
            Node::Leaf(_) => None,
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Leaf(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Leaf(value)
    }
}

/// Result of a conversion. The root is always a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    root: Map,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Map {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Map {
        &mut self.root
    }

    pub fn into_map(self) -> Map {
        self.root
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.root.get(key)
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Look up a node with a JSON-pointer style path such as `/a/b/0/c`.
    ///
    /// Map keys containing `/` or `~` are addressed with the usual `~1` and
    /// `~0` escapes. The empty pointer has no node (the root is not a `Node`).
    pub fn pointer(&self, pointer: &str) -> Option<&Node> {
        let rest = pointer.strip_prefix('/')?;
        let mut tokens = rest.split('/').map(unescape_pointer_token);
        let first = tokens.next()?;
        let mut node = self.root.get(first.as_str())?;
        for token in tokens {
            node = node.child(&token)?;
        }
        Some(node)
    }
}

impl From<Map> for Tree {
    fn from(root: Map) -> Self {
        Self { root }
    }
}

fn unescape_pointer_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}
