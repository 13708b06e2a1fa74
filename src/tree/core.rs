/// Opaque handle to a node on a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(usize);

/// Node kinds a rendering surface must support.
///
/// `Row` and `Column` carry an optional main-axis size (height for rows,
/// width for columns) in surface units. `Spacer` with `size: None` is
/// flexible and soaks up leftover space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Row { height: Option<u32> },
    Column { width: Option<u32> },
    HBox,
    Spacer { size: Option<u32> },
    Text(String),
    Image(String),
}

/// Container and leaf primitives the interpreter materializes output with.
///
/// The shipped implementation is [`ContainerTree`]; hosts with their own
/// widget system implement this instead and receive the same call sequence.
pub trait Surface {
    fn root(&self) -> NodeHandle;
    fn add_row(&mut self, parent: NodeHandle, height: Option<u32>) -> NodeHandle;
    fn add_column(&mut self, parent: NodeHandle, width: Option<u32>) -> NodeHandle;
    /// Horizontal slot used by alignment wrapping.
    fn add_hbox(&mut self, parent: NodeHandle) -> NodeHandle;
    fn add_spacer(&mut self, parent: NodeHandle, size: Option<u32>) -> NodeHandle;
    fn add_text(&mut self, parent: NodeHandle, text: &str) -> NodeHandle;
    fn add_image(&mut self, parent: NodeHandle, name: &str) -> NodeHandle;
    fn set_padding(&mut self, node: NodeHandle, padding: u32);
    fn set_spacing(&mut self, node: NodeHandle, spacing: u32);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub kind: NodeKind,
    pub padding: u32,
    pub spacing: u32,
    pub children: Vec<NodeHandle>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            padding: 0,
            spacing: 0,
            children: Vec::new(),
        }
    }
}

/// Arena-backed container tree, the interpreter's default output.
///
/// Children are kept in insertion order, which by construction is document
/// order. [`ContainerTree::fingerprint`] hashes the full structure so two
/// passes can be compared with a single equality check.
#[derive(Debug, Clone)]
pub struct ContainerTree {
    nodes: Vec<NodeData>,
}

impl ContainerTree {
    pub fn new() -> Self {
        Self {
            // Index 0 is the render root, a vertical stack of rows.
            nodes: vec![NodeData::new(NodeKind::Column { width: None })],
        }
    }

    /// Handle of the render root; available without importing [`Surface`]
    /// so readers of a finished tree need only the inherent accessors.
    pub fn root(&self) -> NodeHandle {
        NodeHandle(0)
    }

    fn push(&mut self, parent: NodeHandle, kind: NodeKind) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len());
        self.nodes.push(NodeData::new(kind));
        self.nodes[parent.0].children.push(handle);
        handle
    }

    pub fn node(&self, handle: NodeHandle) -> &NodeData {
        &self.nodes[handle.0]
    }

    pub fn kind(&self, handle: NodeHandle) -> &NodeKind {
        &self.nodes[handle.0].kind
    }

    pub fn children(&self, handle: NodeHandle) -> &[NodeHandle] {
        &self.nodes[handle.0].children
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Text leaves in document order, handy for assertions on rendered output.
    pub fn texts(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|node| match &node.kind {
                NodeKind::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Image leaves in document order.
    pub fn images(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|node| match &node.kind {
                NodeKind::Image(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Structural digest: equal fingerprints mean identical ordering, kinds,
    /// sizes, spacing and leaf payloads.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        self.hash_node(self.root(), &mut hasher);
        hasher.finalize()
    }

    fn hash_node(&self, handle: NodeHandle, hasher: &mut blake3::Hasher) {
        let node = &self.nodes[handle.0];
        match &node.kind {
            NodeKind::Row { height } => {
                hasher.update(&[0]);
                hash_size(*height, hasher);
            }
            NodeKind::Column { width } => {
                hasher.update(&[1]);
                hash_size(*width, hasher);
            }
            NodeKind::HBox => {
                hasher.update(&[2]);
            }
            NodeKind::Spacer { size } => {
                hasher.update(&[3]);
                hash_size(*size, hasher);
            }
            NodeKind::Text(text) => {
                hasher.update(&[4]);
                hasher.update(&(text.len() as u64).to_le_bytes());
                hasher.update(text.as_bytes());
            }
            NodeKind::Image(name) => {
                hasher.update(&[5]);
                hasher.update(&(name.len() as u64).to_le_bytes());
                hasher.update(name.as_bytes());
            }
        }
        hasher.update(&node.padding.to_le_bytes());
        hasher.update(&node.spacing.to_le_bytes());
        hasher.update(&(node.children.len() as u64).to_le_bytes());
        for child in &node.children {
            self.hash_node(*child, hasher);
        }
    }
}

fn hash_size(size: Option<u32>, hasher: &mut blake3::Hasher) {
    match size {
        Some(value) => {
            hasher.update(&[1]);
            hasher.update(&value.to_le_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

impl Default for ContainerTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for ContainerTree {
    fn root(&self) -> NodeHandle {
        NodeHandle(0)
    }

    fn add_row(&mut self, parent: NodeHandle, height: Option<u32>) -> NodeHandle {
        self.push(parent, NodeKind::Row { height })
    }

    fn add_column(&mut self, parent: NodeHandle, width: Option<u32>) -> NodeHandle {
        self.push(parent, NodeKind::Column { width })
    }

    fn add_hbox(&mut self, parent: NodeHandle) -> NodeHandle {
        self.push(parent, NodeKind::HBox)
    }

    fn add_spacer(&mut self, parent: NodeHandle, size: Option<u32>) -> NodeHandle {
        self.push(parent, NodeKind::Spacer { size })
    }

    fn add_text(&mut self, parent: NodeHandle, text: &str) -> NodeHandle {
        self.push(parent, NodeKind::Text(text.to_string()))
    }

    fn add_image(&mut self, parent: NodeHandle, name: &str) -> NodeHandle {
        self.push(parent, NodeKind::Image(name.to_string()))
    }

    fn set_padding(&mut self, node: NodeHandle, padding: u32) {
        self.nodes[node.0].padding = padding;
    }

    fn set_spacing(&mut self, node: NodeHandle, spacing: u32) {
        self.nodes[node.0].spacing = spacing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_reachable_without_the_builder_trait() {
        let tree = ContainerTree::new();
        let root = ContainerTree::root(&tree);
        assert_eq!(tree.kind(root), &NodeKind::Column { width: None });
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut tree = ContainerTree::new();
        let row = tree.add_row(tree.root(), Some(120));
        let first = tree.add_column(row, Some(90));
        let second = tree.add_column(row, None);
        tree.add_text(first, "left");
        tree.add_text(second, "right");

        assert_eq!(tree.children(tree.root()), &[row]);
        assert_eq!(tree.children(row), &[first, second]);
        assert_eq!(tree.kind(first), &NodeKind::Column { width: Some(90) });
        assert_eq!(tree.texts(), vec!["left", "right"]);
    }

    #[test]
    fn fingerprint_tracks_structure() {
        let build = |text: &str, width: Option<u32>| {
            let mut tree = ContainerTree::new();
            let row = tree.add_row(tree.root(), None);
            let col = tree.add_column(row, width);
            tree.add_text(col, text);
            tree
        };

        assert_eq!(
            build("date", Some(90)).fingerprint(),
            build("date", Some(90)).fingerprint()
        );
        assert_ne!(
            build("date", Some(90)).fingerprint(),
            build("date", None).fingerprint()
        );
        assert_ne!(
            build("date", None).fingerprint(),
            build("week", None).fingerprint()
        );
    }

    #[test]
    fn fingerprint_tracks_spacing() {
        let mut plain = ContainerTree::new();
        let row = plain.add_row(plain.root(), None);
        let mut padded = plain.clone();
        padded.set_padding(row, 4);
        assert_ne!(plain.fingerprint(), padded.fingerprint());
    }
}
