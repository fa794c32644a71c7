//! In-memory forests built from flat rows.
//!
//! [`materialize`] wires a row set into an arena in one linear pass. Records
//! stay untouched; parent and child links live beside them in the [`Forest`]
//! and are read through [`Node`] handles.

use core::{fmt, ops::Deref};

use hashbrown::{HashMap, HashSet};

use crate::{canopy_trace_forest, traits::ForestRecord};

/// Index of a record inside its [`Forest`], in row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

struct Slot<T> {
    record: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A set of linked trees.
///
/// Every node appears exactly once. A node whose parent is not part of the
/// set is top-level, whether or not its parent reference is null. Rows whose
/// parent links form a cycle are linked as found; such a component has no
/// top-level node and is only reachable through [`Forest::iter`] or
/// [`Forest::find`].
pub struct Forest<T: ForestRecord> {
    slots: Vec<Slot<T>>,
    roots: Vec<NodeId>,
    index: HashMap<T::Id, NodeId>,
}

/// Links `records` into a forest, preserving their order.
///
/// The first record with a given id wins the id lookup. Children are appended
/// in row order, so a store-side `ORDER BY` carries through to every
/// children list.
pub fn materialize<T, I>(records: I) -> Forest<T>
where
    T: ForestRecord,
    I: IntoIterator<Item = T>,
{
    let mut slots: Vec<Slot<T>> = records
        .into_iter()
        .map(|record| Slot {
            record,
            parent: None,
            children: Vec::new(),
        })
        .collect();

    let mut index = HashMap::with_capacity(slots.len());
    for (i, slot) in slots.iter().enumerate() {
        index.entry(slot.record.id()).or_insert(NodeId(i));
    }

    let mut roots = Vec::new();
    for i in 0..slots.len() {
        let parent = slots[i]
            .record
            .parent_id()
            .and_then(|parent_id| index.get(&parent_id).copied());

        match parent {
            Some(parent) => {
                slots[i].parent = Some(parent);
                slots[parent.0].children.push(NodeId(i));
            }
            None => roots.push(NodeId(i)),
        }
    }

    canopy_trace_forest!(slots.len(), roots.len());

    Forest {
        slots,
        roots,
        index,
    }
}

impl<T: ForestRecord> Forest<T> {
    /// Top-level nodes in row order.
    pub fn roots(&self) -> impl ExactSizeIterator<Item = Node<'_, T>> + '_ {
        self.roots.iter().map(|&id| Node { forest: self, index: id })
    }

    /// Number of nodes, not trees.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<Node<'_, T>> {
        (id.0 < self.slots.len()).then_some(Node { forest: self, index: id })
    }

    /// Looks a node up by record id.
    pub fn find(&self, id: &T::Id) -> Option<Node<'_, T>> {
        let &id = self.index.get(id)?;
        Some(Node { forest: self, index: id })
    }

    /// Every node in row order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Node<'_, T>> + '_ {
        (0..self.slots.len()).map(|i| Node {
            forest: self,
            index: NodeId(i),
        })
    }

    /// Drops the links and returns the records in row order.
    pub fn into_records(self) -> Vec<T> {
        self.slots.into_iter().map(|slot| slot.record).collect()
    }

    /// Keeps the whole forest but exposes it as the tree under `root`.
    pub fn into_tree(self, root: NodeId) -> Option<Tree<T>> {
        (root.0 < self.slots.len()).then_some(Tree { forest: self, root })
    }
}

impl<T: ForestRecord> Default for Forest<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            roots: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: ForestRecord + Clone> Clone for Forest<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self
                .slots
                .iter()
                .map(|slot| Slot {
                    record: slot.record.clone(),
                    parent: slot.parent,
                    children: slot.children.clone(),
                })
                .collect(),
            roots: self.roots.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T: ForestRecord + fmt::Debug> fmt::Debug for Forest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forest")
            .field("nodes", &self.iter().collect::<Vec<_>>())
            .field("roots", &self.roots)
            .finish()
    }
}

impl<'f, T: ForestRecord> IntoIterator for &'f Forest<T> {
    type Item = Node<'f, T>;
    type IntoIter = Box<dyn ExactSizeIterator<Item = Node<'f, T>> + 'f>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// A borrowed handle to one node of a [`Forest`]. Dereferences to the record.
pub struct Node<'f, T: ForestRecord> {
    forest: &'f Forest<T>,
    index: NodeId,
}

impl<'f, T: ForestRecord> Node<'f, T> {
    fn slot(&self) -> &'f Slot<T> {
        &self.forest.slots[self.index.0]
    }

    fn at(&self, id: NodeId) -> Node<'f, T> {
        Node {
            forest: self.forest,
            index: id,
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.index
    }

    pub fn record(&self) -> &'f T {
        &self.slot().record
    }

    /// The linked parent, `None` when the parent is not in the forest.
    pub fn parent(&self) -> Option<Node<'f, T>> {
        self.slot().parent.map(|id| self.at(id))
    }

    /// Children in row order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = Node<'f, T>> + use<'f, T> {
        let forest = self.forest;
        self.slot()
            .children
            .iter()
            .map(move |&id| Node { forest, index: id })
    }

    /// True when the record has no parent reference at all.
    pub fn is_root(&self) -> bool {
        self.slot().record.parent_id().is_none()
    }

    /// True when no parent was found in the forest.
    pub fn is_top_level(&self) -> bool {
        self.slot().parent.is_none()
    }

    /// Follows parent links to the top. Returns `self` when top-level.
    ///
    /// Inside a parent cycle the walk stops at the last node before it would
    /// revisit one.
    pub fn root(&self) -> Node<'f, T> {
        let mut visited = HashSet::new();
        visited.insert(self.index);
        let mut current = *self;
        while let Some(parent) = current.slot().parent {
            if !visited.insert(parent) {
                break;
            }
            current = self.at(parent);
        }
        current
    }

    /// Parent, grandparent and so on, nearest first.
    pub fn ancestors(&self) -> Vec<Node<'f, T>> {
        let mut visited = HashSet::new();
        visited.insert(self.index);
        let mut ancestors = Vec::new();
        let mut next = self.slot().parent;
        while let Some(id) = next {
            if !visited.insert(id) {
                break;
            }
            ancestors.push(self.at(id));
            next = self.forest.slots[id.0].parent;
        }
        ancestors
    }

    /// Every node below this one, depth first: each child is followed by its
    /// own descendants before the next sibling.
    pub fn descendants(&self) -> Vec<Node<'f, T>> {
        let mut visited = HashSet::new();
        visited.insert(self.index);
        let mut descendants = Vec::new();
        let mut stack: Vec<NodeId> = self.slot().children.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            descendants.push(self.at(id));
            stack.extend(self.forest.slots[id.0].children.iter().rev().copied());
        }
        descendants
    }

    /// The parent's other children. Empty for a top-level node.
    pub fn siblings(&self) -> Vec<Node<'f, T>> {
        match self.parent() {
            Some(parent) => parent.children().filter(|c| c.index != self.index).collect(),
            None => Vec::new(),
        }
    }

    /// Number of linked ancestors.
    pub fn depth(&self) -> usize {
        self.ancestors().len()
    }
}

impl<T: ForestRecord> Clone for Node<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ForestRecord> Copy for Node<'_, T> {}

impl<T: ForestRecord> PartialEq for Node<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && core::ptr::eq(self.forest, other.forest)
    }
}

impl<T: ForestRecord> Eq for Node<'_, T> {}

impl<T: ForestRecord> Deref for Node<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.slot().record
    }
}

impl<T: ForestRecord + fmt::Debug> fmt::Debug for Node<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot();
        f.debug_struct("Node")
            .field("index", &self.index)
            .field("record", &slot.record)
            .field("parent", &slot.parent)
            .field("children", &slot.children)
            .finish()
    }
}

/// One tree of a loaded forest, owning the forest it was cut from.
pub struct Tree<T: ForestRecord> {
    forest: Forest<T>,
    root: NodeId,
}

impl<T: ForestRecord> Tree<T> {
    pub fn root(&self) -> Node<'_, T> {
        Node {
            forest: &self.forest,
            index: self.root,
        }
    }

    pub fn forest(&self) -> &Forest<T> {
        &self.forest
    }

    pub fn into_forest(self) -> Forest<T> {
        self.forest
    }
}

impl<T: ForestRecord> Deref for Tree<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.forest.slots[self.root.0].record
    }
}

impl<T: ForestRecord + fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("forest", &self.forest)
            .finish()
    }
}
