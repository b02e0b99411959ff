//! Bit-string path codes and the binary tree they index.
//!
//! A [`Treecode`] names a node by the left/right steps that reach it from
//! the root. Codes print in their marker-rooted word form (`0b1010` reads
//! root, left, right, left), and the word form round-trips through
//! [`Treecode::to_word`] for codes that fit one machine word.

use std::collections::HashMap;
use std::fmt;

use crate::{Error, Result};

/// One step down a binary tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// The 0 bit.
    Left,
    /// The 1 bit.
    Right,
}

impl Step {
    /// The step's bit value.
    #[must_use]
    pub fn bit(self) -> u64 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    fn from_bit(bit: u64) -> Self {
        if bit == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// A path code: the sequence of steps from the root to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Treecode {
    steps: Vec<Step>,
}

impl Treecode {
    /// The root code (no steps).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a marker-rooted word: the highest set bit is the marker, the
    /// bits below it are the steps from most-significant downwards.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `word` is zero (no marker).
    #[must_use]
    pub fn from_word(word: u64) -> Self {
        debug_assert!(word != 0, "a treecode word carries a marker bit");
        let depth = 63 - word.leading_zeros() as usize;
        let steps = (0..depth)
            .map(|i| Step::from_bit((word >> (depth - 1 - i)) & 1))
            .collect();
        Self { steps }
    }

    /// Encode as a marker-rooted word, if the code fits in one.
    #[must_use]
    pub fn to_word(&self) -> Option<u64> {
        if self.steps.len() > 63 {
            return None;
        }
        let mut word = 1_u64;
        for step in &self.steps {
            word = (word << 1) | step.bit();
        }
        Some(word)
    }

    /// The code one step below this one.
    #[must_use]
    pub fn append(&self, step: Step) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// The number of steps from the root.
    #[must_use]
    pub fn code_length(&self) -> usize {
        self.steps.len()
    }

    /// The code of this node's parent, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.steps.is_empty() {
            return None;
        }
        Some(Self {
            steps: self.steps[..self.steps.len() - 1].to_vec(),
        })
    }

    /// Whether this code is an ancestor-or-self of `other`.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.steps.len() >= self.steps.len() && other.steps[..self.steps.len()] == self.steps[..]
    }

    /// The first step from this node towards a descendant `other`.
    ///
    /// Returns `None` if `other` is not a strict descendant.
    #[must_use]
    pub fn next_step_towards(&self, other: &Self) -> Option<Step> {
        (self.is_prefix_of(other) && other.steps.len() > self.steps.len())
            .then(|| other.steps[self.steps.len()])
    }

    /// The number of leading steps shared with `other`.
    #[must_use]
    pub fn common_prefix_len(&self, other: &Self) -> usize {
        self.steps
            .iter()
            .zip(&other.steps)
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// The last step taken to reach this node, or `None` at the root.
    #[must_use]
    pub fn last_step(&self) -> Option<Step> {
        self.steps.last().copied()
    }
}

impl fmt::Display for Treecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0b1")?;
        for step in &self.steps {
            write!(f, "{}", step.bit())?;
        }
        Ok(())
    }
}

/// One stored node of a [`BinaryTree`].
#[derive(Debug)]
pub struct BinaryTreeNode<N> {
    /// The caller's payload.
    pub data: N,
    /// The node's path code.
    pub code: Treecode,
    /// Index of the parent node, `None` at the root.
    pub parent: Option<usize>,
    /// Indices of the left/right children.
    pub children: [Option<usize>; 2],
}

/// A binary tree addressed by path codes, with stable node indices.
///
/// Nodes are stored in insertion order; indices never move, which is what
/// lets callers hold them across the life of a locked tree.
#[derive(Debug, Default)]
pub struct BinaryTree<N> {
    nodes: Vec<BinaryTreeNode<N>>,
    index_by_code: HashMap<Treecode, usize>,
    locked: bool,
}

impl<N> BinaryTree<N> {
    /// An empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index_by_code: HashMap::new(),
            locked: false,
        }
    }

    /// The number of stored nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a node at `code`, wiring it beneath its parent.
    ///
    /// The root (empty code) must be inserted first; every later code must
    /// extend an existing node's code by one step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TreeLocked`] after [`BinaryTree::lock_pointers`],
    /// [`Error::SpaceAlreadyInTree`] for an occupied code, and
    /// [`Error::SpaceNotInTree`] for a code whose parent is absent.
    pub fn put(&mut self, code: Treecode, data: N) -> Result<usize> {
        if self.locked {
            return Err(Error::TreeLocked);
        }
        if self.index_by_code.contains_key(&code) {
            return Err(Error::SpaceAlreadyInTree(code.to_string()));
        }
        let parent = match code.parent() {
            None => None,
            Some(parent_code) => Some(
                self.index_by_code
                    .get(&parent_code)
                    .copied()
                    .ok_or_else(|| Error::SpaceNotInTree(parent_code.to_string()))?,
            ),
        };
        let index = self.nodes.len();
        self.nodes.push(BinaryTreeNode {
            data,
            code: code.clone(),
            parent,
            children: [None, None],
        });
        if let (Some(p), Some(step)) = (parent, code.last_step()) {
            self.nodes[p].children[step.bit() as usize] = Some(index);
        }
        self.index_by_code.insert(code, index);
        Ok(index)
    }

    /// The stored node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn node(&self, index: usize) -> &BinaryTreeNode<N> {
        &self.nodes[index]
    }

    /// Look up a node index by its path code.
    #[must_use]
    pub fn index_for_code(&self, code: &Treecode) -> Option<usize> {
        self.index_by_code.get(code).copied()
    }

    /// The path code of the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn code_from_node(&self, index: usize) -> &Treecode {
        &self.nodes[index].code
    }

    /// The root node's index, if the tree is non-empty.
    #[must_use]
    pub fn root_node(&self) -> Option<usize> {
        self.index_by_code.get(&Treecode::new()).copied()
    }

    /// The node indices along the tree path from `source` to `destination`,
    /// inclusive of both endpoints: up to the lowest common ancestor, then
    /// down.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpaceNotInTree`] if the recorded child links do not
    /// cover the path (a malformed tree).
    pub fn path(&self, source: usize, destination: usize) -> Result<Vec<usize>> {
        let src_code = &self.nodes[source].code;
        let dst_code = &self.nodes[destination].code;
        let shared = src_code.common_prefix_len(dst_code);

        let mut indices = vec![source];
        let mut at = source;
        while self.nodes[at].code.code_length() > shared {
            let parent = self.nodes[at]
                .parent
                .ok_or_else(|| Error::SpaceNotInTree(self.nodes[at].code.to_string()))?;
            indices.push(parent);
            at = parent;
        }
        while self.nodes[at].code.code_length() < dst_code.code_length() {
            let step = self.nodes[at]
                .code
                .next_step_towards(dst_code)
                .ok_or_else(|| Error::SpaceNotInTree(dst_code.to_string()))?;
            let child = self.nodes[at].children[step.bit() as usize]
                .ok_or_else(|| Error::SpaceNotInTree(dst_code.to_string()))?;
            indices.push(child);
            at = child;
        }
        Ok(indices)
    }

    /// Freeze the tree: all further [`BinaryTree::put`] calls fail.
    ///
    /// Callers holding node indices rely on the storage no longer changing.
    pub fn lock_pointers(&mut self) {
        self.locked = true;
    }

    /// Whether the tree has been locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl<N: fmt::Display> BinaryTree<N> {
    /// Render the tree in Graphviz dot form, for diagnostics.
    #[must_use]
    pub fn to_dot(&self) -> String {
        use fmt::Write as _;

        let mut out = String::from("digraph temporal_tree {\n");
        for (i, node) in self.nodes.iter().enumerate() {
            let _ = writeln!(out, "  n{i} [label=\"{} @ {}\"];", node.data, node.code);
        }
        for (i, node) in self.nodes.iter().enumerate() {
            for (bit, child) in node.children.iter().enumerate() {
                if let Some(c) = child {
                    let _ = writeln!(out, "  n{i} -> n{c} [label=\"{bit}\"];");
                }
            }
        }
        out.push_str("}\n");
        out
    }
}
