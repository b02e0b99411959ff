//! The space graph: every (item, space) pair in a composition, keyed by
//! treecode.
//!
//! [`build_temporal_tree`] expands an item tree into a binary tree whose
//! nodes are [`SpaceNode`]s. Internal spaces of one item chain down the
//! `left` side; each child of a container hangs off a `right`-appended
//! wrapper node, with the child's own spaces below the wrapper on the
//! `left`. That convention makes the path between any two spaces a plain
//! treecode walk, and the composed topology along it the answer to "what
//! does this ordinate correspond to over there".

use std::collections::HashMap;

use crate::item::ItemRef;
use crate::space::{SpaceLabel, SpaceNode};
use crate::treecode::{BinaryTree, BinaryTreeNode, Step, Treecode};
use crate::{Error, Ordinate, Result, Topology};

/// The expanded space graph of one composition tree.
///
/// After construction the tree is pointer-locked: storage is stable and
/// callers may hold node indices and codes for its whole life.
#[derive(Debug)]
pub struct TemporalTree<'a> {
    tree: BinaryTree<SpaceNode<'a>>,
    map_node_to_index: HashMap<SpaceNode<'a>, usize>,
}

/// Expand the composition below `root` into its space graph.
///
/// # Errors
///
/// Returns [`Error::SpaceAlreadyInTree`] if the same item appears twice in
/// the composition (an aliased or malformed tree).
pub fn build_temporal_tree(root: SpaceNode<'_>) -> Result<TemporalTree<'_>> {
    let mut building = TemporalTree {
        tree: BinaryTree::new(),
        map_node_to_index: HashMap::new(),
    };
    let mut work: Vec<(ItemRef<'_>, Treecode)> = vec![(root.item, Treecode::new())];

    while let Some((item, parent_code)) = work.pop() {
        let last_internal = building.walk_internal_spaces(item, parent_code)?;
        building.walk_child_spaces(item, &last_internal, &mut work)?;
    }

    building.tree.lock_pointers();
    Ok(building)
}

impl<'a> TemporalTree<'a> {
    /// Insert each of the item's local spaces: the first at `parent_code`
    /// itself, each subsequent one a `left` step below the previous.
    /// Returns the last internal space's code.
    fn walk_internal_spaces(
        &mut self,
        item: ItemRef<'a>,
        parent_code: Treecode,
    ) -> Result<Treecode> {
        let mut code = parent_code;
        for (i, &label) in item.available_local_spaces().iter().enumerate() {
            if i > 0 {
                code = code.append(Step::Left);
            }
            self.insert(code.clone(), SpaceNode { item, label })?;
        }
        Ok(code)
    }

    /// Insert one `right`-appended wrapper per child and queue the child's
    /// own spaces a `left` step below its wrapper.
    fn walk_child_spaces(
        &mut self,
        item: ItemRef<'a>,
        last_internal: &Treecode,
        work: &mut Vec<(ItemRef<'a>, Treecode)>,
    ) -> Result<()> {
        let mut wrapper_code = last_internal.clone();
        for (i, child) in item.children_refs().into_iter().enumerate() {
            wrapper_code = wrapper_code.append(Step::Right);
            self.insert(
                wrapper_code.clone(),
                SpaceNode {
                    item,
                    label: SpaceLabel::Child(i),
                },
            )?;
            work.push((child, wrapper_code.append(Step::Left)));
        }
        Ok(())
    }

    fn insert(&mut self, code: Treecode, node: SpaceNode<'a>) -> Result<usize> {
        if self.map_node_to_index.contains_key(&node) {
            return Err(Error::SpaceAlreadyInTree(node.to_string()));
        }
        let index = self.tree.put(code, node)?;
        self.map_node_to_index.insert(node, index);
        Ok(index)
    }

    /// The number of space nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The number of distinct space nodes registered. Always equals
    /// [`TemporalTree::len`] for a well-formed tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.map_node_to_index.len()
    }

    /// The tree index of a space node.
    #[must_use]
    pub fn index_of(&self, node: &SpaceNode<'a>) -> Option<usize> {
        self.map_node_to_index.get(node).copied()
    }

    /// The path code of a space node.
    #[must_use]
    pub fn code_of(&self, node: &SpaceNode<'a>) -> Option<&Treecode> {
        self.index_of(node).map(|i| self.tree.code_from_node(i))
    }

    /// The stored node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn node(&self, index: usize) -> &BinaryTreeNode<SpaceNode<'a>> {
        self.tree.node(index)
    }

    /// The root space node's index.
    #[must_use]
    pub fn root(&self) -> Option<usize> {
        self.tree.root_node()
    }

    /// The node indices along the tree path from `source` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpaceNotInTree`] if either endpoint is not in the
    /// graph.
    pub fn path_between(
        &self,
        source: &SpaceNode<'a>,
        destination: &SpaceNode<'a>,
    ) -> Result<Vec<usize>> {
        let src = self
            .index_of(source)
            .ok_or_else(|| Error::SpaceNotInTree(source.to_string()))?;
        let dst = self
            .index_of(destination)
            .ok_or_else(|| Error::SpaceNotInTree(destination.to_string()))?;
        self.tree.path(src, dst)
    }

    /// The composed topology carrying ordinates in `source`'s space to
    /// `destination`'s space.
    ///
    /// Walks up from the source to the lowest common ancestor (inverting
    /// that leg's composed mapping once), then joins the one-step
    /// topologies down to the destination.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpaceNotInTree`] for unknown endpoints and
    /// [`Error::NotInvertible`] when the upward leg crosses a
    /// non-invertible mapping (a freeze or a staircase).
    pub fn topology_between(
        &self,
        source: &SpaceNode<'a>,
        destination: &SpaceNode<'a>,
    ) -> Result<Topology> {
        let src = self
            .index_of(source)
            .ok_or_else(|| Error::SpaceNotInTree(source.to_string()))?;
        let dst = self
            .index_of(destination)
            .ok_or_else(|| Error::SpaceNotInTree(destination.to_string()))?;
        let dst_code = self.tree.code_from_node(dst).clone();
        let shared = self
            .tree
            .code_from_node(src)
            .common_prefix_len(&dst_code);

        // Climb to the LCA, collecting each parent's downward topology.
        let mut downward_leg = Vec::new();
        let mut at = src;
        while self.tree.code_from_node(at).code_length() > shared {
            let here = self.tree.node(at);
            let (Some(parent), Some(step)) = (here.parent, here.code.last_step()) else {
                return Err(Error::SpaceNotInTree(here.code.to_string()));
            };
            let above = self.tree.node(parent);
            downward_leg.push(above.data.item.step_topology(above.data.label, step)?);
            at = parent;
        }
        downward_leg.reverse();
        let mut lca_to_source = Topology::identity_infinite();
        for edge in &downward_leg {
            lca_to_source = Topology::join(&lca_to_source, edge)?;
        }
        let mut topology = invert_single(&lca_to_source)?;

        // Descend from the LCA to the destination.
        while self.tree.code_from_node(at).code_length() < dst_code.code_length() {
            let here = self.tree.node(at);
            let Some(step) = here.code.next_step_towards(&dst_code) else {
                return Err(Error::SpaceNotInTree(dst_code.to_string()));
            };
            let edge = here.data.item.step_topology(here.data.label, step)?;
            topology = Topology::join(&topology, &edge)?;
            at = here.children[step.bit() as usize]
                .ok_or_else(|| Error::SpaceNotInTree(dst_code.to_string()))?;
        }
        Ok(topology)
    }

    /// Carry one ordinate from `source`'s space into `destination`'s.
    ///
    /// # Errors
    ///
    /// Propagates [`TemporalTree::topology_between`] errors, plus
    /// [`Error::OutOfBounds`] when `ord` is outside the composed mapping.
    pub fn project_instantaneous(
        &self,
        source: &SpaceNode<'a>,
        destination: &SpaceNode<'a>,
        ord: Ordinate,
    ) -> Result<Ordinate> {
        self.topology_between(source, destination)?
            .project_instantaneous_cc(ord)
    }

    /// Whether the graph has been pointer-locked. Always true after
    /// [`build_temporal_tree`] returns.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.tree.is_locked()
    }

    /// Render the space graph in Graphviz dot form, for diagnostics.
    #[must_use]
    pub fn to_dot(&self) -> String {
        self.tree.to_dot()
    }
}

fn invert_single(topology: &Topology) -> Result<Topology> {
    let mut pieces = topology.invert();
    if pieces.len() == 1 {
        Ok(pieces.remove(0))
    } else {
        Err(Error::NotInvertible)
    }
}
