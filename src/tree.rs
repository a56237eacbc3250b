use crate::error::{BreedError, Result};
use crate::types::{Individual, Sex};

/// Handle to a node stored in a [`BreedingTree`] arena.
///
/// Carries the generation of its slot, so a handle to a removed node stays
/// invalid after the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// The two parents of a bred node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentPair {
    pub male: NodeId,
    pub female: NodeId,
}

#[derive(Debug, Clone)]
struct Node {
    individual: Individual,
    parents: Option<ParentPair>,
    child: Option<NodeId>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Ancestor tree rooted at a target individual.
///
/// Nodes live in an arena; a node owns its parents through `parents` and
/// points back to its offspring through the non-owning `child` handle.
/// Either both parents are set or neither. Removing a subtree frees its
/// slots for reuse; handles to removed nodes resolve to `UnknownNode`.
#[derive(Debug, Clone)]
pub struct BreedingTree {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
}

impl BreedingTree {
    pub fn new(root: Individual) -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node {
                    individual: root,
                    parents: None,
                    child: None,
                }),
            }],
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    /// Builds a tree whose root is `child`, bred from the roots of two existing trees
    pub fn join(child: Individual, male: &BreedingTree, female: &BreedingTree) -> Result<Self> {
        let mut tree = Self::new(child);
        let root = tree.root;
        let male_root = tree.graft(male, male.root, root)?;
        let female_root = tree.graft(female, female.root, root)?;
        tree.link(root, male_root, female_root)?;
        Ok(tree)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.slots
            .get(id.index)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
            .ok_or(BreedError::UnknownNode(id.index))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
            .ok_or(BreedError::UnknownNode(id.index))
    }

    pub fn individual(&self, id: NodeId) -> Result<&Individual> {
        Ok(&self.node(id)?.individual)
    }

    pub(crate) fn individual_mut(&mut self, id: NodeId) -> Result<&mut Individual> {
        Ok(&mut self.node_mut(id)?.individual)
    }

    pub fn parents(&self, id: NodeId) -> Option<ParentPair> {
        self.node(id).ok().and_then(|n| n.parents)
    }

    pub fn parent_male(&self, id: NodeId) -> Option<NodeId> {
        self.parents(id).map(|p| p.male)
    }

    pub fn parent_female(&self, id: NodeId) -> Option<NodeId> {
        self.parents(id).map(|p| p.female)
    }

    pub fn child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok().and_then(|n| n.child)
    }

    /// A wild node has no parents and must be caught or sourced directly
    pub fn is_wild(&self, id: NodeId) -> bool {
        self.node(id).map(|n| n.parents.is_none()).unwrap_or(false)
    }

    /// Number of generations between `id` and the root
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(child) = self.child(current) {
            depth += 1;
            current = child;
        }
        depth
    }

    fn alloc(&mut self, individual: Individual, child: Option<NodeId>) -> NodeId {
        let node = Node {
            individual,
            parents: None,
            child,
        };
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    fn link(&mut self, id: NodeId, male: NodeId, female: NodeId) -> Result<ParentPair> {
        let pair = ParentPair { male, female };
        self.node_mut(id)?.parents = Some(pair);
        Ok(pair)
    }

    /// Attaches two fresh parents to a leaf node.
    ///
    /// Fails with `AlreadyParented` if the node already has parents and with
    /// `IncompatiblePair` unless `male` is Male and `female` is Female.
    pub fn attach_parents(
        &mut self,
        id: NodeId,
        male: Individual,
        female: Individual,
    ) -> Result<ParentPair> {
        let node = self.node(id)?;
        if node.parents.is_some() {
            return Err(BreedError::AlreadyParented(node.individual.id().to_string()));
        }
        if male.sex() != Sex::Male || female.sex() != Sex::Female {
            return Err(BreedError::IncompatiblePair(format!(
                "expected (m) and (f) parents, got {} and {}",
                male.sex().marker(),
                female.sex().marker()
            )));
        }

        let male_id = self.alloc(male, Some(id));
        let female_id = self.alloc(female, Some(id));
        self.link(id, male_id, female_id)
    }

    /// Discards the whole ancestor subtree of `id`, returning it to leaf state.
    /// Returns the number of removed nodes.
    pub fn reset(&mut self, id: NodeId) -> Result<usize> {
        let parents = self.node_mut(id)?.parents.take();
        let Some(pair) = parents else {
            return Ok(0);
        };

        let mut removed = 0;
        let mut stack = vec![pair.male, pair.female];
        while let Some(current) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(current.index)
                .filter(|s| s.generation == current.generation)
            else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                if let Some(p) = node.parents {
                    stack.push(p.male);
                    stack.push(p.female);
                }
                self.free.push(current.index);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Pre-order walk from `start`: node, male ancestry, then female ancestry
    pub fn preorder(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let Ok(node) = self.node(id) else {
                continue;
            };
            order.push(id);
            if let Some(p) = node.parents {
                stack.push(p.female);
                stack.push(p.male);
            }
        }
        order
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        self.preorder(self.root)
    }

    /// Every wild node, in pre-order
    pub fn leaves(&self) -> Vec<NodeId> {
        self.nodes()
            .into_iter()
            .filter(|id| self.is_wild(*id))
            .collect()
    }

    fn graft(&mut self, other: &BreedingTree, from: NodeId, child: NodeId) -> Result<NodeId> {
        let source = other.node(from)?;
        let id = self.alloc(source.individual.clone(), Some(child));
        if let Some(p) = source.parents {
            let male = self.graft(other, p.male, id)?;
            let female = self.graft(other, p.female, id)?;
            self.link(id, male, female)?;
        }
        Ok(id)
    }

    /// Indented text rendering of the tree, one label per line
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for id in self.nodes() {
            if let Ok(individual) = self.individual(id) {
                let marker = if self.is_wild(id) { " [wild]" } else { "" };
                out.push_str(&"  ".repeat(self.depth(id)));
                out.push_str(&individual.label());
                out.push_str(marker);
                out.push('\n');
            }
        }
        out
    }
}
