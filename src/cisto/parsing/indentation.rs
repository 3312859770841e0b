//! Indentation resolution
//!
//! While parsing, elements live in an arena and refer to their parent by index. The
//! parent link is only ever used to walk up the ancestor chain when a line is dedented;
//! it never owns anything and disappears when the arena is folded into the final tree.
//!
//! Algorithm
//!
//!     Given the current element and the indentation of a new line:
//!     1. Deeper than the current element: the current element is the parent.
//!     2. Otherwise walk up from the current element, skipping every element whose indent
//!        is greater than or equal to the new one, and stop at the first shallower one.
//!        That element is the parent.
//!     3. The last skipped element becomes the new element's previous sibling, so it must
//!        sit at exactly the new indentation. A dedent that falls between two open depths
//!        (or an exhausted chain) is an unknown indentation.
//!
//!     Step 3 is stricter than a plain upward walk: `a\n    b\n  c` is rejected with
//!     "Element has unknown indentation 2" instead of making `c` a child of `a`.

use crate::cisto::ast::Element;

pub(crate) type NodeId = usize;

#[derive(Debug)]
struct Slot {
    element: Element,
    parent: Option<NodeId>,
}

/// Elements under construction, indexed by creation order.
///
/// Index 0 is always the synthetic root. A child is always created after its parent, so
/// every parent index is smaller than the indices of its children.
#[derive(Debug)]
pub(crate) struct NodeArena {
    slots: Vec<Slot>,
}

/// Reasons an indentation cannot be placed in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndentationError {
    /// The dedent lands between two open depths.
    Unknown(usize),
}

impl NodeArena {
    pub const ROOT: NodeId = 0;

    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                element: Element::root(),
                parent: None,
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn indent(&self, id: NodeId) -> i32 {
        self.slots[id].element.indent
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots[id].parent
    }

    pub fn element_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.slots[id].element
    }

    /// Creates a new element under `parent` and returns its id.
    pub fn append(&mut self, parent: NodeId, indent: i32) -> NodeId {
        self.slots.push(Slot {
            element: Element::new(indent),
            parent: Some(parent),
        });
        self.slots.len() - 1
    }

    /// Finds the parent for a new element at `indent`, starting from `current`.
    pub fn resolve_parent(&self, current: NodeId, indent: usize) -> Result<NodeId, IndentationError> {
        let depth = i32::try_from(indent).map_err(|_| IndentationError::Unknown(indent))?;

        if depth > self.indent(current) {
            return Ok(current);
        }

        let mut sibling = current;
        let mut candidate = current;
        while self.indent(candidate) >= depth {
            sibling = candidate;
            candidate = self
                .parent(candidate)
                .ok_or(IndentationError::Unknown(indent))?;
        }

        if self.indent(sibling) != depth {
            return Err(IndentationError::Unknown(indent));
        }
        Ok(candidate)
    }

    /// Folds the arena into an owned tree rooted at the synthetic root.
    pub fn into_tree(self) -> Element {
        let (mut elements, parents): (Vec<Option<Element>>, Vec<Option<NodeId>>) = self
            .slots
            .into_iter()
            .map(|slot| (Some(slot.element), slot.parent))
            .unzip();

        // Children have larger ids than their parents, so walking backwards completes every
        // subtree before it is attached. Children arrive in reverse and are flipped once.
        for id in (1..elements.len()).rev() {
            let (Some(mut element), Some(parent)) = (elements[id].take(), parents[id]) else {
                continue;
            };
            element.children.reverse();
            if let Some(parent) = elements[parent].as_mut() {
                parent.children.push(element);
            }
        }

        let mut root = elements
            .into_iter()
            .next()
            .flatten()
            .unwrap_or_else(Element::root);
        root.children.reverse();
        root
    }
}
