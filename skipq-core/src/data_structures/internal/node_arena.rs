use smallvec::{SmallVec, smallvec};

use crate::config::LEVEL_INCREMENT;

/// Index of a node inside a [`NodeArena`].
pub(crate) type NodeId = usize;

/// Head sentinel. Compares below every key.
pub(crate) const HEAD: NodeId = 0;
/// Tail sentinel. Compares above every key.
pub(crate) const TAIL: NodeId = 1;
/// Link value for the unused directions of the sentinels (head.backward, tail.forward).
pub(crate) const NIL: NodeId = usize::MAX;

type Links = SmallVec<[NodeId; LEVEL_INCREMENT]>;

// ============================================================================
// SkipNode - One element and its tower of links
// ============================================================================

/// A skip list node with forward and backward links at each of its levels.
///
/// Links are arena indices rather than pointers, so the node graph can be
/// cyclic (every link has a reverse partner) without shared ownership.
///
/// - `value` is `None` for the two sentinels and for vacated slots
/// - `forward.len() == backward.len() == height`
///
pub(crate) struct SkipNode<T> {
    value: Option<T>,
    forward: Links,
    backward: Links,
}

impl<T> SkipNode<T> {
    fn with_value(value: T, height: usize) -> Self {
        SkipNode {
            value: Some(value),
            forward: smallvec![NIL; height],
            backward: smallvec![NIL; height],
        }
    }

    fn sentinel(height: usize) -> Self {
        SkipNode {
            value: None,
            forward: smallvec![NIL; height],
            backward: smallvec![NIL; height],
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Number of levels this node participates in. For sentinels this is the
    /// length of the allocated level arrays, which may exceed the list height.
    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.forward.len()
    }

    #[inline]
    pub(crate) fn next(&self, level: usize) -> NodeId {
        self.forward[level]
    }

    #[inline]
    pub(crate) fn prev(&self, level: usize) -> NodeId {
        self.backward[level]
    }
}

// ============================================================================
// NodeArena - Slot table owning every node of one list
// ============================================================================

/// Growable node table with slot reuse.
///
/// Slots 0 and 1 always hold the head and tail sentinels. Released slots go
/// on a free list and are handed out again by [`NodeArena::alloc`].
///
pub(crate) struct NodeArena<T> {
    nodes: Vec<SkipNode<T>>,
    free: Vec<NodeId>,
}

impl<T> NodeArena<T> {
    /// Create an arena holding only the two sentinels, linked to each other
    /// at every one of their `sentinel_height` levels.
    pub(crate) fn new(sentinel_height: usize) -> Self {
        let mut arena = NodeArena {
            nodes: vec![
                SkipNode::sentinel(sentinel_height),
                SkipNode::sentinel(sentinel_height),
            ],
            free: Vec::new(),
        };
        arena.link_sentinels(0..sentinel_height);
        arena
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &SkipNode<T> {
        &self.nodes[id]
    }

    #[inline]
    pub(crate) fn key(&self, id: NodeId) -> Option<&T> {
        self.nodes[id].key()
    }

    /// Length of the sentinels' level arrays.
    #[inline]
    pub(crate) fn sentinel_height(&self) -> usize {
        self.nodes[HEAD].height()
    }

    /// Number of slots currently holding a real element.
    pub(crate) fn live(&self) -> usize {
        self.nodes.len() - 2 - self.free.len()
    }

    /// Store `value` in a fresh or recycled slot. The node starts unlinked.
    pub(crate) fn alloc(&mut self, value: T, height: usize) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = SkipNode::with_value(value, height);
                id
            }
            None => {
                self.nodes.push(SkipNode::with_value(value, height));
                self.nodes.len() - 1
            }
        }
    }

    /// Vacate an unlinked slot and hand back its value.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<T> {
        debug_assert!(id != HEAD && id != TAIL, "sentinels are never released");
        let node = &mut self.nodes[id];
        let value = node.value.take();
        node.forward.clear();
        node.backward.clear();
        self.free.push(id);
        value
    }

    /// Splice `node` between `pred` and `succ` at `level`.
    pub(crate) fn link(&mut self, pred: NodeId, node: NodeId, succ: NodeId, level: usize) {
        debug_assert_eq!(self.nodes[pred].forward[level], succ);
        debug_assert_eq!(self.nodes[succ].backward[level], pred);

        self.nodes[pred].forward[level] = node;
        self.nodes[succ].backward[level] = node;
        self.nodes[node].forward[level] = succ;
        self.nodes[node].backward[level] = pred;
    }

    /// Make the neighbours of `node` at `level` point past it.
    pub(crate) fn bypass(&mut self, node: NodeId, level: usize) {
        let pred = self.nodes[node].backward[level];
        let succ = self.nodes[node].forward[level];
        self.nodes[pred].forward[level] = succ;
        self.nodes[succ].backward[level] = pred;
    }

    /// Grow both sentinels so they cover at least `min_height` levels.
    ///
    /// Growth happens in whole steps of `LEVEL_INCREMENT`. Every new level is
    /// empty: head links straight to tail. Returns the new array length.
    pub(crate) fn grow_sentinels(&mut self, min_height: usize) -> usize {
        let old = self.sentinel_height();
        if old >= min_height {
            return old;
        }
        let new = min_height.div_ceil(LEVEL_INCREMENT) * LEVEL_INCREMENT;
        for sentinel in [HEAD, TAIL] {
            self.nodes[sentinel].forward.resize(new, NIL);
            self.nodes[sentinel].backward.resize(new, NIL);
        }
        self.link_sentinels(old..new);
        new
    }

    /// Drop every element and relink the sentinels at all allocated levels.
    /// The sentinels keep their grown level arrays.
    pub(crate) fn reset(&mut self) {
        self.nodes.truncate(2);
        self.free.clear();
        self.link_sentinels(0..self.sentinel_height());
    }

    fn link_sentinels(&mut self, levels: std::ops::Range<usize>) {
        for level in levels {
            self.nodes[HEAD].forward[level] = TAIL;
            self.nodes[TAIL].backward[level] = HEAD;
        }
    }
}
