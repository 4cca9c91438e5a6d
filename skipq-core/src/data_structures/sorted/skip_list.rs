use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use log::{debug, trace};

use crate::config::{LEVEL_INCREMENT, SkipListConfig};
use crate::data_structures::comparator::{Comparator, NaturalOrder};
use crate::data_structures::internal::{HEAD, NodeArena, NodeId, TAIL};

// =============================================================================
// SKIP LIST LAYOUT
// =============================================================================
//
// Nodes live in a NodeArena and refer to each other by index. Every level is a
// doubly linked list running from HEAD to TAIL:
//
// Level 2:  HEAD ◄──────────────────────────────► 30 ◄─────────────► TAIL
// Level 1:  HEAD ◄────────► 10 ◄────────────────► 30 ◄─────────────► TAIL
// Level 0:  HEAD ◄────────► 10 ◄──► 20 ◄──► 20 ◄► 30 ◄──► 40 ◄─────► TAIL
//
// INVARIANTS (hold whenever no &mut method is running):
// 1. Every level is sorted (non-decreasing) under the comparator
// 2. Level i+1 is a subsequence of level i
// 3. For every node n and level i < n.height: n.next(i).prev(i) == n
// 4. Level 0 holds exactly `len` real nodes
// 5. HEAD and TAIL are linked at every level below their array length
// 6. `last_found` is HEAD or a node linked at level 0
//
// Equal values are kept side by side. A new value is placed after every
// existing equal value, so polling drains equal values in insertion order.
//
// HEIGHT
// ─────────────────────────────────────────────────────────────────────────────
// `height` is the logical number of active levels. It may only grow by one
// above its current value per insert, and only once the list holds more than
// 2^height elements. A delete that leaves fewer than 2^height elements
// shrinks it by one. Sentinel arrays are grown in steps of LEVEL_INCREMENT
// and are never shrunk; nodes taller than the current height stay linked at
// their upper levels, which is harmless because searches never need them.
//
// =============================================================================

/// Single-threaded skip list engine.
///
/// Holds values in ascending order under a [`Comparator`], allows duplicates,
/// and keeps a last-found hint so that searches for nearby keys start close
/// to the previous result.
///
/// All mutating operations take `&mut self`; searches do too, because they
/// update the hint. [`ConcurrentSkipList`](super::ConcurrentSkipList) puts
/// this type behind a lock.
///
pub struct SkipList<T, C = NaturalOrder> {
    arena: NodeArena<T>,
    comparator: C,
    height: usize,
    len: usize,
    last_found: NodeId,
    max_height: usize,
    rng: fastrand::Rng,
}

impl<T: Ord> SkipList<T> {
    /// Create an empty list ordered by `Ord`.
    pub fn new() -> Self {
        Self::with_config_and_comparator(SkipListConfig::default(), NaturalOrder)
    }
}

impl<T: Ord> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> SkipList<T, C> {
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_config_and_comparator(SkipListConfig::default(), comparator)
    }

    pub fn with_config_and_comparator(config: SkipListConfig, comparator: C) -> Self {
        let rng = match config.seed() {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        debug!(
            "creating skip list: max_height={}, seed={:?}",
            config.max_height(),
            config.seed()
        );

        SkipList {
            arena: NodeArena::new(LEVEL_INCREMENT),
            comparator,
            height: 1,
            len: 0,
            last_found: HEAD,
            max_height: config.max_height(),
            rng,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of active levels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Compare a node against a probe key.
    ///
    /// HEAD is below every key and TAIL above; the only keyless nodes a search
    /// can reach are the two sentinels.
    #[inline]
    fn compare_node(&self, id: NodeId, key: &T) -> Ordering {
        match self.arena.key(id) {
            Some(value) => self.comparator.compare(value, key),
            None if id == HEAD => Ordering::Less,
            None => Ordering::Greater,
        }
    }

    /// Find the last level-0 node whose value is `<= key`.
    ///
    /// Returns an equal node as soon as one is seen at any level, or the
    /// predecessor of `key`'s position (HEAD when every value is greater).
    ///
    /// The descent starts from `last_found` instead of HEAD when that node is
    /// below `key`. Every lower level is still walked, so the hint only saves
    /// work and never changes the result.
    fn locate(&mut self, key: &T) -> NodeId {
        let mut node = HEAD;
        let mut level = self.height;

        if self.last_found != HEAD {
            match self.compare_node(self.last_found, key) {
                Ordering::Equal => return self.last_found,
                Ordering::Less => {
                    node = self.last_found;
                    level = self.arena.node(node).height();
                }
                Ordering::Greater => {}
            }
        }

        while level > 0 {
            level -= 1;
            loop {
                let next = self.arena.node(node).next(level);
                match self.compare_node(next, key) {
                    Ordering::Less => node = next,
                    Ordering::Equal => {
                        self.last_found = next;
                        return next;
                    }
                    Ordering::Greater => break,
                }
            }
        }

        self.last_found = node;
        node
    }

    /// First level-0 node whose value is `>= key`, TAIL if none.
    ///
    /// Unlike `locate` this always lands on the first of several equal values
    /// and leaves the hint alone.
    fn lower_bound(&self, key: &T) -> NodeId {
        let mut node = HEAD;
        for level in (0..self.height).rev() {
            loop {
                let next = self.arena.node(node).next(level);
                if self.compare_node(next, key) == Ordering::Less {
                    node = next;
                } else {
                    break;
                }
            }
        }
        self.arena.node(node).next(0)
    }

    /// Locate an element equal to `key`.
    fn find_equal(&mut self, key: &T) -> Option<NodeId> {
        let node = self.locate(key);
        (self.compare_node(node, key) == Ordering::Equal).then_some(node)
    }

    pub fn contains(&mut self, key: &T) -> bool {
        self.find_equal(key).is_some()
    }

    /// Number of elements equal to `key`.
    pub fn count_of(&self, key: &T) -> usize {
        self.range_from(key)
            .take_while(|value| self.comparator.compare(value, key) == Ordering::Equal)
            .count()
    }

    /// Run `f` on an element equal to `key`.
    pub fn find_and_apply<F, R>(&mut self, key: &T, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        let node = self.find_equal(key)?;
        self.arena.key(node).map(f)
    }

    pub fn first(&self) -> Option<&T> {
        self.arena.key(self.arena.node(HEAD).next(0))
    }

    pub fn last(&self) -> Option<&T> {
        self.arena.key(self.arena.node(TAIL).prev(0))
    }

    // =========================================================================
    // Leveling
    // =========================================================================

    /// Draw the height of a new node.
    ///
    /// The draw is uniform over `1..=height`, widened by one level while the
    /// list holds more than 2^height elements and is below `max_height`.
    /// Drawing above the current height raises it; sentinel arrays grow with
    /// it when they are too short.
    fn random_height(&mut self) -> usize {
        let mut max_allowed = self.height;
        if self.height < self.max_height && (1u64 << self.height) < self.len as u64 {
            max_allowed += 1;
        }

        let new_height = self.rng.usize(1..=max_allowed);
        if new_height > self.height {
            trace!(
                "skip list height {} -> {} at len {}",
                self.height, new_height, self.len
            );
            self.height = new_height;

            if self.arena.sentinel_height() < new_height {
                let grown = self.arena.grow_sentinels(new_height);
                trace!("sentinel levels grown to {}", grown);
            }
        }
        new_height
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Insert `value` after every element that compares equal to it.
    pub fn insert(&mut self, value: T) {
        let mut pred = self.locate(&value);

        // `locate` may stop on the first equal node it meets at an upper level.
        loop {
            let next = self.arena.node(pred).next(0);
            if self.compare_node(next, &value) == Ordering::Equal {
                pred = next;
            } else {
                break;
            }
        }

        let height = self.random_height();
        let node = self.arena.alloc(value, height);

        for level in 0..height {
            // The level-(i-1) predecessor may be too short for level i: walk
            // back along level i-1 to the nearest node that reaches level i.
            // HEAD always does, since its arrays cover the list height.
            while self.arena.node(pred).height() <= level {
                pred = self.arena.node(pred).prev(level - 1);
            }
            let succ = self.arena.node(pred).next(level);
            self.arena.link(pred, node, succ, level);
        }

        self.len += 1;
    }

    /// Detach `node` from every level and return its value.
    fn unlink(&mut self, node: NodeId) -> Option<T> {
        debug_assert!(node != HEAD && node != TAIL);

        for level in 0..self.arena.node(node).height() {
            self.arena.bypass(node, level);
        }

        self.last_found = HEAD;
        self.len -= 1;

        if self.height > 1 && (1u64 << self.height) > self.len as u64 {
            self.height -= 1;
            trace!(
                "skip list height {} -> {} at len {}",
                self.height + 1,
                self.height,
                self.len
            );
        }

        self.arena.release(node)
    }

    /// Remove one element equal to `key` and return it.
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let node = self.find_equal(key)?;
        self.unlink(node)
    }

    /// Remove and return the smallest element.
    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.arena.node(HEAD).next(0);
        if first == TAIL {
            return None;
        }
        self.unlink(first)
    }

    pub fn clear(&mut self) {
        debug!("clearing skip list with {} elements", self.len);
        self.arena.reset();
        self.height = 1;
        self.len = 0;
        self.last_found = HEAD;
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Ascending iterator over all elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            current: self.arena.node(HEAD).next(0),
            remaining: self.len,
        }
    }

    /// Ascending iterator over the elements `>= key`.
    pub fn range_from(&self, key: &T) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            current: self.lower_bound(key),
            remaining: self.len,
        }
    }
}

impl<T, C: Comparator<T>> Extend<T> for SkipList<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

impl<'a, T, C: Comparator<T>> IntoIterator for &'a SkipList<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, C: Comparator<T>> fmt::Debug for SkipList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// ============================================================================
// Iter - Borrowing level-0 walk
// ============================================================================

pub struct Iter<'a, T> {
    arena: &'a NodeArena<T>,
    current: NodeId,
    /// Upper bound on the elements left to yield.
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == TAIL {
            return None;
        }
        let node = self.arena.node(self.current);
        self.current = node.next(0);
        self.remaining = self.remaining.saturating_sub(1);
        node.key()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.current == TAIL {
            (0, Some(0))
        } else {
            (1, Some(self.remaining))
        }
    }
}

impl<T> FusedIterator for Iter<'_, T> {}
