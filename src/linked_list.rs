//! LinkedList: singly linked bucket chain over a generational node arena.
//!
//! Nodes are stored in a `SlotMap` owned by the list. `head`, `tail` and
//! every `next` link are stable handles into that arena, so the chain has
//! no pointer cycles and removal only re-points handles.

use core::fmt;
use slotmap::{DefaultKey, SlotMap};

use crate::error::ListError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
struct NodeId(DefaultKey);

/// A key/value record linked into exactly one list.
#[derive(Debug)]
pub struct Node<V> {
    key: String,
    value: V,
    next: Option<NodeId>,
}

// A clone is detached: its link would point into the source list's arena.
impl<V: Clone> Clone for Node<V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            next: None,
        }
    }
}

impl<V> Node<V> {
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            value,
            next: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}

pub struct LinkedList<V> {
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
    nodes: SlotMap<DefaultKey, Node<V>>, // arena; links are handles into it
}

impl<V> Default for LinkedList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LinkedList<V> {
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            nodes: SlotMap::with_key(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<&Node<V>> {
        self.head.and_then(|id| self.nodes.get(id.0))
    }

    pub fn tail(&self) -> Option<&Node<V>> {
        self.tail.and_then(|id| self.nodes.get(id.0))
    }

    /// Appends `node` at the tail in O(1).
    pub fn append(&mut self, mut node: Node<V>) {
        node.next = None;
        let id = NodeId(self.nodes.insert(node));
        match self.tail.and_then(|t| self.nodes.get_mut(t.0)) {
            Some(tail) => tail.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
    }

    /// Removes and returns the node at 0-based `index`.
    ///
    /// Fails with `ListError::OutOfRange` when `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<Node<V>, ListError> {
        if index >= self.len {
            return Err(ListError::OutOfRange {
                index,
                len: self.len,
            });
        }

        let target = if index == 0 {
            let head = self
                .head
                .ok_or(ListError::BrokenLinks("non-empty list has no head"))?;
            self.head = self.nodes.get(head.0).and_then(|n| n.next);
            if self.len == 1 {
                self.tail = None;
            }
            head
        } else {
            let prev = self
                .id_at(index - 1)
                .ok_or(ListError::BrokenLinks("chain is shorter than len"))?;
            let target = self
                .nodes
                .get(prev.0)
                .and_then(|n| n.next)
                .ok_or(ListError::BrokenLinks("chain is shorter than len"))?;
            let after = self.nodes.get(target.0).and_then(|n| n.next);
            if let Some(p) = self.nodes.get_mut(prev.0) {
                p.next = after;
            }
            if index == self.len - 1 {
                self.tail = Some(prev);
            }
            target
        };

        let mut node = self
            .nodes
            .remove(target.0)
            .ok_or(ListError::BrokenLinks("dangling node handle"))?;
        node.next = None;
        self.len -= 1;
        Ok(node)
    }

    /// Walks from the head calling `pred(node, index)` and returns the first
    /// node it accepts.
    ///
    /// The predicate may capture and mutate outside state; returning `false`
    /// for every node turns this into a full in-order traversal.
    pub fn search<'a, F>(&'a self, mut pred: F) -> Option<&'a Node<V>>
    where
        F: FnMut(&'a Node<V>, usize) -> bool,
    {
        let mut current = self.head;
        let mut index = 0;
        while let Some(id) = current {
            let node = self.nodes.get(id.0)?;
            if pred(node, index) {
                return Some(node);
            }
            current = node.next;
            index += 1;
        }
        None
    }

    /// Mutable counterpart of [`search`](Self::search).
    pub fn search_mut<F>(&mut self, mut pred: F) -> Option<&mut Node<V>>
    where
        F: FnMut(&Node<V>, usize) -> bool,
    {
        let mut current = self.head;
        let mut index = 0;
        let found = loop {
            let id = current?;
            let node = self.nodes.get(id.0)?;
            if pred(node, index) {
                break id;
            }
            current = node.next;
            index += 1;
        };
        self.nodes.get_mut(found.0)
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Checks the structural invariants: emptiness agrees across head, tail
    /// and len; the walk from head reaches tail in exactly `len` steps; the
    /// arena holds no unlinked nodes.
    pub fn validate(&self) -> Result<(), ListError> {
        match (self.head, self.tail, self.len) {
            (None, None, 0) => {
                return if self.nodes.is_empty() {
                    Ok(())
                } else {
                    Err(ListError::BrokenLinks("empty list still owns nodes"))
                };
            }
            (Some(_), Some(_), n) if n > 0 => {}
            _ => {
                return Err(ListError::BrokenLinks(
                    "head, tail and len disagree on emptiness",
                ))
            }
        }

        let mut current = self.head;
        let mut last = None;
        let mut steps = 0;
        while let Some(id) = current {
            steps += 1;
            if steps > self.len {
                return Err(ListError::BrokenLinks("chain is longer than len"));
            }
            let node = self
                .nodes
                .get(id.0)
                .ok_or(ListError::BrokenLinks("dangling node handle"))?;
            last = Some(id);
            current = node.next;
        }
        if steps != self.len {
            return Err(ListError::BrokenLinks("chain is shorter than len"));
        }
        if last != self.tail {
            return Err(ListError::BrokenLinks("walk from head does not end at tail"));
        }
        if self.nodes.len() != self.len {
            return Err(ListError::BrokenLinks("arena holds unlinked nodes"));
        }
        Ok(())
    }

    fn id_at(&self, index: usize) -> Option<NodeId> {
        let mut current = self.head;
        for _ in 0..index {
            current = self.nodes.get(current?.0)?.next;
        }
        current
    }
}

impl<V: Clone> Clone for LinkedList<V> {
    fn clone(&self) -> Self {
        let mut out = Self::new();
        for node in self {
            out.append(node.clone());
        }
        out
    }
}

impl<V: fmt::Debug> fmt::Debug for LinkedList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|n| (n.key(), n.value())))
            .finish()
    }
}

/// Iterator over the nodes of a `LinkedList`, head to tail.
pub struct Iter<'a, V> {
    list: &'a LinkedList<V>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Node<V>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.nodes.get(self.next?.0)?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a LinkedList<V> {
    type Item = &'a Node<V>;
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator that detaches nodes from the head.
pub struct IntoIter<V> {
    list: LinkedList<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = Node<V>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.list.remove_at(0).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<V> IntoIterator for LinkedList<V> {
    type Item = Node<V>;
    type IntoIter = IntoIter<V>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}
