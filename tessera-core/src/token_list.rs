//! Arena-backed doubly linked list
//!
//! The rule pipeline replaces tokens in place many times per chunk. Nodes
//! live in a single arena and are linked by index, so splicing is a relink
//! and handles to untouched nodes stay valid across mutations. Handles carry
//! a generation counter so a handle to a removed node never aliases the node
//! that later reuses its slot.

use crate::token::Token;
use thiserror::Error;

/// Errors raised by list operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenListError {
    /// Pop on an empty list
    #[error("Underflow: cannot pop from an empty list")]
    Underflow,

    /// Handle refers to a removed node
    #[error("Stale node handle: index {index}, generation {generation}")]
    StaleNode { index: usize, generation: u32 },
}

/// Stable handle to a list node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    value: Option<T>,
    generation: u32,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly linked list with O(1) splice operations
#[derive(Debug, Clone)]
pub struct TokenList<T = Token> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for TokenList<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }
}

impl<T> TokenList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head.map(|index| self.id_at(index))
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail.map(|index| self.id_at(index))
    }

    fn id_at(&self, index: usize) -> NodeId {
        NodeId {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn check(&self, id: NodeId) -> Result<usize, TokenListError> {
        match self.slots.get(id.index) {
            Some(slot) if slot.generation == id.generation && slot.value.is_some() => Ok(id.index),
            _ => Err(TokenListError::StaleNode {
                index: id.index,
                generation: id.generation,
            }),
        }
    }

    fn allocate(&mut self, value: T, prev: Option<usize>, next: Option<usize>) -> usize {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.generation = slot.generation.wrapping_add(1);
            slot.value = Some(value);
            slot.prev = prev;
            slot.next = next;
            index
        } else {
            self.slots.push(Slot {
                value: Some(value),
                generation: 0,
                prev,
                next,
            });
            self.slots.len() - 1
        }
    }

    /// Add a value at the tail
    pub fn append(&mut self, value: T) -> NodeId {
        let index = self.allocate(value, self.tail, None);
        match self.tail {
            Some(tail) => self.slots[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.id_at(index)
    }

    /// Add a value at the head
    pub fn prepend(&mut self, value: T) -> NodeId {
        let index = self.allocate(value, None, self.head);
        match self.head {
            Some(head) => self.slots[head].prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
        self.id_at(index)
    }

    /// Append every value of an iterator
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.append(value);
        }
    }

    /// Insert `value` immediately before `reference`
    pub fn insert_left(&mut self, value: T, reference: NodeId) -> Result<NodeId, TokenListError> {
        let reference = self.check(reference)?;
        let prev = self.slots[reference].prev;
        let index = self.allocate(value, prev, Some(reference));
        self.slots[reference].prev = Some(index);
        match prev {
            Some(prev) => self.slots[prev].next = Some(index),
            None => self.head = Some(index),
        }
        Ok(self.id_at(index))
    }

    /// Insert `value` immediately after `reference`
    pub fn insert_right(&mut self, value: T, reference: NodeId) -> Result<NodeId, TokenListError> {
        let reference = self.check(reference)?;
        let next = self.slots[reference].next;
        let index = self.allocate(value, Some(reference), next);
        self.slots[reference].next = Some(index);
        match next {
            Some(next) => self.slots[next].prev = Some(index),
            None => self.tail = Some(index),
        }
        Ok(self.id_at(index))
    }

    /// Unlink a node and return its value
    pub fn remove(&mut self, id: NodeId) -> Result<T, TokenListError> {
        let index = self.check(id)?;
        let (prev, next) = (self.slots[index].prev, self.slots[index].next);
        match prev {
            Some(prev) => self.slots[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.slots[next].prev = prev,
            None => self.tail = prev,
        }
        let slot = &mut self.slots[index];
        slot.prev = None;
        slot.next = None;
        let value = slot.value.take().ok_or(TokenListError::StaleNode {
            index: id.index,
            generation: id.generation,
        })?;
        self.free.push(index);
        self.len -= 1;
        Ok(value)
    }

    /// Remove and return the last value
    pub fn pop(&mut self) -> Result<T, TokenListError> {
        let tail = self.tail().ok_or(TokenListError::Underflow)?;
        self.remove(tail)
    }

    /// Remove and return the first value
    pub fn pop_front(&mut self) -> Result<T, TokenListError> {
        let head = self.head().ok_or(TokenListError::Underflow)?;
        self.remove(head)
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.check(id).ok().and_then(|index| self.slots[index].value.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let index = self.check(id).ok()?;
        self.slots[index].value.as_mut()
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        let index = self.check(id).ok()?;
        self.slots[index].next.map(|next| self.id_at(next))
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        let index = self.check(id).ok()?;
        self.slots[index].prev.map(|prev| self.id_at(prev))
    }

    /// First node after `start` satisfying `key`, skipping nodes matched by `ignore`
    pub fn next_matching<P, I>(&self, start: NodeId, key: P, ignore: Option<I>) -> Option<NodeId>
    where
        P: Fn(&T) -> bool,
        I: Fn(&T) -> bool,
    {
        let mut current = self.next(start);
        while let Some(id) = current {
            let value = self.get(id)?;
            let ignored = ignore.as_ref().is_some_and(|ignore| ignore(value));
            if !ignored && key(value) {
                return Some(id);
            }
            current = self.next(id);
        }
        None
    }

    /// Last node before `start` satisfying `key`, skipping nodes matched by `ignore`
    pub fn previous_matching<P, I>(
        &self,
        start: NodeId,
        key: P,
        ignore: Option<I>,
    ) -> Option<NodeId>
    where
        P: Fn(&T) -> bool,
        I: Fn(&T) -> bool,
    {
        let mut current = self.prev(start);
        while let Some(id) = current {
            let value = self.get(id)?;
            let ignored = ignore.as_ref().is_some_and(|ignore| ignore(value));
            if !ignored && key(value) {
                return Some(id);
            }
            current = self.prev(id);
        }
        None
    }

    /// Snapshot of all handles in list order
    ///
    /// Rules iterate over a snapshot so that nodes inserted while
    /// processing a node are not visited by the same rule.
    pub fn ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.len);
        let mut current = self.head;
        while let Some(index) = current {
            ids.push(self.id_at(index));
            current = self.slots[index].next;
        }
        ids
    }

    /// Values in list order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Consume the list, returning its values in order
    pub fn into_vec(mut self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len);
        let mut current = self.head;
        while let Some(index) = current {
            current = self.slots[index].next;
            if let Some(value) = self.slots[index].value.take() {
                values.push(value);
            }
        }
        values
    }
}

impl<T: Clone> TokenList<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> FromIterator<T> for TokenList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// Borrowing iterator over list values
pub struct Iter<'a, T> {
    list: &'a TokenList<T>,
    current: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current?;
        let slot = &self.list.slots[index];
        self.current = slot.next;
        slot.value.as_ref()
    }
}

impl<'a, T> IntoIterator for &'a TokenList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
