/// Index-based doubly linked lists over slot map entries.
///
/// Items keep their `previous`/`next` keys, the owner keeps the
/// `first`/`last` keys. Insertion and removal are O(1) at any position and
/// iteration follows insertion order.

use slotmap::{Key, SlotMap};

/// Neighbour keys stored in a list item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Links<K: Key> {
    pub(crate) previous: Option<K>,
    pub(crate) next: Option<K>,
}

/// Item that can be part of exactly one list
pub(crate) trait Linked<K: Key> {
    fn links(&self) -> &Links<K>;
    fn links_mut(&mut self) -> &mut Links<K>;
}

/// First and last keys stored in the list owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct ListHead<K: Key> {
    pub(crate) first: Option<K>,
    pub(crate) last: Option<K>,
}

impl<K: Key> ListHead<K> {
    pub(crate) fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Link `key` before `before`, or at the end when `before` is `None`
    ///
    /// `key` must not be part of any list and `before` must be part of
    /// this one.
    pub(crate) fn insert<V: Linked<K>>(&mut self, items: &mut SlotMap<K, V>, key: K, before: Option<K>) {
        let previous = match before {
            Some(before) => items.get(before).and_then(|item| item.links().previous),
            None => self.last,
        };

        if let Some(item) = items.get_mut(key) {
            *item.links_mut() = Links { previous, next: before };
        }

        match previous.and_then(|previous| items.get_mut(previous)) {
            Some(item) => item.links_mut().next = Some(key),
            None => self.first = Some(key),
        }
        match before.and_then(|before| items.get_mut(before)) {
            Some(item) => item.links_mut().previous = Some(key),
            None => self.last = Some(key),
        }
    }

    /// Link `key` at the end
    pub(crate) fn push_back<V: Linked<K>>(&mut self, items: &mut SlotMap<K, V>, key: K) {
        self.insert(items, key, None);
    }

    /// Unlink `key`, which must be part of this list
    pub(crate) fn cut<V: Linked<K>>(&mut self, items: &mut SlotMap<K, V>, key: K) {
        let Some(item) = items.get_mut(key) else {
            return;
        };
        let Links { previous, next } = std::mem::take(item.links_mut());

        match previous.and_then(|previous| items.get_mut(previous)) {
            Some(item) => item.links_mut().next = next,
            None => self.first = next,
        }
        match next.and_then(|next| items.get_mut(next)) {
            Some(item) => item.links_mut().previous = previous,
            None => self.last = previous,
        }
    }

    /// Keys in list order
    pub(crate) fn iter<'a, V: Linked<K>>(&self, items: &'a SlotMap<K, V>) -> ListIter<'a, K, V> {
        ListIter { items, current: self.first }
    }
}

/// Iterator over the keys of a list
pub(crate) struct ListIter<'a, K: Key, V> {
    items: &'a SlotMap<K, V>,
    current: Option<K>,
}

impl<K: Key, V: Linked<K>> Iterator for ListIter<'_, K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let key = self.current?;
        self.current = self.items.get(key).and_then(|item| item.links().next);
        Some(key)
    }
}

#[cfg(test)]
#[path = "linked_list_tests.rs"]
mod tests;
