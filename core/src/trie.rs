//! Prefix trie keyed by characters, carrying a value at each complete entry.
use std::collections::HashMap;

/// A prefix tree mapping strings to values.
///
/// Segmenters use it to find every entry that starts at a given position of
/// the input in a single walk.
///
/// # Example
/// ```
/// use datagen_core::trie::TrieNode;
///
/// let mut trie = TrieNode::new();
/// trie.insert("ni", 1);
/// trie.insert("nin", 2);
///
/// let input: Vec<char> = "ninhao".chars().collect();
/// let hits: Vec<(usize, i32)> = trie
///     .walk_prefixes(&input, 0)
///     .map(|(end, v)| (end, *v))
///     .collect();
/// assert_eq!(hits, vec![(2, 1), (3, 2)]);
/// ```
#[derive(Debug, Clone)]
pub struct TrieNode<V> {
    children: HashMap<char, TrieNode<V>>,
    value: Option<V>,
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
            value: None,
        }
    }
}

impl<V> TrieNode<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key`, replacing and returning any previous value.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let mut node = self;
        for ch in key.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.value.replace(value)
    }

    /// Value stored for exactly `key`, if any. Prefixes of entries do not count.
    pub fn get(&self, key: &str) -> Option<&V> {
        let mut node = self;
        for ch in key.chars() {
            node = node.children.get(&ch)?;
        }
        node.value.as_ref()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Every entry that begins at `input[start]`, as `(exclusive_end, value)`,
    /// shortest first.
    pub fn walk_prefixes<'t>(
        &'t self,
        input: &'t [char],
        start: usize,
    ) -> impl Iterator<Item = (usize, &'t V)> + 't {
        let mut node = Some(self);
        input
            .get(start..)
            .unwrap_or(&[])
            .iter()
            .enumerate()
            .map_while(move |(offset, ch)| {
                let next = node?.children.get(ch)?;
                node = Some(next);
                Some((start + offset + 1, next.value.as_ref()))
            })
            .filter_map(|(end, value)| value.map(|v| (end, v)))
    }
}
