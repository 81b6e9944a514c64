use std::collections::HashMap;

use super::Entry;

const ROOT: usize = 0;

#[derive(Default)]
struct Node {
    children: HashMap<char, usize>,
    entries: Vec<Entry>,
}

/// Code-keyed trie over an arena of nodes.
///
/// An entry lives at the node reached by consuming its code one character
/// at a time; codeless entries live at the root. Nodes are never freed,
/// so removal only empties entry lists.
pub struct CodeTrie {
    nodes: Vec<Node>,
}

impl CodeTrie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    fn find(&self, code: &str) -> Option<usize> {
        code.chars()
            .try_fold(ROOT, |id, c| self.nodes[id].children.get(&c).copied())
    }

    fn find_or_create(&mut self, code: &str) -> usize {
        let mut id = ROOT;
        for c in code.chars() {
            id = match self.nodes[id].children.get(&c) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[id].children.insert(c, child);
                    child
                }
            };
        }
        id
    }

    /// Insert an entry. Returns `false` if an identical entry is already present.
    pub fn insert(&mut self, entry: Entry) -> bool {
        let id = self.find_or_create(entry.code().unwrap_or(""));
        let node = &mut self.nodes[id];
        if node.entries.iter().any(|e| e.same_as(&entry)) {
            return false;
        }
        node.entries.push(entry);
        true
    }

    /// Remove the entry identical to `entry`, returning the stored copy.
    pub fn remove(&mut self, entry: &Entry) -> Option<Entry> {
        let id = self.find(entry.code().unwrap_or(""))?;
        let entries = &mut self.nodes[id].entries;
        let pos = entries.iter().position(|e| e.same_as(entry))?;
        Some(entries.remove(pos))
    }

    /// The stored entry identical to `entry`, if any.
    pub fn get(&self, entry: &Entry) -> Option<&Entry> {
        let id = self.find(entry.code().unwrap_or(""))?;
        self.nodes[id].entries.iter().find(|e| e.same_as(entry))
    }

    /// Entries whose code equals `code` (`exact`) or starts with it.
    pub fn search(&self, code: &str, exact: bool) -> Vec<&Entry> {
        let Some(start) = self.find(code) else {
            return Vec::new();
        };
        if exact {
            return self.nodes[start].entries.iter().collect();
        }

        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            result.extend(node.entries.iter());
            stack.extend(node.children.values().copied());
        }
        result
    }

    /// Whether any entry has exactly this code.
    pub fn is_occupied(&self, code: &str) -> bool {
        self.find(code)
            .is_some_and(|id| !self.nodes[id].entries.is_empty())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for CodeTrie {
    fn default() -> Self {
        Self::new()
    }
}
