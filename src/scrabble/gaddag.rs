use std::fmt;
use std::mem;
use std::path::Path;
use std::time::Instant;

use log::{error, info, trace, warn};
use serde::{Deserialize, Serialize};

use super::dictionary::Dictionary;
use super::error::TrieError;
use crate::utils::serialization::{self, SerializationError};

/// Marks the point where a path stops reading the word forwards and starts
/// reading the letters before the anchor backwards
pub const SEPARATOR: char = '#';
const SEP: u8 = SEPARATOR as u8;

/// Average number of nodes a dictionary word adds to the trie, measured on
/// the standard English word lists
const NODES_PER_WORD: f64 = 35.79;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TrieNode {
    /// Letter (or separator) on the edge into this node, 0 for the root
    symbol: u8,
    terminal: bool,
    parent: Option<NodeId>,
    /// Sorted by symbol
    children: Vec<(u8, NodeId)>,
}

impl TrieNode {
    fn child(&self, symbol: u8) -> Option<NodeId> {
        self.children
            .binary_search_by_key(&symbol, |&(s, _)| s)
            .ok()
            .map(|i| self.children[i].1)
    }
}

/// Implementation of a GADDAG for finding every word through a square on the board.
/// Every word is stored once as is, and once for every letter after the first
/// as `suffix # reversed prefix`, so `cat` is stored as `cat`, `at#c` and `t#ac`.
/// Nodes live in a flat arena and refer to each other by index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trie {
    nodes: Vec<TrieNode>,
    word_count: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode {
                symbol: 0,
                terminal: false,
                parent: None,
                children: Vec::new(),
            }],
            word_count: 0,
        }
    }

    /// Adds a word and all of its rotations. Returns whether the word is new.
    /// Adding a word twice leaves the trie unchanged.
    pub fn add_word(&mut self, word: &str) -> Result<bool, TrieError> {
        let word = word.trim();
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(TrieError::IllegalWord(word.to_string()));
        }
        let letters = word.to_ascii_lowercase().into_bytes();

        let added = self.insert_path(letters.iter().copied())?;
        let mut rotation = Vec::with_capacity(letters.len() + 1);
        for split in 1..letters.len() {
            rotation.clear();
            rotation.extend_from_slice(&letters[split..]);
            rotation.push(SEP);
            rotation.extend(letters[..split].iter().rev());
            self.insert_path(rotation.iter().copied())?;
        }

        if added {
            self.word_count += 1;
            trace!("Added {} to the trie", word);
        }
        Ok(added)
    }

    /// Walks the path creating missing nodes, and marks the end as terminal.
    /// Returns true if the end was not terminal before.
    fn insert_path(&mut self, symbols: impl Iterator<Item = u8>) -> Result<bool, TrieError> {
        let mut curr = NodeId::ROOT;
        for symbol in symbols {
            curr = self.child_or_insert(curr, symbol)?;
        }
        let node = &mut self.nodes[curr.index()];
        let added = !node.terminal;
        node.terminal = true;
        Ok(added)
    }

    fn child_or_insert(&mut self, parent: NodeId, symbol: u8) -> Result<NodeId, TrieError> {
        let slot = match self.nodes[parent.index()]
            .children
            .binary_search_by_key(&symbol, |&(s, _)| s)
        {
            Ok(i) => return Ok(self.nodes[parent.index()].children[i].1),
            Err(slot) => slot,
        };

        if self.nodes.try_reserve(1).is_err() || self.nodes.len() >= u32::MAX as usize {
            return Err(TrieError::OutOfMemory {
                estimated_bytes: estimate_bytes(self.nodes.len() as u64 + 1),
            });
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(TrieNode {
            symbol,
            terminal: false,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.insert(slot, (symbol, id));
        Ok(id)
    }

    pub fn root(&self) -> Node<'_> {
        Node {
            trie: self,
            id: NodeId::ROOT,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Checks if `word` was added, ignoring case
    pub fn contains(&self, word: &str) -> bool {
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return false;
        }
        let mut node = self.root();
        for c in word.chars() {
            match node.child(c) {
                Some(next) => node = next,
                None => return false,
            }
        }
        !node.is_root() && node.is_terminal()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SerializationError> {
        serialization::save_to_disk(self, path.as_ref())?;
        info!(
            "Saved trie with {} nodes to {}",
            self.node_count(),
            path.as_ref().display()
        );
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SerializationError> {
        let trie: Trie = serialization::load_from_disk(path.as_ref())?;
        trie.check_arena().map_err(SerializationError::Corrupt)?;
        info!(
            "Loaded trie with {} words from {}",
            trie.word_count(),
            path.as_ref().display()
        );
        Ok(trie)
    }
}

impl Trie {
    /// Node links have to stay inside the arena and children have to be
    /// sorted, or lookups index out of bounds
    fn check_arena(&self) -> Result<(), String> {
        let root = self.nodes.first().ok_or("no root node")?;
        if root.symbol != 0 || root.parent.is_some() {
            return Err("node 0 is not a root".to_string());
        }
        let len = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 && !node.parent.map_or(false, |p| p.index() < len) {
                return Err(format!("node {} has no valid parent", i));
            }
            if let Some(&(_, id)) = node
                .children
                .iter()
                .find(|&&(_, id)| id == NodeId::ROOT || id.index() >= len)
            {
                return Err(format!("node {} links to missing node {}", i, id.0));
            }
            if !node.children.windows(2).all(|w| w[0].0 < w[1].0) {
                return Err(format!("children of node {} are not sorted", i));
            }
        }
        Ok(())
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

fn estimate_bytes(nodes: u64) -> u64 {
    let per_node = (mem::size_of::<TrieNode>() + mem::size_of::<(u8, NodeId)>()) as u64;
    mem::size_of::<Trie>() as u64 + nodes * per_node
}

/// Read-only view of a trie node
#[derive(Clone, Copy)]
pub struct Node<'a> {
    trie: &'a Trie,
    id: NodeId,
}

impl<'a> Node<'a> {
    fn node(&self) -> &'a TrieNode {
        &self.trie.nodes[self.id.index()]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Letter on the edge into this node, `None` for the root and the separator
    pub fn letter(&self) -> Option<char> {
        match self.node().symbol {
            0 | SEP => None,
            s => Some(s as char),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.node().terminal
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    pub fn is_cross_anchor(&self) -> bool {
        self.node().symbol == SEP
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.node().parent.map(|id| Node {
            trie: self.trie,
            id,
        })
    }

    /// Follows the edge for `letter`, ignoring case
    pub fn child(&self, letter: char) -> Option<Node<'a>> {
        if !letter.is_ascii() {
            return None;
        }
        self.node()
            .child(letter.to_ascii_lowercase() as u8)
            .map(|id| Node {
                trie: self.trie,
                id,
            })
    }

    /// Follows the separator edge
    pub fn cross_anchor(&self) -> Option<Node<'a>> {
        self.child(SEPARATOR)
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let trie = self.trie;
        self.node()
            .children
            .iter()
            .map(move |&(_, id)| Node { trie, id })
    }
}

impl<'a> fmt::Debug for Node<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.node().symbol {
            0 => '^',
            s => s as char,
        };
        write!(f, "Node({}", symbol)?;
        if self.is_terminal() {
            write!(f, ", terminal")?;
        }
        write!(f, ")")
    }
}

/// Loads word lists into a trie, skipping words that can't be played
pub struct TrieBuilder;

impl TrieBuilder {
    pub fn build<I, S>(words: I) -> Result<Trie, TrieError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = Instant::now();
        let words = words.into_iter();
        let expected = words.size_hint().0;
        let mut trie = Trie::new();
        let mut seen = 0;
        let mut skipped = 0;

        for word in words {
            seen += 1;
            match trie.add_word(word.as_ref()) {
                Ok(_) => {}
                Err(TrieError::IllegalWord(w)) => {
                    warn!("Skipping illegal word {:?}", w);
                    skipped += 1;
                }
                Err(TrieError::OutOfMemory { .. }) => {
                    let total = expected.max(seen) as u64;
                    let nodes = (total as f64 * NODES_PER_WORD) as u64;
                    let estimated_bytes = estimate_bytes(nodes);
                    error!(
                        "Ran out of memory after {} of {} words, about {} nodes ({} MB) are needed",
                        seen,
                        total,
                        nodes,
                        estimated_bytes / (1024 * 1024)
                    );
                    return Err(TrieError::OutOfMemory { estimated_bytes });
                }
            }
        }

        info!(
            "Built trie with {} words ({} nodes, {} skipped) in {:.2?}",
            trie.word_count(),
            trie.node_count(),
            skipped,
            start.elapsed()
        );
        Ok(trie)
    }

    pub fn build_from_dictionary(dictionary: &Dictionary) -> Result<Trie, TrieError> {
        Self::build(dictionary.words())
    }
}
