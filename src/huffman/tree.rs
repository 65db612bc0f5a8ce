use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use log::{debug, trace};

use crate::error::{HuffmanError, Result};
use crate::huffman::frequency::{FreqTable, Symbol};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node<S> {
    Leaf {
        symbol: S,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node<S>>,
        right: Box<Node<S>>,
    },
}

impl<S: Symbol> Node<S> {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn symbol(&self) -> Option<S> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn children(&self) -> Option<(&Node<S>, &Node<S>)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((left, right)),
        }
    }

    /// Joins two subtrees under a new internal node, or `None` if their
    /// combined weight does not fit in a `u64`.
    fn merge(left: Self, right: Self) -> Option<Self> {
        let weight = left.weight().checked_add(right.weight())?;
        Some(Node::Internal {
            weight,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

/// Queue entry. `seq` is the insertion counter: among equal weights the
/// earliest-inserted node is popped first.
struct HeapNode<S> {
    weight: u64,
    seq: u64,
    node: Node<S>,
}

impl<S> PartialEq for HeapNode<S> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl<S> Eq for HeapNode<S> {}

impl<S> Ord for HeapNode<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that BinaryHeap (a max-heap) yields the minimum.
        (other.weight, other.seq).cmp(&(self.weight, self.seq))
    }
}

impl<S> PartialOrd for HeapNode<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A strict binary tree owning all of its nodes. Immutable once built.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HuffmanTree<S> {
    root: Node<S>,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Builds the tree with the classic greedy merge.
    ///
    /// Leaves are seeded in ascending `(frequency, symbol)` order and every
    /// pushed node takes the next insertion number, so equal weights resolve
    /// to the earliest-inserted node and the same table always yields the
    /// same tree. The first node popped becomes the left child.
    pub fn build(frequencies: &FreqTable<S>) -> Result<Self> {
        debug!(
            "Building Huffman tree from {} unique symbols",
            frequencies.len()
        );

        let mut seeds: Vec<(S, u64)> = frequencies.iter().map(|(&s, &f)| (s, f)).collect();
        seeds.sort_unstable_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

        let mut heap = BinaryHeap::with_capacity(seeds.len());
        let mut seq = 0u64;
        for (symbol, weight) in seeds {
            if weight == 0 {
                return Err(HuffmanError::InvalidFrequency {
                    symbol: format!("{symbol:?}"),
                    frequency: weight,
                });
            }
            heap.push(HeapNode {
                weight,
                seq,
                node: Node::Leaf { symbol, weight },
            });
            seq += 1;
        }

        let root = loop {
            let Some(first) = heap.pop() else {
                return Err(HuffmanError::EmptyInput);
            };
            let Some(second) = heap.pop() else {
                break first.node;
            };

            let Some(node) = Node::merge(first.node, second.node) else {
                return Err(HuffmanError::MalformedTree(format!(
                    "combined weight {} + {} overflows",
                    first.weight, second.weight
                )));
            };
            trace!(
                "Merged weights {} + {} -> {}",
                first.weight,
                second.weight,
                node.weight()
            );
            heap.push(HeapNode {
                weight: node.weight(),
                seq,
                node,
            });
            seq += 1;
        };

        debug!("Tree construction complete, root weight {}", root.weight());
        Ok(HuffmanTree { root })
    }

    /// Wraps an externally assembled node graph after checking that every
    /// weight is positive and every internal weight is the sum of its
    /// children's.
    pub fn from_root(root: Node<S>) -> Result<Self> {
        let mut stack = vec![&root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { symbol, weight } => {
                    if *weight == 0 {
                        return Err(HuffmanError::MalformedTree(format!(
                            "leaf {symbol:?} has zero weight"
                        )));
                    }
                }
                Node::Internal {
                    weight,
                    left,
                    right,
                } => {
                    let sum = left.weight().checked_add(right.weight());
                    if sum != Some(*weight) {
                        return Err(HuffmanError::MalformedTree(format!(
                            "internal weight {} does not equal {} + {}",
                            weight,
                            left.weight(),
                            right.weight()
                        )));
                    }
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    /// True when the input had a single distinct symbol and the root is a leaf.
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Nodes grouped by depth, root first, left to right within a level.
    pub fn levels(&self) -> Vec<Vec<&Node<S>>> {
        let mut levels = Vec::new();
        let mut current: VecDeque<&Node<S>> = VecDeque::from([&self.root]);

        while !current.is_empty() {
            let mut next = VecDeque::new();
            for node in &current {
                if let Some((left, right)) = node.children() {
                    next.push_back(left);
                    next.push_back(right);
                }
            }
            levels.push(current.into_iter().collect());
            current = next;
        }
        levels
    }

    pub fn height(&self) -> usize {
        self.levels().len()
    }

    pub fn leaf_count(&self) -> usize {
        self.levels()
            .iter()
            .flatten()
            .filter(|node| node.is_leaf())
            .count()
    }
}
