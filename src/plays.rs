use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::side::Side;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Play {
    pub id: u64,
    pub name: String,
    pub timestamp: String,
    pub success: bool,
    pub side: Side,
}

#[derive(Debug)]
struct Node {
    play: Play,
    next: Option<Arc<Node>>,
}

/// Newest-first play log. Prepending shares the existing tail, so history
/// snapshots of the log cost one pointer copy.
#[derive(Debug, Clone, Default)]
pub struct PlayLog {
    head: Option<Arc<Node>>,
    len: usize,
}

impl PlayLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepend(&mut self, play: Play) {
        let node = Node {
            play,
            next: self.head.take(),
        };
        self.head = Some(Arc::new(node));
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn latest(&self) -> Option<&Play> {
        self.head.as_deref().map(|node| &node.play)
    }

    pub fn iter(&self) -> PlayIter<'_> {
        PlayIter {
            next: self.head.as_deref(),
        }
    }

    pub fn to_vec(&self) -> Vec<Play> {
        self.iter().cloned().collect()
    }

    pub fn shares_tail_with(&self, other: &PlayLog) -> bool {
        let Some(theirs) = &other.head else {
            return false;
        };
        let mut cursor = self.head.as_ref();
        while let Some(node) = cursor {
            if Arc::ptr_eq(node, theirs) {
                return true;
            }
            cursor = node.next.as_ref();
        }
        false
    }
}

impl PartialEq for PlayLog {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for PlayLog {}

// Long logs would otherwise drop recursively.
impl Drop for PlayLog {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

impl Serialize for PlayLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

pub struct PlayIter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for PlayIter<'a> {
    type Item = &'a Play;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.play)
    }
}

/// Named plays offered by the play picker.
pub const PLAY_NAMES: [&str; 3] = ["Quick Counter", "Set Play", "Power Play"];
