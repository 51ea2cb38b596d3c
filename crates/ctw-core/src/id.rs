use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for entity IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for nodes and edges of a map.
/// Internally a 4-byte `Spur` index.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(Spur);

impl EntityId {
    /// Intern a string as an EntityId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        EntityId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EntityId::intern(&s))
    }
}

/// A reference to either kind of map entity.
///
/// Node and edge ids never collide (`node-N` / `edge-N`), but carrying the
/// kind saves every consumer a double lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum EntityRef {
    Node(EntityId),
    Edge(EntityId),
}

impl EntityRef {
    pub fn id(self) -> EntityId {
        match self {
            EntityRef::Node(id) | EntityRef::Edge(id) => id,
        }
    }
}

/// Monotonic id source owned by one editing session.
///
/// Counters never rewind, so ids handed out before an undo are not reused
/// after it. `next_*` also skips any candidate the caller reports as taken,
/// which keeps ids unique when a session starts from a pre-populated graph.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next_node: u64,
    next_edge: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next_node: 1,
            next_edge: 1,
        }
    }

    /// Sequence number the next node will carry (used for display names).
    pub fn peek_node_seq(&self) -> u64 {
        self.next_node
    }

    /// Allocate a fresh node id (`node-N`).
    pub fn next_node(&mut self, taken: impl Fn(EntityId) -> bool) -> (EntityId, u64) {
        loop {
            let n = self.next_node;
            self.next_node += 1;
            let id = EntityId::intern(&format!("node-{n}"));
            if !taken(id) {
                return (id, n);
            }
        }
    }

    /// Allocate a fresh edge id (`edge-N`).
    pub fn next_edge(&mut self, taken: impl Fn(EntityId) -> bool) -> EntityId {
        loop {
            let n = self.next_edge;
            self.next_edge += 1;
            let id = EntityId::intern(&format!("edge-{n}"));
            if !taken(id) {
                return id;
            }
        }
    }
}
