//! Vertex array objects.

use arrayvec;
use buffer;
use queue;
use std::{cmp, fmt, hash, ops, sync};
use vec_map;

/// The maximum number of vertex attributes permitted by the crate.
pub const MAX_ATTRIBUTES: usize = 8;

/// The OpenGL VAO ID type.
pub(crate) type Id = u32;

/// Vertex attribute.
pub type Attribute = buffer::Accessor;

/// Index data.
pub type Indices = buffer::Accessor;

/// Describes the contents of a vertex array before it is created.
///
/// Attributes are keyed by the attribute index the paired vertex
/// shader consumes them at.
pub struct Builder {
    /// Vertex attributes, keyed by attribute index.
    pub attributes: vec_map::VecMap<Attribute>,

    /// Optional draw sequence indices.
    pub indices: Option<Indices>,
}

impl Builder {
    /// Constructor.
    pub fn new() -> Self {
        Self {
            attributes: vec_map::VecMap::new(),
            indices: None,
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the VAO back to the factory upon destruction.
struct Destructor {
    id: Id,
    tx: queue::Sender<Id>,
}

impl ops::Drop for Destructor {
    fn drop(&mut self) {
        let _ = self.tx.send(self.id);
    }
}

/// Corresponds to an OpenGL vertex array object.
#[derive(Clone)]
pub struct VertexArray {
    /// The OpenGL VAO ID.
    id: Id,

    /// Draw sequence indices bound as the element array buffer.
    indices: Option<Indices>,

    /// Vertex attributes, paired with their attribute index.
    attributes: arrayvec::ArrayVec<(u8, Attribute), MAX_ATTRIBUTES>,

    /// Returns the VAO back to the factory upon destruction.
    _destructor: sync::Arc<Destructor>,
}

impl VertexArray {
    /// Begin building a vertex array.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Constructor.
    pub(crate) fn new(
        id: Id,
        attributes: arrayvec::ArrayVec<(u8, Attribute), MAX_ATTRIBUTES>,
        indices: Option<Indices>,
        tx: queue::Sender<Id>,
    ) -> Self {
        Self {
            id,
            indices,
            attributes,
            _destructor: sync::Arc::new(Destructor { id, tx }),
        }
    }

    /// Returns the OpenGL VAO ID.
    pub(crate) fn id(&self) -> Id {
        self.id
    }

    /// Returns the accessor bound as the element array buffer.
    pub fn indices(&self) -> Option<&Indices> {
        self.indices.as_ref()
    }

    /// Returns the accessor bound to the given attribute index.
    pub fn attribute(&self, index: u8) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|&&(binding, _)| binding == index)
            .map(|&(_, ref accessor)| accessor)
    }
}

impl cmp::Eq for VertexArray {}

impl cmp::PartialEq<Self> for VertexArray {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for VertexArray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct VertexArray<'a> {
            id: u32,
            indices: Option<&'a Indices>,
            attributes: &'a [(u8, Attribute)],
        }

        VertexArray {
            id: self.id,
            indices: self.indices.as_ref(),
            attributes: &self.attributes,
        }.fmt(f)
    }
}

impl hash::Hash for VertexArray {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}
