//! GLSL shader objects.

use gl;
use program;
use queue;
use std::{ffi, fmt, fs, io, ops, path};

/// NUL-terminated GLSL source text for a single stage.
pub type Source = ffi::CStr;

/// Reads a GLSL source file into a NUL-terminated string.
pub fn load<P>(path: P) -> io::Result<ffi::CString>
    where P: AsRef<path::Path>
{
    use std::io::Read;
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);
    let mut contents = Vec::new();
    let _ = reader.read_to_end(&mut contents)?;
    ffi::CString::new(contents)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

/// Shader pipeline stage.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// Per-vertex processing stage.
    Vertex,

    /// Per-fragment processing stage.
    Fragment,
}

impl Kind {
    /// Returns the equivalent OpenGL shader type enumeration constant.
    pub(crate) fn as_gl_enum(self) -> u32 {
        match self {
            Kind::Vertex => gl::VERTEX_SHADER,
            Kind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Kind::Vertex => "vertex".fmt(f),
            Kind::Fragment => "fragment".fmt(f),
        }
    }
}

/// Pushes the shader ID onto the factory program queue when dropped.
struct Destructor {
    id: u32,
    tx: queue::Sender<program::Destroyed>,
}

impl ops::Drop for Destructor {
    fn drop(&mut self) {
        let _ = self.tx.send(program::Destroyed::Shader(self.id));
    }
}

/// A compiled shader object for a single stage.
///
/// The object is consumed at link time and never reused; its GPU-side
/// counterpart is released through the factory queue once dropped,
/// whether or not compilation succeeded.
pub struct Object {
    /// The OpenGL shader ID.
    id: u32,

    /// The stage this object was compiled for.
    kind: Kind,

    /// Compile log captured when the driver rejected the source.
    diagnostic: Option<String>,

    /// Returns the shader back to the factory upon destruction.
    _destructor: Destructor,
}

impl Object {
    /// Constructor.
    pub(crate) fn new(
        id: u32,
        kind: Kind,
        diagnostic: Option<String>,
        tx: queue::Sender<program::Destroyed>,
    ) -> Self {
        Self {
            id,
            kind,
            diagnostic,
            _destructor: Destructor { id, tx },
        }
    }

    /// Returns the OpenGL shader ID.
    pub(crate) fn id(&self) -> u32 {
        self.id
    }

    /// Returns the stage this object was compiled for.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns `true` if the driver accepted the source.
    pub fn is_compiled(&self) -> bool {
        self.diagnostic.is_none()
    }

    /// Returns the compile log captured on failure.
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_ref().map(|log| log.as_str())
    }

    /// Takes the compile log out of the object.
    pub(crate) fn take_diagnostic(&mut self) -> Option<String> {
        self.diagnostic.take()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct Object {
            id: u32,
            kind: Kind,
            compiled: bool,
        }

        Object {
            id: self.id,
            kind: self.kind,
            compiled: self.is_compiled(),
        }.fmt(f)
    }
}
