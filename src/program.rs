//! GLSL programs.

use queue;
use shader;
use std::{cmp, error, fmt, hash, io, ops, sync};

/// A failure recorded while constructing a program resource.
#[derive(Debug)]
pub enum Error {
    /// A shader source file could not be read.
    Io(io::Error),

    /// The driver rejected the source for one stage.
    Compile {
        /// The stage that failed to compile.
        kind: shader::Kind,

        /// The driver compile log.
        log: String,
    },

    /// The driver rejected the program linkage.
    Link {
        /// The driver link log.
        log: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => write!(f, "shader source unreadable: {}", err),
            Error::Compile { kind, ref log } => {
                write!(f, "error compiling {} shader: {}", kind, log)
            }
            Error::Link { ref log } => write!(f, "error linking program: {}", log),
        }
    }
}

impl error::Error for Error {
    fn cause(&self) -> Option<&error::Error> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// Specifies whether the destroyed item was a shader object or a program.
#[derive(Clone, Copy)]
pub(crate) enum Destroyed {
    /// A shader object.
    Shader(u32),

    /// A compiled and linked program.
    Program(u32),
}

/// Pushes the program ID onto the factory program queue when destroyed.
struct Destructor {
    id: u32,
    tx: queue::Sender<Destroyed>,
}

impl ops::Drop for Destructor {
    fn drop(&mut self) {
        let _ = self.tx.send(Destroyed::Program(self.id));
    }
}

/// A uniform location resolved against one live program.
///
/// A location is only valid for the program instance it was resolved
/// from; using it with any other program is rejected at set time.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Location {
    /// The program the location was resolved against.
    pub(crate) program: u32,

    /// The driver-assigned uniform index.
    pub(crate) index: i32,
}

/// A typed uniform value.
///
/// Matrices are in column-major layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Uniform {
    /// A boolean flag, written as `0` or `1`.
    Bool(bool),

    /// A signed integer or sampler unit index.
    Int(i32),

    /// A single float.
    Float(f32),

    /// A four-component vector.
    Vec4([f32; 4]),

    /// A 4x4 column-major matrix.
    Mat4([f32; 16]),
}

/// A compiled and linked shader program resource.
///
/// The resource exclusively owns its GPU program handle. A program is
/// either fully linked and usable or unusable; an unusable program
/// carries the diagnostics that made it so and renders nothing when
/// bound and drawn with.
#[derive(Clone)]
pub struct Program {
    /// The OpenGL program ID.
    id: u32,

    /// Compile and link failures captured at construction time.
    ///
    /// Empty exactly when the program linked successfully.
    errors: sync::Arc<Vec<Error>>,

    /// Returns the program back to the factory upon destruction.
    _destructor: sync::Arc<Destructor>,
}

impl Program {
    /// Constructor.
    pub(crate) fn new(
        id: u32,
        errors: Vec<Error>,
        tx: queue::Sender<Destroyed>,
    ) -> Self {
        Self {
            id,
            errors: sync::Arc::new(errors),
            _destructor: sync::Arc::new(Destructor { id, tx }),
        }
    }

    /// Returns the OpenGL program ID.
    pub(crate) fn id(&self) -> u32 {
        self.id
    }

    /// Returns `true` if the program linked successfully.
    pub fn is_usable(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the compile/link diagnostics captured at construction.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }
}

impl cmp::Eq for Program {}

impl cmp::PartialEq<Self> for Program {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct Program {
            id: u32,
            usable: bool,
        }

        Program {
            id: self.id,
            usable: self.is_usable(),
        }.fmt(f)
    }
}

impl hash::Hash for Program {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}
