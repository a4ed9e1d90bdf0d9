extern crate arrayvec;
extern crate crossbeam_channel;
#[macro_use] extern crate log;
extern crate vec_map;

mod factory;
mod queue;
pub mod gl;
pub mod util;

pub mod buffer;
pub mod draw_call;
pub mod image;
pub mod pipeline;
pub mod program;
pub mod sampler;
pub mod shader;
pub mod texture;
pub mod vertex_array;

#[cfg(feature = "macros")]
mod macros;

use std::os;

/// Initialize the library, creating a factory to instantiate library
/// objects against the current GL context.
pub fn init<F>(mut query_proc_address: F) -> Factory
    where F: FnMut(&str) -> *const os::raw::c_void
{
    Factory::new(move |sym| query_proc_address(sym) as *const ())
}

#[doc(inline)]
pub use buffer::Accessor;

#[doc(inline)]
pub use buffer::Buffer;

#[doc(inline)]
pub use draw_call::DrawCall;

#[doc(inline)]
pub use draw_call::Primitive;

#[doc(inline)]
pub use factory::Factory;

#[doc(inline)]
pub use pipeline::ClearOp;

#[doc(inline)]
pub use pipeline::DepthTest;

#[doc(inline)]
pub use program::Location;

#[doc(inline)]
pub use program::Program;

#[doc(inline)]
pub use program::Uniform;

#[doc(inline)]
pub use sampler::Sampler2;

#[doc(inline)]
pub use texture::Texture2;

#[doc(inline)]
pub use vertex_array::VertexArray;
