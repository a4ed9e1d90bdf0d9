//! Factory.

use buffer;
use gl;
use image;
use program;
use shader;
use std::{cell, ffi, mem, path, ptr, rc};
use texture;
use vertex_array;

use arrayvec::ArrayVec;
use draw_call::{DrawCall, Kind};
use pipeline::{ClearOp, DepthTest};
use program::{Destroyed, Location, Uniform};
use queue::Queue;
use sampler::Sampler2;
use {Buffer, Program, Texture2, VertexArray};

/// Context-wide binding slots.
///
/// The driver models "current program" and "current vertex array" as
/// context state; these cells make that state explicit and shared by
/// every clone of the factory.
struct Bindings {
    /// The program bound for the next draw call.
    program: cell::Cell<u32>,

    /// The vertex array bound for the next draw call.
    vertex_array: cell::Cell<u32>,
}

/// OpenGL memory manager and rendering-context handle.
///
/// All operations require the GL context the factory was loaded
/// against to be current on the calling thread.
#[derive(Clone)]
pub struct Factory {
    /// Function pointers to the OpenGL backend.
    backend: gl::Backend,

    /// Explicit current-binding state.
    bindings: rc::Rc<Bindings>,

    /// Destroyed buffers arrive here to be released.
    buffer_queue: Queue<buffer::Id>,

    /// Destroyed textures arrive here to be released.
    texture_queue: Queue<texture::Id>,

    /// Destroyed vertex arrays arrive here to be released.
    vertex_array_queue: Queue<vertex_array::Id>,

    /// Destroyed shader objects and programs arrive here to be released.
    program_queue: Queue<Destroyed>,
}

impl Factory {
    /// Constructor.
    pub fn new<F>(query_proc_address: F) -> Self
        where F: FnMut(&str) -> *const ()
    {
        Self {
            backend: gl::Backend::load(query_proc_address),
            bindings: rc::Rc::new(Bindings {
                program: cell::Cell::new(0),
                vertex_array: cell::Cell::new(0),
            }),
            buffer_queue: Queue::new(),
            texture_queue: Queue::new(),
            vertex_array_queue: Queue::new(),
            program_queue: Queue::new(),
        }
    }

    // Frame operations

    /// Clear the requested framebuffer planes.
    pub fn clear(&self, op: ClearOp) {
        let mut ops = 0;
        if let Some([r, g, b, a]) = op.color {
            self.backend.clear_color(r, g, b, a);
            ops |= gl::COLOR_BUFFER_BIT;
        }
        if let Some(z) = op.depth {
            self.backend.clear_depth(z);
            ops |= gl::DEPTH_BUFFER_BIT;
        }
        self.backend.clear(ops);
    }

    /// Set the region of the framebuffer rendered to.
    pub fn viewport(&self, x: u32, y: u32, width: u32, height: u32) {
        self.backend.viewport(x, y, width, height);
    }

    /// Enable or disable depth testing.
    pub fn set_depth_test(&self, test: Option<DepthTest>) {
        match test {
            Some(test) => {
                self.backend.enable(gl::DEPTH_TEST);
                self.backend.depth_func(test.as_gl_enum());
            }
            None => self.backend.disable(gl::DEPTH_TEST),
        }
    }

    /// Read back a framebuffer rectangle as tightly packed RGBA8 rows,
    /// bottom row first.
    pub fn read_pixels(&self, x: u32, y: u32, width: u32, height: u32) -> Vec<u8> {
        let mut contents = vec![0u8; width as usize * height as usize * 4];
        self.backend.read_pixels_rgba(x, y, width, height, &mut contents);
        contents
    }

    /// Returns the driver limit on vertex attribute count.
    pub fn query_max_vertex_attributes(&self) -> i32 {
        self.backend.get_integer(gl::MAX_VERTEX_ATTRIBS)
    }

    // Buffer operations

    /// Create an uninitialized GPU buffer.
    pub fn buffer(&self, kind: buffer::Kind, usage: buffer::Usage) -> Buffer {
        let id = self.backend.gen_buffer();
        let tx = self.buffer_queue.tx();
        Buffer::new(id, kind, usage, tx)
    }

    /// (Re)-initialize the contents of a [`Buffer`].
    ///
    /// [`Buffer`]: buffer/struct.Buffer.html
    pub fn initialize_buffer<T>(&self, buffer: &Buffer, data: &[T]) {
        self.backend.bind_buffer(buffer.id(), buffer.kind().as_gl_enum());
        self.backend.buffer_data(
            buffer.kind().as_gl_enum(),
            data.len() * mem::size_of::<T>(),
            data.as_ptr() as *const _,
            buffer.usage().as_gl_enum(),
        );
        self.backend.bind_buffer(0, buffer.kind().as_gl_enum());
    }

    // Vertex array operations

    /// Create a vertex array from the builder's attribute bindings.
    ///
    /// Each attribute is declared to the context with its index,
    /// component count and type, byte stride, and byte offset; the
    /// indices must match the `location` qualifiers of the vertex
    /// shader the array is drawn with.
    pub fn vertex_array(&self, builder: vertex_array::Builder) -> VertexArray {
        let id = self.backend.gen_vertex_array();
        let tx = self.vertex_array_queue.tx();
        let mut attributes = ArrayVec::new();

        // Setup the vertex array
        self.backend.bind_vertex_array(id);
        if let Some(ref accessor) = builder.indices {
            self.backend.bind_buffer(accessor.buffer().id(), gl::ELEMENT_ARRAY_BUFFER);
        }
        for (binding, accessor) in &builder.attributes {
            if binding >= vertex_array::MAX_ATTRIBUTES {
                warn!(
                    target: "shade",
                    "attribute index {} exceeds the supported maximum; skipped",
                    binding,
                );
                continue;
            }
            self.backend.bind_buffer(accessor.buffer().id(), gl::ARRAY_BUFFER);
            self.backend.enable_vertex_attrib_array(binding as u8);
            self.backend.vertex_attrib_pointer(
                binding as u8,
                accessor.format().size() as _,
                accessor.format().gl_data_type(),
                accessor.format().norm(),
                accessor.stride() as _,
                accessor.offset(),
            );
            attributes.push((binding as u8, accessor.clone()));
        }
        self.backend.bind_vertex_array(0);
        self.bindings.vertex_array.set(0);

        VertexArray::new(id, attributes, builder.indices, tx)
    }

    /// Bind a vertex array as the current one.
    pub fn bind_vertex_array(&self, vertex_array: &VertexArray) {
        self.backend.bind_vertex_array(vertex_array.id());
        self.bindings.vertex_array.set(vertex_array.id());
    }

    /// Set "no vertex array current".
    pub fn unbind_vertex_array(&self) {
        self.backend.bind_vertex_array(0);
        self.bindings.vertex_array.set(0);
    }

    // Program operations

    /// Compile GLSL shader code into a shader object.
    ///
    /// A compile failure is logged and captured on the returned object;
    /// the object may still be attached to a link attempt, matching
    /// driver behavior, but is unusable.
    pub fn shader(&self, kind: shader::Kind, source: &shader::Source) -> shader::Object {
        let id = self.backend.create_shader(kind.as_gl_enum());
        self.backend.shader_source(id, source);
        let diagnostic = if self.backend.compile_shader(id) {
            None
        } else {
            let log = self.backend.shader_info_log(id);
            error!(target: "shade", "error compiling {} shader: {}", kind, log);
            Some(log)
        };
        let tx = self.program_queue.tx();
        shader::Object::new(id, kind, diagnostic, tx)
    }

    /// Link two compiled shader objects into a GLSL program.
    ///
    /// Both objects are consumed; their GPU-side counterparts are
    /// released through the factory queue whether or not the link
    /// succeeds. Compile diagnostics carried by either object and any
    /// link failure end up on the returned program, which is flagged
    /// unusable if anything went wrong.
    pub fn program(&self, mut vertex: shader::Object, mut fragment: shader::Object) -> Program {
        let id = self.backend.create_program();
        self.backend.attach_shader(id, vertex.id());
        self.backend.attach_shader(id, fragment.id());
        let linked = self.backend.link_program(id);
        self.backend.detach_shader(id, vertex.id());
        self.backend.detach_shader(id, fragment.id());

        let mut errors = Vec::new();
        if let Some(log) = vertex.take_diagnostic() {
            errors.push(program::Error::Compile {
                kind: vertex.kind(),
                log,
            });
        }
        if let Some(log) = fragment.take_diagnostic() {
            errors.push(program::Error::Compile {
                kind: fragment.kind(),
                log,
            });
        }
        if !linked {
            let log = self.backend.program_info_log(id);
            error!(target: "shade", "error linking program: {}", log);
            errors.push(program::Error::Link { log });
        }

        let tx = self.program_queue.tx();
        Program::new(id, errors, tx)
    }

    /// Compile and link a program from literal sources.
    pub fn program_from_sources(
        &self,
        vertex_source: &shader::Source,
        fragment_source: &shader::Source,
    ) -> Program {
        let vertex = self.shader(shader::Kind::Vertex, vertex_source);
        let fragment = self.shader(shader::Kind::Fragment, fragment_source);
        self.program(vertex, fragment)
    }

    /// Compile and link a program from two source files.
    ///
    /// Fails only if either file cannot be read; compile and link
    /// failures yield an unusable program carrying its diagnostics.
    pub fn program_from_paths<P>(
        &self,
        vertex_path: P,
        fragment_path: P,
    ) -> Result<Program, program::Error>
        where P: AsRef<path::Path>
    {
        let vertex_source = shader::load(vertex_path)?;
        let fragment_source = shader::load(fragment_path)?;
        Ok(self.program_from_sources(&vertex_source, &fragment_source))
    }

    /// Bind a program as the current one, superseding any other.
    ///
    /// Binding an unusable program is permitted but renders nothing
    /// useful; the misuse is logged.
    pub fn bind_program(&self, program: &Program) {
        if !program.is_usable() {
            warn!(target: "shade", "binding unusable program {:?}", program);
        }
        self.backend.use_program(program.id());
        self.bindings.program.set(program.id());
    }

    /// Set "no program current".
    pub fn unbind_program(&self) {
        self.backend.use_program(0);
        self.bindings.program.set(0);
    }

    /// Returns `true` if the program occupies the current-program slot.
    pub fn is_current(&self, program: &Program) -> bool {
        self.bindings.program.get() == program.id()
    }

    /// Asks the driver which program is current.
    ///
    /// Debug query; returns the raw program name, `0` for none.
    pub fn query_current_program(&self) -> u32 {
        self.backend.get_integer(gl::CURRENT_PROGRAM) as u32
    }

    /// Resolves the location of a named uniform against a program.
    ///
    /// Returns `None` if the program has no active uniform with that
    /// name. The location is only valid for this program instance.
    pub fn query_uniform_location(
        &self,
        program: &Program,
        name: &ffi::CStr,
    ) -> Option<Location> {
        match self.backend.get_uniform_location(program.id(), name) {
            -1 => None,
            index => Some(Location {
                program: program.id(),
                index,
            }),
        }
    }

    /// Write a uniform value through a resolved location.
    ///
    /// Binds the program first if it is not current. A location
    /// resolved from a different program is rejected.
    pub fn set_uniform(&self, program: &Program, location: Location, value: Uniform) {
        if location.program != program.id() {
            warn!(
                target: "shade",
                "uniform location belongs to program {}, not {}; ignored",
                location.program,
                program.id(),
            );
            return;
        }
        if !self.is_current(program) {
            self.bind_program(program);
        }
        match value {
            Uniform::Bool(x) => self.backend.uniform1i(location.index, x as i32),
            Uniform::Int(x) => self.backend.uniform1i(location.index, x),
            Uniform::Float(x) => self.backend.uniform1f(location.index, x),
            Uniform::Vec4(x) => self.backend.uniform4f(location.index, x),
            Uniform::Mat4(ref x) => self.backend.uniform_matrix4fv(location.index, x),
        }
    }

    /// Write a uniform value by name.
    ///
    /// A name the program does not expose is a silent no-op; the
    /// `false` return lets strict callers assert on it.
    pub fn set_uniform_by_name(
        &self,
        program: &Program,
        name: &ffi::CStr,
        value: Uniform,
    ) -> bool {
        match self.query_uniform_location(program, name) {
            Some(location) => {
                self.set_uniform(program, location, value);
                true
            }
            None => false,
        }
    }

    /// Read back a 4x4 matrix uniform, column-major.
    ///
    /// Debug query used to verify round trips.
    pub fn query_uniform_mat4(&self, program: &Program, location: Location) -> [f32; 16] {
        if location.program != program.id() {
            warn!(
                target: "shade",
                "uniform location belongs to program {}, not {}; ignored",
                location.program,
                program.id(),
            );
            return [0.0; 16];
        }
        self.backend.get_uniform_matrix4fv(program.id(), location.index)
    }

    // Texture operations

    /// Create a 2D texture backed by uninitialized GPU memory.
    pub fn texture2(
        &self,
        width: u32,
        height: u32,
        mipmap: bool,
        format: texture::Format,
    ) -> Texture2 {
        let id = self.backend.gen_texture();
        let tx = self.texture_queue.tx();
        self.backend.bind_texture(gl::TEXTURE_2D, id);
        self.backend.tex_image_2d(
            gl::TEXTURE_2D,
            format.as_gl_enum(),
            width,
            height,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            ptr::null(),
        );
        if mipmap {
            self.backend.generate_mipmap(gl::TEXTURE_2D);
        }
        self.backend.bind_texture(gl::TEXTURE_2D, 0);
        Texture2::new(id, width, height, mipmap, format, tx)
    }

    /// (Re)-initialize the contents of a [`Texture2`].
    ///
    /// [`Texture2`]: texture/struct.Texture2.html
    pub fn write_texture2(&self, texture: &Texture2, format: image::Format, data: &[u8]) {
        self.backend.bind_texture(gl::TEXTURE_2D, texture.id());
        let (ty, fmt) = format.as_gl_enums();
        self.backend.tex_image_2d(
            gl::TEXTURE_2D,
            texture.format().as_gl_enum(),
            texture.width() as u32,
            texture.height() as u32,
            fmt,
            ty,
            data.as_ptr() as *const _,
        );
        if texture.mipmap() {
            self.backend.generate_mipmap(gl::TEXTURE_2D);
        }
        self.backend.bind_texture(gl::TEXTURE_2D, 0);
    }

    /// Bind a texture to the given texture unit and apply the sampler
    /// parameters.
    pub fn bind_texture2(&self, unit: u32, texture: &Texture2, sampler: &Sampler2) {
        self.backend.active_texture(unit);
        self.backend.bind_texture(gl::TEXTURE_2D, texture.id());
        self.backend.tex_parameteri(
            gl::TEXTURE_2D,
            gl::TEXTURE_MAG_FILTER,
            sampler.mag_filter.as_gl_enum(),
        );
        self.backend.tex_parameteri(
            gl::TEXTURE_2D,
            gl::TEXTURE_MIN_FILTER,
            sampler.min_filter.as_gl_enum(),
        );
        self.backend.tex_parameteri(
            gl::TEXTURE_2D,
            gl::TEXTURE_WRAP_S,
            sampler.wrap_s.as_gl_enum(),
        );
        self.backend.tex_parameteri(
            gl::TEXTURE_2D,
            gl::TEXTURE_WRAP_T,
            sampler.wrap_t.as_gl_enum(),
        );
    }

    /// Clear the given texture unit.
    pub fn unbind_texture2(&self, unit: u32) {
        self.backend.active_texture(unit);
        self.backend.bind_texture(gl::TEXTURE_2D, 0);
    }

    // Draw call operations

    /// Perform a draw call with the current program.
    ///
    /// The vertex array is bound first if it is not already current.
    /// Drawing with no program bound is a caller mistake the library
    /// does not defend against; it is logged for diagnosis.
    pub fn draw(&self, vertex_array: &VertexArray, draw_call: &DrawCall) {
        if self.bindings.program.get() == 0 {
            warn!(target: "shade", "draw issued with no program bound");
        }
        if self.bindings.vertex_array.get() != vertex_array.id() {
            self.bind_vertex_array(vertex_array);
        }
        let mode = draw_call.primitive.as_gl_enum();
        match draw_call.kind {
            Kind::Arrays => {
                self.backend.draw_arrays(mode, draw_call.offset, draw_call.count);
            }
            Kind::Elements => match vertex_array.indices() {
                Some(accessor) => {
                    let format = accessor.format().gl_data_type();
                    self.backend.draw_elements(mode, draw_call.offset, draw_call.count, format);
                }
                None => {
                    error!(
                        target: "shade",
                        "element draw issued against a vertex array with no indices",
                    );
                }
            },
        }
    }

    // Lifecycle operations

    /// Release the GPU objects of every handle dropped since the last
    /// call.
    ///
    /// Dropped handles park their IDs on the factory queues; draining
    /// them here keeps releases on the context thread regardless of
    /// where the handle was dropped.
    pub fn cleanup(&self) {
        let backend = &self.backend;
        self.buffer_queue.drain(|id| backend.delete_buffer(id));
        self.vertex_array_queue.drain(|id| backend.delete_vertex_array(id));
        self.texture_queue.drain(|id| backend.delete_texture(id));
        self.program_queue.drain(|destroyed| match destroyed {
            Destroyed::Shader(id) => backend.delete_shader(id),
            Destroyed::Program(id) => backend.delete_program(id),
        });
    }
}
