#[macro_use]
extern crate shade;
extern crate env_logger;
extern crate glutin;

#[path = "../support.rs"]
mod support;

use std::time;

use shade::buffer::Format;
use shade::util::cstr;
use shade::{ClearOp, DrawCall, Primitive, Sampler2, Uniform};

use glutin::ElementState::Released;
use glutin::Event;
use glutin::GlContext;
use glutin::VirtualKeyCode as Key;
use glutin::WindowEvent;

#[repr(C)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 3],
    tex_coord: [f32; 2],
}

const QUAD_DATA: &'static [Vertex] = &[
    Vertex { position: [ 0.5, 0.5, 0.0 ], color: [ 1.0, 0.0, 0.0 ], tex_coord: [ 1.0, 1.0 ] },
    Vertex { position: [ 0.5, -0.5, 0.0 ], color: [ 0.0, 1.0, 0.0 ], tex_coord: [ 1.0, 0.0 ] },
    Vertex { position: [ -0.5, -0.5, 0.0 ], color: [ 0.0, 0.0, 1.0 ], tex_coord: [ 0.0, 0.0 ] },
    Vertex { position: [ -0.5, 0.5, 0.0 ], color: [ 1.0, 1.0, 0.0 ], tex_coord: [ 0.0, 1.0 ] },
];

const QUAD_INDICES: &'static [u32] = &[0, 1, 3, 1, 2, 3];

const TEXTURE_SIZE: usize = 64;

fn main() {
    let _ = env_logger::init();

    let mut events_loop = glutin::EventsLoop::new();
    let window_builder = glutin::WindowBuilder::new()
        .with_title("transformations")
        .with_dimensions(1280, 720);
    let context_builder = glutin::ContextBuilder::new()
        .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, (3, 3)))
        .with_vsync(true);
    let window = glutin::GlWindow::new(window_builder, context_builder, &events_loop)
        .expect("window creation failed");
    unsafe {
        window.make_current().expect("context activation failed");
    }
    let factory = shade::init(|sym| window.get_proc_address(sym) as *const _);

    let program = factory
        .program_from_paths(
            "demos/transformations/shader.vs.glsl",
            "demos/transformations/shader.fs.glsl",
        )
        .expect("shader sources unreadable");

    let vertex_buffer = factory.buffer(
        shade::buffer::Kind::Array,
        shade::buffer::Usage::StaticDraw,
    );
    factory.initialize_buffer(&vertex_buffer, QUAD_DATA);

    let index_buffer = factory.buffer(
        shade::buffer::Kind::Index,
        shade::buffer::Usage::StaticDraw,
    );
    factory.initialize_buffer(&index_buffer, QUAD_INDICES);

    let stride = std::mem::size_of::<Vertex>();
    let mut builder = shade::VertexArray::builder();
    builder.attributes.insert(
        0,
        shade::Accessor::new(
            vertex_buffer.clone(),
            Format::F32(3),
            offset_of!(Vertex::position),
            stride,
        ),
    );
    builder.attributes.insert(
        1,
        shade::Accessor::new(
            vertex_buffer.clone(),
            Format::F32(3),
            offset_of!(Vertex::color),
            stride,
        ),
    );
    builder.attributes.insert(
        2,
        shade::Accessor::new(
            vertex_buffer,
            Format::F32(2),
            offset_of!(Vertex::tex_coord),
            stride,
        ),
    );
    builder.indices = Some(shade::Accessor::new(index_buffer, Format::U32(1), 0, 0));
    let vertex_array = factory.vertex_array(builder);

    let checker = factory.texture2(
        TEXTURE_SIZE as u32,
        TEXTURE_SIZE as u32,
        true,
        shade::texture::Format::Rgb8,
    );
    factory.write_texture2(
        &checker,
        shade::image::Format::U8Rgb,
        &support::checkerboard(TEXTURE_SIZE, TEXTURE_SIZE, 8),
    );

    let gradient = factory.texture2(
        TEXTURE_SIZE as u32,
        TEXTURE_SIZE as u32,
        true,
        shade::texture::Format::Rgba8,
    );
    factory.write_texture2(
        &gradient,
        shade::image::Format::U8Rgba,
        &support::gradient(TEXTURE_SIZE, TEXTURE_SIZE),
    );

    let sampler = Sampler2::default();

    factory.bind_program(&program);
    let _ = factory.set_uniform_by_name(&program, cstr(b"texture1\0"), Uniform::Int(0));
    let _ = factory.set_uniform_by_name(&program, cstr(b"texture2\0"), Uniform::Int(1));
    factory.unbind_program();

    let transform_location = factory.query_uniform_location(&program, cstr(b"transform\0"));

    let draw_call = DrawCall {
        offset: 0,
        count: QUAD_INDICES.len(),
        primitive: Primitive::Triangles,
        kind: shade::draw_call::Kind::Elements,
    };

    let start = time::Instant::now();
    let mut running = true;
    while running {
        events_loop.poll_events(|event| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Closed => running = false,
                WindowEvent::Resized(width, height) => {
                    factory.viewport(0, 0, width, height);
                }
                WindowEvent::KeyboardInput { input, .. } => {
                    if let (Some(Key::Escape), Released) = (input.virtual_keycode, input.state) {
                        running = false;
                    }
                }
                _ => {}
            },
            _ => {}
        });

        let transform = support::rotate_z(support::seconds(start));

        factory.clear(ClearOp::color([0.0, 0.0, 0.0, 1.0]));
        factory.bind_texture2(0, &checker, &sampler);
        factory.bind_texture2(1, &gradient, &sampler);
        factory.bind_program(&program);
        if let Some(location) = transform_location {
            factory.set_uniform(&program, location, Uniform::Mat4(transform));
        }
        factory.draw(&vertex_array, &draw_call);
        factory.unbind_vertex_array();
        factory.unbind_program();
        factory.unbind_texture2(1);
        factory.unbind_texture2(0);
        window.swap_buffers().unwrap();
        factory.cleanup();
    }
}
