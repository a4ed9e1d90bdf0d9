#[macro_use]
extern crate shade;
extern crate env_logger;
extern crate glutin;

use std::time;

use shade::buffer::Format;
use shade::util::cstr;
use shade::{ClearOp, DrawCall, Primitive, Uniform};

use glutin::ElementState::Released;
use glutin::Event;
use glutin::GlContext;
use glutin::VirtualKeyCode as Key;
use glutin::WindowEvent;

#[repr(C)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 3],
}

const TRIANGLE_DATA: &'static [Vertex] = &[
    Vertex { position: [ 0.5, -0.5, 0.0 ], color: [ 1.0, 0.0, 0.0 ] },
    Vertex { position: [ -0.5, -0.5, 0.0 ], color: [ 0.0, 1.0, 0.0 ] },
    Vertex { position: [ 0.0, 0.5, 0.0 ], color: [ 0.0, 0.0, 1.0 ] },
];

const TRIANGLE_INDICES: &'static [u32] = &[0, 1, 2];

fn main() {
    let _ = env_logger::init();

    let mut events_loop = glutin::EventsLoop::new();
    let window_builder = glutin::WindowBuilder::new()
        .with_title("shaders")
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
        .program_from_paths("demos/shaders/shader.vs.glsl", "demos/shaders/shader.fs.glsl")
        .expect("shader sources unreadable");

    let vertex_buffer = factory.buffer(
        shade::buffer::Kind::Array,
        shade::buffer::Usage::StaticDraw,
    );
    factory.initialize_buffer(&vertex_buffer, TRIANGLE_DATA);

    let index_buffer = factory.buffer(
        shade::buffer::Kind::Index,
        shade::buffer::Usage::StaticDraw,
    );
    factory.initialize_buffer(&index_buffer, TRIANGLE_INDICES);

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
            vertex_buffer,
            Format::F32(3),
            offset_of!(Vertex::color),
            stride,
        ),
    );
    builder.indices = Some(shade::Accessor::new(index_buffer, Format::U32(1), 0, 0));
    let vertex_array = factory.vertex_array(builder);

    let draw_call = DrawCall {
        offset: 0,
        count: TRIANGLE_INDICES.len(),
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

        factory.clear(ClearOp::color([0.0, 0.0, 0.0, 1.0]));
        factory.bind_program(&program);

        // `ourColor` is a varying here, not a uniform, so this write
        // quietly resolves to nothing each frame.
        let elapsed = start.elapsed().as_secs() as f32;
        let green = elapsed.sin() / 2.0 + 0.5;
        let _ = factory.set_uniform_by_name(
            &program,
            cstr(b"ourColor\0"),
            Uniform::Vec4([0.0, green, 0.0, 1.0]),
        );

        factory.draw(&vertex_array, &draw_call);
        factory.unbind_vertex_array();
        factory.unbind_program();
        window.swap_buffers().unwrap();
        factory.cleanup();
    }
}
