extern crate env_logger;
extern crate glutin;
extern crate shade;

use shade::buffer::Format;
use shade::util::cstr;
use shade::{ClearOp, DrawCall, Primitive};

use glutin::ElementState::Released;
use glutin::Event;
use glutin::GlContext;
use glutin::VirtualKeyCode as Key;
use glutin::WindowEvent;

#[repr(C)]
struct Vertex {
    position: [f32; 3],
}

const QUAD_DATA: &'static [Vertex] = &[
    Vertex { position: [ 0.5, 0.5, 0.0 ] },
    Vertex { position: [ 0.5, -0.5, 0.0 ] },
    Vertex { position: [ -0.5, -0.5, 0.0 ] },
    Vertex { position: [ -0.5, 0.5, 0.0 ] },
];

const QUAD_INDICES: &'static [u32] = &[0, 1, 3, 1, 2, 3];

const VERTEX_SHADER: &'static [u8] = b"#version 460 core

layout(location = 0) in vec3 pos;

void main() {
    gl_Position = vec4(pos.xyz, 1.0);
}
\0";

const FRAGMENT_SHADER: &'static [u8] = b"#version 460 core

out vec4 fragColor;

void main() {
    fragColor = vec4(1.0f, 0.5f, 0.25f, 1.0f);
}
\0";

fn main() {
    let _ = env_logger::init();

    let mut events_loop = glutin::EventsLoop::new();
    let window_builder = glutin::WindowBuilder::new()
        .with_title("triangle")
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

    let program = factory.program_from_sources(cstr(VERTEX_SHADER), cstr(FRAGMENT_SHADER));

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
        shade::Accessor::new(vertex_buffer, Format::F32(3), 0, stride),
    );
    builder.indices = Some(shade::Accessor::new(index_buffer, Format::U32(1), 0, 0));
    let vertex_array = factory.vertex_array(builder);

    let draw_call = DrawCall {
        offset: 0,
        count: QUAD_INDICES.len(),
        primitive: Primitive::Triangles,
        kind: shade::draw_call::Kind::Elements,
    };

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
        factory.draw(&vertex_array, &draw_call);
        factory.unbind_vertex_array();
        factory.unbind_program();
        window.swap_buffers().unwrap();
        factory.cleanup();
    }
}
