extern crate env_logger;
extern crate glutin;
extern crate rand;
extern crate shade;

#[path = "../support.rs"]
mod support;

use std::time;

use rand::Rng;
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
    tex_coord: [f32; 2],
}

const QUAD_DATA: &'static [Vertex] = &[
    Vertex { position: [ 0.5, 0.5, 0.0 ], tex_coord: [ 1.0, 1.0 ] },
    Vertex { position: [ 0.5, -0.5, 0.0 ], tex_coord: [ 1.0, 0.0 ] },
    Vertex { position: [ -0.5, -0.5, 0.0 ], tex_coord: [ 0.0, 0.0 ] },
    Vertex { position: [ -0.5, 0.5, 0.0 ], tex_coord: [ 0.0, 1.0 ] },
];

const QUAD_INDICES: &'static [u32] = &[0, 1, 3, 1, 2, 3];

const SPRITE_SIZE: usize = 128;
const BOUND_X: f32 = 0.78;
const BOUND_Y: f32 = 0.8;

fn random_color() -> [f32; 4] {
    let mut rng = rand::thread_rng();
    let r = rng.gen_range(10, 246) as f32 / 255.0;
    let g = rng.gen_range(10, 246) as f32 / 255.0;
    let b = rng.gen_range(10, 246) as f32 / 255.0;
    [r, g, b, 1.0]
}

fn main() {
    let _ = env_logger::init();

    let mut events_loop = glutin::EventsLoop::new();
    let window_builder = glutin::WindowBuilder::new()
        .with_title("dvd")
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
        .program_from_paths("demos/dvd/shader.vs.glsl", "demos/dvd/shader.fs.glsl")
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
        shade::Accessor::new(vertex_buffer.clone(), Format::F32(3), 0, stride),
    );
    builder.attributes.insert(
        1,
        shade::Accessor::new(
            vertex_buffer,
            Format::F32(2),
            3 * std::mem::size_of::<f32>(),
            stride,
        ),
    );
    builder.indices = Some(shade::Accessor::new(index_buffer, Format::U32(1), 0, 0));
    let vertex_array = factory.vertex_array(builder);

    let texture = factory.texture2(
        SPRITE_SIZE as u32,
        SPRITE_SIZE as u32,
        true,
        shade::texture::Format::Rgba8,
    );
    factory.write_texture2(
        &texture,
        shade::image::Format::U8Rgba,
        &support::sprite(SPRITE_SIZE, SPRITE_SIZE),
    );
    let sampler = Sampler2 {
        wrap_s: shade::sampler::Wrap::ClampToEdge,
        wrap_t: shade::sampler::Wrap::ClampToEdge,
        ..Default::default()
    };

    factory.bind_program(&program);
    let _ = factory.set_uniform_by_name(&program, cstr(b"texture_sample\0"), Uniform::Int(0));
    let _ = factory.set_uniform_by_name(
        &program,
        cstr(b"objColor\0"),
        Uniform::Vec4([1.0, 1.0, 1.0, 1.0]),
    );
    factory.unbind_program();

    let transform_location = factory.query_uniform_location(&program, cstr(b"transform\0"));
    let color_location = factory.query_uniform_location(&program, cstr(b"objColor\0"));

    let draw_call = DrawCall {
        offset: 0,
        count: QUAD_INDICES.len(),
        primitive: Primitive::Triangles,
        kind: shade::draw_call::Kind::Elements,
    };

    let mut velocity_x = 0.5f32;
    let mut velocity_y = 0.25f32;
    let mut offset_x = 0.0f32;
    let mut offset_y = 0.0f32;

    let mut last_frame = time::Instant::now();
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

        let dt = support::seconds(last_frame);
        last_frame = time::Instant::now();
        offset_x += velocity_x * dt;
        offset_y += velocity_y * dt;

        factory.clear(ClearOp::color([0.0, 0.0, 0.0, 1.0]));
        factory.bind_texture2(0, &texture, &sampler);
        factory.bind_program(&program);

        if offset_x > BOUND_X || offset_x < -BOUND_X {
            velocity_x = -velocity_x;
            if let Some(location) = color_location {
                factory.set_uniform(&program, location, Uniform::Vec4(random_color()));
            }
        }
        if offset_y > BOUND_Y || offset_y < -BOUND_Y {
            velocity_y = -velocity_y;
            if let Some(location) = color_location {
                factory.set_uniform(&program, location, Uniform::Vec4(random_color()));
            }
        }

        let transform = support::multiply(
            &support::translate(offset_x, offset_y, 0.0),
            &support::scale(0.5, 1.0, 1.0),
        );
        if let Some(location) = transform_location {
            factory.set_uniform(&program, location, Uniform::Mat4(transform));
        }

        factory.draw(&vertex_array, &draw_call);
        factory.unbind_vertex_array();
        factory.unbind_program();
        factory.unbind_texture2(0);
        window.swap_buffers().unwrap();
        factory.cleanup();
    }
}
