extern crate env_logger;
extern crate glutin;
#[macro_use]
extern crate log;
extern crate shade;

#[path = "../support.rs"]
mod support;

use std::time;

use shade::buffer::Format;
use shade::util::cstr;
use shade::{ClearOp, DepthTest, DrawCall, Primitive, Sampler2, Uniform};

use glutin::ElementState::{Pressed, Released};
use glutin::Event;
use glutin::GlContext;
use glutin::MouseButton;
use glutin::MouseScrollDelta;
use glutin::VirtualKeyCode as Key;
use glutin::WindowEvent;

#[repr(C)]
struct Vertex {
    position: [f32; 3],
    tex_coord: [f32; 2],
}

const CUBE_DATA: &'static [Vertex] = &[
    Vertex { position: [ -0.5, -0.5, -0.5 ], tex_coord: [ 0.0, 0.0 ] },
    Vertex { position: [ 0.5, -0.5, -0.5 ], tex_coord: [ 1.0, 0.0 ] },
    Vertex { position: [ 0.5, 0.5, -0.5 ], tex_coord: [ 1.0, 1.0 ] },
    Vertex { position: [ 0.5, 0.5, -0.5 ], tex_coord: [ 1.0, 1.0 ] },
    Vertex { position: [ -0.5, 0.5, -0.5 ], tex_coord: [ 0.0, 1.0 ] },
    Vertex { position: [ -0.5, -0.5, -0.5 ], tex_coord: [ 0.0, 0.0 ] },

    Vertex { position: [ -0.5, -0.5, 0.5 ], tex_coord: [ 0.0, 0.0 ] },
    Vertex { position: [ 0.5, -0.5, 0.5 ], tex_coord: [ 1.0, 0.0 ] },
    Vertex { position: [ 0.5, 0.5, 0.5 ], tex_coord: [ 1.0, 1.0 ] },
    Vertex { position: [ 0.5, 0.5, 0.5 ], tex_coord: [ 1.0, 1.0 ] },
    Vertex { position: [ -0.5, 0.5, 0.5 ], tex_coord: [ 0.0, 1.0 ] },
    Vertex { position: [ -0.5, -0.5, 0.5 ], tex_coord: [ 0.0, 0.0 ] },

    Vertex { position: [ -0.5, 0.5, 0.5 ], tex_coord: [ 1.0, 0.0 ] },
    Vertex { position: [ -0.5, 0.5, -0.5 ], tex_coord: [ 1.0, 1.0 ] },
    Vertex { position: [ -0.5, -0.5, -0.5 ], tex_coord: [ 0.0, 1.0 ] },
    Vertex { position: [ -0.5, -0.5, -0.5 ], tex_coord: [ 0.0, 1.0 ] },
    Vertex { position: [ -0.5, -0.5, 0.5 ], tex_coord: [ 0.0, 0.0 ] },
    Vertex { position: [ -0.5, 0.5, 0.5 ], tex_coord: [ 1.0, 0.0 ] },

    Vertex { position: [ 0.5, 0.5, 0.5 ], tex_coord: [ 1.0, 0.0 ] },
    Vertex { position: [ 0.5, 0.5, -0.5 ], tex_coord: [ 1.0, 1.0 ] },
    Vertex { position: [ 0.5, -0.5, -0.5 ], tex_coord: [ 0.0, 1.0 ] },
    Vertex { position: [ 0.5, -0.5, -0.5 ], tex_coord: [ 0.0, 1.0 ] },
    Vertex { position: [ 0.5, -0.5, 0.5 ], tex_coord: [ 0.0, 0.0 ] },
    Vertex { position: [ 0.5, 0.5, 0.5 ], tex_coord: [ 1.0, 0.0 ] },

    Vertex { position: [ -0.5, -0.5, -0.5 ], tex_coord: [ 0.0, 1.0 ] },
    Vertex { position: [ 0.5, -0.5, -0.5 ], tex_coord: [ 1.0, 1.0 ] },
    Vertex { position: [ 0.5, -0.5, 0.5 ], tex_coord: [ 1.0, 0.0 ] },
    Vertex { position: [ 0.5, -0.5, 0.5 ], tex_coord: [ 1.0, 0.0 ] },
    Vertex { position: [ -0.5, -0.5, 0.5 ], tex_coord: [ 0.0, 0.0 ] },
    Vertex { position: [ -0.5, -0.5, -0.5 ], tex_coord: [ 0.0, 1.0 ] },

    Vertex { position: [ -0.5, 0.5, -0.5 ], tex_coord: [ 0.0, 1.0 ] },
    Vertex { position: [ 0.5, 0.5, -0.5 ], tex_coord: [ 1.0, 1.0 ] },
    Vertex { position: [ 0.5, 0.5, 0.5 ], tex_coord: [ 1.0, 0.0 ] },
    Vertex { position: [ 0.5, 0.5, 0.5 ], tex_coord: [ 1.0, 0.0 ] },
    Vertex { position: [ -0.5, 0.5, 0.5 ], tex_coord: [ 0.0, 0.0 ] },
    Vertex { position: [ -0.5, 0.5, -0.5 ], tex_coord: [ 0.0, 1.0 ] },
];

const CUBE_POSITIONS: &'static [[f32; 3]] = &[
    [ 0.0, 0.0, 0.0 ],
    [ 2.0, 5.0, -15.0 ],
    [ -1.5, -2.2, -2.5 ],
    [ -3.8, -2.0, -12.3 ],
    [ 2.4, -0.4, -3.5 ],
    [ -1.7, 3.0, -7.5 ],
    [ 1.3, -2.0, -2.5 ],
    [ 1.5, 2.0, -2.5 ],
    [ 1.5, 0.2, -1.5 ],
    [ -1.3, 1.0, -1.5 ],
];

const TEXTURE_SIZE: usize = 64;
const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;
const MOVE_STEP: f32 = 0.5;
const DRAG_SENSITIVITY: f32 = 0.1;

fn main() {
    let _ = env_logger::init();

    let mut events_loop = glutin::EventsLoop::new();
    let window_builder = glutin::WindowBuilder::new()
        .with_title("camera")
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
    info!(
        "max vertex attributes: {}",
        factory.query_max_vertex_attributes(),
    );

    let program = factory
        .program_from_paths("demos/camera/shader.vs.glsl", "demos/camera/shader.fs.glsl")
        .expect("shader sources unreadable");

    let vertex_buffer = factory.buffer(
        shade::buffer::Kind::Array,
        shade::buffer::Usage::StaticDraw,
    );
    factory.initialize_buffer(&vertex_buffer, CUBE_DATA);

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

    let projection_location = factory.query_uniform_location(&program, cstr(b"projection\0"));
    let view_location = factory.query_uniform_location(&program, cstr(b"view\0"));
    let model_location = factory.query_uniform_location(&program, cstr(b"model\0"));

    factory.set_depth_test(Some(DepthTest::LessThan));

    let draw_call = DrawCall {
        offset: 0,
        count: CUBE_DATA.len(),
        primitive: Primitive::Triangles,
        kind: shade::draw_call::Kind::Arrays,
    };

    let mut camera_position = [0.0f32, 0.0, 3.0];
    let mut yaw = -90.0f32;
    let mut pitch = 0.0f32;
    let mut fov = 45.0f32;
    let mut aspect = 1280.0 / 720.0f32;
    let mut dragging = false;
    let mut last_cursor = (0.0f64, 0.0f64);

    let start = time::Instant::now();
    let mut running = true;
    while running {
        events_loop.poll_events(|event| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Closed => running = false,
                WindowEvent::Resized(width, height) => {
                    factory.viewport(0, 0, width, height);
                    if height > 0 {
                        aspect = width as f32 / height as f32;
                    }
                }
                WindowEvent::KeyboardInput { input, .. } => {
                    let front = support::direction(yaw.to_radians(), pitch.to_radians());
                    match (input.virtual_keycode, input.state) {
                        (Some(Key::Escape), Released) => running = false,
                        (Some(Key::W), Pressed) => {
                            for i in 0..3 {
                                camera_position[i] += front[i] * MOVE_STEP;
                            }
                        }
                        (Some(Key::S), Pressed) => {
                            for i in 0..3 {
                                camera_position[i] -= front[i] * MOVE_STEP;
                            }
                        }
                        (Some(Key::A), Pressed) => {
                            camera_position[0] += front[2] * MOVE_STEP;
                            camera_position[2] -= front[0] * MOVE_STEP;
                        }
                        (Some(Key::D), Pressed) => {
                            camera_position[0] -= front[2] * MOVE_STEP;
                            camera_position[2] += front[0] * MOVE_STEP;
                        }
                        _ => {}
                    }
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    if button == MouseButton::Left {
                        dragging = state == Pressed;
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    if dragging {
                        let x_offset = (position.0 - last_cursor.0) as f32;
                        let y_offset = (last_cursor.1 - position.1) as f32;
                        yaw += x_offset * DRAG_SENSITIVITY;
                        pitch += y_offset * DRAG_SENSITIVITY;
                        if pitch > 89.0 {
                            pitch = 89.0;
                        }
                        if pitch < -89.0 {
                            pitch = -89.0;
                        }
                    }
                    last_cursor = position;
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let scroll = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(_, y) => y,
                    };
                    fov -= scroll;
                    if fov < 1.0 {
                        fov = 1.0;
                    }
                    if fov > 45.0 {
                        fov = 45.0;
                    }
                }
                _ => {}
            },
            _ => {}
        });

        let front = support::direction(yaw.to_radians(), pitch.to_radians());
        let center = [
            camera_position[0] + front[0],
            camera_position[1] + front[1],
            camera_position[2] + front[2],
        ];
        let view = support::look_at(camera_position, center, [0.0, 1.0, 0.0]);
        let projection = support::perspective(fov.to_radians(), aspect, NEAR, FAR);

        factory.clear(ClearOp::color_depth([0.0, 0.0, 0.0, 1.0], 1.0));
        factory.bind_texture2(0, &checker, &sampler);
        factory.bind_texture2(1, &gradient, &sampler);
        factory.bind_program(&program);
        if let Some(location) = projection_location {
            factory.set_uniform(&program, location, Uniform::Mat4(projection));
        }
        if let Some(location) = view_location {
            factory.set_uniform(&program, location, Uniform::Mat4(view));
        }

        let elapsed = support::seconds(start);
        for (i, position) in CUBE_POSITIONS.iter().enumerate() {
            let angle = (i as f32 * 20.0 * elapsed).to_radians();
            let model = support::multiply(
                &support::translate(position[0], position[1], position[2]),
                &support::rotate_axis([1.0, 0.3, 0.5], angle),
            );
            if let Some(location) = model_location {
                factory.set_uniform(&program, location, Uniform::Mat4(model));
            }
            factory.draw(&vertex_array, &draw_call);
        }

        factory.unbind_vertex_array();
        factory.unbind_program();
        factory.unbind_texture2(1);
        factory.unbind_texture2(0);
        window.swap_buffers().unwrap();
        factory.cleanup();
    }
}
