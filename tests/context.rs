//! End-to-end checks against a headless GL context.
//!
//! The scenarios share one context and run sequentially; when no
//! context can be created (e.g. a display-less CI machine) the test
//! reports a skip and passes.

extern crate env_logger;
extern crate glutin;
extern crate shade;

use glutin::GlContext;
use shade::buffer::Format;
use shade::program;
use shade::shader;
use shade::util::cstr;
use shade::{ClearOp, DrawCall, Factory, Primitive, Uniform};

const WIDTH: u32 = 256;
const HEIGHT: u32 = 256;

const VS_PASSTHROUGH: &'static [u8] = b"#version 330 core

layout(location = 0) in vec3 pos;

void main() {
    gl_Position = vec4(pos.xyz, 1.0);
}
\0";

const VS_TRANSFORM: &'static [u8] = b"#version 330 core

layout(location = 0) in vec3 pos;

uniform mat4 transform;

void main() {
    gl_Position = transform * vec4(pos.xyz, 1.0);
}
\0";

const FS_ORANGE: &'static [u8] = b"#version 330 core

out vec4 fragColor;

void main() {
    fragColor = vec4(1.0f, 0.5f, 0.25f, 1.0f);
}
\0";

const FS_RED: &'static [u8] = b"#version 330 core

out vec4 fragColor;

void main() {
    fragColor = vec4(1.0f, 0.0f, 0.0f, 1.0f);
}
\0";

// Missing semicolon after the assignment.
const FS_BROKEN: &'static [u8] = b"#version 330 core

out vec4 fragColor;

void main() {
    fragColor = vec4(1.0f, 0.0f, 0.0f, 1.0f)
}
\0";

const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

// 90 degrees counter-clockwise about Z, column-major.
const ROTATE_90: [f32; 16] = [
    0.0, 1.0, 0.0, 0.0,
    -1.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

const BLACK: [u8; 4] = [0, 0, 0, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const ORANGE: [u8; 4] = [255, 128, 64, 255];

fn headless_factory() -> Option<(glutin::HeadlessContext, Factory)> {
    let context = match glutin::HeadlessRendererBuilder::new(WIDTH, HEIGHT)
        .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, (3, 3)))
        .build()
    {
        Ok(context) => context,
        Err(_) => return None,
    };
    if unsafe { context.make_current() }.is_err() {
        return None;
    }
    let factory = shade::init(|sym| context.get_proc_address(sym) as *const _);
    factory.viewport(0, 0, WIDTH, HEIGHT);
    Some((context, factory))
}

/// Maps a normalized device coordinate to the pixel it lands on.
fn ndc_to_pixel(x: f32, y: f32) -> (u32, u32) {
    let px = ((x + 1.0) / 2.0 * WIDTH as f32) as u32;
    let py = ((y + 1.0) / 2.0 * HEIGHT as f32) as u32;
    (px, py)
}

fn pixel(factory: &Factory, x: u32, y: u32) -> [u8; 4] {
    let data = factory.read_pixels(x, y, 1, 1);
    [data[0], data[1], data[2], data[3]]
}

fn assert_pixel(expected: [u8; 4], actual: [u8; 4]) {
    for channel in 0..4 {
        let delta = (expected[channel] as i32 - actual[channel] as i32).abs();
        assert!(
            delta <= 2,
            "expected {:?}, got {:?}",
            expected,
            actual,
        );
    }
}

fn triangle_vertex_array(factory: &Factory) -> shade::VertexArray {
    // [x,y,z] stride 3 floats, drawn through an index list {0,1,2}
    const VERTICES: &'static [f32] = &[
        0.5, -0.5, 0.0,
        -0.5, -0.5, 0.0,
        0.0, 0.5, 0.0,
    ];
    const INDICES: &'static [u32] = &[0, 1, 2];

    let vertex_buffer = factory.buffer(
        shade::buffer::Kind::Array,
        shade::buffer::Usage::StaticDraw,
    );
    factory.initialize_buffer(&vertex_buffer, VERTICES);

    let index_buffer = factory.buffer(
        shade::buffer::Kind::Index,
        shade::buffer::Usage::StaticDraw,
    );
    factory.initialize_buffer(&index_buffer, INDICES);

    let mut builder = shade::VertexArray::builder();
    builder.attributes.insert(
        0,
        shade::Accessor::new(vertex_buffer, Format::F32(3), 0, 12),
    );
    builder.indices = Some(shade::Accessor::new(index_buffer, Format::U32(1), 0, 0));
    factory.vertex_array(builder)
}

fn quad_vertex_array(factory: &Factory, min: [f32; 2], max: [f32; 2]) -> shade::VertexArray {
    let vertices: [f32; 12] = [
        max[0], max[1], 0.0,
        max[0], min[1], 0.0,
        min[0], min[1], 0.0,
        min[0], max[1], 0.0,
    ];
    const INDICES: &'static [u32] = &[0, 1, 3, 1, 2, 3];

    let vertex_buffer = factory.buffer(
        shade::buffer::Kind::Array,
        shade::buffer::Usage::StaticDraw,
    );
    factory.initialize_buffer(&vertex_buffer, &vertices);

    let index_buffer = factory.buffer(
        shade::buffer::Kind::Index,
        shade::buffer::Usage::StaticDraw,
    );
    factory.initialize_buffer(&index_buffer, INDICES);

    let mut builder = shade::VertexArray::builder();
    builder.attributes.insert(
        0,
        shade::Accessor::new(vertex_buffer, Format::F32(3), 0, 12),
    );
    builder.indices = Some(shade::Accessor::new(index_buffer, Format::U32(1), 0, 0));
    factory.vertex_array(builder)
}

fn elements(count: usize) -> DrawCall {
    DrawCall {
        offset: 0,
        count: count,
        primitive: Primitive::Triangles,
        kind: shade::draw_call::Kind::Elements,
    }
}

fn link_and_bind(factory: &Factory) {
    let program = factory.program_from_sources(cstr(VS_PASSTHROUGH), cstr(FS_ORANGE));
    assert!(program.is_usable());
    assert!(program.errors().is_empty());

    factory.bind_program(&program);
    assert!(factory.is_current(&program));
    let bound = factory.query_current_program();
    assert!(bound != 0);

    // Re-binding leaves the current-program slot identical.
    factory.bind_program(&program);
    assert_eq!(bound, factory.query_current_program());
    assert!(factory.is_current(&program));

    factory.unbind_program();
    assert_eq!(0, factory.query_current_program());
    assert!(!factory.is_current(&program));
}

fn compile_failure(factory: &Factory) {
    let program = factory.program_from_sources(cstr(VS_PASSTHROUGH), cstr(FS_BROKEN));
    assert!(!program.is_usable());
    assert!(!program.errors().is_empty());
    match program.errors()[0] {
        program::Error::Compile { kind, ref log } => {
            assert_eq!(shader::Kind::Fragment, kind);
            assert!(!log.is_empty());
        }
        ref other => panic!("unexpected diagnostic: {}", other),
    }

    // Binding an unusable program is permitted and must not terminate.
    factory.bind_program(&program);
    factory.unbind_program();
}

fn missing_uniform(factory: &Factory) {
    let program = factory.program_from_sources(cstr(VS_TRANSFORM), cstr(FS_RED));
    assert!(program.is_usable());

    let wrote = factory.set_uniform_by_name(
        &program,
        cstr(b"no_such_uniform\0"),
        Uniform::Float(1.0),
    );
    assert!(!wrote);

    let wrote = factory.set_uniform_by_name(
        &program,
        cstr(b"transform\0"),
        Uniform::Mat4(IDENTITY),
    );
    assert!(wrote);

    factory.unbind_program();
}

fn mat4_round_trip(factory: &Factory) {
    let program = factory.program_from_sources(cstr(VS_TRANSFORM), cstr(FS_RED));
    assert!(program.is_usable());

    let location = match factory.query_uniform_location(&program, cstr(b"transform\0")) {
        Some(location) => location,
        None => panic!("transform uniform not active"),
    };
    factory.set_uniform(&program, location, Uniform::Mat4(IDENTITY));
    assert_eq!(IDENTITY, factory.query_uniform_mat4(&program, location));

    factory.unbind_program();
}

fn constant_color_triangle(factory: &Factory) {
    let program = factory.program_from_sources(cstr(VS_PASSTHROUGH), cstr(FS_ORANGE));
    assert!(program.is_usable());
    let vertex_array = triangle_vertex_array(factory);

    factory.clear(ClearOp::color([0.0, 0.0, 0.0, 1.0]));
    factory.bind_program(&program);
    factory.draw(&vertex_array, &elements(3));

    // Centroid of {(0.5,-0.5), (-0.5,-0.5), (0.0,0.5)}.
    let (x, y) = ndc_to_pixel(0.0, -1.0 / 6.0);
    assert_pixel(ORANGE, pixel(factory, x, y));

    factory.unbind_vertex_array();
    factory.unbind_program();
}

fn rotated_quad(factory: &Factory) {
    let program = factory.program_from_sources(cstr(VS_TRANSFORM), cstr(FS_RED));
    assert!(program.is_usable());
    let vertex_array = quad_vertex_array(factory, [0.5, -0.2], [0.9, 0.2]);
    let location = match factory.query_uniform_location(&program, cstr(b"transform\0")) {
        Some(location) => location,
        None => panic!("transform uniform not active"),
    };

    // Identity: the quad sits on the right edge.
    let (right_x, right_y) = ndc_to_pixel(0.7, 0.0);
    let (top_x, top_y) = ndc_to_pixel(0.0, 0.7);

    factory.clear(ClearOp::color([0.0, 0.0, 0.0, 1.0]));
    factory.bind_program(&program);
    factory.set_uniform(&program, location, Uniform::Mat4(IDENTITY));
    factory.draw(&vertex_array, &elements(6));
    assert_pixel(RED, pixel(factory, right_x, right_y));
    assert_pixel(BLACK, pixel(factory, top_x, top_y));

    // Rotating 90 degrees counter-clockwise moves it to the top edge.
    factory.clear(ClearOp::color([0.0, 0.0, 0.0, 1.0]));
    factory.set_uniform(&program, location, Uniform::Mat4(ROTATE_90));
    factory.draw(&vertex_array, &elements(6));
    assert_pixel(BLACK, pixel(factory, right_x, right_y));
    assert_pixel(RED, pixel(factory, top_x, top_y));

    factory.unbind_vertex_array();
    factory.unbind_program();
}

#[test]
fn shader_program_lifecycle() {
    let _ = env_logger::init();
    let (context, factory) = match headless_factory() {
        Some(pair) => pair,
        None => {
            eprintln!("no GL context available; skipping");
            return;
        }
    };

    link_and_bind(&factory);
    compile_failure(&factory);
    missing_uniform(&factory);
    mat4_round_trip(&factory);
    constant_color_triangle(&factory);
    rotated_quad(&factory);

    factory.cleanup();
    drop(context);
}
