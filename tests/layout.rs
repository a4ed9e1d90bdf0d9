//! CPU-side checks: vertex layout arithmetic, format plumbing, and
//! the construction-time error paths that need no GL context.

#[macro_use]
extern crate shade;

use std::{fs, io, mem};

use shade::buffer::Format;
use shade::program::Error;
use shade::shader;

#[repr(C)]
struct TexturedVertex {
    position: [f32; 3],
    color: [f32; 3],
    tex_coord: [f32; 2],
}

#[repr(C)]
struct SpriteVertex {
    position: [f32; 3],
    tex_coord: [f32; 2],
}

#[test]
fn interleaved_layout_arithmetic() {
    // [x,y,z, r,g,b, u,v], stride 8 floats
    assert_eq!(0, offset_of!(TexturedVertex::position));
    assert_eq!(12, offset_of!(TexturedVertex::color));
    assert_eq!(24, offset_of!(TexturedVertex::tex_coord));
    assert_eq!(32, mem::size_of::<TexturedVertex>());

    // [x,y,z, u,v], stride 5 floats
    assert_eq!(0, offset_of!(SpriteVertex::position));
    assert_eq!(12, offset_of!(SpriteVertex::tex_coord));
    assert_eq!(20, mem::size_of::<SpriteVertex>());
}

#[test]
fn format_component_counts() {
    assert_eq!(3, Format::F32(3).size());
    assert_eq!(2, Format::F32(2).size());
    assert_eq!(1, Format::U32(1).size());
    assert!(!Format::F32(3).norm());
    assert!(Format::U8Norm(4).norm());
    assert!(!Format::U8(4).norm());
}

#[test]
#[should_panic]
fn format_component_count_out_of_range() {
    let _ = Format::F32(5).size();
}

#[test]
fn missing_source_file_is_io_error() {
    let err = shader::load("no/such/shader.vs.glsl").unwrap_err();
    assert_eq!(io::ErrorKind::NotFound, err.kind());
}

#[test]
fn interior_nul_in_source_is_io_error() {
    let path = std::env::temp_dir().join("shade_interior_nul.glsl");
    {
        use std::io::Write;
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"void\0main").unwrap();
    }
    let err = shader::load(&path).unwrap_err();
    assert_eq!(io::ErrorKind::InvalidData, err.kind());
    let _ = fs::remove_file(&path);
}

#[test]
fn diagnostics_display_carries_the_log() {
    let compile = Error::Compile {
        kind: shader::Kind::Fragment,
        log: "0:3(1): error: syntax error".to_string(),
    };
    let rendered = format!("{}", compile);
    assert!(rendered.contains("fragment"));
    assert!(rendered.contains("syntax error"));

    let link = Error::Link {
        log: "undefined reference".to_string(),
    };
    assert!(format!("{}", link).contains("undefined reference"));
}
