//! Helper macros.

/// Returns the offset of a field in a `struct`.
///
/// ```rust
/// # #[macro_use] extern crate shade;
/// #[repr(C)]
/// struct Vertex {
///     position: [f32; 3],
///     tex_coord: [f32; 2],
/// }
///
/// # fn main() {
/// assert_eq!(0, offset_of!(Vertex::position));
/// assert_eq!(12, offset_of!(Vertex::tex_coord));
/// # }
/// ```
#[macro_export]
macro_rules! offset_of {
    ($ty:ident::$field:ident) => {
        {
            let uninit = ::std::mem::MaybeUninit::<$ty>::uninit();
            let base = uninit.as_ptr();
            let offset = unsafe {
                let field = ::std::ptr::addr_of!((*base).$field);
                (field as usize) - (base as usize)
            };
            offset
        }
    };

    ($ty:ident::$field:ident[$index:expr]) => {
        {
            let uninit = ::std::mem::MaybeUninit::<$ty>::uninit();
            let base = uninit.as_ptr();
            let offset = unsafe {
                let field = ::std::ptr::addr_of!((*base).$field[$index]);
                (field as usize) - (base as usize)
            };
            offset
        }
    };
}
