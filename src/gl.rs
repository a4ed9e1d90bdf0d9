use std::{ffi, os, ptr, rc};

// Import OpenGL bindings.
include!(concat!(env!("OUT_DIR"), "/gl.rs"));

#[derive(Clone)]
pub struct Backend {
    gl: rc::Rc<Gl>,
}

impl Backend {
    /// Constructor.
    pub fn load<F>(mut func: F) -> Self
        where F: FnMut(&str) -> *const ()
    {
        let gl = rc::Rc::new(Gl::load_with(|sym| func(sym) as *const _));
        Backend { gl }
    }

    // Error checking

    /// Corresponds to `glGetError` plus an error check.
    pub fn check_error(&self) {
        let error = unsafe { self.gl.GetError() };
        if error != 0 {
            error!(target: "gl", "0x{:x}", error);
        }
    }

    // Pipeline state operations

    /// Corresponds to `glClear`.
    pub fn clear(&self, ops: u32) {
        trace!(target: "gl", "glClear{:?}", (ops,));
        unsafe {
            self.gl.Clear(ops);
        }
        self.check_error();
    }

    /// Corresponds to `glClearColor`.
    pub fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        trace!(target: "gl", "glClearColor{:?}", (r, g, b, a));
        unsafe {
            self.gl.ClearColor(r, g, b, a);
        }
        self.check_error();
    }

    /// Corresponds to `glClearDepth`.
    pub fn clear_depth(&self, z: f64) {
        trace!(target: "gl", "glClearDepth{:?}", (z,));
        unsafe {
            self.gl.ClearDepth(z);
        }
        self.check_error();
    }

    /// Corresponds to `glEnable`.
    pub fn enable(&self, state: u32) {
        trace!(target: "gl", "glEnable{:?}", (state,));
        unsafe {
            self.gl.Enable(state);
        }
        self.check_error();
    }

    /// Corresponds to `glDisable`.
    pub fn disable(&self, state: u32) {
        trace!(target: "gl", "glDisable{:?}", (state,));
        unsafe {
            self.gl.Disable(state);
        }
        self.check_error();
    }

    /// Corresponds to `glDepthFunc`.
    pub fn depth_func(&self, opt: u32) {
        trace!(target: "gl", "glDepthFunc{:?}", (opt,));
        unsafe {
            self.gl.DepthFunc(opt);
        }
        self.check_error();
    }

    /// Corresponds to `glViewport`.
    pub fn viewport(&self, x: u32, y: u32, w: u32, h: u32) {
        trace!(target: "gl", "glViewport{:?}", (x, y, w, h));
        unsafe {
            self.gl.Viewport(x as _, y as _, w as _, h as _);
        }
        self.check_error();
    }

    /// Corresponds to `glGetIntegerv(pname)` for a single value.
    pub fn get_integer(&self, pname: u32) -> i32 {
        let mut value = 0i32;
        unsafe {
            trace!(target: "gl", "glGetIntegerv{:?} ", (pname,));
            self.gl.GetIntegerv(pname, &mut value as *mut _);
            trace!(target: "gl", "=> {}", value);
        }
        self.check_error();
        value
    }

    /// Corresponds to `glReadPixels` with `GL_RGBA`/`GL_UNSIGNED_BYTE`.
    pub fn read_pixels_rgba(&self, x: u32, y: u32, w: u32, h: u32, contents: &mut [u8]) {
        trace!(target: "gl", "glReadPixels{:?}", (x, y, w, h, RGBA, UNSIGNED_BYTE));
        unsafe {
            self.gl.ReadPixels(
                x as _,
                y as _,
                w as _,
                h as _,
                RGBA,
                UNSIGNED_BYTE,
                contents.as_mut_ptr() as *mut _,
            );
        }
        self.check_error();
    }

    // Buffer operations

    /// Corresponds to `glGenBuffers(1)`.
    pub fn gen_buffer(&self) -> u32 {
        let mut id: u32 = 0;
        unsafe {
            trace!(target: "gl", "glGenBuffers(1) ");
            self.gl.GenBuffers(1, &mut id as *mut _)
        };
        trace!(target: "gl", " => {}", id);
        self.check_error();
        id
    }

    /// Corresponds to `glBindBuffer`.
    pub fn bind_buffer(&self, id: u32, ty: u32) {
        unsafe {
            trace!(target: "gl", "glBindBuffer{:?}", (ty, id));
            self.gl.BindBuffer(ty, id);
        }
        self.check_error();
    }

    /// Corresponds to `glBufferData`.
    pub fn buffer_data<T>(&self, ty: u32, len: usize, ptr: *const T, usage: u32) {
        unsafe {
            trace!(target: "gl", "glBufferData{:?}", (ty, len, ptr, usage));
            self.gl.BufferData(ty, len as _, ptr as *const _, usage);
        }
        self.check_error();
    }

    /// Corresponds to `glDeleteBuffers(1)`.
    pub fn delete_buffer(&self, id: u32) {
        trace!(target: "gl", "glDeleteBuffers{:?}", (1, id));
        unsafe {
            self.gl.DeleteBuffers(1, &id as *const _);
        }
        self.check_error();
    }

    // Vertex array operations

    /// Corresponds to `glGenVertexArrays(1)`.
    pub fn gen_vertex_array(&self) -> u32 {
        let mut id: u32 = 0;
        unsafe {
            trace!(target: "gl", "glGenVertexArrays(1) ");
            self.gl.GenVertexArrays(1, &mut id as *mut _);
            trace!(target: "gl", "=> {}", id);
        }
        self.check_error();
        id
    }

    /// Corresponds to `glBindVertexArray`.
    pub fn bind_vertex_array(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glBindVertexArray{:?}", (id,));
            self.gl.BindVertexArray(id);
        }
        self.check_error();
    }

    /// Corresponds to `glVertexAttribPointer`.
    pub fn vertex_attrib_pointer(&self, id: u8, sz: i32, ty: u32, norm: bool, stride: i32, off: usize) {
        unsafe {
            trace!(target: "gl", "glVertexAttribPointer{:?}", (id, sz, ty, norm, stride, off));
            self.gl.VertexAttribPointer(id as _, sz as _, ty, if norm { 1 } else { 0 }, stride as _, off as *const _);
        }
        self.check_error();
    }

    /// Corresponds to `glEnableVertexAttribArray`.
    pub fn enable_vertex_attrib_array(&self, idx: u8) {
        unsafe {
            trace!(target: "gl", "glEnableVertexAttribArray{:?}", (idx,));
            self.gl.EnableVertexAttribArray(idx as _);
        }
        self.check_error();
    }

    /// Corresponds to `glDeleteVertexArrays(1)`.
    pub fn delete_vertex_array(&self, id: u32) {
        trace!(target: "gl", "glDeleteVertexArrays{:?}", (1, id));
        unsafe {
            self.gl.DeleteVertexArrays(1, &id as *const _);
        }
        self.check_error();
    }

    // Program operations

    /// Corresponds to `glCreateShader`.
    pub fn create_shader(&self, ty: u32) -> u32 {
        let id = unsafe {
            trace!(target: "gl", "glCreateShader{:?} ", (ty,));
            self.gl.CreateShader(ty)
        };
        trace!(target: "gl", "=> {}", id);
        self.check_error();
        id
    }

    /// Corresponds to `glShaderSource`.
    pub fn shader_source(&self, id: u32, source: &ffi::CStr) {
        unsafe {
            trace!(target: "gl", "glShaderSource{:?}", (id, source));
            let ptr = source.as_ptr() as *const i8;
            self.gl.ShaderSource(id, 1, &ptr as *const _, ptr::null());
        }
        self.check_error();
    }

    /// Corresponds to `glCompileShader` plus a status query.
    ///
    /// Returns `true` on compile success.
    pub fn compile_shader(&self, id: u32) -> bool {
        let mut status = 0i32;
        unsafe {
            trace!(target: "gl", "glCompileShader{:?}", (id,));
            self.gl.CompileShader(id);
            self.check_error();
            trace!(target: "gl", "glGetShaderiv{:?} ", (id, COMPILE_STATUS));
            self.gl.GetShaderiv(id, COMPILE_STATUS, &mut status as *mut _);
            trace!(target: "gl", "=> {}", status);
        }
        self.check_error();
        status != 0
    }

    /// Corresponds to `glGetShaderInfoLog`.
    pub fn shader_info_log(&self, id: u32) -> String {
        let mut len = 0i32;
        unsafe {
            trace!(target: "gl", "glGetShaderiv{:?} ", (id, INFO_LOG_LENGTH));
            self.gl.GetShaderiv(id, INFO_LOG_LENGTH, &mut len as *mut _);
            trace!(target: "gl", "=> {}", len);
        }
        self.check_error();
        let mut log = vec![0u8; len as usize];
        if len > 0 {
            unsafe {
                trace!(target: "gl", "glGetShaderInfoLog{:?}", (id, len));
                self.gl.GetShaderInfoLog(id, len, ptr::null_mut(), log.as_mut_ptr() as *mut _);
            }
            self.check_error();
            while log.last() == Some(&0) {
                let _ = log.pop();
            }
        }
        String::from_utf8_lossy(&log).into_owned()
    }

    /// Corresponds to `glDeleteShader`.
    pub fn delete_shader(&self, id: u32) {
        trace!(target: "gl", "glDeleteShader{:?}", (id,));
        unsafe {
            self.gl.DeleteShader(id);
        }
        self.check_error();
    }

    /// Corresponds to `glCreateProgram`.
    pub fn create_program(&self) -> u32 {
        let id = unsafe {
            trace!(target: "gl", "glCreateProgram() ");
            self.gl.CreateProgram()
        };
        trace!(target: "gl", "=> {}", id);
        self.check_error();
        id
    }

    /// Corresponds to `glAttachShader`.
    pub fn attach_shader(&self, program: u32, shader: u32) {
        unsafe {
            trace!(target: "gl", "glAttachShader{:?}", (program, shader));
            self.gl.AttachShader(program, shader);
        }
        self.check_error();
    }

    /// Corresponds to `glDetachShader`.
    pub fn detach_shader(&self, program: u32, shader: u32) {
        unsafe {
            trace!(target: "gl", "glDetachShader{:?}", (program, shader));
            self.gl.DetachShader(program, shader);
        }
        self.check_error();
    }

    /// Corresponds to `glLinkProgram` plus a status query.
    ///
    /// Returns `true` on link success.
    pub fn link_program(&self, id: u32) -> bool {
        let mut status = 0i32;
        unsafe {
            trace!(target: "gl", "glLinkProgram{:?}", (id,));
            self.gl.LinkProgram(id);
            self.check_error();
            trace!(target: "gl", "glGetProgramiv{:?} ", (id, LINK_STATUS));
            self.gl.GetProgramiv(id, LINK_STATUS, &mut status as *mut _);
            trace!(target: "gl", "=> {}", status);
        }
        self.check_error();
        status != 0
    }

    /// Corresponds to `glGetProgramInfoLog`.
    pub fn program_info_log(&self, id: u32) -> String {
        let mut len = 0i32;
        unsafe {
            trace!(target: "gl", "glGetProgramiv{:?} ", (id, INFO_LOG_LENGTH));
            self.gl.GetProgramiv(id, INFO_LOG_LENGTH, &mut len as *mut _);
            trace!(target: "gl", "=> {}", len);
        }
        self.check_error();
        let mut log = vec![0u8; len as usize];
        if len > 0 {
            unsafe {
                trace!(target: "gl", "glGetProgramInfoLog{:?}", (id, len));
                self.gl.GetProgramInfoLog(id, len, ptr::null_mut(), log.as_mut_ptr() as *mut _);
            }
            self.check_error();
            while log.last() == Some(&0) {
                let _ = log.pop();
            }
        }
        String::from_utf8_lossy(&log).into_owned()
    }

    /// Corresponds to `glDeleteProgram`.
    pub fn delete_program(&self, id: u32) {
        trace!(target: "gl", "glDeleteProgram{:?}", (id,));
        unsafe {
            self.gl.DeleteProgram(id);
        }
        self.check_error();
    }

    /// Corresponds to `glUseProgram`.
    pub fn use_program(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glUseProgram{:?}", (id,));
            self.gl.UseProgram(id);
        }
        self.check_error();
    }

    /// Corresponds to `glGetUniformLocation`.
    pub fn get_uniform_location(&self, id: u32, name: &ffi::CStr) -> i32 {
        let index;
        unsafe {
            trace!(target: "gl", "glGetUniformLocation{:?} ", (id, name));
            index = self.gl.GetUniformLocation(id, name.as_ptr() as _);
            trace!(target: "gl", "=> {}", index);
        }
        self.check_error();
        index
    }

    /// Corresponds to `glUniform1i`.
    pub fn uniform1i(&self, location: i32, value: i32) {
        trace!(target: "gl", "glUniform1i{:?}", (location, value));
        unsafe {
            self.gl.Uniform1i(location, value);
        }
        self.check_error();
    }

    /// Corresponds to `glUniform1f`.
    pub fn uniform1f(&self, location: i32, value: f32) {
        trace!(target: "gl", "glUniform1f{:?}", (location, value));
        unsafe {
            self.gl.Uniform1f(location, value);
        }
        self.check_error();
    }

    /// Corresponds to `glUniform4f`.
    pub fn uniform4f(&self, location: i32, value: [f32; 4]) {
        trace!(target: "gl", "glUniform4f{:?}", (location, value));
        unsafe {
            self.gl.Uniform4f(location, value[0], value[1], value[2], value[3]);
        }
        self.check_error();
    }

    /// Corresponds to `glUniformMatrix4fv` for one column-major matrix.
    pub fn uniform_matrix4fv(&self, location: i32, value: &[f32; 16]) {
        trace!(target: "gl", "glUniformMatrix4fv{:?}", (location, 1, false));
        unsafe {
            self.gl.UniformMatrix4fv(location, 1, 0, value.as_ptr());
        }
        self.check_error();
    }

    /// Corresponds to `glGetUniformfv` for a 4x4 matrix.
    pub fn get_uniform_matrix4fv(&self, program: u32, location: i32) -> [f32; 16] {
        let mut value = [0.0f32; 16];
        trace!(target: "gl", "glGetUniformfv{:?}", (program, location));
        unsafe {
            self.gl.GetUniformfv(program, location, value.as_mut_ptr());
        }
        self.check_error();
        value
    }

    // Texture operations

    /// Corresponds to `glGenTextures(1)`.
    pub fn gen_texture(&self) -> u32 {
        let mut id = 0;
        unsafe {
            trace!(target: "gl", "glGenTextures(1) ");
            self.gl.GenTextures(1, &mut id as *mut _);
            trace!(target: "gl", "=> {}", id);
        }
        self.check_error();
        id
    }

    /// Corresponds to `glBindTexture`.
    pub fn bind_texture(&self, ty: u32, id: u32) {
        unsafe {
            trace!(target: "gl", "glBindTexture{:?}", (ty, id));
            self.gl.BindTexture(ty, id);
        }
        self.check_error();
    }

    /// Corresponds to `glTexParameteri`.
    pub fn tex_parameteri(&self, ty: u32, param: u32, value: u32) {
        unsafe {
            trace!(target: "gl", "glTexParameteri{:?}", (ty, param, value));
            self.gl.TexParameteri(ty, param, value as i32);
        }
        self.check_error();
    }

    /// Corresponds to `glTexImage2D`.
    pub fn tex_image_2d(
        &self,
        target: u32,
        internal_format: u32,
        width: u32,
        height: u32,
        format: u32,
        ty: u32,
        data: *const os::raw::c_void,
    ) {
        unsafe {
            trace!(target: "gl",
                "glTexImage2D{:?}",
                (
                    target,
                    0,
                    internal_format,
                    width,
                    height,
                    0,
                    format,
                    ty,
                    data,
                ),
            );
            self.gl.TexImage2D(
                target,
                0,
                internal_format as _,
                width as _,
                height as _,
                0,
                format,
                ty,
                data,
            );
        }
        self.check_error();
    }

    /// Corresponds to `glGenerateMipmap`.
    pub fn generate_mipmap(&self, target: u32) {
        unsafe {
            trace!(target: "gl", "glGenerateMipmap{:?}", (target,));
            self.gl.GenerateMipmap(target);
        }
        self.check_error();
    }

    /// Corresponds to `glActiveTexture(GL_TEXTURE0 + index)`.
    pub fn active_texture(&self, index: u32) {
        unsafe {
            trace!(target: "gl", "glActiveTexture{:?}", (index,));
            self.gl.ActiveTexture(TEXTURE0 + index);
        }
        self.check_error();
    }

    /// Corresponds to `glDeleteTextures(1)`.
    pub fn delete_texture(&self, id: u32) {
        trace!(target: "gl", "glDeleteTextures{:?}", (1, id));
        unsafe {
            self.gl.DeleteTextures(1, &id as *const _);
        }
        self.check_error();
    }

    // Draw call operations

    /// Corresponds to `glDrawArrays`.
    pub fn draw_arrays(&self, mode: u32, offset: usize, count: usize) {
        unsafe {
            trace!(target: "gl", "glDrawArrays{:?}", (mode, offset, count));
            self.gl.DrawArrays(mode, offset as _, count as _);
        }
        self.check_error();
    }

    /// Corresponds to `glDrawElements`.
    pub fn draw_elements(&self, mode: u32, offset: usize, count: usize, ty: u32) {
        unsafe {
            trace!(target: "gl", "glDrawElements{:?}", (mode, count, ty, offset));
            self.gl.DrawElements(mode, count as _, ty, offset as *const _);
        }
        self.check_error();
    }
}
