//! [`Api`] implementation over the generated OpenGL bindings.
use super::{gl, gl::types::*, Api, GLenum, NativeId, ObjectKind};
use crate::{
    binding::{BindingSlot, BufferTarget, FramebufferTarget, TextureTarget},
    buffer::BufferUsage,
    draw::{draw_mode_to_glenum, index_type_to_glenum, ClearMask, DrawMode, IndexType},
    framebuffer::Attachment,
    pixel::{check_transfer_len, PixelDirection, PixelStore},
    shader::{shader_stage_to_glenum, ProgramStatus, ShaderStage},
    texture::{CubeFace, TexImageTarget},
    uniform::{ActiveVariable, UniformValue},
    vertex_array::VertexAttrib,
};
use std::{
    ffi::{c_void, CString},
    fmt, ptr,
};
use tracing::error;

/// Checks a client memory pixel transfer against the current pixel store parameters.
///
/// The driver reads or writes as many bytes as the parameters say, whatever the length of the
/// slice, so an invalid transfer is dropped instead.
fn pixel_transfer_fits(
    api: &GlApi,
    direction: PixelDirection,
    format: GLenum,
    ty: GLenum,
    size: [u32; 3],
    dimensions: u32,
    len: usize,
) -> bool {
    let store = PixelStore::query(api, direction);
    match check_transfer_len(format, ty, size, dimensions, &store, len) {
        Ok(()) => true,
        Err(err) => {
            error!(?direction, ?size, "dropping pixel transfer: {}", err);
            false
        }
    }
}

fn buffer_target_to_glenum(target: BufferTarget) -> GLenum {
    match target {
        BufferTarget::Array => gl::ARRAY_BUFFER,
        BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        BufferTarget::Uniform => gl::UNIFORM_BUFFER,
        BufferTarget::ShaderStorage => gl::SHADER_STORAGE_BUFFER,
        BufferTarget::CopyRead => gl::COPY_READ_BUFFER,
        BufferTarget::CopyWrite => gl::COPY_WRITE_BUFFER,
        BufferTarget::PixelPack => gl::PIXEL_PACK_BUFFER,
        BufferTarget::PixelUnpack => gl::PIXEL_UNPACK_BUFFER,
        BufferTarget::DrawIndirect => gl::DRAW_INDIRECT_BUFFER,
        BufferTarget::Texture => gl::TEXTURE_BUFFER,
    }
}

fn buffer_usage_to_glenum(usage: BufferUsage) -> GLenum {
    match usage {
        BufferUsage::StreamDraw => gl::STREAM_DRAW,
        BufferUsage::StreamRead => gl::STREAM_READ,
        BufferUsage::StreamCopy => gl::STREAM_COPY,
        BufferUsage::StaticDraw => gl::STATIC_DRAW,
        BufferUsage::StaticRead => gl::STATIC_READ,
        BufferUsage::StaticCopy => gl::STATIC_COPY,
        BufferUsage::DynamicDraw => gl::DYNAMIC_DRAW,
        BufferUsage::DynamicRead => gl::DYNAMIC_READ,
        BufferUsage::DynamicCopy => gl::DYNAMIC_COPY,
    }
}

fn texture_target_to_glenum(target: TextureTarget) -> GLenum {
    match target {
        TextureTarget::Texture1D => gl::TEXTURE_1D,
        TextureTarget::Texture2D => gl::TEXTURE_2D,
        TextureTarget::Texture3D => gl::TEXTURE_3D,
        TextureTarget::CubeMap => gl::TEXTURE_CUBE_MAP,
        TextureTarget::Texture1DArray => gl::TEXTURE_1D_ARRAY,
        TextureTarget::Texture2DArray => gl::TEXTURE_2D_ARRAY,
        TextureTarget::Rectangle => gl::TEXTURE_RECTANGLE,
    }
}

fn tex_image_target_to_glenum(target: TexImageTarget) -> GLenum {
    match target {
        TexImageTarget::Texture(target) => texture_target_to_glenum(target),
        TexImageTarget::CubeFace(face) => match face {
            CubeFace::PositiveX => gl::TEXTURE_CUBE_MAP_POSITIVE_X,
            CubeFace::NegativeX => gl::TEXTURE_CUBE_MAP_NEGATIVE_X,
            CubeFace::PositiveY => gl::TEXTURE_CUBE_MAP_POSITIVE_Y,
            CubeFace::NegativeY => gl::TEXTURE_CUBE_MAP_NEGATIVE_Y,
            CubeFace::PositiveZ => gl::TEXTURE_CUBE_MAP_POSITIVE_Z,
            CubeFace::NegativeZ => gl::TEXTURE_CUBE_MAP_NEGATIVE_Z,
        },
    }
}

fn framebuffer_target_to_glenum(target: FramebufferTarget) -> GLenum {
    match target {
        FramebufferTarget::Framebuffer => gl::FRAMEBUFFER,
        FramebufferTarget::Draw => gl::DRAW_FRAMEBUFFER,
        FramebufferTarget::Read => gl::READ_FRAMEBUFFER,
    }
}

fn attachment_to_glenum(attachment: Attachment) -> GLenum {
    match attachment {
        Attachment::Color(index) => gl::COLOR_ATTACHMENT0 + index,
        Attachment::Depth => gl::DEPTH_ATTACHMENT,
        Attachment::Stencil => gl::STENCIL_ATTACHMENT,
        Attachment::DepthStencil => gl::DEPTH_STENCIL_ATTACHMENT,
    }
}

fn data_ptr(data: Option<&[u8]>) -> *const c_void {
    data.map_or(ptr::null(), |data| data.as_ptr() as *const c_void)
}

/// Converts a name to a C string. Names with interior nul bytes can't exist in a program.
fn c_name(name: &str) -> Option<CString> {
    CString::new(name).ok()
}

/// OpenGL 4.5 core driver.
///
/// Must only be used on the thread where the GL context is current.
pub struct GlApi {
    gl: gl::Gl,
}

impl fmt::Debug for GlApi {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("GlApi")
    }
}

impl GlApi {
    /// Loads the function pointers with the given loader, e.g. the `get_proc_address` of a
    /// windowing library.
    pub fn load_with(loader: impl FnMut(&'static str) -> *const c_void) -> GlApi {
        GlApi {
            gl: gl::Gl::load_with(loader),
        }
    }

    pub fn from_gl(gl: gl::Gl) -> GlApi {
        GlApi { gl }
    }

    /// The raw bindings, for calls this crate doesn't wrap.
    ///
    /// Binding through them desynchronizes the context's binding cache; see
    /// [`Context::invalidate_bindings`](crate::Context::invalidate_bindings).
    pub fn gl(&self) -> &gl::Gl {
        &self.gl
    }

    unsafe fn shader_iv(&self, shader: NativeId, pname: GLenum) -> GLint {
        let mut value = 0;
        self.gl.GetShaderiv(shader, pname, &mut value);
        value
    }

    unsafe fn program_iv(&self, program: NativeId, pname: GLenum) -> GLint {
        let mut value = 0;
        self.gl.GetProgramiv(program, pname, &mut value);
        value
    }

    unsafe fn active_variable(&self, program: NativeId, index: u32, attribute: bool) -> ActiveVariable {
        let max_length = self.program_iv(
            program,
            if attribute {
                gl::ACTIVE_ATTRIBUTE_MAX_LENGTH
            } else {
                gl::ACTIVE_UNIFORM_MAX_LENGTH
            },
        );
        let mut buf: Vec<u8> = vec![0; max_length.max(1) as usize];
        let mut length: GLsizei = 0;
        let mut size: GLint = 0;
        let mut ty: GLenum = 0;
        if attribute {
            self.gl.GetActiveAttrib(
                program,
                index,
                buf.len() as GLsizei,
                &mut length,
                &mut size,
                &mut ty,
                buf.as_mut_ptr() as *mut GLchar,
            );
        } else {
            self.gl.GetActiveUniform(
                program,
                index,
                buf.len() as GLsizei,
                &mut length,
                &mut size,
                &mut ty,
                buf.as_mut_ptr() as *mut GLchar,
            );
        }
        buf.truncate(length.max(0) as usize);
        ActiveVariable {
            name: String::from_utf8_lossy(&buf).into_owned(),
            ty,
            size,
        }
    }
}

impl Api for GlApi {
    fn gen_objects(&self, kind: ObjectKind, ids: &mut [NativeId]) {
        let n = ids.len() as GLsizei;
        unsafe {
            match kind {
                ObjectKind::Buffer => self.gl.GenBuffers(n, ids.as_mut_ptr()),
                ObjectKind::Texture => self.gl.GenTextures(n, ids.as_mut_ptr()),
                ObjectKind::Framebuffer => self.gl.GenFramebuffers(n, ids.as_mut_ptr()),
                ObjectKind::Renderbuffer => self.gl.GenRenderbuffers(n, ids.as_mut_ptr()),
                ObjectKind::VertexArray => self.gl.GenVertexArrays(n, ids.as_mut_ptr()),
                ObjectKind::Shader | ObjectKind::Program => {
                    for id in ids.iter_mut() {
                        *id = 0;
                    }
                }
            }
        }
    }

    fn delete_objects(&self, kind: ObjectKind, ids: &[NativeId]) {
        let n = ids.len() as GLsizei;
        unsafe {
            match kind {
                ObjectKind::Buffer => self.gl.DeleteBuffers(n, ids.as_ptr()),
                ObjectKind::Texture => self.gl.DeleteTextures(n, ids.as_ptr()),
                ObjectKind::Framebuffer => self.gl.DeleteFramebuffers(n, ids.as_ptr()),
                ObjectKind::Renderbuffer => self.gl.DeleteRenderbuffers(n, ids.as_ptr()),
                ObjectKind::VertexArray => self.gl.DeleteVertexArrays(n, ids.as_ptr()),
                ObjectKind::Shader => ids.iter().for_each(|&id| self.gl.DeleteShader(id)),
                ObjectKind::Program => ids.iter().for_each(|&id| self.gl.DeleteProgram(id)),
            }
        }
    }

    fn create_shader(&self, stage: ShaderStage) -> NativeId {
        unsafe { self.gl.CreateShader(shader_stage_to_glenum(stage)) }
    }

    fn delete_shader(&self, shader: NativeId) {
        unsafe { self.gl.DeleteShader(shader) }
    }

    fn create_program(&self) -> NativeId {
        unsafe { self.gl.CreateProgram() }
    }

    fn delete_program(&self, program: NativeId) {
        unsafe { self.gl.DeleteProgram(program) }
    }

    //--- global state -----------------------------------------------------------------------------

    fn bind(&self, slot: BindingSlot, id: NativeId) {
        unsafe {
            match slot {
                BindingSlot::Buffer(target) => {
                    self.gl.BindBuffer(buffer_target_to_glenum(target), id)
                }
                BindingSlot::ActiveTexture => self.gl.ActiveTexture(gl::TEXTURE0 + id),
                // the unit was made active beforehand
                BindingSlot::Texture { target, .. } => {
                    self.gl.BindTexture(texture_target_to_glenum(target), id)
                }
                BindingSlot::Framebuffer(target) => {
                    self.gl.BindFramebuffer(framebuffer_target_to_glenum(target), id)
                }
                BindingSlot::Renderbuffer => self.gl.BindRenderbuffer(gl::RENDERBUFFER, id),
                BindingSlot::VertexArray => self.gl.BindVertexArray(id),
                BindingSlot::Program => self.gl.UseProgram(id),
            }
        }
    }

    fn get_error(&self) -> GLenum {
        unsafe { self.gl.GetError() }
    }

    fn get_integer(&self, pname: GLenum) -> i32 {
        let mut value = 0;
        unsafe { self.gl.GetIntegerv(pname, &mut value) };
        value
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.Viewport(x, y, width, height) }
    }

    fn clear_color(&self, color: [f32; 4]) {
        unsafe { self.gl.ClearColor(color[0], color[1], color[2], color[3]) }
    }

    fn clear(&self, mask: ClearMask) {
        unsafe { self.gl.Clear(mask.bits()) }
    }

    //--- buffers ----------------------------------------------------------------------------------

    fn buffer_data(&self, target: BufferTarget, size: usize, data: Option<&[u8]>, usage: BufferUsage) {
        unsafe {
            self.gl.BufferData(
                buffer_target_to_glenum(target),
                data.map_or(size, <[u8]>::len) as GLsizeiptr,
                data_ptr(data),
                buffer_usage_to_glenum(usage),
            )
        }
    }

    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]) {
        unsafe {
            self.gl.BufferSubData(
                buffer_target_to_glenum(target),
                offset as GLintptr,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
            )
        }
    }

    //--- textures ---------------------------------------------------------------------------------

    fn tex_image(
        &self,
        target: TexImageTarget,
        level: i32,
        internal_format: GLenum,
        size: [u32; 3],
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    ) {
        if let Some(data) = data {
            let dims = target.dimensions();
            if !pixel_transfer_fits(self, PixelDirection::Unpack, format, ty, size, dims, data.len()) {
                return;
            }
        }
        let glenum = tex_image_target_to_glenum(target);
        let [width, height, depth] = size;
        unsafe {
            match target.dimensions() {
                1 => self.gl.TexImage1D(
                    glenum,
                    level,
                    internal_format as GLint,
                    width as GLsizei,
                    0,
                    format,
                    ty,
                    data_ptr(data),
                ),
                2 => self.gl.TexImage2D(
                    glenum,
                    level,
                    internal_format as GLint,
                    width as GLsizei,
                    height as GLsizei,
                    0,
                    format,
                    ty,
                    data_ptr(data),
                ),
                _ => self.gl.TexImage3D(
                    glenum,
                    level,
                    internal_format as GLint,
                    width as GLsizei,
                    height as GLsizei,
                    depth as GLsizei,
                    0,
                    format,
                    ty,
                    data_ptr(data),
                ),
            }
        }
    }

    fn tex_parameter(&self, target: TextureTarget, pname: GLenum, value: i32) {
        unsafe {
            self.gl
                .TexParameteri(texture_target_to_glenum(target), pname, value)
        }
    }

    fn get_tex_parameter(&self, target: TextureTarget, pname: GLenum) -> i32 {
        let mut value = 0;
        unsafe {
            self.gl
                .GetTexParameteriv(texture_target_to_glenum(target), pname, &mut value)
        };
        value
    }

    fn generate_mipmap(&self, target: TextureTarget) {
        unsafe { self.gl.GenerateMipmap(texture_target_to_glenum(target)) }
    }

    //--- renderbuffers ----------------------------------------------------------------------------

    fn renderbuffer_storage(&self, internal_format: GLenum, width: u32, height: u32, samples: u32) {
        unsafe {
            if samples <= 1 {
                self.gl.RenderbufferStorage(
                    gl::RENDERBUFFER,
                    internal_format,
                    width as GLsizei,
                    height as GLsizei,
                )
            } else {
                self.gl.RenderbufferStorageMultisample(
                    gl::RENDERBUFFER,
                    samples as GLsizei,
                    internal_format,
                    width as GLsizei,
                    height as GLsizei,
                )
            }
        }
    }

    //--- framebuffers -----------------------------------------------------------------------------

    fn framebuffer_renderbuffer(&self, target: FramebufferTarget, attachment: Attachment, renderbuffer: NativeId) {
        unsafe {
            self.gl.FramebufferRenderbuffer(
                framebuffer_target_to_glenum(target),
                attachment_to_glenum(attachment),
                gl::RENDERBUFFER,
                renderbuffer,
            )
        }
    }

    fn framebuffer_texture(
        &self,
        target: FramebufferTarget,
        attachment: Attachment,
        texture_target: TexImageTarget,
        texture: NativeId,
        level: i32,
        layer: Option<i32>,
    ) {
        let target = framebuffer_target_to_glenum(target);
        let attachment = attachment_to_glenum(attachment);
        unsafe {
            if let Some(layer) = layer {
                self.gl
                    .FramebufferTextureLayer(target, attachment, texture, level, layer);
                return;
            }
            match texture_target {
                TexImageTarget::Texture(TextureTarget::Texture1D) => {
                    self.gl
                        .FramebufferTexture1D(target, attachment, gl::TEXTURE_1D, texture, level)
                }
                TexImageTarget::Texture(TextureTarget::Texture2D)
                | TexImageTarget::Texture(TextureTarget::Rectangle)
                | TexImageTarget::CubeFace(_) => self.gl.FramebufferTexture2D(
                    target,
                    attachment,
                    tex_image_target_to_glenum(texture_target),
                    texture,
                    level,
                ),
                // layered attachment
                TexImageTarget::Texture(_) => {
                    self.gl.FramebufferTexture(target, attachment, texture, level)
                }
            }
        }
    }

    fn check_framebuffer_status(&self, target: FramebufferTarget) -> GLenum {
        unsafe {
            self.gl
                .CheckFramebufferStatus(framebuffer_target_to_glenum(target))
        }
    }

    fn draw_buffers(&self, attachments: &[Attachment]) {
        let bufs: Vec<GLenum> = attachments.iter().copied().map(attachment_to_glenum).collect();
        unsafe { self.gl.DrawBuffers(bufs.len() as GLsizei, bufs.as_ptr()) }
    }

    fn read_pixels(&self, x: i32, y: i32, width: u32, height: u32, format: GLenum, ty: GLenum, out: &mut [u8]) {
        let size = [width, height, 1];
        if !pixel_transfer_fits(self, PixelDirection::Pack, format, ty, size, 2, out.len()) {
            return;
        }
        unsafe {
            self.gl.ReadPixels(
                x,
                y,
                width as GLsizei,
                height as GLsizei,
                format,
                ty,
                out.as_mut_ptr() as *mut c_void,
            )
        }
    }

    //--- vertex arrays ----------------------------------------------------------------------------

    fn enable_vertex_attrib_array(&self, index: u32, enable: bool) {
        unsafe {
            if enable {
                self.gl.EnableVertexAttribArray(index)
            } else {
                self.gl.DisableVertexAttribArray(index)
            }
        }
    }

    fn vertex_attrib_pointer(&self, attrib: &VertexAttrib) {
        unsafe {
            self.gl.VertexAttribPointer(
                attrib.index,
                attrib.size,
                attrib.ty,
                if attrib.normalized { gl::TRUE } else { gl::FALSE },
                attrib.stride,
                attrib.offset as *const c_void,
            )
        }
    }

    //--- shaders and programs ---------------------------------------------------------------------

    fn shader_source(&self, shader: NativeId, source: &str) {
        let srcs = [source.as_ptr() as *const GLchar];
        let lens = [source.len() as GLint];
        unsafe { self.gl.ShaderSource(shader, 1, srcs.as_ptr(), lens.as_ptr()) }
    }

    fn compile_shader(&self, shader: NativeId) {
        unsafe { self.gl.CompileShader(shader) }
    }

    fn shader_status(&self, shader: NativeId) -> bool {
        unsafe { self.shader_iv(shader, gl::COMPILE_STATUS) == gl::TRUE as GLint }
    }

    fn shader_info_log(&self, shader: NativeId) -> String {
        unsafe {
            let mut log_size = self.shader_iv(shader, gl::INFO_LOG_LENGTH);
            let mut log_buf: Vec<u8> = vec![0; log_size.max(1) as usize];
            self.gl.GetShaderInfoLog(
                shader,
                log_buf.len() as GLsizei,
                &mut log_size,
                log_buf.as_mut_ptr() as *mut GLchar,
            );
            log_buf.truncate(log_size.max(0) as usize);
            String::from_utf8_lossy(&log_buf).into_owned()
        }
    }

    fn attach_shader(&self, program: NativeId, shader: NativeId) {
        unsafe { self.gl.AttachShader(program, shader) }
    }

    fn detach_shader(&self, program: NativeId, shader: NativeId) {
        unsafe { self.gl.DetachShader(program, shader) }
    }

    fn link_program(&self, program: NativeId) {
        unsafe { self.gl.LinkProgram(program) }
    }

    fn validate_program(&self, program: NativeId) {
        unsafe { self.gl.ValidateProgram(program) }
    }

    fn program_status(&self, program: NativeId, status: ProgramStatus) -> bool {
        let pname = match status {
            ProgramStatus::Link => gl::LINK_STATUS,
            ProgramStatus::Validate => gl::VALIDATE_STATUS,
        };
        unsafe { self.program_iv(program, pname) == gl::TRUE as GLint }
    }

    fn program_parameter(&self, program: NativeId, pname: GLenum) -> i32 {
        unsafe { self.program_iv(program, pname) }
    }

    fn program_info_log(&self, program: NativeId) -> String {
        unsafe {
            let mut log_size = self.program_iv(program, gl::INFO_LOG_LENGTH);
            let mut log_buf: Vec<u8> = vec![0; log_size.max(1) as usize];
            self.gl.GetProgramInfoLog(
                program,
                log_buf.len() as GLsizei,
                &mut log_size,
                log_buf.as_mut_ptr() as *mut GLchar,
            );
            log_buf.truncate(log_size.max(0) as usize);
            String::from_utf8_lossy(&log_buf).into_owned()
        }
    }

    fn bind_attrib_location(&self, program: NativeId, index: u32, name: &str) {
        if let Some(name) = c_name(name) {
            unsafe { self.gl.BindAttribLocation(program, index, name.as_ptr()) }
        }
    }

    fn attrib_location(&self, program: NativeId, name: &str) -> i32 {
        match c_name(name) {
            Some(name) => unsafe { self.gl.GetAttribLocation(program, name.as_ptr()) },
            None => -1,
        }
    }

    fn uniform_location(&self, program: NativeId, name: &str) -> i32 {
        match c_name(name) {
            Some(name) => unsafe { self.gl.GetUniformLocation(program, name.as_ptr()) },
            None => -1,
        }
    }

    fn active_uniform(&self, program: NativeId, index: u32) -> ActiveVariable {
        unsafe { self.active_variable(program, index, false) }
    }

    fn active_attrib(&self, program: NativeId, index: u32) -> ActiveVariable {
        unsafe { self.active_variable(program, index, true) }
    }

    fn uniform(&self, location: i32, value: &UniformValue) {
        let g = &self.gl;
        unsafe {
            match *value {
                UniformValue::Int(v) => g.Uniform1i(location, v),
                UniformValue::IVec2(v) => g.Uniform2iv(location, 1, v.as_ptr()),
                UniformValue::IVec3(v) => g.Uniform3iv(location, 1, v.as_ptr()),
                UniformValue::IVec4(v) => g.Uniform4iv(location, 1, v.as_ptr()),
                UniformValue::IntArray(v) => g.Uniform1iv(location, v.len() as GLsizei, v.as_ptr()),
                UniformValue::Float(v) => g.Uniform1f(location, v),
                UniformValue::Vec2(v) => g.Uniform2fv(location, 1, v.as_ptr()),
                UniformValue::Vec3(v) => g.Uniform3fv(location, 1, v.as_ptr()),
                UniformValue::Vec4(v) => g.Uniform4fv(location, 1, v.as_ptr()),
                UniformValue::FloatArray(v) => g.Uniform1fv(location, v.len() as GLsizei, v.as_ptr()),
                UniformValue::Vec2Array(v) => {
                    g.Uniform2fv(location, v.len() as GLsizei, v.as_ptr() as *const f32)
                }
                UniformValue::Vec3Array(v) => {
                    g.Uniform3fv(location, v.len() as GLsizei, v.as_ptr() as *const f32)
                }
                UniformValue::Vec4Array(v) => {
                    g.Uniform4fv(location, v.len() as GLsizei, v.as_ptr() as *const f32)
                }
                UniformValue::Mat3(m) => {
                    g.UniformMatrix3fv(location, 1, gl::FALSE, m.as_ptr() as *const f32)
                }
                UniformValue::Mat4(m) => {
                    g.UniformMatrix4fv(location, 1, gl::FALSE, m.as_ptr() as *const f32)
                }
            }
        }
    }

    fn dispatch_compute(&self, x: u32, y: u32, z: u32) {
        unsafe { self.gl.DispatchCompute(x, y, z) }
    }

    //--- drawing ----------------------------------------------------------------------------------

    fn draw_arrays(&self, mode: DrawMode, first: i32, count: i32) {
        unsafe { self.gl.DrawArrays(draw_mode_to_glenum(mode), first, count) }
    }

    fn draw_elements(&self, mode: DrawMode, count: i32, ty: IndexType, offset: usize) {
        unsafe {
            self.gl.DrawElements(
                draw_mode_to_glenum(mode),
                count,
                index_type_to_glenum(ty),
                offset as *const c_void,
            )
        }
    }
}
