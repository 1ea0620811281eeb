//! The native API boundary.
//!
//! Everything the wrappers need from the driver goes through the [`Api`] trait. [`GlApi`] forwards
//! to a real OpenGL context, [`MockApi`](crate::mock::MockApi) records calls in memory.
use crate::{
    binding::{BindingSlot, BufferTarget, FramebufferTarget, TextureTarget},
    buffer::BufferUsage,
    draw::{ClearMask, DrawMode, IndexType},
    framebuffer::Attachment,
    shader::{ProgramStatus, ShaderStage},
    texture::TexImageTarget,
    uniform::{ActiveVariable, UniformValue},
    vertex_array::VertexAttrib,
};

#[allow(clippy::all, non_upper_case_globals, non_snake_case, non_camel_case_types, dead_code, unused_imports)]
pub mod gl {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

mod native;

pub use native::GlApi;

pub type GLenum = gl::types::GLenum;

/// Name of an object inside the driver. `0` means "no object" (or the default object of a slot).
pub type NativeId = gl::types::GLuint;

/// Category of native object. Objects of one kind share a create/delete entry point pair.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ObjectKind {
    Buffer,
    Texture,
    Framebuffer,
    Renderbuffer,
    VertexArray,
    Shader,
    Program,
}

/// Native calls used by the wrappers.
///
/// Commands that operate on "the object bound to target X" assume the caller has made the right
/// object active beforehand, usually with [`Context::scoped_bind`](crate::Context::scoped_bind).
pub trait Api {
    //--- object lifetime --------------------------------------------------------------------------

    /// Creates `ids.len()` objects of the given kind. Failed slots are left at 0.
    ///
    /// Shaders and programs have their own entry points; asking for them here yields 0s.
    fn gen_objects(&self, kind: ObjectKind, ids: &mut [NativeId]);
    /// Deletes a batch of objects.
    fn delete_objects(&self, kind: ObjectKind, ids: &[NativeId]);
    fn create_shader(&self, stage: ShaderStage) -> NativeId;
    fn delete_shader(&self, shader: NativeId);
    fn create_program(&self) -> NativeId;
    fn delete_program(&self, program: NativeId);

    //--- global state -----------------------------------------------------------------------------

    /// Makes `id` the current object of `slot`.
    fn bind(&self, slot: BindingSlot, id: NativeId);
    /// Returns and clears the oldest pending error code (0 if none).
    fn get_error(&self) -> GLenum;
    fn get_integer(&self, pname: GLenum) -> i32;
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, color: [f32; 4]);
    fn clear(&self, mask: ClearMask);

    //--- buffers ----------------------------------------------------------------------------------

    /// Replaces the data store of the buffer bound to `target`. `size` is only used when `data` is
    /// `None`, otherwise the store takes the length of `data`.
    fn buffer_data(&self, target: BufferTarget, size: usize, data: Option<&[u8]>, usage: BufferUsage);
    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]);

    //--- textures ---------------------------------------------------------------------------------

    /// Specifies the image of a texture level. `size` holds width, height, depth; unused extents
    /// are ignored depending on the dimensionality of `target`. `data` is client memory laid out by
    /// the unpack parameters; a transfer it can't hold is not issued.
    fn tex_image(
        &self,
        target: TexImageTarget,
        level: i32,
        internal_format: GLenum,
        size: [u32; 3],
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    );
    fn tex_parameter(&self, target: TextureTarget, pname: GLenum, value: i32);
    fn get_tex_parameter(&self, target: TextureTarget, pname: GLenum) -> i32;
    fn generate_mipmap(&self, target: TextureTarget);

    //--- renderbuffers ----------------------------------------------------------------------------

    /// `samples <= 1` allocates single-sampled storage.
    fn renderbuffer_storage(&self, internal_format: GLenum, width: u32, height: u32, samples: u32);

    //--- framebuffers -----------------------------------------------------------------------------

    fn framebuffer_renderbuffer(
        &self,
        target: FramebufferTarget,
        attachment: Attachment,
        renderbuffer: NativeId,
    );
    /// Attaches a texture image. With `layer`, a single layer of a layered texture is attached.
    fn framebuffer_texture(
        &self,
        target: FramebufferTarget,
        attachment: Attachment,
        texture_target: TexImageTarget,
        texture: NativeId,
        level: i32,
        layer: Option<i32>,
    );
    fn check_framebuffer_status(&self, target: FramebufferTarget) -> GLenum;
    fn draw_buffers(&self, attachments: &[Attachment]);
    /// Reads from the read framebuffer into client memory laid out by the pack parameters. A
    /// transfer `out` can't hold is not issued.
    fn read_pixels(
        &self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        format: GLenum,
        ty: GLenum,
        out: &mut [u8],
    );

    //--- vertex arrays ----------------------------------------------------------------------------

    fn enable_vertex_attrib_array(&self, index: u32, enable: bool);
    fn vertex_attrib_pointer(&self, attrib: &VertexAttrib);

    //--- shaders and programs ---------------------------------------------------------------------

    fn shader_source(&self, shader: NativeId, source: &str);
    fn compile_shader(&self, shader: NativeId);
    /// Compile status of the last compilation.
    fn shader_status(&self, shader: NativeId) -> bool;
    fn shader_info_log(&self, shader: NativeId) -> String;
    fn attach_shader(&self, program: NativeId, shader: NativeId);
    fn detach_shader(&self, program: NativeId, shader: NativeId);
    fn link_program(&self, program: NativeId);
    fn validate_program(&self, program: NativeId);
    fn program_status(&self, program: NativeId, status: ProgramStatus) -> bool;
    fn program_parameter(&self, program: NativeId, pname: GLenum) -> i32;
    fn program_info_log(&self, program: NativeId) -> String;
    fn bind_attrib_location(&self, program: NativeId, index: u32, name: &str);
    /// Returns -1 if there is no active attribute with this name.
    fn attrib_location(&self, program: NativeId, name: &str) -> i32;
    /// Returns -1 if there is no active uniform with this name.
    fn uniform_location(&self, program: NativeId, name: &str) -> i32;
    fn active_uniform(&self, program: NativeId, index: u32) -> ActiveVariable;
    fn active_attrib(&self, program: NativeId, index: u32) -> ActiveVariable;
    /// Sets a uniform of the program currently in use.
    fn uniform(&self, location: i32, value: &UniformValue);
    fn dispatch_compute(&self, x: u32, y: u32, z: u32);

    //--- drawing ----------------------------------------------------------------------------------

    fn draw_arrays(&self, mode: DrawMode, first: i32, count: i32);
    /// `offset` is a byte offset into the bound element array buffer.
    fn draw_elements(&self, mode: DrawMode, count: i32, ty: IndexType, offset: usize);
}
