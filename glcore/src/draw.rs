//! Draw calls and framebuffer-independent render state.
use crate::{
    api::{gl, GLenum},
    binding::BindingSlot,
    context::Context,
    shader::Program,
    vertex_array::VertexArray,
};
use bitflags::bitflags;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DrawMode {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
    Patches,
}

pub(crate) fn draw_mode_to_glenum(mode: DrawMode) -> GLenum {
    match mode {
        DrawMode::Points => gl::POINTS,
        DrawMode::Lines => gl::LINES,
        DrawMode::LineStrip => gl::LINE_STRIP,
        DrawMode::LineLoop => gl::LINE_LOOP,
        DrawMode::Triangles => gl::TRIANGLES,
        DrawMode::TriangleStrip => gl::TRIANGLE_STRIP,
        DrawMode::TriangleFan => gl::TRIANGLE_FAN,
        DrawMode::Patches => gl::PATCHES,
    }
}

/// Type of the indices in an element array buffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IndexType {
    U8,
    U16,
    U32,
}

impl IndexType {
    /// Size of one index in bytes.
    pub fn size(self) -> usize {
        match self {
            IndexType::U8 => 1,
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

pub(crate) fn index_type_to_glenum(ty: IndexType) -> GLenum {
    match ty {
        IndexType::U8 => gl::UNSIGNED_BYTE,
        IndexType::U16 => gl::UNSIGNED_SHORT,
        IndexType::U32 => gl::UNSIGNED_INT,
    }
}

bitflags! {
    /// Buffers affected by a clear.
    #[derive(Default)]
    pub struct ClearMask: u32 {
        const COLOR = gl::COLOR_BUFFER_BIT;
        const DEPTH = gl::DEPTH_BUFFER_BIT;
        const STENCIL = gl::STENCIL_BUFFER_BIT;
    }
}

/// Draws `count` vertices starting at `first` with `program` and the attributes of `vertex_array`.
pub fn draw_arrays(
    program: &Program,
    vertex_array: &VertexArray,
    mode: DrawMode,
    first: i32,
    count: i32,
) {
    let ctx = program.context();
    let _prog = ctx.scoped_bind(BindingSlot::Program, program.id());
    let _vao = ctx.scoped_bind(BindingSlot::VertexArray, vertex_array.id());
    ctx.api().draw_arrays(mode, first, count);
    ctx.check_error("drawing arrays");
}

/// Draws `count` indexed vertices from the index buffer of `vertex_array`.
///
/// `offset` is in bytes from the start of the index buffer.
pub fn draw_elements(
    program: &Program,
    vertex_array: &VertexArray,
    mode: DrawMode,
    count: i32,
    ty: IndexType,
    offset: usize,
) {
    let ctx = program.context();
    let _prog = ctx.scoped_bind(BindingSlot::Program, program.id());
    let _vao = ctx.scoped_bind(BindingSlot::VertexArray, vertex_array.id());
    ctx.api().draw_elements(mode, count, ty, offset);
    ctx.check_error("drawing elements");
}

/// Clears the buffers of the currently bound draw framebuffer.
pub fn clear(ctx: &Context, mask: ClearMask) {
    ctx.api().clear(mask);
    ctx.check_error("clearing");
}

pub fn clear_color(ctx: &Context, color: [f32; 4]) {
    ctx.api().clear_color(color);
    ctx.check_error("setting clear color");
}

pub fn viewport(ctx: &Context, x: i32, y: i32, width: i32, height: i32) {
    ctx.api().viewport(x, y, width, height);
    ctx.check_error("setting viewport");
}
