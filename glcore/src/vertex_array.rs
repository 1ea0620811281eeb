use crate::{
    api::{gl, GLenum, ObjectKind},
    binding::{BindingSlot, BufferTarget},
    buffer::Buffer,
    context::Context,
    error::GlResult,
    handle::HandleBox,
};
use std::{cell::RefCell, rc::Rc};

/// Layout of one vertex attribute inside a buffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct VertexAttrib {
    pub index: u32,
    /// Number of components (1 to 4).
    pub size: i32,
    /// Component type, e.g. `gl::FLOAT`.
    pub ty: GLenum,
    pub normalized: bool,
    /// Byte distance between consecutive vertices. 0 means tightly packed.
    pub stride: i32,
    /// Byte offset of the first component in the buffer.
    pub offset: usize,
}

impl VertexAttrib {
    /// Non-normalized float attribute.
    pub fn float(index: u32, size: i32, stride: i32, offset: usize) -> VertexAttrib {
        VertexAttrib {
            index,
            size,
            ty: gl::FLOAT,
            normalized: false,
            stride,
            offset,
        }
    }
}

/// Vertex array object.
///
/// Buffers referenced by attribute pointers and the index buffer are kept alive as long as the
/// vertex array is.
#[derive(Clone)]
pub struct VertexArray {
    ctx: Context,
    handle: HandleBox,
    buffers: Rc<RefCell<Vec<Buffer>>>,
}

impl_object!(VertexArray);

impl VertexArray {
    pub fn new(ctx: &Context) -> GlResult<VertexArray> {
        let handle = ctx.create_handle(ObjectKind::VertexArray)?;
        Ok(VertexArray {
            ctx: ctx.clone(),
            handle,
            buffers: Default::default(),
        })
    }

    pub fn bind(&self) {
        self.ctx.bind(BindingSlot::VertexArray, self.id())
    }

    pub fn unbind(&self) {
        self.ctx.unbind(BindingSlot::VertexArray)
    }

    fn retain(&self, buffer: &Buffer) {
        let mut buffers = self.buffers.borrow_mut();
        if !buffers.iter().any(|b| b.handle().ptr_eq(buffer.handle())) {
            buffers.push(buffer.clone());
        }
    }

    pub fn enable_attrib_array(&self, index: u32, enable: bool) {
        let _vao = self.ctx.scoped_bind(BindingSlot::VertexArray, self.id());
        self.ctx.api().enable_vertex_attrib_array(index, enable);
        self.ctx.check_error("enabling vertex attribute");
    }

    /// Sources attribute `attrib.index` from `buffer`.
    pub fn set_attrib_pointer(&self, buffer: &Buffer, attrib: VertexAttrib) {
        let _vao = self.ctx.scoped_bind(BindingSlot::VertexArray, self.id());
        let _vbo = self
            .ctx
            .scoped_bind(BindingSlot::Buffer(BufferTarget::Array), buffer.id());
        self.ctx.api().vertex_attrib_pointer(&attrib);
        self.ctx.check_error("setting vertex attribute pointer");
        self.retain(buffer);
    }

    /// Sets the element array buffer used by indexed draws.
    pub fn set_index_buffer(&self, buffer: &Buffer) {
        let _vao = self.ctx.scoped_bind(BindingSlot::VertexArray, self.id());
        // part of the vertex array state: must stay bound when the scope ends
        self.ctx
            .bind(BindingSlot::Buffer(BufferTarget::ElementArray), buffer.id());
        self.retain(buffer);
    }

    /// Number of distinct buffers referenced by the vertex array.
    pub fn buffer_count(&self) -> usize {
        self.buffers.borrow().len()
    }
}
