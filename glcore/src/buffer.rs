use crate::{
    api::ObjectKind,
    binding::{BindingSlot, BufferTarget},
    context::{BindGuard, Context},
    error::{Error, GlResult},
    handle::HandleBox,
};
use bytemuck::Pod;
use std::{cell::Cell, rc::Rc};

/// Expected usage pattern of the data store of a buffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BufferUsage {
    StreamDraw,
    StreamRead,
    StreamCopy,
    StaticDraw,
    StaticRead,
    StaticCopy,
    DynamicDraw,
    DynamicRead,
    DynamicCopy,
}

impl Default for BufferUsage {
    fn default() -> Self {
        BufferUsage::StaticDraw
    }
}

/// Buffer object bound to a fixed target.
#[derive(Clone)]
pub struct Buffer {
    ctx: Context,
    handle: HandleBox,
    target: BufferTarget,
    /// Size of the data store, shared by all clones.
    size: Rc<Cell<usize>>,
}

impl_object!(Buffer);

impl Buffer {
    pub fn new(ctx: &Context, target: BufferTarget) -> GlResult<Buffer> {
        let handle = ctx.create_handle(ObjectKind::Buffer)?;
        Ok(Buffer {
            ctx: ctx.clone(),
            handle,
            target,
            size: Rc::new(Cell::new(0)),
        })
    }

    /// Creates a buffer and fills it with `data`.
    pub fn with_data<T: Pod>(
        ctx: &Context,
        target: BufferTarget,
        data: &[T],
        usage: BufferUsage,
    ) -> GlResult<Buffer> {
        let buffer = Buffer::new(ctx, target)?;
        buffer.set_data(data, usage);
        Ok(buffer)
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }

    fn slot(&self) -> BindingSlot {
        BindingSlot::Buffer(self.target)
    }

    /// Size in bytes of the data store.
    pub fn size(&self) -> usize {
        self.size.get()
    }

    pub fn bind(&self) {
        self.ctx.bind(self.slot(), self.id())
    }

    pub fn unbind(&self) {
        self.ctx.unbind(self.slot())
    }

    /// Binds the buffer to its target to modify its data store.
    ///
    /// The element array binding belongs to the bound vertex array, so element buffers are
    /// updated with no vertex array bound.
    fn bind_for_update(&self) -> UpdateBind<'_> {
        let vertex_array = (self.target == BufferTarget::ElementArray)
            .then(|| self.ctx.scoped_bind(BindingSlot::VertexArray, 0));
        UpdateBind {
            _buffer: self.ctx.scoped_bind(self.slot(), self.id()),
            _vertex_array: vertex_array,
        }
    }

    /// Replaces the data store with a copy of `data`.
    pub fn set_data<T: Pod>(&self, data: &[T], usage: BufferUsage) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let _bind = self.bind_for_update();
        self.ctx
            .api()
            .buffer_data(self.target, bytes.len(), Some(bytes), usage);
        self.ctx.check_error("setting buffer data");
        self.size.set(bytes.len());
    }

    /// Replaces the data store with `size` uninitialized bytes.
    pub fn allocate(&self, size: usize, usage: BufferUsage) {
        let _bind = self.bind_for_update();
        self.ctx.api().buffer_data(self.target, size, None, usage);
        self.ctx.check_error("allocating buffer");
        self.size.set(size);
    }

    /// Updates part of the data store. The range must be within the current size.
    pub fn set_sub_data<T: Pod>(&self, offset: usize, data: &[T]) -> GlResult<()> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let in_bounds = offset
            .checked_add(bytes.len())
            .map_or(false, |end| end <= self.size());
        if !in_bounds {
            return Err(Error::OutOfBounds {
                offset,
                len: bytes.len(),
                size: self.size(),
            });
        }

        let _bind = self.bind_for_update();
        self.ctx.api().buffer_sub_data(self.target, offset, bytes);
        self.ctx.check_error("setting buffer sub data");
        Ok(())
    }
}

/// Bindings held while a buffer is updated.
// Fields drop in declaration order: the buffer is released before the vertex array is restored.
struct UpdateBind<'a> {
    _buffer: BindGuard<'a>,
    _vertex_array: Option<BindGuard<'a>>,
}
