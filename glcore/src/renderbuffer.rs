use crate::{
    api::{GLenum, ObjectKind},
    binding::BindingSlot,
    context::Context,
    error::GlResult,
    handle::HandleBox,
};

/// Renderbuffer object.
#[derive(Clone)]
pub struct Renderbuffer {
    ctx: Context,
    handle: HandleBox,
}

impl_object!(Renderbuffer);

impl Renderbuffer {
    pub fn new(ctx: &Context) -> GlResult<Renderbuffer> {
        let handle = ctx.create_handle(ObjectKind::Renderbuffer)?;
        Ok(Renderbuffer {
            ctx: ctx.clone(),
            handle,
        })
    }

    /// Creates a renderbuffer with single-sampled storage.
    pub fn with_storage(
        ctx: &Context,
        internal_format: GLenum,
        width: u32,
        height: u32,
    ) -> GlResult<Renderbuffer> {
        let renderbuffer = Renderbuffer::new(ctx)?;
        renderbuffer.set_storage(internal_format, width, height);
        Ok(renderbuffer)
    }

    pub fn bind(&self) {
        self.ctx.bind(BindingSlot::Renderbuffer, self.id())
    }

    pub fn unbind(&self) {
        self.ctx.unbind(BindingSlot::Renderbuffer)
    }

    pub fn set_storage(&self, internal_format: GLenum, width: u32, height: u32) {
        self.set_storage_multisample(internal_format, width, height, 0)
    }

    pub fn set_storage_multisample(
        &self,
        internal_format: GLenum,
        width: u32,
        height: u32,
        samples: u32,
    ) {
        let _bind = self.ctx.scoped_bind(BindingSlot::Renderbuffer, self.id());
        self.ctx
            .api()
            .renderbuffer_storage(internal_format, width, height, samples);
        self.ctx.check_error("setting renderbuffer storage");
    }
}
