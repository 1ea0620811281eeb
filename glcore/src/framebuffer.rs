use crate::{
    api::{gl, GLenum, ObjectKind},
    binding::{BindingSlot, BufferTarget, FramebufferTarget, TextureTarget},
    context::Context,
    draw::ClearMask,
    error::{Error, GlResult},
    handle::HandleBox,
    pixel::{check_transfer_len, PixelDirection, PixelStore},
    renderbuffer::Renderbuffer,
    texture::{CubeFace, TexImageTarget, Texture},
};
use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Attachment points of a framebuffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Attachment {
    Color(u32),
    Depth,
    Stencil,
    DepthStencil,
}

/// Result of a completeness check.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FramebufferStatus {
    Complete,
    /// The default framebuffer was checked but does not exist.
    Undefined,
    IncompleteAttachment,
    /// No image is attached.
    MissingAttachment,
    IncompleteDrawBuffer,
    IncompleteReadBuffer,
    /// The combination of internal formats is not supported by the implementation.
    Unsupported,
    IncompleteMultisample,
    IncompleteLayerTargets,
    Unknown(GLenum),
}

impl FramebufferStatus {
    pub fn from_glenum(status: GLenum) -> FramebufferStatus {
        match status {
            gl::FRAMEBUFFER_COMPLETE => FramebufferStatus::Complete,
            gl::FRAMEBUFFER_UNDEFINED => FramebufferStatus::Undefined,
            gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => FramebufferStatus::IncompleteAttachment,
            gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => FramebufferStatus::MissingAttachment,
            gl::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => FramebufferStatus::IncompleteDrawBuffer,
            gl::FRAMEBUFFER_INCOMPLETE_READ_BUFFER => FramebufferStatus::IncompleteReadBuffer,
            gl::FRAMEBUFFER_UNSUPPORTED => FramebufferStatus::Unsupported,
            gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => FramebufferStatus::IncompleteMultisample,
            gl::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS => FramebufferStatus::IncompleteLayerTargets,
            other => FramebufferStatus::Unknown(other),
        }
    }

    pub fn is_complete(&self) -> bool {
        *self == FramebufferStatus::Complete
    }
}

/// Image attached to a framebuffer. Holds a reference to keep the object alive.
#[derive(Clone, Debug)]
pub enum FramebufferAttachment {
    Texture(Texture),
    Renderbuffer(Renderbuffer),
}

/// Framebuffer object bound to a fixed target.
#[derive(Clone)]
pub struct Framebuffer {
    ctx: Context,
    handle: HandleBox,
    target: FramebufferTarget,
    attachments: Rc<RefCell<HashMap<Attachment, FramebufferAttachment>>>,
}

impl_object!(Framebuffer);

impl Framebuffer {
    pub fn new(ctx: &Context, target: FramebufferTarget) -> GlResult<Framebuffer> {
        let handle = ctx.create_handle(ObjectKind::Framebuffer)?;
        Ok(Framebuffer {
            ctx: ctx.clone(),
            handle,
            target,
            attachments: Default::default(),
        })
    }

    /// The default framebuffer (id 0). Never deleted.
    pub fn screen(ctx: &Context) -> Framebuffer {
        Framebuffer {
            ctx: ctx.clone(),
            handle: HandleBox::pending(),
            target: FramebufferTarget::Framebuffer,
            attachments: Default::default(),
        }
    }

    pub fn target(&self) -> FramebufferTarget {
        self.target
    }

    fn slot(&self) -> BindingSlot {
        BindingSlot::Framebuffer(self.target)
    }

    fn require_target(&self, excluded: FramebufferTarget, operation: &'static str) -> GlResult<()> {
        if self.target == excluded {
            return Err(Error::InvalidTarget {
                target: format!("{:?}", self.target),
                operation,
            });
        }
        Ok(())
    }

    pub fn bind(&self) {
        self.ctx.bind(self.slot(), self.id())
    }

    pub fn unbind(&self) {
        self.ctx.unbind(self.slot())
    }

    pub fn check_status(&self) -> FramebufferStatus {
        let _bind = self.ctx.scoped_bind(self.slot(), self.id());
        let status = self.ctx.api().check_framebuffer_status(self.target);
        self.ctx.check_error("checking framebuffer status");
        FramebufferStatus::from_glenum(status)
    }

    /// Returns an error if the framebuffer is not complete.
    pub fn ensure_complete(&self) -> GlResult<()> {
        match self.check_status() {
            FramebufferStatus::Complete => Ok(()),
            status => Err(Error::FramebufferIncomplete(status)),
        }
    }

    /// Returns the object attached at `attachment`, if any.
    pub fn attachment(&self, attachment: Attachment) -> Option<FramebufferAttachment> {
        self.attachments.borrow().get(&attachment).cloned()
    }

    pub fn attach_renderbuffer(&self, attachment: Attachment, renderbuffer: &Renderbuffer) {
        let _bind = self.ctx.scoped_bind(self.slot(), self.id());
        self.ctx
            .api()
            .framebuffer_renderbuffer(self.target, attachment, renderbuffer.id());
        self.ctx.check_error("attaching renderbuffer");
        self.attachments.borrow_mut().insert(
            attachment,
            FramebufferAttachment::Renderbuffer(renderbuffer.clone()),
        );
    }

    fn attach_texture_image(
        &self,
        attachment: Attachment,
        texture: &Texture,
        image: TexImageTarget,
        level: i32,
        layer: Option<i32>,
    ) {
        let _bind = self.ctx.scoped_bind(self.slot(), self.id());
        self.ctx
            .api()
            .framebuffer_texture(self.target, attachment, image, texture.id(), level, layer);
        self.ctx.check_error("attaching texture");
        self.attachments
            .borrow_mut()
            .insert(attachment, FramebufferAttachment::Texture(texture.clone()));
    }

    /// Attaches a mip level of a 1D, 2D, rectangle or 3D texture.
    ///
    /// Layered textures (3D, arrays, cube maps) are attached whole; see
    /// [`Framebuffer::attach_texture_layer`] and [`Framebuffer::attach_cube_face`] for single layers.
    pub fn attach_texture(&self, attachment: Attachment, texture: &Texture, level: i32) {
        self.attach_texture_image(
            attachment,
            texture,
            TexImageTarget::Texture(texture.target()),
            level,
            None,
        )
    }

    /// Attaches one layer of a 3D or array texture.
    pub fn attach_texture_layer(
        &self,
        attachment: Attachment,
        texture: &Texture,
        level: i32,
        layer: i32,
    ) -> GlResult<()> {
        match texture.target() {
            TextureTarget::Texture3D
            | TextureTarget::Texture1DArray
            | TextureTarget::Texture2DArray => {}
            other => {
                return Err(Error::InvalidTarget {
                    target: format!("{:?}", other),
                    operation: "attach_texture_layer",
                })
            }
        }
        self.attach_texture_image(
            attachment,
            texture,
            TexImageTarget::Texture(texture.target()),
            level,
            Some(layer),
        );
        Ok(())
    }

    /// Attaches one face of a cube map.
    pub fn attach_cube_face(
        &self,
        attachment: Attachment,
        texture: &Texture,
        face: CubeFace,
        level: i32,
    ) -> GlResult<()> {
        if texture.target() != TextureTarget::CubeMap {
            return Err(Error::InvalidTarget {
                target: format!("{:?}", texture.target()),
                operation: "attach_cube_face",
            });
        }
        self.attach_texture_image(attachment, texture, TexImageTarget::CubeFace(face), level, None);
        Ok(())
    }

    /// Selects the color attachments written by fragment shader outputs.
    pub fn set_draw_buffers(&self, attachments: &[Attachment]) -> GlResult<()> {
        self.require_target(FramebufferTarget::Read, "set_draw_buffers")?;
        let _bind = self.ctx.scoped_bind(self.slot(), self.id());
        self.ctx.api().draw_buffers(attachments);
        self.ctx.check_error("setting draw buffers");
        Ok(())
    }

    /// Reads a block of pixels into `out`.
    ///
    /// `out` must cover the block as laid out by the current pack parameters (rows are 4-byte
    /// aligned by default).
    pub fn read_pixels(
        &self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        format: GLenum,
        ty: GLenum,
        out: &mut [u8],
    ) -> GlResult<()> {
        self.require_target(FramebufferTarget::Draw, "read_pixels")?;
        let store = PixelStore::query(self.ctx.api(), PixelDirection::Pack);
        check_transfer_len(format, ty, [width, height, 1], 2, &store, out.len())?;
        // `out` is client memory, not an offset into a pixel pack buffer
        let _pack = self
            .ctx
            .scoped_bind(BindingSlot::Buffer(BufferTarget::PixelPack), 0);
        let _bind = self.ctx.scoped_bind(self.slot(), self.id());
        self.ctx
            .api()
            .read_pixels(x, y, width, height, format, ty, out);
        self.ctx.check_error("reading pixels");
        Ok(())
    }

    pub fn clear(&self, mask: ClearMask) -> GlResult<()> {
        self.require_target(FramebufferTarget::Read, "clear")?;
        let _bind = self.ctx.scoped_bind(self.slot(), self.id());
        self.ctx.api().clear(mask);
        self.ctx.check_error("clearing framebuffer");
        Ok(())
    }
}
