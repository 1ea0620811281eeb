use crate::{
    api::{gl, GLenum, ObjectKind},
    binding::{BindingSlot, BufferTarget, TextureTarget},
    context::Context,
    error::{Error, GlResult},
    handle::HandleBox,
    pixel::{check_transfer_len, PixelDirection, PixelStore},
};
use std::{cell::Cell, rc::Rc};

/// Faces of a cube map.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

/// Target of an image specification command: a texture target, or one face of a cube map.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TexImageTarget {
    Texture(TextureTarget),
    CubeFace(CubeFace),
}

impl TexImageTarget {
    pub fn dimensions(self) -> u32 {
        match self {
            TexImageTarget::Texture(target) => target.image_dimensions(),
            TexImageTarget::CubeFace(_) => 2,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum WrapMode {
    ClampToEdge,
    ClampToBorder,
    Repeat,
    MirroredRepeat,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MinFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MagFilter {
    Nearest,
    Linear,
}

fn wrap_mode_to_glenum(mode: WrapMode) -> GLenum {
    match mode {
        WrapMode::ClampToEdge => gl::CLAMP_TO_EDGE,
        WrapMode::ClampToBorder => gl::CLAMP_TO_BORDER,
        WrapMode::Repeat => gl::REPEAT,
        WrapMode::MirroredRepeat => gl::MIRRORED_REPEAT,
    }
}

fn min_filter_to_glenum(filter: MinFilter) -> GLenum {
    match filter {
        MinFilter::Nearest => gl::NEAREST,
        MinFilter::Linear => gl::LINEAR,
        MinFilter::NearestMipmapNearest => gl::NEAREST_MIPMAP_NEAREST,
        MinFilter::LinearMipmapNearest => gl::LINEAR_MIPMAP_NEAREST,
        MinFilter::NearestMipmapLinear => gl::NEAREST_MIPMAP_LINEAR,
        MinFilter::LinearMipmapLinear => gl::LINEAR_MIPMAP_LINEAR,
    }
}

fn mag_filter_to_glenum(filter: MagFilter) -> GLenum {
    match filter {
        MagFilter::Nearest => gl::NEAREST,
        MagFilter::Linear => gl::LINEAR,
    }
}

/// Texture object.
///
/// The texture is bound on its texture unit (0 unless changed with [`Texture::set_to_unit`])
/// for every operation.
#[derive(Clone)]
pub struct Texture {
    ctx: Context,
    handle: HandleBox,
    target: TextureTarget,
    unit: Rc<Cell<u32>>,
}

impl_object!(Texture);

impl Texture {
    pub fn new(ctx: &Context, target: TextureTarget) -> GlResult<Texture> {
        let handle = ctx.create_handle(ObjectKind::Texture)?;
        Ok(Texture {
            ctx: ctx.clone(),
            handle,
            target,
            unit: Rc::new(Cell::new(0)),
        })
    }

    pub fn target(&self) -> TextureTarget {
        self.target
    }

    /// Texture unit the texture is bound to.
    pub fn unit(&self) -> u32 {
        self.unit.get()
    }

    fn slot(&self) -> BindingSlot {
        BindingSlot::Texture {
            unit: self.unit.get(),
            target: self.target,
        }
    }

    /// Binds the texture to the given texture unit (0 is the first unit), and uses that unit for
    /// subsequent operations.
    pub fn set_to_unit(&self, unit: u32) -> GlResult<()> {
        let max = self.ctx.max_texture_units();
        if unit >= max {
            return Err(Error::InvalidTextureUnit { unit, max });
        }
        self.unit.set(unit);
        self.bind();
        Ok(())
    }

    pub fn bind(&self) {
        self.ctx.bind(self.slot(), self.id())
    }

    pub fn unbind(&self) {
        self.ctx.unbind(self.slot())
    }

    fn check_dimensions(&self, dimensions: u32, operation: &'static str) -> GlResult<()> {
        if self.target.image_dimensions() != dimensions || self.target == TextureTarget::CubeMap {
            return Err(Error::InvalidTarget {
                target: format!("{:?}", self.target),
                operation,
            });
        }
        Ok(())
    }

    fn tex_image(
        &self,
        target: TexImageTarget,
        level: i32,
        internal_format: GLenum,
        size: [u32; 3],
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    ) -> GlResult<()> {
        if let Some(data) = data {
            let store = PixelStore::query(self.ctx.api(), PixelDirection::Unpack);
            check_transfer_len(format, ty, size, target.dimensions(), &store, data.len())?;
        }
        // `data` is client memory, not an offset into a pixel unpack buffer
        let _unpack = self
            .ctx
            .scoped_bind(BindingSlot::Buffer(BufferTarget::PixelUnpack), 0);
        let _bind = self.ctx.scoped_bind(self.slot(), self.id());
        self.ctx
            .api()
            .tex_image(target, level, internal_format, size, format, ty, data);
        self.ctx.check_error("setting texture image");
        Ok(())
    }

    /// Specifies the image of a mip level of a 1D texture.
    ///
    /// `format` and `ty` describe `data`; `internal_format` is how the driver stores it.
    /// With `data == None`, storage is allocated but left uninitialized. Otherwise `data` must
    /// cover the image as laid out by the current unpack parameters (rows are 4-byte aligned by
    /// default).
    pub fn set_image_1d(
        &self,
        level: i32,
        internal_format: GLenum,
        width: u32,
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    ) -> GlResult<()> {
        self.check_dimensions(1, "set_image_1d")?;
        self.tex_image(
            TexImageTarget::Texture(self.target),
            level,
            internal_format,
            [width, 1, 1],
            format,
            ty,
            data,
        )
    }

    /// Specifies the image of a mip level of a 2D, rectangle or 1D array texture.
    pub fn set_image_2d(
        &self,
        level: i32,
        internal_format: GLenum,
        width: u32,
        height: u32,
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    ) -> GlResult<()> {
        self.check_dimensions(2, "set_image_2d")?;
        self.tex_image(
            TexImageTarget::Texture(self.target),
            level,
            internal_format,
            [width, height, 1],
            format,
            ty,
            data,
        )
    }

    /// Specifies the image of a mip level of a 3D or 2D array texture.
    pub fn set_image_3d(
        &self,
        level: i32,
        internal_format: GLenum,
        size: [u32; 3],
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    ) -> GlResult<()> {
        self.check_dimensions(3, "set_image_3d")?;
        self.tex_image(
            TexImageTarget::Texture(self.target),
            level,
            internal_format,
            size,
            format,
            ty,
            data,
        )
    }

    /// Specifies the image of a mip level of one face of a cube map.
    pub fn set_cube_face_image(
        &self,
        face: CubeFace,
        level: i32,
        internal_format: GLenum,
        width: u32,
        height: u32,
        format: GLenum,
        ty: GLenum,
        data: Option<&[u8]>,
    ) -> GlResult<()> {
        if self.target != TextureTarget::CubeMap {
            return Err(Error::InvalidTarget {
                target: format!("{:?}", self.target),
                operation: "set_cube_face_image",
            });
        }
        self.tex_image(
            TexImageTarget::CubeFace(face),
            level,
            internal_format,
            [width, height, 1],
            format,
            ty,
            data,
        )
    }

    /// Generates the mip chain from the base level.
    pub fn generate_mipmap(&self) {
        let _bind = self.ctx.scoped_bind(self.slot(), self.id());
        self.ctx.api().generate_mipmap(self.target);
        self.ctx.check_error("generating mipmaps");
    }

    pub fn set_parameter(&self, pname: GLenum, value: i32) {
        let _bind = self.ctx.scoped_bind(self.slot(), self.id());
        self.ctx.api().tex_parameter(self.target, pname, value);
        self.ctx.check_error("setting texture parameter");
    }

    pub fn parameter(&self, pname: GLenum) -> i32 {
        let _bind = self.ctx.scoped_bind(self.slot(), self.id());
        let value = self.ctx.api().get_tex_parameter(self.target, pname);
        self.ctx.check_error("getting texture parameter");
        value
    }

    /// Sets the wrap mode on every axis the texture has.
    pub fn set_wrap(&self, mode: WrapMode) {
        let mode = wrap_mode_to_glenum(mode) as i32;
        let pnames = [gl::TEXTURE_WRAP_S, gl::TEXTURE_WRAP_T, gl::TEXTURE_WRAP_R];
        let axes = match self.target {
            TextureTarget::CubeMap => 3,
            target => target.image_dimensions() as usize,
        };
        for &pname in &pnames[..axes] {
            self.set_parameter(pname, mode);
        }
    }

    pub fn set_filter(&self, min: MinFilter, mag: MagFilter) {
        self.set_parameter(gl::TEXTURE_MIN_FILTER, min_filter_to_glenum(min) as i32);
        self.set_parameter(gl::TEXTURE_MAG_FILTER, mag_filter_to_glenum(mag) as i32);
    }
}
