mod common;

use common::Fixture;
use glcore::{
    api::gl,
    framebuffer::FramebufferAttachment,
    mock::MockRenderbufferStorage,
    Attachment, BindingSlot, Buffer, BufferTarget, BufferUsage, ClearMask, CubeFace, Error, Framebuffer,
    FramebufferStatus, FramebufferTarget, MagFilter, MinFilter, ObjectKind, Renderbuffer,
    TexImageTarget, Texture, TextureTarget, WrapMode,
};

//--- buffers --------------------------------------------------------------------------------------

#[test]
fn buffer_data_is_uploaded_as_bytes() {
    let f = Fixture::new();
    let buffer = Buffer::with_data(
        &f.ctx,
        BufferTarget::Array,
        &[1.0f32, 2.0],
        BufferUsage::StaticDraw,
    )
    .unwrap();
    assert_eq!(buffer.size(), 8);
    let expected: Vec<u8> = [1.0f32, 2.0]
        .iter()
        .flat_map(|v| v.to_ne_bytes().to_vec())
        .collect();
    assert_eq!(f.mock.buffer_contents(buffer.id()), Some(expected));
    f.assert_no_errors();
}

#[test]
fn sub_data_is_bounds_checked() {
    let f = Fixture::new();
    let buffer = Buffer::new(&f.ctx, BufferTarget::Uniform).unwrap();
    buffer.allocate(4, BufferUsage::DynamicDraw);
    assert!(buffer.set_sub_data(2, &[7u8, 8]).is_ok());
    match buffer.set_sub_data(3, &[0u8, 0]) {
        Err(Error::OutOfBounds { offset, len, size }) => {
            assert_eq!((offset, len, size), (3, 2, 4));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(f.mock.buffer_contents(buffer.id()), Some(vec![0, 0, 7, 8]));
    f.assert_no_errors();
}

//--- textures -------------------------------------------------------------------------------------

#[test]
fn image_uploads_check_dimensions() {
    let f = Fixture::new();
    let tex = Texture::new(&f.ctx, TextureTarget::Texture2D).unwrap();
    assert!(matches!(
        tex.set_image_3d(0, gl::RGBA8, [4, 4, 4], gl::RGBA, gl::UNSIGNED_BYTE, None),
        Err(Error::InvalidTarget { operation: "set_image_3d", .. })
    ));
    assert!(matches!(
        tex.set_cube_face_image(CubeFace::PositiveX, 0, gl::RGBA8, 4, 4, gl::RGBA, gl::UNSIGNED_BYTE, None),
        Err(Error::InvalidTarget { .. })
    ));

    let pixels = [0u8; 4 * 4 * 4];
    tex.set_image_2d(0, gl::RGBA8, 4, 4, gl::RGBA, gl::UNSIGNED_BYTE, Some(&pixels))
        .unwrap();
    let image = f
        .mock
        .texture_image(tex.id(), TexImageTarget::Texture(TextureTarget::Texture2D), 0)
        .unwrap();
    assert_eq!(image.size, [4, 4, 1]);
    assert!(image.initialized);

    let volume = Texture::new(&f.ctx, TextureTarget::Texture3D).unwrap();
    volume
        .set_image_3d(1, gl::R32F, [8, 8, 8], gl::RED, gl::FLOAT, None)
        .unwrap();
    let image = f
        .mock
        .texture_image(volume.id(), TexImageTarget::Texture(TextureTarget::Texture3D), 1)
        .unwrap();
    assert_eq!(image.size, [8, 8, 8]);
    assert!(!image.initialized);
    f.assert_no_errors();
}

#[test]
fn image_data_must_cover_the_padded_rows() {
    let f = Fixture::new();
    let tex = Texture::new(&f.ctx, TextureTarget::Texture2D).unwrap();
    // one RGB pixel per row: the first row is padded to 4 bytes
    match tex.set_image_2d(0, gl::RGB8, 1, 2, gl::RGB, gl::UNSIGNED_BYTE, Some(&[0u8; 6])) {
        Err(Error::BufferTooSmall { required, actual }) => {
            assert_eq!((required, actual), (7, 6));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(matches!(
        tex.set_image_2d(0, gl::RGBA8, 1, 1, 0x1234, gl::UNSIGNED_BYTE, Some(&[0u8; 64])),
        Err(Error::UnsupportedPixelFormat { format: 0x1234, .. })
    ));
    assert_eq!(f.mock.command_count("tex_image"), 0);

    tex.set_image_2d(0, gl::RGB8, 1, 2, gl::RGB, gl::UNSIGNED_BYTE, Some(&[0u8; 7]))
        .unwrap();
    f.mock.set_integer(gl::UNPACK_ALIGNMENT, 1);
    tex.set_image_2d(0, gl::RGB8, 1, 2, gl::RGB, gl::UNSIGNED_BYTE, Some(&[0u8; 6]))
        .unwrap();
    assert_eq!(f.mock.command_count("tex_image"), 2);
    f.assert_no_errors();
}

#[test]
fn image_uploads_read_client_memory() {
    let f = Fixture::new();
    let staging = Buffer::new(&f.ctx, BufferTarget::PixelUnpack).unwrap();
    staging.allocate(64, BufferUsage::StreamDraw);
    assert_eq!(f.ctx.active_binding(BindingSlot::Buffer(BufferTarget::PixelUnpack)), staging.id());

    let tex = Texture::new(&f.ctx, TextureTarget::Texture2D).unwrap();
    tex.set_image_2d(0, gl::RGBA8, 2, 2, gl::RGBA, gl::UNSIGNED_BYTE, Some(&[0u8; 16]))
        .unwrap();
    let image = f
        .mock
        .texture_image(tex.id(), TexImageTarget::Texture(TextureTarget::Texture2D), 0)
        .unwrap();
    assert_eq!(image.unpack_buffer, 0);
    assert!(image.initialized);
    f.assert_no_errors();
}

#[test]
fn cube_faces_are_specified_separately() {
    let f = Fixture::new();
    let cube = Texture::new(&f.ctx, TextureTarget::CubeMap).unwrap();
    assert!(cube
        .set_image_2d(0, gl::RGBA8, 16, 16, gl::RGBA, gl::UNSIGNED_BYTE, None)
        .is_err());
    for &face in &[CubeFace::PositiveX, CubeFace::NegativeZ] {
        cube.set_cube_face_image(face, 0, gl::RGBA8, 16, 16, gl::RGBA, gl::UNSIGNED_BYTE, None)
            .unwrap();
    }
    assert!(f
        .mock
        .texture_image(cube.id(), TexImageTarget::CubeFace(CubeFace::NegativeZ), 0)
        .is_some());
    assert!(f
        .mock
        .texture_image(cube.id(), TexImageTarget::CubeFace(CubeFace::PositiveY), 0)
        .is_none());
    cube.generate_mipmap();
    assert_eq!(f.mock.command_count("generate_mipmap"), 1);
    f.assert_no_errors();
}

#[test]
fn wrap_and_filter_parameters() {
    let f = Fixture::new();
    let tex = Texture::new(&f.ctx, TextureTarget::Texture2D).unwrap();
    tex.set_wrap(WrapMode::ClampToEdge);
    tex.set_filter(MinFilter::LinearMipmapLinear, MagFilter::Nearest);

    let param = |pname| f.mock.texture_parameter(tex.id(), pname);
    assert_eq!(param(gl::TEXTURE_WRAP_S), Some(gl::CLAMP_TO_EDGE as i32));
    assert_eq!(param(gl::TEXTURE_WRAP_T), Some(gl::CLAMP_TO_EDGE as i32));
    assert_eq!(param(gl::TEXTURE_WRAP_R), None);
    assert_eq!(tex.parameter(gl::TEXTURE_MIN_FILTER), gl::LINEAR_MIPMAP_LINEAR as i32);
    assert_eq!(tex.parameter(gl::TEXTURE_MAG_FILTER), gl::NEAREST as i32);

    let cube = Texture::new(&f.ctx, TextureTarget::CubeMap).unwrap();
    cube.set_wrap(WrapMode::Repeat);
    assert_eq!(
        f.mock.texture_parameter(cube.id(), gl::TEXTURE_WRAP_R),
        Some(gl::REPEAT as i32)
    );
    f.assert_no_errors();
}

//--- renderbuffers --------------------------------------------------------------------------------

#[test]
fn renderbuffer_storage() {
    let f = Fixture::new();
    let rb = Renderbuffer::with_storage(&f.ctx, gl::DEPTH24_STENCIL8, 32, 16).unwrap();
    let msaa = Renderbuffer::new(&f.ctx).unwrap();
    msaa.set_storage_multisample(gl::RGBA8, 32, 16, 4);

    assert_eq!(
        f.mock.renderbuffer_info(rb.id()),
        Some(MockRenderbufferStorage {
            internal_format: gl::DEPTH24_STENCIL8,
            width: 32,
            height: 16,
            samples: 0,
        })
    );
    assert_eq!(f.mock.renderbuffer_info(msaa.id()).unwrap().samples, 4);
    f.assert_no_errors();
}

//--- framebuffers ---------------------------------------------------------------------------------

#[test]
fn empty_framebuffer_is_incomplete() {
    let f = Fixture::new();
    let fb = Framebuffer::new(&f.ctx, FramebufferTarget::Framebuffer).unwrap();
    assert_eq!(fb.check_status(), FramebufferStatus::MissingAttachment);
    assert!(matches!(
        fb.ensure_complete(),
        Err(Error::FramebufferIncomplete(FramebufferStatus::MissingAttachment))
    ));
    assert!(Framebuffer::screen(&f.ctx).check_status().is_complete());
}

#[test]
fn attachments_are_recorded() {
    let f = Fixture::new();
    let fb = Framebuffer::new(&f.ctx, FramebufferTarget::Draw).unwrap();
    let color = Texture::new(&f.ctx, TextureTarget::Texture2D).unwrap();
    let array = Texture::new(&f.ctx, TextureTarget::Texture2DArray).unwrap();
    let depth = Renderbuffer::with_storage(&f.ctx, gl::DEPTH_COMPONENT32F, 8, 8).unwrap();

    fb.attach_texture(Attachment::Color(0), &color, 0);
    fb.attach_texture_layer(Attachment::Color(1), &array, 0, 2)
        .unwrap();
    fb.attach_renderbuffer(Attachment::Depth, &depth);
    assert!(matches!(
        fb.attach_texture_layer(Attachment::Color(2), &color, 0, 0),
        Err(Error::InvalidTarget { .. })
    ));
    assert!(matches!(
        fb.attach_cube_face(Attachment::Color(2), &color, CubeFace::PositiveX, 0),
        Err(Error::InvalidTarget { .. })
    ));

    assert_eq!(
        f.mock.attachment(fb.id(), Attachment::Color(0)),
        Some((ObjectKind::Texture, color.id()))
    );
    assert_eq!(
        f.mock.attachment(fb.id(), Attachment::Color(1)),
        Some((ObjectKind::Texture, array.id()))
    );
    assert_eq!(
        f.mock.attachment(fb.id(), Attachment::Depth),
        Some((ObjectKind::Renderbuffer, depth.id()))
    );
    assert!(matches!(
        fb.attachment(Attachment::Depth),
        Some(FramebufferAttachment::Renderbuffer(_))
    ));
    assert!(fb.attachment(Attachment::Color(2)).is_none());

    fb.set_draw_buffers(&[Attachment::Color(0), Attachment::Color(1)])
        .unwrap();
    assert_eq!(
        f.mock.selected_draw_buffers(fb.id()),
        vec![Attachment::Color(0), Attachment::Color(1)]
    );
    assert_eq!(fb.check_status(), FramebufferStatus::Complete);
    f.assert_no_errors();
}

#[test]
fn cube_face_attachment() {
    let f = Fixture::new();
    let fb = Framebuffer::new(&f.ctx, FramebufferTarget::Framebuffer).unwrap();
    let cube = Texture::new(&f.ctx, TextureTarget::CubeMap).unwrap();
    fb.attach_cube_face(Attachment::Color(0), &cube, CubeFace::NegativeY, 0)
        .unwrap();
    assert_eq!(
        f.mock.attachment(fb.id(), Attachment::Color(0)),
        Some((ObjectKind::Texture, cube.id()))
    );
}

#[test]
fn read_pixels_checks_the_destination_size() {
    let f = Fixture::new();
    let fb = Framebuffer::new(&f.ctx, FramebufferTarget::Framebuffer).unwrap();
    let mut small = [0u8; 15];
    match fb.read_pixels(0, 0, 2, 2, gl::RGBA, gl::UNSIGNED_BYTE, &mut small) {
        Err(Error::BufferTooSmall { required, actual }) => {
            assert_eq!((required, actual), (16, 15));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(f.mock.command_count("read_pixels"), 0);

    let mut pixels = [0u8; 16];
    fb.read_pixels(0, 0, 2, 2, gl::RGBA, gl::UNSIGNED_BYTE, &mut pixels)
        .unwrap();
    assert!(pixels.iter().all(|&p| p == fb.id() as u8));

    let draw_only = Framebuffer::new(&f.ctx, FramebufferTarget::Draw).unwrap();
    assert!(matches!(
        draw_only.read_pixels(0, 0, 2, 2, gl::RGBA, gl::UNSIGNED_BYTE, &mut pixels),
        Err(Error::InvalidTarget { .. })
    ));
}

#[test]
fn read_pixels_accounts_for_the_pack_alignment() {
    let f = Fixture::new();
    let fb = Framebuffer::new(&f.ctx, FramebufferTarget::Framebuffer).unwrap();
    let mut pixels = [0u8; 6];
    assert!(matches!(
        fb.read_pixels(0, 0, 1, 2, gl::RGB, gl::UNSIGNED_BYTE, &mut pixels),
        Err(Error::BufferTooSmall { required: 7, actual: 6 })
    ));
    assert!(matches!(
        fb.read_pixels(0, 0, 1, 1, gl::RGBA, 0x1234, &mut pixels),
        Err(Error::UnsupportedPixelFormat { ty: 0x1234, .. })
    ));
    assert_eq!(f.mock.command_count("read_pixels"), 0);

    f.mock.set_integer(gl::PACK_ALIGNMENT, 1);
    fb.read_pixels(0, 0, 1, 2, gl::RGB, gl::UNSIGNED_BYTE, &mut pixels)
        .unwrap();
    assert!(pixels.iter().all(|&p| p == fb.id() as u8));
}

#[test]
fn read_pixels_writes_client_memory() {
    let f = Fixture::new();
    let readback = Buffer::new(&f.ctx, BufferTarget::PixelPack).unwrap();
    readback.allocate(16, BufferUsage::StreamRead);
    let fb = Framebuffer::new(&f.ctx, FramebufferTarget::Framebuffer).unwrap();

    let mut pixels = [0u8; 16];
    fb.read_pixels(0, 0, 2, 2, gl::RGBA, gl::UNSIGNED_BYTE, &mut pixels)
        .unwrap();
    assert!(pixels.iter().all(|&p| p == fb.id() as u8));
    assert_eq!(f.mock.buffer_contents(readback.id()), Some(vec![0; 16]));
    f.assert_no_errors();
}

#[test]
fn clear_targets_the_framebuffer() {
    let f = Fixture::strict();
    let fb = Framebuffer::new(&f.ctx, FramebufferTarget::Framebuffer).unwrap();
    fb.clear(ClearMask::COLOR | ClearMask::DEPTH).unwrap();
    Framebuffer::screen(&f.ctx).clear(ClearMask::STENCIL).unwrap();
    assert_eq!(
        f.mock.clears(),
        vec![
            (fb.id(), ClearMask::COLOR | ClearMask::DEPTH),
            (0, ClearMask::STENCIL)
        ]
    );
    // strict unbind restored the default framebuffer
    assert_eq!(
        f.mock.bound(glcore::BindingSlot::Framebuffer(FramebufferTarget::Read)),
        0
    );

    let read_only = Framebuffer::new(&f.ctx, FramebufferTarget::Read).unwrap();
    assert!(read_only.clear(ClearMask::COLOR).is_err());
    f.assert_no_errors();
}
