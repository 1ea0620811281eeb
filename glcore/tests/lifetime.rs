mod common;

use common::{Fixture, FRAGMENT_SHADER, VERTEX_SHADER};
use glcore::{
    api::gl, Attachment, Buffer, BufferTarget, Error, Framebuffer, FramebufferTarget, ObjectKind,
    Program, Renderbuffer, Shader, ShaderStage, Texture, TextureTarget, VertexArray, VertexAttrib,
};

#[test]
fn last_copy_deletes_the_object() {
    let f = Fixture::new();
    let a = Buffer::new(&f.ctx, BufferTarget::Array).unwrap();
    let id = a.id();
    let b = a.clone();
    let c = b.clone();
    let d = a.clone();
    assert_eq!(a.handle().ref_count(), 4);

    drop(c);
    drop(a);
    drop(d);
    assert!(f.mock.deleted().is_empty());
    assert!(f.mock.is_live(ObjectKind::Buffer, id));

    drop(b);
    assert_eq!(f.mock.deleted(), vec![(ObjectKind::Buffer, id)]);
    f.assert_no_errors();
}

#[test]
fn copies_share_state() {
    let f = Fixture::new();
    let a = Buffer::new(&f.ctx, BufferTarget::Uniform).unwrap();
    let b = a.clone();
    b.set_data(&[0u32; 4], Default::default());
    assert_eq!(a.size(), 16);
    assert_eq!(a.id(), b.id());
}

#[test]
fn creation_failure_is_reported() {
    let f = Fixture::new();
    f.mock.fail_creation(true);
    assert!(matches!(
        Buffer::new(&f.ctx, BufferTarget::Array),
        Err(Error::CreationFailed(ObjectKind::Buffer))
    ));
    assert!(matches!(
        Shader::new(&f.ctx, ShaderStage::Vertex),
        Err(Error::CreationFailed(ObjectKind::Shader))
    ));
    assert!(matches!(
        Program::new(&f.ctx),
        Err(Error::CreationFailed(ObjectKind::Program))
    ));
    assert!(f.mock.deleted().is_empty());
}

#[test]
fn shaders_and_programs_use_single_deletion() {
    let f = Fixture::new();
    let shader = Shader::with_source(&f.ctx, ShaderStage::Vertex, VERTEX_SHADER).unwrap();
    let shader_id = shader.id();
    let program = Program::new(&f.ctx).unwrap();
    let program_id = program.id();
    assert_ne!(shader_id, program_id);

    drop(shader);
    drop(program);
    assert_eq!(
        f.mock.deleted(),
        vec![
            (ObjectKind::Shader, shader_id),
            (ObjectKind::Program, program_id)
        ]
    );
}

#[test]
fn vertex_array_keeps_its_buffers_alive() {
    let f = Fixture::new();
    let vertices = Buffer::with_data(
        &f.ctx,
        BufferTarget::Array,
        &[0.0f32; 9],
        Default::default(),
    )
    .unwrap();
    let indices =
        Buffer::with_data(&f.ctx, BufferTarget::ElementArray, &[0u16, 1, 2], Default::default())
            .unwrap();
    let vao = VertexArray::new(&f.ctx).unwrap();
    vao.set_attrib_pointer(&vertices, VertexAttrib::float(0, 3, 0, 0));
    vao.set_index_buffer(&indices);
    assert_eq!(vao.buffer_count(), 2);

    let (vertices_id, indices_id, vao_id) = (vertices.id(), indices.id(), vao.id());
    drop(vertices);
    drop(indices);
    assert!(f.mock.deleted().is_empty());

    drop(vao);
    let deleted = f.mock.deleted();
    assert_eq!(deleted.len(), 3);
    assert_eq!(deleted[0], (ObjectKind::VertexArray, vao_id));
    assert!(deleted.contains(&(ObjectKind::Buffer, vertices_id)));
    assert!(deleted.contains(&(ObjectKind::Buffer, indices_id)));
    f.assert_no_errors();
}

#[test]
fn framebuffer_keeps_its_attachments_alive() {
    let f = Fixture::new();
    let fb = Framebuffer::new(&f.ctx, FramebufferTarget::Framebuffer).unwrap();
    {
        let color = Texture::new(&f.ctx, TextureTarget::Texture2D).unwrap();
        color
            .set_image_2d(0, gl::RGBA8, 64, 64, gl::RGBA, gl::UNSIGNED_BYTE, None)
            .unwrap();
        let depth = Renderbuffer::with_storage(&f.ctx, gl::DEPTH_COMPONENT24, 64, 64).unwrap();
        fb.attach_texture(Attachment::Color(0), &color, 0);
        fb.attach_renderbuffer(Attachment::Depth, &depth);
    }
    assert!(f.mock.deleted().is_empty());
    assert!(fb.ensure_complete().is_ok());

    drop(fb);
    assert_eq!(f.mock.deleted().len(), 3);
    f.assert_no_errors();
}

#[test]
fn program_keeps_its_shaders_alive() {
    let f = Fixture::new();
    let program = {
        let vs = Shader::with_source(&f.ctx, ShaderStage::Vertex, VERTEX_SHADER).unwrap();
        let fs = Shader::with_source(&f.ctx, ShaderStage::Fragment, FRAGMENT_SHADER).unwrap();
        Program::with_shaders(&f.ctx, &[&vs, &fs]).unwrap()
    };
    assert!(program.is_linked());
    assert_eq!(program.shaders().len(), 2);
    assert_eq!(f.mock.live_count(ObjectKind::Shader), 2);

    drop(program);
    assert_eq!(f.mock.live_count(ObjectKind::Shader), 0);
    assert_eq!(f.mock.live_count(ObjectKind::Program), 0);
}

#[test]
fn default_framebuffer_is_never_deleted() {
    let f = Fixture::new();
    let screen = Framebuffer::screen(&f.ctx);
    assert_eq!(screen.id(), 0);
    let copy = screen.clone();
    drop(screen);
    drop(copy);
    assert!(f.mock.deleted().is_empty());
}

#[test]
fn recycled_ids_are_not_confused() {
    let f = Fixture::new();
    let a = Buffer::new(&f.ctx, BufferTarget::Array).unwrap();
    let id = a.id();
    a.bind();
    drop(a);

    let b = Buffer::new(&f.ctx, BufferTarget::Array).unwrap();
    assert_eq!(b.id(), id);
    b.bind();
    assert_eq!(f.mock.bind_count(), 2);
    assert_eq!(
        f.mock.bound(glcore::BindingSlot::Buffer(BufferTarget::Array)),
        id
    );
    f.assert_no_errors();
}
