mod common;

use common::{Fixture, FRAGMENT_SHADER, VERTEX_SHADER};
use glcore::{
    api::gl,
    draw::{self, draw_arrays, draw_elements},
    BindingSlot, Buffer, BufferTarget, BufferUsage, DrawMode, Error, IndexType, Program, Shader,
    ShaderStage, UniformValue, VertexArray, VertexAttrib,
};
use std::fs;

fn program(f: &Fixture) -> Program {
    let vs = Shader::with_source(&f.ctx, ShaderStage::Vertex, VERTEX_SHADER).unwrap();
    let fs = Shader::with_source(&f.ctx, ShaderStage::Fragment, FRAGMENT_SHADER).unwrap();
    let program = Program::with_shaders(&f.ctx, &[&vs, &fs]).unwrap();
    assert!(program.is_linked(), "link failed: {}", program.info_log());
    program
}

fn triangle(f: &Fixture) -> VertexArray {
    let vertices = Buffer::with_data(
        &f.ctx,
        BufferTarget::Array,
        &[0.0f32; 15],
        BufferUsage::StaticDraw,
    )
    .unwrap();
    let vao = VertexArray::new(&f.ctx).unwrap();
    vao.set_attrib_pointer(&vertices, VertexAttrib::float(0, 3, 20, 0));
    vao.set_attrib_pointer(&vertices, VertexAttrib::float(1, 2, 20, 12));
    vao.enable_attrib_array(0, true);
    vao.enable_attrib_array(1, true);
    vao
}

//--- shaders --------------------------------------------------------------------------------------

#[test]
fn shader_compiles() {
    let f = Fixture::new();
    let shader = Shader::with_source(&f.ctx, ShaderStage::Vertex, VERTEX_SHADER).unwrap();
    assert!(shader.is_compiled());
    assert_eq!(shader.stage(), ShaderStage::Vertex);
    assert_eq!(shader.info_log(), "");
    assert_eq!(f.mock.shader_text(shader.id()).as_deref(), Some(VERTEX_SHADER));
}

#[test]
fn compile_failure_is_a_status() {
    let f = Fixture::new();
    let shader = Shader::with_source(
        &f.ctx,
        ShaderStage::Fragment,
        "#version 450\n#error unsupported\n",
    )
    .unwrap();
    assert!(!shader.is_compiled());
    assert!(shader.info_log().contains("error"));

    shader.set_source(FRAGMENT_SHADER);
    assert!(!shader.is_compiled());
    assert!(shader.compile());
    assert!(shader.is_compiled());
}

#[test]
fn empty_source_does_not_compile() {
    let f = Fixture::new();
    let shader = Shader::with_source(&f.ctx, ShaderStage::Compute, "   ").unwrap();
    assert!(!shader.is_compiled());
    assert!(!shader.info_log().is_empty());
}

#[test]
fn shader_from_file() {
    let f = Fixture::new();
    let path = std::env::temp_dir().join(format!("glcore-test-{}.vert", std::process::id()));
    fs::write(&path, VERTEX_SHADER).unwrap();
    let shader = Shader::from_file(&f.ctx, ShaderStage::Vertex, &path).unwrap();
    fs::remove_file(&path).unwrap();
    assert!(shader.is_compiled());

    let missing = Shader::from_file(&f.ctx, ShaderStage::Vertex, path.with_extension("missing"));
    assert!(matches!(missing, Err(Error::Io(_))));
}

//--- programs -------------------------------------------------------------------------------------

#[test]
fn attaching_compiles_the_shader() {
    let f = Fixture::new();
    let shader = Shader::new(&f.ctx, ShaderStage::Vertex).unwrap();
    shader.set_source(VERTEX_SHADER);
    let program = Program::new(&f.ctx).unwrap();
    program.attach_shader(&shader);
    assert!(shader.is_compiled());
    assert_eq!(f.mock.attached_shaders(program.id()), vec![shader.id()]);

    program.detach_shader(&shader);
    assert!(program.shaders().is_empty());
    assert!(f.mock.attached_shaders(program.id()).is_empty());
    f.assert_no_errors();
}

#[test]
fn link_failures() {
    let f = Fixture::new();
    let empty = Program::new(&f.ctx).unwrap();
    assert!(!empty.link());
    assert!(!empty.is_linked());
    assert!(!empty.info_log().is_empty());

    let broken = Shader::with_source(&f.ctx, ShaderStage::Vertex, "#error\n").unwrap();
    let program = Program::with_shaders(&f.ctx, &[&broken]).unwrap();
    assert!(!program.is_linked());
    assert!(program.info_log().contains("not compiled"));
}

#[test]
fn introspection() {
    let f = Fixture::new();
    let program = program(&f);
    assert!(program.validate());
    assert_eq!(program.parameter(gl::ATTACHED_SHADERS), 2);

    assert_eq!(program.active_uniform_count(), 3);
    let names: Vec<String> = (0..program.active_uniform_count())
        .filter_map(|i| program.uniform_info(i))
        .map(|u| u.name)
        .collect();
    assert_eq!(names, vec!["transform", "color", "tex"]);
    assert_eq!(program.uniform_info(1).unwrap().ty, gl::FLOAT_VEC3);
    assert!(program.uniform_info(3).is_none());

    assert_eq!(program.active_attribute_count(), 2);
    assert_eq!(program.attribute_info(1).unwrap().name, "uv");
    assert_eq!(program.attrib_location("position"), Some(0));
    assert_eq!(program.attrib_location("normal"), None);
    assert_eq!(program.uniform_location("color"), Some(1));
    assert_eq!(program.uniform_location("missing"), None);
    f.assert_no_errors();
}

#[test]
fn attribute_locations_can_be_bound_before_linking() {
    let f = Fixture::new();
    let program = program(&f);
    program.bind_attrib_location(5, "uv");
    assert_eq!(program.attrib_location("uv"), Some(1));
    assert!(program.link());
    assert_eq!(program.attrib_location("uv"), Some(5));
    assert_eq!(program.attrib_location("position"), Some(0));
}

#[test]
fn uniforms() {
    let f = Fixture::strict();
    let program = program(&f);
    assert!(program.set_uniform("color", [1.0f32, 0.5, 0.0]));
    assert!(program.set_texture_unit("tex", 2));
    assert!(!program.set_uniform("missing", 1.0f32));
    let identity = [
        [1.0f32, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    program.set_uniform_at(0, identity);

    let value = |location| f.mock.uniform_value(program.id(), location);
    assert_eq!(
        value(1),
        Some(format!("{:?}", UniformValue::Vec3([1.0, 0.5, 0.0])))
    );
    assert_eq!(value(2), Some(format!("{:?}", UniformValue::Int(2))));
    assert_eq!(value(0), Some(format!("{:?}", UniformValue::Mat4(identity))));
    // the program was only bound for the duration of each call
    assert_eq!(f.mock.bound(BindingSlot::Program), 0);
    f.assert_no_errors();
}

#[test]
fn uniform_arrays() {
    let f = Fixture::new();
    let program = program(&f);
    let weights: &[f32] = &[0.25, 0.5, 0.25];
    program.set_uniform_at(1, weights);
    assert_eq!(
        f.mock.uniform_value(program.id(), 1),
        Some(format!("{:?}", UniformValue::FloatArray(weights)))
    );
}

//--- drawing --------------------------------------------------------------------------------------

#[test]
fn draw_arrays_binds_program_and_vertex_array() {
    let f = Fixture::new();
    let program = program(&f);
    let vao = triangle(&f);
    draw_arrays(&program, &vao, DrawMode::Triangles, 0, 3);
    draw_arrays(&program, &vao, DrawMode::Points, 1, 2);

    let draws = f.mock.draws();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].program, program.id());
    assert_eq!(draws[0].vertex_array, vao.id());
    assert_eq!(draws[0].framebuffer, 0);
    assert_eq!((draws[1].mode, draws[1].first, draws[1].count), (DrawMode::Points, 1, 2));
    // the second draw found everything already bound
    assert_eq!(
        f.mock
            .bind_calls()
            .iter()
            .filter(|(slot, _)| *slot == BindingSlot::Program)
            .count(),
        1
    );
    f.assert_no_errors();
}

#[test]
fn draw_elements_uses_the_index_buffer() {
    let f = Fixture::strict();
    let program = program(&f);
    let vao = triangle(&f);
    let indices = Buffer::with_data(
        &f.ctx,
        BufferTarget::ElementArray,
        &[0u16, 1, 2, 2, 1, 3],
        BufferUsage::StaticDraw,
    )
    .unwrap();
    vao.set_index_buffer(&indices);

    draw_elements(&program, &vao, DrawMode::Triangles, 3, IndexType::U16, 3 * IndexType::U16.size());
    let draws = f.mock.draws();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].indices, Some((IndexType::U16, indices.id())));
    assert_eq!(draws[0].first, 6);
    assert_eq!(f.mock.bound(BindingSlot::VertexArray), 0);
    f.assert_no_errors();
}

#[test]
fn compute_dispatch() {
    let f = Fixture::new();
    let cs = Shader::with_source(
        &f.ctx,
        ShaderStage::Compute,
        "#version 450\nlayout(local_size_x = 8) in;\nvoid main() {}\n",
    )
    .unwrap();
    let program = Program::with_shaders(&f.ctx, &[&cs]).unwrap();
    program.dispatch_compute(4, 2, 1);
    assert_eq!(f.mock.dispatches(), vec![[4, 2, 1]]);
    assert_eq!(f.mock.bound(BindingSlot::Program), program.id());
    f.assert_no_errors();
}

#[test]
fn global_state() {
    let f = Fixture::new();
    draw::viewport(&f.ctx, 0, 0, 640, 480);
    draw::clear_color(&f.ctx, [0.1, 0.2, 0.3, 1.0]);
    draw::clear(&f.ctx, glcore::ClearMask::all());
    assert_eq!(f.mock.last_viewport(), [0, 0, 640, 480]);
    assert_eq!(f.mock.last_clear_color(), [0.1, 0.2, 0.3, 1.0]);
    assert_eq!(f.mock.clears(), vec![(0, glcore::ClearMask::all())]);
    assert_eq!(f.ctx.get_integer(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS), 16);
}
