//! In-memory stand-in for a driver.
//!
//! [`MockApi`] records every call and simulates enough driver state to check wrapper behavior
//! without a GPU: object names (recycled like a real driver does), the binding registers including
//! the active texture unit and the per-vertex-array element buffer, object contents, shader
//! compilation and program linking. Clones share the same state, so a test can keep one clone
//! while the context owns another.
use crate::{
    api::{gl, Api, GLenum, NativeId, ObjectKind},
    binding::{BindingSlot, BufferTarget, FramebufferTarget, TextureTarget},
    buffer::BufferUsage,
    draw::{ClearMask, DrawMode, IndexType},
    framebuffer::Attachment,
    shader::{ProgramStatus, ShaderStage},
    texture::TexImageTarget,
    uniform::{ActiveVariable, UniformValue},
    vertex_array::VertexAttrib,
};
use std::{
    cell::RefCell,
    collections::{HashMap, HashSet, VecDeque},
    rc::Rc,
};

/// A call received by the mock.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
    Gen(ObjectKind, NativeId),
    Delete(ObjectKind, NativeId),
    Bind(BindingSlot, NativeId),
    /// Any other command, by name.
    Command(&'static str),
}

/// Image specified for one level of a texture.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MockTexImage {
    pub internal_format: GLenum,
    pub size: [u32; 3],
    pub initialized: bool,
    /// Pixel unpack buffer bound when the image was specified; `data` is an offset into it if
    /// not 0.
    pub unpack_buffer: NativeId,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MockRenderbufferStorage {
    pub internal_format: GLenum,
    pub width: u32,
    pub height: u32,
    pub samples: u32,
}

/// A recorded draw, with the state it was issued in.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DrawCall {
    pub mode: DrawMode,
    pub program: NativeId,
    pub vertex_array: NativeId,
    pub framebuffer: NativeId,
    /// `first` for array draws, byte offset for indexed draws.
    pub first: usize,
    pub count: i32,
    /// Index type and element buffer of indexed draws.
    pub indices: Option<(IndexType, NativeId)>,
}

#[derive(Default)]
struct NamePool {
    last: NativeId,
    free: Vec<NativeId>,
}

impl NamePool {
    fn alloc(&mut self) -> NativeId {
        match self.free.pop() {
            Some(id) => id,
            None => {
                self.last += 1;
                self.last
            }
        }
    }
}

struct MockShader {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Default)]
struct MockProgram {
    attached: Vec<NativeId>,
    linked: bool,
    log: String,
    uniforms: Vec<ActiveVariable>,
    attributes: Vec<ActiveVariable>,
    attrib_bindings: HashMap<String, u32>,
    attrib_locations: HashMap<String, u32>,
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    errors: VecDeque<GLenum>,
    fail_creation: bool,
    integers: HashMap<GLenum, i32>,
    names: HashMap<ObjectKind, NamePool>,
    live: HashSet<(ObjectKind, NativeId)>,
    registers: HashMap<BindingSlot, NativeId>,
    element_buffers: HashMap<NativeId, NativeId>,

    buffers: HashMap<NativeId, Vec<u8>>,
    tex_images: HashMap<(NativeId, TexImageTarget, i32), MockTexImage>,
    tex_parameters: HashMap<(NativeId, GLenum), i32>,
    renderbuffers: HashMap<NativeId, MockRenderbufferStorage>,
    attachments: HashMap<NativeId, HashMap<Attachment, (ObjectKind, NativeId)>>,
    draw_buffers: HashMap<NativeId, Vec<Attachment>>,
    vertex_attribs: HashMap<(NativeId, u32), VertexAttrib>,
    enabled_attribs: HashSet<(NativeId, u32)>,
    shaders: HashMap<NativeId, MockShader>,
    programs: HashMap<NativeId, MockProgram>,
    uniforms: HashMap<(NativeId, i32), String>,
    draws: Vec<DrawCall>,
    dispatches: Vec<[u32; 3]>,
    viewport: [i32; 4],
    clear_color: [f32; 4],
    clears: Vec<(NativeId, ClearMask)>,
}

/// Shaders and programs are named from the same pool.
fn name_pool_kind(kind: ObjectKind) -> ObjectKind {
    match kind {
        ObjectKind::Shader => ObjectKind::Program,
        kind => kind,
    }
}

fn texture_target_of(image: TexImageTarget) -> TextureTarget {
    match image {
        TexImageTarget::Texture(target) => target,
        TexImageTarget::CubeFace(_) => TextureTarget::CubeMap,
    }
}

fn variable_type(name: &str) -> GLenum {
    match name {
        "float" => gl::FLOAT,
        "vec2" => gl::FLOAT_VEC2,
        "vec3" => gl::FLOAT_VEC3,
        "vec4" => gl::FLOAT_VEC4,
        "int" => gl::INT,
        "ivec2" => gl::INT_VEC2,
        "ivec3" => gl::INT_VEC3,
        "ivec4" => gl::INT_VEC4,
        "mat3" => gl::FLOAT_MAT3,
        "mat4" => gl::FLOAT_MAT4,
        "sampler2D" => gl::SAMPLER_2D,
        "samplerCube" => gl::SAMPLER_CUBE,
        _ => 0,
    }
}

/// Parses `<qualifier> <type> <name>[<size>];` declarations.
fn declarations(source: &str, qualifier: &str) -> Vec<ActiveVariable> {
    let mut vars = Vec::new();
    for line in source.lines() {
        let line = line.trim().trim_end_matches(';');
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some(qualifier) {
            continue;
        }
        let (ty, decl) = match (tokens.next(), tokens.next()) {
            (Some(ty), Some(decl)) => (ty, decl),
            _ => continue,
        };
        let (name, size) = match decl.find('[') {
            Some(pos) => {
                let size = decl[pos + 1..].trim_end_matches(']').parse().unwrap_or(1);
                (&decl[..pos], size)
            }
            None => (decl, 1),
        };
        vars.push(ActiveVariable {
            name: name.to_string(),
            ty: variable_type(ty),
            size,
        });
    }
    vars
}

impl State {
    fn record(&mut self, call: Call) {
        self.calls.push(call);
    }

    fn command(&mut self, name: &'static str) {
        self.calls.push(Call::Command(name));
    }

    fn error(&mut self, code: GLenum) {
        self.errors.push_back(code);
    }

    fn register(&self, slot: BindingSlot) -> NativeId {
        let slot = slot.registers()[0];
        self.registers.get(&slot).copied().unwrap_or(0)
    }

    fn active_unit(&self) -> u32 {
        self.register(BindingSlot::ActiveTexture)
    }

    /// Texture bound to `target` on the active unit.
    fn texture(&self, target: TextureTarget) -> NativeId {
        self.register(BindingSlot::Texture {
            unit: self.active_unit(),
            target,
        })
    }

    fn bind(&mut self, slot: BindingSlot, id: NativeId) {
        // the unit of a texture slot only selects the cache entry; the driver binds to the active unit
        let slot = match slot {
            BindingSlot::Texture { target, .. } => BindingSlot::Texture {
                unit: self.active_unit(),
                target,
            },
            slot => slot,
        };
        if let (Some(kind), true) = (slot.object_kind(), id != 0) {
            if !self.live.contains(&(kind, id)) {
                self.error(gl::INVALID_OPERATION);
                return;
            }
        }
        for r in slot.registers() {
            self.registers.insert(r, id);
        }
        match slot {
            BindingSlot::VertexArray => {
                let elements = self.element_buffers.get(&id).copied().unwrap_or(0);
                self.registers
                    .insert(BindingSlot::Buffer(BufferTarget::ElementArray), elements);
            }
            BindingSlot::Buffer(BufferTarget::ElementArray) => {
                let vao = self.register(BindingSlot::VertexArray);
                self.element_buffers.insert(vao, id);
            }
            _ => {}
        }
    }

    fn gen(&mut self, kind: ObjectKind) -> NativeId {
        if self.fail_creation {
            return 0;
        }
        let id = self.names.entry(name_pool_kind(kind)).or_default().alloc();
        self.live.insert((kind, id));
        self.record(Call::Gen(kind, id));
        id
    }

    fn delete(&mut self, kind: ObjectKind, id: NativeId) {
        if id == 0 || !self.live.remove(&(kind, id)) {
            return;
        }
        self.record(Call::Delete(kind, id));
        self.names.entry(name_pool_kind(kind)).or_default().free.push(id);
        for (slot, bound) in self.registers.iter_mut() {
            if slot.object_kind() == Some(kind) && *bound == id {
                *bound = 0;
            }
        }
        match kind {
            ObjectKind::Buffer => {
                self.buffers.remove(&id);
            }
            ObjectKind::Texture => {
                self.tex_images.retain(|&(tex, _, _), _| tex != id);
                self.tex_parameters.retain(|&(tex, _), _| tex != id);
            }
            ObjectKind::Renderbuffer => {
                self.renderbuffers.remove(&id);
            }
            ObjectKind::Framebuffer => {
                self.attachments.remove(&id);
                self.draw_buffers.remove(&id);
            }
            ObjectKind::VertexArray => {
                self.element_buffers.remove(&id);
                self.vertex_attribs.retain(|&(vao, _), _| vao != id);
                self.enabled_attribs.retain(|&(vao, _)| vao != id);
            }
            ObjectKind::Shader => {
                self.shaders.remove(&id);
            }
            ObjectKind::Program => {
                self.programs.remove(&id);
                self.uniforms.retain(|&(prog, _), _| prog != id);
            }
        }
    }

    fn framebuffer(&self, target: FramebufferTarget) -> NativeId {
        self.register(BindingSlot::Framebuffer(target))
    }

    fn attach(&mut self, target: FramebufferTarget, attachment: Attachment, object: (ObjectKind, NativeId)) {
        let fb = self.framebuffer(target);
        if fb == 0 {
            self.error(gl::INVALID_OPERATION);
            return;
        }
        let attachments = self.attachments.entry(fb).or_default();
        if object.1 == 0 {
            attachments.remove(&attachment);
        } else {
            attachments.insert(attachment, object);
        }
    }

    fn link(&mut self, program: NativeId) {
        let attached = match self.programs.get(&program) {
            Some(p) => p.attached.clone(),
            None => {
                self.error(gl::INVALID_VALUE);
                return;
            }
        };

        let mut log = String::new();
        let mut uniforms: Vec<ActiveVariable> = Vec::new();
        let mut attributes = Vec::new();
        if attached.is_empty() {
            log.push_str("error: no shaders attached\n");
        }
        for id in &attached {
            match self.shaders.get(id) {
                Some(shader) if shader.compiled => {
                    for var in declarations(&shader.source, "uniform") {
                        if !uniforms.iter().any(|u| u.name == var.name) {
                            uniforms.push(var);
                        }
                    }
                    if shader.stage == ShaderStage::Vertex {
                        attributes.extend(declarations(&shader.source, "in"));
                    }
                }
                _ => log.push_str(&format!("error: shader {} is not compiled\n", id)),
            }
        }

        let prog = match self.programs.get_mut(&program) {
            Some(p) => p,
            None => return,
        };
        prog.linked = log.is_empty();
        prog.log = log;
        prog.attrib_locations.clear();
        if prog.linked {
            let mut next = 0;
            for attr in &attributes {
                let location = match prog.attrib_bindings.get(&attr.name) {
                    Some(&location) => location,
                    None => {
                        while prog.attrib_bindings.values().any(|&l| l == next) {
                            next += 1;
                        }
                        next += 1;
                        next - 1
                    }
                };
                prog.attrib_locations.insert(attr.name.clone(), location);
            }
            prog.uniforms = uniforms;
            prog.attributes = attributes;
        } else {
            prog.uniforms.clear();
            prog.attributes.clear();
        }
    }

    fn draw(&mut self, mode: DrawMode, first: usize, count: i32, index_type: Option<IndexType>) {
        let program = self.register(BindingSlot::Program);
        let vertex_array = self.register(BindingSlot::VertexArray);
        let linked = self.programs.get(&program).map_or(false, |p| p.linked);
        if !linked || vertex_array == 0 {
            self.error(gl::INVALID_OPERATION);
            return;
        }
        let indices = match index_type {
            Some(ty) => {
                let elements = self.register(BindingSlot::Buffer(BufferTarget::ElementArray));
                if elements == 0 {
                    self.error(gl::INVALID_OPERATION);
                    return;
                }
                Some((ty, elements))
            }
            None => None,
        };
        self.draws.push(DrawCall {
            mode,
            program,
            vertex_array,
            framebuffer: self.framebuffer(FramebufferTarget::Draw),
            first,
            count,
            indices,
        });
    }
}

/// Recording, in-memory implementation of [`Api`].
#[derive(Clone, Default)]
pub struct MockApi {
    state: Rc<RefCell<State>>,
}

impl MockApi {
    pub fn new() -> MockApi {
        let api = MockApi::default();
        api.set_integer(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS, 16);
        api.set_integer(gl::PACK_ALIGNMENT, 4);
        api.set_integer(gl::UNPACK_ALIGNMENT, 4);
        api
    }

    //--- configuration ----------------------------------------------------------------------------

    /// Makes every subsequent creation call fail (return 0).
    pub fn fail_creation(&self, fail: bool) {
        self.state.borrow_mut().fail_creation = fail;
    }

    /// Queues an error code, returned by the next `get_error`.
    pub fn push_error(&self, code: GLenum) {
        self.state.borrow_mut().error(code)
    }

    pub fn set_integer(&self, pname: GLenum, value: i32) {
        self.state.borrow_mut().integers.insert(pname, value);
    }

    //--- call log ---------------------------------------------------------------------------------

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear()
    }

    /// Calls to `bind`, in order.
    pub fn bind_calls(&self) -> Vec<(BindingSlot, NativeId)> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match *call {
                Call::Bind(slot, id) => Some((slot, id)),
                _ => None,
            })
            .collect()
    }

    pub fn bind_count(&self) -> usize {
        self.bind_calls().len()
    }

    /// Number of times the command `name` was received.
    pub fn command_count(&self, name: &str) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Command(c) if *c == name))
            .count()
    }

    /// Objects deleted so far, in order.
    pub fn deleted(&self) -> Vec<(ObjectKind, NativeId)> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match *call {
                Call::Delete(kind, id) => Some((kind, id)),
                _ => None,
            })
            .collect()
    }

    /// Objects created so far, in order.
    pub fn created(&self) -> Vec<(ObjectKind, NativeId)> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match *call {
                Call::Gen(kind, id) => Some((kind, id)),
                _ => None,
            })
            .collect()
    }

    //--- driver state -----------------------------------------------------------------------------

    pub fn is_live(&self, kind: ObjectKind, id: NativeId) -> bool {
        self.state.borrow().live.contains(&(kind, id))
    }

    pub fn live_count(&self, kind: ObjectKind) -> usize {
        self.state
            .borrow()
            .live
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    /// What is actually bound to `slot`. For the combined framebuffer target, the draw framebuffer.
    pub fn bound(&self, slot: BindingSlot) -> NativeId {
        self.state.borrow().register(slot)
    }

    pub fn buffer_contents(&self, buffer: NativeId) -> Option<Vec<u8>> {
        self.state.borrow().buffers.get(&buffer).cloned()
    }

    pub fn texture_image(&self, texture: NativeId, target: TexImageTarget, level: i32) -> Option<MockTexImage> {
        self.state
            .borrow()
            .tex_images
            .get(&(texture, target, level))
            .copied()
    }

    pub fn texture_parameter(&self, texture: NativeId, pname: GLenum) -> Option<i32> {
        self.state
            .borrow()
            .tex_parameters
            .get(&(texture, pname))
            .copied()
    }

    pub fn renderbuffer_info(&self, renderbuffer: NativeId) -> Option<MockRenderbufferStorage> {
        self.state.borrow().renderbuffers.get(&renderbuffer).copied()
    }

    /// Object attached to `attachment` of `framebuffer`.
    pub fn attachment(&self, framebuffer: NativeId, attachment: Attachment) -> Option<(ObjectKind, NativeId)> {
        self.state
            .borrow()
            .attachments
            .get(&framebuffer)
            .and_then(|a| a.get(&attachment))
            .copied()
    }

    pub fn selected_draw_buffers(&self, framebuffer: NativeId) -> Vec<Attachment> {
        self.state
            .borrow()
            .draw_buffers
            .get(&framebuffer)
            .cloned()
            .unwrap_or_default()
    }

    pub fn vertex_attrib(&self, vertex_array: NativeId, index: u32) -> Option<VertexAttrib> {
        self.state
            .borrow()
            .vertex_attribs
            .get(&(vertex_array, index))
            .copied()
    }

    pub fn is_attrib_enabled(&self, vertex_array: NativeId, index: u32) -> bool {
        self.state
            .borrow()
            .enabled_attribs
            .contains(&(vertex_array, index))
    }

    /// Element buffer recorded in the state of `vertex_array`.
    pub fn element_buffer(&self, vertex_array: NativeId) -> NativeId {
        self.state
            .borrow()
            .element_buffers
            .get(&vertex_array)
            .copied()
            .unwrap_or(0)
    }

    pub fn shader_text(&self, shader: NativeId) -> Option<String> {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|s| s.source.clone())
    }

    pub fn attached_shaders(&self, program: NativeId) -> Vec<NativeId> {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.attached.clone())
            .unwrap_or_default()
    }

    /// Last value set on a uniform, formatted with `Debug`.
    pub fn uniform_value(&self, program: NativeId, location: i32) -> Option<String> {
        self.state
            .borrow()
            .uniforms
            .get(&(program, location))
            .cloned()
    }

    pub fn draws(&self) -> Vec<DrawCall> {
        self.state.borrow().draws.clone()
    }

    pub fn dispatches(&self) -> Vec<[u32; 3]> {
        self.state.borrow().dispatches.clone()
    }

    pub fn last_viewport(&self) -> [i32; 4] {
        self.state.borrow().viewport
    }

    pub fn last_clear_color(&self) -> [f32; 4] {
        self.state.borrow().clear_color
    }

    /// Clears issued so far, with the draw framebuffer they targeted.
    pub fn clears(&self) -> Vec<(NativeId, ClearMask)> {
        self.state.borrow().clears.clone()
    }
}

impl Api for MockApi {
    fn gen_objects(&self, kind: ObjectKind, ids: &mut [NativeId]) {
        let mut s = self.state.borrow_mut();
        for id in ids.iter_mut() {
            *id = match kind {
                ObjectKind::Shader | ObjectKind::Program => 0,
                kind => s.gen(kind),
            };
        }
    }

    fn delete_objects(&self, kind: ObjectKind, ids: &[NativeId]) {
        let mut s = self.state.borrow_mut();
        for &id in ids {
            s.delete(kind, id);
        }
    }

    fn create_shader(&self, stage: ShaderStage) -> NativeId {
        let mut s = self.state.borrow_mut();
        let id = s.gen(ObjectKind::Shader);
        if id != 0 {
            s.shaders.insert(
                id,
                MockShader {
                    stage,
                    source: String::new(),
                    compiled: false,
                    log: String::new(),
                },
            );
        }
        id
    }

    fn delete_shader(&self, shader: NativeId) {
        self.state.borrow_mut().delete(ObjectKind::Shader, shader)
    }

    fn create_program(&self) -> NativeId {
        let mut s = self.state.borrow_mut();
        let id = s.gen(ObjectKind::Program);
        if id != 0 {
            s.programs.insert(id, MockProgram::default());
        }
        id
    }

    fn delete_program(&self, program: NativeId) {
        self.state.borrow_mut().delete(ObjectKind::Program, program)
    }

    //--- global state -----------------------------------------------------------------------------

    fn bind(&self, slot: BindingSlot, id: NativeId) {
        let mut s = self.state.borrow_mut();
        s.record(Call::Bind(slot, id));
        s.bind(slot, id);
    }

    fn get_error(&self) -> GLenum {
        self.state
            .borrow_mut()
            .errors
            .pop_front()
            .unwrap_or(gl::NO_ERROR)
    }

    fn get_integer(&self, pname: GLenum) -> i32 {
        self.state
            .borrow()
            .integers
            .get(&pname)
            .copied()
            .unwrap_or(0)
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        let mut s = self.state.borrow_mut();
        s.command("viewport");
        s.viewport = [x, y, width, height];
    }

    fn clear_color(&self, color: [f32; 4]) {
        let mut s = self.state.borrow_mut();
        s.command("clear_color");
        s.clear_color = color;
    }

    fn clear(&self, mask: ClearMask) {
        let mut s = self.state.borrow_mut();
        s.command("clear");
        let fb = s.framebuffer(FramebufferTarget::Draw);
        s.clears.push((fb, mask));
    }

    //--- buffers ----------------------------------------------------------------------------------

    fn buffer_data(&self, target: BufferTarget, size: usize, data: Option<&[u8]>, _usage: BufferUsage) {
        let mut s = self.state.borrow_mut();
        s.command("buffer_data");
        let buffer = s.register(BindingSlot::Buffer(target));
        if buffer == 0 {
            s.error(gl::INVALID_OPERATION);
            return;
        }
        let contents = match data {
            Some(data) => data.to_vec(),
            None => vec![0; size],
        };
        s.buffers.insert(buffer, contents);
    }

    fn buffer_sub_data(&self, target: BufferTarget, offset: usize, data: &[u8]) {
        let mut s = self.state.borrow_mut();
        s.command("buffer_sub_data");
        let buffer = s.register(BindingSlot::Buffer(target));
        let contents = match s.buffers.get_mut(&buffer) {
            Some(contents) if offset + data.len() <= contents.len() => contents,
            _ => {
                s.error(gl::INVALID_VALUE);
                return;
            }
        };
        contents[offset..offset + data.len()].copy_from_slice(data);
    }

    //--- textures ---------------------------------------------------------------------------------

    fn tex_image(
        &self,
        target: TexImageTarget,
        level: i32,
        internal_format: GLenum,
        size: [u32; 3],
        _format: GLenum,
        _ty: GLenum,
        data: Option<&[u8]>,
    ) {
        let mut s = self.state.borrow_mut();
        s.command("tex_image");
        let texture = s.texture(texture_target_of(target));
        if texture == 0 {
            s.error(gl::INVALID_OPERATION);
            return;
        }
        let mut size = size;
        for extent in &mut size[target.dimensions() as usize..] {
            *extent = 1;
        }
        let unpack_buffer = s.register(BindingSlot::Buffer(BufferTarget::PixelUnpack));
        s.tex_images.insert(
            (texture, target, level),
            MockTexImage {
                internal_format,
                size,
                initialized: data.is_some(),
                unpack_buffer,
            },
        );
    }

    fn tex_parameter(&self, target: TextureTarget, pname: GLenum, value: i32) {
        let mut s = self.state.borrow_mut();
        s.command("tex_parameter");
        let texture = s.texture(target);
        if texture == 0 {
            s.error(gl::INVALID_OPERATION);
            return;
        }
        s.tex_parameters.insert((texture, pname), value);
    }

    fn get_tex_parameter(&self, target: TextureTarget, pname: GLenum) -> i32 {
        let s = self.state.borrow();
        let texture = s.texture(target);
        s.tex_parameters
            .get(&(texture, pname))
            .copied()
            .unwrap_or(0)
    }

    fn generate_mipmap(&self, target: TextureTarget) {
        let mut s = self.state.borrow_mut();
        s.command("generate_mipmap");
        if s.texture(target) == 0 {
            s.error(gl::INVALID_OPERATION);
        }
    }

    //--- renderbuffers ----------------------------------------------------------------------------

    fn renderbuffer_storage(&self, internal_format: GLenum, width: u32, height: u32, samples: u32) {
        let mut s = self.state.borrow_mut();
        s.command("renderbuffer_storage");
        let renderbuffer = s.register(BindingSlot::Renderbuffer);
        if renderbuffer == 0 {
            s.error(gl::INVALID_OPERATION);
            return;
        }
        s.renderbuffers.insert(
            renderbuffer,
            MockRenderbufferStorage {
                internal_format,
                width,
                height,
                samples,
            },
        );
    }

    //--- framebuffers -----------------------------------------------------------------------------

    fn framebuffer_renderbuffer(&self, target: FramebufferTarget, attachment: Attachment, renderbuffer: NativeId) {
        let mut s = self.state.borrow_mut();
        s.command("framebuffer_renderbuffer");
        s.attach(target, attachment, (ObjectKind::Renderbuffer, renderbuffer));
    }

    fn framebuffer_texture(
        &self,
        target: FramebufferTarget,
        attachment: Attachment,
        _texture_target: TexImageTarget,
        texture: NativeId,
        _level: i32,
        _layer: Option<i32>,
    ) {
        let mut s = self.state.borrow_mut();
        s.command("framebuffer_texture");
        s.attach(target, attachment, (ObjectKind::Texture, texture));
    }

    fn check_framebuffer_status(&self, target: FramebufferTarget) -> GLenum {
        let mut s = self.state.borrow_mut();
        s.command("check_framebuffer_status");
        let fb = s.framebuffer(target);
        if fb == 0 {
            return gl::FRAMEBUFFER_COMPLETE;
        }
        let attachments = match s.attachments.get(&fb) {
            Some(attachments) if !attachments.is_empty() => attachments,
            _ => return gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT,
        };
        let all_live = attachments
            .values()
            .all(|object| s.live.contains(object));
        if all_live {
            gl::FRAMEBUFFER_COMPLETE
        } else {
            gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT
        }
    }

    fn draw_buffers(&self, attachments: &[Attachment]) {
        let mut s = self.state.borrow_mut();
        s.command("draw_buffers");
        let fb = s.framebuffer(FramebufferTarget::Draw);
        s.draw_buffers.insert(fb, attachments.to_vec());
    }

    fn read_pixels(&self, _x: i32, _y: i32, width: u32, height: u32, _format: GLenum, _ty: GLenum, out: &mut [u8]) {
        let mut s = self.state.borrow_mut();
        s.command("read_pixels");
        if width == 0 || height == 0 {
            return;
        }
        // every pixel reads back as the id of the read framebuffer
        let fb = s.framebuffer(FramebufferTarget::Read);
        // with a pixel pack buffer bound, `out` would be an offset into it
        let pack_buffer = s.register(BindingSlot::Buffer(BufferTarget::PixelPack));
        let dest = if pack_buffer != 0 {
            match s.buffers.get_mut(&pack_buffer) {
                Some(contents) => contents.as_mut_slice(),
                None => return,
            }
        } else {
            out
        };
        for byte in dest.iter_mut() {
            *byte = fb as u8;
        }
    }

    //--- vertex arrays ----------------------------------------------------------------------------

    fn enable_vertex_attrib_array(&self, index: u32, enable: bool) {
        let mut s = self.state.borrow_mut();
        s.command("enable_vertex_attrib_array");
        let vao = s.register(BindingSlot::VertexArray);
        if vao == 0 {
            s.error(gl::INVALID_OPERATION);
            return;
        }
        if enable {
            s.enabled_attribs.insert((vao, index));
        } else {
            s.enabled_attribs.remove(&(vao, index));
        }
    }

    fn vertex_attrib_pointer(&self, attrib: &VertexAttrib) {
        let mut s = self.state.borrow_mut();
        s.command("vertex_attrib_pointer");
        let vao = s.register(BindingSlot::VertexArray);
        if vao == 0 || s.register(BindingSlot::Buffer(BufferTarget::Array)) == 0 {
            s.error(gl::INVALID_OPERATION);
            return;
        }
        s.vertex_attribs.insert((vao, attrib.index), *attrib);
    }

    //--- shaders and programs ---------------------------------------------------------------------

    fn shader_source(&self, shader: NativeId, source: &str) {
        let mut s = self.state.borrow_mut();
        s.command("shader_source");
        match s.shaders.get_mut(&shader) {
            Some(sh) => sh.source = source.to_string(),
            None => s.error(gl::INVALID_VALUE),
        }
    }

    fn compile_shader(&self, shader: NativeId) {
        let mut s = self.state.borrow_mut();
        s.command("compile_shader");
        match s.shaders.get_mut(&shader) {
            Some(sh) => {
                if sh.source.trim().is_empty() {
                    sh.compiled = false;
                    sh.log = "error: empty source".to_string();
                } else if let Some(line) = sh.source.lines().position(|l| l.trim_start().starts_with("#error")) {
                    sh.compiled = false;
                    sh.log = format!("0:{}: error: #error directive", line + 1);
                } else {
                    sh.compiled = true;
                    sh.log.clear();
                }
            }
            None => s.error(gl::INVALID_VALUE),
        }
    }

    fn shader_status(&self, shader: NativeId) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map_or(false, |sh| sh.compiled)
    }

    fn shader_info_log(&self, shader: NativeId) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|sh| sh.log.clone())
            .unwrap_or_default()
    }

    fn attach_shader(&self, program: NativeId, shader: NativeId) {
        let mut s = self.state.borrow_mut();
        s.command("attach_shader");
        if !s.shaders.contains_key(&shader) {
            s.error(gl::INVALID_VALUE);
            return;
        }
        match s.programs.get_mut(&program) {
            Some(p) if !p.attached.contains(&shader) => p.attached.push(shader),
            Some(_) => s.error(gl::INVALID_OPERATION),
            None => s.error(gl::INVALID_VALUE),
        }
    }

    fn detach_shader(&self, program: NativeId, shader: NativeId) {
        let mut s = self.state.borrow_mut();
        s.command("detach_shader");
        match s.programs.get_mut(&program) {
            Some(p) if p.attached.contains(&shader) => p.attached.retain(|&id| id != shader),
            _ => s.error(gl::INVALID_OPERATION),
        }
    }

    fn link_program(&self, program: NativeId) {
        let mut s = self.state.borrow_mut();
        s.command("link_program");
        s.link(program);
    }

    fn validate_program(&self, _program: NativeId) {
        self.state.borrow_mut().command("validate_program");
    }

    fn program_status(&self, program: NativeId, _status: ProgramStatus) -> bool {
        // a linked program is always valid here
        self.state
            .borrow()
            .programs
            .get(&program)
            .map_or(false, |p| p.linked)
    }

    fn program_parameter(&self, program: NativeId, pname: GLenum) -> i32 {
        let mut s = self.state.borrow_mut();
        let value = match s.programs.get(&program) {
            Some(p) => match pname {
                gl::LINK_STATUS => Some(p.linked as i32),
                gl::ATTACHED_SHADERS => Some(p.attached.len() as i32),
                gl::ACTIVE_UNIFORMS => Some(p.uniforms.len() as i32),
                gl::ACTIVE_ATTRIBUTES => Some(p.attributes.len() as i32),
                _ => None,
            },
            None => None,
        };
        match value {
            Some(value) => value,
            None => {
                s.error(gl::INVALID_ENUM);
                0
            }
        }
    }

    fn program_info_log(&self, program: NativeId) -> String {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn bind_attrib_location(&self, program: NativeId, index: u32, name: &str) {
        let mut s = self.state.borrow_mut();
        s.command("bind_attrib_location");
        match s.programs.get_mut(&program) {
            Some(p) => {
                p.attrib_bindings.insert(name.to_string(), index);
            }
            None => s.error(gl::INVALID_VALUE),
        }
    }

    fn attrib_location(&self, program: NativeId, name: &str) -> i32 {
        self.state
            .borrow()
            .programs
            .get(&program)
            .and_then(|p| p.attrib_locations.get(name))
            .map_or(-1, |&l| l as i32)
    }

    fn uniform_location(&self, program: NativeId, name: &str) -> i32 {
        self.state
            .borrow()
            .programs
            .get(&program)
            .and_then(|p| p.uniforms.iter().position(|u| u.name == name))
            .map_or(-1, |l| l as i32)
    }

    fn active_uniform(&self, program: NativeId, index: u32) -> ActiveVariable {
        let mut s = self.state.borrow_mut();
        let var = s
            .programs
            .get(&program)
            .and_then(|p| p.uniforms.get(index as usize))
            .cloned();
        var.unwrap_or_else(|| {
            s.error(gl::INVALID_VALUE);
            ActiveVariable {
                name: String::new(),
                ty: 0,
                size: 0,
            }
        })
    }

    fn active_attrib(&self, program: NativeId, index: u32) -> ActiveVariable {
        let mut s = self.state.borrow_mut();
        let var = s
            .programs
            .get(&program)
            .and_then(|p| p.attributes.get(index as usize))
            .cloned();
        var.unwrap_or_else(|| {
            s.error(gl::INVALID_VALUE);
            ActiveVariable {
                name: String::new(),
                ty: 0,
                size: 0,
            }
        })
    }

    fn uniform(&self, location: i32, value: &UniformValue) {
        let mut s = self.state.borrow_mut();
        s.command("uniform");
        let program = s.register(BindingSlot::Program);
        if program == 0 {
            s.error(gl::INVALID_OPERATION);
            return;
        }
        if location < 0 {
            return;
        }
        s.uniforms.insert((program, location), format!("{:?}", value));
    }

    fn dispatch_compute(&self, x: u32, y: u32, z: u32) {
        let mut s = self.state.borrow_mut();
        s.command("dispatch_compute");
        if s.register(BindingSlot::Program) == 0 {
            s.error(gl::INVALID_OPERATION);
            return;
        }
        s.dispatches.push([x, y, z]);
    }

    //--- drawing ----------------------------------------------------------------------------------

    fn draw_arrays(&self, mode: DrawMode, first: i32, count: i32) {
        let mut s = self.state.borrow_mut();
        s.command("draw_arrays");
        s.draw(mode, first.max(0) as usize, count, None);
    }

    fn draw_elements(&self, mode: DrawMode, count: i32, ty: IndexType, offset: usize) {
        let mut s = self.state.borrow_mut();
        s.command("draw_elements");
        s.draw(mode, offset, count, Some(ty));
    }
}
