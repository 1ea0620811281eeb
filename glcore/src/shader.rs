use crate::{
    api::{gl, GLenum, ObjectKind},
    binding::BindingSlot,
    context::Context,
    error::{Error, GlResult},
    handle::HandleBox,
    uniform::{ActiveVariable, UniformValue},
};
use std::{
    cell::{Cell, RefCell},
    fs,
    path::Path,
    rc::Rc,
};
use tracing::{debug, warn};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEvaluation,
    Compute,
}

pub(crate) fn shader_stage_to_glenum(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        ShaderStage::Geometry => gl::GEOMETRY_SHADER,
        ShaderStage::TessControl => gl::TESS_CONTROL_SHADER,
        ShaderStage::TessEvaluation => gl::TESS_EVALUATION_SHADER,
        ShaderStage::Compute => gl::COMPUTE_SHADER,
    }
}

/// Status flags of a program object.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ProgramStatus {
    Link,
    Validate,
}

/// Shader object.
///
/// The native object depends on the stage, so the handle is created empty and assigned once the
/// driver has returned an id.
#[derive(Clone)]
pub struct Shader {
    ctx: Context,
    handle: HandleBox,
    stage: ShaderStage,
    compiled: Rc<Cell<bool>>,
}

impl_object!(Shader);

impl Shader {
    pub fn new(ctx: &Context, stage: ShaderStage) -> GlResult<Shader> {
        let handle = HandleBox::pending();
        let id = ctx.api().create_shader(stage);
        ctx.check_error("creating shader");
        if id == 0 {
            return Err(Error::CreationFailed(ObjectKind::Shader));
        }
        handle.assign(id, ctx.single_deleter(ObjectKind::Shader));
        debug!(?stage, id, "created shader");
        Ok(Shader {
            ctx: ctx.clone(),
            handle,
            stage,
            compiled: Rc::new(Cell::new(false)),
        })
    }

    /// Creates a shader and compiles `source`.
    ///
    /// Compilation failure is not an error: check [`Shader::is_compiled`] and [`Shader::info_log`].
    pub fn with_source(ctx: &Context, stage: ShaderStage, source: &str) -> GlResult<Shader> {
        let shader = Shader::new(ctx, stage)?;
        shader.set_source(source);
        shader.compile();
        Ok(shader)
    }

    /// Creates a shader from the contents of a source file.
    pub fn from_file(ctx: &Context, stage: ShaderStage, path: impl AsRef<Path>) -> GlResult<Shader> {
        let source = fs::read_to_string(path)?;
        Shader::with_source(ctx, stage, &source)
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Replaces the source code. The shader must be compiled again.
    pub fn set_source(&self, source: &str) {
        if source.trim().is_empty() {
            warn!(stage = ?self.stage, id = self.id(), "empty shader source");
        }
        self.ctx.api().shader_source(self.id(), source);
        self.ctx.check_error("setting shader source");
        self.compiled.set(false);
    }

    /// Compiles the current source. Returns whether compilation succeeded.
    pub fn compile(&self) -> bool {
        self.ctx.api().compile_shader(self.id());
        self.ctx.check_error("compiling shader");
        let status = self.ctx.api().shader_status(self.id());
        if !status {
            debug!(stage = ?self.stage, id = self.id(), "shader compilation failed");
        }
        self.compiled.set(status);
        status
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.get()
    }

    /// Compiler diagnostics of the last compilation.
    pub fn info_log(&self) -> String {
        self.ctx.api().shader_info_log(self.id())
    }
}

//--------------------------------------------------------------------------------------------------

/// Program object.
///
/// Attached shaders are kept alive by the program.
#[derive(Clone)]
pub struct Program {
    ctx: Context,
    handle: HandleBox,
    linked: Rc<Cell<bool>>,
    shaders: Rc<RefCell<Vec<Shader>>>,
}

impl_object!(Program);

impl Program {
    pub fn new(ctx: &Context) -> GlResult<Program> {
        let handle = HandleBox::pending();
        let id = ctx.api().create_program();
        ctx.check_error("creating program");
        if id == 0 {
            return Err(Error::CreationFailed(ObjectKind::Program));
        }
        handle.assign(id, ctx.single_deleter(ObjectKind::Program));
        debug!(id, "created program");
        Ok(Program {
            ctx: ctx.clone(),
            handle,
            linked: Rc::new(Cell::new(false)),
            shaders: Default::default(),
        })
    }

    /// Creates a program, attaches `shaders` and links it.
    ///
    /// Link failure is not an error: check [`Program::is_linked`] and [`Program::info_log`].
    pub fn with_shaders(ctx: &Context, shaders: &[&Shader]) -> GlResult<Program> {
        let program = Program::new(ctx)?;
        for shader in shaders {
            program.attach_shader(shader);
        }
        program.link();
        Ok(program)
    }

    /// Attaches a shader, compiling it first if needed.
    pub fn attach_shader(&self, shader: &Shader) {
        if !shader.is_compiled() {
            shader.compile();
        }
        self.ctx.api().attach_shader(self.id(), shader.id());
        self.ctx.check_error("attaching shader");
        let mut shaders = self.shaders.borrow_mut();
        if !shaders.iter().any(|s| s.handle().ptr_eq(shader.handle())) {
            shaders.push(shader.clone());
        }
    }

    pub fn detach_shader(&self, shader: &Shader) {
        self.ctx.api().detach_shader(self.id(), shader.id());
        self.ctx.check_error("detaching shader");
        self.shaders
            .borrow_mut()
            .retain(|s| !s.handle().ptr_eq(shader.handle()));
    }

    /// Shaders currently attached.
    pub fn shaders(&self) -> Vec<Shader> {
        self.shaders.borrow().clone()
    }

    /// Links the program. Returns whether linking succeeded.
    pub fn link(&self) -> bool {
        self.ctx.api().link_program(self.id());
        self.ctx.check_error("linking program");
        let status = self.ctx.api().program_status(self.id(), ProgramStatus::Link);
        if !status {
            debug!(id = self.id(), "program link failed");
        }
        self.linked.set(status);
        status
    }

    /// Checks whether the program can execute in the current state.
    pub fn validate(&self) -> bool {
        self.ctx.api().validate_program(self.id());
        self.ctx.check_error("validating program");
        self.ctx
            .api()
            .program_status(self.id(), ProgramStatus::Validate)
    }

    pub fn is_linked(&self) -> bool {
        self.linked.get()
    }

    /// Diagnostics of the last link or validation.
    pub fn info_log(&self) -> String {
        self.ctx.api().program_info_log(self.id())
    }

    //--- binding ----------------------------------------------------------------------------------

    /// Makes this the current program.
    pub fn use_program(&self) {
        self.bind()
    }

    pub fn bind(&self) {
        self.ctx.bind(BindingSlot::Program, self.id())
    }

    pub fn unbind(&self) {
        self.ctx.unbind(BindingSlot::Program)
    }

    pub fn dispatch_compute(&self, x: u32, y: u32, z: u32) {
        let _prog = self.ctx.scoped_bind(BindingSlot::Program, self.id());
        self.ctx.api().dispatch_compute(x, y, z);
        self.ctx.check_error("dispatching compute");
    }

    //--- introspection ----------------------------------------------------------------------------

    /// Binds a vertex attribute name to an index. Takes effect at the next link.
    pub fn bind_attrib_location(&self, index: u32, name: &str) {
        self.ctx.api().bind_attrib_location(self.id(), index, name);
        self.ctx.check_error("binding attribute location");
    }

    /// Returns `None` if there is no active attribute with this name.
    pub fn attrib_location(&self, name: &str) -> Option<u32> {
        let location = self.ctx.api().attrib_location(self.id(), name);
        if location < 0 {
            None
        } else {
            Some(location as u32)
        }
    }

    /// Returns `None` if there is no active uniform with this name.
    pub fn uniform_location(&self, name: &str) -> Option<i32> {
        let location = self.ctx.api().uniform_location(self.id(), name);
        if location < 0 {
            None
        } else {
            Some(location)
        }
    }

    pub fn parameter(&self, pname: GLenum) -> i32 {
        let value = self.ctx.api().program_parameter(self.id(), pname);
        self.ctx.check_error("getting program parameter");
        value
    }

    pub fn active_uniform_count(&self) -> u32 {
        self.parameter(gl::ACTIVE_UNIFORMS).max(0) as u32
    }

    pub fn active_attribute_count(&self) -> u32 {
        self.parameter(gl::ACTIVE_ATTRIBUTES).max(0) as u32
    }

    /// Name, type and array size of the active uniform at `index`.
    pub fn uniform_info(&self, index: u32) -> Option<ActiveVariable> {
        if index >= self.active_uniform_count() {
            return None;
        }
        Some(self.ctx.api().active_uniform(self.id(), index))
    }

    /// Name, type and array size of the active attribute at `index`.
    pub fn attribute_info(&self, index: u32) -> Option<ActiveVariable> {
        if index >= self.active_attribute_count() {
            return None;
        }
        Some(self.ctx.api().active_attrib(self.id(), index))
    }

    //--- uniforms ---------------------------------------------------------------------------------

    /// Sets a uniform by name. Returns `false` if the program has no active uniform with this
    /// name, in which case nothing is done.
    pub fn set_uniform<'a>(&self, name: &str, value: impl Into<UniformValue<'a>>) -> bool {
        match self.uniform_location(name) {
            Some(location) => {
                self.set_uniform_at(location, value);
                true
            }
            None => {
                debug!(program = self.id(), name, "uniform not active");
                false
            }
        }
    }

    pub fn set_uniform_at<'a>(&self, location: i32, value: impl Into<UniformValue<'a>>) {
        let value = value.into();
        let _prog = self.ctx.scoped_bind(BindingSlot::Program, self.id());
        self.ctx.api().uniform(location, &value);
        self.ctx.check_error("setting uniform");
    }

    /// Points a sampler uniform at a texture unit.
    pub fn set_texture_unit(&self, name: &str, unit: u32) -> bool {
        self.set_uniform(name, unit as i32)
    }
}
