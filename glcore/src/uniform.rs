use crate::api::GLenum;

/// Value of a uniform variable.
///
/// Arrays set consecutive locations starting at the target location.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UniformValue<'a> {
    Int(i32),
    IVec2([i32; 2]),
    IVec3([i32; 3]),
    IVec4([i32; 4]),
    IntArray(&'a [i32]),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    FloatArray(&'a [f32]),
    Vec2Array(&'a [[f32; 2]]),
    Vec3Array(&'a [[f32; 3]]),
    Vec4Array(&'a [[f32; 4]]),
    /// Column-major 3x3 matrix.
    Mat3([[f32; 3]; 3]),
    /// Column-major 4x4 matrix.
    Mat4([[f32; 4]; 4]),
}

macro_rules! impl_uniform_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<$t> for UniformValue<'a> {
                fn from(v: $t) -> Self {
                    UniformValue::$variant(v)
                }
            }
        )*
    };
}

impl_uniform_from! {
    i32 => Int,
    [i32; 2] => IVec2,
    [i32; 3] => IVec3,
    [i32; 4] => IVec4,
    f32 => Float,
    [f32; 2] => Vec2,
    [f32; 3] => Vec3,
    [f32; 4] => Vec4,
    [[f32; 3]; 3] => Mat3,
    [[f32; 4]; 4] => Mat4,
}

macro_rules! impl_uniform_from_slice {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a [$t]> for UniformValue<'a> {
                fn from(v: &'a [$t]) -> Self {
                    UniformValue::$variant(v)
                }
            }
        )*
    };
}

impl_uniform_from_slice! {
    i32 => IntArray,
    f32 => FloatArray,
    [f32; 2] => Vec2Array,
    [f32; 3] => Vec3Array,
    [f32; 4] => Vec4Array,
}

impl<'a> UniformValue<'a> {
    /// Number of locations (array elements) written.
    pub fn count(&self) -> usize {
        match *self {
            UniformValue::IntArray(v) => v.len(),
            UniformValue::FloatArray(v) => v.len(),
            UniformValue::Vec2Array(v) => v.len(),
            UniformValue::Vec3Array(v) => v.len(),
            UniformValue::Vec4Array(v) => v.len(),
            _ => 1,
        }
    }
}

/// Description of an active uniform or vertex attribute of a linked program.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ActiveVariable {
    pub name: String,
    /// Type of the variable, e.g. `gl::FLOAT_VEC3`.
    pub ty: GLenum,
    /// Array size, 1 for non-arrays.
    pub size: i32,
}
