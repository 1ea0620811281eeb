use crate::{
    api::{gl, GLenum, ObjectKind},
    framebuffer::FramebufferStatus,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to create {0:?} object")]
    CreationFailed(ObjectKind),
    #[error("framebuffer incomplete: {0:?}")]
    FramebufferIncomplete(FramebufferStatus),
    #[error("{operation} is not supported on target {target}")]
    InvalidTarget {
        target: String,
        operation: &'static str,
    },
    #[error("texture unit {unit} out of range (max {max})")]
    InvalidTextureUnit { unit: u32, max: u32 },
    #[error("range {offset}..{offset}+{len} out of bounds of buffer of size {size}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        size: usize,
    },
    #[error("client memory too small: {required} bytes required, got {actual}")]
    BufferTooSmall { required: usize, actual: usize },
    #[error("unsupported pixel transfer format 0x{format:X} with type 0x{ty:X}")]
    UnsupportedPixelFormat { format: GLenum, ty: GLenum },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type GlResult<T> = Result<T, Error>;

/// Error codes reported by the driver's error register.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum GlError {
    #[error("GL_INVALID_ENUM: an unacceptable value is specified for an enumerated argument")]
    InvalidEnum,
    #[error("GL_INVALID_VALUE: a numeric argument is out of range")]
    InvalidValue,
    #[error("GL_INVALID_OPERATION: the specified operation is not allowed in the current state")]
    InvalidOperation,
    #[error("GL_INVALID_FRAMEBUFFER_OPERATION: the framebuffer object is not complete")]
    InvalidFramebufferOperation,
    #[error("GL_OUT_OF_MEMORY: there is not enough memory left to execute the command")]
    OutOfMemory,
    #[error("GL_STACK_UNDERFLOW")]
    StackUnderflow,
    #[error("GL_STACK_OVERFLOW")]
    StackOverflow,
    #[error("unknown GL error 0x{0:X}")]
    Unknown(GLenum),
}

impl GlError {
    /// Converts a value returned by the error register. `None` for `GL_NO_ERROR`.
    pub fn from_code(code: GLenum) -> Option<GlError> {
        match code {
            gl::NO_ERROR => None,
            gl::INVALID_ENUM => Some(GlError::InvalidEnum),
            gl::INVALID_VALUE => Some(GlError::InvalidValue),
            gl::INVALID_OPERATION => Some(GlError::InvalidOperation),
            gl::INVALID_FRAMEBUFFER_OPERATION => Some(GlError::InvalidFramebufferOperation),
            gl::OUT_OF_MEMORY => Some(GlError::OutOfMemory),
            gl::STACK_UNDERFLOW => Some(GlError::StackUnderflow),
            gl::STACK_OVERFLOW => Some(GlError::StackOverflow),
            other => Some(GlError::Unknown(other)),
        }
    }

    pub fn code(&self) -> GLenum {
        match *self {
            GlError::InvalidEnum => gl::INVALID_ENUM,
            GlError::InvalidValue => gl::INVALID_VALUE,
            GlError::InvalidOperation => gl::INVALID_OPERATION,
            GlError::InvalidFramebufferOperation => gl::INVALID_FRAMEBUFFER_OPERATION,
            GlError::OutOfMemory => gl::OUT_OF_MEMORY,
            GlError::StackUnderflow => gl::STACK_UNDERFLOW,
            GlError::StackOverflow => gl::STACK_OVERFLOW,
            GlError::Unknown(code) => code,
        }
    }
}
