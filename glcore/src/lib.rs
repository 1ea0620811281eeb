//! Object wrappers over a handle-based, stateful graphics API.
//!
//! Native objects are owned by [`HandleBox`]es: cloning a wrapper shares the object, and the object
//! is deleted when the last clone is dropped. Binding state goes through the [`Context`], which
//! caches what is bound to each slot and elides redundant bind calls.

/// Implements the accessors shared by all object wrappers.
///
/// The type must have `ctx: Context` and `handle: HandleBox` fields.
macro_rules! impl_object {
    ($name:ident) => {
        impl $name {
            pub fn context(&self) -> &$crate::context::Context {
                &self.ctx
            }

            pub fn handle(&self) -> &$crate::handle::HandleBox {
                &self.handle
            }

            /// Native id of the object.
            pub fn id(&self) -> $crate::api::NativeId {
                self.handle.as_native_id()
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("id", &self.id())
                    .field("ref_count", &self.handle.ref_count())
                    .finish()
            }
        }
    };
}

pub mod api;
pub mod binding;
pub mod buffer;
mod config;
mod context;
pub mod draw;
mod error;
pub mod framebuffer;
pub mod handle;
pub mod mock;
pub mod pixel;
pub mod renderbuffer;
pub mod shader;
pub mod texture;
pub mod uniform;
pub mod vertex_array;

pub use crate::api::{Api, GlApi, NativeId, ObjectKind};
pub use crate::binding::{BindingCache, BindingSlot, BufferTarget, FramebufferTarget, TextureTarget};
pub use crate::buffer::{Buffer, BufferUsage};
pub use crate::config::ContextConfig;
pub use crate::context::{BindGuard, Context};
pub use crate::draw::{ClearMask, DrawMode, IndexType};
pub use crate::error::{Error, GlError, GlResult};
pub use crate::framebuffer::{Attachment, Framebuffer, FramebufferStatus};
pub use crate::handle::{Deleter, HandleBox};
pub use crate::pixel::{PixelDirection, PixelStore};
pub use crate::renderbuffer::Renderbuffer;
pub use crate::shader::{Program, Shader, ShaderStage};
pub use crate::texture::{CubeFace, MagFilter, MinFilter, TexImageTarget, Texture, WrapMode};
pub use crate::uniform::{ActiveVariable, UniformValue};
pub use crate::vertex_array::{VertexArray, VertexAttrib};
