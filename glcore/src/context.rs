//! The context: native API, binding cache and configuration.
use crate::{
    api::{gl, Api, NativeId, ObjectKind},
    binding::{BindingCache, BindingSlot},
    config::ContextConfig,
    error::{Error, GlError, GlResult},
    handle::{Deleter, HandleBox},
};
use once_cell::unsync::OnceCell;
use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};
use tracing::{debug, trace, warn};

struct ContextInner {
    api: Box<dyn Api>,
    config: ContextConfig,
    bindings: RefCell<BindingCache>,
    /// Last error logged by `check_error`, and where.
    last_error: Cell<Option<(GlError, &'static str)>>,
    max_texture_units: OnceCell<u32>,
}

/// A graphics context.
///
/// Clones refer to the same context. A context, and every object created from it, must stay on
/// the thread that drives the underlying native context.
#[derive(Clone)]
pub struct Context {
    inner: Rc<ContextInner>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.inner.config)
            .field("bindings", &self.inner.bindings.borrow())
            .finish()
    }
}

impl Context {
    pub fn new(api: impl Api + 'static, config: ContextConfig) -> Context {
        debug!(?config, "creating context");
        Context {
            inner: Rc::new(ContextInner {
                api: Box::new(api),
                config,
                bindings: RefCell::new(BindingCache::new()),
                last_error: Cell::new(None),
                max_texture_units: OnceCell::new(),
            }),
        }
    }

    pub fn api(&self) -> &dyn Api {
        &*self.inner.api
    }

    pub fn config(&self) -> &ContextConfig {
        &self.inner.config
    }

    //--- binding ----------------------------------------------------------------------------------

    /// Binds `id` to `slot`. The native call is skipped if the cache says it's already bound.
    ///
    /// The binding stays in place after the call. See [`Context::scoped_bind`] for a bind that
    /// follows the `strict_unbind` policy.
    pub fn bind(&self, slot: BindingSlot, id: NativeId) {
        if let BindingSlot::Texture { unit, .. } = slot {
            // texture commands target the active unit, even when the texture itself is bound
            self.bind(BindingSlot::ActiveTexture, unit);
        }

        let mut bindings = self.inner.bindings.borrow_mut();
        if self.inner.config.cache_bindings && bindings.is_active(slot, id) {
            trace!(?slot, id, "bind elided");
            return;
        }
        trace!(?slot, id, "bind");
        self.inner.api.bind(slot, id);
        bindings.set_active(slot, id);
    }

    /// Restores the default object of `slot`.
    pub fn unbind(&self, slot: BindingSlot) {
        self.bind(slot, 0)
    }

    /// Binds `id` to `slot` for the lifetime of the returned guard.
    ///
    /// With `strict_unbind`, the guard restores the previously bound object when dropped.
    /// Guards on the same slot may nest and must be released in reverse order. Nothing is
    /// restored if the previous binding was unknown.
    pub fn scoped_bind(&self, slot: BindingSlot, id: NativeId) -> BindGuard<'_> {
        let previous = self.inner.bindings.borrow().known_binding(slot);
        self.bind(slot, id);
        BindGuard {
            ctx: self,
            slot,
            previous,
            restore: self.inner.config.strict_unbind,
        }
    }

    /// The id this context believes is bound to `slot`.
    pub fn active_binding(&self, slot: BindingSlot) -> NativeId {
        self.inner.bindings.borrow().get_active(slot)
    }

    pub fn is_bound(&self, slot: BindingSlot, id: NativeId) -> bool {
        self.inner.bindings.borrow().is_active(slot, id)
    }

    /// Marks the binding of `slot` as unknown, e.g. after foreign code changed it.
    pub fn invalidate_binding(&self, slot: BindingSlot) {
        self.inner.bindings.borrow_mut().invalidate(slot)
    }

    /// Marks all bindings as unknown.
    pub fn invalidate_bindings(&self) {
        debug!("invalidating all bindings");
        self.inner.bindings.borrow_mut().invalidate_all()
    }

    //--- errors -----------------------------------------------------------------------------------

    /// Returns and clears the oldest pending driver error.
    pub fn poll_error(&self) -> Option<GlError> {
        GlError::from_code(self.inner.api.get_error())
    }

    /// Polls and logs a pending error if `check_errors` is enabled.
    ///
    /// Repeated reports of the same error at the same place are logged once.
    pub(crate) fn check_error(&self, what: &'static str) {
        if !self.inner.config.check_errors {
            return;
        }
        if let Some(error) = self.poll_error() {
            let prev = self.inner.last_error.replace(Some((error, what)));
            if prev != Some((error, what)) {
                warn!("GL error during {}: {}", what, error);
            }
        }
    }

    //--- queries ----------------------------------------------------------------------------------

    pub fn get_integer(&self, pname: gl::types::GLenum) -> i32 {
        self.inner.api.get_integer(pname)
    }

    /// Number of texture image units. Queried once.
    pub fn max_texture_units(&self) -> u32 {
        *self.inner.max_texture_units.get_or_init(|| {
            self.inner
                .api
                .get_integer(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS)
                .max(0) as u32
        })
    }

    //--- object lifetime --------------------------------------------------------------------------

    /// Creates an object through the batch creation entry point of `kind`.
    pub(crate) fn create_handle(&self, kind: ObjectKind) -> GlResult<HandleBox> {
        let handle = HandleBox::create(
            || {
                let mut ids = [0];
                self.inner.api.gen_objects(kind, &mut ids);
                ids[0]
            },
            self.array_deleter(kind),
        );
        self.check_error("creating object");
        if handle.is_null() {
            return Err(Error::CreationFailed(kind));
        }
        debug!(?kind, id = handle.as_native_id(), "created object");
        Ok(handle)
    }

    /// Deleter calling the batch deletion entry point of `kind`.
    pub(crate) fn array_deleter(&self, kind: ObjectKind) -> Deleter {
        let ctx = self.clone();
        Deleter::from_array(move |ids| {
            ctx.inner.api.delete_objects(kind, ids);
            for &id in ids {
                ctx.object_destroyed(kind, id);
            }
        })
    }

    /// Deleter calling the single-object deletion entry point of shaders and programs.
    pub(crate) fn single_deleter(&self, kind: ObjectKind) -> Deleter {
        let ctx = self.clone();
        Deleter::new(move |id| {
            match kind {
                ObjectKind::Shader => ctx.inner.api.delete_shader(id),
                ObjectKind::Program => ctx.inner.api.delete_program(id),
                _ => ctx.inner.api.delete_objects(kind, &[id]),
            }
            ctx.object_destroyed(kind, id);
        })
    }

    fn object_destroyed(&self, kind: ObjectKind, id: NativeId) {
        debug!(?kind, id, "deleted object");
        self.inner.bindings.borrow_mut().forget_object(kind, id);
        self.check_error("deleting object");
    }
}

/// Keeps an object bound for the duration of an operation.
///
/// Returned by [`Context::scoped_bind`]. Restoration (if enabled) happens on drop, so it also
/// runs when the operation unwinds.
#[must_use = "the binding is released when the guard is dropped"]
pub struct BindGuard<'a> {
    ctx: &'a Context,
    slot: BindingSlot,
    previous: Option<NativeId>,
    restore: bool,
}

impl<'a> BindGuard<'a> {
    pub fn slot(&self) -> BindingSlot {
        self.slot
    }

    /// The id that was bound to the slot when the guard was acquired, `None` if unknown.
    pub fn previous(&self) -> Option<NativeId> {
        self.previous
    }

    /// Releases the binding now instead of at the end of the scope.
    pub fn release(self) {}
}

impl<'a> Drop for BindGuard<'a> {
    fn drop(&mut self) {
        match self.previous {
            Some(previous) if self.restore => self.ctx.bind(self.slot, previous),
            _ => {}
        }
    }
}
