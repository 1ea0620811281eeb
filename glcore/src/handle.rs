//! Shared ownership of native object names.
//!
//! The driver has no notion of ownership: object names are plain integers that get recycled once
//! deleted. A [`HandleBox`] ties a name to the function that destroys it. Cloning a box shares the
//! name, and the destroy function runs exactly once, when the last clone goes away.
use crate::api::NativeId;
use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

/// Destroys a native object.
///
/// The driver exposes two deletion shapes ("delete one by value" and "delete N from an array").
/// Both are normalized here into a single closure over one id, so the box never needs to know
/// which one it holds.
pub struct Deleter(Box<dyn FnOnce(NativeId)>);

impl Deleter {
    /// Deleter for APIs of the form `delete(id)`.
    pub fn new(f: impl FnOnce(NativeId) + 'static) -> Deleter {
        Deleter(Box::new(f))
    }

    /// Deleter for APIs of the form `delete(count, ids)`.
    pub fn from_array(f: impl FnOnce(&[NativeId]) + 'static) -> Deleter {
        Deleter(Box::new(move |id| f(&[id])))
    }

    fn run(self, id: NativeId) {
        (self.0)(id)
    }
}

impl fmt::Debug for Deleter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Deleter")
    }
}

struct Inner {
    id: Cell<NativeId>,
    // `None` before assignment, and after the deleter has run.
    deleter: RefCell<Option<Deleter>>,
    assigned: Cell<bool>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        let id = self.id.replace(0);
        if let Some(deleter) = self.deleter.get_mut().take() {
            // a box whose creation failed never owned anything
            if id != 0 {
                deleter.run(id);
            }
        }
    }
}

/// Shared owner of a native object name.
///
/// Clones observe the same id. The deleter runs when the last clone is dropped.
#[derive(Clone)]
pub struct HandleBox {
    inner: Rc<Inner>,
}

impl HandleBox {
    /// Creates a box by invoking the native creation function immediately.
    ///
    /// If `create` returns 0 (no object), the returned box is null and `deleter` is never called.
    pub fn create(create: impl FnOnce() -> NativeId, deleter: Deleter) -> HandleBox {
        let id = create();
        let handle = HandleBox::pending();
        handle.assign(id, deleter);
        handle
    }

    /// Creates an empty box, to be completed later with [`HandleBox::assign`].
    ///
    /// Used when the box must exist before the native id is known.
    pub fn pending() -> HandleBox {
        HandleBox {
            inner: Rc::new(Inner {
                id: Cell::new(0),
                deleter: RefCell::new(None),
                assigned: Cell::new(false),
            }),
        }
    }

    /// Completes a box created with [`HandleBox::pending`].
    ///
    /// # Panics
    ///
    /// If the box has already been assigned, whatever the value of `id`. All clones share the
    /// assignment, so assigning through any of them counts.
    pub fn assign(&self, id: NativeId, deleter: Deleter) {
        assert!(
            !self.inner.assigned.replace(true),
            "native handle assigned twice (current id {}, new id {})",
            self.inner.id.get(),
            id
        );
        self.inner.id.set(id);
        *self.inner.deleter.borrow_mut() = Some(deleter);
    }

    /// Returns the native id, or 0 if the box was never assigned.
    pub fn as_native_id(&self) -> NativeId {
        self.inner.id.get()
    }

    pub fn is_null(&self) -> bool {
        self.as_native_id() == 0
    }

    pub fn is_assigned(&self) -> bool {
        self.inner.assigned.get()
    }

    /// Number of boxes sharing this object.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Whether both boxes share the same object.
    pub fn ptr_eq(&self, other: &HandleBox) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for HandleBox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HandleBox")
            .field("id", &self.as_native_id())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_deleter(log: &Rc<RefCell<Vec<NativeId>>>) -> Deleter {
        let log = log.clone();
        Deleter::new(move |id| log.borrow_mut().push(id))
    }

    #[test]
    fn last_drop_deletes_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = HandleBox::create(|| 7, counting_deleter(&log));
        let b = a.clone();
        let c = b.clone();
        let d = a.clone();
        assert_eq!(a.ref_count(), 4);
        assert_eq!(c.as_native_id(), 7);

        drop(c);
        drop(a);
        drop(d);
        assert!(log.borrow().is_empty());
        drop(b);
        assert_eq!(*log.borrow(), vec![7]);
    }

    #[test]
    fn array_deleter_receives_single_element() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log2 = log.clone();
        let handle = HandleBox::create(
            || 3,
            Deleter::from_array(move |ids| log2.borrow_mut().extend_from_slice(ids)),
        );
        drop(handle);
        assert_eq!(*log.borrow(), vec![3]);
    }

    #[test]
    fn two_phase_assign() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let handle = HandleBox::pending();
        let alias = handle.clone();
        assert!(handle.is_null());
        assert!(!handle.is_assigned());

        alias.assign(12, counting_deleter(&log));
        assert_eq!(handle.as_native_id(), 12);
        drop(handle);
        drop(alias);
        assert_eq!(*log.borrow(), vec![12]);
    }

    #[test]
    #[should_panic(expected = "assigned twice")]
    fn double_assign_panics() {
        let handle = HandleBox::pending();
        handle.assign(5, Deleter::new(|_| {}));
        handle.assign(5, Deleter::new(|_| {}));
    }

    #[test]
    fn null_handle_is_never_deleted() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let handle = HandleBox::create(|| 0, counting_deleter(&log));
        assert!(handle.is_null());
        drop(handle);
        assert!(log.borrow().is_empty());

        // unassigned
        drop(HandleBox::pending());
    }
}
