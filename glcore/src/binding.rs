//! Binding slots and the cache of what is bound to them.
use crate::api::{NativeId, ObjectKind};
use smallvec::{smallvec, SmallVec};
use std::collections::HashMap;

/// Buffer binding targets.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    Array,
    ElementArray,
    Uniform,
    ShaderStorage,
    CopyRead,
    CopyWrite,
    PixelPack,
    PixelUnpack,
    DrawIndirect,
    Texture,
}

/// Texture binding targets.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TextureTarget {
    Texture1D,
    Texture2D,
    Texture3D,
    CubeMap,
    Texture1DArray,
    Texture2DArray,
    Rectangle,
}

impl TextureTarget {
    /// Number of extents of one image of this target (a 1D array is specified as a 2D image).
    pub fn image_dimensions(self) -> u32 {
        match self {
            TextureTarget::Texture1D => 1,
            TextureTarget::Texture2D
            | TextureTarget::CubeMap
            | TextureTarget::Texture1DArray
            | TextureTarget::Rectangle => 2,
            TextureTarget::Texture3D | TextureTarget::Texture2DArray => 3,
        }
    }
}

/// Framebuffer binding targets.
///
/// `Framebuffer` is the combined target: binding to it binds both the draw and the read framebuffer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FramebufferTarget {
    Framebuffer,
    Draw,
    Read,
}

/// A "current object" register of the native API.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BindingSlot {
    Buffer(BufferTarget),
    /// The active texture unit. The "id" bound to this slot is the unit index.
    ActiveTexture,
    Texture { unit: u32, target: TextureTarget },
    Framebuffer(FramebufferTarget),
    Renderbuffer,
    VertexArray,
    Program,
}

impl BindingSlot {
    /// The kind of object bound to this slot, if the slot holds object names.
    pub fn object_kind(&self) -> Option<ObjectKind> {
        match self {
            BindingSlot::Buffer(_) => Some(ObjectKind::Buffer),
            BindingSlot::ActiveTexture => None,
            BindingSlot::Texture { .. } => Some(ObjectKind::Texture),
            BindingSlot::Framebuffer(_) => Some(ObjectKind::Framebuffer),
            BindingSlot::Renderbuffer => Some(ObjectKind::Renderbuffer),
            BindingSlot::VertexArray => Some(ObjectKind::VertexArray),
            BindingSlot::Program => Some(ObjectKind::Program),
        }
    }

    /// The individual registers written by a bind to this slot.
    pub fn registers(&self) -> SmallVec<[BindingSlot; 2]> {
        match *self {
            BindingSlot::Framebuffer(FramebufferTarget::Framebuffer) => smallvec![
                BindingSlot::Framebuffer(FramebufferTarget::Draw),
                BindingSlot::Framebuffer(FramebufferTarget::Read)
            ],
            slot => smallvec![slot],
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Entry {
    Bound(NativeId),
    /// Changed behind our back, must be rebound.
    Unknown,
}

/// What this crate believes is bound to each slot.
///
/// Only binds issued through the cache are seen; state changed by other code desynchronizes it
/// until [`invalidate`](BindingCache::invalidate) or [`invalidate_all`](BindingCache::invalidate_all)
/// is called. A register that was never written is assumed to hold 0, the startup state.
#[derive(Debug)]
pub struct BindingCache {
    entries: HashMap<BindingSlot, Entry>,
    /// Entry assumed for registers not in `entries`.
    default_entry: Entry,
}

impl Default for BindingCache {
    fn default() -> Self {
        BindingCache::new()
    }
}

impl BindingCache {
    pub fn new() -> BindingCache {
        BindingCache {
            entries: HashMap::new(),
            default_entry: Entry::Bound(0),
        }
    }

    fn entry(&self, register: &BindingSlot) -> Entry {
        self.entries.get(register).copied().unwrap_or(self.default_entry)
    }

    /// Whether `id` is believed to be bound to `slot`.
    pub fn is_active(&self, slot: BindingSlot, id: NativeId) -> bool {
        slot.registers()
            .iter()
            .all(|r| self.entry(r) == Entry::Bound(id))
    }

    /// Last id recorded for `slot`, 0 if never bound or unknown.
    ///
    /// For the combined framebuffer target, this is the draw framebuffer.
    pub fn get_active(&self, slot: BindingSlot) -> NativeId {
        match self.entry(&slot.registers()[0]) {
            Entry::Bound(id) => id,
            Entry::Unknown => 0,
        }
    }

    /// Id bound to `slot`, `None` if any of its registers is unknown.
    ///
    /// For the combined framebuffer target, this is the draw framebuffer.
    pub fn known_binding(&self, slot: BindingSlot) -> Option<NativeId> {
        let registers = slot.registers();
        if registers.iter().any(|r| self.entry(r) == Entry::Unknown) {
            return None;
        }
        Some(self.get_active(slot))
    }

    /// Records `id` as bound to `slot`.
    pub fn set_active(&mut self, slot: BindingSlot, id: NativeId) {
        for r in slot.registers() {
            self.entries.insert(r, Entry::Bound(id));
        }
        if slot == BindingSlot::VertexArray {
            // the element array binding is part of the vertex array state
            self.invalidate(BindingSlot::Buffer(BufferTarget::ElementArray));
        }
    }

    /// Forgets what is bound to `slot`. The next bind to it will not be elided.
    pub fn invalidate(&mut self, slot: BindingSlot) {
        for r in slot.registers() {
            self.entries.insert(r, Entry::Unknown);
        }
    }

    /// Forgets everything.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
        self.default_entry = Entry::Unknown;
    }

    /// Resets registers holding a destroyed object back to 0.
    ///
    /// The driver unbinds objects when they are deleted, and may hand the same id out again.
    pub fn forget_object(&mut self, kind: ObjectKind, id: NativeId) {
        for (slot, entry) in self.entries.iter_mut() {
            if slot.object_kind() == Some(kind) && *entry == Entry::Bound(id) {
                *entry = Entry::Bound(0);
            }
        }
    }
}
