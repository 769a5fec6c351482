//! Object model for Trellis.
//!
//! Every widget participates in a global object tree managed by an
//! [`ObjectRegistry`]. The registry owns the structural data for each object
//! (name, parentage, widget state) while the objects themselves live wherever
//! the application puts them; they are linked to the registry through an
//! [`ObjectId`].
//!
//! # Lifecycle
//!
//! Applications call [`init_global_registry`] once at startup. Widgets embed
//! an [`ObjectBase`], which registers on construction and removes itself (and
//! its children, cascade) on drop.
//!
//! ```ignore
//! use trellis_core::{init_global_registry, Object, ObjectBase, ObjectId};
//!
//! init_global_registry();
//!
//! struct Button { base: ObjectBase }
//!
//! impl Object for Button {
//!     fn object_id(&self) -> ObjectId { self.base.id() }
//! }
//! ```

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::fmt::Write as FmtWrite;

use parking_lot::{Mutex, RwLock};
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Unique identifier for a registered object.
    pub struct ObjectId;
}

/// Errors from the object system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectError {
    /// The object ID does not refer to a live object.
    InvalidObjectId,
    /// Setting the parent would create a cycle in the object tree.
    CircularParentage,
    /// The global registry has not been initialized.
    RegistryNotInitialized,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectId => write!(f, "invalid object ID"),
            Self::CircularParentage => {
                write!(f, "setting this parent would create a cycle")
            }
            Self::RegistryNotInitialized => {
                write!(f, "global object registry not initialized")
            }
        }
    }
}

impl std::error::Error for ObjectError {}

/// Convenience alias for results with [`ObjectError`].
pub type ObjectResult<T> = Result<T, ObjectError>;

/// Per-object widget state tracked by the registry.
///
/// Visibility and enablement are stored here rather than on the widgets so
/// that effective-state queries can walk the tree without touching widget
/// instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetState {
    /// Whether the object's own visible flag is set.
    pub visible: bool,
    /// Whether the object's own enabled flag is set.
    pub enabled: bool,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            visible: true,
            enabled: true,
        }
    }
}

/// Structural data the registry keeps for each object.
#[derive(Debug)]
struct ObjectData {
    name: String,
    type_name: &'static str,
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
    widget_state: WidgetState,
}

/// The object registry: owns the parent/child tree.
///
/// Most code uses the process-wide [`SharedObjectRegistry`] via
/// [`global_registry`] rather than holding an `ObjectRegistry` directly.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectData>,
}

impl ObjectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new object of type `T` and return its ID.
    pub fn register<T: 'static>(&mut self) -> ObjectId {
        let type_name = std::any::type_name::<T>();
        let id = self.objects.insert(ObjectData {
            name: String::new(),
            type_name,
            parent: None,
            children: Vec::new(),
            widget_state: WidgetState::default(),
        });
        tracing::trace!(target: "trellis_core::object", ?id, type_name, "object registered");
        id
    }

    /// Check whether an ID refers to a live object.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Number of live objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Destroy an object and all of its descendants.
    ///
    /// Children are destroyed before their parent. Destroying an ID that is
    /// already gone is a no-op; drop ordering makes that a normal occurrence.
    pub fn destroy(&mut self, id: ObjectId) {
        let Some(data) = self.objects.get(id) else {
            return;
        };
        let children = data.children.clone();
        for child in children {
            self.destroy(child);
        }

        if let Some(data) = self.objects.remove(id) {
            tracing::trace!(
                target: "trellis_core::object",
                ?id,
                type_name = data.type_name,
                "object destroyed"
            );
            if let Some(parent) = data.parent {
                if let Some(parent_data) = self.objects.get_mut(parent) {
                    parent_data.children.retain(|&c| c != id);
                }
            }
        }
    }

    /// Get the object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<String> {
        self.objects
            .get(id)
            .map(|d| d.name.clone())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Set the object's name.
    pub fn set_object_name(&mut self, id: ObjectId, name: impl Into<String>) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        data.name = name.into();
        Ok(())
    }

    /// Get the object's Rust type name.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.objects
            .get(id)
            .map(|d| d.type_name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the object's parent, if any.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.objects
            .get(id)
            .map(|d| d.parent)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Reparent an object.
    ///
    /// Passing `None` detaches the object from its current parent. Fails with
    /// [`ObjectError::CircularParentage`] if `parent` is the object itself or
    /// one of its descendants.
    pub fn set_parent(&mut self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }
        if let Some(parent_id) = parent {
            if !self.objects.contains_key(parent_id) {
                return Err(ObjectError::InvalidObjectId);
            }
            if parent_id == id || self.is_ancestor_of(id, parent_id) {
                return Err(ObjectError::CircularParentage);
            }
        }

        let old_parent = self.objects[id].parent;
        if old_parent == parent {
            return Ok(());
        }

        if let Some(old) = old_parent {
            if let Some(old_data) = self.objects.get_mut(old) {
                old_data.children.retain(|&c| c != id);
            }
        }
        if let Some(new) = parent {
            self.objects[new].children.push(id);
        }
        self.objects[id].parent = parent;
        Ok(())
    }

    /// Check whether `ancestor` is an ancestor of `id` (or `id` itself).
    fn is_ancestor_of(&self, ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.objects.get(c).and_then(|d| d.parent);
        }
        false
    }

    /// Get the object's children in insertion order.
    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.objects
            .get(id)
            .map(|d| d.children.clone())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// All objects with no parent.
    pub fn root_objects(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, d)| d.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Breadth-first search of the subtree under `parent` for a child with
    /// the given name.
    pub fn find_child_by_name(&self, parent: ObjectId, name: &str) -> Option<ObjectId> {
        let mut queue: VecDeque<ObjectId> =
            self.objects.get(parent)?.children.iter().copied().collect();
        while let Some(id) = queue.pop_front() {
            let data = self.objects.get(id)?;
            if data.name == name {
                return Some(id);
            }
            queue.extend(data.children.iter().copied());
        }
        None
    }

    /// Get the widget state for an object.
    pub fn widget_state(&self, id: ObjectId) -> ObjectResult<WidgetState> {
        self.objects
            .get(id)
            .map(|d| d.widget_state)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Set the object's own visible flag.
    pub fn set_visible(&mut self, id: ObjectId, visible: bool) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        data.widget_state.visible = visible;
        Ok(())
    }

    /// Set the object's own enabled flag.
    pub fn set_enabled(&mut self, id: ObjectId, enabled: bool) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        data.widget_state.enabled = enabled;
        Ok(())
    }

    /// Whether the object and every ancestor are visible.
    pub fn is_effectively_visible(&self, id: ObjectId) -> ObjectResult<bool> {
        self.effective_flag(id, |s| s.visible)
    }

    /// Whether the object and every ancestor are enabled.
    pub fn is_effectively_enabled(&self, id: ObjectId) -> ObjectResult<bool> {
        self.effective_flag(id, |s| s.enabled)
    }

    fn effective_flag(
        &self,
        id: ObjectId,
        flag: impl Fn(&WidgetState) -> bool,
    ) -> ObjectResult<bool> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }
        let mut current = Some(id);
        while let Some(c) = current {
            let data = &self.objects[c];
            if !flag(&data.widget_state) {
                return Ok(false);
            }
            current = data.parent;
        }
        Ok(true)
    }

    /// Format the whole object tree for debugging.
    pub fn dump_object_tree(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Object tree ({} objects):", self.object_count());
        for root in self.root_objects() {
            self.dump_subtree(root, 0, &mut output);
        }
        output
    }

    fn dump_subtree(&self, id: ObjectId, depth: usize, output: &mut String) {
        let Some(data) = self.objects.get(id) else {
            return;
        };
        let name = if data.name.is_empty() {
            "(unnamed)"
        } else {
            &data.name
        };
        let short_type = data.type_name.rsplit("::").next().unwrap_or(data.type_name);
        let _ = writeln!(
            output,
            "{:indent$}{} [{:?}] ({})",
            "",
            name,
            id,
            short_type,
            indent = depth * 2
        );
        for &child in &data.children {
            self.dump_subtree(child, depth + 1, output);
        }
    }
}

/// Thread-safe wrapper around [`ObjectRegistry`].
#[derive(Debug, Default)]
pub struct SharedObjectRegistry {
    inner: RwLock<ObjectRegistry>,
}

impl SharedObjectRegistry {
    /// Create a new shared registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new object of type `T`.
    pub fn register<T: 'static>(&self) -> ObjectId {
        self.inner.write().register::<T>()
    }

    /// Check whether an ID refers to a live object.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    /// Number of live objects.
    pub fn object_count(&self) -> usize {
        self.inner.read().object_count()
    }

    /// Destroy an object and its descendants.
    pub fn destroy(&self, id: ObjectId) {
        self.inner.write().destroy(id);
    }

    /// Get an object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().object_name(id)
    }

    /// Set an object's name.
    pub fn set_object_name(&self, id: ObjectId, name: impl Into<String>) -> ObjectResult<()> {
        self.inner.write().set_object_name(id, name)
    }

    /// Get an object's type name.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.inner.read().type_name(id)
    }

    /// Get an object's parent.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().parent(id)
    }

    /// Reparent an object.
    pub fn set_parent(&self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.inner.write().set_parent(id, parent)
    }

    /// Get an object's children.
    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().children(id)
    }

    /// All objects with no parent.
    pub fn root_objects(&self) -> Vec<ObjectId> {
        self.inner.read().root_objects()
    }

    /// Search the subtree under `parent` for a child with the given name.
    pub fn find_child_by_name(&self, parent: ObjectId, name: &str) -> Option<ObjectId> {
        self.inner.read().find_child_by_name(parent, name)
    }

    /// Get an object's widget state.
    pub fn widget_state(&self, id: ObjectId) -> ObjectResult<WidgetState> {
        self.inner.read().widget_state(id)
    }

    /// Set an object's own visible flag.
    pub fn set_visible(&self, id: ObjectId, visible: bool) -> ObjectResult<()> {
        self.inner.write().set_visible(id, visible)
    }

    /// Set an object's own enabled flag.
    pub fn set_enabled(&self, id: ObjectId, enabled: bool) -> ObjectResult<()> {
        self.inner.write().set_enabled(id, enabled)
    }

    /// Whether the object and every ancestor are visible.
    pub fn is_effectively_visible(&self, id: ObjectId) -> ObjectResult<bool> {
        self.inner.read().is_effectively_visible(id)
    }

    /// Whether the object and every ancestor are enabled.
    pub fn is_effectively_enabled(&self, id: ObjectId) -> ObjectResult<bool> {
        self.inner.read().is_effectively_enabled(id)
    }

    /// Format the object tree for debugging.
    pub fn dump_object_tree(&self) -> String {
        self.inner.read().dump_object_tree()
    }

    /// Run a closure with read access to the underlying registry.
    pub fn with_read<R>(&self, f: impl FnOnce(&ObjectRegistry) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run a closure with write access to the underlying registry.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut ObjectRegistry) -> R) -> R {
        f(&mut self.inner.write())
    }
}

static GLOBAL_REGISTRY: Mutex<Option<SharedObjectRegistry>> = Mutex::new(None);

/// Initialize the global object registry.
///
/// Safe to call more than once; subsequent calls are no-ops, so tests can
/// call it unconditionally in their setup.
pub fn init_global_registry() {
    let mut guard = GLOBAL_REGISTRY.lock();
    if guard.is_none() {
        *guard = Some(SharedObjectRegistry::new());
        tracing::debug!(target: "trellis_core::object", "global object registry initialized");
    }
}

/// Get the global object registry.
///
/// Returns [`ObjectError::RegistryNotInitialized`] if
/// [`init_global_registry`] has not been called.
pub fn global_registry() -> ObjectResult<&'static SharedObjectRegistry> {
    let guard = GLOBAL_REGISTRY.lock();
    match guard.as_ref() {
        // The registry is set once and never removed or replaced, so the
        // reference stays valid for the rest of the program.
        Some(registry) => {
            let ptr = registry as *const SharedObjectRegistry;
            Ok(unsafe { &*ptr })
        }
        None => Err(ObjectError::RegistryNotInitialized),
    }
}

/// Base trait for all objects in the tree.
pub trait Object: Any + Send + Sync {
    /// The object's registry ID.
    fn object_id(&self) -> ObjectId;
}

/// Downcast a reference to a concrete object type.
pub fn object_cast<T: Object>(object: &dyn Any) -> Option<&T> {
    object.downcast_ref::<T>()
}

/// Downcast a mutable reference to a concrete object type.
pub fn object_cast_mut<T: Object>(object: &mut dyn Any) -> Option<&mut T> {
    object.downcast_mut::<T>()
}

/// Registry handle embedded in every object.
///
/// Registers the owning object on construction and destroys it (cascading to
/// children) on drop.
#[derive(Debug)]
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Register a new object of type `T`.
    ///
    /// # Panics
    ///
    /// Panics if the global registry is not initialized.
    pub fn new<T: Object + 'static>() -> Self {
        let registry = global_registry()
            .expect("global object registry not initialized; call init_global_registry() first");
        Self {
            id: registry.register::<T>(),
        }
    }

    /// The object's registry ID.
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Get the object's name.
    pub fn name(&self) -> String {
        global_registry()
            .and_then(|r| r.object_name(self.id))
            .unwrap_or_default()
    }

    /// Set the object's name.
    pub fn set_name(&self, name: impl Into<String>) {
        if let Ok(registry) = global_registry() {
            let _ = registry.set_object_name(self.id, name);
        }
    }

    /// Get the parent's object ID, if any.
    pub fn parent(&self) -> Option<ObjectId> {
        global_registry()
            .and_then(|r| r.parent(self.id))
            .ok()
            .flatten()
    }

    /// Reparent the object.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        global_registry()?.set_parent(self.id, parent)
    }

    /// Get the IDs of child objects.
    pub fn children(&self) -> Vec<ObjectId> {
        global_registry()
            .and_then(|r| r.children(self.id))
            .unwrap_or_default()
    }

    /// Search this object's subtree for a child with the given name.
    pub fn find_child_by_name(&self, name: &str) -> Option<ObjectId> {
        global_registry().ok()?.find_child_by_name(self.id, name)
    }
}

impl Drop for ObjectBase {
    fn drop(&mut self) {
        if let Ok(registry) = global_registry() {
            registry.destroy(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(SharedObjectRegistry: Send, Sync);
    assert_impl_all!(ObjectBase: Send, Sync);

    struct TestObject {
        base: ObjectBase,
    }

    impl TestObject {
        fn new(name: &str) -> Self {
            let object = Self {
                base: ObjectBase::new::<Self>(),
            };
            object.base.set_name(name);
            object
        }
    }

    impl Object for TestObject {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_register_and_name() {
        setup();
        let object = TestObject::new("alpha");
        let registry = global_registry().unwrap();
        assert!(registry.contains(object.object_id()));
        assert_eq!(registry.object_name(object.object_id()).unwrap(), "alpha");
    }

    #[test]
    fn test_parentage() {
        setup();
        let parent = TestObject::new("parent");
        let child = TestObject::new("child");

        child.base.set_parent(Some(parent.object_id())).unwrap();

        assert_eq!(child.base.parent(), Some(parent.object_id()));
        assert_eq!(parent.base.children(), vec![child.object_id()]);
    }

    #[test]
    fn test_reparent_moves_child() {
        setup();
        let first = TestObject::new("first");
        let second = TestObject::new("second");
        let child = TestObject::new("child");

        child.base.set_parent(Some(first.object_id())).unwrap();
        child.base.set_parent(Some(second.object_id())).unwrap();

        assert!(first.base.children().is_empty());
        assert_eq!(second.base.children(), vec![child.object_id()]);
    }

    #[test]
    fn test_circular_parentage_rejected() {
        setup();
        let grandparent = TestObject::new("grandparent");
        let parent = TestObject::new("parent");
        let child = TestObject::new("child");

        parent.base.set_parent(Some(grandparent.object_id())).unwrap();
        child.base.set_parent(Some(parent.object_id())).unwrap();

        let result = global_registry()
            .unwrap()
            .set_parent(grandparent.object_id(), Some(child.object_id()));
        assert_eq!(result, Err(ObjectError::CircularParentage));

        let result = global_registry()
            .unwrap()
            .set_parent(parent.object_id(), Some(parent.object_id()));
        assert_eq!(result, Err(ObjectError::CircularParentage));
    }

    #[test]
    fn test_destroy_cascades_to_children() {
        setup();
        let registry = global_registry().unwrap();

        let parent = TestObject::new("parent");
        let child = TestObject::new("child");
        let child_id = child.object_id();
        child.base.set_parent(Some(parent.object_id())).unwrap();

        registry.destroy(parent.object_id());
        assert!(!registry.contains(child_id));
        // The wrappers still drop afterwards; destroying a gone ID is a no-op.
    }

    #[test]
    fn test_find_child_by_name() {
        setup();
        let root = TestObject::new("root");
        let middle = TestObject::new("middle");
        let leaf = TestObject::new("leaf");

        middle.base.set_parent(Some(root.object_id())).unwrap();
        leaf.base.set_parent(Some(middle.object_id())).unwrap();

        assert_eq!(
            root.base.find_child_by_name("leaf"),
            Some(leaf.object_id())
        );
        assert_eq!(root.base.find_child_by_name("missing"), None);
    }

    #[test]
    fn test_effective_visibility_walks_ancestors() {
        setup();
        let registry = global_registry().unwrap();
        let parent = TestObject::new("parent");
        let child = TestObject::new("child");
        child.base.set_parent(Some(parent.object_id())).unwrap();

        assert!(registry.is_effectively_visible(child.object_id()).unwrap());

        registry.set_visible(parent.object_id(), false).unwrap();
        assert!(!registry.is_effectively_visible(child.object_id()).unwrap());
        // The child's own flag is untouched.
        assert!(registry.widget_state(child.object_id()).unwrap().visible);
    }

    #[test]
    fn test_effective_enabled_walks_ancestors() {
        setup();
        let registry = global_registry().unwrap();
        let parent = TestObject::new("parent");
        let child = TestObject::new("child");
        child.base.set_parent(Some(parent.object_id())).unwrap();

        registry.set_enabled(parent.object_id(), false).unwrap();
        assert!(!registry.is_effectively_enabled(child.object_id()).unwrap());

        registry.set_enabled(parent.object_id(), true).unwrap();
        registry.set_enabled(child.object_id(), false).unwrap();
        assert!(!registry.is_effectively_enabled(child.object_id()).unwrap());
    }

    #[test]
    fn test_dump_object_tree() {
        setup();
        let root = TestObject::new("tree-root");
        let child = TestObject::new("tree-child");
        child.base.set_parent(Some(root.object_id())).unwrap();

        let dump = global_registry().unwrap().dump_object_tree();
        assert!(dump.contains("tree-root"));
        assert!(dump.contains("tree-child"));
        assert!(dump.contains("TestObject"));
    }

    #[test]
    fn test_object_cast() {
        setup();
        let object = TestObject::new("cast");
        let any: &dyn Any = &object;
        assert!(object_cast::<TestObject>(any).is_some());
    }

    #[test]
    fn test_invalid_id_errors() {
        setup();
        let registry = global_registry().unwrap();
        let id = {
            let object = TestObject::new("short-lived");
            object.object_id()
        };
        assert_eq!(registry.object_name(id), Err(ObjectError::InvalidObjectId));
        assert_eq!(registry.parent(id), Err(ObjectError::InvalidObjectId));
        assert_eq!(
            registry.set_parent(id, None),
            Err(ObjectError::InvalidObjectId)
        );
    }
}
