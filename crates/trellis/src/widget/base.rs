//! Widget base implementation.
//!
//! `WidgetBase` carries the state every widget shares: object system
//! membership, geometry, visibility, enablement, focus, hover and press
//! state, and the repaint flag. Widget implementations embed it as a field
//! and delegate to it.

use trellis_core::{Object, ObjectBase, ObjectId, ObjectResult, Signal, global_registry};

use super::geometry::{SizePolicy, SizePolicyPair};
use crate::paint::{Point, Rect, Size};

/// The base implementation for all widgets.
pub struct WidgetBase {
    object_base: ObjectBase,

    /// Position relative to parent and size.
    geometry: Rect,

    size_policy: SizePolicyPair,
    visible: bool,
    enabled: bool,
    focusable: bool,
    focused: bool,
    hovered: bool,
    pressed: bool,
    needs_repaint: bool,

    /// Emitted when the geometry changes.
    pub geometry_changed: Signal<Rect>,
    /// Emitted when visibility changes.
    pub visible_changed: Signal<bool>,
    /// Emitted when enabled state changes.
    pub enabled_changed: Signal<bool>,
}

impl WidgetBase {
    /// Create a new widget base registered as type `T`.
    ///
    /// # Panics
    ///
    /// Panics if the global object registry is not initialized.
    pub fn new<T: Object + 'static>() -> Self {
        Self {
            object_base: ObjectBase::new::<T>(),
            geometry: Rect::ZERO,
            size_policy: SizePolicyPair::default(),
            visible: true,
            enabled: true,
            focusable: false,
            focused: false,
            hovered: false,
            pressed: false,
            needs_repaint: true,
            geometry_changed: Signal::new(),
            visible_changed: Signal::new(),
            enabled_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Object System Delegation
    // =========================================================================

    /// The widget's unique object ID.
    #[inline]
    pub fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }

    /// Get the widget's name.
    pub fn name(&self) -> String {
        self.object_base.name()
    }

    /// Set the widget's name.
    pub fn set_name(&self, name: impl Into<String>) {
        self.object_base.set_name(name);
    }

    /// The parent widget's object ID, if any.
    pub fn parent_id(&self) -> Option<ObjectId> {
        self.object_base.parent()
    }

    /// Set the parent widget.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.object_base.set_parent(parent)
    }

    /// IDs of child widgets.
    pub fn children_ids(&self) -> Vec<ObjectId> {
        self.object_base.children()
    }

    /// Find a child by name.
    pub fn find_child_by_name(&self, name: &str) -> Option<ObjectId> {
        self.object_base.find_child_by_name(name)
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// The widget's geometry (position relative to parent, and size).
    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the geometry, emitting `geometry_changed` if it changed.
    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry != rect {
            self.geometry = rect;
            self.needs_repaint = true;
            self.geometry_changed.emit(rect);
        }
    }

    /// Position relative to the parent.
    #[inline]
    pub fn pos(&self) -> Point {
        self.geometry.origin
    }

    /// The widget's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.geometry.size
    }

    /// Resize the widget.
    pub fn resize(&mut self, width: f32, height: f32) {
        let size = Size::new(width, height);
        if self.geometry.size != size {
            let new_geometry = Rect {
                origin: self.geometry.origin,
                size,
            };
            self.geometry = new_geometry;
            self.needs_repaint = true;
            self.geometry_changed.emit(new_geometry);
        }
    }

    /// Move the widget to a position in parent coordinates.
    pub fn move_to(&mut self, x: f32, y: f32) {
        let pos = Point::new(x, y);
        if self.geometry.origin != pos {
            let new_geometry = Rect {
                origin: pos,
                size: self.geometry.size,
            };
            self.geometry = new_geometry;
            self.geometry_changed.emit(new_geometry);
        }
    }

    /// The widget's local coordinate space: (0, 0) with the widget's size.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.geometry.size.width, self.geometry.size.height)
    }

    // =========================================================================
    // Size Policy
    // =========================================================================

    /// The widget's size policy.
    #[inline]
    pub fn size_policy(&self) -> SizePolicyPair {
        self.size_policy
    }

    /// Set the widget's size policy.
    pub fn set_size_policy(&mut self, policy: SizePolicyPair) {
        self.size_policy = policy;
    }

    /// Set the horizontal size policy.
    pub fn set_horizontal_policy(&mut self, policy: SizePolicy) {
        self.size_policy.horizontal = policy;
    }

    /// Set the vertical size policy.
    pub fn set_vertical_policy(&mut self, policy: SizePolicy) {
        self.size_policy.vertical = policy;
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Whether the widget's own visible flag is set.
    ///
    /// The widget may still be off screen if an ancestor is hidden; see
    /// [`is_effectively_visible`](Self::is_effectively_visible).
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set visibility, emitting `visible_changed` if it changed.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.needs_repaint = true;
            if let Ok(registry) = global_registry() {
                let _ = registry.set_visible(self.object_id(), visible);
            }
            self.visible_changed.emit(visible);
        }
    }

    /// Whether this widget and every ancestor are visible.
    pub fn is_effectively_visible(&self) -> bool {
        global_registry()
            .and_then(|r| r.is_effectively_visible(self.object_id()))
            .unwrap_or(self.visible)
    }

    // =========================================================================
    // Enabled State
    // =========================================================================

    /// Whether the widget's own enabled flag is set.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set enablement, emitting `enabled_changed` if it changed.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.needs_repaint = true;
            if let Ok(registry) = global_registry() {
                let _ = registry.set_enabled(self.object_id(), enabled);
            }
            self.enabled_changed.emit(enabled);
        }
    }

    /// Whether this widget and every ancestor are enabled.
    pub fn is_effectively_enabled(&self) -> bool {
        global_registry()
            .and_then(|r| r.is_effectively_enabled(self.object_id()))
            .unwrap_or(self.enabled)
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Whether the widget can receive keyboard focus right now.
    #[inline]
    pub fn is_focusable(&self) -> bool {
        self.focusable && self.enabled && self.visible
    }

    /// Set whether the widget can receive keyboard focus.
    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
    }

    /// Whether the widget currently has keyboard focus.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Set the focused state (driven by focus-in/out events).
    pub(crate) fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.needs_repaint = true;
        }
    }

    // =========================================================================
    // Hover and Press State
    // =========================================================================

    /// Whether the mouse is currently over this widget.
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Set the hover state (driven by enter/leave events).
    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        if self.hovered != hovered {
            self.hovered = hovered;
            self.needs_repaint = true;
        }
    }

    /// Whether a mouse button is held on this widget.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Set the pressed state (driven by mouse press/release events).
    pub(crate) fn set_pressed(&mut self, pressed: bool) {
        if self.pressed != pressed {
            self.pressed = pressed;
            self.needs_repaint = true;
        }
    }

    // =========================================================================
    // Repaint
    // =========================================================================

    /// Whether the widget needs to be repainted.
    #[inline]
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Request a repaint.
    pub fn update(&mut self) {
        self.needs_repaint = true;
    }

    /// Clear the repaint flag (called after painting).
    pub(crate) fn clear_repaint_flag(&mut self) {
        self.needs_repaint = false;
    }

    // =========================================================================
    // Coordinate Mapping
    // =========================================================================

    /// Map a point from widget-local to parent coordinates.
    #[inline]
    pub fn map_to_parent(&self, point: Point) -> Point {
        Point::new(
            point.x + self.geometry.origin.x,
            point.y + self.geometry.origin.y,
        )
    }

    /// Map a point from parent to widget-local coordinates.
    #[inline]
    pub fn map_from_parent(&self, point: Point) -> Point {
        Point::new(
            point.x - self.geometry.origin.x,
            point.y - self.geometry.origin.y,
        )
    }

    /// Whether a point in local coordinates is inside the widget.
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        self.rect().contains(point)
    }
}

impl Object for WidgetBase {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }
}
