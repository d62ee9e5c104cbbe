#![forbid(unsafe_code)]

//! Widget sync contract: imperative handles and the controller-owned
//! registry.
//!
//! Rendering is somebody else's job; what the controller needs from a
//! widget is tiny: read its visual active state, push a corrected state
//! during drift reconciliation, and (for text editors) trigger focus.
//! Widgets register a [`WidgetHandle`] under their field identity when
//! they mount and remove it when they unmount.
//!
//! # Invariants
//!
//! 1. At most one handle per [`HandleKey`]; mounting replaces.
//! 2. `set_active` bypasses the widget's own interaction path — it is used
//!    only by the reconcile walker and the single-select exclusivity rule,
//!    never by the widget itself.
//! 3. Operations on unregistered keys are no-ops that report their miss.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use formwork_core::{Scalar, SelectKind};

use crate::controller::FormController;

bitflags! {
    /// Capabilities a mounted widget handle advertises.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HandleCaps: u8 {
        /// Refuses user-initiated deactivation (radio-style toggles).
        const NO_TOGGLE = 0b01;
        /// Accepts the focus trigger (text editors).
        const FOCUS     = 0b10;
    }
}

impl Default for HandleCaps {
    fn default() -> Self {
        Self::empty()
    }
}

/// The imperative interface a widget registers with the controller.
///
/// Every method has a neutral default so a handle only overrides what
/// applies to it: toggles implement the active pair, text editors
/// implement `focus`.
pub trait WidgetHandle {
    /// Capabilities this handle advertises.
    fn caps(&self) -> HandleCaps {
        HandleCaps::empty()
    }

    /// Current visual active state. Non-toggle handles report inactive.
    fn is_active(&self) -> bool {
        false
    }

    /// Imperatively push the visual active state (drift correction).
    fn set_active(&mut self, active: bool) {
        let _ = active;
    }

    /// Move input focus to this widget.
    fn focus(&mut self) {}
}

/// Identity a handle is registered under: the field name for text
/// editors, name plus candidate value for toggles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HandleKey {
    /// A text editor, one per field name.
    Text(String),
    /// A toggle, one per candidate value of a selection group.
    Toggle(String, Scalar),
}

impl HandleKey {
    /// Key for a text editor.
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::Text(name.into())
    }

    /// Key for a toggle leaf.
    #[must_use]
    pub fn toggle(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::Toggle(name.into(), value.into())
    }
}

/// Controller-owned registry of mounted widget handles.
pub struct HandleRegistry {
    handles: HashMap<HandleKey, Box<dyn WidgetHandle>, ahash::RandomState>,
}

impl fmt::Debug for HandleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleRegistry")
            .field("mounted", &self.handles.len())
            .finish()
    }
}

impl Default for HandleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handles: HashMap::default(),
        }
    }

    /// Register a handle, replacing any previous handle under the key.
    pub fn mount(&mut self, key: HandleKey, handle: Box<dyn WidgetHandle>) {
        self.handles.insert(key, handle);
    }

    /// Remove a handle.
    pub fn unmount(&mut self, key: &HandleKey) -> Option<Box<dyn WidgetHandle>> {
        self.handles.remove(key)
    }

    /// Whether a handle is mounted under the key.
    #[must_use]
    pub fn contains(&self, key: &HandleKey) -> bool {
        self.handles.contains_key(key)
    }

    /// Number of mounted handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Ask a mounted handle for its active state.
    #[must_use]
    pub fn is_active(&self, key: &HandleKey) -> Option<bool> {
        self.handles.get(key).map(|h| h.is_active())
    }

    /// Ask a mounted handle for its capabilities.
    #[must_use]
    pub fn caps(&self, key: &HandleKey) -> Option<HandleCaps> {
        self.handles.get(key).map(|h| h.caps())
    }

    /// Push a corrected active state. Returns whether a handle was there
    /// to receive it.
    pub fn set_active(&mut self, key: &HandleKey, active: bool) -> bool {
        match self.handles.get_mut(key) {
            Some(handle) => {
                handle.set_active(active);
                true
            }
            None => false,
        }
    }

    /// Push a corrected active state only when the mounted handle
    /// disagrees with it; an already-consistent widget receives no call.
    pub fn sync_active(&mut self, key: &HandleKey, active: bool) -> bool {
        match self.handles.get_mut(key) {
            Some(handle) if handle.is_active() != active => {
                handle.set_active(active);
                true
            }
            _ => false,
        }
    }

    /// Trigger focus on the text handle mounted for `name`.
    pub fn focus(&mut self, name: &str) -> bool {
        let key = HandleKey::Text(name.to_string());
        match self.handles.get_mut(&key) {
            Some(handle) => {
                handle.focus();
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Default)]
struct ToggleState {
    active: bool,
    /// Imperative corrections received, for hosts observing drift.
    sync_pushes: usize,
}

/// Reference toggle handle backed by shared interior state.
///
/// Clones share one state cell, so the copy mounted in the registry and
/// the copy the host keeps always agree. `press` is the full interaction
/// flow: refuse deactivation when no-toggle, route the request through
/// the controller's update protocol, adopt the applied state the
/// controller returns.
///
/// Single-threaded by design, like the controller itself.
#[derive(Debug, Clone)]
pub struct SharedToggle {
    name: String,
    value: Scalar,
    kind: SelectKind,
    multiselect: bool,
    no_toggle: bool,
    state: Rc<RefCell<ToggleState>>,
}

impl SharedToggle {
    /// A checkbox-style toggle.
    #[must_use]
    pub fn checkbox(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: SelectKind::Checkbox,
            multiselect: false,
            no_toggle: false,
            state: Rc::default(),
        }
    }

    /// A radio-style toggle: exclusive, refuses user deactivation.
    #[must_use]
    pub fn radio(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: SelectKind::Radio,
            multiselect: false,
            no_toggle: true,
            state: Rc::default(),
        }
    }

    /// Make the toggle part of a multi-select group (builder).
    #[must_use]
    pub fn with_multiselect(mut self, multiselect: bool) -> Self {
        self.multiselect = multiselect;
        self
    }

    /// Seed the visual active state from the declaration (builder).
    #[must_use]
    pub fn with_active(self, active: bool) -> Self {
        self.state.borrow_mut().active = active;
        self
    }

    /// The registry key this toggle mounts under.
    #[must_use]
    pub fn key(&self) -> HandleKey {
        HandleKey::Toggle(self.name.clone(), self.value.clone())
    }

    /// Mount a sharing clone of this toggle into the controller.
    pub fn mount(&self, form: &mut FormController) {
        form.mount_handle(self.key(), Box::new(self.clone()));
    }

    /// Current visual active state.
    #[must_use]
    pub fn active(&self) -> bool {
        self.state.borrow().active
    }

    /// Imperative corrections received so far.
    #[must_use]
    pub fn sync_pushes(&self) -> usize {
        self.state.borrow().sync_pushes
    }

    /// User interaction: request the opposite state through the update
    /// protocol and adopt whatever the controller applied.
    pub fn press(&self, form: &mut FormController) -> bool {
        if self.no_toggle && self.active() {
            return true;
        }

        let requested = !self.active();
        let applied = if self.multiselect {
            form.multi_select(&self.name, self.value.clone(), requested)
        } else {
            form.single_select(&self.name, self.value.clone(), requested, self.kind)
        };

        self.state.borrow_mut().active = applied;
        applied
    }
}

impl WidgetHandle for SharedToggle {
    fn caps(&self) -> HandleCaps {
        if self.no_toggle {
            HandleCaps::NO_TOGGLE
        } else {
            HandleCaps::empty()
        }
    }

    fn is_active(&self) -> bool {
        self.state.borrow().active
    }

    fn set_active(&mut self, active: bool) {
        let mut state = self.state.borrow_mut();
        state.active = active;
        state.sync_pushes += 1;
    }
}
