//! Document-level pointer stream
//!
//! Hosts forward every pointer-down to a [`PointerHub`]. Components that need
//! outside-click detection register a listener when they mount and keep the
//! returned [`ListenerGuard`]; dropping the guard (normal unmount, early
//! return or unwinding) removes the registration, so a dead component never
//! sees another event.
//!
//! Everything here runs on the UI thread. The hub is `!Send` on purpose.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Pointer position in host coordinates (egui points or terminal cells)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, right/bottom edges exclusive
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }
}

/// Receives pointer-down events for as long as it is registered
pub trait PointerListener {
    /// Returns true when the event dismissed something
    fn pointer_down(&self, point: Point) -> bool;
}

/// Registration handle id, unique per hub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ListenerId(u64);

#[derive(Default)]
struct HubState {
    next_id: u64,
    listeners: Vec<(ListenerId, Rc<dyn PointerListener>)>,
}

/// Clonable handle to the pointer stream; clones share registrations
#[derive(Clone, Default)]
pub struct PointerHub {
    state: Rc<RefCell<HubState>>,
}

impl fmt::Debug for PointerHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `listener` until the returned guard is dropped
    pub fn register(&self, listener: Rc<dyn PointerListener>) -> ListenerGuard {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        state.listeners.push((id, listener));
        tracing::trace!(listener = id.0, total = state.listeners.len(), "pointer listener registered");

        ListenerGuard {
            id,
            hub: Rc::downgrade(&self.state),
        }
    }

    /// Deliver a pointer-down to every registered listener, in registration
    /// order. Returns how many listeners reported a dismissal.
    pub fn pointer_down(&self, point: Point) -> usize {
        // Snapshot so listeners may mount/unmount while we deliver
        let snapshot: Vec<(ListenerId, Rc<dyn PointerListener>)> = self
            .state
            .borrow()
            .listeners
            .iter()
            .map(|(id, l)| (*id, Rc::clone(l)))
            .collect();

        let mut dismissed = 0;
        for (id, listener) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            if listener.pointer_down(point) {
                dismissed += 1;
            }
        }
        dismissed
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.state.borrow().listeners.iter().any(|(l, _)| *l == id)
    }
}

/// Keeps a listener registered; deregisters on drop
#[derive(Debug)]
pub struct ListenerGuard {
    id: ListenerId,
    hub: Weak<RefCell<HubState>>,
}

impl ListenerGuard {
    pub(crate) fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        // Hub already gone: nothing left to deregister from
        let Some(state) = self.hub.upgrade() else {
            return;
        };
        let mut state = state.borrow_mut();
        state.listeners.retain(|(id, _)| *id != self.id);
        tracing::trace!(listener = self.id.0, total = state.listeners.len(), "pointer listener released");
    }
}
