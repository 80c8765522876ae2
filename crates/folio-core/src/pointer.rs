//! Process-wide pointer position, published once and read by many widgets.
//!
//! A single host listener calls [`PointerHub::publish`]. Widgets hold a
//! [`PointerSubscription`] for the duration of their mount; dropping it
//! unsubscribes. Subscriptions can only read.

use crate::id::WidgetId;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Pointer position normalized to the viewport: `(-1, -1)` is the top-left
/// corner, `(1, 1)` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    /// Normalize client coordinates against a viewport size.
    pub fn from_client(client_x: f64, client_y: f64, view_w: f64, view_h: f64) -> Option<Self> {
        if view_w <= 0.0 || view_h <= 0.0 {
            return None;
        }
        Some(Self {
            x: (client_x / view_w * 2.0 - 1.0).clamp(-1.0, 1.0),
            y: (client_y / view_h * 2.0 - 1.0).clamp(-1.0, 1.0),
        })
    }
}

#[derive(Default)]
struct HubInner {
    latest: Cell<Option<PointerPosition>>,
    subscribers: RefCell<Vec<WidgetId>>,
}

/// Shared pointer observable. Cloning yields another handle to the same hub.
#[derive(Clone, Default)]
pub struct PointerHub {
    inner: Rc<HubInner>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new position. Only the host's global listener should call this.
    pub fn publish(&self, position: PointerPosition) {
        self.inner.latest.set(Some(position));
    }

    /// Forget the position (pointer left the window).
    pub fn clear(&self) {
        self.inner.latest.set(None);
    }

    pub fn latest(&self) -> Option<PointerPosition> {
        self.inner.latest.get()
    }

    /// Register a widget as a reader for as long as the subscription lives.
    pub fn subscribe(&self, owner: WidgetId) -> PointerSubscription {
        self.inner.subscribers.borrow_mut().push(owner);
        log::debug!("{owner} subscribed to pointer hub");
        PointerSubscription {
            hub: Rc::clone(&self.inner),
            owner,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    pub fn is_subscribed(&self, owner: WidgetId) -> bool {
        self.inner.subscribers.borrow().contains(&owner)
    }
}

/// Read-only handle to the hub, released on drop.
pub struct PointerSubscription {
    hub: Rc<HubInner>,
    owner: WidgetId,
}

impl PointerSubscription {
    pub fn latest(&self) -> Option<PointerPosition> {
        self.hub.latest.get()
    }

    pub fn owner(&self) -> WidgetId {
        self.owner
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        let mut subs = self.hub.subscribers.borrow_mut();
        if let Some(pos) = subs.iter().position(|id| *id == self.owner) {
            subs.swap_remove(pos);
        }
        log::debug!("{} unsubscribed from pointer hub", self.owner);
    }
}

impl std::fmt::Debug for PointerSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerSubscription")
            .field("owner", &self.owner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_published_position() {
        let hub = PointerHub::new();
        let a = hub.subscribe(WidgetId::intern("gaze_a"));
        let b = hub.subscribe(WidgetId::intern("gaze_b"));
        assert_eq!(a.latest(), None);

        hub.publish(PointerPosition { x: 0.5, y: -0.25 });
        assert_eq!(a.latest(), Some(PointerPosition { x: 0.5, y: -0.25 }));
        assert_eq!(b.latest(), a.latest());
    }

    #[test]
    fn drop_unsubscribes() {
        let hub = PointerHub::new();
        let id = WidgetId::intern("gaze_drop");
        let sub = hub.subscribe(id);
        assert_eq!(hub.subscriber_count(), 1);
        assert!(hub.is_subscribed(id));
        drop(sub);
        assert_eq!(hub.subscriber_count(), 0);
        assert!(!hub.is_subscribed(id));
    }

    #[test]
    fn clones_share_state() {
        let hub = PointerHub::new();
        let other = hub.clone();
        let _sub = other.subscribe(WidgetId::intern("gaze_clone"));
        hub.publish(PointerPosition::default());
        assert_eq!(other.latest(), Some(PointerPosition::default()));
        assert_eq!(hub.subscriber_count(), 1);
    }

    #[test]
    fn client_coordinates_normalize() {
        let p = PointerPosition::from_client(0.0, 600.0, 800.0, 600.0).unwrap();
        assert_eq!(p, PointerPosition { x: -1.0, y: 1.0 });
        let c = PointerPosition::from_client(400.0, 300.0, 800.0, 600.0).unwrap();
        assert_eq!(c, PointerPosition { x: 0.0, y: 0.0 });
        assert!(PointerPosition::from_client(1.0, 1.0, 0.0, 600.0).is_none());
    }
}
