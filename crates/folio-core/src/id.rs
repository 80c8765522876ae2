//! Widget instance identifiers.

use crate::widgets::WidgetKind;
use lasso::{Spur, ThreadedRodeo};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU32, Ordering};

static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Next instance number per widget kind, indexed by `WidgetKind as usize`.
static INSTANCES: [AtomicU32; WidgetKind::ALL.len()] =
    [const { AtomicU32::new(1) }; WidgetKind::ALL.len()];

/// Names one mounted widget in log lines, pointer subscriptions and
/// snapshots. Browser widgets are named after their canvas element id;
/// headless ones are numbered per kind (`pong_1`, `pong_2`, `orbit_1`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(Spur);

impl WidgetId {
    pub fn intern(name: &str) -> Self {
        WidgetId(INTERNER.get_or_intern(name))
    }

    /// A fresh `<kind>_<n>` id, numbered from 1 for each kind.
    pub fn next(kind: WidgetKind) -> Self {
        let n = INSTANCES[kind as usize].fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{kind}_{n}"))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WidgetId").field(&self.as_str()).finish()
    }
}

/// `#name`, matching how the page refers to the canvas.
impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl Serialize for WidgetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
