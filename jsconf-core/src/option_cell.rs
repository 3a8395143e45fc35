// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use arc_swap::ArcSwapOption;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

static NEXT_CELL_ID: AtomicUsize = AtomicUsize::new(0);

struct ThreadSlot {
    // Epoch of the owning cell at the time of the write. A slot written
    // before the last `reset` is stale and ignored.
    epoch: u64,
    // Dead once the owning cell is dropped; pruned on the next write.
    owner: Weak<()>,
    value: Box<dyn Any>,
}

thread_local! {
    static THREAD_TIER: RefCell<HashMap<usize, ThreadSlot>> = RefCell::new(HashMap::new());
}

/// A single tunable value with layered resolution.
///
/// `get` returns the calling thread's override, else the shared global
/// value, else the default the cell was created with. The first `set` on any
/// thread also becomes the global value that all other threads fall back to
/// until [`OptionCell::reset`].
///
/// ```rust
/// use jsconf_core::option_cell::OptionCell;
///
/// let cell = OptionCell::new("emit_camel_case_names", false);
/// assert!(!cell.get());
/// cell.set(true);
/// assert!(cell.get());
/// assert_eq!(cell.global(), Some(true));
///
/// std::thread::scope(|s| {
///     s.spawn(|| {
///         // The first write is sticky: other threads default to it.
///         assert!(cell.get());
///         cell.set(false);
///         assert!(!cell.get());
///     });
/// });
/// assert!(cell.get());
/// assert_eq!(cell.global(), Some(true));
///
/// cell.reset();
/// assert!(!cell.get());
/// ```
pub struct OptionCell<V> {
    id: usize,
    name: &'static str,
    epoch: AtomicU64,
    alive: Arc<()>,
    global: ArcSwapOption<V>,
    default: V,
}

impl<V: Clone + Send + Sync + 'static> OptionCell<V> {
    pub fn new(name: &'static str, default: V) -> Self {
        OptionCell {
            id: NEXT_CELL_ID.fetch_add(1, Ordering::Relaxed),
            name,
            epoch: AtomicU64::new(0),
            alive: Arc::new(()),
            global: ArcSwapOption::empty(),
            default,
        }
    }

    /// Resolves the value for the calling thread. Never fails.
    #[inline]
    pub fn get(&self) -> V {
        if let Some(value) = self.thread_value() {
            return value;
        }
        self.global().unwrap_or_else(|| self.default.clone())
    }

    /// Overrides the value for the calling thread and, if no global value has
    /// been established yet, makes `value` the global value.
    ///
    /// When two threads race to be first, exactly one of the two values wins
    /// the compare-and-swap.
    pub fn set(&self, value: V) {
        let epoch = self.epoch.load(Ordering::Acquire);
        let slot = ThreadSlot {
            epoch,
            owner: Arc::downgrade(&self.alive),
            value: Box::new(value.clone()),
        };
        let _ = THREAD_TIER.try_with(|tier| {
            let mut tier = tier.borrow_mut();
            tier.retain(|_, slot| slot.owner.strong_count() > 0);
            tier.insert(self.id, slot);
        });
        let fresh = Some(Arc::new(value));
        let previous = self.global.compare_and_swap(&None::<Arc<V>>, fresh);
        if previous.is_none() {
            log::debug!("option `{}` global value established", self.name);
        }
    }

    /// Clears the global value and every thread's override.
    ///
    /// Must not race with serialization in progress; callers own that.
    pub fn reset(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.global.store(None);
        self.clear_thread_value();
    }

    /// Drops the calling thread's override, leaving the global value alone.
    pub fn clear_thread_value(&self) {
        let _ = THREAD_TIER.try_with(|tier| {
            tier.borrow_mut().remove(&self.id);
        });
    }

    /// The calling thread's override, if it has one since the last reset.
    pub fn thread_value(&self) -> Option<V> {
        let epoch = self.epoch.load(Ordering::Acquire);
        THREAD_TIER
            .try_with(|tier| {
                tier.borrow()
                    .get(&self.id)
                    .filter(|slot| slot.epoch == epoch)
                    .and_then(|slot| slot.value.downcast_ref::<V>())
                    .cloned()
            })
            .ok()
            .flatten()
    }

    /// The sticky global value, if one has been established.
    pub fn global(&self) -> Option<V> {
        let guard = self.global.load();
        match &*guard {
            Some(value) => Some((**value).clone()),
            None => None,
        }
    }

    #[inline(always)]
    pub fn default_value(&self) -> &V {
        &self.default
    }

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

// Slots other threads hold for this cell become dead here and are dropped
// the next time those threads write any cell, or when they exit.
impl<V> Drop for OptionCell<V> {
    fn drop(&mut self) {
        let id = self.id;
        let _ = THREAD_TIER.try_with(|tier| {
            tier.borrow_mut().remove(&id);
        });
    }
}

impl<V: Clone + fmt::Debug + Send + Sync + 'static> fmt::Debug for OptionCell<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionCell")
            .field("name", &self.name)
            .field("thread", &self.thread_value())
            .field("global", &self.global())
            .field("default", &self.default)
            .finish()
    }
}
