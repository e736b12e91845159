// SPDX-License-Identifier: MPL-2.0
//! Default manager instance for code that prefers free functions.
//!
//! Each UI thread gets its own [`NotificationManager`]. It starts without a
//! rendering host, so calls made before [`attach_host`] only hand out ids.
//! Callbacks (`on_close`, actions) run after the manager is released, so they
//! may call back into these functions.
//!
//! ```
//! use iced_toasts::notifications::global;
//!
//! let id = global::success("Image saved");
//! global::dismiss(id);
//! assert_eq!(global::count(None), 0);
//! ```

use super::host::{AnimationDriver, ViewRegistry};
use super::manager::{Message, NotificationManager};
use super::notification::{NotificationId, NotifyOptions};
use super::position::Position;
use std::cell::RefCell;

thread_local! {
    static DEFAULT: RefCell<NotificationManager> =
        RefCell::new(NotificationManager::new().deferring_callbacks());
}

/// Runs `f` against this thread's default manager, then any callbacks it produced.
///
/// # Panics
///
/// Panics if called from inside `f` itself.
pub fn with_default<R>(f: impl FnOnce(&mut NotificationManager) -> R) -> R {
    let (out, callbacks) = DEFAULT.with(|cell| {
        let mut manager = cell.borrow_mut();
        let out = f(&mut manager);
        (out, manager.take_pending_callbacks())
    });
    for pending in callbacks {
        pending.run();
    }
    out
}

pub fn attach_host(registry: impl ViewRegistry + 'static, animation: impl AnimationDriver + 'static) {
    with_default(|manager| manager.attach_host(registry, animation));
}

pub fn notify(options: impl Into<NotifyOptions>) -> NotificationId {
    with_default(|manager| manager.notify(options))
}

pub fn success(options: impl Into<NotifyOptions>) -> NotificationId {
    with_default(|manager| manager.success(options))
}

pub fn error(options: impl Into<NotifyOptions>) -> NotificationId {
    with_default(|manager| manager.error(options))
}

pub fn info(options: impl Into<NotifyOptions>) -> NotificationId {
    with_default(|manager| manager.info(options))
}

pub fn warning(options: impl Into<NotifyOptions>) -> NotificationId {
    with_default(|manager| manager.warning(options))
}

pub fn dismiss(id: NotificationId) {
    with_default(|manager| manager.dismiss(id));
}

pub fn dismiss_all(position: Option<Position>) {
    with_default(|manager| manager.dismiss_all(position));
}

pub fn count(position: Option<Position>) -> usize {
    with_default(|manager| manager.count(position))
}

pub fn configure(options: impl Into<NotifyOptions>) {
    with_default(|manager| manager.configure(options));
}

/// Forwards a host message (tick, hover, close, action) to the default manager.
pub fn update(message: Message) {
    with_default(|manager| manager.update(message));
}
