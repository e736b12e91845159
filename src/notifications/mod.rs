// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! This module provides an imperative notification manager following
//! toast/snackbar UX patterns. Notifications are created from anywhere with
//! a single call, stacked in one of six screen-anchored containers, and
//! dismissed automatically, explicitly or by capacity eviction.
//!
//! # Components
//!
//! - [`notification`] - Ids, severity levels and configuration types
//! - [`position`] - The six screen anchors
//! - [`container`] - Position containers and their slot sequences
//! - [`lifecycle`] - Per-notification state machine and countdown
//! - [`capacity`] - Max-count eviction
//! - [`queue`] - Admission queue spacing out bursts
//! - [`manager`] - [`NotificationManager`], the public API
//! - [`host`] - Capabilities supplied by the rendering host
//! - [`global`] - Per-thread default manager and free functions
//!
//! # Usage
//!
//! ```ignore
//! use iced_toasts::notifications::{NotificationManager, NotifyOptions, Position};
//! use iced_toasts::ui::ToastLayer;
//!
//! let layer = ToastLayer::new();
//! let mut manager = NotificationManager::new().with_host(layer.clone(), layer.clone());
//!
//! manager.success("Image saved successfully");
//! manager.notify(NotifyOptions::text("Uploading").position(Position::BottomLeft).persistent(true));
//!
//! // In your view function, render the toast layer
//! let overlay = layer.view().map(Message::Notification);
//! ```
//!
//! # Design Considerations
//!
//! - Single-threaded: state is only touched from the UI thread, one call at a time
//! - Time advances through `tick`, driven by the host's subscription
//! - Nothing in the public API returns an error; failures are logged

mod capacity;
mod container;
pub mod global;
mod host;
mod lifecycle;
mod manager;
mod notification;
mod position;
mod queue;
mod timer;

pub use container::{Container, Containers, HorizontalAnchor, Layout, Slot, Stacking, VerticalAnchor};
pub use host::{
    AnimationCompletion, AnimationDriver, Clock, ManualClock, NoAnimation, SlotHandle, SystemClock,
    ToastProps, ViewHandle, ViewRegistry, ViewState,
};
pub use lifecycle::Phase;
pub use manager::{Message, NotificationManager, Timings};
pub use notification::{
    Action, Callback, MaxCount, NotificationConfig, NotificationId, NotifyOptions, Priority,
    Severity, Size,
};
pub use position::{ExitDirection, Position, PositionSpec, UnknownPosition};
