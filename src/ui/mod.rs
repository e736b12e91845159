// SPDX-License-Identifier: MPL-2.0
//! Iced rendering of toast notifications.
//!
//! - [`ToastLayer`] - Mounts, lays out and draws toasts for a manager
//! - [`subscription`] - Tick subscription driving the manager's timers
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
mod toast;

pub use toast::{subscription, ToastLayer};
