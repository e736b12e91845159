// SPDX-License-Identifier: MPL-2.0
//! `iced_toasts` is an imperative toast notification manager.
//!
//! It keeps one stack of notifications per screen anchor, spaces out bursts
//! through an admission queue, evicts the oldest toasts when a stack is full,
//! and pauses countdowns while the pointer rests on a toast. Rendering is
//! delegated to a host through the [`notifications::ViewRegistry`] and
//! [`notifications::AnimationDriver`] traits; [`ui::ToastLayer`] is the
//! bundled iced host.

#![doc(html_root_url = "https://docs.rs/iced_toasts/0.1.0")]

pub mod config;
pub mod error;
pub mod notifications;
pub mod ui;
