// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for the notification manager.
//!
//! This module serves as the single source of truth for timing policy and
//! per-notification defaults. Constants are organized by category.
//!
//! # Categories
//!
//! - **Duration**: Auto-dismiss countdown
//! - **Capacity**: Per-container max-count bounds
//! - **Timing**: Display delay, exit window, eviction stagger, queue spacing

// ==========================================================================
// Duration Defaults
// ==========================================================================

/// Default auto-dismiss duration (in milliseconds).
pub const DEFAULT_DURATION_MS: i64 = 3000;

// ==========================================================================
// Capacity Defaults
// ==========================================================================

/// Default maximum number of live notifications per container.
pub const DEFAULT_MAX_COUNT: usize = 5;

/// Minimum allowed max-count.
pub const MIN_MAX_COUNT: usize = 1;

/// Maximum allowed max-count.
pub const MAX_MAX_COUNT: usize = 50;

// ==========================================================================
// Timing Policy
// ==========================================================================

/// Delay between mounting a view and marking it visible, so the entry
/// animation is observed rather than skipped (in milliseconds).
pub const DISPLAY_DELAY_MS: u64 = 20;

/// Exit animation window between dismissal and unmount (in milliseconds).
pub const EXIT_ANIMATION_MS: u64 = 300;

/// Stagger between successive evictions from one container (in milliseconds).
pub const EVICTION_STAGGER_MS: u64 = 40;

/// Spacing between admissions drained from the queue (in milliseconds).
pub const QUEUE_INTERVAL_MS: u64 = 100;

/// Redraw period used by the iced host while timers are pending (in milliseconds).
pub const TICK_INTERVAL_MS: u64 = 16;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_DURATION_MS > 0);

    assert!(MIN_MAX_COUNT > 0);
    assert!(MAX_MAX_COUNT >= MIN_MAX_COUNT);
    assert!(DEFAULT_MAX_COUNT >= MIN_MAX_COUNT);
    assert!(DEFAULT_MAX_COUNT <= MAX_MAX_COUNT);

    assert!(DISPLAY_DELAY_MS < EXIT_ANIMATION_MS);
    assert!(EVICTION_STAGGER_MS < QUEUE_INTERVAL_MS);
    assert!(TICK_INTERVAL_MS > 0);
};
