//! Dual-view scroll synchronization
//!
//! Keeps the two panes of an open document view proportionally aligned. The
//! controller is an explicit object with attach/detach lifecycle so the
//! mirroring math and the suppression window can be exercised without any UI
//! framework; the presentation layer feeds it raw scroll events and applies
//! the `MirrorUpdate` it returns.
//!
//! Loop prevention: setting the other pane's offset makes that pane emit a
//! scroll event of its own. The controller remembers which pane initiated
//! the last mirror and swallows the echo arriving from the opposite pane
//! while the mark is fresh. A repeated genuine event from the same source
//! restarts the window (debounce, not a hard deadline).

use std::time::{Duration, Instant};

use crate::interface::Pane;

/// How long a mirrored update suppresses the echo from the other pane.
const SUPPRESSION_WINDOW: Duration = Duration::from_millis(50);

/// Scroll geometry and current offset for one pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub offset: f64,
    pub content_height: f64,
    pub viewport_height: f64,
}

impl ScrollState {
    /// Scrollable range; 0 when the content fits the viewport.
    fn max_scroll(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }
}

/// The offset the presentation layer must apply to the other pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorUpdate {
    pub pane: Pane,
    pub offset: f64,
}

/// Per-open-document scroll controller.
///
/// Owns the scroll state of both panes for one document view; dropped when
/// the view closes, so no state leaks across documents.
#[derive(Debug)]
pub struct ViewSyncController {
    original: Option<ScrollState>,
    translated: Option<ScrollState>,
    sync_enabled: bool,
    /// Pane that initiated the last mirror, and when.
    suppression: Option<(Pane, Instant)>,
    suppression_window: Duration,
}

impl ViewSyncController {
    pub fn new() -> Self {
        Self::with_suppression_window(SUPPRESSION_WINDOW)
    }

    /// Controller with a custom suppression window. `Duration::ZERO`
    /// disables echo suppression entirely.
    pub fn with_suppression_window(window: Duration) -> Self {
        Self {
            original: None,
            translated: None,
            sync_enabled: true,
            suppression: None,
            suppression_window: window,
        }
    }

    fn state(&self, pane: Pane) -> &Option<ScrollState> {
        match pane {
            Pane::Original => &self.original,
            Pane::Translated => &self.translated,
        }
    }

    fn state_mut(&mut self, pane: Pane) -> &mut Option<ScrollState> {
        match pane {
            Pane::Original => &mut self.original,
            Pane::Translated => &mut self.translated,
        }
    }

    /// Register a pane with its geometry, offset starting at 0.
    pub fn attach(&mut self, pane: Pane, content_height: f64, viewport_height: f64) {
        *self.state_mut(pane) = Some(ScrollState {
            offset: 0.0,
            content_height,
            viewport_height,
        });
    }

    /// Update a pane's geometry after a resize or re-render, keeping its offset.
    pub fn update_geometry(&mut self, pane: Pane, content_height: f64, viewport_height: f64) {
        if let Some(state) = self.state_mut(pane) {
            state.content_height = content_height;
            state.viewport_height = viewport_height;
        }
    }

    /// Unregister a pane; its scroll state is discarded.
    pub fn detach(&mut self, pane: Pane) {
        *self.state_mut(pane) = None;
    }

    pub fn set_sync_enabled(&mut self, enabled: bool) {
        self.sync_enabled = enabled;
    }

    pub fn sync_enabled(&self) -> bool {
        self.sync_enabled
    }

    pub fn scroll_state(&self, pane: Pane) -> Option<ScrollState> {
        *self.state(pane)
    }

    /// Handle a scroll event on `pane`.
    ///
    /// The pane's own offset is always recorded. A `MirrorUpdate` for the
    /// other pane is returned only when sync is enabled, both panes are
    /// attached, and the event is not the echo of a mirror the other pane
    /// initiated within the suppression window. A pane without scrollable
    /// overflow mirrors as ratio 0.
    pub fn on_scroll(&mut self, pane: Pane, new_offset: f64) -> Option<MirrorUpdate> {
        let source = match self.state_mut(pane) {
            Some(state) => {
                state.offset = new_offset;
                *state
            }
            None => return None,
        };

        if !self.sync_enabled {
            return None;
        }

        if let Some((initiator, marked_at)) = self.suppression {
            if initiator == pane.other() && marked_at.elapsed() < self.suppression_window {
                // Echo of our own mirrored update; swallow without
                // extending the window.
                return None;
            }
        }

        let target = match self.state_mut(pane.other()) {
            Some(state) => state,
            None => return None,
        };

        let source_max = source.max_scroll();
        let ratio = if source_max > 0.0 {
            source.offset / source_max
        } else {
            0.0
        };
        let mirrored = ratio * target.max_scroll();
        target.offset = mirrored;

        self.suppression = Some((pane, Instant::now()));
        Some(MirrorUpdate {
            pane: pane.other(),
            offset: mirrored,
        })
    }
}

impl Default for ViewSyncController {
    fn default() -> Self {
        Self::new()
    }
}
