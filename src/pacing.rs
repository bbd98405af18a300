//! Frame loop gating
//!
//! The host reports page visibility and window focus; the loop only ticks
//! while both hold. Coming back restarts the clock so the pause is not
//! replayed as one long frame.

use crate::frame_delta;

/// Activity and timing state for the animation-frame loop
#[derive(Debug, Clone, PartialEq)]
pub struct FrameGate {
    visible: bool,
    focused: bool,
    /// Whether a frame callback is already queued
    frame_scheduled: bool,
    /// Timestamp of the last ticked frame (0 = none yet)
    last_time: f64,
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FrameGate {
    /// Gate for a visible page; `focused` is the window's initial focus
    pub fn new(focused: bool) -> Self {
        Self {
            visible: true,
            focused,
            frame_scheduled: false,
            last_time: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.visible && self.focused
    }

    pub fn frame_scheduled(&self) -> bool {
        self.frame_scheduled
    }

    /// Page visibility changed. Returns true if the loop must be restarted.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let was_active = self.is_active();
        self.visible = visible;
        self.resume_if_woken(was_active)
    }

    /// Window focus changed. Returns true if the loop must be restarted.
    pub fn set_focused(&mut self, focused: bool) -> bool {
        let was_active = self.is_active();
        self.focused = focused;
        self.resume_if_woken(was_active)
    }

    fn resume_if_woken(&mut self, was_active: bool) -> bool {
        if was_active || !self.is_active() {
            return false;
        }
        self.last_time = 0.0;
        !self.frame_scheduled
    }

    /// A frame callback was queued
    pub fn mark_scheduled(&mut self) {
        self.frame_scheduled = true;
    }

    /// Frame callback fired. Returns the delta to tick with, or `None` if
    /// the loop should stop here.
    pub fn begin_frame(&mut self, time: f64) -> Option<f32> {
        self.frame_scheduled = false;
        if !self.is_active() {
            return None;
        }
        let delta = frame_delta(self.last_time, time);
        self.last_time = time;
        Some(delta)
    }
}
