//! Pointer-driven move/resize of timeline bars.
//!
//! A gesture goes Idle → Dragging → Idle. While dragging only the pixel
//! delta changes; dates are written once, on release, through a
//! [`DateCommit`]. One [`DragController`] is shared by the whole chart, so at
//! most one bar can be mid-gesture.

use chrono::{Duration, NaiveDate};
use thiserror::Error;
use uuid::Uuid;

use super::timeline::BarSpan;

/// Width of the grab zone at each end of a bar.
pub const EDGE_GRAB_PX: f32 = 8.0;

/// The item a bar edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarTarget {
    Project(Uuid),
    Task { project: Uuid, task: Uuid },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    ResizeLeft,
    ResizeRight,
}

impl DragKind {
    /// Pick the gesture from where the pointer landed inside the rendered bar.
    pub fn from_offset(offset_x: f32, rendered_width: f32) -> Self {
        if offset_x < EDGE_GRAB_PX {
            DragKind::ResizeLeft
        } else if offset_x > rendered_width - EDGE_GRAB_PX {
            DragKind::ResizeRight
        } else {
            DragKind::Move
        }
    }

    pub fn cursor_icon(&self) -> egui::CursorIcon {
        match self {
            DragKind::Move => egui::CursorIcon::Grabbing,
            DragKind::ResizeLeft | DragKind::ResizeRight => egui::CursorIcon::ResizeColumn,
        }
    }
}

/// New dates for one item, produced by a drag release or the edit dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCommit {
    pub target: BarTarget,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InteractionError {
    #[error("another bar is already being dragged")]
    GestureInProgress,
}

/// Convert a pixel delta into whole days. Halves round toward positive
/// infinity, so half a cell to the left is still no change.
pub fn day_delta(delta_px: f32, cell_width: f32) -> i64 {
    if cell_width <= 0.0 {
        return 0;
    }
    (delta_px / cell_width + 0.5).floor() as i64
}

/// Apply a day delta to `[start, end]` for the given gesture.
///
/// Returns `None` when nothing should be committed: a zero delta, or a resize
/// that would put the start on or after the end.
pub fn resolve(kind: DragKind, start: NaiveDate, end: NaiveDate, days: i64) -> Option<(NaiveDate, NaiveDate)> {
    if days == 0 {
        return None;
    }
    let shift = Duration::days(days);
    match kind {
        DragKind::Move => Some((start + shift, end + shift)),
        DragKind::ResizeLeft => {
            let new_start = start + shift;
            (new_start < end).then_some((new_start, end))
        }
        DragKind::ResizeRight => {
            let new_end = end + shift;
            (new_end > start).then_some((start, new_end))
        }
    }
}

/// State of one in-flight gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub target: BarTarget,
    pub kind: DragKind,
    pub origin_x: f32,
    pub delta_x: f32,
    /// Dates at pointer-down.
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Unmodified bar placement at pointer-down.
    pub base: BarSpan,
}

impl DragSession {
    /// Live placement of the bar while the pointer is held.
    pub fn visual_span(&self, cell_width: f32) -> BarSpan {
        let BarSpan { left, width } = self.base;
        let delta = self.delta_x;
        match self.kind {
            DragKind::Move => BarSpan {
                left: left + delta,
                width,
            },
            DragKind::ResizeRight => BarSpan {
                left,
                width: (width + delta).max(cell_width),
            },
            DragKind::ResizeLeft => BarSpan {
                left: left + delta,
                width: (width - delta).max(cell_width),
            },
        }
    }

    pub fn day_delta(&self, cell_width: f32) -> i64 {
        day_delta(self.delta_x, cell_width)
    }

    fn commit(&self, cell_width: f32) -> Option<DateCommit> {
        let days = self.day_delta(cell_width);
        let resolved = resolve(self.kind, self.start, self.end, days);
        if resolved.is_none() && days != 0 {
            log::debug!(
                "discarding {:?} of {:?} by {} days: start would not precede end",
                self.kind,
                self.target,
                days
            );
        }
        resolved.map(|(start, end)| DateCommit {
            target: self.target,
            start,
            end,
        })
    }
}

/// Owns the single active gesture for the chart.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Session for `target`, if that bar is the one being dragged.
    pub fn session_for(&self, target: BarTarget) -> Option<&DragSession> {
        self.session.as_ref().filter(|s| s.target == target)
    }

    /// Pointer-down on a bar.
    pub fn begin(
        &mut self,
        target: BarTarget,
        kind: DragKind,
        origin_x: f32,
        (start, end): (NaiveDate, NaiveDate),
        base: BarSpan,
    ) -> Result<(), InteractionError> {
        if self.session.is_some() {
            return Err(InteractionError::GestureInProgress);
        }
        self.session = Some(DragSession {
            target,
            kind,
            origin_x,
            delta_x: 0.0,
            start,
            end,
            base,
        });
        Ok(())
    }

    /// Pointer-move while held.
    pub fn update(&mut self, pointer_x: f32) {
        if let Some(session) = self.session.as_mut() {
            session.delta_x = pointer_x - session.origin_x;
        }
    }

    /// Pointer-up. Always ends the session; returns the commit, if any.
    pub fn finish(&mut self, pointer_x: f32, cell_width: f32) -> Option<DateCommit> {
        self.update(pointer_x);
        let session = self.session.take()?;
        session.commit(cell_width)
    }

    /// Abort the gesture without committing.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}
