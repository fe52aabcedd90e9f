//! Minimal drawing abstraction the editor renders through.
//!
//! The editor redraws the whole plan from scratch on every render call;
//! concrete backends (SVG document, browser DOM) only need the five
//! primitives below. Coordinates are screen pixels. Every primitive is
//! tagged with a semantic [`NodeKind`] so backends decide the styling.

use kurbo::{Point, Rect};
use thiserror::Error;

/// Semantic tag of a drawn node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    RoomBox { selected: bool },
    RoomLabel,
    DoorLine,
    DoorMarker { selected: bool, linked: bool },
    WindowLine,
    WindowMarker,
    LinkLine,
}

/// Failure to reach or drive a concrete render target.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("render target unavailable: {0}")]
    TargetUnavailable(String),
    #[error("draw failed: {0}")]
    Draw(String),
}

/// A render target the editor fully owns and redraws from scratch.
pub trait Surface {
    /// Remove everything previously drawn.
    fn clear(&mut self);
    /// Filled rectangle with optional corner rounding.
    fn rect(&mut self, rect: Rect, corner_radius: f64, kind: NodeKind);
    /// Stroked line segment.
    fn line(&mut self, from: Point, to: Point, kind: NodeKind);
    /// Filled circle.
    fn circle(&mut self, center: Point, radius: f64, kind: NodeKind);
    /// Text centered on the anchor point.
    fn text(&mut self, anchor: Point, content: &str, kind: NodeKind);
}

/// A recorded draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear,
    Rect {
        rect: Rect,
        corner_radius: f64,
        kind: NodeKind,
    },
    Line {
        from: Point,
        to: Point,
        kind: NodeKind,
    },
    Circle {
        center: Point,
        radius: f64,
        kind: NodeKind,
    },
    Text {
        anchor: Point,
        content: String,
        kind: NodeKind,
    },
}

impl DrawCmd {
    /// The semantic tag, if the command draws a node.
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            DrawCmd::Clear => None,
            DrawCmd::Rect { kind, .. }
            | DrawCmd::Line { kind, .. }
            | DrawCmd::Circle { kind, .. }
            | DrawCmd::Text { kind, .. } => Some(*kind),
        }
    }
}

/// Records draw commands instead of rasterizing; for tests and headless
/// inspection.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count commands whose tag matches a predicate.
    pub fn count_kind(&self, pred: impl Fn(NodeKind) -> bool) -> usize {
        self.commands
            .iter()
            .filter_map(DrawCmd::kind)
            .filter(|k| pred(*k))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCmd::Clear);
    }

    fn rect(&mut self, rect: Rect, corner_radius: f64, kind: NodeKind) {
        self.commands.push(DrawCmd::Rect {
            rect,
            corner_radius,
            kind,
        });
    }

    fn line(&mut self, from: Point, to: Point, kind: NodeKind) {
        self.commands.push(DrawCmd::Line { from, to, kind });
    }

    fn circle(&mut self, center: Point, radius: f64, kind: NodeKind) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            kind,
        });
    }

    fn text(&mut self, anchor: Point, content: &str, kind: NodeKind) {
        self.commands.push(DrawCmd::Text {
            anchor,
            content: content.to_string(),
            kind,
        });
    }
}
