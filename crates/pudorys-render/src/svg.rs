//! String-building SVG document surface.

use kurbo::{Point, Rect};
use peniko::Color;
use pudorys_core::surface::{NodeKind, Surface};

/// Stroke/fill styling resolved for one node.
struct Style {
    fill: Option<Color>,
    stroke: Option<Color>,
    stroke_width: f64,
}

/// Palette matched to the survey UI: muted room boxes, brown door lines,
/// blue windows, green links.
fn style_for(kind: NodeKind) -> Style {
    match kind {
        NodeKind::RoomBox { selected: false } => Style {
            fill: Some(Color::from_rgb8(0xe8, 0xee, 0xf7)),
            stroke: Some(Color::from_rgb8(0x64, 0x74, 0x8b)),
            stroke_width: 1.5,
        },
        NodeKind::RoomBox { selected: true } => Style {
            fill: Some(Color::from_rgb8(0xcf, 0xe0, 0xf5)),
            stroke: Some(Color::from_rgb8(0x3b, 0x82, 0xf6)),
            stroke_width: 2.5,
        },
        NodeKind::RoomLabel => Style {
            fill: Some(Color::from_rgb8(0x1f, 0x29, 0x37)),
            stroke: None,
            stroke_width: 0.0,
        },
        NodeKind::DoorLine => Style {
            fill: None,
            stroke: Some(Color::from_rgb8(0x8b, 0x5a, 0x2b)),
            stroke_width: 4.0,
        },
        NodeKind::DoorMarker { selected, linked } => Style {
            fill: Some(if selected {
                Color::from_rgb8(0xf5, 0x9e, 0x0b)
            } else if linked {
                Color::from_rgb8(0x28, 0xa7, 0x45)
            } else {
                Color::from_rgb8(0x8b, 0x5a, 0x2b)
            }),
            stroke: Some(Color::from_rgb8(0xff, 0xff, 0xff)),
            stroke_width: 1.0,
        },
        NodeKind::WindowLine => Style {
            fill: None,
            stroke: Some(Color::from_rgb8(0x38, 0xbd, 0xf8)),
            stroke_width: 3.0,
        },
        NodeKind::WindowMarker => Style {
            fill: Some(Color::from_rgb8(0x38, 0xbd, 0xf8)),
            stroke: None,
            stroke_width: 0.0,
        },
        NodeKind::LinkLine => Style {
            fill: None,
            stroke: Some(Color::from_rgb8(0x28, 0xa7, 0x45)),
            stroke_width: 2.0,
        },
    }
}

fn css(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

fn class_for(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::RoomBox { .. } => "room-box",
        NodeKind::RoomLabel => "room-label",
        NodeKind::DoorLine => "door-line",
        NodeKind::DoorMarker { .. } => "door-marker",
        NodeKind::WindowLine => "window-line",
        NodeKind::WindowMarker => "window-marker",
        NodeKind::LinkLine => "link-line",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// SVG document surface. Draw through the [`Surface`] trait, then call
/// [`SvgSurface::finish`] for the markup.
pub struct SvgSurface {
    width: f64,
    height: f64,
    font_size: f64,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            font_size: 12.0,
            body: String::new(),
        }
    }

    /// The finished SVG document.
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
             viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body,
        )
    }

    fn paint_attrs(style: &Style) -> String {
        let mut attrs = String::new();
        match &style.fill {
            Some(color) => attrs.push_str(&format!(" fill=\"{}\"", css(*color))),
            None => attrs.push_str(" fill=\"none\""),
        }
        if let Some(color) = &style.stroke {
            attrs.push_str(&format!(
                " stroke=\"{}\" stroke-width=\"{}\"",
                css(*color),
                style.stroke_width
            ));
        }
        attrs
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        self.body.clear();
    }

    fn rect(&mut self, rect: Rect, corner_radius: f64, kind: NodeKind) {
        let style = style_for(kind);
        self.body.push_str(&format!(
            "  <rect class=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\"{}/>\n",
            class_for(kind),
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
            corner_radius,
            Self::paint_attrs(&style),
        ));
    }

    fn line(&mut self, from: Point, to: Point, kind: NodeKind) {
        let style = style_for(kind);
        self.body.push_str(&format!(
            "  <line class=\"{}\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}/>\n",
            class_for(kind),
            from.x,
            from.y,
            to.x,
            to.y,
            Self::paint_attrs(&style),
        ));
    }

    fn circle(&mut self, center: Point, radius: f64, kind: NodeKind) {
        let style = style_for(kind);
        self.body.push_str(&format!(
            "  <circle class=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>\n",
            class_for(kind),
            center.x,
            center.y,
            radius,
            Self::paint_attrs(&style),
        ));
    }

    fn text(&mut self, anchor: Point, content: &str, kind: NodeKind) {
        let style = style_for(kind);
        self.body.push_str(&format!(
            "  <text class=\"{}\" x=\"{}\" y=\"{}\" font-size=\"{}\" text-anchor=\"middle\" \
             dominant-baseline=\"middle\"{}>{}</text>\n",
            class_for(kind),
            anchor.x,
            anchor.y,
            self.font_size,
            Self::paint_attrs(&style),
            escape(content),
        ));
    }
}
