//! SVG DOM implementation of the drawing surface.
//!
//! Nodes carry the same CSS classes the survey UI styles
//! (`plan2d-room-box`, `plan2d-door-marker`, ...); the page's stylesheet
//! owns the visuals.

use kurbo::{Point, Rect};
use pudorys_core::surface::{NodeKind, Surface};
use web_sys::{Document, Element};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub(crate) struct DomSvgSurface<'a> {
    document: &'a Document,
    root: &'a Element,
}

impl<'a> DomSvgSurface<'a> {
    pub fn new(document: &'a Document, root: &'a Element) -> Self {
        Self { document, root }
    }

    fn append(&self, tag: &str, class: &str, attrs: &[(&str, String)]) -> Option<Element> {
        let element = self.document.create_element_ns(Some(SVG_NS), tag).ok()?;
        let _ = element.set_attribute("class", class);
        for (name, value) in attrs {
            let _ = element.set_attribute(name, value);
        }
        let _ = self.root.append_child(&element);
        Some(element)
    }
}

fn class_for(kind: NodeKind) -> String {
    match kind {
        NodeKind::RoomBox { selected } => {
            if selected {
                "plan2d-room-box selected".to_string()
            } else {
                "plan2d-room-box".to_string()
            }
        }
        NodeKind::RoomLabel => "plan2d-room-text".to_string(),
        NodeKind::DoorLine => "plan2d-door".to_string(),
        NodeKind::DoorMarker { selected, linked } => {
            let mut class = String::from("plan2d-door-marker");
            if selected {
                class.push_str(" selected-door");
            }
            if linked {
                class.push_str(" linked-door");
            }
            class
        }
        NodeKind::WindowLine => "plan2d-window".to_string(),
        NodeKind::WindowMarker => "plan2d-window-marker".to_string(),
        NodeKind::LinkLine => "plan2d-link-line".to_string(),
    }
}

impl Surface for DomSvgSurface<'_> {
    fn clear(&mut self) {
        self.root.set_inner_html("");
    }

    fn rect(&mut self, rect: Rect, corner_radius: f64, kind: NodeKind) {
        self.append(
            "rect",
            &class_for(kind),
            &[
                ("x", rect.x0.to_string()),
                ("y", rect.y0.to_string()),
                ("width", rect.width().to_string()),
                ("height", rect.height().to_string()),
                ("rx", corner_radius.to_string()),
            ],
        );
    }

    fn line(&mut self, from: Point, to: Point, kind: NodeKind) {
        self.append(
            "line",
            &class_for(kind),
            &[
                ("x1", from.x.to_string()),
                ("y1", from.y.to_string()),
                ("x2", to.x.to_string()),
                ("y2", to.y.to_string()),
            ],
        );
    }

    fn circle(&mut self, center: Point, radius: f64, kind: NodeKind) {
        self.append(
            "circle",
            &class_for(kind),
            &[
                ("cx", center.x.to_string()),
                ("cy", center.y.to_string()),
                ("r", radius.to_string()),
            ],
        );
    }

    fn text(&mut self, anchor: Point, content: &str, kind: NodeKind) {
        if let Some(element) = self.append(
            "text",
            &class_for(kind),
            &[
                ("x", anchor.x.to_string()),
                ("y", anchor.y.to_string()),
                ("text-anchor", "middle".to_string()),
                ("dominant-baseline", "middle".to_string()),
            ],
        ) {
            element.set_text_content(Some(content));
        }
    }
}
