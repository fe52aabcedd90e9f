//! Browser-facing editor handle: owns the core editor and wires DOM
//! events to it.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use pudorys_core::{
    EditorConfig, EditorData, Floor, Modifiers, PlanEditor, Project, Response, SurfaceError,
};
use serde::Serialize as _;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlInputElement, KeyboardEvent, MouseEvent, PointerEvent,
    WheelEvent,
};

use crate::dom_surface::DomSvgSurface;

struct Inner {
    editor: PlanEditor,
    document: Document,
    svg: Element,
    registry: Element,
    zoom_slider: Option<HtmlInputElement>,
    snap_toggle: Option<HtmlInputElement>,
    events_attached: bool,
    raf_pending: bool,
    space_down: bool,
}

impl Inner {
    fn render_now(&mut self) {
        {
            let mut surface = DomSvgSurface::new(&self.document, &self.svg);
            self.editor.render(&mut surface);
        }
        self.render_registry();
    }

    fn render_registry(&self) {
        self.registry.set_inner_html("");
        for entry in self.editor.registry() {
            let Ok(item) = self.document.create_element("div") else {
                continue;
            };
            let class = if entry.selected {
                "plan2d-room-item selected"
            } else {
                "plan2d-room-item"
            };
            let _ = item.set_attribute("class", class);
            let _ = item.set_attribute("data-room-id", &entry.room_id.to_string());
            if let Ok(name) = self.document.create_element("strong") {
                name.set_text_content(Some(&entry.name));
                let _ = item.append_child(&name);
            }
            if let Ok(area) = self.document.create_element("span") {
                let _ = area.set_attribute("class", "muted");
                area.set_text_content(Some(&format!("{} m²", entry.area_m2)));
                let _ = item.append_child(&area);
            }
            let _ = self.registry.append_child(&item);
        }
    }

    fn sync_zoom_slider(&self) {
        if let Some(slider) = &self.zoom_slider {
            slider.set_value(&self.editor.zoom().to_string());
        }
    }

    /// Pointer position in the SVG element's local coordinate space.
    fn local_point(&self, event: &PointerEvent) -> Point {
        let rect = self.svg.get_bounding_client_rect();
        Point::new(
            event.client_x() as f64 - rect.left(),
            event.client_y() as f64 - rect.top(),
        )
    }

    fn modifiers(&self, event: &PointerEvent) -> Modifiers {
        Modifiers {
            shift: event.shift_key(),
            ctrl: event.ctrl_key(),
            alt: event.alt_key(),
            space: self.space_down,
        }
    }
}

/// Serialize a floor into a plain JS object (maps become objects, not ES
/// `Map`s, so the host can treat it as JSON data).
fn floor_to_js(floor: &Floor) -> Result<JsValue, serde_wasm_bindgen::Error> {
    floor.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

fn handle_response(inner: &Rc<RefCell<Inner>>, response: Response) {
    if let Some(rejection) = response.rejection {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&rejection.to_string());
        }
    }
    if response.redraw {
        schedule_render(inner);
    }
}

/// Coalesce redraws to animation-frame rate during continuous drags.
fn schedule_render(inner: &Rc<RefCell<Inner>>) {
    {
        let mut borrow = inner.borrow_mut();
        if borrow.raf_pending {
            return;
        }
        borrow.raf_pending = true;
    }
    let inner_rc = Rc::clone(inner);
    let callback = Closure::once_into_js(move || {
        let mut borrow = inner_rc.borrow_mut();
        borrow.raf_pending = false;
        borrow.render_now();
    });
    let scheduled = web_sys::window()
        .and_then(|w| w.request_animation_frame(callback.unchecked_ref()).ok());
    if scheduled.is_none() {
        let mut borrow = inner.borrow_mut();
        borrow.raf_pending = false;
        borrow.render_now();
    }
}

/// Editor handle exported to JavaScript.
///
/// ```js
/// const editor = new Plan2dHandle("plan2dSvg", "plan2dRoomsList",
///                                 "plan2dZoomSlider", "plan2dSnapToggle");
/// editor.set_on_change((floor) => saveFloor(floor));
/// editor.set_data(project, floor);
/// editor.attach_events();
/// editor.render();
/// ```
#[wasm_bindgen]
pub struct Plan2dHandle {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl Plan2dHandle {
    /// Look up the SVG surface, the registry list, and (optionally) the
    /// zoom slider and snap toggle by element id.
    #[wasm_bindgen(constructor)]
    pub fn new(
        svg_id: &str,
        registry_id: &str,
        zoom_slider_id: Option<String>,
        snap_toggle_id: Option<String>,
    ) -> Result<Plan2dHandle, JsValue> {
        let missing = |what: &str| {
            JsValue::from_str(&SurfaceError::TargetUnavailable(what.to_string()).to_string())
        };
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| missing("document"))?;
        let svg = document
            .get_element_by_id(svg_id)
            .ok_or_else(|| missing(&format!("#{svg_id}")))?;
        let registry = document
            .get_element_by_id(registry_id)
            .ok_or_else(|| missing(&format!("#{registry_id}")))?;
        let zoom_slider = zoom_slider_id
            .and_then(|id| document.get_element_by_id(&id))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        let snap_toggle = snap_toggle_id
            .and_then(|id| document.get_element_by_id(&id))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());

        Ok(Self {
            inner: Rc::new(RefCell::new(Inner {
                editor: PlanEditor::new(EditorConfig::default()),
                document,
                svg,
                registry,
                zoom_slider,
                snap_toggle,
                events_attached: false,
                raf_pending: false,
                space_down: false,
            })),
        })
    }

    /// Bind project/floor data (plain JS objects). Must be called before
    /// the first render.
    pub fn set_data(&self, project: JsValue, floor: JsValue) -> Result<(), JsValue> {
        let project: Project = serde_wasm_bindgen::from_value(project)
            .map_err(|e| JsValue::from_str(&format!("invalid project: {e}")))?;
        let floor: Floor = serde_wasm_bindgen::from_value(floor)
            .map_err(|e| JsValue::from_str(&format!("invalid floor: {e}")))?;
        let mut inner = self.inner.borrow_mut();
        inner.editor.set_data(EditorData { project, floor });
        inner.sync_zoom_slider();
        Ok(())
    }

    /// Change callback, invoked with the floor as a plain JS object after
    /// every persisted mutation.
    pub fn set_on_change(&self, callback: js_sys::Function) {
        self.inner
            .borrow_mut()
            .editor
            .on_change(move |floor| match floor_to_js(floor) {
                Ok(value) => {
                    let _ = callback.call1(&JsValue::NULL, &value);
                }
                Err(err) => log::error!("failed to serialize floor: {err}"),
            });
    }

    /// Immediate full redraw of the plan and the registry list.
    pub fn render(&self) {
        self.inner.borrow_mut().render_now();
    }

    /// Current floor as a plain JS object (`null` before `set_data`).
    pub fn floor(&self) -> JsValue {
        self.inner
            .borrow()
            .editor
            .floor()
            .and_then(|floor| floor_to_js(floor).ok())
            .unwrap_or(JsValue::NULL)
    }

    pub fn selected_room_id(&self) -> Option<String> {
        self.inner
            .borrow()
            .editor
            .selected_room_id()
            .map(|id| id.to_string())
    }

    pub fn set_selected_room_id(&self, id: Option<String>) {
        let parsed = id.and_then(|s| s.parse::<uuid::Uuid>().ok());
        let response = self.inner.borrow_mut().editor.set_selected_room_id(parsed);
        handle_response(&self.inner, response);
    }

    pub fn zoom(&self) -> f64 {
        self.inner.borrow().editor.zoom()
    }

    pub fn set_zoom(&self, zoom: f64) {
        let response = {
            let mut inner = self.inner.borrow_mut();
            let response = inner.editor.set_zoom(zoom);
            inner.sync_zoom_slider();
            response
        };
        handle_response(&self.inner, response);
    }

    pub fn set_pan(&self, x: f64, y: f64) {
        let response = self.inner.borrow_mut().editor.set_pan(x, y);
        handle_response(&self.inner, response);
    }

    /// Reset to zoom 1.0 and no pan (wire to the reset control).
    pub fn reset_view(&self) {
        let response = {
            let mut inner = self.inner.borrow_mut();
            let response = inner.editor.reset_view();
            inner.sync_zoom_slider();
            response
        };
        handle_response(&self.inner, response);
    }

    pub fn set_snap_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().editor.set_snap_enabled(enabled);
    }

    /// Wire pointer/wheel/control listeners. Safe to call repeatedly; the
    /// listeners are attached exactly once per handle.
    pub fn attach_events(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.events_attached {
                return;
            }
            inner.events_attached = true;
        }
        self.attach_pointer_events();
        self.attach_wheel();
        self.attach_controls();
        self.attach_key_tracking();
        self.attach_registry_clicks();
        log::info!("plan2d events attached");
    }
}

// Listener wiring, not exported to JS.
impl Plan2dHandle {
    fn attach_pointer_events(&self) {
        let svg = self.inner.borrow().svg.clone();

        let inner_rc = Rc::clone(&self.inner);
        let down = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let response = {
                let mut inner = inner_rc.borrow_mut();
                let point = inner.local_point(&event);
                let modifiers = inner.modifiers(&event);
                // Capture so moves keep routing here even off-element.
                let _ = inner.svg.set_pointer_capture(event.pointer_id());
                inner.editor.pointer_down(event.pointer_id(), point, modifiers)
            };
            handle_response(&inner_rc, response);
        });
        let _ = svg.add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref());
        down.forget();

        let inner_rc = Rc::clone(&self.inner);
        let moved = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let response = {
                let mut inner = inner_rc.borrow_mut();
                let point = inner.local_point(&event);
                inner.editor.pointer_move(event.pointer_id(), point)
            };
            handle_response(&inner_rc, response);
        });
        let _ = svg.add_event_listener_with_callback("pointermove", moved.as_ref().unchecked_ref());
        moved.forget();

        let inner_rc = Rc::clone(&self.inner);
        let up = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let response = {
                let mut inner = inner_rc.borrow_mut();
                inner.editor.pointer_up(event.pointer_id())
            };
            handle_response(&inner_rc, response);
        });
        let _ = svg.add_event_listener_with_callback("pointerup", up.as_ref().unchecked_ref());
        up.forget();

        let inner_rc = Rc::clone(&self.inner);
        let cancel = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let response = {
                let mut inner = inner_rc.borrow_mut();
                inner.editor.pointer_cancel(event.pointer_id())
            };
            handle_response(&inner_rc, response);
        });
        let _ =
            svg.add_event_listener_with_callback("pointercancel", cancel.as_ref().unchecked_ref());
        cancel.forget();
    }

    fn attach_wheel(&self) {
        let svg = self.inner.borrow().svg.clone();
        let inner_rc = Rc::clone(&self.inner);
        let wheel = Closure::<dyn FnMut(WheelEvent)>::new(move |event: WheelEvent| {
            if !event.ctrl_key() {
                return;
            }
            event.prevent_default();
            let response = {
                let mut inner = inner_rc.borrow_mut();
                let response = inner.editor.wheel(
                    event.delta_y(),
                    Modifiers {
                        ctrl: true,
                        ..Modifiers::NONE
                    },
                );
                inner.sync_zoom_slider();
                response
            };
            handle_response(&inner_rc, response);
        });
        let options = web_sys::AddEventListenerOptions::new();
        options.set_passive(false);
        let _ = svg.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            wheel.as_ref().unchecked_ref(),
            &options,
        );
        wheel.forget();
    }

    fn attach_controls(&self) {
        let (zoom_slider, snap_toggle) = {
            let inner = self.inner.borrow();
            (inner.zoom_slider.clone(), inner.snap_toggle.clone())
        };

        if let Some(slider) = zoom_slider {
            let inner_rc = Rc::clone(&self.inner);
            let slider_el = slider.clone();
            let input = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                if let Ok(value) = slider_el.value().parse::<f64>() {
                    let response = inner_rc.borrow_mut().editor.set_zoom(value);
                    handle_response(&inner_rc, response);
                }
            });
            let _ = slider.add_event_listener_with_callback("input", input.as_ref().unchecked_ref());
            input.forget();
        }

        if let Some(toggle) = snap_toggle {
            let inner_rc = Rc::clone(&self.inner);
            let toggle_el = toggle.clone();
            let change = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                inner_rc
                    .borrow_mut()
                    .editor
                    .set_snap_enabled(toggle_el.checked());
            });
            let _ =
                toggle.add_event_listener_with_callback("change", change.as_ref().unchecked_ref());
            change.forget();
        }
    }

    /// Track the pan key (space) on the document so pointer events can
    /// carry it as a modifier.
    fn attach_key_tracking(&self) {
        let document = self.inner.borrow().document.clone();

        let inner_rc = Rc::clone(&self.inner);
        let down = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() == " " {
                inner_rc.borrow_mut().space_down = true;
            }
        });
        let _ =
            document.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref());
        down.forget();

        let inner_rc = Rc::clone(&self.inner);
        let up = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.key() == " " {
                inner_rc.borrow_mut().space_down = false;
            }
        });
        let _ = document.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref());
        up.forget();
    }

    fn attach_registry_clicks(&self) {
        let registry = self.inner.borrow().registry.clone();
        let inner_rc = Rc::clone(&self.inner);
        let click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
            else {
                return;
            };
            let Ok(Some(item)) = target.closest("[data-room-id]") else {
                return;
            };
            let Some(id) = item.get_attribute("data-room-id") else {
                return;
            };
            let Ok(id) = id.parse::<uuid::Uuid>() else {
                return;
            };
            let response = inner_rc.borrow_mut().editor.registry_click(id);
            handle_response(&inner_rc, response);
        });
        let _ = registry.add_event_listener_with_callback("click", click.as_ref().unchecked_ref());
        click.forget();
    }
}
