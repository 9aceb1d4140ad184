use js_sys::{Function, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::layers::{LayerPlan, LayerStyle};
use crate::metrics::Bounds;
use crate::selection::{Renderer, RouteDetail, Selection, SelectionController};
use crate::store::RouteStore;

/// Renderer that forwards each capability call to a JS hooks object
/// with `renderList`, `renderMapStyling`, `renderDetailPanel`, and
/// `writeLocation` methods.
struct JsRenderer {
    hooks: JsValue,
}

impl JsRenderer {
    fn call(&self, name: &str, args: &[&JsValue]) {
        let Ok(method) = Reflect::get(&self.hooks, &JsValue::from_str(name)) else {
            return;
        };
        let Some(method) = method.dyn_ref::<Function>() else {
            return;
        };
        let _ = match args {
            [a] => method.call1(&self.hooks, a),
            [a, b, c] => method.call3(&self.hooks, a, b, c),
            _ => method.call0(&self.hooks),
        };
    }
}

impl Renderer for JsRenderer {
    fn render_list(&mut self, active: &Selection) {
        self.call("renderList", &[&JsValue::from_str(active.as_fragment())]);
    }

    fn render_map_styling(&mut self, styles: &[LayerStyle], fit: &Bounds, padding: f64) {
        let styles = serde_wasm_bindgen::to_value(styles).unwrap_or(JsValue::NULL);
        let corners: [[f64; 2]; 2] = (*fit).into();
        let fit = serde_wasm_bindgen::to_value(&corners).unwrap_or(JsValue::NULL);
        self.call(
            "renderMapStyling",
            &[&styles, &fit, &JsValue::from_f64(padding)],
        );
    }

    fn render_detail_panel(&mut self, detail: Option<&RouteDetail>) {
        let value = match detail {
            Some(d) => serde_wasm_bindgen::to_value(d).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        };
        self.call("renderDetailPanel", &[&value]);
    }

    fn write_location(&mut self, fragment: &str) {
        self.call("writeLocation", &[&JsValue::from_str(fragment)]);
    }
}

/// Browser entry point: owns the route store and the selection
/// controller for the lifetime of the page.
#[wasm_bindgen]
pub struct RouteMapApp {
    controller: SelectionController<JsRenderer>,
}

#[wasm_bindgen]
impl RouteMapApp {
    /// Build from the fetched route document. Fetch failures are the
    /// host page's concern; they never reach this constructor.
    #[wasm_bindgen(constructor)]
    pub fn new(routes_json: &str, hooks: JsValue) -> Result<RouteMapApp, JsValue> {
        console_error_panic_hook::set_once();

        let store = RouteStore::from_json(routes_json)?;
        let controller = SelectionController::new(store, JsRenderer { hooks });
        Ok(Self { controller })
    }

    /// Route list in display order, for sidebar and selector markup.
    pub fn routes(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.controller.store().routes())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Sources and layers to register with the map engine, once at
    /// startup. Selection changes restyle these, never recreate them.
    #[wasm_bindgen(js_name = layerPlan)]
    pub fn layer_plan(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&LayerPlan::for_store(self.controller.store()))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Resolve the startup selection from the current URL fragment.
    pub fn initialize(&mut self, fragment: &str) {
        self.controller.initialize(fragment);
    }

    #[wasm_bindgen(js_name = sidebarActivated)]
    pub fn sidebar_activated(&mut self, value: &str) {
        self.controller.sidebar_activated(value);
    }

    #[wasm_bindgen(js_name = selectorChanged)]
    pub fn selector_changed(&mut self, value: &str) {
        self.controller.selector_changed(value);
    }

    #[wasm_bindgen(js_name = mapRouteClicked)]
    pub fn map_route_clicked(&mut self, route_id: &str) {
        self.controller.map_route_clicked(route_id);
    }

    #[wasm_bindgen(js_name = historyNavigated)]
    pub fn history_navigated(&mut self, fragment: &str) {
        self.controller.history_navigated(fragment);
    }
}
