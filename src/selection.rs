use serde::Serialize;

use crate::layers::{self, FIT_PADDING, LayerStyle};
use crate::metrics::Bounds;
use crate::store::RouteStore;

/// The current selection: every route, or one emphasized route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Route(String),
}

pub const ALL_FRAGMENT: &str = "all";

impl Selection {
    pub fn as_fragment(&self) -> &str {
        match self {
            Selection::All => ALL_FRAGMENT,
            Selection::Route(id) => id,
        }
    }

    /// Resolve a URL fragment against the known routes. Unknown ids,
    /// the literal `all`, and an empty fragment all resolve to All.
    pub fn from_fragment(fragment: &str, store: &RouteStore) -> Selection {
        let fragment = fragment.trim_start_matches('#');
        if !fragment.is_empty() && fragment != ALL_FRAGMENT && store.contains(fragment) {
            Selection::Route(fragment.to_string())
        } else {
            Selection::All
        }
    }
}

/// Payload for the mobile-only detail panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDetail {
    pub name: String,
    pub distance: f64,
    pub elevation_gain: Option<u64>,
    /// Download link target under the tracks/ subdirectory.
    pub filename: String,
}

/// Rendering capability interface. The controller drives all UI
/// through this, so its transition logic runs without a real map or
/// DOM.
pub trait Renderer {
    /// Mark the active sidebar item and sync the mobile selector.
    fn render_list(&mut self, active: &Selection);
    /// Restyle the visible line layers and fit the viewport.
    fn render_map_styling(&mut self, styles: &[LayerStyle], fit: &Bounds, padding: f64);
    /// Show route details, or hide the panel for None.
    fn render_detail_panel(&mut self, detail: Option<&RouteDetail>);
    /// Write the state id into the URL fragment.
    fn write_location(&mut self, fragment: &str);
}

/// Owns the current selection and reacts to sidebar clicks, selector
/// changes, map clicks, and history navigation. Runs for the lifetime
/// of the page; no state is terminal.
pub struct SelectionController<R: Renderer> {
    store: RouteStore,
    renderer: R,
    current: Selection,
}

impl<R: Renderer> SelectionController<R> {
    pub fn new(store: RouteStore, renderer: R) -> Self {
        Self {
            store,
            renderer,
            current: Selection::All,
        }
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    pub fn store(&self) -> &RouteStore {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Resolve the startup state from the initial URL fragment and
    /// apply it.
    pub fn initialize(&mut self, fragment: &str) {
        let target = Selection::from_fragment(fragment, &self.store);
        self.enter(target);
    }

    /// Sidebar item activated (download controls excluded upstream).
    pub fn sidebar_activated(&mut self, value: &str) {
        let target = Selection::from_fragment(value, &self.store);
        self.enter(target);
    }

    /// Mobile selector changed.
    pub fn selector_changed(&mut self, value: &str) {
        let target = Selection::from_fragment(value, &self.store);
        self.enter(target);
    }

    /// Hit layer clicked on the map. Unknown ids are ignored.
    pub fn map_route_clicked(&mut self, route_id: &str) {
        if self.store.contains(route_id) {
            self.enter(Selection::Route(route_id.to_string()));
        }
    }

    /// Browser back/forward changed the fragment. Entering a state
    /// writes the fragment, so only a fragment that differs from the
    /// tracked state may re-enter; this breaks the feedback loop.
    pub fn history_navigated(&mut self, fragment: &str) {
        let target = Selection::from_fragment(fragment, &self.store);
        if target != self.current {
            self.enter(target);
        }
    }

    /// Apply the full side-effect bundle for a state. Idempotent, so
    /// re-entering the current state is safe.
    fn enter(&mut self, target: Selection) {
        self.current = target.clone();

        self.renderer.write_location(target.as_fragment());
        self.renderer.render_list(&target);

        let detail = match &target {
            Selection::All => None,
            Selection::Route(id) => self.store.get(id).map(|r| RouteDetail {
                name: r.name.clone(),
                distance: r.distance,
                elevation_gain: r.elevation_gain,
                filename: r.filename.clone(),
            }),
        };
        self.renderer.render_detail_panel(detail.as_ref());

        let styles = layers::layer_styles(&self.store, &target);
        let fit = match &target {
            Selection::All => self.store.union_bounds(),
            Selection::Route(id) => self.store.get(id).map(|r| r.bounds),
        };
        if let Some(fit) = fit {
            self.renderer.render_map_styling(&styles, &fit, FIT_PADDING);
        }
    }
}
