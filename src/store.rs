use crate::document;
use crate::error::RouteMapError;
use crate::metrics::Bounds;
use crate::route::Route;

/// The loaded route collection. Read-only for the session once built.
#[derive(Debug)]
pub struct RouteStore {
    routes: Vec<Route>,
}

impl RouteStore {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Load from the persisted route document.
    pub fn from_json(json: &str) -> Result<Self, RouteMapError> {
        Ok(Self::new(document::from_json(json)?))
    }

    /// Routes in document order (the final sort order).
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn get(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Union of all route bounds, for the "every route" viewport.
    pub fn union_bounds(&self) -> Option<Bounds> {
        self.routes
            .iter()
            .map(|r| r.bounds)
            .reduce(|a, b| a.union(&b))
    }
}
