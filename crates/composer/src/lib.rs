//! # AI Oversight Composer
//!
//! Turns raw static documents into the view-model each route consumes.
//!
//! ```text
//! RouteSpec ──► fetch_all ──► ResourceBag ──► ParsedBag ──► compose ──► ViewModel
//!   (static)     (parallel)     (raw text)      (JSON)       (pure)
//! ```
//!
//! Every step is all-or-nothing: a single failed fetch, unparsable body or
//! missing property fails the whole route load.
//!
//! `flatten_categories` ships two presets. The mitigation-strategy route uses
//! `MITIGATION_STRATEGIES`; `CONTROL_SUBCATEGORIES` is for callers that hold
//! controls nested under subcategories (a `subcategories` array whose entries
//! carry `controls`) and want them flat with `categoryId`/`categoryName`.

pub mod derive;
pub mod documents;
pub mod loader;
pub mod navigation;
pub mod routes;
pub mod view_model;

#[cfg(test)]
pub(crate) mod fixtures;

pub use derive::{
    flatten_categories, reconstruct_phase_guidance, FlattenSpec, CONTROL_SUBCATEGORIES,
    MITIGATION_STRATEGIES,
};
pub use documents::ParsedBag;
pub use loader::{LoadError, RouteLoader};
pub use navigation::{NavigationToken, Navigator};
pub use routes::{route, route_names, RouteSpec, ROUTES};
pub use view_model::ViewModel;
