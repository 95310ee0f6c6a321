// Read-only jurisdiction lookup consumed by the chart use cases
use crate::domain::jurisdiction::Jurisdiction;
use std::sync::Arc;

pub trait JurisdictionDirectory: Send + Sync {
    /// Country by name, ISO code, alias or numeric id
    fn resolve(&self, name: &str) -> Option<Arc<Jurisdiction>>;

    /// Region of `parent` by name, ISO code or alias; falls back to [`JurisdictionDirectory::resolve`]
    fn region(&self, parent: &Jurisdiction, name: &str) -> Option<Arc<Jurisdiction>>;

    fn regions(&self, parent: &Jurisdiction) -> Vec<Arc<Jurisdiction>>;
}
