//! # Hierarchy Wiring
//!
//! Links every hosted backend to the backend of its dominant chain when
//! both run on this node:
//!
//! ```text
//! Prime ◀──parent── Region r ◀──parent── Zone (r, z)
//!       ──child───▶          ──child───▶
//! ```

use qc_19_tier_routing::{BackendRegistry, RoutingError};
use tracing::{debug, info};

/// Wire parent/child links between hosted tiers. Returns the number of
/// links made.
pub fn wire_hierarchy(registry: &BackendRegistry) -> Result<usize, RoutingError> {
    let mut links = 0;

    for location in registry.hosted_locations() {
        let Some(dom) = location.dom() else {
            continue;
        };
        if !registry.is_hosted(&dom) {
            debug!(%location, %dom, "[node] Dominant chain not hosted locally");
            continue;
        }

        let child = registry.resolve(&location)?;
        let parent = registry.resolve(&dom)?;
        registry.set_child_backend(&dom, child, location)?;
        registry.set_parent_backend(&location, parent)?;
        links += 1;
    }

    info!(links, "[node] Tier hierarchy wired");
    Ok(links)
}
