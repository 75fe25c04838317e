//! Method-name to service-path resolution.
//!
//! The Remote API addresses procedures as `group/operation`. Callers use the
//! flattened form (`core_search_items`) and resolution turns it back into the
//! slash form by replacing only the first underscore. One name is special:
//! `unit_group_update_units` keeps its underscore suffix and is looked up
//! literally, because the general rule would split it as
//! `unit/group_update_units`.

/// Resolve a flattened method name into its remote service path.
///
/// Pure and total over any input string; a name without an underscore is
/// returned unchanged.
///
/// ```
/// use wialon_core::svc::resolve_service;
///
/// assert_eq!(resolve_service("core_search_items"), "core/search_items");
/// assert_eq!(resolve_service("unit_group_update_units"), "unit_group/update_units");
/// ```
pub fn resolve_service(method: &str) -> String {
    if method == "unit_group_update_units" {
        return "unit_group/update_units".to_owned();
    }

    method.replacen('_', "/", 1)
}
