//! The process-wide class registry.
//!
//! Class registration compiles a client type's schema into its attribute
//! table exactly once per process; every wrapper instance of that type
//! shares the resulting [`ClassInfo`] through an `Arc`. The registry is
//! keyed by `TypeId`, lives for the life of the process, and entries are
//! never removed - matching host object systems, where a class outlives
//! all of its instances.
//!
//! Registration is first-wins: registering the same client type again
//! returns the existing entry untouched, whatever name or flags the
//! second call carried.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::Lazy;
use tether_core::{Client, ConfigError};

use crate::bridge::AttributeSet;
use crate::capability::CapabilityFlags;

/// Per-type registration record shared by all instances.
#[derive(Debug)]
pub struct ClassInfo {
    /// Host-visible class name.
    pub class_name: &'static str,
    /// Compiled attribute table.
    pub attributes: AttributeSet,
    /// Execution models attached at registration.
    pub capabilities: CapabilityFlags,
}

static REGISTRY: Lazy<Mutex<HashMap<TypeId, Arc<ClassInfo>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Register a client type, or fetch its existing registration.
///
/// Fails if no capability is attached, or if the type's schema declares a
/// parameter kind the attribute bridge cannot carry. Both are
/// configuration errors: they fire at registration, never at message time.
pub fn register_class<C: Client>(
    class_name: &'static str,
    capabilities: CapabilityFlags,
) -> Result<Arc<ClassInfo>, ConfigError> {
    if capabilities.is_empty() {
        return Err(ConfigError::NoCapability(class_name.to_string()));
    }

    let mut map = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(info) = map.get(&TypeId::of::<C>()) {
        return Ok(Arc::clone(info));
    }

    // one throwaway instance to reach the type's schema
    let probe = C::default();
    let attributes = AttributeSet::build(probe.schema())?;
    log::debug!(
        "registered class '{class_name}' ({} attributes)",
        attributes.len()
    );

    let info = Arc::new(ClassInfo {
        class_name,
        attributes,
        capabilities,
    });
    map.insert(TypeId::of::<C>(), Arc::clone(&info));
    Ok(info)
}

/// Existing registration for a client type, if any.
pub fn lookup<C: Client>() -> Option<Arc<ClassInfo>> {
    REGISTRY
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&TypeId::of::<C>())
        .cloned()
}
