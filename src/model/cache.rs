//! Per-type model cache.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::DdlResult;
use crate::record::Record;

use super::{Model, builder};

/// Registry of derived models, keyed by record type.
///
/// The mutex is held across the whole lookup-or-build critical section, so
/// concurrent first requests for the same type build its model exactly
/// once; a second caller blocks until the first finishes and then receives
/// the same instance. Builds are pure CPU work, so the serialization of
/// unrelated types' first builds is acceptable.
#[derive(Debug, Default)]
pub struct ModelCache {
    inner: Mutex<HashMap<TypeId, Arc<Model>>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the model for `R`, deriving and caching it on first request.
    ///
    /// A failed build is returned to the caller and never cached, so an
    /// invalid type does not poison the cache.
    pub fn lookup_or_build<R: Record>(&self) -> DdlResult<Arc<Model>> {
        let mut items = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(model) = items.get(&TypeId::of::<R>()) {
            debug!(ty = std::any::type_name::<R>(), "model cache hit");
            return Ok(Arc::clone(model));
        }

        let model = Arc::new(builder::build::<R>()?);
        items.insert(TypeId::of::<R>(), Arc::clone(&model));
        debug!(ty = std::any::type_name::<R>(), table = %model.name, "model cached");
        Ok(model)
    }

    /// Drop every cached model, forcing re-derivation on next request.
    pub fn clear(&self) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Number of cached models.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
