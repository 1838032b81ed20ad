//! Declarative view-refresh dispatch.
//!
//! Instead of scattering render calls after every mutation, the application
//! registers each view section once with the set of kinds it displays. The
//! sync client then fires bindings generically: all of them after a full
//! refresh, and exactly the dependent ones after a single-kind mutation.
//! Cross-cutting aggregates (donation/expense totals, the recent-activity
//! feed) are ordinary bindings that depend on their source kind.

use crate::mirror::Mirror;
use crate::model::EntityKind;

type Refresh = Box<dyn Fn(&Mirror) + Send + Sync>;

struct ViewBinding {
    name: String,
    kinds: Vec<EntityKind>,
    refresh: Refresh,
}

#[derive(Default)]
pub struct ViewRegistry {
    bindings: Vec<ViewBinding>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        ViewRegistry::default()
    }

    /// Register a view section. `kinds` is the set of entity kinds whose
    /// mutations must refresh it.
    pub fn bind(
        &mut self,
        name: impl Into<String>,
        kinds: &[EntityKind],
        refresh: impl Fn(&Mirror) + Send + Sync + 'static,
    ) {
        self.bindings.push(ViewBinding {
            name: name.into(),
            kinds: kinds.to_vec(),
            refresh: Box::new(refresh),
        });
    }

    /// Fire every binding (full render pass after a refresh).
    pub fn fire_all(&self, mirror: &Mirror) {
        for binding in &self.bindings {
            log::debug!("refreshing view {}", binding.name);
            (binding.refresh)(mirror);
        }
    }

    /// Fire only the bindings that display `kind`.
    pub fn fire_for(&self, kind: EntityKind, mirror: &Mirror) {
        for binding in self.bindings.iter().filter(|b| b.kinds.contains(&kind)) {
            log::debug!("refreshing view {} after {} change", binding.name, kind);
            (binding.refresh)(mirror);
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counter_binding(
        registry: &mut ViewRegistry,
        name: &str,
        kinds: &[EntityKind],
    ) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = count.clone();
        registry.bind(name, kinds, move |_| {
            handle.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[test]
    fn test_fire_for_hits_only_dependent_bindings() {
        let mut registry = ViewRegistry::new();
        let members = counter_binding(&mut registry, "members", &[EntityKind::Member]);
        let donations = counter_binding(&mut registry, "donations", &[EntityKind::Donation]);
        let dashboard = counter_binding(
            &mut registry,
            "dashboard",
            &[EntityKind::Member, EntityKind::Donation],
        );

        let mirror = Mirror::new();
        registry.fire_for(EntityKind::Member, &mirror);

        assert_eq!(members.load(Ordering::SeqCst), 1);
        assert_eq!(donations.load(Ordering::SeqCst), 0);
        assert_eq!(dashboard.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fire_all_hits_everything_once() {
        let mut registry = ViewRegistry::new();
        let members = counter_binding(&mut registry, "members", &[EntityKind::Member]);
        let slideshow = counter_binding(&mut registry, "slideshow", &[EntityKind::HeroSlide]);

        let mirror = Mirror::new();
        registry.fire_all(&mirror);

        assert_eq!(members.load(Ordering::SeqCst), 1);
        assert_eq!(slideshow.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callbacks_see_the_mirror() {
        let mut registry = ViewRegistry::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let handle = seen.clone();
        registry.bind("roster", &[EntityKind::Member], move |mirror| {
            handle.store(mirror.len(EntityKind::Member), Ordering::SeqCst);
        });

        let mirror = Mirror::preloaded();
        registry.fire_for(EntityKind::Member, &mirror);
        assert_eq!(seen.load(Ordering::SeqCst), mirror.len(EntityKind::Member));
    }
}
