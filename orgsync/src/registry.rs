//! Collection registry: the single declarative description of the seven
//! collections.
//!
//! Each kind contributes one [`CollectionSpec`] to the global [`inventory`]
//! collection. The server router, the store's validation, the client's path
//! mapping and the seeder all drive off this registry, so per-kind wiring is
//! never hand-enumerated at a call site.

use serde_json::Value;

use crate::model::{
    Activity, Donation, EntityKind, EntityRecord, Expense, Experience, HeroSlide, Member,
    WeeklyFee,
};

/// Static description of one collection.
pub struct CollectionSpec {
    pub kind: EntityKind,
    /// Route segment under `/api/`, pluralized kebab-case.
    pub route: &'static str,
    /// Capitalized noun used in server messages ("Slide not found").
    pub label: &'static str,
    /// Lowercase noun used in client-facing notices ("Failed to save hero slide").
    pub noun: &'static str,
    /// Append-only collections expose no update or delete route.
    pub append_only: bool,
    /// Shape check + normalization: rejects wrong-typed fields, drops unknown
    /// ones, and returns the canonical field set for storage.
    pub normalize: fn(&Value) -> Result<Value, String>,
}

inventory::collect!(CollectionSpec);

/// Look up the spec for a kind.
///
/// Every kind submits a spec at link time, so the lookup is infallible.
pub fn find(kind: EntityKind) -> &'static CollectionSpec {
    inventory::iter::<CollectionSpec>
        .into_iter()
        .find(|spec| spec.kind == kind)
        .expect("collection spec registered for every entity kind")
}

/// Look up a spec by its route segment (e.g. `"hero-slides"`).
pub fn find_route(route: &str) -> Option<&'static CollectionSpec> {
    inventory::iter::<CollectionSpec>
        .into_iter()
        .find(|spec| spec.route == route)
}

fn normalize_as<T: EntityRecord>(value: &Value) -> Result<Value, String> {
    if !value.is_object() {
        return Err("payload must be a JSON object".to_string());
    }
    let record: T = serde_json::from_value(value.clone()).map_err(|err| err.to_string())?;
    serde_json::to_value(&record).map_err(|err| err.to_string())
}

inventory::submit! {
    CollectionSpec {
        kind: EntityKind::HeroSlide,
        route: "hero-slides",
        label: "Slide",
        noun: "hero slide",
        append_only: false,
        normalize: normalize_as::<HeroSlide>,
    }
}

inventory::submit! {
    CollectionSpec {
        kind: EntityKind::Activity,
        route: "activities",
        label: "Activity",
        noun: "activity",
        append_only: false,
        normalize: normalize_as::<Activity>,
    }
}

inventory::submit! {
    CollectionSpec {
        kind: EntityKind::Member,
        route: "members",
        label: "Member",
        noun: "member",
        append_only: false,
        normalize: normalize_as::<Member>,
    }
}

inventory::submit! {
    CollectionSpec {
        kind: EntityKind::Donation,
        route: "donations",
        label: "Donation",
        noun: "donation",
        append_only: true,
        normalize: normalize_as::<Donation>,
    }
}

inventory::submit! {
    CollectionSpec {
        kind: EntityKind::Expense,
        route: "expenses",
        label: "Expense",
        noun: "expense",
        append_only: true,
        normalize: normalize_as::<Expense>,
    }
}

inventory::submit! {
    CollectionSpec {
        kind: EntityKind::Experience,
        route: "experiences",
        label: "Experience",
        noun: "experience",
        append_only: true,
        normalize: normalize_as::<Experience>,
    }
}

inventory::submit! {
    CollectionSpec {
        kind: EntityKind::WeeklyFee,
        route: "weekly-fees",
        label: "Weekly fee",
        noun: "weekly fee",
        append_only: false,
        normalize: normalize_as::<WeeklyFee>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_kind_has_a_spec() {
        for kind in EntityKind::ALL {
            let spec = find(kind);
            assert_eq!(spec.kind, kind);
        }
    }

    #[test]
    fn test_routes_match_the_api_surface() {
        assert_eq!(find(EntityKind::HeroSlide).route, "hero-slides");
        assert_eq!(find(EntityKind::Activity).route, "activities");
        assert_eq!(find(EntityKind::Member).route, "members");
        assert_eq!(find(EntityKind::Donation).route, "donations");
        assert_eq!(find(EntityKind::Expense).route, "expenses");
        assert_eq!(find(EntityKind::Experience).route, "experiences");
        assert_eq!(find(EntityKind::WeeklyFee).route, "weekly-fees");
    }

    #[test]
    fn test_route_lookup() {
        assert_eq!(
            find_route("weekly-fees").map(|spec| spec.kind),
            Some(EntityKind::WeeklyFee)
        );
        assert!(find_route("weekly_fees").is_none());
        assert!(find_route("unknown").is_none());
    }

    #[test]
    fn test_only_ledger_kinds_are_append_only() {
        let append_only: Vec<EntityKind> = EntityKind::ALL
            .into_iter()
            .filter(|kind| find(*kind).append_only)
            .collect();
        assert_eq!(
            append_only,
            vec![
                EntityKind::Donation,
                EntityKind::Expense,
                EntityKind::Experience
            ]
        );
    }

    #[test]
    fn test_normalize_rejects_wrong_field_type() {
        let spec = find(EntityKind::Donation);
        let err = (spec.normalize)(&json!({"donor": "Anon", "amount": "fifty"}))
            .expect_err("string amount must fail the shape check");
        assert!(err.contains("invalid type"));
    }

    #[test]
    fn test_normalize_rejects_non_object_payload() {
        let spec = find(EntityKind::Member);
        assert!((spec.normalize)(&json!(["not", "an", "object"])).is_err());
        assert!((spec.normalize)(&json!("nope")).is_err());
    }

    #[test]
    fn test_normalize_drops_unknown_fields_and_keeps_known() {
        let spec = find(EntityKind::Member);
        let normalized = (spec.normalize)(&json!({
            "name": "A. Smith",
            "contact": "a@x.com",
            "favoriteColor": "teal",
        }))
        .unwrap();
        assert_eq!(normalized["name"], "A. Smith");
        assert_eq!(normalized["contact"], "a@x.com");
        assert!(normalized.get("favoriteColor").is_none());
    }
}
