//! Built-in default records.
//!
//! A fresh deployment starts with an empty store; these records are what
//! [`SyncClient::seed_if_empty`](crate::SyncClient::seed_if_empty) pushes
//! serially on first startup, and what [`Mirror::preloaded`](crate::Mirror::preloaded)
//! shows before the first fetch. None of them carry an `_id`; the store
//! assigns identifiers on creation.

use serde_json::json;

use crate::model::{Document, EntityKind};

/// The default records for one kind, in creation order.
pub fn defaults(kind: EntityKind) -> Vec<Document> {
    let values = match kind {
        EntityKind::HeroSlide => vec![
            json!({
                "title": "Welcome to Our Community",
                "subtitle": "Together we grow",
                "description": "A small organization of neighbors helping neighbors.",
                "backgroundImage": "images/hero-community.jpg",
                "ctaText": "Join Us",
                "ctaLink": "#members",
                "openNewTab": false,
            }),
            json!({
                "title": "Monthly Charity Drive",
                "subtitle": "Every contribution counts",
                "description": "Support the winter relief fund before the end of the month.",
                "backgroundImage": "images/hero-charity.jpg",
                "ctaText": "Donate",
                "ctaLink": "#donations",
                "openNewTab": false,
            }),
        ],
        EntityKind::Activity => vec![
            json!({
                "title": "Neighborhood Cleanup",
                "date": "2024-03-09",
                "time": "09:00",
                "description": "Meet at the community center with gloves and bags.",
                "status": "upcoming",
                "type": "volunteering",
                "priority": "high",
                "openNewTab": false,
            }),
            json!({
                "title": "Annual General Meeting",
                "date": "2024-04-20",
                "time": "18:30",
                "description": "Budget review and committee elections.",
                "status": "planned",
                "type": "meeting",
                "priority": "medium",
                "openNewTab": false,
            }),
        ],
        EntityKind::Member => vec![
            json!({
                "name": "Amina Rahman",
                "contact": "amina@example.org",
                "phone": "555-0101",
                "joinDate": "2021-06-12",
                "role": "President",
            }),
            json!({
                "name": "Jamal Uddin",
                "contact": "jamal@example.org",
                "phone": "555-0102",
                "joinDate": "2022-01-30",
                "role": "Treasurer",
            }),
        ],
        EntityKind::Donation => vec![json!({
            "donor": "Anonymous",
            "amount": 100.0,
            "date": "2024-01-15",
            "purpose": "Winter relief fund",
            "status": "received",
        })],
        EntityKind::Expense => vec![json!({
            "title": "Community hall rent",
            "amount": 60.0,
            "date": "2024-01-31",
            "category": "facilities",
            "description": "January meeting space.",
        })],
        EntityKind::Experience => vec![json!({
            "title": "Why I volunteer",
            "date": "2024-02-02",
            "author": "Amina Rahman",
            "content": "What started as a weekend habit became the best part of my week.",
        })],
        EntityKind::WeeklyFee => vec![json!({
            "memberName": "Jamal Uddin",
            "amount": 5.0,
            "dueDate": "2024-03-01",
            "status": "due",
        })],
    };
    values.into_iter().map(Document::new).collect()
}
