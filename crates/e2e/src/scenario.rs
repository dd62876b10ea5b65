//! Scenario catalogue

use futures::future::BoxFuture;

use booker_common::{Fixtures, Result};

use crate::scenarios;

/// Body of a scenario. Receives a fixture graph built for it alone.
pub type ScenarioFn = for<'a> fn(&'a Fixtures) -> BoxFuture<'a, Result<()>>;

/// A named, tagged test scenario
#[derive(Clone, Copy)]
pub struct Scenario {
    /// Unique name for this scenario
    pub name: &'static str,

    /// Human-readable description
    pub description: &'static str,

    /// Tags for filtering
    pub tags: &'static [&'static str],

    pub run: ScenarioFn,
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .finish()
    }
}

impl Scenario {
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim_start_matches('@');
        self.tags.iter().any(|t| *t == tag)
    }

    /// Filter scenarios by tag
    pub fn filter_by_tag<'a>(scenarios: &'a [Self], tag: &str) -> Vec<&'a Self> {
        scenarios.iter().filter(|s| s.has_tag(tag)).collect()
    }

    pub fn find<'a>(scenarios: &'a [Self], name: &str) -> Option<&'a Self> {
        scenarios.iter().find(|s| s.name == name)
    }
}

/// Every scenario shipped with the harness, in execution order
pub fn catalogue() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "ping-returns-created",
            description: "GET /ping returns 201 Created",
            tags: &["smoke"],
            run: scenarios::ping_returns_created,
        },
        Scenario {
            name: "auth-returns-token",
            description: "POST /auth with valid credentials returns a token",
            tags: &["auth", "smoke"],
            run: scenarios::auth_returns_token,
        },
        Scenario {
            name: "auth-wrong-password-returns-no-token",
            description: "POST /auth with a wrong password returns no token",
            tags: &["auth"],
            run: scenarios::auth_wrong_password_returns_no_token,
        },
        Scenario {
            name: "booking-lifecycle",
            description: "Create -> Get -> Update -> Patch -> Delete",
            tags: &["regression"],
            run: scenarios::booking_lifecycle,
        },
        Scenario {
            name: "booking-list-filters",
            description: "GET /booking filtered by name finds a new booking",
            tags: &["regression"],
            run: scenarios::booking_list_filters,
        },
    ]
}
