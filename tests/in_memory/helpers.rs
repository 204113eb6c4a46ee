//! Shared fixtures for in-memory integration tests.

use rstest::fixture;
use sbercollab::config::AppConfig;
use sbercollab::http::{AppState, Repositories};
use sbercollab::task::{domain::Task, services::NewTask};
use sbercollab::user::{
    domain::{Actor, Role, User},
    services::CreateMemberRequest,
};
use std::collections::HashMap;

/// Password used for every account the helpers create.
pub const PASSWORD: &str = "integration-pass";

/// Wired services together with the repositories behind them.
pub struct Platform {
    pub state: AppState,
    pub repos: Repositories,
}

/// Provides a fresh platform backed by in-memory adapters.
#[fixture]
pub fn platform() -> Platform {
    let vars = HashMap::from([(
        "SECRET_KEY".to_owned(),
        "integration-secret-key".to_owned(),
    )]);
    let config = AppConfig::from_map(&vars).expect("config should load");
    let repos = Repositories::in_memory();
    Platform {
        state: AppState::new(&config, &repos),
        repos,
    }
}

impl Platform {
    /// Creates an active account with the given role.
    pub async fn member(&self, email: &str, role: Role) -> User {
        self.state
            .accounts
            .create_member(CreateMemberRequest::new(email, "Integration User", PASSWORD, role))
            .await
            .expect("member should be created")
    }

    /// Creates an active account and returns it as an actor.
    pub async fn actor(&self, email: &str, role: Role) -> Actor {
        Actor::from(&self.member(email, role).await)
    }

    /// Publishes a listing on behalf of `manager`.
    pub async fn listing(&self, manager: Actor, draft: NewTask) -> Task {
        self.state
            .catalog
            .create(manager, draft)
            .await
            .expect("listing should be created")
    }
}
