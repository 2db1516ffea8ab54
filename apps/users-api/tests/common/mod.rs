#![allow(dead_code)]

use std::sync::Arc;

use users_api::test_support::{test_security, InMemoryUserRepo};
use users_api::{AppState, User};

// Logging is auto-installed for every test binary that includes this module
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub fn admin() -> User {
    User::new("admin").with_name("Foo", "Bar").with_role("ADMIN")
}

pub fn johnd() -> User {
    User::new("johnd").with_name("John", "Doe").with_role("USER")
}

/// Store seeded with `admin` and `johnd`.
pub fn seeded_repo() -> Arc<InMemoryUserRepo> {
    Arc::new(InMemoryUserRepo::with_users([admin(), johnd()]))
}

/// State over `repo` using the shared test secret. Keep the `Arc` to inspect
/// call counts afterwards.
pub fn state_with(repo: &Arc<InMemoryUserRepo>) -> AppState {
    AppState::new(repo.clone(), test_security())
}
