//! User access rules: who may read which user record.

use tracing::debug;

use crate::auth::claims::Claims;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::users::{User, UserRepo};

/// Case-insensitive username equality.
///
/// Compares character by character using single-character case mappings:
/// two characters match when they are equal, when their uppercase forms are
/// equal, or when the lowercase forms of their uppercase forms are equal.
/// Mappings that expand to several characters (`ß` to `SS`) are not applied,
/// so names of different lengths never match.
pub fn same_username(a: &str, b: &str) -> bool {
    let mut left = a.chars();
    let mut right = b.chars();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if chars_match(x, y) => {}
            _ => return false,
        }
    }
}

fn chars_match(x: char, y: char) -> bool {
    if x == y {
        return true;
    }
    let (ux, uy) = (simple_upper(x), simple_upper(y));
    ux == uy || simple_lower(ux) == simple_lower(uy)
}

fn simple_upper(c: char) -> char {
    let mut mapped = c.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

// `İ` lowercases to `i` plus a combining dot; the base letter is its simple mapping.
fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Only the owner of a record may read it.
pub fn authorize_owner(claims: &Claims, requested: &str) -> Result<(), AppError> {
    if same_username(&claims.username, requested) {
        Ok(())
    } else {
        security::access_denied(&claims.username, requested);
        Err(AppError::forbidden())
    }
}

/// Every stored user. Any authenticated caller may list.
pub async fn list_users(repo: &dyn UserRepo) -> Result<Vec<User>, AppError> {
    Ok(repo.find_all().await?)
}

/// The caller's own record. Storage is not consulted when the caller asks for
/// someone else's.
pub async fn get_user(
    repo: &dyn UserRepo,
    claims: &Claims,
    requested: &str,
) -> Result<User, AppError> {
    authorize_owner(claims, requested)?;

    debug!(requested = %Redacted(requested), "loading user record");

    repo.find_by_username(requested).await?.ok_or_else(|| {
        AppError::from(DomainError::not_found(
            NotFoundKind::User,
            format!("User '{requested}' not found"),
        ))
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::errors::ErrorCode;
    use crate::test_support::InMemoryUserRepo;

    fn admin() -> User {
        User::new("admin").with_name("Foo", "Bar").with_role("ADMIN")
    }

    #[test]
    fn test_same_username_folds_case() {
        assert!(same_username("admin", "ADMIN"));
        assert!(same_username("JohnD", "johnd"));
        assert!(same_username("Élodie", "élodie"));
        assert!(!same_username("admin", "admin2"));
        assert!(!same_username("admin", ""));
    }

    #[test]
    fn test_same_username_uses_single_character_mappings() {
        // Dotless and dotted i fold onto the ASCII letters.
        assert!(same_username("ı", "I"));
        assert!(same_username("admın", "ADMIN"));
        assert!(same_username("İ", "i"));
        assert!(same_username("ß", "ẞ"));
        // Expanding mappings never apply.
        assert!(!same_username("straße", "STRASSE"));
        assert!(!same_username("ß", "ss"));
    }

    #[test]
    fn test_authorize_owner_rejects_other_users() {
        let err = authorize_owner(&Claims::new("johnd"), "admin").unwrap_err();

        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn test_get_user_returns_own_record() {
        let repo = InMemoryUserRepo::with_users([admin()]);

        let user = get_user(&repo, &Claims::new("admin"), "admin").await.unwrap();

        assert_eq!(user, admin());
    }

    #[tokio::test]
    async fn test_get_user_case_insensitive_identity() {
        let repo = InMemoryUserRepo::with_users([admin()]);

        let user = get_user(&repo, &Claims::new("Admin"), "admin").await.unwrap();

        assert_eq!(user.username, "admin");
    }

    #[tokio::test]
    async fn test_get_user_denied_without_storage_call() {
        let repo = InMemoryUserRepo::with_users([admin()]);

        let err = get_user(&repo, &Claims::new("johnd"), "admin").await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let repo = InMemoryUserRepo::default();

        let err = get_user(&repo, &Claims::new("ghost"), "ghost").await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn test_storage_failure_is_unavailable() {
        let repo = InMemoryUserRepo::unavailable();

        let err = get_user(&repo, &Claims::new("admin"), "admin").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::DbUnavailable);

        let err = list_users(&repo).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::DbUnavailable);
    }

    #[tokio::test]
    async fn test_list_users_is_unrestricted() {
        let repo = InMemoryUserRepo::with_users([admin(), User::new("johnd")]);

        let users = list_users(&repo).await.unwrap();

        assert_eq!(users.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_owner_matches_any_casing(name in "[A-Za-z0-9_.-]{1,24}") {
            prop_assert!(authorize_owner(&Claims::new(name.to_uppercase()), &name).is_ok());
            prop_assert!(authorize_owner(&Claims::new(name.to_lowercase()), &name).is_ok());
        }

        #[test]
        fn prop_authorization_is_repeatable(
            subject in "[a-z]{1,12}",
            requested in "[a-z]{1,12}",
        ) {
            let first = authorize_owner(&Claims::new(subject.clone()), &requested).is_ok();
            let second = authorize_owner(&Claims::new(subject.clone()), &requested).is_ok();

            prop_assert_eq!(first, second);
            prop_assert_eq!(first, subject == requested);
        }
    }
}
