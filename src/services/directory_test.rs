use super::*;

fn draft(username: &str, role: Role, password: Option<&str>) -> UserDraft {
    UserDraft { username: username.to_owned(), role, password: password.map(str::to_owned) }
}

fn at_ms(ms: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).unwrap()
}

#[test]
fn hash_password_is_sha256_hex() {
    assert_eq!(hash_password("123456"), "8d969eef6ecad3c29a3a629280e686cf0c3f5d5a86aff3ca12020c923adc6c92");
}

#[test]
fn format_created_time_matches_seed_shape() {
    let at = OffsetDateTime::from_unix_timestamp(1_764_497_740).unwrap();
    assert_eq!(format_created_time(at), "2025-11-30 10:15:40");
}

#[test]
fn seeded_directory_lists_builtin_accounts() {
    let dir = UserDirectory::seeded();
    let users = dir.list();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "cqk");
    assert_eq!(users[0].role, Role::Admin);
    assert_eq!(users[0].created_time.as_deref(), Some("2025-11-30 10:15:40"));
    assert_eq!(users[1].username, "lyy");
    assert_eq!(users[1].role, Role::User);
    assert_eq!(users[1].created_time.as_deref(), Some("2025-11-30 10:16:04"));
}

#[test]
fn authenticate_matches_seed_credentials() {
    let dir = UserDirectory::seeded();
    let admin = dir.authenticate("cqk", "123456").unwrap();
    assert_eq!(admin.id, 1);
    assert!(admin.is_admin());
    assert!(admin.created_time.is_none());

    let user = dir.authenticate("lyy", "123456").unwrap();
    assert_eq!(user.id, 2);
    assert!(!user.is_admin());
}

#[test]
fn authenticate_rejects_wrong_password_and_unknown_user() {
    let dir = UserDirectory::seeded();
    assert_eq!(dir.authenticate("cqk", "wrong"), Err(DirectoryError::InvalidCredentials));
    assert_eq!(dir.authenticate("x", "y"), Err(DirectoryError::InvalidCredentials));
}

#[test]
fn add_assigns_clock_id_and_stamp() {
    let mut dir = UserDirectory::seeded();
    let user = dir.add(draft(" zoe ", Role::User, Some("pw")), at_ms(1_764_497_740_123)).unwrap();
    assert_eq!(user.id, 1_764_497_740_123);
    assert_eq!(user.username, "zoe");
    assert_eq!(user.created_time.as_deref(), Some("2025-11-30 10:15:40"));
    assert_eq!(dir.list().len(), 3);
    assert_eq!(dir.authenticate("zoe", "pw").unwrap().id, user.id);
}

#[test]
fn add_bumps_colliding_ids() {
    let mut dir = UserDirectory::seeded();
    let first = dir.add(draft("a", Role::User, Some("pw")), at_ms(5_000)).unwrap();
    let second = dir.add(draft("b", Role::User, Some("pw")), at_ms(5_000)).unwrap();
    let third = dir.add(draft("c", Role::User, Some("pw")), at_ms(10)).unwrap();
    assert_eq!(first.id, 5_000);
    assert_eq!(second.id, 5_001);
    assert_eq!(third.id, 5_002);
}

#[test]
fn add_rejects_duplicate_and_empty_usernames() {
    let mut dir = UserDirectory::seeded();
    assert_eq!(
        dir.add(draft("cqk", Role::User, Some("pw")), at_ms(1)),
        Err(DirectoryError::DuplicateUsername("cqk".to_owned()))
    );
    assert_eq!(dir.add(draft("  ", Role::User, Some("pw")), at_ms(1)), Err(DirectoryError::EmptyUsername));
    assert_eq!(dir.list().len(), 2);
}

#[test]
fn add_rejects_missing_or_empty_password() {
    let mut dir = UserDirectory::seeded();
    assert_eq!(dir.add(draft("eve", Role::Admin, None), at_ms(9_000)), Err(DirectoryError::MissingPassword));
    assert_eq!(dir.add(draft("eve", Role::Admin, Some("")), at_ms(9_000)), Err(DirectoryError::MissingPassword));
    assert_eq!(dir.authenticate("eve", ""), Err(DirectoryError::InvalidCredentials));
    assert_eq!(dir.list().len(), 2);
}

#[test]
fn update_with_empty_password_keeps_credentials() {
    let mut dir = UserDirectory::seeded();
    dir.update(2, draft("lyy", Role::User, Some(""))).unwrap();
    assert!(dir.authenticate("lyy", "").is_err());
    assert!(dir.authenticate("lyy", "123456").is_ok());
}

#[test]
fn update_changes_fields_and_keeps_created_time() {
    let mut dir = UserDirectory::seeded();
    let updated = dir.update(2, draft("lyy2", Role::Admin, None)).unwrap();
    assert_eq!(updated.username, "lyy2");
    assert_eq!(updated.role, Role::Admin);
    assert_eq!(updated.created_time.as_deref(), Some("2025-11-30 10:16:04"));
    // Password unchanged when the draft omits it.
    assert!(dir.authenticate("lyy2", "123456").is_ok());
}

#[test]
fn update_with_password_rotates_credentials() {
    let mut dir = UserDirectory::seeded();
    dir.update(2, draft("lyy", Role::User, Some("new-secret"))).unwrap();
    assert!(dir.authenticate("lyy", "123456").is_err());
    assert!(dir.authenticate("lyy", "new-secret").is_ok());
}

#[test]
fn update_may_keep_own_username() {
    let mut dir = UserDirectory::seeded();
    assert!(dir.update(1, draft("cqk", Role::Admin, None)).is_ok());
}

#[test]
fn update_rejects_taking_another_username() {
    let mut dir = UserDirectory::seeded();
    assert_eq!(
        dir.update(2, draft("cqk", Role::User, None)),
        Err(DirectoryError::DuplicateUsername("cqk".to_owned()))
    );
}

#[test]
fn update_missing_user_is_not_found() {
    let mut dir = UserDirectory::seeded();
    assert_eq!(dir.update(99, draft("cqk", Role::User, None)), Err(DirectoryError::NotFound(99)));
}

#[test]
fn delete_removes_account() {
    let mut dir = UserDirectory::seeded();
    let removed = dir.delete(2).unwrap();
    assert_eq!(removed.username, "lyy");
    assert!(dir.get(2).is_none());
    assert_eq!(dir.list().len(), 1);
    assert_eq!(dir.delete(2), Err(DirectoryError::NotFound(2)));
}
