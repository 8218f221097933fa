//! Assignment expansion against the SQLite personnel directory.

mod helpers;

use std::sync::Arc;

use uuid::Uuid;

use cadence::adapters::sqlite::SqlitePersonnelDirectory;
use cadence::{Assignment, AssigneeResolver, Personnel, PersonnelDirectory, PersonnelRole};

use helpers::database::{setup_test_db, teardown_test_db};

async fn add_person(
    directory: &SqlitePersonnelDirectory,
    org: Uuid,
    name: &str,
    role: PersonnelRole,
) -> Uuid {
    let person = Personnel::new(org, name, role);
    directory.add(&person).await.expect("failed to add personnel");
    person.id
}

#[tokio::test]
async fn specific_assignment_keeps_only_existing_personnel() {
    let pool = setup_test_db().await;
    let directory = SqlitePersonnelDirectory::new(pool.clone());
    let org = Uuid::new_v4();

    let p1 = add_person(&directory, org, "Priya", PersonnelRole::Personnel).await;
    let p2 = add_person(&directory, org, "Marco", PersonnelRole::Personnel).await;
    let ghost = Uuid::new_v4();

    let resolver = AssigneeResolver::new(Arc::new(directory));
    let resolved = resolver
        .resolve(&Assignment::Specific { personnel_ids: vec![p1, ghost, p2] }, org)
        .await
        .unwrap();

    assert_eq!(resolved, vec![p1, p2]);
    teardown_test_db(pool).await;
}

#[tokio::test]
async fn specific_assignment_deduplicates() {
    let pool = setup_test_db().await;
    let directory = SqlitePersonnelDirectory::new(pool.clone());
    let org = Uuid::new_v4();

    let p1 = add_person(&directory, org, "Priya", PersonnelRole::Personnel).await;

    let resolver = AssigneeResolver::new(Arc::new(directory));
    let resolved = resolver
        .resolve(&Assignment::Specific { personnel_ids: vec![p1, p1, p1] }, org)
        .await
        .unwrap();

    assert_eq!(resolved, vec![p1]);
    teardown_test_db(pool).await;
}

#[tokio::test]
async fn by_role_assignment_is_scoped_to_role_and_organization() {
    let pool = setup_test_db().await;
    let directory = SqlitePersonnelDirectory::new(pool.clone());
    let org = Uuid::new_v4();
    let other_org = Uuid::new_v4();

    let m1 = add_person(&directory, org, "Ana", PersonnelRole::Manager).await;
    let m2 = add_person(&directory, org, "Ben", PersonnelRole::Manager).await;
    add_person(&directory, org, "Caro", PersonnelRole::Personnel).await;
    add_person(&directory, other_org, "Dmitri", PersonnelRole::Manager).await;

    let resolver = AssigneeResolver::new(Arc::new(directory));
    let resolved = resolver
        .resolve(&Assignment::ByRole { role: PersonnelRole::Manager }, org)
        .await
        .unwrap();

    let mut resolved = resolved;
    resolved.sort();
    let mut expected = vec![m1, m2];
    expected.sort();
    assert_eq!(resolved, expected);
    teardown_test_db(pool).await;
}

#[tokio::test]
async fn by_role_assignment_with_no_holders_is_empty() {
    let pool = setup_test_db().await;
    let directory = SqlitePersonnelDirectory::new(pool.clone());
    let org = Uuid::new_v4();

    add_person(&directory, org, "Priya", PersonnelRole::Personnel).await;

    let resolver = AssigneeResolver::new(Arc::new(directory));
    let resolved = resolver
        .resolve(&Assignment::ByRole { role: PersonnelRole::Owner }, org)
        .await
        .unwrap();

    assert!(resolved.is_empty());
    teardown_test_db(pool).await;
}
