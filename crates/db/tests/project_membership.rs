//! Integration tests for projects, membership, and progress updates.

use atelier_db::models::project::{CreateProject, CreateProjectProgress, UpdateProject};
use atelier_db::models::user::CreateUser;
use atelier_db::repositories::{ProjectProgressRepo, ProjectRepo, UserRepo};
use sqlx::PgPool;

fn new_user(username: &str, email: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        first_name: "Pat".to_string(),
        last_name: "Member".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
    }
}

fn new_project(title: &str) -> CreateProject {
    CreateProject {
        title: title.to_string(),
        description: String::new(),
        start_date: None,
        end_date: None,
        image_path: None,
        member_ids: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Test: Creation with initial members
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_with_members(pool: PgPool) {
    let creator = UserRepo::create(&pool, &new_user("pat", "pat@example.com"))
        .await
        .unwrap();
    let mia = UserRepo::create(&pool, &new_user("mia", "mia@example.com"))
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let project = ProjectRepo::create(&mut tx, creator.id, &new_project("Mural"))
        .await
        .unwrap();
    ProjectRepo::add_members(&mut tx, project.id, &[mia.id])
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert!(!project.is_completed);
    let members = ProjectRepo::list_members(&pool, project.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, mia.id);
    assert!(ProjectRepo::is_member(&pool, project.id, mia.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: Member replacement reports only the newly added ids
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_replace_members_diff(pool: PgPool) {
    let creator = UserRepo::create(&pool, &new_user("pat", "pat@example.com"))
        .await
        .unwrap();
    let mia = UserRepo::create(&pool, &new_user("mia", "mia@example.com"))
        .await
        .unwrap();
    let noa = UserRepo::create(&pool, &new_user("noa", "noa@example.com"))
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let project = ProjectRepo::create(&mut tx, creator.id, &new_project("Mural"))
        .await
        .unwrap();
    ProjectRepo::add_members(&mut tx, project.id, &[mia.id])
        .await
        .unwrap();
    tx.commit().await.unwrap();

    // Keep mia, add noa: only noa is reported as new.
    let mut tx = pool.begin().await.unwrap();
    let added = ProjectRepo::replace_members(&mut tx, project.id, &[mia.id, noa.id])
        .await
        .unwrap();
    tx.commit().await.unwrap();
    assert_eq!(added, vec![noa.id]);

    // Drop mia entirely.
    let mut tx = pool.begin().await.unwrap();
    let added = ProjectRepo::replace_members(&mut tx, project.id, &[noa.id])
        .await
        .unwrap();
    tx.commit().await.unwrap();
    assert!(added.is_empty());
    assert!(!ProjectRepo::is_member(&pool, project.id, mia.id).await.unwrap());
    assert!(ProjectRepo::is_member(&pool, project.id, noa.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: Visibility scoping for members
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_list_for_user_scoping(pool: PgPool) {
    let pat = UserRepo::create(&pool, &new_user("pat", "pat@example.com"))
        .await
        .unwrap();
    let mia = UserRepo::create(&pool, &new_user("mia", "mia@example.com"))
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let own = ProjectRepo::create(&mut tx, pat.id, &new_project("Own"))
        .await
        .unwrap();
    let shared = ProjectRepo::create(&mut tx, mia.id, &new_project("Shared"))
        .await
        .unwrap();
    ProjectRepo::add_members(&mut tx, shared.id, &[pat.id])
        .await
        .unwrap();
    ProjectRepo::create(&mut tx, mia.id, &new_project("Private"))
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let visible = ProjectRepo::list_for_user(&pool, pat.id).await.unwrap();
    let ids: Vec<_> = visible.iter().map(|p| p.id).collect();
    assert_eq!(visible.len(), 2);
    assert!(ids.contains(&own.id));
    assert!(ids.contains(&shared.id));

    assert_eq!(ProjectRepo::count_for_user(&pool, pat.id).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Test: Completion sets the end date when absent
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_complete_sets_end_date(pool: PgPool) {
    let pat = UserRepo::create(&pool, &new_user("pat", "pat@example.com"))
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let project = ProjectRepo::create(&mut tx, pat.id, &new_project("Mural"))
        .await
        .unwrap();
    tx.commit().await.unwrap();
    assert!(project.end_date.is_none());

    let done = ProjectRepo::complete(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert!(done.is_completed);
    assert!(done.end_date.is_some());
}

// ---------------------------------------------------------------------------
// Test: Bulk delete and aggregate counts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_bulk_delete_and_counts(pool: PgPool) {
    let pat = UserRepo::create(&pool, &new_user("pat", "pat@example.com"))
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let a = ProjectRepo::create(&mut tx, pat.id, &new_project("A"))
        .await
        .unwrap();
    let b = ProjectRepo::create(&mut tx, pat.id, &new_project("B"))
        .await
        .unwrap();
    let c = ProjectRepo::create(&mut tx, pat.id, &new_project("C"))
        .await
        .unwrap();
    tx.commit().await.unwrap();
    ProjectRepo::complete(&pool, c.id).await.unwrap();

    let (total, in_progress, completed, recent) = ProjectRepo::counts(&pool).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(in_progress, 2);
    assert_eq!(completed, 1);
    assert_eq!(recent, 3);

    let removed = ProjectRepo::delete_many(&pool, &[a.id, b.id, 9999]).await.unwrap();
    assert_eq!(removed, 2);
    assert!(ProjectRepo::find_by_id(&pool, a.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: Progress history is newest first and cascades
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_progress_history(pool: PgPool) {
    let pat = UserRepo::create(&pool, &new_user("pat", "pat@example.com"))
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let project = ProjectRepo::create(&mut tx, pat.id, &new_project("Mural"))
        .await
        .unwrap();
    tx.commit().await.unwrap();

    ProjectProgressRepo::create(
        &pool,
        project.id,
        &CreateProjectProgress {
            description: "Primed the wall".to_string(),
            image_path: None,
        },
    )
    .await
    .unwrap();
    ProjectProgressRepo::create(
        &pool,
        project.id,
        &CreateProjectProgress {
            description: "First coat".to_string(),
            image_path: Some("/uploads/progress/coat.png".to_string()),
        },
    )
    .await
    .unwrap();

    let history = ProjectProgressRepo::list_for_project(&pool, project.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);

    // Scalar patch leaves the member list alone.
    let patch = UpdateProject {
        description: Some("Community mural".to_string()),
        ..Default::default()
    };
    let mut tx = pool.begin().await.unwrap();
    let updated = ProjectRepo::update(&mut tx, project.id, &patch)
        .await
        .unwrap()
        .unwrap();
    tx.commit().await.unwrap();
    assert_eq!(updated.description, "Community mural");

    ProjectRepo::delete(&pool, project.id).await.unwrap();
    assert!(ProjectProgressRepo::list_for_project(&pool, project.id)
        .await
        .unwrap()
        .is_empty());
}
