//! Integration tests for share grant management.

mod helpers;

use drivebox_core::error::ErrorKind;
use drivebox_entity::resource::ResourceType;
use drivebox_entity::share::ShareRole;
use drivebox_service::share::service::InviteRequest;

use helpers::{TestApp, actor, seed_file, seed_folder};

fn invite_req(resource_id: uuid::Uuid, email: &str, role: ShareRole) -> InviteRequest {
    InviteRequest {
        resource_id,
        resource_type: ResourceType::File,
        grantee_email: email.to_string(),
        role,
    }
}

#[tokio::test]
async fn test_duplicate_invite_is_a_conflict_and_grant_count_stays_one() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");

    let file = seed_file(&app, &alice, "a.txt", None).await;

    app.shares
        .invite(&alice, invite_req(file.id.into_uuid(), "bob@example.com", ShareRole::Viewer))
        .await
        .unwrap();

    let err = app
        .shares
        .invite(&alice, invite_req(file.id.into_uuid(), "bob@example.com", ShareRole::Editor))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let grants = app
        .shares
        .list_by_resource(&alice, file.id.into_uuid())
        .await
        .unwrap();
    assert_eq!(grants.len(), 1);
    // The first grant survived untouched — no overwrite.
    assert_eq!(grants[0].role, ShareRole::Viewer);
}

#[tokio::test]
async fn test_only_the_owner_can_invite() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");
    let bob = actor("bob@example.com");

    let file = seed_file(&app, &alice, "a.txt", None).await;
    app.shares
        .invite(&alice, invite_req(file.id.into_uuid(), &bob.email, ShareRole::Editor))
        .await
        .unwrap();

    // Even an editor cannot re-share.
    let err = app
        .shares
        .invite(&bob, invite_req(file.id.into_uuid(), "carol@example.com", ShareRole::Viewer))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccessDenied);
}

#[tokio::test]
async fn test_revoke_cuts_access_and_is_owner_gated() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");
    let bob = actor("bob@example.com");

    let file = seed_file(&app, &alice, "x.png", None).await;
    let grant = app
        .shares
        .invite(&alice, invite_req(file.id.into_uuid(), &bob.email, ShareRole::Viewer))
        .await
        .unwrap();

    let err = app.shares.revoke(&bob, grant.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccessDenied);

    app.shares.revoke(&alice, grant.id).await.unwrap();

    let err = app.mediator.mediate(&file, &bob).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccessDenied);

    let err = app.shares.revoke(&alice, grant.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_change_role_widens_capability() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");
    let bob = actor("bob@example.com");

    let file = seed_file(&app, &alice, "draft.md", None).await;
    let grant = app
        .shares
        .invite(&alice, invite_req(file.id.into_uuid(), &bob.email, ShareRole::Viewer))
        .await
        .unwrap();

    assert!(app.files.rename_file(&bob, file.id, "v2.md").await.is_err());

    let updated = app
        .shares
        .change_role(&alice, grant.id, ShareRole::Editor)
        .await
        .unwrap();
    assert_eq!(updated.role, ShareRole::Editor);

    app.files.rename_file(&bob, file.id, "v2.md").await.unwrap();
}

#[tokio::test]
async fn test_shared_with_me_lists_live_resources_with_roles_and_urls() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");
    let bob = actor("bob@example.com");

    let folder = seed_folder(&app, &alice, "shared-folder", None).await;
    let file = seed_file(&app, &alice, "x.png", None).await;
    let trashed = seed_file(&app, &alice, "gone.txt", None).await;

    app.shares
        .invite(
            &alice,
            InviteRequest {
                resource_id: folder.id.into_uuid(),
                resource_type: ResourceType::Folder,
                grantee_email: bob.email.clone(),
                role: ShareRole::Editor,
            },
        )
        .await
        .unwrap();
    app.shares
        .invite(&alice, invite_req(file.id.into_uuid(), &bob.email, ShareRole::Viewer))
        .await
        .unwrap();
    app.shares
        .invite(&alice, invite_req(trashed.id.into_uuid(), &bob.email, ShareRole::Viewer))
        .await
        .unwrap();

    app.lifecycle
        .soft_delete(ResourceType::File, trashed.id.into_uuid(), &alice)
        .await
        .unwrap();

    let listing = app.shares.shared_with_me(&bob).await.unwrap();

    assert_eq!(listing.folders.len(), 1);
    assert_eq!(listing.folders[0].folder.id, folder.id);
    assert_eq!(listing.folders[0].role, ShareRole::Editor);

    // The trashed file is hidden from the grantee's view too.
    assert_eq!(listing.files.len(), 1);
    assert_eq!(listing.files[0].file.id, file.id);
    assert_eq!(listing.files[0].role, ShareRole::Viewer);
    assert!(listing.files[0].public_url.as_deref().unwrap().contains("token="));
}

#[tokio::test]
async fn test_list_by_resource_is_owner_gated() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");
    let bob = actor("bob@example.com");

    let file = seed_file(&app, &alice, "a.txt", None).await;
    app.shares
        .invite(&alice, invite_req(file.id.into_uuid(), &bob.email, ShareRole::Viewer))
        .await
        .unwrap();

    let err = app
        .shares
        .list_by_resource(&bob, file.id.into_uuid())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccessDenied);
}

#[tokio::test]
async fn test_invite_on_missing_resource_is_not_found() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");

    let err = app
        .shares
        .invite(&alice, invite_req(uuid::Uuid::new_v4(), "bob@example.com", ShareRole::Viewer))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}
