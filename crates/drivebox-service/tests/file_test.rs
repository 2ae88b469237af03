//! Integration tests for file and folder operations.

mod helpers;

use drivebox_core::error::ErrorKind;
use drivebox_core::types::ListFilter;
use drivebox_entity::resource::ResourceType;
use drivebox_entity::share::ShareRole;
use drivebox_service::file::service::UploadCompleteRequest;
use drivebox_service::folder::service::CreateFolderRequest;
use drivebox_service::share::service::InviteRequest;

use helpers::{TestApp, actor, seed_file, seed_folder};

#[tokio::test]
async fn test_copy_file_resets_flags_and_copies_the_blob() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");

    let docs = seed_folder(&app, &alice, "docs", None).await;
    let mut original = seed_file(&app, &alice, "a.txt", Some(docs.id)).await;
    original = app.files.toggle_star(&alice, original.id, true).await.unwrap();

    let copy = app.files.copy_file(&alice, original.id).await.unwrap();

    assert_eq!(copy.name, "a (Copy).txt");
    assert_eq!(copy.folder_id, original.folder_id);
    assert!(!copy.is_starred);
    assert!(!copy.is_deleted);
    assert_ne!(copy.storage_key, original.storage_key);
    assert!(app.blob_store.exists(&copy.storage_key).await.unwrap());
    assert!(app.blob_store.exists(&original.storage_key).await.unwrap());
}

#[tokio::test]
async fn test_copy_file_is_owner_only() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");
    let bob = actor("bob@example.com");

    let file = seed_file(&app, &alice, "a.txt", None).await;
    app.shares
        .invite(
            &alice,
            InviteRequest {
                resource_id: file.id.into_uuid(),
                resource_type: ResourceType::File,
                grantee_email: bob.email.clone(),
                role: ShareRole::Editor,
            },
        )
        .await
        .unwrap();

    let err = app.files.copy_file(&bob, file.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccessDenied);
}

#[tokio::test]
async fn test_move_file_validates_the_destination() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");
    let eve = actor("eve@example.com");

    let file = seed_file(&app, &alice, "a.txt", None).await;
    let theirs = seed_folder(&app, &eve, "theirs", None).await;
    let trashed = seed_folder(&app, &alice, "old", None).await;
    app.lifecycle
        .soft_delete(ResourceType::Folder, trashed.id.into_uuid(), &alice)
        .await
        .unwrap();

    let err = app
        .files
        .move_file(&alice, file.id, Some(theirs.id))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccessDenied);

    let err = app
        .files
        .move_file(&alice, file.id, Some(trashed.id))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccessDenied);

    let docs = seed_folder(&app, &alice, "docs", None).await;
    let moved = app
        .files
        .move_file(&alice, file.id, Some(docs.id))
        .await
        .unwrap();
    assert_eq!(moved.folder_id, Some(docs.id));

    // Back to the root.
    let moved = app.files.move_file(&alice, file.id, None).await.unwrap();
    assert_eq!(moved.folder_id, None);
}

#[tokio::test]
async fn test_move_folder_rejects_its_own_subtree() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");

    let a = seed_folder(&app, &alice, "a", None).await;
    let b = seed_folder(&app, &alice, "b", Some(a.id)).await;
    let c = seed_folder(&app, &alice, "c", Some(b.id)).await;

    let err = app
        .folders
        .move_folder(&alice, a.id, Some(c.id))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = app
        .folders
        .move_folder(&alice, a.id, Some(a.id))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    // A sibling destination is fine.
    let d = seed_folder(&app, &alice, "d", None).await;
    let moved = app.folders.move_folder(&alice, b.id, Some(d.id)).await.unwrap();
    assert_eq!(moved.parent_id, Some(d.id));
}

#[tokio::test]
async fn test_toggle_star_is_owner_scoped() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");
    let mallory = actor("mallory@example.com");

    let file = seed_file(&app, &alice, "a.txt", None).await;

    let starred = app.files.toggle_star(&alice, file.id, true).await.unwrap();
    assert!(starred.is_starred);

    // Not the owner's row, not visible: plain NotFound, as for any
    // owner-filtered lookup.
    let err = app
        .files
        .toggle_star(&mallory, file.id, false)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_rename_rejects_empty_names() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");

    let file = seed_file(&app, &alice, "a.txt", None).await;
    let folder = seed_folder(&app, &alice, "docs", None).await;

    let err = app.files.rename_file(&alice, file.id, "  ").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = app
        .folders
        .rename_folder(&alice, folder.id, "")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_create_folder_rejects_foreign_or_missing_parent() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");
    let eve = actor("eve@example.com");

    let theirs = seed_folder(&app, &eve, "theirs", None).await;

    let err = app
        .folders
        .create_folder(
            &alice,
            CreateFolderRequest {
                name: "inside".to_string(),
                parent_id: Some(theirs.id),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccessDenied);

    let err = app
        .folders
        .create_folder(
            &alice,
            CreateFolderRequest {
                name: "orphan".to_string(),
                parent_id: Some(drivebox_core::types::FolderId::new()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AccessDenied);
}

#[tokio::test]
async fn test_upload_complete_validates_input_and_folder() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");
    let eve = actor("eve@example.com");

    let theirs = seed_folder(&app, &eve, "theirs", None).await;

    let base = UploadCompleteRequest {
        name: "a.txt".to_string(),
        storage_key: "k".to_string(),
        mime_type: None,
        size_bytes: 1,
        folder_id: None,
    };

    let err = app
        .files
        .upload_complete(&alice, UploadCompleteRequest { name: " ".to_string(), ..base.clone() })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = app
        .files
        .upload_complete(&alice, UploadCompleteRequest { size_bytes: -1, ..base.clone() })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = app
        .files
        .upload_complete(
            &alice,
            UploadCompleteRequest {
                folder_id: Some(theirs.id),
                ..base.clone()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    app.files.upload_complete(&alice, base).await.unwrap();
}

#[tokio::test]
async fn test_list_resources_views() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");

    let docs = seed_folder(&app, &alice, "docs", None).await;
    let root_file = seed_file(&app, &alice, "root.txt", None).await;
    let inner_file = seed_file(&app, &alice, "inner.txt", Some(docs.id)).await;
    app.files.toggle_star(&alice, root_file.id, true).await.unwrap();
    app.lifecycle
        .soft_delete(ResourceType::File, inner_file.id.into_uuid(), &alice)
        .await
        .unwrap();

    let root = app
        .files
        .list_resources(&alice, None, ListFilter::Active)
        .await
        .unwrap();
    assert_eq!(root.folders.len(), 1);
    assert_eq!(root.files.len(), 1);
    assert_eq!(root.files[0].file.name, "root.txt");
    assert!(root.files[0].public_url.as_deref().unwrap().contains("token="));

    let starred = app
        .files
        .list_resources(&alice, None, ListFilter::Starred)
        .await
        .unwrap();
    assert_eq!(starred.files.len(), 1);
    assert_eq!(starred.files[0].file.id, root_file.id);

    let trash = app
        .files
        .list_resources(&alice, None, ListFilter::Trash)
        .await
        .unwrap();
    assert_eq!(trash.files.len(), 1);
    assert_eq!(trash.files[0].file.id, inner_file.id);
}

#[tokio::test]
async fn test_search_caps_results_and_requires_two_chars() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");

    for i in 0..12 {
        seed_file(&app, &alice, &format!("note-{i:02}.txt"), None).await;
    }
    seed_folder(&app, &alice, "Notebook", None).await;

    let short = app.files.search(&alice, "n").await.unwrap();
    assert!(short.files.is_empty() && short.folders.is_empty());

    let hits = app.files.search(&alice, "NOTE").await.unwrap();
    assert_eq!(hits.files.len(), 10);
    assert_eq!(hits.folders.len(), 1);
}

#[tokio::test]
async fn test_ancestor_path_and_broken_chain() {
    let app = TestApp::new();
    let alice = actor("alice@example.com");

    let a = seed_folder(&app, &alice, "a", None).await;
    let b = seed_folder(&app, &alice, "b", Some(a.id)).await;
    let c = seed_folder(&app, &alice, "c", Some(b.id)).await;

    let path = app.folders.ancestor_path(c.id).await.unwrap();
    let names: Vec<&str> = path.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);

    assert!(app.folders.ancestor_path(a.id).await.unwrap().is_empty());

    // Remove the middle of the chain behind the service's back.
    app.folder_repo.delete(b.id).await.unwrap();
    let err = app.folders.ancestor_path(c.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}
