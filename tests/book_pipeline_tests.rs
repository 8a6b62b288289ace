mod common;

use common::*;
use mockall::{predicate::*, Sequence};
use uuid::Uuid;

use archive_backend::{
    entities::book::NewBookFields,
    errors::AppError,
    render::RenderOptions,
    storage::remote::ResourceKind,
    use_cases::books::{BookHandler, NewBookInput, UpdateBookInput},
};

fn new_book_input(title: &str, cover: std::path::PathBuf, document: std::path::PathBuf) -> NewBookInput {
    NewBookInput {
        fields: NewBookFields {
            title: title.to_string(),
            description: "A test book".to_string(),
            category: "history".to_string(),
        },
        cover_path: cover,
        document_path: document,
    }
}

#[tokio::test]
async fn create_persists_one_asset_per_page_in_page_order() {
    let (test_scratch, cover_path, document_path) = scratch_with_inputs().await;

    let mut store = MockStore::new();
    store
        .expect_upload()
        .returning(|path, folder, _kind| Ok(asset_for(path, folder)));

    let mut repo = MockBookRepo::new();
    repo.expect_create_book()
        .times(1)
        .returning(|insert| Ok(book_from_insert(insert)));

    let handler = BookHandler::new(
        repo,
        store,
        FakeRenderer { pages: 3 },
        test_scratch.scratch.clone(),
        RenderOptions::default(),
    );

    let input = new_book_input("Atlas", cover_path, document_path);
    let book = handler.create_book(input).await.expect("create should succeed");

    assert_eq!(book.title, "Atlas");
    assert_eq!(book.page_urls.len(), 3);
    assert_eq!(book.page_asset_ids.len(), 3);
    assert!(!book.cover_url.is_empty());

    // ascending page order, derived from the rendered file names
    for (i, url) in book.page_urls.iter().enumerate() {
        assert!(
            url.ends_with(&format!("page-{}.jpg", i + 1)),
            "page {} out of order: {}",
            i,
            url
        );
    }
}

#[tokio::test]
async fn create_sweeps_scratch_files() {
    let (test_scratch, cover_path, document_path) = scratch_with_inputs().await;

    let mut store = MockStore::new();
    store
        .expect_upload()
        .returning(|path, folder, _kind| Ok(asset_for(path, folder)));

    let mut repo = MockBookRepo::new();
    repo.expect_create_book()
        .returning(|insert| Ok(book_from_insert(insert)));

    let handler = BookHandler::new(
        repo,
        store,
        FakeRenderer { pages: 2 },
        test_scratch.scratch.clone(),
        RenderOptions::default(),
    );

    let pages_dir = test_scratch.scratch.pages_dir_for(&document_path);
    let input = new_book_input("Sweep", cover_path.clone(), document_path.clone());
    handler.create_book(input).await.unwrap();

    assert!(!cover_path.exists(), "cover temp file should be removed");
    assert!(!document_path.exists(), "document temp file should be removed");
    assert!(!pages_dir.exists(), "pages scratch dir should be removed");
}

#[tokio::test]
async fn create_rejects_blank_fields_before_any_upload() {
    let (test_scratch, cover_path, document_path) = scratch_with_inputs().await;

    // no expectations: any store or repo call panics the test
    let store = MockStore::new();
    let repo = MockBookRepo::new();

    let handler = BookHandler::new(
        repo,
        store,
        FakeRenderer { pages: 1 },
        test_scratch.scratch.clone(),
        RenderOptions::default(),
    );

    let mut input = new_book_input("", cover_path, document_path);
    input.fields.title = String::new();

    let result = handler.create_book(input).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn renderer_failure_aborts_without_persisting() {
    let (test_scratch, cover_path, document_path) = scratch_with_inputs().await;

    let mut store = MockStore::new();
    // cover and document go up before the renderer runs; pages never do
    store
        .expect_upload()
        .times(2)
        .returning(|path, folder, _kind| Ok(asset_for(path, folder)));

    let mut repo = MockBookRepo::new();
    repo.expect_create_book().times(0);

    let handler = BookHandler::new(
        repo,
        store,
        FailingRenderer,
        test_scratch.scratch.clone(),
        RenderOptions::default(),
    );

    let input = new_book_input("Doomed", cover_path.clone(), document_path.clone());
    let result = handler.create_book(input).await;

    assert!(matches!(result, Err(AppError::Conversion(_))));
    // error paths sweep scratch too
    assert!(!cover_path.exists());
    assert!(!document_path.exists());
}

#[tokio::test]
async fn title_only_update_never_touches_the_asset_store() {
    let (test_scratch, _cover, _document) = scratch_with_inputs().await;
    let id = Uuid::new_v4();
    let existing = stored_book(&["p1", "p2"]);

    // zero store expectations: any upload or delete call fails the test
    let store = MockStore::new();

    let mut repo = MockBookRepo::new();
    let found = existing.clone();
    repo.expect_get_book_by_id()
        .with(eq(id))
        .returning(move |_| Ok(found.clone()));
    repo.expect_update_book()
        .times(1)
        .withf(|_, changes| {
            changes.title.as_deref() == Some("Renamed")
                && changes.cover.is_none()
                && changes.document.is_none()
        })
        .returning(move |_, _| {
            let mut updated = existing.clone();
            updated.title = "Renamed".into();
            Ok(updated)
        });

    let handler = BookHandler::new(
        repo,
        store,
        FakeRenderer { pages: 1 },
        test_scratch.scratch.clone(),
        RenderOptions::default(),
    );

    let input = UpdateBookInput {
        title: Some("Renamed".into()),
        ..UpdateBookInput::default()
    };

    let updated = handler.update_book(&id, input).await.unwrap();
    assert_eq!(updated.title, "Renamed");
}

#[tokio::test]
async fn cover_update_releases_only_the_old_cover_after_persisting() {
    let (test_scratch, cover_path, _document) = scratch_with_inputs().await;
    let id = Uuid::new_v4();
    let existing = stored_book(&["p1", "p2", "p3"]);

    let mut seq = Sequence::new();
    let mut store = MockStore::new();
    let mut repo = MockBookRepo::new();

    let found = existing.clone();
    repo.expect_get_book_by_id()
        .returning(move |_| Ok(found.clone()));

    store
        .expect_upload()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|_, folder, kind| folder == "books/covers" && *kind == ResourceKind::Image)
        .returning(|path, folder, _| Ok(asset_for(path, folder)));

    let persisted = existing.clone();
    repo.expect_update_book()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|_, changes| changes.cover.is_some() && changes.document.is_none())
        .returning(move |_, changes| {
            let mut updated = persisted.clone();
            let cover = changes.cover.clone().unwrap();
            updated.cover_url = cover.url;
            updated.cover_asset_id = cover.asset_id;
            Ok(updated)
        });

    // exactly one delete, for the superseded cover, after the record update
    store
        .expect_delete()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|asset_id, kind| asset_id == "books/covers/old-cover" && *kind == ResourceKind::Image)
        .returning(|_, _| Ok(()));

    let handler = BookHandler::new(
        repo,
        store,
        FakeRenderer { pages: 1 },
        test_scratch.scratch.clone(),
        RenderOptions::default(),
    );

    let input = UpdateBookInput {
        cover_path: Some(cover_path),
        ..UpdateBookInput::default()
    };

    let updated = handler.update_book(&id, input).await.unwrap();
    assert_ne!(updated.cover_asset_id, "books/covers/old-cover");
}

#[tokio::test]
async fn document_update_replaces_pages_and_releases_old_assets() {
    let (test_scratch, _cover, document_path) = scratch_with_inputs().await;
    let id = Uuid::new_v4();
    let existing = stored_book(&["p1", "p2"]);

    let mut store = MockStore::new();
    store
        .expect_upload()
        .returning(|path, folder, _| Ok(asset_for(path, folder)));
    // old document + two old pages; the new cover stays
    store
        .expect_delete()
        .times(3)
        .withf(|asset_id, _| asset_id == "books/pdf/old-doc" || asset_id.starts_with('p'))
        .returning(|_, _| Ok(()));

    let mut repo = MockBookRepo::new();
    let found = existing.clone();
    repo.expect_get_book_by_id()
        .returning(move |_| Ok(found.clone()));
    let persisted = existing.clone();
    repo.expect_update_book()
        .times(1)
        .withf(|_, changes| {
            changes
                .document
                .as_ref()
                .is_some_and(|replacement| replacement.pages.len() == 4)
        })
        .returning(move |_, changes| {
            let mut updated = persisted.clone();
            let replacement = changes.document.as_ref().unwrap();
            updated.document_url = Some(replacement.document.url.clone());
            updated.document_asset_id = Some(replacement.document.asset_id.clone());
            updated.page_urls = replacement.page_urls();
            updated.page_asset_ids = replacement.page_asset_ids();
            Ok(updated)
        });

    let handler = BookHandler::new(
        repo,
        store,
        FakeRenderer { pages: 4 },
        test_scratch.scratch.clone(),
        RenderOptions::default(),
    );

    let input = UpdateBookInput {
        document_path: Some(document_path),
        ..UpdateBookInput::default()
    };

    let updated = handler.update_book(&id, input).await.unwrap();
    assert_eq!(updated.page_urls.len(), 4);
    assert_eq!(updated.page_asset_ids.len(), 4);
}

#[tokio::test]
async fn delete_releases_every_referenced_asset() {
    let (test_scratch, _cover, _document) = scratch_with_inputs().await;
    let id = Uuid::new_v4();
    let existing = stored_book(&["p1", "p2", "p3"]);

    let mut repo = MockBookRepo::new();
    let deleted = existing.clone();
    repo.expect_delete_book()
        .with(eq(id))
        .times(1)
        .returning(move |_| Ok(deleted.clone()));

    let mut store = MockStore::new();
    // cover + document + 3 pages
    store.expect_delete().times(5).returning(|_, _| Ok(()));

    let handler = BookHandler::new(
        repo,
        store,
        FakeRenderer { pages: 1 },
        test_scratch.scratch.clone(),
        RenderOptions::default(),
    );

    handler.delete_book(&id).await.expect("delete should succeed");
}

#[tokio::test]
async fn delete_still_attempts_remaining_assets_when_one_release_fails() {
    let (test_scratch, _cover, _document) = scratch_with_inputs().await;
    let id = Uuid::new_v4();
    let existing = stored_book(&["p1", "p2", "p3"]);

    let mut repo = MockBookRepo::new();
    let deleted = existing.clone();
    repo.expect_delete_book()
        .returning(move |_| Ok(deleted.clone()));

    let mut store = MockStore::new();
    // p2 errors; the other four deletions still happen
    store
        .expect_delete()
        .times(5)
        .returning(|asset_id, _| {
            if asset_id == "p2" {
                Err(AppError::RemoteStore("delete returned 500: boom".into()))
            } else {
                Ok(())
            }
        });

    let handler = BookHandler::new(
        repo,
        store,
        FakeRenderer { pages: 1 },
        test_scratch.scratch.clone(),
        RenderOptions::default(),
    );

    // the record deletion alone decides the outcome
    handler.delete_book(&id).await.expect("delete should succeed");
}

#[tokio::test]
async fn delete_of_missing_record_is_not_found_with_no_store_calls() {
    let (test_scratch, _cover, _document) = scratch_with_inputs().await;
    let id = Uuid::new_v4();

    let mut repo = MockBookRepo::new();
    repo.expect_delete_book()
        .returning(|_| Err(AppError::NotFound("Book not found".into())));

    let store = MockStore::new();

    let handler = BookHandler::new(
        repo,
        store,
        FakeRenderer { pages: 1 },
        test_scratch.scratch.clone(),
        RenderOptions::default(),
    );

    let result = handler.delete_book(&id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}
