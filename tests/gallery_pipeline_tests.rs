mod common;

use chrono::Utc;
use common::*;
use uuid::Uuid;

use archive_backend::{
    entities::gallery_image::GalleryImage,
    errors::AppError,
    use_cases::gallery::GalleryHandler,
};

fn gallery_image(asset_id: &str) -> GalleryImage {
    GalleryImage {
        id: Uuid::new_v4(),
        url: format!("https://assets.test/gallery/{}.jpg", asset_id),
        asset_id: asset_id.to_string(),
        position: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn add_images_uploads_each_file_and_persists_rows() {
    let (test_scratch, _cover, _document) = scratch_with_inputs().await;

    let mut paths = Vec::new();
    for n in 0..3 {
        let path = test_scratch
            .dir
            .path()
            .join("covers")
            .join(format!("gallery_{}.jpg", n));
        tokio::fs::write(&path, b"image bytes").await.unwrap();
        paths.push(path);
    }

    let mut store = MockStore::new();
    store
        .expect_upload()
        .times(3)
        .withf(|_, folder, _| folder == "gallery")
        .returning(|path, folder, _| Ok(asset_for(path, folder)));

    let mut repo = MockGalleryRepo::new();
    repo.expect_insert_images()
        .times(1)
        .withf(|inserts| inserts.len() == 3)
        .returning(|inserts| {
            Ok(inserts
                .iter()
                .map(|insert| GalleryImage {
                    id: Uuid::new_v4(),
                    url: insert.asset.url.clone(),
                    asset_id: insert.asset.asset_id.clone(),
                    position: insert.position,
                    created_at: Utc::now(),
                })
                .collect())
        });

    let handler = GalleryHandler::new(repo, store, test_scratch.scratch.clone());

    let saved = handler.add_images(paths.clone()).await.unwrap();
    assert_eq!(saved.len(), 3);
    for path in &paths {
        assert!(!path.exists(), "temp file should be removed after upload");
    }
}

#[tokio::test]
async fn add_images_rejects_an_empty_batch() {
    let (test_scratch, _cover, _document) = scratch_with_inputs().await;

    let handler = GalleryHandler::new(
        MockGalleryRepo::new(),
        MockStore::new(),
        test_scratch.scratch.clone(),
    );

    let result = handler.add_images(Vec::new()).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn bulk_delete_removes_rows_and_releases_one_asset_per_id() {
    let (test_scratch, _cover, _document) = scratch_with_inputs().await;

    let images = vec![gallery_image("g1"), gallery_image("g2"), gallery_image("g3")];
    let ids: Vec<Uuid> = images.iter().map(|i| i.id).collect();

    let mut repo = MockGalleryRepo::new();
    let found = images.clone();
    repo.expect_find_images_by_ids()
        .times(1)
        .returning(move |_| Ok(found.clone()));
    repo.expect_delete_images_by_ids()
        .times(1)
        .returning(|ids| Ok(ids.len() as u64));

    let mut store = MockStore::new();
    store.expect_delete().times(3).returning(|_, _| Ok(()));

    let handler = GalleryHandler::new(repo, store, test_scratch.scratch.clone());

    let removed = handler.bulk_delete(&ids).await.unwrap();
    assert_eq!(removed, 3);
}

#[tokio::test]
async fn bulk_delete_proceeds_past_individual_release_failures() {
    let (test_scratch, _cover, _document) = scratch_with_inputs().await;

    let images = vec![gallery_image("g1"), gallery_image("g2")];
    let ids: Vec<Uuid> = images.iter().map(|i| i.id).collect();

    let mut repo = MockGalleryRepo::new();
    let found = images.clone();
    repo.expect_find_images_by_ids()
        .returning(move |_| Ok(found.clone()));
    repo.expect_delete_images_by_ids()
        .returning(|ids| Ok(ids.len() as u64));

    let mut store = MockStore::new();
    store
        .expect_delete()
        .times(2)
        .returning(|asset_id, _| {
            if asset_id == "g1" {
                Err(AppError::RemoteStore("delete returned 502: unavailable".into()))
            } else {
                Ok(())
            }
        });

    let handler = GalleryHandler::new(repo, store, test_scratch.scratch.clone());

    // record removal already succeeded; release failures are logged only
    let removed = handler.bulk_delete(&ids).await.unwrap();
    assert_eq!(removed, 2);
}
