mod common;

use chrono::Utc;
use common::*;
use mockall::Sequence;
use uuid::Uuid;

use archive_backend::{
    entities::{blog_post::{BlogPost, NewBlogPostFields}},
    storage::remote::ResourceKind,
    use_cases::blog::{BlogPostHandler, NewBlogPostInput, UpdateBlogPostInput},
};

fn stored_post() -> BlogPost {
    BlogPost {
        id: Uuid::new_v4(),
        title: "Stored".into(),
        description: "A stored post".into(),
        image_url: "https://assets.test/blog/images/old-image.jpg".into(),
        image_asset_id: "blog/images/old-image".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn create_uploads_image_then_persists() {
    let (test_scratch, cover_path, _document) = scratch_with_inputs().await;

    let mut store = MockStore::new();
    store
        .expect_upload()
        .times(1)
        .withf(|_, folder, kind| folder == "blog/images" && *kind == ResourceKind::Image)
        .returning(|path, folder, _| Ok(asset_for(path, folder)));

    let mut repo = MockBlogRepo::new();
    repo.expect_create_blog_post()
        .times(1)
        .returning(|insert| {
            Ok(BlogPost {
                id: Uuid::new_v4(),
                title: insert.title.clone(),
                description: insert.description.clone(),
                image_url: insert.image.url.clone(),
                image_asset_id: insert.image.asset_id.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });

    let handler = BlogPostHandler::new(repo, store, test_scratch.scratch.clone());

    let post = handler
        .create_blog_post(NewBlogPostInput {
            fields: NewBlogPostFields {
                title: "Hello".into(),
                description: "First post".into(),
            },
            image_path: cover_path.clone(),
        })
        .await
        .unwrap();

    assert!(!post.image_url.is_empty());
    assert!(!cover_path.exists());
}

#[tokio::test]
async fn image_update_releases_the_old_asset_after_the_record_points_elsewhere() {
    let (test_scratch, cover_path, _document) = scratch_with_inputs().await;
    let id = Uuid::new_v4();
    let existing = stored_post();

    let mut seq = Sequence::new();
    let mut store = MockStore::new();
    let mut repo = MockBlogRepo::new();

    let found = existing.clone();
    repo.expect_get_blog_post_by_id()
        .returning(move |_| Ok(found.clone()));

    store
        .expect_upload()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|path, folder, _| Ok(asset_for(path, folder)));

    let persisted = existing.clone();
    repo.expect_update_blog_post()
        .times(1)
        .in_sequence(&mut seq)
        .returning(move |_, changes| {
            let mut updated = persisted.clone();
            let image = changes.image.clone().unwrap();
            updated.image_url = image.url;
            updated.image_asset_id = image.asset_id;
            Ok(updated)
        });

    store
        .expect_delete()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|asset_id, _| asset_id == "blog/images/old-image")
        .returning(|_, _| Ok(()));

    let handler = BlogPostHandler::new(repo, store, test_scratch.scratch.clone());

    let updated = handler
        .update_blog_post(
            &id,
            UpdateBlogPostInput {
                image_path: Some(cover_path),
                ..UpdateBlogPostInput::default()
            },
        )
        .await
        .unwrap();

    assert_ne!(updated.image_asset_id, "blog/images/old-image");
}

#[tokio::test]
async fn text_only_update_makes_no_store_calls() {
    let (test_scratch, _cover, _document) = scratch_with_inputs().await;
    let id = Uuid::new_v4();
    let existing = stored_post();

    let store = MockStore::new();

    let mut repo = MockBlogRepo::new();
    let found = existing.clone();
    repo.expect_get_blog_post_by_id()
        .returning(move |_| Ok(found.clone()));
    repo.expect_update_blog_post()
        .times(1)
        .returning(move |_, _| Ok(existing.clone()));

    let handler = BlogPostHandler::new(repo, store, test_scratch.scratch.clone());

    handler
        .update_blog_post(
            &id,
            UpdateBlogPostInput {
                title: Some("Renamed".into()),
                ..UpdateBlogPostInput::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_releases_the_cover_asset() {
    let (test_scratch, _cover, _document) = scratch_with_inputs().await;
    let id = Uuid::new_v4();
    let existing = stored_post();

    let mut repo = MockBlogRepo::new();
    let deleted = existing.clone();
    repo.expect_delete_blog_post()
        .times(1)
        .returning(move |_| Ok(deleted.clone()));

    let mut store = MockStore::new();
    store
        .expect_delete()
        .times(1)
        .withf(|asset_id, _| asset_id == "blog/images/old-image")
        .returning(|_, _| Ok(()));

    let handler = BlogPostHandler::new(repo, store, test_scratch.scratch.clone());

    handler.delete_blog_post(&id).await.unwrap();
}
