use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{delete, get, post, put, web, Responder};
use uuid::Uuid;

use crate::{
    entities::blog_post::NewBlogPostFields,
    errors::AppError,
    handlers::envelope,
    use_cases::{
        blog::{NewBlogPostInput, UpdateBlogPostInput},
        extractors::AdminClaims,
    },
    AppState,
};

#[derive(Debug, MultipartForm)]
pub struct BlogPostForm {
    pub title: Option<Text<String>>,
    pub description: Option<Text<String>>,

    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

#[post("")]
pub async fn create_blog_post(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<BlogPostForm>,
) -> Result<impl Responder, AppError> {
    let title = form.title.ok_or_else(|| AppError::missing_field("title"))?.into_inner();
    let description = form
        .description
        .ok_or_else(|| AppError::missing_field("description"))?
        .into_inner();
    let image = form.image.ok_or_else(|| AppError::missing_field("image"))?;

    let image_path = state.scratch.stash_image(&image, "blog").await?;

    let input = NewBlogPostInput {
        fields: NewBlogPostFields { title, description },
        image_path,
    };

    let post = state.blog_handler.create_blog_post(input).await?;
    Ok(envelope::success("Blog post uploaded successfully", post))
}

#[get("")]
pub async fn list_blog_posts(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let posts = state.blog_handler.list_blog_posts().await?;
    Ok(envelope::success("Fetched successfully", posts))
}

#[get("/{id}")]
pub async fn get_blog_post_by_id(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let post = state.blog_handler.get_blog_post_by_id(&id).await?;
    Ok(envelope::success("Fetched successfully", post))
}

#[put("/{id}")]
pub async fn update_blog_post(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<BlogPostForm>,
) -> Result<impl Responder, AppError> {
    let mut input = UpdateBlogPostInput {
        title: form.title.map(Text::into_inner),
        description: form.description.map(Text::into_inner),
        image_path: None,
    };

    if let Some(image) = &form.image {
        input.image_path = Some(state.scratch.stash_image(image, "blog").await?);
    }

    let post = state.blog_handler.update_blog_post(&id, input).await?;
    Ok(envelope::success("Blog post updated successfully", post))
}

#[delete("/{id}")]
pub async fn delete_blog_post(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    state.blog_handler.delete_blog_post(&id).await?;
    Ok(envelope::success_message("Blog post deleted successfully"))
}
