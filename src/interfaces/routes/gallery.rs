use actix_web::web;

use crate::handlers::gallery;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/gallery")
            .service(gallery::add_gallery_images)
            .service(gallery::list_gallery_images)
            .service(gallery::bulk_delete_gallery_images)
    );
}
