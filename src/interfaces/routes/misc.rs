use actix_web::web;

use crate::handlers::{categories, videos, visitors};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/videos")
            .service(videos::create_video)
            .service(videos::list_videos)
            .service(videos::delete_video)
    );

    cfg.service(
        web::scope("/categories")
            .service(categories::create_category)
            .service(categories::list_categories)
            .service(categories::update_category)
    );

    cfg.service(
        web::scope("/visitors")
            .service(visitors::count_visitor)
    );
}
