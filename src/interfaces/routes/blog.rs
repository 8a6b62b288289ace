use actix_web::web;

use crate::handlers::blog_posts;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/blog")
            .service(blog_posts::create_blog_post)
            .service(blog_posts::list_blog_posts)
            .service(blog_posts::get_blog_post_by_id)
            .service(blog_posts::update_blog_post)
            .service(blog_posts::delete_blog_post)
    );
}
