use actix_web::web;

use crate::handlers::home::home;

mod auth;
mod blog;
mod books;
mod gallery;
mod misc;
mod submissions;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .configure(auth::config_routes)
            .configure(books::config_routes)
            .configure(blog::config_routes)
            .configure(gallery::config_routes)
            .configure(submissions::config_routes)
            .configure(misc::config_routes)
    );
}
