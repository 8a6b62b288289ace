use actix_web::web;

use crate::handlers::{comments, contact, stories};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comments")
            .service(comments::list_all_comments)
            .service(comments::list_comments_for_book)
            .service(comments::reply_to_comment)
            .service(comments::create_comment)
            .service(comments::delete_comment)
    );

    cfg.service(
        web::scope("/contact")
            .service(contact::create_contact_message)
            .service(contact::list_contact_messages)
            .service(contact::delete_contact_message)
    );

    cfg.service(
        web::scope("/stories")
            .service(stories::create_story)
            .service(stories::list_stories)
            .service(stories::delete_story)
    );
}
