use actix_web::web;

use crate::handlers::books;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    // fixed segments before the `{id}` catch-all
    cfg.service(
        web::scope("/books")
            .service(books::create_book)
            .service(books::list_books)
            .service(books::search_books)
            .service(books::list_books_by_category)
            .service(books::get_book_by_id)
            .service(books::update_book)
            .service(books::delete_book)
    );
}
