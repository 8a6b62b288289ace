pub mod auth;
pub mod blog;
pub mod books;
pub mod extractors;
pub mod gallery;
