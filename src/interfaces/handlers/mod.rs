pub mod auth;
pub mod blog_posts;
pub mod books;
pub mod categories;
pub mod comments;
pub mod contact;
pub mod envelope;
pub mod gallery;
pub mod home;
pub mod stories;
pub mod videos;
pub mod visitors;
