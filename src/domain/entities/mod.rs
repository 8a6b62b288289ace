pub mod blog_post;
pub mod book;
pub mod category;
pub mod comment;
pub mod contact;
pub mod gallery_image;
pub mod story;
pub mod token;
pub mod user;
pub mod video;
pub mod visitor;
