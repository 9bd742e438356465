pub mod auth;
pub mod category;
pub mod dashboard;
pub mod fabric;
pub mod order;
pub mod product;
pub mod product_image;
pub mod section;
pub mod storefront;
