pub mod ads;
pub mod auth;
pub mod hunt;
pub mod images;
pub mod reset;
pub mod shapes;
pub mod status;
pub mod validate;
