pub mod avatar;
pub mod health;
pub mod images;
