pub mod comment;
pub mod genre;
pub mod health;
pub mod problem;
pub mod tag;
