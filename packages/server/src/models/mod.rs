pub mod comment;
pub mod genre;
pub mod problem;
pub mod shared;
pub mod tag;
