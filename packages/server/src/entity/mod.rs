pub mod comment;
pub mod comment_group;
pub mod genre;
pub mod judging_criteria;
pub mod problem;
pub mod problem_tag;
pub mod tag;
pub mod tag_group;
pub mod user;
