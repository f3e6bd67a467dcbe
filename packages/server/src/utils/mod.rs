pub mod lookup;
pub mod problem_query;
