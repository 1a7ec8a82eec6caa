pub mod backend;
pub mod normalize;
pub mod routes;
pub mod search;
pub mod tools;
