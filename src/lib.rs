pub mod inference;
pub mod models;
pub mod normalize;
pub mod routes;
