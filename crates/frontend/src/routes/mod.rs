pub mod navigator;
pub mod routes;
