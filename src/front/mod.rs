/// Module containing static asset helpers
pub mod assets;
/// Module containing the route handler
pub mod routes;
