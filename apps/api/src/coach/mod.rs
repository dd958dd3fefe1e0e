// AI coach: free-text prompt forwarded upstream as-is, no templating.

pub mod handlers;
pub mod models;
