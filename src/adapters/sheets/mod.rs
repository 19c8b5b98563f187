pub mod auth;
pub mod google_sheets_gateway;
pub mod http_client;
