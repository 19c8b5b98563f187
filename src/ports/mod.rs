pub mod sheets_gateway;
