pub mod advice;
pub mod ai_client;
pub mod csv_parser;
pub mod profile;
pub mod spending;
