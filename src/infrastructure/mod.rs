// Infrastructure layer - Rendering, data source and service adapters
pub mod charts;
pub mod config;
pub mod format;
pub mod html;
pub mod http_response;
pub mod static_source;
