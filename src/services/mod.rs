pub mod chart_service;
pub mod config_service;
pub mod series_service;
pub mod widget_service;
