pub mod stats_service;
pub mod youtube_service;
