use crate::{AppState, YouTubeConfig};
use anyhow::Result;
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{info, warn, LevelFilter};
use reqwest::Client;
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;

lazy_static! {
    pub static ref YOUTUBE_API_KEY: String = env::var("YOUTUBE_API_KEY").unwrap_or_default();
    pub static ref YOUTUBE_API_URL: String = env::var("YOUTUBE_API_URL")
        .unwrap_or_else(|_| "https://www.googleapis.com/youtube/v3".to_string());
    pub static ref FRONTEND_ORIGIN: String =
        env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".to_string());
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    info!("Starting channel stats backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn create_app_state() -> Result<AppState> {
    if YOUTUBE_API_KEY.is_empty() {
        warn!("YOUTUBE_API_KEY is not set, every lookup will fail with a provider error");
    }
    info!("Using YouTube Data API at: {}", &*YOUTUBE_API_URL);

    let http_client = Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()?;

    Ok(AppState {
        http_client,
        youtube: YouTubeConfig {
            api_key: YOUTUBE_API_KEY.clone(),
            base_url: YOUTUBE_API_URL.clone(),
        },
    })
}

pub fn create_cors() -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(&[FRONTEND_ORIGIN.as_str()]))
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}
