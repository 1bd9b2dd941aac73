#[macro_use]
extern crate rocket;

mod api;
mod config;
mod models;
mod services;
mod utils;

use rocket::{Build, Rocket};

pub struct YouTubeConfig {
    pub api_key: String,
    pub base_url: String,
}

pub struct AppState {
    pub http_client: reqwest::Client,
    pub youtube: YouTubeConfig,
}

#[get("/")]
fn index() -> &'static str {
    "Channel stats backend is running."
}

pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount("/", routes![index])
        .mount("/api/channels", routes![api::channel_stats])
}

#[launch]
fn rocket() -> _ {
    config::load_environment();
    config::init_logger();

    let app_state = config::create_app_state().expect("Failed to create application state");
    let cors = config::create_cors().expect("Failed to create CORS fairing");

    build_rocket(app_state).attach(cors)
}
