mod app;
mod audio;
mod config;
mod error;
mod input;
mod library;
mod player;
mod playlist;
mod runtime;
mod store;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
