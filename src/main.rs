//! LexiBox Frontend Entry Point

mod app;
mod commands;
mod components;
mod context;
mod coordinator;
mod forest;
mod models;
mod store;
mod tree;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    mount_to_body(App);
}
