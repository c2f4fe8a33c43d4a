#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod accessibility;
mod config;
mod consent;
mod counter;
#[cfg(target_arch = "wasm32")]
mod dom;
mod forms;
#[cfg(target_arch = "wasm32")]
mod frontend;
mod gallery;
mod lazy_load;
mod lightbox;
mod loading;
mod motion;
mod navigation;
mod particles;
mod performance;
mod reveal;
mod ripple;
mod styles;
mod telemetry;
mod tooltip;
mod trail;
mod year;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This site is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
