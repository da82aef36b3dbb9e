use crate::app::App;
use crate::args::Args;

mod animation;
mod app;
pub mod args;
mod error;
mod render;
mod resource;
mod view;

pub fn run(args: Args) {
    cfg_if::cfg_if! {
        if #[cfg(target_arch="wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            if let Err(error) = console_log::init_with_level(log::Level::Info) {
                web_sys::console::error_1(&format!("Failed to initialize logging: {error}").into());
            }
        } else {
            env_logger::init();
        }
    }

    let event_loop = match App::create_event_loop() {
        Ok(event_loop) => event_loop,
        Err(error) => {
            log::error!("Failed to create the event loop: {error}");
            return;
        }
    };
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Poll);

    let mut app = App::new(&event_loop, args);

    cfg_if::cfg_if! {
        if #[cfg(target_arch="wasm32")] {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(app);
        } else {
            if let Err(error) = event_loop.run_app(&mut app) {
                log::error!("The event loop stopped with an error: {error}");
            }
        }
    }
}

/// Browser entry point. `dds_url` is fetched relative to the hosting page.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn run_web(dds_url: String) {
    run(Args {
        dds: Some(dds_url),
        ..Default::default()
    });
}
