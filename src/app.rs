use anyhow::Result;
use crossbeam_channel::TryRecvError;
use winit::application::ApplicationHandler;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::keyboard::{KeyCode, PhysicalKey};
use web_time::Instant;
use winit::window::{Window, WindowId};

use crate::args::{Args, CubeFaceLayout};
use crate::resource::source::{fetch_in_background, PendingDds};
use crate::view::ViewSystem;

pub struct App {
    event_loop_proxy: EventLoopProxy<UserEvent>,
    args: Args,
    view_system: Option<ViewSystem>,
    pending_dds: Option<PendingDds>,
    last_render_time: Instant,
}

impl App {
    pub fn new(event_loop: &EventLoop<UserEvent>, args: Args) -> Self {
        App {
            event_loop_proxy: event_loop.create_proxy(),
            args,
            view_system: None,
            pending_dds: None,
            last_render_time: Instant::now(),
        }
    }

    pub fn create_event_loop() -> Result<EventLoop<UserEvent>, EventLoopError> {
        EventLoop::<UserEvent>::with_user_event().build()
    }

    fn create_window(event_loop: &ActiveEventLoop) -> Result<Window, OsError> {
        let window_attributes = Window::default_attributes().with_title("DDS Cube Viewer");

        cfg_if::cfg_if! {
            if #[cfg(target_arch="wasm32")] {
                use winit::platform::web::WindowAttributesExtWebSys;
                event_loop.create_window(window_attributes.with_append(true))
            } else {
                event_loop.create_window(window_attributes)
            }
        }
    }

    async fn initialize_view_system(event_loop_proxy: EventLoopProxy<UserEvent>, window: Window) {
        let view_system = match ViewSystem::from_window(window).await {
            Ok(view_system) => view_system,
            Err(error) => {
                log::error!("Failed to create the view system: {error}");
                return;
            }
        };

        if event_loop_proxy
            .send_event(UserEvent::ViewSystemReady(view_system))
            .is_err()
        {
            log::error!("The event loop closed before the view system was ready");
        }
    }

    fn start_dds_fetch(&mut self) {
        let dds_path = match &self.args.dds {
            Some(dds_path) => dds_path.clone(),
            None => {
                log::warn!("No DDS file was given, the cube keeps its default texture");
                return;
            }
        };

        #[cfg(target_arch = "wasm32")]
        let source = crate::resource::source::http::HttpDdsSource { url: dds_path };
        #[cfg(not(target_arch = "wasm32"))]
        let source = crate::resource::source::file::FileSystemDdsSource { path: dds_path };

        self.pending_dds = Some(fetch_in_background(source));
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        log::info!("Application resumed");

        if self.view_system.is_some() {
            return;
        }

        let window = match App::create_window(event_loop) {
            Ok(window) => window,
            Err(error) => {
                log::error!("Failed to create a window: {error}");
                event_loop.exit();
                return;
            }
        };

        let event_loop_proxy = self.event_loop_proxy.clone();
        let future = async move {
            App::initialize_view_system(event_loop_proxy, window).await;
        };

        cfg_if::cfg_if! {
            if #[cfg(target_arch="wasm32")] {
                wasm_bindgen_futures::spawn_local(future);
            } else {
                pollster::block_on(future);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let view_system = match &mut self.view_system {
            Some(view_system) => view_system,
            None => return,
        };

        if view_system.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                view_system.render_system.set_view_dimensions(new_size)
            }
            WindowEvent::RedrawRequested => {
                if let Some(pending_dds) = &self.pending_dds {
                    match pending_dds.try_recv() {
                        Ok(result) => {
                            self.pending_dds = None;
                            apply_dds_result(view_system, result, self.args.face_layout);
                        }
                        Err(TryRecvError::Empty) => {}
                        Err(TryRecvError::Disconnected) => {
                            self.pending_dds = None;
                            log::error!("The DDS fetch ended without a result");
                        }
                    }
                }

                let now = Instant::now();
                let delta_time = now - self.last_render_time;

                match view_system.update_view(delta_time) {
                    Ok(_) => {}
                    Err(error) => {
                        if let Some(error) = error.downcast_ref::<wgpu::SurfaceError>() {
                            match error {
                                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                                    view_system.render_system.sync_view_dimensions()
                                }
                                wgpu::SurfaceError::OutOfMemory => {
                                    log::error!("OutOfMemory");
                                    event_loop.exit();
                                }
                                wgpu::SurfaceError::Timeout => {
                                    log::warn!("Surface timeout");
                                }
                            }
                        } else {
                            log::error!("Failed to render a frame: {error}");
                        }
                    }
                }

                self.last_render_time = now;
                view_system.window.request_redraw();
            }
            _ => {}
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        let UserEvent::ViewSystemReady(view_system) = event;

        log::info!("View system created");

        view_system.window.request_redraw();
        self.view_system = Some(view_system);
        self.last_render_time = Instant::now();

        self.start_dds_fetch();
    }
}

/// Decodes and uploads a fetched DDS file. Failures are reported and the
/// cube keeps rendering with its current texture.
fn apply_dds_result(view_system: &mut ViewSystem, result: Result<Vec<u8>>, face_layout: CubeFaceLayout) {
    let data = match result {
        Ok(data) => data,
        Err(error) => {
            log::error!("Failed to fetch the DDS file: {error}");
            return;
        }
    };

    if let Err(error) = view_system.load_dds(data, face_layout) {
        log::error!("Failed to load the DDS cubemap: {error}");
    }
}

pub enum UserEvent {
    ViewSystemReady(ViewSystem),
}
