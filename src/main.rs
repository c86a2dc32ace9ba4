//! DVD Bounce entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, Response};

    use dvd_bounce::host::seeded_simulator;
    use dvd_bounce::renderer::texture::logo_or_fallback;
    use dvd_bounce::renderer::{LogoImage, QuadRenderState};
    use dvd_bounce::{BounceApp, Settings, clock_seed};

    struct Page {
        app: BounceApp<QuadRenderState>,
        running: bool,
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("DVD Bounce starting...");

        let settings = Settings::load_web();
        let seed = settings.seed.unwrap_or_else(clock_seed);
        let sim = match seeded_simulator(&settings, seed) {
            Ok(sim) => sim,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let logo = fetch_logo(&window, &settings.logo_path).await;
        let render_state = match QuadRenderState::new(
            surface,
            &adapter,
            width,
            height,
            &settings,
            logo.as_ref(),
        )
        .await
        {
            Ok(state) => state,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let page = Rc::new(RefCell::new(Page {
            app: BounceApp::new(sim, render_state),
            running: true,
        }));

        setup_keyboard(page.clone());
        request_animation_frame(page);

        log::info!("DVD Bounce running!");
    }

    /// Logo is served next to the page, at `logo_path` relative to it
    async fn fetch_logo(window: &web_sys::Window, url: &str) -> Option<LogoImage> {
        match fetch_bytes(window, url).await {
            Ok(bytes) => logo_or_fallback(url, LogoImage::decode(&bytes)),
            Err(e) => {
                log::warn!("Failed to fetch texture {}: {:?}", url, e);
                None
            }
        }
    }

    async fn fetch_bytes(window: &web_sys::Window, url: &str) -> Result<Vec<u8>, JsValue> {
        let response: Response = JsFuture::from(window.fetch_with_str(url))
            .await?
            .dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
        }
        let buffer = JsFuture::from(response.array_buffer()?).await?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }

    fn setup_keyboard(page: Rc<RefCell<Page>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                page.borrow_mut().running = false;
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(page: Rc<RefCell<Page>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            frame_loop(page);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(page: Rc<RefCell<Page>>) {
        {
            let mut p = page.borrow_mut();
            if !p.running {
                log::info!("Stopped after {} frames", p.app.frames());
                return;
            }
            if let Err(e) = p.app.frame() {
                if !p.app.presenter_mut().recover(&e) {
                    p.running = false;
                }
            }
        }

        request_animation_frame(page);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    web::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use winit::application::ApplicationHandler;
    use winit::event::{ElementState, KeyEvent, WindowEvent};
    use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
    use winit::keyboard::{Key, NamedKey};
    use winit::window::{Window, WindowId};

    use dvd_bounce::host::seeded_simulator;
    use dvd_bounce::renderer::texture::logo_or_fallback;
    use dvd_bounce::renderer::{LastOffset, LogoImage, QuadRenderState};
    use dvd_bounce::sim::BounceSimulator;
    use dvd_bounce::{AppError, BounceApp, GpuError, Settings, clock_seed};

    const USAGE: &str = "usage: dvd-bounce [--settings PATH] [--headless FRAMES]";

    /// Command line options
    #[derive(Debug, PartialEq)]
    pub struct Args {
        pub settings: PathBuf,
        pub headless: Option<u64>,
    }

    impl Args {
        pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, AppError> {
            let mut parsed = Args {
                settings: PathBuf::from("settings.json"),
                headless: None,
            };
            let mut args = args.into_iter();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--settings" => {
                        let path = args.next().ok_or_else(|| AppError::Usage(USAGE.into()))?;
                        parsed.settings = PathBuf::from(path);
                    }
                    "--headless" => {
                        let frames = args
                            .next()
                            .and_then(|n| n.parse().ok())
                            .ok_or_else(|| AppError::Usage(USAGE.into()))?;
                        parsed.headless = Some(frames);
                    }
                    "-h" | "--help" => return Err(AppError::Usage(USAGE.into())),
                    other => {
                        return Err(AppError::Usage(format!("unknown argument '{}'\n{}", other, USAGE)));
                    }
                }
            }
            Ok(parsed)
        }
    }

    pub fn run() -> Result<(), AppError> {
        let args = Args::parse(std::env::args().skip(1))?;
        let settings = Settings::load(&args.settings);
        let seed = settings.seed.unwrap_or_else(clock_seed);
        let sim = seeded_simulator(&settings, seed)?;

        if let Some(frames) = args.headless {
            let mut app = BounceApp::new(sim, LastOffset::new());
            let Ok(pos) = app.run_headless(frames);
            log::info!(
                "Headless: {} frames, {} bounces, {} corners, final position ({:.4}, {:.4})",
                app.frames(),
                app.bounces(),
                app.corners(),
                pos.x,
                pos.y
            );
            return Ok(());
        }

        let logo = load_logo(Path::new(&settings.logo_path));
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut window_app = WindowApp::new(settings, sim, logo);
        event_loop.run_app(&mut window_app)?;

        match window_app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn load_logo(path: &Path) -> Option<LogoImage> {
        logo_or_fallback(&path.display().to_string(), LogoImage::open(path))
    }

    struct WindowApp {
        settings: Settings,
        /// Taken when the renderer comes up
        sim: Option<BounceSimulator>,
        logo: Option<LogoImage>,
        window: Option<Arc<Window>>,
        app: Option<BounceApp<QuadRenderState>>,
        error: Option<AppError>,
    }

    impl WindowApp {
        fn new(settings: Settings, sim: BounceSimulator, logo: Option<LogoImage>) -> Self {
            Self {
                settings,
                sim: Some(sim),
                logo,
                window: None,
                app: None,
                error: None,
            }
        }

        fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
            let attrs = Window::default_attributes()
                .with_title(self.settings.title.clone())
                .with_inner_size(winit::dpi::PhysicalSize::new(
                    self.settings.window_width,
                    self.settings.window_height,
                ));
            let window = Arc::new(event_loop.create_window(attrs)?);

            let render_state = pollster::block_on(create_renderer(
                window.clone(),
                &self.settings,
                self.logo.as_ref(),
            ))?;

            if let Some(sim) = self.sim.take() {
                self.app = Some(BounceApp::new(sim, render_state));
            }
            self.window = Some(window);
            Ok(())
        }

        fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
            log::error!("{}", err);
            self.error = Some(err);
            event_loop.exit();
        }
    }

    async fn create_renderer(
        window: Arc<Window>,
        settings: &Settings,
        logo: Option<&LogoImage>,
    ) -> Result<QuadRenderState, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        QuadRenderState::new(
            surface,
            &adapter,
            size.width.max(1),
            size.height.max(1),
            settings,
            logo,
        )
        .await
    }

    impl ApplicationHandler for WindowApp {
        fn resumed(&mut self, event_loop: &ActiveEventLoop) {
            if self.window.is_none() {
                if let Err(e) = self.init(event_loop) {
                    self.fail(event_loop, e);
                }
            }
        }

        fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
            match event {
                WindowEvent::CloseRequested
                | WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key: Key::Named(NamedKey::Escape),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                } => {
                    if let Some(app) = &self.app {
                        log::info!("Exiting after {} frames, {} bounces", app.frames(), app.bounces());
                    }
                    event_loop.exit();
                }
                WindowEvent::Resized(size) => {
                    if let Some(app) = &mut self.app {
                        app.presenter_mut().resize(size.width, size.height);
                    }
                }
                WindowEvent::RedrawRequested => {
                    let Some(app) = &mut self.app else {
                        return;
                    };
                    if let Err(e) = app.frame() {
                        if !app.presenter_mut().recover(&e) {
                            event_loop.exit();
                        }
                    }
                }
                _ => {}
            }
        }

        fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> Result<Args, AppError> {
            Args::parse(list.iter().map(|s| s.to_string()))
        }

        #[test]
        fn test_parse_defaults() {
            let parsed = args(&[]).unwrap();
            assert_eq!(parsed.settings, PathBuf::from("settings.json"));
            assert_eq!(parsed.headless, None);
        }

        #[test]
        fn test_parse_settings_and_headless() {
            let parsed = args(&["--headless", "600", "--settings", "dvd.json"]).unwrap();
            assert_eq!(parsed.settings, PathBuf::from("dvd.json"));
            assert_eq!(parsed.headless, Some(600));
        }

        #[test]
        fn test_parse_rejects_bad_input() {
            assert!(matches!(args(&["--headless"]), Err(AppError::Usage(_))));
            assert!(matches!(args(&["--headless", "lots"]), Err(AppError::Usage(_))));
            assert!(matches!(args(&["--fullscreen"]), Err(AppError::Usage(_))));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("DVD Bounce (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
