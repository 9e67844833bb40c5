//! WebGPU client for the falling boxes
//!
//! Runs the box simulation in the browser and draws it with wgpu. The host
//! page calls [`start`] once with a canvas, then [`frame`] from its
//! `requestAnimationFrame` loop.

#![cfg(target_arch = "wasm32")]

mod camera;
mod error;
mod logging;
mod mesh;
mod renderer;

use std::cell::RefCell;

use error::ClientError;
use log::{error, info};
use renderer::{GpuRenderer, RenderSettings};
use sim_core::{CameraRig, Config, Simulator};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

thread_local! {
    static APP: RefCell<Option<Simulator<GpuRenderer>>> = const { RefCell::new(None) };
}

/// Milliseconds on the same clock as `requestAnimationFrame` timestamps
fn performance_now() -> Result<f64, ClientError> {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .ok_or(ClientError::NoWindow)
}

async fn boot(canvas: HtmlCanvasElement) -> Result<Simulator<GpuRenderer>, ClientError> {
    let camera = CameraRig::for_viewport(canvas.width(), canvas.height());
    let renderer = GpuRenderer::new(canvas, &camera, RenderSettings::default()).await?;
    let start = performance_now()?;
    Ok(Simulator::new(Config::default(), camera, renderer, start))
}

/// Set up the renderer and an empty simulation on `canvas`.
///
/// The canvas size is read once; resizing the page later does not change
/// the view.
#[wasm_bindgen]
pub fn start(canvas: HtmlCanvasElement, verbose: bool) -> js_sys::Promise {
    console_error_panic_hook::set_once();
    logging::init(verbose);

    wasm_bindgen_futures::future_to_promise(async move {
        match boot(canvas).await {
            Ok(sim) => {
                info!("client started");
                APP.with(|app| *app.borrow_mut() = Some(sim));
                Ok(JsValue::UNDEFINED)
            }
            Err(e) => {
                error!("start failed: {}", e);
                Err(e.into())
            }
        }
    })
}

/// Advance the simulation to `now_ms` and draw it
#[wasm_bindgen]
pub fn frame(now_ms: f64) -> Result<(), JsValue> {
    APP.with(|app| -> Result<(), JsValue> {
        let mut app = app.borrow_mut();
        let sim = app.as_mut().ok_or(ClientError::NotStarted)?;
        sim.tick(now_ms)?;
        Ok(())
    })
}

/// Number of boxes currently falling or bouncing
#[wasm_bindgen]
pub fn active_boxes() -> usize {
    APP.with(|app| app.borrow().as_ref().map_or(0, |sim| sim.active_count()))
}
