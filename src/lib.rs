//! Trips visualization - animated vehicle trails and timed markers
//!
//! A looping simulated clock drives two layers over a basemap:
//! - Trips: fading trails of vehicles moving along timestamped paths
//! - Markers: points shown only while the clock is inside their time window
//!
//! `core` is platform-agnostic. The egui surface (`app`) runs natively and in
//! the browser; the headless CLI drives the same loop on tokio.

pub mod core;
pub mod time;

#[cfg(feature = "gui")]
pub mod app;
#[cfg(feature = "gui")]
pub mod theme;

#[cfg(all(feature = "cli", not(target_arch = "wasm32")))]
pub mod scheduler_native;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web {
    use tracing::{error, info};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::app::TripsApp;
    use crate::core::{Config, Dataset};

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();

        // Initialize tracing for browser console
        tracing_wasm::set_as_global_default();

        let config = Config::default();
        let dataset = Dataset::bundled(config.load_policy());
        let web_options = eframe::WebOptions::default();

        wasm_bindgen_futures::spawn_local(async move {
            let Some(canvas) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("canvas"))
                .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
            else {
                error!("No #canvas element to render into");
                return;
            };

            info!("Starting web runner");
            let result = eframe::WebRunner::new()
                .start(
                    canvas,
                    web_options,
                    Box::new(move |cc| Ok(Box::new(TripsApp::new(cc, config, dataset)))),
                )
                .await;
            if let Err(e) = result {
                error!(error = ?e, "Failed to start eframe");
            }
        });
    }
}
