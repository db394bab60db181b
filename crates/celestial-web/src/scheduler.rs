use celestial_engine::{FrameHandle, FrameScheduler};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// `requestAnimationFrame` clock. One closure is built up front and handed
/// to every request; it calls `on_frame` when the browser fires.
pub struct RafScheduler {
    window: web_sys::Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl RafScheduler {
    pub fn new(window: web_sys::Window, on_frame: fn()) -> Self {
        let callback = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| on_frame());
        Self { window, callback }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(id) => FrameHandle(id as u32),
            Err(err) => {
                log::warn!("requestAnimationFrame failed: {}", crate::images::describe(&err));
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if handle.0 != 0 {
            let _ = self.window.cancel_animation_frame(handle.0 as i32);
        }
    }
}
