//! Drawables backed by `<img>` elements and host-generated canvases.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use celestial_engine::{AssetError, DrawableHandle, DrawableProvider, DrawableStatus};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, HtmlImageElement};

/// Something the canvas surface can blit.
#[derive(Clone)]
pub enum WebDrawable {
    Image(HtmlImageElement),
    Texture {
        canvas: HtmlCanvasElement,
        dispose: Option<js_sys::Function>,
    },
}

/// Handle-to-element table shared by the provider and the canvas surface.
#[derive(Clone, Default)]
pub struct DrawableStore {
    inner: Rc<RefCell<HashMap<DrawableHandle, WebDrawable>>>,
}

impl DrawableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: DrawableHandle) -> Option<WebDrawable> {
        self.inner.borrow().get(&handle).cloned()
    }

    fn insert(&self, handle: DrawableHandle, drawable: WebDrawable) {
        self.inner.borrow_mut().insert(handle, drawable);
    }

    fn remove(&self, handle: DrawableHandle) -> Option<WebDrawable> {
        self.inner.borrow_mut().remove(&handle)
    }
}

/// Loads artwork through the browser and asks the host for procedural
/// textures.
///
/// The generator is a JS function `(bodyName, resolution) => { canvas, dispose }`.
/// Without one, every texture request answers `Unsupported` and bodies fall
/// back to their photo or gradient rendering.
pub struct WebDrawableProvider {
    store: DrawableStore,
    asset_base: String,
    generator: Option<js_sys::Function>,
    next: u32,
}

impl WebDrawableProvider {
    pub fn new(store: DrawableStore, asset_base: impl Into<String>, generator: Option<js_sys::Function>) -> Self {
        let mut asset_base = asset_base.into();
        if !asset_base.is_empty() && !asset_base.ends_with('/') {
            asset_base.push('/');
        }
        Self { store, asset_base, generator, next: 0 }
    }

    fn allocate(&mut self) -> DrawableHandle {
        self.next += 1;
        DrawableHandle(self.next)
    }
}

impl DrawableProvider for WebDrawableProvider {
    fn load_artwork(&mut self, path: &str) -> DrawableHandle {
        let handle = self.allocate();
        match HtmlImageElement::new() {
            Ok(img) => {
                img.set_src(&format!("{}{}", self.asset_base, path));
                self.store.insert(handle, WebDrawable::Image(img));
            }
            // Unknown handles read as failed.
            Err(err) => log::warn!("could not create image for {path}: {}", describe(&err)),
        }
        handle
    }

    fn generate_texture(&mut self, body: &str, resolution: u32) -> Result<DrawableHandle, AssetError> {
        let generator = self.generator.as_ref().ok_or(AssetError::Unsupported)?;
        let result = generator
            .call2(&JsValue::NULL, &JsValue::from_str(body), &JsValue::from(resolution))
            .map_err(|err| AssetError::Generator(describe(&err)))?;

        let canvas = js_sys::Reflect::get(&result, &JsValue::from_str("canvas"))
            .ok()
            .and_then(|v| v.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| AssetError::Generator(format!("{body}: generator returned no canvas")))?;
        let dispose = js_sys::Reflect::get(&result, &JsValue::from_str("dispose"))
            .ok()
            .and_then(|v| v.dyn_into::<js_sys::Function>().ok());

        let handle = self.allocate();
        self.store.insert(handle, WebDrawable::Texture { canvas, dispose });
        Ok(handle)
    }

    fn status(&self, handle: DrawableHandle) -> DrawableStatus {
        match self.store.get(handle) {
            Some(WebDrawable::Image(img)) if img.complete() => {
                if img.natural_width() > 0 {
                    DrawableStatus::Ready
                } else {
                    DrawableStatus::Failed
                }
            }
            Some(WebDrawable::Image(_)) => DrawableStatus::Pending,
            Some(WebDrawable::Texture { .. }) => DrawableStatus::Ready,
            None => DrawableStatus::Failed,
        }
    }

    /// Drop the entry whatever its kind; only generated textures carry a
    /// host dispose hook.
    fn release(&mut self, handle: DrawableHandle) {
        match self.store.remove(handle) {
            Some(WebDrawable::Texture { dispose: Some(dispose), .. }) => {
                if let Err(err) = dispose.call0(&JsValue::NULL) {
                    log::warn!("texture dispose raised: {}", describe(&err));
                }
            }
            Some(WebDrawable::Image(_)) | Some(WebDrawable::Texture { dispose: None, .. }) | None => {}
        }
    }
}

/// Best-effort text for a thrown JS value.
pub fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| err.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{err:?}"))
}
