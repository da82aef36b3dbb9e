use anyhow::Result;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::Error;
use crate::resource::source::DdsSource;

pub struct HttpDdsSource {
    pub url: String,
}

impl DdsSource for HttpDdsSource {
    fn describe(&self) -> &str {
        &self.url
    }

    async fn load(&self) -> Result<Vec<u8>> {
        let window = match web_sys::window() {
            Some(window) => window,
            None => return Err(Error::new("No browser window is available to fetch from").into()),
        };

        let response = JsFuture::from(window.fetch_with_str(&self.url))
            .await
            .map_err(js_error)?;
        let response: web_sys::Response = response.dyn_into().map_err(js_error)?;

        if !response.ok() {
            return Err(Error::new(format!(
                "Failed to fetch {} (status={})",
                self.url,
                response.status()
            ))
            .into());
        }

        let array_buffer = JsFuture::from(response.array_buffer().map_err(js_error)?)
            .await
            .map_err(js_error)?;

        Ok(js_sys::Uint8Array::new(&array_buffer).to_vec())
    }
}

fn js_error(value: wasm_bindgen::JsValue) -> anyhow::Error {
    Error::new(format!("{value:?}")).into()
}
