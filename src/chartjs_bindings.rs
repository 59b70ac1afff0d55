//! Bindings to the global `Chart` constructor from Chart.js.
//!
//! The library itself is loaded by a `<script>` tag in `index.html`.

use serde::Serialize;
use shared::descriptor::TooltipLabel;
use shared::ChartDescriptor;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::HtmlCanvasElement;

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(item: &HtmlCanvasElement, config: &JsValue) -> Result<Chart, JsValue>;
}

impl Chart {
    /// Builds a chart from `descriptor` on `canvas`.
    ///
    /// Descriptors are serialised as plain JS objects; Chart.js does not
    /// understand `Map`s.
    pub fn construct(canvas: &HtmlCanvasElement, descriptor: &ChartDescriptor) -> Result<Chart, String> {
        let config = descriptor
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|err| err.to_string())?;
        if let Some(label) = &descriptor.options.tooltip_label {
            attach_tooltip_label(&config, label).map_err(|err| format!("{err:?}"))?;
        }
        Chart::new(canvas, &config).map_err(|err| match err.dyn_ref::<js_sys::Error>() {
            Some(error) => String::from(error.message()),
            None => format!("{err:?}"),
        })
    }
}

/// Sets `options.plugins.tooltip.callbacks.label` on a serialised config.
fn attach_tooltip_label(config: &JsValue, label: &TooltipLabel) -> Result<(), JsValue> {
    let options = js_sys::Reflect::get(config, &JsValue::from_str("options"))?;
    let plugins = js_sys::Reflect::get(&options, &JsValue::from_str("plugins"))?;

    let callbacks = js_sys::Object::new();
    let formatter = js_sys::Function::new_with_args("ctx", &label.js_body());
    js_sys::Reflect::set(&callbacks, &JsValue::from_str("label"), &formatter)?;

    let tooltip = js_sys::Object::new();
    js_sys::Reflect::set(&tooltip, &JsValue::from_str("callbacks"), &callbacks)?;
    js_sys::Reflect::set(&plugins, &JsValue::from_str("tooltip"), &tooltip)?;
    Ok(())
}
