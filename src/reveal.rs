//! Adds the reveal class to decorative elements as they scroll into view.

use shared::reveal::RevealConfig;
use tracing::{debug, warn};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

pub fn observe(document: &Document, config: &RevealConfig) -> Result<(), JsValue> {
    let elements = document.query_selector_all(&config.query())?;
    if elements.length() == 0 {
        debug!(query = %config.query(), "no reveal elements on page");
        return Ok(());
    }

    let class_name = config.class_name.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let element = entry.target();
                if let Err(err) = element.class_list().add_1(&class_name) {
                    warn!(?err, "could not add reveal class");
                }
                observer.unobserve(&element);
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.threshold));
    init.set_root_margin(&config.root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

    for index in 0..elements.length() {
        if let Some(element) = elements
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        {
            observer.observe(&element);
        }
    }
    debug!(count = elements.length(), "reveal elements observed");

    // Lives as long as the page.
    callback.forget();
    Ok(())
}
