//! Browser host for the lazy mounter.
//!
//! Mount points are `<canvas>` elements looked up by id, visibility comes
//! from one `IntersectionObserver` per watched canvas, and charts are built
//! by Chart.js.

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

use rand::{rngs::StdRng, SeedableRng};
use shared::{
    report::experiment_report, ChartDescriptor, DashboardConfig, DashboardResult, LazyMounter,
    MountHost, Theme,
};
use tracing::{debug, info, warn};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{
    Document, HtmlCanvasElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::{chartjs_bindings::Chart, reveal};

/// Id of the optional `<script type="application/json">` holding the config.
pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

type SharedMounter = Rc<RefCell<LazyMounter<BrowserHost>>>;
type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

thread_local! {
    static DASHBOARD: RefCell<Option<SharedMounter>> = const { RefCell::new(None) };
}

struct Watch {
    observer: IntersectionObserver,
    callback: ObserverCallback,
}

pub struct BrowserHost {
    window: Window,
    document: Document,
    mounter: Weak<RefCell<LazyMounter<BrowserHost>>>,
    watches: HashMap<String, Watch>,
    charts: Vec<Chart>,
}

impl MountHost for BrowserHost {
    type Target = HtmlCanvasElement;

    fn resolve(&self, target_id: &str) -> Option<HtmlCanvasElement> {
        self.document
            .get_element_by_id(target_id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or_default()
    }

    fn watch(&mut self, target_id: &str, target: &HtmlCanvasElement, threshold: f64) {
        let mounter = self.mounter.clone();
        let id = target_id.to_owned();
        let callback = ObserverCallback::new(move |entries: js_sys::Array, _: IntersectionObserver| {
            let Some(mounter) = mounter.upgrade() else {
                return;
            };
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let fraction = if entry.is_intersecting() {
                    entry.intersection_ratio()
                } else {
                    0.0
                };
                if let Err(err) = mounter.borrow_mut().on_visibility(&id, fraction) {
                    warn!(%err, "lazy chart mount failed");
                }
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(target);
                self.watches
                    .insert(target_id.to_owned(), Watch { observer, callback });
            }
            Err(err) => warn!(target_id, ?err, "could not create IntersectionObserver"),
        }
    }

    fn unwatch(&mut self, target_id: &str, target: &HtmlCanvasElement) {
        let Some(Watch { observer, callback }) = self.watches.remove(target_id) else {
            return;
        };
        observer.unobserve(target);
        observer.disconnect();
        // unwatch runs from inside this callback, so it must outlive the call.
        callback.forget();
    }

    fn construct(
        &mut self,
        target: &HtmlCanvasElement,
        descriptor: &ChartDescriptor,
    ) -> Result<(), String> {
        let chart = Chart::construct(target, descriptor)?;
        self.charts.push(chart);
        debug!(charts = self.charts.len(), "chart handle stored");
        Ok(())
    }
}

/// Reads the page configuration. A missing or empty element means defaults.
pub fn load_config() -> DashboardResult<DashboardConfig> {
    let json = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());
    match json {
        Some(json) if !json.trim().is_empty() => DashboardConfig::from_json(&json),
        _ => Ok(DashboardConfig::default()),
    }
}

/// Registers every report widget with the lazy mounter and starts the
/// scroll reveal observer. Call after the page view is mounted.
pub fn start(config: &DashboardConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let widgets = experiment_report(&Theme::default(), &mut rng)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    let mount_config = config.mount.clone();
    let host_document = document.clone();
    let mounter: SharedMounter = Rc::new_cyclic(|weak| {
        let host = BrowserHost {
            window,
            document: host_document,
            mounter: weak.clone(),
            watches: HashMap::new(),
            charts: Vec::new(),
        };
        RefCell::new(LazyMounter::new(host, mount_config))
    });

    {
        let mut mounter = mounter.borrow_mut();
        for widget in widgets {
            mounter.mount(widget.info.mount_id, widget.descriptor);
        }
        let stats = mounter.stats();
        info!(
            watching = stats.watching,
            viewport_width = mounter.host().viewport_width(),
            "dashboard widgets registered"
        );
    }

    // Keep the mounter alive before anything else can fail: observer
    // callbacks only hold a `Weak`.
    DASHBOARD.with(|slot| *slot.borrow_mut() = Some(mounter));

    if let Err(err) = reveal::observe(&document, &config.reveal) {
        warn!(?err, "scroll reveal disabled");
    }
    Ok(())
}
