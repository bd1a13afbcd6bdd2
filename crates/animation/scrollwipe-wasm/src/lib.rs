use js_sys::Function;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use scrollwipe_core::{
    Config, Engine, FrameSelectorCfg, Inputs, Outputs, SelectorId, TargetResolver,
};

pub mod console_log;

/// Browser handle around one engine: a page-transition wrapper plus any number of
/// scroll-linked frame selectors. The host calls `update` once per animation frame
/// and applies the returned changes to its elements.
#[wasm_bindgen]
pub struct ScrollWipe {
    core: Engine,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn parse_or_default<T>(value: JsValue, what: &str) -> Result<T, JsError>
where
    T: Default + serde::de::DeserializeOwned,
{
    if jsvalue_is_undefined_or_null(&value) {
        return Ok(T::default());
    }
    swb::from_value(value).map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

struct JsResolver {
    f: Function,
}

impl TargetResolver for JsResolver {
    fn resolve(&mut self, path: &str) -> Option<String> {
        // resolver(path) may return a string key, a numeric id, or null for "not on this page"
        let arg = JsValue::from_str(path);
        let val = match self.f.call1(&JsValue::UNDEFINED, &arg) {
            Ok(val) => val,
            Err(e) => {
                log::warn!("resolver threw for '{path}': {e:?}");
                return None;
            }
        };
        if jsvalue_is_undefined_or_null(&val) {
            return None;
        }
        if let Some(s) = val.as_string() {
            return Some(s);
        }
        if let Some(n) = val.as_f64() {
            return Some(if n.fract() == 0.0 {
                format!("{}", n as i64)
            } else {
                format!("{n}")
            });
        }
        swb::from_value::<String>(val).ok()
    }
}

#[wasm_bindgen]
impl ScrollWipe {
    /// Create an engine. Pass a config object (any subset of fields) or undefined/null.
    /// Example:
    ///   new ScrollWipe({ transition: { panel_count: 4 }, scroll: { default_scrub: { mode: "instant" } } })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ScrollWipe, JsError> {
        console_error_panic_hook::set_once();
        let cfg: Config = parse_or_default(config, "config")?;
        Ok(ScrollWipe {
            core: Engine::new(cfg),
        })
    }

    /// Create an engine from a JSON config string.
    #[wasm_bindgen(js_name = from_json)]
    pub fn from_json(json: &str) -> Result<ScrollWipe, JsError> {
        console_error_panic_hook::set_once();
        let cfg = Config::from_json_str(json).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(ScrollWipe {
            core: Engine::new(cfg),
        })
    }

    /// Resolve canonical target paths (`stairs/panel/2`, `page`, ...) to host keys.
    /// Called as `resolver(path) -> string | number | null/undefined`; null marks
    /// the element as missing and its steps become no-ops.
    #[wasm_bindgen]
    pub fn prebind(&mut self, resolver: Function) {
        let mut js_resolver = JsResolver { f: resolver };
        self.core.prebind(&mut js_resolver);
    }

    /// Mount the transition wrapper. The cover starts hidden; send the current
    /// pathname as a route change to play the first wipe.
    #[wasm_bindgen(js_name = mount_transition)]
    pub fn mount_transition(&mut self) {
        self.core.mount_transition();
    }

    #[wasm_bindgen(js_name = unmount_transition)]
    pub fn unmount_transition(&mut self) {
        self.core.unmount_transition();
    }

    /// Mount a frame selector from `{ frames, surface, anchor, start?, end?, scrub?, initial_index? }`.
    /// Returns its id. An empty `frames` list mounts it disabled.
    #[wasm_bindgen(js_name = mount_frame_selector)]
    pub fn mount_frame_selector(&mut self, cfg: JsValue) -> Result<u32, JsError> {
        let cfg: FrameSelectorCfg =
            swb::from_value(cfg).map_err(|e| JsError::new(&format!("frame selector cfg error: {e}")))?;
        Ok(self.core.mount_frame_selector(cfg).0)
    }

    /// Returns false if no selector had this id.
    #[wasm_bindgen(js_name = unmount_frame_selector)]
    pub fn unmount_frame_selector(&mut self, id: u32) -> bool {
        self.core.unmount_frame_selector(SelectorId(id))
    }

    /// Current transition phase name, or undefined when no wrapper is mounted.
    #[wasm_bindgen(js_name = transition_phase)]
    pub fn transition_phase(&self) -> Result<JsValue, JsError> {
        match self.core.transition() {
            Some(t) => swb::to_value(&t.phase()).map_err(|e| JsError::new(&e.to_string())),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Frame index a selector currently displays, if any.
    #[wasm_bindgen(js_name = displayed_index)]
    pub fn displayed_index(&self, id: u32) -> Option<u32> {
        self.core
            .frame_selector(SelectorId(id))
            .and_then(|s| s.displayed_index())
            .map(|i| i as u32)
    }

    /// Step by dt (seconds) with `{ route_changes?, scroll?, geometry? }`. Returns
    /// `{ changes, events }` for this frame.
    #[wasm_bindgen]
    pub fn update(&mut self, dt: f32, inputs: JsValue) -> Result<JsValue, JsError> {
        let inputs: Inputs = parse_or_default(inputs, "inputs")?;
        let out: &Outputs = self.core.update(dt, inputs);
        swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }
}

/// Route `log` output from the engine to the browser console at `level`
/// (`"off"`, `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`).
#[wasm_bindgen(js_name = init_logging)]
pub fn init_logging(level: &str) {
    console_log::init(console_log::parse_level(level));
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
