//! Adapter for the page's global `BRAIN` connectome object.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use inkfield::{SignalSnapshot, SignalSource, Stimuli};

/// Name of the global the connectome script defines.
pub const GLOBAL_NAME: &str = "BRAIN";

/// [`SignalSource`] backed by the JS `BRAIN` object.
///
/// Missing methods are skipped and non-numeric accumulators read as NaN,
/// which the worm treats as "no signal".
pub struct JsSignalSource {
    brain: JsValue,
}

impl JsSignalSource {
    /// Look up `BRAIN` on the global object. `None` when the script isn't loaded.
    pub fn detect() -> Option<Self> {
        let brain = Reflect::get(&js_sys::global(), &JsValue::from_str(GLOBAL_NAME)).ok()?;
        if brain.is_undefined() || brain.is_null() {
            return None;
        }
        Some(Self { brain })
    }

    fn call(&self, method: &str) {
        let Ok(f) = Reflect::get(&self.brain, &JsValue::from_str(method)) else {
            return;
        };
        let Some(f) = f.dyn_ref::<Function>() else {
            return;
        };
        if let Err(e) = f.call0(&self.brain) {
            log::warn!("{}.{}() threw: {:?}", GLOBAL_NAME, method, e);
        }
    }

    fn set_flag(&self, name: &str, value: bool) {
        if Reflect::set(&self.brain, &JsValue::from_str(name), &JsValue::from_bool(value)).is_err() {
            log::warn!("could not set {}.{}", GLOBAL_NAME, name);
        }
    }

    fn number(&self, name: &str) -> f32 {
        Reflect::get(&self.brain, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_f64())
            .map_or(f32::NAN, |v| v as f32)
    }
}

impl SignalSource for JsSignalSource {
    fn setup(&mut self) {
        self.call("setup");
        self.call("randExcite");
    }

    fn update(&mut self) {
        self.call("update");
    }

    fn set_stimuli(&mut self, stimuli: Stimuli) {
        self.set_flag("stimulateNoseTouchNeurons", stimuli.nose_touch);
        self.set_flag("stimulateFoodSenseNeurons", stimuli.food_sense);
        self.set_flag("stimulateHungerNeurons", stimuli.hunger);
    }

    fn poll(&self) -> Option<SignalSnapshot> {
        Some(SignalSnapshot::new(self.number("accumleft"), self.number("accumright")))
    }
}
