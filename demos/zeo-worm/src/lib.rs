use wasm_bindgen::prelude::*;

mod variant;

inkfield_web::export_effect!(variant::config(), "zeo-worm");
