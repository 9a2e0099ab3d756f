/// VisualCube Web - WASM bindings for cube generation
///
/// Exposes the generator to JavaScript so a page can build glTF or GLB
/// assets for any algorithm without a server round trip.

use visualcube_core::{CubeError, Document, Generator, OutputFormat, Result as CubeResult};
use wasm_bindgen::prelude::*;

fn to_js(err: CubeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct CubeRenderer {
    generator: Generator,
}

#[wasm_bindgen]
impl CubeRenderer {
    /// Renderer over the built-in solved cube
    #[wasm_bindgen(constructor)]
    pub fn new() -> CubeRenderer {
        CubeRenderer {
            generator: Generator::solved(),
        }
    }

    /// Renderer over a custom base scene, given as .gltf or .glb bytes
    #[wasm_bindgen(js_name = fromScene)]
    pub fn from_scene(data: &[u8]) -> Result<CubeRenderer, JsValue> {
        Self::load(data).map_err(to_js)
    }

    /// glTF JSON for a whitespace-separated algorithm
    #[wasm_bindgen(js_name = generateGltf)]
    pub fn generate_gltf(&self, alg: &str, unlit: bool) -> Result<String, JsValue> {
        let bytes = self.render(alg, OutputFormat::Gltf, unlit).map_err(to_js)?;
        String::from_utf8(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// GLB bytes for a whitespace-separated algorithm
    #[wasm_bindgen(js_name = generateGlb)]
    pub fn generate_glb(&self, alg: &str, unlit: bool) -> Result<Vec<u8>, JsValue> {
        self.render(alg, OutputFormat::Glb, unlit).map_err(to_js)
    }
}

// JsValue only exists on wasm32, so the fallible work stays in core types
impl CubeRenderer {
    fn load(data: &[u8]) -> CubeResult<CubeRenderer> {
        let base = Document::load(data)?;
        Ok(CubeRenderer {
            generator: Generator::new(base),
        })
    }

    fn render(&self, alg: &str, format: OutputFormat, unlit: bool) -> CubeResult<Vec<u8>> {
        let tokens: Vec<&str> = alg.split_whitespace().collect();
        log::debug!("generating {format} for {} moves", tokens.len());
        self.generator.render(&tokens, format, unlit)
    }
}

impl Default for CubeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(())
}
