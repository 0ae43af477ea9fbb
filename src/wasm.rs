// WASM bindings: render pages to JSON for a browser front end
use wasm_bindgen::prelude::*;

use crate::error::ProjectileError;
use crate::pages::{render, Task};
use crate::presets::{Presets, ReportConfig};

fn to_js(err: ProjectileError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WasmProjectile {
    config: ReportConfig,
}

#[wasm_bindgen]
impl WasmProjectile {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        WasmProjectile { config: ReportConfig::default() }
    }

    /// Samples per analytical curve
    #[wasm_bindgen(js_name = setGraphSamples)]
    pub fn set_graph_samples(&mut self, samples: usize) {
        self.config.graph_samples = samples;
    }

    /// Render one page. `presets_json` overrides the default inputs and may be empty.
    #[wasm_bindgen(js_name = renderPage)]
    pub fn render_page(&self, task: &str, presets_json: &str) -> Result<String, JsValue> {
        let task: Task = task.parse().map_err(to_js)?;
        let presets = if presets_json.trim().is_empty() {
            Presets::default()
        } else {
            Presets::from_json_str(presets_json).map_err(to_js)?
        };
        let report = render(task, &presets, &self.config).map_err(to_js)?;
        serde_json::to_string(&report).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `[{ "number": 1, "slug": "...", "title": "..." }, ...]`
    #[wasm_bindgen(js_name = listTasks)]
    pub fn list_tasks(&self) -> String {
        let tasks: Vec<serde_json::Value> = Task::ALL
            .into_iter()
            .map(|task| {
                serde_json::json!({
                    "number": task.number(),
                    "slug": task.slug(),
                    "title": task.title(),
                })
            })
            .collect();
        serde_json::Value::Array(tasks).to_string()
    }

    /// Default inputs for every page as pretty JSON.
    #[wasm_bindgen(js_name = defaultPresets)]
    pub fn default_presets(&self) -> Result<String, JsValue> {
        Presets::default().to_json_pretty().map_err(to_js)
    }
}

impl Default for WasmProjectile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Error paths build a JsValue, which needs a wasm32 host; only success paths run natively.

    #[test]
    fn test_render_page_with_overrides() {
        let wasm = WasmProjectile::new();
        let json = wasm.render_page("task-8", r#"{ "task8": { "bounces": 2 } }"#).unwrap();
        let report: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(report["task"], "bounce");
        assert_eq!(report["values"][1]["value"], 2.0);
    }

    #[test]
    fn test_list_tasks() {
        let tasks: serde_json::Value = serde_json::from_str(&WasmProjectile::new().list_tasks()).unwrap();
        assert_eq!(tasks.as_array().map(Vec::len), Some(9));
        assert_eq!(tasks[6]["slug"], "range-time");
    }
}
