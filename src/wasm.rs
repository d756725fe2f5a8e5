use crate::config::SimulationConfig;
use crate::index::IndexKind;
use crate::simulation::FlockSimulation;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(typescript_custom_section)]
const TS_INDEX_NAMES: &'static str = r#"
export type SpatialIndexName = "naive" | "quadtree" | "kdtree" | "spatial-hash";
"#;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// --- Simulation ---

/// A configured flock simulation, driven one tick at a time from JavaScript.
#[wasm_bindgen(js_name = FlockSimulation)]
pub struct FlockSimulationWASM {
    inner: FlockSimulation,
}

#[wasm_bindgen(js_class = FlockSimulation)]
impl FlockSimulationWASM {
    /// Creates a simulation over `width` x `height` with `count` boids, using the
    /// named spatial index. Throws on invalid configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f64,
        height: f64,
        index: &str,
        radius: f64,
        count: usize,
        seed: u64,
    ) -> Result<FlockSimulationWASM, JsValue> {
        let kind: IndexKind = index.parse().map_err(to_js)?;
        let config = SimulationConfig {
            seed,
            ..SimulationConfig::default()
        };
        let mut inner = FlockSimulation::with_config(width, height, config).map_err(to_js)?;
        inner
            .set_spatial_index(kind.create(width, height, radius).map_err(to_js)?)
            .map_err(to_js)?;
        inner.set_neighbor_radius(radius).map_err(to_js)?;
        inner.set_boid_count(count).map_err(to_js)?;
        Ok(FlockSimulationWASM { inner })
    }

    pub fn update(&mut self) { self.inner.update(); }
    #[wasm_bindgen(getter)]
    pub fn last_iteration_time_ms(&self) -> f64 { self.inner.last_iteration_time_ms() }
    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize { self.inner.boid_count() }
    #[wasm_bindgen(getter)]
    pub fn index_name(&self) -> String { self.inner.index_name().to_string() }
    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 { self.inner.tick() }

    /// Boid positions as a flat `[x0, y0, x1, y1, ...]` array.
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> Vec<f64> {
        self.inner
            .boids()
            .iter()
            .flat_map(|b| [b.position.x, b.position.y])
            .collect()
    }

    /// Boid velocities as a flat `[vx0, vy0, vx1, vy1, ...]` array.
    #[wasm_bindgen(getter)]
    pub fn velocities(&self) -> Vec<f64> {
        self.inner
            .boids()
            .iter()
            .flat_map(|b| [b.velocity.x, b.velocity.y])
            .collect()
    }
}
