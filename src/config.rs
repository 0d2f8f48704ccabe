use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What the engine is constructed from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Notify the renderer with the initial board (step 0).
    #[serde(default = "default_notify")]
    pub notify_on_construct: bool,
    /// Raw rows, validated on construction.
    pub initial_board: Vec<Vec<f64>>,
}

fn default_notify() -> bool {
    true
}

impl SimConfig {
    pub fn new(initial_board: Vec<Vec<f64>>) -> Self {
        Self {
            notify_on_construct: true,
            initial_board,
        }
    }
}

/// Plot output options for [`crate::render::Plotter`].
#[derive(Clone, Debug)]
pub struct PlotParams {
    /// Print each generation to stdout.
    pub show_plots: bool,
    /// Write each generation as `{file_prefix}_{step}.png`.
    pub save_plots: bool,
    pub file_prefix: String,
    pub out_dir: PathBuf,
    /// Pixels per cell edge.
    pub scale: u32,
}

impl PlotParams {
    /// Whether any output is produced, i.e. whether step 0 is worth rendering.
    pub fn wants_output(&self) -> bool {
        self.show_plots || self.save_plots
    }
}

impl Default for PlotParams {
    fn default() -> Self {
        Self {
            show_plots: false,
            save_plots: true,
            file_prefix: "plot".into(),
            out_dir: PathBuf::from("plots"),
            scale: 8,
        }
    }
}
