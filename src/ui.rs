use egui::{Color32, Pos2};
use horizon_marker::{ExportOptions, HorizonPoint};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Preferences kept between runs in eframe storage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Overlay
    pub show_grid: bool,
    pub grid_step: f32,

    // Colors as RGB so they survive storage without egui's serde feature
    pub marker_color: [u8; 3],
    pub zero_line_color: [u8; 3],

    pub dark_mode: bool,

    pub export: ExportOptions,

    // Where the file dialogs open next time
    pub last_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_grid: true,
            grid_step: 30.0,
            marker_color: [255, 0, 0],
            zero_line_color: [0, 0, 255],
            dark_mode: true,
            export: ExportOptions::default(),
            last_dir: None,
        }
    }
}

impl Settings {
    pub fn marker_color(&self) -> Color32 {
        let [r, g, b] = self.marker_color;
        Color32::from_rgb(r, g, b)
    }

    pub fn zero_line_color(&self) -> Color32 {
        let [r, g, b] = self.zero_line_color;
        Color32::from_rgb(r, g, b)
    }
}

#[derive(Default)]
pub struct UiState {
    pub settings: Settings,

    // Hover readout
    pub hover_pixel: Option<Pos2>,
    pub hover_angles: Option<HorizonPoint>,

    // Last message shown under the toolbar
    pub status: String,
}

impl UiState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}
