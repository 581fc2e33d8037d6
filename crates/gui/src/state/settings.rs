//! Application settings

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the render endpoint
pub const RENDER_URL_ENV: &str = "STUDIO_RENDER_URL";

/// Grid display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Show grid
    pub visible: bool,
    /// Grid cell size in scene units
    pub size: f32,
    /// Number of grid lines in each direction from origin
    pub range: i32,
    /// Grid line opacity (0.0 - 1.0)
    pub opacity: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            size: 1.0,
            range: 8,
            opacity: 0.6,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Initial background color RGB
    pub background_color: [u8; 3],
    /// Selection outline color RGB
    pub selection_color: [u8; 3],
    /// Measurement line color RGB
    pub measurement_color: [u8; 3],
    /// Show X/Y/Z labels at the axis ends
    pub show_axis_labels: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [30, 30, 35],
            selection_color: [0, 220, 255],
            measurement_color: [255, 200, 0],
            show_axis_labels: true,
        }
    }
}

/// Measurement label settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementSettings {
    /// Number of decimal places for distance labels
    pub precision: usize,
    /// Suffix printed after the value, e.g. "m"
    pub unit_suffix: String,
}

impl Default for MeasurementSettings {
    fn default() -> Self {
        Self {
            precision: 2,
            unit_suffix: String::new(),
        }
    }
}

impl MeasurementSettings {
    pub fn format(&self, distance: f64) -> String {
        if self.unit_suffix.is_empty() {
            format!("{:.*}", self.precision, distance)
        } else {
            format!("{:.*} {}", self.precision, distance, self.unit_suffix)
        }
    }
}

/// Render service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    /// URL of the render relay endpoint
    pub endpoint: String,
    /// Prompt prefilled into the render panel
    pub default_prompt: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3001/api/render".to_string(),
            default_prompt: shared::DEFAULT_RENDER_PROMPT.to_string(),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub measurement: MeasurementSettings,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

impl AppSettings {
    /// Load settings from file, or return default if not found.
    /// `STUDIO_RENDER_URL` wins over the stored endpoint.
    pub fn load() -> Self {
        let mut settings = Self::load_file().unwrap_or_default();
        settings.apply_env_override(std::env::var(RENDER_URL_ENV).ok());
        settings
    }

    fn load_file() -> Option<Self> {
        let dirs = project_dirs()?;
        let config_path = dirs.config_dir().join("settings.json");
        let json = std::fs::read_to_string(&config_path).ok()?;
        match serde_json::from_str(&json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!("Ignoring malformed {}: {}", config_path.display(), e);
                None
            }
        }
    }

    pub fn apply_env_override(&mut self, endpoint: Option<String>) {
        if let Some(url) = endpoint.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("Render endpoint overridden by {}", RENDER_URL_ENV);
            self.render.endpoint = url.trim().to_string();
        }
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = project_dirs() {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    if let Err(e) = std::fs::write(&config_path, json) {
                        tracing::warn!("Failed to save settings: {}", e);
                    }
                }
            }
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "studio3d", "studio3d")
}
