use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub sidebar_width: u16,
    pub sidebar_min_width: u16,
    pub sidebar_max_width: u16,
    pub bottom_panel_visible: bool,
    pub bottom_panel_height: u16,
    pub bottom_panel_min_height: u16,
    pub bottom_panel_max_height: u16,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            sidebar_width: 260,
            sidebar_min_width: 160,
            sidebar_max_width: 600,
            bottom_panel_visible: false,
            bottom_panel_height: 200,
            bottom_panel_min_height: 80,
            bottom_panel_max_height: 600,
        }
    }
}

impl LayoutSettings {
    /// Swaps inverted bounds so clamping never sees `min > max`.
    pub fn normalized(mut self) -> Self {
        if self.sidebar_min_width > self.sidebar_max_width {
            std::mem::swap(&mut self.sidebar_min_width, &mut self.sidebar_max_width);
        }
        if self.bottom_panel_min_height > self.bottom_panel_max_height {
            std::mem::swap(
                &mut self.bottom_panel_min_height,
                &mut self.bottom_panel_max_height,
            );
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Artificial delay applied by the mock backend to every call.
    pub latency_ms: u64,
    pub seed_demo_project: bool,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            latency_ms: 300,
            seed_demo_project: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub ttl_ms: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { ttl_ms: 4000 }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
