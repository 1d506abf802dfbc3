use std::collections::HashMap;
use std::path::{Path, PathBuf};

use health_dashboards::dashboard::casualties::{self, CasualtySelection, Metric};
use health_dashboards::dashboard::health::{self, HealthSelection};
use health_dashboards::dashboard::{drinking, ChartKind, DashboardKind, Panel};
use health_dashboards::{DatasetCache, Settings};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Every dataset loaded so far, keyed by source.
    pub cache: DatasetCache,

    /// Dashboard currently shown.
    pub active: DashboardKind,

    /// Sources picked through File → Open, replacing the configured ones.
    pub overrides: HashMap<DashboardKind, PathBuf>,

    pub health: HealthSelection,
    pub casualties: CasualtySelection,

    /// Choices offered by the health dashboard's selectors.
    pub indicator_options: Vec<String>,
    pub sex_options: Vec<String>,

    /// Result of the last interaction (None after an error).
    pub panel: Option<Panel>,

    /// Colours for the series or bars of `panel`.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings, active: DashboardKind) -> Self {
        let casualties = CasualtySelection::new(&settings.top_n);
        let mut state = Self {
            settings,
            cache: DatasetCache::new(),
            active,
            overrides: HashMap::new(),
            health: HealthSelection::default(),
            casualties,
            indicator_options: Vec::new(),
            sex_options: Vec::new(),
            panel: None,
            color_map: None,
            status_message: None,
        };
        state.refresh();
        state
    }

    /// The file the active dashboard reads.
    pub fn source(&self) -> PathBuf {
        self.overrides
            .get(&self.active)
            .cloned()
            .unwrap_or_else(|| self.active.source(&self.settings))
    }

    /// Re-run the active dashboard's query and rebuild the colour map.
    pub fn refresh(&mut self) {
        match self.compute() {
            Ok(panel) => {
                self.color_map = Some(color_map_for(&panel));
                self.panel = Some(panel);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("{} dashboard failed: {e}", self.active);
                self.status_message = Some(format!("Error: {e}"));
                self.panel = None;
                self.color_map = None;
            }
        }
    }

    fn compute(&mut self) -> health_dashboards::Result<Panel> {
        let source = self.source();
        let raw = self.cache.get_or_load(&source)?;
        let data = self.active.prepare(&raw, &self.settings)?;

        let panel = match self.active {
            DashboardKind::HealthIndicators => {
                self.indicator_options = health::indicators(&data)?;
                let current = self
                    .health
                    .indicator
                    .clone()
                    .filter(|i| self.indicator_options.contains(i))
                    .or_else(|| self.indicator_options.first().cloned());
                self.sex_options = match &current {
                    Some(indicator) => health::sex_choices(&data, indicator)?,
                    None => Vec::new(),
                };
                if !self.sex_options.is_empty() && !self.sex_options.contains(&self.health.sex) {
                    self.health.sex = health_dashboards::ALL.to_string();
                }
                self.health.indicator = current;
                health::view(&data, &self.health)?
            }
            DashboardKind::BingeDrinking => drinking::view(&data)?,
            DashboardKind::MunicipalityCasualties => {
                casualties::view(&data, &self.casualties, &self.settings.top_n)?
            }
        };
        Ok(panel)
    }

    pub fn set_dashboard(&mut self, kind: DashboardKind) {
        if self.active != kind {
            self.active = kind;
            self.refresh();
        }
    }

    /// Point the active dashboard at another file.
    pub fn open_source(&mut self, path: &Path) {
        log::info!("Using {} for the {} dashboard", path.display(), self.active);
        self.overrides.insert(self.active, path.to_path_buf());
        self.refresh();
    }

    pub fn select_indicator(&mut self, indicator: String) {
        self.health.indicator = Some(indicator);
        self.refresh();
    }

    pub fn select_sex(&mut self, sex: String) {
        self.health.sex = sex;
        self.refresh();
    }

    pub fn select_metric(&mut self, metric: Metric) {
        self.casualties.metric = metric;
        self.refresh();
    }

    pub fn set_top_n(&mut self, n: usize) {
        self.casualties.top_n = self.settings.top_n.clamp(n);
        self.refresh();
    }
}

/// Bars are coloured per category, lines per series.
fn color_map_for(panel: &Panel) -> ColorMap {
    let labels: Vec<String> = match panel.chart.kind {
        ChartKind::Bar => panel
            .chart
            .bars(&panel.table)
            .into_iter()
            .map(|b| b.label)
            .collect(),
        ChartKind::Line => panel
            .chart
            .line_series(&panel.table)
            .into_iter()
            .map(|s| s.name)
            .collect(),
    };
    ColorMap::new(&labels)
}
