// Dashboard service - Use cases behind the dashboard controls and chart
use crate::application::dataset_repository::DatasetRepository;
use crate::application::error::DashboardError;
use crate::application::series_builder::{build_rows, y_domain};
use crate::application::view_state::{ChartCommand, ViewState, VisibilityState};
use crate::domain::chart::{
    color_for, cr_data_key, BrushRange, ChartLine, ChartView, LegendEntry, Row, Tooltip,
    TooltipEntry, YDomain,
};
use crate::domain::experiment::{Dataset, Mode};
use crate::domain::format::{
    format_axis_percent, format_date_label, format_percent, DEFAULT_PERCENT_DIGITS,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

type Result<T> = std::result::Result<T, DashboardError>;

const Y_TICK_COUNT: usize = 5;

/// Loaded dataset plus everything derived from it.
struct LoadedDashboard {
    dataset: Dataset,
    rows: Vec<Row>,
    domain: YDomain,
    view: ViewState,
}

impl LoadedDashboard {
    fn new(dataset: Dataset) -> Self {
        let visibility = VisibilityState::init(dataset.variant_names());
        let built = build_rows(&dataset, Mode::default(), |name| visibility.is_visible(name));
        let view = ViewState::new(visibility, built.rows.len());
        Self {
            dataset,
            rows: built.rows,
            domain: built.domain,
            view,
        }
    }

    fn regroup(&mut self, mode: Mode) {
        let visibility = &self.view.visibility;
        let built = build_rows(&self.dataset, mode, |name| visibility.is_visible(name));
        self.rows = built.rows;
        self.domain = built.domain;
        self.view.set_mode(mode, self.rows.len());
    }

    fn toggle(&mut self, name: &str) -> bool {
        let next = self.view.visibility.toggled(name);
        if next == self.view.visibility {
            return false;
        }
        self.view.visibility = next;
        let visibility = &self.view.visibility;
        self.domain = y_domain(&self.rows, |name| visibility.is_visible(name));
        true
    }

    fn legend(&self) -> Vec<LegendEntry> {
        self.view
            .visibility
            .iter()
            .enumerate()
            .map(|(idx, (name, visible))| LegendEntry {
                name: name.to_string(),
                color: color_for(idx),
                visible,
            })
            .collect()
    }

    fn chart_view(&self) -> ChartView {
        let lines = self
            .legend()
            .into_iter()
            .filter(|entry| entry.visible)
            .map(|entry| ChartLine {
                data_key: cr_data_key(&entry.name),
                name: entry.name,
                color: entry.color,
                connect_nulls: true,
            })
            .collect();

        ChartView {
            mode: self.view.mode,
            rows: self.rows.clone(),
            domain: self.domain,
            lines,
            legend: self.legend(),
            x_labels: self.rows.iter().map(|r| format_date_label(&r.date)).collect(),
            y_labels: self
                .domain
                .ticks(Y_TICK_COUNT)
                .into_iter()
                .map(|v| format_axis_percent(Some(v)))
                .collect(),
            brush: self.view.brush,
        }
    }

    fn tooltip(&self, date: &str) -> Option<Tooltip> {
        let row = self.rows.iter().find(|r| r.date == date)?;
        let entries = self
            .legend()
            .into_iter()
            .filter(|entry| entry.visible)
            .map(|entry| TooltipEntry {
                value: format_percent(row.cr(&entry.name), DEFAULT_PERCENT_DIGITS),
                name: entry.name,
                color: entry.color,
            })
            .collect();

        Some(Tooltip {
            label: row.date.clone(),
            entries,
        })
    }
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn DatasetRepository>,
    state: Arc<RwLock<Option<LoadedDashboard>>>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn DatasetRepository>) -> Self {
        Self {
            repository,
            state: Arc::new(RwLock::new(None)),
        }
    }

    /// Fetch and validate the dataset, then reset all view state.
    pub async fn load(&self) -> Result<()> {
        let dataset = self.repository.load_dataset().await?;
        dataset.validate()?;

        tracing::info!(
            "Loaded dataset from {}: {} variants, {} records",
            self.repository.source(),
            dataset.variations.len(),
            dataset.data.len()
        );

        let loaded = LoadedDashboard::new(dataset);
        *self.state.write().await = Some(loaded);
        Ok(())
    }

    /// Fire-and-forget startup load. A failure is logged and the dashboard
    /// stays unloaded.
    pub fn spawn_load(&self) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(e) = service.load().await {
                tracing::error!(
                    "Failed to load dataset from {}: {}",
                    service.repository.source(),
                    e
                );
            }
        })
    }

    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.is_some()
    }

    pub async fn variants(&self) -> Result<Vec<LegendEntry>> {
        let guard = self.state.read().await;
        let loaded = guard.as_ref().ok_or(DashboardError::NotLoaded)?;
        Ok(loaded.legend())
    }

    pub async fn toggle_variant(&self, name: &str) -> Result<Vec<LegendEntry>> {
        let mut guard = self.state.write().await;
        let loaded = guard.as_mut().ok_or(DashboardError::NotLoaded)?;

        if !loaded.view.visibility.contains(name) {
            return Err(DashboardError::UnknownVariant(name.to_string()));
        }
        if !loaded.toggle(name) {
            tracing::debug!("Ignoring toggle of {}: last visible variant", name);
        }

        Ok(loaded.legend())
    }

    pub async fn mode(&self) -> Result<Mode> {
        let guard = self.state.read().await;
        let loaded = guard.as_ref().ok_or(DashboardError::NotLoaded)?;
        Ok(loaded.view.mode)
    }

    pub async fn set_mode(&self, mode: Mode) -> Result<Mode> {
        let mut guard = self.state.write().await;
        let loaded = guard.as_mut().ok_or(DashboardError::NotLoaded)?;

        if loaded.view.mode != mode {
            loaded.regroup(mode);
            tracing::debug!("Grouping set to {:?}: {} rows", mode, loaded.rows.len());
        }

        Ok(loaded.view.mode)
    }

    pub async fn chart_view(&self) -> Result<ChartView> {
        let guard = self.state.read().await;
        let loaded = guard.as_ref().ok_or(DashboardError::NotLoaded)?;
        Ok(loaded.chart_view())
    }

    pub async fn tooltip(&self, date: &str) -> Result<Tooltip> {
        let guard = self.state.read().await;
        let loaded = guard.as_ref().ok_or(DashboardError::NotLoaded)?;
        loaded
            .tooltip(date)
            .ok_or_else(|| DashboardError::UnknownDate(date.to_string()))
    }

    pub async fn apply(&self, command: ChartCommand) -> Result<Option<BrushRange>> {
        let mut guard = self.state.write().await;
        let loaded = guard.as_mut().ok_or(DashboardError::NotLoaded)?;
        let row_count = loaded.rows.len();
        loaded.view.apply(command, row_count);
        Ok(loaded.view.brush)
    }
}
