// Visibility, grouping and zoom state driven by the dashboard controls
use crate::domain::chart::BrushRange;
use crate::domain::experiment::Mode;
use indexmap::IndexMap;

/// Which variants are plotted, keyed by name in dataset order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibilityState {
    visible: IndexMap<String, bool>,
}

impl VisibilityState {
    pub fn init<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            visible: names.into_iter().map(|n| (n.into(), true)).collect(),
        }
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.visible.get(name).copied().unwrap_or(false)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.visible.contains_key(name)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.values().filter(|v| **v).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.visible.iter().map(|(name, v)| (name.as_str(), *v))
    }

    /// Returns the state with `name` flipped. Hiding the last visible variant
    /// and unknown names leave the state unchanged.
    pub fn toggled(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.toggle(name);
        next
    }

    /// In-place form of [`toggled`](Self::toggled); returns whether anything changed.
    pub fn toggle(&mut self, name: &str) -> bool {
        let visible_count = self.visible_count();
        match self.visible.get_mut(name) {
            Some(flag) if *flag && visible_count == 1 => false,
            Some(flag) => {
                *flag = !*flag;
                true
            }
            None => false,
        }
    }
}

/// Explicit commands from the control surface to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartCommand {
    ResetZoom,
    Zoom { start_index: usize, end_index: usize },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub visibility: VisibilityState,
    pub mode: Mode,
    pub brush: Option<BrushRange>,
}

impl ViewState {
    pub fn new(visibility: VisibilityState, row_count: usize) -> Self {
        Self {
            visibility,
            mode: Mode::default(),
            brush: BrushRange::full(row_count),
        }
    }

    /// Switches grouping; the brush spans the new row table in full.
    pub fn set_mode(&mut self, mode: Mode, row_count: usize) {
        self.mode = mode;
        self.brush = BrushRange::full(row_count);
    }

    pub fn apply(&mut self, command: ChartCommand, row_count: usize) {
        self.brush = match command {
            ChartCommand::ResetZoom => BrushRange::full(row_count),
            ChartCommand::Zoom {
                start_index,
                end_index,
            } => BrushRange::clamped(start_index, end_index, row_count),
        };
    }
}
