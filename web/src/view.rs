use pixelwar_core::*;

/// Everything the page shows, as last painted by the core.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ViewState {
    pub(crate) enabled: Controls,
    pub(crate) countdowns: [String; Gate::COUNT],
    pub(crate) highlights: [bool; Team::ALL.len()],
    pub(crate) status: Option<Notice>,
    /// `None` between a clear and the next render.
    pub(crate) grid: Option<GridSnapshot>,
    pub(crate) activity: Vec<PlayerRecord>,
    alerts: Vec<String>,
}

impl ViewState {
    pub(crate) fn is_enabled(&self, controls: Controls) -> bool {
        self.enabled.contains(controls)
    }

    pub(crate) fn is_highlighted(&self, team: Team) -> bool {
        self.highlights[team.index()]
    }

    pub(crate) fn countdown(&self, gate: Gate) -> &str {
        &self.countdowns[gate.index()]
    }

    /// Blocking dialogs queued since the last call, shown once the frame is rendered.
    pub(crate) fn take_alerts(&mut self) -> Vec<String> {
        core::mem::take(&mut self.alerts)
    }
}

impl ViewPort for ViewState {
    fn set_enabled_controls(&mut self, controls: Controls) {
        self.enabled = controls;
    }

    fn set_countdown(&mut self, gate: Gate, text: &str) {
        text.clone_into(&mut self.countdowns[gate.index()]);
    }

    fn set_team_highlight(&mut self, team: Team, highlighted: bool) {
        self.highlights[team.index()] = highlighted;
    }

    fn notify(&mut self, notice: Notice) {
        if notice.level == NoticeLevel::Alert {
            self.alerts.push(notice.text.clone());
        }
        self.status = Some(notice);
    }

    fn clear_grid(&mut self) {
        self.grid = None;
    }

    fn render_grid(&mut self, grid: &GridSnapshot) {
        self.grid = Some(grid.clone());
    }

    fn render_activity(&mut self, records: &[PlayerRecord]) {
        self.activity = records.to_vec();
    }
}

pub(crate) const fn notice_class(level: NoticeLevel) -> &'static str {
    use NoticeLevel::*;
    match level {
        Success => "success",
        Rejected => "rejected",
        Unreachable => "unreachable",
        Alert => "alert",
    }
}
