//! Deterministic stand-ins for the host capabilities.

use core::cell::{Cell, RefCell};
use core::time::Duration;
use std::collections::HashMap;
use std::rc::Rc;

use crate::*;

pub fn uid() -> Uid {
    Uid::new_unchecked("a1b2c3d4".to_string())
}

/// Scheduler driven by hand: tests read [`ManualScheduler::live`] and tick those.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    live: Rc<RefCell<Vec<Ticket>>>,
}

impl ManualScheduler {
    pub fn live(&self) -> Vec<Ticket> {
        self.live.borrow().clone()
    }
}

#[derive(Debug)]
pub struct ManualHandle {
    ticket: Ticket,
    live: Rc<RefCell<Vec<Ticket>>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.live.borrow_mut().retain(|&ticket| ticket != self.ticket);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn start(&mut self, ticket: Ticket, period: Duration) -> ManualHandle {
        assert_eq!(period, TICK);
        self.live.borrow_mut().push(ticket);
        ManualHandle {
            ticket,
            live: Rc::clone(&self.live),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub enabled: Controls,
    pub countdowns: HashMap<Gate, String>,
    pub highlights: [bool; Team::ALL.len()],
    pub notices: Vec<Notice>,
    pub grid: Option<GridSnapshot>,
    pub grid_clears: usize,
    pub activity: Vec<PlayerRecord>,
}

impl RecordingView {
    pub fn countdown(&self, gate: Gate) -> &str {
        self.countdowns.get(&gate).map_or("", String::as_str)
    }

    pub fn highlighted_teams(&self) -> Vec<Team> {
        Team::ALL
            .into_iter()
            .filter(|team| self.highlights[team.index()])
            .collect()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.notices
            .iter()
            .filter(|notice| notice.level == NoticeLevel::Alert)
            .map(|notice| notice.text.clone())
            .collect()
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl ViewPort for RecordingView {
    fn set_enabled_controls(&mut self, controls: Controls) {
        self.enabled = controls;
    }

    fn set_countdown(&mut self, gate: Gate, text: &str) {
        self.countdowns.insert(gate, text.to_string());
    }

    fn set_team_highlight(&mut self, team: Team, highlighted: bool) {
        self.highlights[team.index()] = highlighted;
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn clear_grid(&mut self) {
        self.grid = None;
        self.grid_clears += 1;
    }

    fn render_grid(&mut self, grid: &GridSnapshot) {
        self.grid = Some(grid.clone());
    }

    fn render_activity(&mut self, records: &[PlayerRecord]) {
        self.activity = records.to_vec();
    }
}

/// In-process pixel server. Injected failures stay until replaced.
#[derive(Debug, Default)]
pub struct FakeBackend {
    grid: RefCell<GridPayload>,
    players: RefCell<Vec<PlayerRecord>>,
    grid_failure: RefCell<Option<BackendError>>,
    team_failure: RefCell<Option<BackendError>>,
    pixel_failure: RefCell<Option<BackendError>>,
    drop_pixel_writes: Cell<bool>,
    calls: RefCell<HashMap<&'static str, usize>>,
}

impl FakeBackend {
    pub fn with_grid(rows: usize, cols: usize, color: &str) -> Self {
        let players = vec![
            PlayerRecord {
                name: "alice".into(),
                team: "rouge".into(),
                last_modified_at: Some("2024-03-01T10:00:00Z".into()),
                banned: false,
                edit_count: 4,
            },
            PlayerRecord {
                name: "bob".into(),
                team: "bleu".into(),
                last_modified_at: None,
                banned: false,
                edit_count: 0,
            },
        ];
        Self {
            grid: RefCell::new(vec![vec![color.to_string(); cols]; rows]),
            players: RefCell::new(players),
            ..Self::default()
        }
    }

    pub fn fail_grid_with(&self, err: BackendError) {
        self.grid_failure.replace(Some(err));
    }

    pub fn fail_team_with(&self, err: BackendError) {
        self.team_failure.replace(Some(err));
    }

    pub fn fail_pixel_with(&self, err: BackendError) {
        self.pixel_failure.replace(Some(err));
    }

    /// Acknowledge edits without storing them.
    pub fn ignore_pixel_writes(&self) {
        self.drop_pixel_writes.set(true);
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls.borrow().get(operation).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().values().sum()
    }

    pub fn reset_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, operation: &'static str) {
        *self.calls.borrow_mut().entry(operation).or_default() += 1;
    }
}

impl BackendClient for FakeBackend {
    async fn get_grid(&self) -> BackendResult<GridSnapshot> {
        self.record("get_grid");
        if let Some(err) = self.grid_failure.borrow().clone() {
            return Err(err);
        }
        GridSnapshot::try_from(self.grid.borrow().clone())
            .map_err(|err| BackendError::Transport(err.to_string()))
    }

    async fn get_player_activity(&self, _uid: &str) -> BackendResult<Vec<PlayerRecord>> {
        self.record("get_player_activity");
        Ok(self.players.borrow().clone())
    }

    async fn set_team(&self, _uid: &Uid, _team: Team) -> BackendResult<Ack> {
        self.record("set_team");
        if let Some(err) = self.team_failure.borrow().clone() {
            return Err(err);
        }
        Ok(Ack {
            message: Some("Equipe changée".into()),
        })
    }

    async fn set_pixel(&self, edit: &PixelEdit) -> BackendResult<Ack> {
        self.record("set_pixel");
        if let Some(err) = self.pixel_failure.borrow().clone() {
            return Err(err);
        }
        if !self.drop_pixel_writes.get() {
            let mut grid = self.grid.borrow_mut();
            let cell = grid
                .get_mut(edit.row)
                .and_then(|row| row.get_mut(edit.col))
                .ok_or_else(|| BackendError::Rejected {
                    status: 400,
                    message: "Case invalide".into(),
                })?;
            *cell = edit.color.clone();
        }
        Ok(Ack::default())
    }
}
