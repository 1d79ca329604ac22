use futures_util::future::join_all;

use crate::*;

/// Wires the cooldowns, the grid and the team session into the player's control flow.
///
/// Actions are split around the network: starting one validates locally and yields a
/// [`Call`], the host runs it and hands the [`Reply`] to [`PixelClient::on_reply`], which
/// applies the effects and may yield follow-up calls. [`PixelClient::settle`] does the
/// whole round trip for hosts that can hold the client across an await.
#[derive(Debug)]
pub struct PixelClient<S: Scheduler, P: Preferences> {
    cooldowns: CooldownController<S>,
    grid: GridSyncEngine,
    session: TeamSession<P>,
}

impl<S: Scheduler, P: Preferences> PixelClient<S, P> {
    pub fn new(scheduler: S, prefs: P) -> Self {
        Self {
            cooldowns: CooldownController::new(scheduler),
            grid: GridSyncEngine::default(),
            session: TeamSession::new(prefs),
        }
    }

    pub fn cooldowns(&self) -> &CooldownController<S> {
        &self.cooldowns
    }

    pub fn grid(&self) -> &GridSyncEngine {
        &self.grid
    }

    pub fn session(&self) -> &TeamSession<P> {
        &self.session
    }

    /// Paints the restored state and returns the initial loads.
    pub fn start(&mut self, view: &mut impl ViewPort) -> Vec<Call> {
        self.session.restore_highlight(view);
        for gate in Gate::ALL {
            view.set_countdown(gate, gate.open_label());
        }
        view.set_enabled_controls(self.cooldowns.enabled_controls());
        vec![self.grid.load_grid(), self.activity_call()]
    }

    pub fn set_identity_input(&mut self, input: impl Into<String>) {
        self.session.set_identity_input(input);
    }

    pub fn toggle_identity_mask(&mut self) -> bool {
        self.session.toggle_mask()
    }

    pub fn choose_team(
        &mut self,
        team: Team,
        view: &mut impl ViewPort,
    ) -> Result<Call, LocalValidationError> {
        match self.prepare_team_switch() {
            Ok(uid) => {
                self.session.begin_team_switch(team, view);
                Ok(Call::SetTeam { uid, team })
            }
            Err(err) => Err(self.reject(err, view)),
        }
    }

    pub fn select_cell(
        &mut self,
        row: usize,
        col: usize,
        view: &mut impl ViewPort,
    ) -> Result<(), LocalValidationError> {
        self.session
            .validate_identity()
            .and_then(|_| self.cooldowns.check_pixel_edit())
            .and_then(|()| self.grid.select_cell((row, col)))
            .map_err(|err| self.reject(err, view))
    }

    pub fn submit_edit(
        &mut self,
        color: impl Into<CellColor>,
        view: &mut impl ViewPort,
    ) -> Result<Call, LocalValidationError> {
        let color = color.into();
        self.session
            .validate_identity()
            .and_then(|uid| self.grid.submit_edit(color, uid, &self.cooldowns))
            .map_err(|err| self.reject(err, view))
    }

    /// Applies a backend reply and returns the calls it triggers.
    pub fn on_reply(&mut self, reply: Reply, view: &mut impl ViewPort) -> Vec<Call> {
        match reply {
            Reply::Grid { seq, result } => {
                if let Err(err) = self.grid.apply_grid(seq, result, view) {
                    surface_failure("grid load", err, view);
                }
                Vec::new()
            }
            Reply::Activity(result) => {
                match result {
                    Ok(records) => view.render_activity(&recent_activity(records)),
                    Err(err) => surface_failure("activity load", err, view),
                }
                Vec::new()
            }
            Reply::TeamSet { team, result } => match result {
                Ok(ack) => {
                    log::info!("joined team {}", team);
                    self.session.confirm_team(team, view);
                    self.cooldowns.arm_team_switch(view);
                    self.cooldowns.arm_penalty_reset(view);
                    self.cooldowns.disable_all_action_controls(view);
                    acknowledge(ack, view);
                    self.refresh_all(view)
                }
                Err(BackendError::Rejected { status, message }) => {
                    log::warn!("team switch to {} refused ({}): {}", team, status, message);
                    self.session.rollback_team(view);
                    view.notify(Notice::rejected(message));
                    Vec::new()
                }
                Err(BackendError::Transport(reason)) => {
                    log::error!("team switch to {} failed: {}", team, reason);
                    self.session.rollback_team(view);
                    view.notify(Notice::unreachable());
                    Vec::new()
                }
            },
            Reply::PixelSet { edit, result } => match result {
                Ok(ack) => {
                    log::info!("painted ({}, {}) {}", edit.row, edit.col, edit.color);
                    let calls = self.refresh_all(view);
                    self.cooldowns.arm_pixel_edit(view);
                    self.cooldowns.arm_penalty_reset(view);
                    acknowledge(ack, view);
                    calls
                }
                Err(BackendError::Rejected { status, message }) => {
                    log::warn!(
                        "edit of ({}, {}) refused ({}): {}",
                        edit.row,
                        edit.col,
                        status,
                        message
                    );
                    view.notify(Notice::rejected(message));
                    Vec::new()
                }
                Err(BackendError::Transport(reason)) => {
                    log::error!("edit of ({}, {}) failed: {}", edit.row, edit.col, reason);
                    view.notify(Notice::unreachable());
                    Vec::new()
                }
            },
        }
    }

    /// Routes a scheduler tick.
    pub fn tick(&mut self, ticket: Ticket, view: &mut impl ViewPort) {
        if self.cooldowns.tick(ticket, view) == Some(Gate::PenaltyReset) {
            self.session.reset_selection();
        }
    }

    /// Runs `call` and every call it leads to, follow-ups of one reply concurrently.
    pub async fn settle<B: BackendClient>(
        &mut self,
        call: Call,
        backend: &B,
        view: &mut impl ViewPort,
    ) {
        let mut calls = vec![call];
        while !calls.is_empty() {
            let replies = join_all(calls.into_iter().map(|call| call.run(backend))).await;
            calls = replies
                .into_iter()
                .flat_map(|reply| self.on_reply(reply, &mut *view))
                .collect();
        }
    }

    fn prepare_team_switch(&mut self) -> Result<Uid, LocalValidationError> {
        let uid = self.session.validate_identity()?;
        if let Some(remaining) = self.cooldowns.remaining(Gate::TeamSwitch) {
            return Err(LocalValidationError::TeamCooldown { remaining });
        }
        Ok(uid)
    }

    fn refresh_all(&mut self, view: &mut impl ViewPort) -> Vec<Call> {
        vec![self.grid.refresh(view), self.activity_call()]
    }

    fn activity_call(&self) -> Call {
        Call::LoadActivity {
            uid: self.session.activity_uid(),
        }
    }

    fn reject(&self, err: LocalValidationError, view: &mut impl ViewPort) -> LocalValidationError {
        log::warn!("rejected locally: {}", err);
        view.notify(Notice::alert(err.to_string()));
        err
    }
}

fn acknowledge(ack: Ack, view: &mut impl ViewPort) {
    if let Some(message) = ack.message {
        view.notify(Notice::success(message));
    }
}

fn surface_failure(what: &str, err: BackendError, view: &mut impl ViewPort) {
    match err {
        BackendError::Rejected { status, message } => {
            log::warn!("{} refused ({}): {}", what, status, message);
            view.notify(Notice::rejected(message));
        }
        BackendError::Transport(reason) => {
            log::error!("{} failed: {}", what, reason);
            view.notify(Notice::unreachable());
        }
    }
}
