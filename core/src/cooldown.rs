use core::fmt;

use crate::*;

struct Armed<H> {
    ticket: Ticket,
    // held only so that dropping it cancels the timer
    _handle: H,
}

struct Slot<H> {
    remaining: u32,
    timer: Option<Armed<H>>,
}

impl<H> Default for Slot<H> {
    fn default() -> Self {
        Self {
            remaining: 0,
            timer: None,
        }
    }
}

/// Owns the three timed gates and the control affordances derived from them.
///
/// Each gate holds at most one live timer handle. Re-arming drops the previous handle
/// before starting a new one, and dropping the controller drops all of them.
pub struct CooldownController<S: Scheduler> {
    scheduler: S,
    slots: [Slot<S::Handle>; Gate::COUNT],
    suspended: bool,
    generation: u64,
}

impl<S: Scheduler> CooldownController<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            slots: core::array::from_fn(|_| Slot::default()),
            suspended: false,
            generation: 0,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn state(&self, gate: Gate) -> GateState {
        let slot = &self.slots[gate.index()];
        match slot.timer {
            Some(_) => GateState::Closed {
                remaining: slot.remaining,
            },
            None => GateState::Open,
        }
    }

    pub fn is_open(&self, gate: Gate) -> bool {
        self.state(gate).is_open()
    }

    pub fn remaining(&self, gate: Gate) -> Option<u32> {
        self.state(gate).remaining()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Controls that accept input right now.
    pub fn enabled_controls(&self) -> Controls {
        if self.suspended {
            return Controls::empty();
        }
        Gate::ALL
            .into_iter()
            .filter(|&gate| !self.is_open(gate))
            .fold(Controls::all(), |enabled, gate| {
                enabled.difference(gate.controls())
            })
    }

    /// Refuses pixel actions while the edit gate is closed or all actions are suspended.
    pub fn check_pixel_edit(&self) -> Result<(), LocalValidationError> {
        if let Some(remaining) = self.remaining(Gate::PixelEdit) {
            return Err(LocalValidationError::PixelCooldown { remaining });
        }
        if !self.enabled_controls().contains(Controls::PIXEL) {
            return Err(LocalValidationError::ActionsSuspended {
                remaining: self.remaining(Gate::TeamSwitch).unwrap_or(0),
            });
        }
        Ok(())
    }

    /// (Re)starts `gate` from its full duration.
    pub fn arm(&mut self, gate: Gate, view: &mut impl ViewPort) {
        let slot = &mut self.slots[gate.index()];
        if let Some(previous) = slot.timer.take() {
            log::debug!(
                "{:?}: cancelling countdown #{}",
                gate,
                previous.ticket.generation
            );
        }

        self.generation += 1;
        let ticket = Ticket {
            gate,
            generation: self.generation,
        };
        let handle = self.scheduler.start(ticket, TICK);
        let slot = &mut self.slots[gate.index()];
        slot.remaining = gate.seconds();
        slot.timer = Some(Armed {
            ticket,
            _handle: handle,
        });
        log::debug!("{:?}: armed for {}s (#{})", gate, gate.seconds(), ticket.generation);

        view.set_countdown(gate, &gate.countdown_label(gate.seconds()));
        self.sync_controls(view);
    }

    pub fn arm_team_switch(&mut self, view: &mut impl ViewPort) {
        self.arm(Gate::TeamSwitch, view);
    }

    pub fn arm_pixel_edit(&mut self, view: &mut impl ViewPort) {
        self.arm(Gate::PixelEdit, view);
    }

    pub fn arm_penalty_reset(&mut self, view: &mut impl ViewPort) {
        self.arm(Gate::PenaltyReset, view);
    }

    pub fn disable_all_action_controls(&mut self, view: &mut impl ViewPort) {
        self.suspended = true;
        self.sync_controls(view);
    }

    pub fn enable_all_action_controls(&mut self, view: &mut impl ViewPort) {
        self.suspended = false;
        self.sync_controls(view);
    }

    /// Advances the countdown `ticket` belongs to, returns the gate if it just opened.
    pub fn tick(&mut self, ticket: Ticket, view: &mut impl ViewPort) -> Option<Gate> {
        let gate = ticket.gate;
        let slot = &mut self.slots[gate.index()];
        match &slot.timer {
            Some(armed) if armed.ticket == ticket => {}
            _ => {
                log::trace!("{:?}: ignoring stale tick #{}", gate, ticket.generation);
                return None;
            }
        }

        slot.remaining = slot.remaining.saturating_sub(1);
        log::trace!("{:?}: {}s left", gate, slot.remaining);
        if slot.remaining > 0 {
            view.set_countdown(gate, &gate.countdown_label(slot.remaining));
            return None;
        }

        slot.timer = None;
        log::info!("{:?}: open", gate);
        view.set_countdown(gate, gate.open_label());
        match gate {
            Gate::TeamSwitch => self.suspended = false,
            Gate::PixelEdit => {}
            Gate::PenaltyReset => {
                for team in Team::ALL {
                    view.set_team_highlight(team, false);
                }
                view.notify(Notice::alert(PENALTY_NOTICE));
            }
        }
        self.sync_controls(view);
        Some(gate)
    }

    /// Opens every gate and releases all timers without touching the view.
    pub fn cancel_all(&mut self) {
        for slot in &mut self.slots {
            slot.timer = None;
            slot.remaining = 0;
        }
        self.suspended = false;
    }

    fn sync_controls(&self, view: &mut impl ViewPort) {
        view.set_enabled_controls(self.enabled_controls());
    }
}

impl<S: Scheduler> fmt::Debug for CooldownController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CooldownController")
            .field("team_switch", &self.state(Gate::TeamSwitch))
            .field("pixel_edit", &self.state(Gate::PixelEdit))
            .field("penalty_reset", &self.state(Gate::PenaltyReset))
            .field("suspended", &self.suspended)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::*;

    fn controller() -> (CooldownController<ManualScheduler>, ManualScheduler) {
        let scheduler = ManualScheduler::default();
        (CooldownController::new(scheduler.clone()), scheduler)
    }

    fn advance(
        cooldowns: &mut CooldownController<ManualScheduler>,
        scheduler: &ManualScheduler,
        view: &mut RecordingView,
        secs: u32,
    ) -> Vec<Gate> {
        let mut opened = Vec::new();
        for _ in 0..secs {
            for ticket in scheduler.live() {
                opened.extend(cooldowns.tick(ticket, view));
            }
        }
        opened
    }

    #[test]
    fn gates_start_open() {
        let (cooldowns, _) = controller();

        for gate in Gate::ALL {
            assert_eq!(cooldowns.state(gate), GateState::Open);
        }
        assert_eq!(cooldowns.enabled_controls(), Controls::all());
    }

    #[test]
    fn armed_gate_counts_down_to_open() {
        let (mut cooldowns, scheduler) = controller();
        let mut view = RecordingView::default();

        cooldowns.arm_pixel_edit(&mut view);
        assert_eq!(cooldowns.remaining(Gate::PixelEdit), Some(15));
        assert_eq!(
            view.countdown(Gate::PixelEdit),
            "Vous pouvez modifier un pixel dans 15s"
        );
        assert_eq!(view.enabled, Controls::TEAM);

        assert!(advance(&mut cooldowns, &scheduler, &mut view, 14).is_empty());
        assert_eq!(cooldowns.remaining(Gate::PixelEdit), Some(1));
        assert_eq!(
            view.countdown(Gate::PixelEdit),
            "Vous pouvez modifier un pixel dans 1s"
        );

        assert_eq!(
            advance(&mut cooldowns, &scheduler, &mut view, 1),
            vec![Gate::PixelEdit]
        );
        assert!(cooldowns.is_open(Gate::PixelEdit));
        assert_eq!(view.countdown(Gate::PixelEdit), "Vous pouvez modifier un pixel");
        assert_eq!(view.enabled, Controls::all());
        assert!(scheduler.live().is_empty());
    }

    #[test]
    fn rearming_restarts_without_stacking() {
        for gate in Gate::ALL {
            let (mut cooldowns, scheduler) = controller();
            let mut view = RecordingView::default();

            cooldowns.arm(gate, &mut view);
            advance(&mut cooldowns, &scheduler, &mut view, 3);
            cooldowns.arm(gate, &mut view);

            assert_eq!(scheduler.live().len(), 1);
            assert_eq!(cooldowns.remaining(gate), Some(gate.seconds()));

            let opened = advance(&mut cooldowns, &scheduler, &mut view, gate.seconds() - 1);
            assert!(opened.is_empty());
            let opened = advance(&mut cooldowns, &scheduler, &mut view, 5);
            assert_eq!(opened, vec![gate]);
        }
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let (mut cooldowns, scheduler) = controller();
        let mut view = RecordingView::default();

        cooldowns.arm_team_switch(&mut view);
        let stale = scheduler.live()[0];
        cooldowns.arm_team_switch(&mut view);

        for _ in 0..20 {
            assert_eq!(cooldowns.tick(stale, &mut view), None);
        }
        assert_eq!(cooldowns.remaining(Gate::TeamSwitch), Some(10));
    }

    #[test]
    fn suspension_overrides_open_gates() {
        let (mut cooldowns, scheduler) = controller();
        let mut view = RecordingView::default();

        cooldowns.arm_team_switch(&mut view);
        cooldowns.disable_all_action_controls(&mut view);
        assert_eq!(view.enabled, Controls::empty());

        advance(&mut cooldowns, &scheduler, &mut view, 10);
        assert!(!cooldowns.is_suspended());
        assert_eq!(view.enabled, Controls::all());
    }

    #[test]
    fn enabling_all_keeps_closed_gates_locked() {
        let (mut cooldowns, _) = controller();
        let mut view = RecordingView::default();

        cooldowns.arm_pixel_edit(&mut view);
        cooldowns.disable_all_action_controls(&mut view);
        cooldowns.enable_all_action_controls(&mut view);

        assert_eq!(view.enabled, Controls::TEAM);
    }

    #[test]
    fn pixel_edit_is_refused_while_suspended() {
        let (mut cooldowns, scheduler) = controller();
        let mut view = RecordingView::default();
        assert_eq!(cooldowns.check_pixel_edit(), Ok(()));

        cooldowns.arm_team_switch(&mut view);
        cooldowns.disable_all_action_controls(&mut view);
        advance(&mut cooldowns, &scheduler, &mut view, 3);
        assert_eq!(
            cooldowns.check_pixel_edit(),
            Err(LocalValidationError::ActionsSuspended { remaining: 7 })
        );

        cooldowns.arm_pixel_edit(&mut view);
        assert_eq!(
            cooldowns.check_pixel_edit(),
            Err(LocalValidationError::PixelCooldown { remaining: 15 })
        );

        advance(&mut cooldowns, &scheduler, &mut view, 15);
        assert_eq!(cooldowns.check_pixel_edit(), Ok(()));
    }

    #[test]
    fn penalty_expiry_clears_highlights_and_alerts_once() {
        let (mut cooldowns, scheduler) = controller();
        let mut view = RecordingView::default();
        view.set_team_highlight(Team::Vert, true);

        cooldowns.arm_penalty_reset(&mut view);
        advance(&mut cooldowns, &scheduler, &mut view, 10);
        cooldowns.arm_penalty_reset(&mut view);
        cooldowns.arm_pixel_edit(&mut view);
        advance(&mut cooldowns, &scheduler, &mut view, 40);

        assert_eq!(view.highlighted_teams(), Vec::<Team>::new());
        assert_eq!(view.alerts(), vec![PENALTY_NOTICE.to_string()]);
    }

    #[test]
    fn cancel_all_releases_every_timer() {
        let (mut cooldowns, scheduler) = controller();
        let mut view = RecordingView::default();

        cooldowns.arm_team_switch(&mut view);
        cooldowns.arm_pixel_edit(&mut view);
        cooldowns.arm_penalty_reset(&mut view);
        assert_eq!(scheduler.live().len(), 3);

        cooldowns.cancel_all();

        assert!(scheduler.live().is_empty());
        assert!(Gate::ALL.into_iter().all(|gate| cooldowns.is_open(gate)));
    }

    #[test]
    fn dropping_controller_cancels_timers() {
        let (mut cooldowns, scheduler) = controller();
        let mut view = RecordingView::default();

        cooldowns.arm_penalty_reset(&mut view);
        drop(cooldowns);

        assert!(scheduler.live().is_empty());
    }
}
