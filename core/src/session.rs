use crate::*;

pub const UID_KEY: &str = "pixelwar:uid";
pub const TEAM_KEY: &str = "pixelwar:team";

/// What the player typed in the identity field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub input: String,
    /// Whether the input widget obscures the token.
    pub masked: bool,
}

impl PlayerIdentity {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            masked: true,
        }
    }

    pub fn validate(&self) -> Result<Uid, LocalValidationError> {
        let uid = self.input.trim();
        if uid.is_empty() {
            return Err(LocalValidationError::MissingUid);
        }
        if uid.encode_utf16().count() != Uid::LEN {
            return Err(LocalValidationError::UnknownUid);
        }
        Ok(Uid::new_unchecked(uid.to_string()))
    }
}

/// Identity and team selection of the local player.
#[derive(Debug)]
pub struct TeamSession<P: Preferences> {
    prefs: P,
    identity: PlayerIdentity,
    highlighted: Option<Team>,
    // what a failed switch rolls back to
    confirmed: Option<Team>,
}

impl<P: Preferences> TeamSession<P> {
    /// Restores the identity input and the highlighted team from `prefs`.
    pub fn new(prefs: P) -> Self {
        let identity = PlayerIdentity::new(prefs.load(UID_KEY).unwrap_or_default());
        let confirmed = prefs
            .load(TEAM_KEY)
            .and_then(|token| match token.parse::<Team>() {
                Ok(team) => Some(team),
                Err(err) => {
                    log::warn!("ignoring stored team: {}", err);
                    None
                }
            });

        Self {
            prefs,
            identity,
            highlighted: confirmed,
            confirmed,
        }
    }

    pub fn identity(&self) -> &PlayerIdentity {
        &self.identity
    }

    pub fn highlighted(&self) -> Option<Team> {
        self.highlighted
    }

    pub fn preferences(&self) -> &P {
        &self.prefs
    }

    pub fn set_identity_input(&mut self, input: impl Into<String>) {
        self.identity.input = input.into();
    }

    /// Flips masking and returns the new state.
    pub fn toggle_mask(&mut self) -> bool {
        self.identity.masked = !self.identity.masked;
        self.identity.masked
    }

    /// Token used to look up activity, validated or not.
    pub fn activity_uid(&self) -> String {
        self.identity.input.trim().to_string()
    }

    /// Precondition of every mutating action. A valid token is persisted.
    pub fn validate_identity(&mut self) -> Result<Uid, LocalValidationError> {
        let uid = self.identity.validate()?;
        self.prefs.save(UID_KEY, uid.as_str());
        Ok(uid)
    }

    pub fn restore_highlight(&self, view: &mut impl ViewPort) {
        self.paint(view);
    }

    /// Highlights `team` ahead of the server's answer.
    pub fn begin_team_switch(&mut self, team: Team, view: &mut impl ViewPort) {
        self.highlighted = Some(team);
        self.paint(view);
    }

    pub fn confirm_team(&mut self, team: Team, view: &mut impl ViewPort) {
        self.highlighted = Some(team);
        self.confirmed = Some(team);
        self.prefs.save(TEAM_KEY, team.token());
        self.paint(view);
    }

    pub fn rollback_team(&mut self, view: &mut impl ViewPort) {
        self.highlighted = self.confirmed;
        self.paint(view);
    }

    /// Drops the selection after the penalty gate fired. The view is cleared by the gate.
    pub fn reset_selection(&mut self) {
        self.highlighted = None;
        self.confirmed = None;
        self.prefs.forget(TEAM_KEY);
    }

    fn paint(&self, view: &mut impl ViewPort) {
        for team in Team::ALL {
            view.set_team_highlight(team, self.highlighted == Some(team));
        }
    }
}
