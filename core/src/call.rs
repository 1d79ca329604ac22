use crate::*;

/// A request for the backend, produced by the core and executed by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    LoadGrid { seq: u64 },
    LoadActivity { uid: String },
    SetTeam { uid: Uid, team: Team },
    SetPixel(PixelEdit),
}

/// Outcome of a [`Call`], fed back through [`PixelClient::on_reply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Grid {
        seq: u64,
        result: BackendResult<GridSnapshot>,
    },
    Activity(BackendResult<Vec<PlayerRecord>>),
    TeamSet {
        team: Team,
        result: BackendResult<Ack>,
    },
    PixelSet {
        edit: PixelEdit,
        result: BackendResult<Ack>,
    },
}

impl Call {
    pub async fn run<B: BackendClient>(self, backend: &B) -> Reply {
        log::debug!("call: {:?}", self);
        match self {
            Call::LoadGrid { seq } => Reply::Grid {
                seq,
                result: backend.get_grid().await,
            },
            Call::LoadActivity { uid } => {
                Reply::Activity(backend.get_player_activity(&uid).await)
            }
            Call::SetTeam { uid, team } => Reply::TeamSet {
                team,
                result: backend.set_team(&uid, team).await,
            },
            Call::SetPixel(edit) => {
                let result = backend.set_pixel(&edit).await;
                Reply::PixelSet { edit, result }
            }
        }
    }
}
