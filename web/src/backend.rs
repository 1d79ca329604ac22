use gloo::net::http::{Request, RequestBuilder, Response};
use pixelwar_core::*;
use pixelwar_protocol::{Endpoints, PixelChange, ServerMessage, TeamChoice};
use serde::de::DeserializeOwned;

/// [`BackendClient`] over `fetch`.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct HttpBackend {
    endpoints: Endpoints,
}

impl HttpBackend {
    pub(crate) fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }
}

fn map_network_error(error: gloo::net::Error) -> BackendError {
    BackendError::Transport(error.to_string())
}

/// Splits a response body on its status: 2xx bodies pass through, others become a rejection.
fn check_status(status: u16, raw: String) -> BackendResult<String> {
    if (200..=299).contains(&status) {
        return Ok(raw);
    }
    let message = serde_json::from_str::<ServerMessage>(&raw)
        .ok()
        .and_then(|body| body.msg)
        .unwrap_or_else(|| format!("Erreur {status}"));
    Err(BackendError::Rejected { status, message })
}

fn decode_json<T: DeserializeOwned>(raw: &str) -> BackendResult<T> {
    serde_json::from_str(raw)
        .map_err(|error| BackendError::Transport(format!("failed to decode response: {error}")))
}

/// Mutating endpoints may answer with an empty or non-JSON body.
fn decode_ack(raw: &str) -> Ack {
    Ack {
        message: serde_json::from_str::<ServerMessage>(raw)
            .ok()
            .and_then(|body| body.msg),
    }
}

fn players_request(endpoints: &Endpoints, uid: &str) -> RequestBuilder {
    Request::get(&endpoints.players()).query([("uid", uid)])
}

async fn read_body(response: Response) -> BackendResult<String> {
    let status = response.status();
    let raw = response.text().await.map_err(map_network_error)?;
    check_status(status, raw)
}

impl BackendClient for HttpBackend {
    async fn get_grid(&self) -> BackendResult<GridSnapshot> {
        let response = Request::get(&self.endpoints.grid())
            .send()
            .await
            .map_err(map_network_error)?;
        let payload: GridPayload = decode_json(&read_body(response).await?)?;
        GridSnapshot::try_from(payload).map_err(|error| BackendError::Transport(error.to_string()))
    }

    async fn get_player_activity(&self, uid: &str) -> BackendResult<Vec<PlayerRecord>> {
        let response = players_request(&self.endpoints, uid)
            .send()
            .await
            .map_err(map_network_error)?;
        decode_json(&read_body(response).await?)
    }

    async fn set_team(&self, uid: &Uid, team: Team) -> BackendResult<Ack> {
        let body = TeamChoice {
            uid: uid.to_string(),
            team: team.token().to_string(),
        };
        let response = Request::put(&self.endpoints.choose_team())
            .json(&body)
            .map_err(map_network_error)?
            .send()
            .await
            .map_err(map_network_error)?;
        Ok(decode_ack(&read_body(response).await?))
    }

    async fn set_pixel(&self, edit: &PixelEdit) -> BackendResult<Ack> {
        let body = PixelChange {
            color: edit.color.clone(),
            uid: edit.uid.to_string(),
            col: edit.col,
            row: edit.row,
        };
        let response = Request::put(&self.endpoints.set_pixel())
            .json(&body)
            .map_err(map_network_error)?
            .send()
            .await
            .map_err(map_network_error)?;
        Ok(decode_ack(&read_body(response).await?))
    }
}
