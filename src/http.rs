use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::protocol::{
    GameService, MoveOutcome, MoveReply, MoveRequest, MovesReply, MovesRequest, ServiceError,
};
use crate::types::Square;

/// `GameService` over browser fetch against the authoritative game server.
///
/// The reply body is parsed as JSON regardless of the HTTP status code: the
/// server answers rejections with 400 plus an `error` field, and that field
/// decides the error kind, not the status line.
pub struct FetchGameService {
    base: String,
    csrf_token: String,
}

impl FetchGameService {
    pub fn new(game_id: u64, csrf_token: String) -> Self {
        Self {
            base: format!("/game/{}", game_id),
            csrf_token,
        }
    }

    fn moves_url(&self) -> String {
        format!("{}/moves/", self.base)
    }

    fn move_url(&self) -> String {
        format!("{}/move/", self.base)
    }

    async fn post_json(&self, url: &str, body: String) -> Result<String, ServiceError> {
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(url, &init).map_err(transport)?;
        let headers = request.headers();
        headers
            .set("Content-Type", "application/json")
            .map_err(transport)?;
        headers.set("X-CSRFToken", &self.csrf_token).map_err(transport)?;

        let window =
            web_sys::window().ok_or_else(|| ServiceError::transport("no window object"))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| ServiceError::transport("fetch resolved to a non-response"))?;

        let body = JsFuture::from(response.text().map_err(transport)?)
            .await
            .map_err(transport)?;
        body.as_string()
            .ok_or_else(|| ServiceError::transport("response body was not text"))
    }
}

impl GameService for FetchGameService {
    async fn legal_destinations(&self, square: Square) -> Result<Vec<Square>, ServiceError> {
        let body = encode(&MovesRequest::from(square))?;
        let text = self.post_json(&self.moves_url(), body).await?;
        let reply: MovesReply = decode(&text)?;
        Ok(reply.into_squares())
    }

    async fn submit_move(&self, request: MoveRequest) -> Result<MoveOutcome, ServiceError> {
        let body = encode(&request)?;
        let text = self.post_json(&self.move_url(), body).await?;
        let reply: MoveReply = decode(&text)?;
        reply.into_outcome()
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<String, ServiceError> {
    serde_json::to_string(value).map_err(|err| ServiceError::transport(err.to_string()))
}

fn decode<'a, T: serde::Deserialize<'a>>(text: &'a str) -> Result<T, ServiceError> {
    serde_json::from_str(text).map_err(|err| ServiceError::transport(err.to_string()))
}

fn transport(value: JsValue) -> ServiceError {
    ServiceError::Transport(format!("{:?}", value))
}
