use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;

use crate::board::Board;
use crate::client::GameClient;
use crate::dom::DomView;
use crate::http::FetchGameService;
use crate::input::point_to_square;
use crate::protocol::BootConfig;

type Client = GameClient<FetchGameService, DomView>;

/// The exported application object. The host page constructs one instance
/// with its boot config; everything else runs off the canvas click listener.
#[wasm_bindgen]
pub struct ChessApp {
    client: Rc<RefCell<Client>>,
    _listener: EventListener,
}

#[wasm_bindgen]
impl ChessApp {
    /// `config` is the page-load snapshot:
    /// `{board, game_id, status, csrf_token}`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ChessApp, JsError> {
        let config: BootConfig =
            serde_wasm_bindgen::from_value(config).map_err(|err| JsError::new(&err.to_string()))?;
        let board = Board::from_rows(&config.board).map_err(|err| JsError::new(&err))?;

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsError::new("no document"))?;
        let view = DomView::mount(&document).map_err(|err| JsError::new(&err))?;
        let canvas = view.canvas().clone();

        let service = FetchGameService::new(config.game_id, config.csrf_token);
        let client = Rc::new(RefCell::new(GameClient::new(
            service,
            view,
            board,
            config.status,
        )));

        let target = canvas.clone();
        let listener = {
            let client = client.clone();
            EventListener::new(&target, "click", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = canvas.get_bounding_client_rect();
                let x = event.client_x() as f64 - rect.left();
                let y = event.client_y() as f64 - rect.top();
                let Some(square) = point_to_square(x, y, rect.width(), rect.height()) else {
                    return;
                };

                let client = client.clone();
                spawn_local(async move {
                    // A click landing while an exchange still holds the state
                    // finds it borrowed and is dropped, alongside the
                    // thinking-flag gate inside.
                    let Ok(mut game) = client.try_borrow_mut() else {
                        return;
                    };
                    game.handle_click(square).await;
                });
            })
        };

        Ok(ChessApp {
            client,
            _listener: listener,
        })
    }

    /// Whether the game has reached a terminal status.
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.client
            .try_borrow()
            .map(|game| game.is_game_over())
            .unwrap_or(false)
    }
}
