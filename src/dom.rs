use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

use crate::scene::{BOARD_PIXELS, BoardScene, Glyph, MOVE_MARKER, MoveMarker, SQUARE_PIXELS};
use crate::types::{MoveRecord, Piece, PieceColor};
use crate::view::{GameOverNotice, StatusLine, View};

const GLYPH_WHITE: &str = "#ffffff";
const GLYPH_BLACK: &str = "#1a1a1a";
const GLYPH_SHADOW: &str = "rgba(0,0,0,0.35)";
const GLYPH_OUTLINE: &str = "rgba(0,0,0,0.4)";

/// Concrete `View` over the host page's fixed DOM contract: the canvas, the
/// status triple, the game-over modal, the history panel, the capture
/// regions, and the two turn cards.
pub struct DomView {
    document: Document,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    status_icon: Element,
    status_text: Element,
    status_box: Element,
    modal: Element,
    modal_icon: Element,
    modal_title: Element,
    modal_message: Element,
    history: Element,
    captured_by_white: Element,
    captured_by_black: Element,
    you_card: Element,
    ai_card: Element,
}

impl DomView {
    /// Looks up every element of the DOM contract; any missing one is a
    /// setup error the boot path surfaces to the host page.
    pub fn mount(document: &Document) -> Result<Self, String> {
        let canvas: HtmlCanvasElement = require(document, "chess-board")?
            .dyn_into()
            .map_err(|_| "#chess-board is not a canvas".to_string())?;
        canvas.set_width(BOARD_PIXELS as u32);
        canvas.set_height(BOARD_PIXELS as u32);

        let context = canvas
            .get_context("2d")
            .map_err(|_| "2d context unavailable".to_string())?
            .ok_or_else(|| "2d context unavailable".to_string())?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "2d context has an unexpected type".to_string())?;

        Ok(Self {
            document: document.clone(),
            canvas,
            context,
            status_icon: require(document, "status-icon")?,
            status_text: require(document, "status-text")?,
            status_box: require(document, "status-box")?,
            modal: require(document, "game-over-modal")?,
            modal_icon: require(document, "modal-icon")?,
            modal_title: require(document, "modal-title")?,
            modal_message: require(document, "modal-message")?,
            history: require(document, "move-history")?,
            captured_by_white: require(document, "captured-by-white")?,
            captured_by_black: require(document, "captured-by-black")?,
            you_card: require_selector(document, ".you-card")?,
            ai_card: require_selector(document, ".ai-card")?,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn paint(&self, plan: &BoardScene) -> Result<(), JsValue> {
        for square in &plan.squares {
            let x = square.square.col as f64 * SQUARE_PIXELS;
            let y = square.square.row as f64 * SQUARE_PIXELS;

            self.context.set_fill_style_str(square.base);
            self.context.fill_rect(x, y, SQUARE_PIXELS, SQUARE_PIXELS);

            for overlay in &square.overlays {
                self.context.set_fill_style_str(overlay.color());
                self.context.fill_rect(x, y, SQUARE_PIXELS, SQUARE_PIXELS);
            }

            match square.marker {
                Some(MoveMarker::Ring) => {
                    self.context.set_stroke_style_str(MOVE_MARKER);
                    self.context.set_line_width(6.0);
                    self.context.begin_path();
                    self.context.arc(
                        x + SQUARE_PIXELS / 2.0,
                        y + SQUARE_PIXELS / 2.0,
                        SQUARE_PIXELS / 2.0 - 4.0,
                        0.0,
                        TAU,
                    )?;
                    self.context.stroke();
                }
                Some(MoveMarker::Dot) => {
                    self.context.set_fill_style_str(MOVE_MARKER);
                    self.context.begin_path();
                    self.context.arc(
                        x + SQUARE_PIXELS / 2.0,
                        y + SQUARE_PIXELS / 2.0,
                        SQUARE_PIXELS * 0.17,
                        0.0,
                        TAU,
                    )?;
                    self.context.fill();
                }
                None => {}
            }

            if let Some(glyph) = square.glyph {
                self.paint_glyph(glyph, x, y)?;
            }
        }
        Ok(())
    }

    fn paint_glyph(&self, glyph: Glyph, x: f64, y: f64) -> Result<(), JsValue> {
        let symbol = glyph.symbol.to_string();
        let cx = x + SQUARE_PIXELS / 2.0;
        let cy = y + SQUARE_PIXELS / 2.0 + 2.0;

        self.context
            .set_font(&format!("{}px serif", SQUARE_PIXELS * 0.74));
        self.context.set_text_align("center");
        self.context.set_text_baseline("middle");

        // Shadow for depth, then the piece itself.
        self.context.set_fill_style_str(GLYPH_SHADOW);
        self.context.fill_text(&symbol, cx + 2.0, cy + 2.0)?;

        self.context.set_fill_style_str(if glyph.outlined {
            GLYPH_WHITE
        } else {
            GLYPH_BLACK
        });
        self.context.fill_text(&symbol, cx, cy)?;

        // Thin outline keeps light glyphs visible on light squares.
        if glyph.outlined {
            self.context.set_stroke_style_str(GLYPH_OUTLINE);
            self.context.set_line_width(0.5);
            self.context.stroke_text(&symbol, cx, cy)?;
        }
        Ok(())
    }

    fn rebuild_history(&self, records: &[MoveRecord]) -> Result<(), JsValue> {
        self.history.set_inner_html("");

        if records.is_empty() {
            let placeholder = self.document.create_element("div")?;
            placeholder.set_class_name("no-moves");
            placeholder.set_text_content(Some("No moves yet"));
            self.history.append_child(&placeholder)?;
            return Ok(());
        }

        for record in records {
            let entry = self.document.create_element("div")?;
            let side = match record.color {
                PieceColor::White => "white-move",
                PieceColor::Black => "black-move",
            };
            entry.set_class_name(&format!("move-entry {}", side));
            entry.set_text_content(Some(&record.label()));
            self.history.append_child(&entry)?;
        }

        self.history.set_scroll_top(self.history.scroll_height());
        Ok(())
    }

    fn set_card_active(&self, card: &Element, active: bool) {
        let classes = card.class_list();
        let result = if active {
            classes.add_1("active-turn")
        } else {
            classes.remove_1("active-turn")
        };
        if let Err(err) = result {
            report(err);
        }
    }
}

impl View for DomView {
    fn render_board(&mut self, plan: &BoardScene) {
        if let Err(err) = self.paint(plan) {
            report(err);
        }
    }

    fn set_status(&mut self, line: &StatusLine) {
        self.status_icon.set_text_content(Some(line.icon));
        self.status_text.set_text_content(Some(&line.text));
        self.status_box
            .set_class_name(format!("status-box {}", line.tone.css_class()).trim_end());
    }

    fn set_turn(&mut self, side: PieceColor) {
        self.set_card_active(&self.you_card, side == PieceColor::White);
        self.set_card_active(&self.ai_card, side == PieceColor::Black);
    }

    fn set_history(&mut self, records: &[MoveRecord]) {
        if let Err(err) = self.rebuild_history(records) {
            report(err);
        }
    }

    fn set_captured(&mut self, by_white: &[Piece], by_black: &[Piece]) {
        self.captured_by_white
            .set_text_content(Some(&glyph_run(by_white)));
        self.captured_by_black
            .set_text_content(Some(&glyph_run(by_black)));
    }

    fn show_game_over(&mut self, notice: &GameOverNotice) {
        self.modal_icon.set_text_content(Some(notice.icon));
        self.modal_title.set_text_content(Some(notice.title));
        self.modal_message.set_text_content(Some(notice.message));
        if let Err(err) = self.modal.class_list().remove_1("hidden") {
            report(err);
        }
    }
}

fn glyph_run(pieces: &[Piece]) -> String {
    pieces.iter().map(|piece| piece.glyph()).collect()
}

fn require(document: &Document, id: &str) -> Result<Element, String> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| format!("missing #{}", id))
}

fn require_selector(document: &Document, selector: &str) -> Result<Element, String> {
    document
        .query_selector(selector)
        .map_err(|_| format!("bad selector {}", selector))?
        .ok_or_else(|| format!("missing {}", selector))
}

fn report(err: JsValue) {
    web_sys::console::error_1(&err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceType;

    #[test]
    fn glyph_runs_concatenate_in_capture_order() {
        let pieces = [
            Piece::new(PieceColor::Black, PieceType::Pawn),
            Piece::new(PieceColor::Black, PieceType::Queen),
        ];
        assert_eq!(glyph_run(&pieces), "♟♛");
        assert_eq!(glyph_run(&[]), "");
    }
}
