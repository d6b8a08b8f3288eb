//! WASM bindings for kakaw-core
//!
//! Provides a JavaScript-friendly API for the rules engine. The wrapper
//! owns one `GameState` and swaps it for the next snapshot on every
//! accepted action.

use wasm_bindgen::prelude::*;

use crate::{Action, GameState, Piece, PieceType, Player, Pos, Rules};

/// WASM-friendly wrapper around GameState
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameState,
}

#[wasm_bindgen]
impl WasmGame {
    /// Start a new game under the default rules
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { inner: GameState::new() }
    }

    /// Start a new game under rules given as TOML text
    #[wasm_bindgen(js_name = withRules)]
    pub fn with_rules(toml: &str) -> Result<WasmGame, JsValue> {
        let rules = Rules::from_toml_str(toml).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let inner = GameState::with_rules(rules).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmGame { inner })
    }

    /// Current player (1 or 2)
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        self.inner.current_player() as u8
    }

    /// Winner: 0 (none), 1 (P1), or 2 (P2)
    pub fn winner(&self) -> u8 {
        self.inner.winner().map_or(0, |p| p as u8)
    }

    /// Reserve counts for a player as [regular, shooter, hitMan, agent, bomber]
    pub fn reserves(&self, player: u8) -> Vec<u8> {
        let p = Player::from_bits(player).unwrap_or(Player::One);
        let reserve = self.inner.reserve(p);
        PieceType::RESERVE_TYPES.iter().map(|&k| reserve.count(k)).collect()
    }

    /// Place a bird of the given symbol (R S H A B) for the player to move.
    /// Returns an empty string on success, the rejection reason otherwise.
    pub fn place(&mut self, symbol: char, row: i32, col: i32) -> String {
        let Some(kind) = PieceType::from_symbol(symbol) else {
            return format!("unknown bird symbol '{}'", symbol);
        };
        let piece = Piece::new(kind, self.inner.current_player());
        self.commit(self.inner.try_place(Pos::new(row, col), piece))
    }

    /// Move a bird. Returns an empty string on success.
    #[wasm_bindgen(js_name = moveBird)]
    pub fn move_bird(&mut self, from_row: i32, from_col: i32, to_row: i32, to_col: i32) -> String {
        let result = self
            .inner
            .try_move(Pos::new(from_row, from_col), Pos::new(to_row, to_col));
        self.commit(result)
    }

    /// Take a bird back into the reserve. Returns an empty string on success.
    pub fn remove(&mut self, row: i32, col: i32) -> String {
        self.commit(self.inner.try_remove(Pos::new(row, col)))
    }

    /// Play an action in text notation, e.g. "R(3,1)" or "(2,1)->(2,2)".
    /// Returns an empty string on success.
    pub fn play(&mut self, notation: &str) -> String {
        match notation.parse::<Action>() {
            Ok(action) => self.commit(self.inner.apply(action)),
            Err(e) => e.to_string(),
        }
    }

    /// Legal actions as a JSON array of { type, ... } objects
    #[wasm_bindgen(js_name = legalActions)]
    pub fn legal_actions(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.legal_actions())?)
    }

    /// Board as a JSON array of { pos: {row, col}, piece: {kind, owner} }
    pub fn board(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.inner.board())?)
    }

    /// Bounding box as [minRow, maxRow, minCol, maxCol]
    pub fn bounds(&self) -> Vec<i32> {
        let b = self.inner.board().bounds();
        vec![b.min_row, b.max_row, b.min_col, b.max_col]
    }

    /// Clone the game
    #[wasm_bindgen(js_name = clone)]
    pub fn clone_game(&self) -> WasmGame {
        WasmGame { inner: self.inner.clone() }
    }
}

impl WasmGame {
    fn commit(&mut self, result: Result<GameState, crate::Rejected>) -> String {
        match result {
            Ok(next) => {
                self.inner = next;
                String::new()
            }
            Err(e) => e.to_string(),
        }
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
