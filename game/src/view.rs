use serde::{Deserialize, Serialize};

/// Which modal the presentation layer should be showing. The engine only
/// publishes the signal; rendering it is the host shell's problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modal {
    Begin,
    Win,
    Draw,
    Hidden,
}

impl Default for Modal {
    fn default() -> Self {
        // A fresh engine greets the players before the first game.
        Self::Begin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    GameWon,
    GameDrawn,
    ReplayStarted,
    Dismissed,
}

impl Modal {
    /// Pure transition function for the modal visibility signal.
    pub fn handle(self, event: ModalEvent) -> Modal {
        match (self, event) {
            (Modal::Hidden, ModalEvent::GameWon) => Modal::Win,
            (Modal::Hidden, ModalEvent::GameDrawn) => Modal::Draw,
            (_, ModalEvent::ReplayStarted) => Modal::Hidden,
            (_, ModalEvent::Dismissed) => Modal::Hidden,

            // Ignore irrelevant events in the current state.
            (state, _) => state,
        }
    }

    pub fn is_visible(self) -> bool {
        self != Modal::Hidden
    }
}
