use bacheca_core::Message;
use std::rc::Rc;
use yew::functional::Reducible;

/// Fase osservabile della vista.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// Prima che la prima lettura della lista sia risolta.
    Loading,
    Empty,
    Populated,
}

/// Cache locale della bacheca, solo per il rendering: può essere più vecchia dello store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    loading: bool,
    messages: Vec<Message>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            loading: true,
            messages: Vec::new(),
        }
    }
}

impl BoardState {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn phase(&self) -> ViewPhase {
        if self.loading {
            ViewPhase::Loading
        } else if self.messages.is_empty() {
            ViewPhase::Empty
        } else {
            ViewPhase::Populated
        }
    }
}

/// Mutazioni locali. `Sent` e `Cleared` sono ottimistiche: vengono applicate
/// prima che la richiesta al server parta, e non vengono mai annullate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    /// La lettura iniziale è arrivata: sostituisce tutta la lista locale.
    Loaded(Vec<Message>),
    /// Aggiunge il testo in coda, senza id.
    Sent(String),
    Cleared,
}

impl Reducible for BoardState {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            BoardAction::Loaded(messages) => {
                next.loading = false;
                next.messages = messages;
            }
            BoardAction::Sent(text) => next.messages.push(Message::draft(text)),
            BoardAction::Cleared => next.messages.clear(),
        }
        Rc::new(next)
    }
}
