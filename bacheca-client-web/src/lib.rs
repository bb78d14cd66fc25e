//! bacheca-client-web: client Yew della bacheca.
//! Legge la lista al mount, poi applica invio e cancellazione in modo ottimistico.

pub mod api;
pub mod components;
pub mod state;

pub use components::{App, MessageBoard};
pub use state::{BoardAction, BoardState, ViewPhase};
