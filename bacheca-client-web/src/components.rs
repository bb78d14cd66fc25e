use wasm_bindgen_futures::spawn_local;
use web_sys::{console, HtmlInputElement};
use yew::prelude::*;

use bacheca_core::Message;

use crate::api::{self, ApiFailure};
use crate::state::{BoardAction, BoardState, ViewPhase};

/// Come la lettura iniziale aggiorna la vista.
///
/// Una risposta `{ error }` è comunque una lettura risolta e porta la vista a
/// Empty; solo una richiesta fallita (rete, JSON illeggibile) lascia Loading.
pub fn initial_load_action(result: Result<Vec<Message>, ApiFailure>) -> Option<BoardAction> {
    match result {
        Ok(messages) => Some(BoardAction::Loaded(messages)),
        Err(ApiFailure::Server(_)) => Some(BoardAction::Loaded(Vec::new())),
        Err(ApiFailure::Http(_)) => None,
    }
}

#[derive(Properties, PartialEq)]
pub struct MessageBoardProps {
    pub state: BoardState,
    /// Testo attualmente nel campo di input.
    pub draft: String,
    pub on_input: Callback<String>,
    pub on_send: Callback<()>,
    pub on_delete_all: Callback<()>,
}

/// Vista pura: nessuna richiesta di rete, solo rendering dello stato ricevuto.
#[function_component(MessageBoard)]
pub fn message_board(props: &MessageBoardProps) -> Html {
    let oninput = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(input.value());
        })
    };
    let onsend = {
        let on_send = props.on_send.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_send.emit(());
        })
    };
    let ondelete = {
        let on_delete_all = props.on_delete_all.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_delete_all.emit(());
        })
    };

    let messages = props.state.messages();
    let phase = props.state.phase();

    html! {
        <div>
            <div>
                <h1>{"Messages"}</h1>
                if phase == ViewPhase::Loading {
                    <p>{"Loading..."}</p>
                }
                if phase == ViewPhase::Populated {
                    <div>
                        <ul data-testid="messages">
                            { for messages.iter().enumerate().map(|(i, m)| {
                                // le voci ottimistiche non hanno id
                                let key = m.id.clone().unwrap_or_else(|| format!("draft-{}", i));
                                html! { <li key={key}>{ m.text.clone() }</li> }
                            }) }
                        </ul>
                        <button data-testid="delete-button" type="submit" onclick={ondelete}>
                            {"Delete All Messages"}
                        </button>
                    </div>
                }
            </div>
            <div>
                <h2>{"Send a message"}</h2>
                <form>
                    <label>{"Message"}</label>
                    <input
                        data-testid="message-input"
                        type="text"
                        name="message"
                        value={props.draft.clone()}
                        {oninput}
                    />
                    <button data-testid="send-button" type="submit" onclick={onsend}>{"Send"}</button>
                </form>
            </div>
        </div>
    }
}

/// Radice dell'applicazione: legge la lista al mount e applica gli aggiornamenti ottimistici.
#[function_component(App)]
pub fn app() -> Html {
    let board = use_reducer(BoardState::default);
    let draft = use_state(String::new);

    // Una sola lettura al mount. Se la richiesta fallisce la vista resta in Loading.
    {
        let dispatcher = board.dispatcher();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let result = api::list_messages().await;
                if let Err(e) = &result {
                    console::error_1(&format!("list messages failed: {}", e).into());
                }
                if let Some(action) = initial_load_action(result) {
                    dispatcher.dispatch(action);
                }
            });
            || ()
        });
    }

    let on_input = {
        let draft = draft.clone();
        Callback::from(move |value: String| draft.set(value))
    };

    // fire-and-forget: niente riconciliazione con l'id del server, niente rollback
    let on_send = {
        let dispatcher = board.dispatcher();
        let draft = draft.clone();
        Callback::from(move |_: ()| {
            let text = (*draft).clone();
            dispatcher.dispatch(BoardAction::Sent(text.clone()));
            spawn_local(async move {
                if let Err(e) = api::create_message(&text).await {
                    console::error_1(&format!("create message failed: {}", e).into());
                }
            });
        })
    };

    let on_delete_all = {
        let dispatcher = board.dispatcher();
        Callback::from(move |_: ()| {
            dispatcher.dispatch(BoardAction::Cleared);
            spawn_local(async move {
                if let Err(e) = api::delete_all_messages().await {
                    console::error_1(&format!("delete messages failed: {}", e).into());
                }
            });
        })
    };

    html! {
        <MessageBoard
            state={(*board).clone()}
            draft={(*draft).clone()}
            {on_input}
            {on_send}
            {on_delete_all}
        />
    }
}
