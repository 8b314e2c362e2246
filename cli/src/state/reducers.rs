use super::store::{AppState, InputField, InputKind, CONSOLE_CAPACITY};

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    SetServerUrl(String),
    SetLastRequest(&'static str),
    BeginInput(InputKind),
    InputChar(char),
    InputBackspace,
    /// Leave input mode, discarding the text
    CancelInput,
    /// Leave input mode; the caller has already taken the text
    FinishInput,
    PushAlert(String),
    DismissAlert,
    AppendConsole(String),
}

pub fn app_reducer(state: &mut AppState, action: AppAction) {
    match action {
        AppAction::SetServerUrl(url) => {
            state.server_url = url;
        }
        AppAction::SetLastRequest(label) => {
            state.last_request = Some(label);
        }
        AppAction::BeginInput(kind) => {
            state.input = Some(InputField {
                kind,
                text: String::new(),
            });
        }
        AppAction::InputChar(c) => {
            if let Some(input) = state.input.as_mut() {
                input.text.push(c);
            }
        }
        AppAction::InputBackspace => {
            if let Some(input) = state.input.as_mut() {
                input.text.pop();
            }
        }
        AppAction::CancelInput | AppAction::FinishInput => {
            state.input = None;
        }
        AppAction::PushAlert(message) => {
            state.alerts.push_back(message);
        }
        AppAction::DismissAlert => {
            state.alerts.pop_front();
        }
        AppAction::AppendConsole(line) => {
            if state.console.len() == CONSOLE_CAPACITY {
                state.console.pop_front();
            }
            state.console.push_back(line);
        }
    }
}
