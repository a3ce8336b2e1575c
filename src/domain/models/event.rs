use tui_textarea::Input;

use super::RelayReply;

pub enum Event {
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    OverlayExpired(),
    RelayFailure(String),
    RelayResponse(RelayReply),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
