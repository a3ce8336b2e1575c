pub enum Action {
    OverlayTimer(),
    RelayRequest(String),
}
