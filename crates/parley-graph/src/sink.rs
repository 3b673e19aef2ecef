use parley_types::TurnEvent;

/// Receives the events of each turn, including the final response.
///
/// This is where a chat window, a terminal or a test harness plugs in.
pub trait ResponseSink {
    fn deliver(&mut self, event: &TurnEvent);
}

/// Collects every event
impl ResponseSink for Vec<TurnEvent> {
    fn deliver(&mut self, event: &TurnEvent) {
        self.push(event.clone());
    }
}

/// Discards every event
impl ResponseSink for () {
    fn deliver(&mut self, _event: &TurnEvent) {}
}
