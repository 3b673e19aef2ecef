use std::io::{BufRead, Write};

use anyhow::Result;
use parley_graph::ConversationEngine;
use parley_types::TurnEvent;
use rand::RngCore;

/// Where the loop writes what the user sees and, optionally, turn events
pub struct Console<O, E> {
    pub output: O,
    /// JSON-lines event log; `None` disables it
    pub events: Option<E>,
}

impl<O: Write, E: Write> Console<O, E> {
    fn write_turn(&mut self, events: &[TurnEvent], response: &str) -> Result<()> {
        if let Some(log) = self.events.as_mut() {
            for event in events {
                serde_json::to_writer(&mut *log, event)?;
                writeln!(log)?;
            }
        }
        writeln!(self.output, "{}", response)?;
        self.output.flush()?;
        Ok(())
    }
}

/// Drive a conversation from `input`, one message per line, until EOF.
///
/// Returns the number of turns taken, the greeting excluded.
pub fn run<R, I, O, E>(
    engine: &mut ConversationEngine<'_, R>,
    input: I,
    console: &mut Console<O, E>,
) -> Result<usize>
where
    R: RngCore,
    I: BufRead,
    O: Write,
    E: Write,
{
    let mut events = Vec::new();
    if let Some(greeting) = engine.start(&mut events) {
        console.write_turn(&events, &greeting)?;
    }

    let mut turns = 0;
    for line in input.lines() {
        let line = line?;
        events.clear();

        let response = engine.submit_message(line.trim_end(), &mut events);
        console.write_turn(&events, &response)?;
        turns += 1;
    }

    tracing::info!(session = %engine.session_id(), turns, "Conversation ended");
    Ok(turns)
}
