//! Keystroke replay against a live controller

use anyhow::Result;
use autosuggest_core::{InputOutcome, SearchController};
use futures::future::join_all;
use std::fmt::Write as _;
use std::time::Duration;
use tokio::task::spawn_local;
use tokio::time::sleep;
use tracing::info;

/// One replayed input event and what it ended up doing
#[derive(Debug, Clone, PartialEq)]
pub struct Keystroke {
    pub query: String,
    pub outcome: InputOutcome,
}

#[derive(Debug, Clone)]
pub struct Replay {
    pub keystrokes: Vec<Keystroke>,
    pub final_query: String,
    pub visible: bool,
    pub markup: String,
}

impl Replay {
    pub fn rendered(&self) -> usize {
        self.keystrokes
            .iter()
            .filter(|k| k.outcome == InputOutcome::Shown)
            .count()
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        for keystroke in &self.keystrokes {
            let _ = writeln!(
                out,
                "{:<16} {}",
                format!("{:?}", keystroke.query),
                describe(keystroke.outcome)
            );
        }
        let _ = writeln!(
            out,
            "final query {:?}, popup {}",
            self.final_query,
            if self.visible { "visible" } else { "hidden" }
        );
        out
    }
}

fn describe(outcome: InputOutcome) -> String {
    match outcome {
        InputOutcome::Shown => "shown".to_string(),
        InputOutcome::Hidden => "hidden".to_string(),
        InputOutcome::Superseded(reason) => format!("dropped ({reason})"),
        InputOutcome::Disposed => "ignored (torn down)".to_string(),
    }
}

/// Feed each keystroke to the controller `interval` apart, then wait for
/// every search to settle
///
/// Must run inside a `LocalSet`; each keystroke is its own local task so a
/// later keystroke can supersede an earlier one still waiting on the backend.
pub async fn replay(
    controller: &SearchController,
    keystrokes: &[String],
    interval: Duration,
) -> Result<Replay> {
    let mut tasks = Vec::with_capacity(keystrokes.len());
    for (i, query) in keystrokes.iter().enumerate() {
        let controller = controller.clone();
        let query = query.clone();
        tasks.push(spawn_local(async move { controller.on_input(query).await }));
        if i + 1 < keystrokes.len() {
            sleep(interval).await;
        }
    }

    let mut replayed = Vec::with_capacity(tasks.len());
    for (query, joined) in keystrokes.iter().zip(join_all(tasks).await) {
        replayed.push(Keystroke {
            query: query.clone(),
            outcome: joined??,
        });
    }

    let replay = Replay {
        keystrokes: replayed,
        final_query: controller.query(),
        visible: controller.is_visible(),
        markup: controller.surface().to_markup(),
    };
    info!(
        keystrokes = replay.keystrokes.len(),
        rendered = replay.rendered(),
        "replay finished"
    );
    Ok(replay)
}
