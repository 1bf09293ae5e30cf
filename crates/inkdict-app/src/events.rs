use std::sync::Arc;

use kanal::AsyncReceiver;

use inkdict_core::preprocess::{DefaultPreprocessor, Preprocessor};
use inkdict_core::translate::{TranslateOptions, translate};

use crate::display;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Query(String),
}

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    rx: AsyncReceiver<AppEvent>,
) -> anyhow::Result<()> {
    let preprocessor = DefaultPreprocessor;
    let options = TranslateOptions::from_config(&state.config.lookup);

    if state.dicts.is_empty() {
        // Distinguishable from "no results": there is nothing to search.
        display::present("No dictionaries found");
    }

    loop {
        let event = rx.recv().await?;
        handle_event(&state, &preprocessor, &options, event);
    }
}

fn handle_event(
    state: &AppState,
    preprocessor: &DefaultPreprocessor,
    options: &TranslateOptions,
    event: AppEvent,
) {
    match event {
        AppEvent::Query(raw) => {
            let query = preprocessor.process(&raw);
            tracing::info!("looking up {query:?}");

            let document = translate(&state.dicts, &query, options);
            display::present(&document);
        }
    }
}
