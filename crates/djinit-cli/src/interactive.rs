//! Terminal front-end for the feature selector and confirm prompt.
//!
//! Keys are mapped onto [`SelectionEvent`]s and fed to the core
//! [`SelectionState`]; this module only reads keys and draws lines.

use std::io;

use console::{Key, Term, style};
use dialoguer::Confirm;
use tracing::debug;

use djinit_core::domain::{FeatureCatalog, SelectionEvent, SelectionOutcome, SelectionState};

use crate::error::{CliError, CliResult, IntoCli};

const HELP_LINE: &str = "↑/↓ or j/k move · space toggle · a all · n none · enter confirm · esc cancel";

/// Map a key press to a selector event. Unbound keys yield `None`.
pub fn event_for(key: &Key) -> Option<SelectionEvent> {
    match key {
        Key::ArrowUp | Key::Char('k') => Some(SelectionEvent::Up),
        Key::ArrowDown | Key::Char('j') => Some(SelectionEvent::Down),
        Key::Char(' ') => Some(SelectionEvent::Toggle),
        Key::Char('a') => Some(SelectionEvent::SelectAll),
        Key::Char('n') => Some(SelectionEvent::SelectNone),
        Key::Enter => Some(SelectionEvent::Commit),
        Key::Escape | Key::Char('q') => Some(SelectionEvent::Cancel),
        _ => None,
    }
}

/// Let the user tick features; `preselected` ids start checked.
///
/// Returns the committed ids in catalog order, or [`CliError::Cancelled`].
pub fn select_features(catalog: &FeatureCatalog, preselected: &[String]) -> CliResult<Vec<String>> {
    let term = Term::stderr();
    if !term.is_term() {
        return Err(CliError::invalid_input(
            "--interactive needs a terminal; pass --features instead",
        ));
    }

    let mut state = SelectionState::new(catalog).with_selected(preselected);
    term.hide_cursor().with_cli_context(|| "failed to hide cursor")?;
    let result = run_selector(&term, catalog, &mut state);
    if let Err(err) = term.show_cursor() {
        debug!(error = %err, "failed to restore cursor");
    }
    result
}

fn run_selector(term: &Term, catalog: &FeatureCatalog, state: &mut SelectionState) -> CliResult<Vec<String>> {
    term.write_line(&style("Select features").cyan().bold().to_string())
        .with_cli_context(|| "failed to draw selector")?;
    term.write_line(&style(HELP_LINE).dim().to_string())
        .with_cli_context(|| "failed to draw selector")?;

    let mut drawn = draw(term, catalog, state)?;
    loop {
        let key = term.read_key().with_cli_context(|| "failed to read key")?;
        let Some(event) = event_for(&key) else {
            continue;
        };
        debug!(?event, "selector event");

        match state.apply(event) {
            SelectionOutcome::Pending => {
                term.clear_last_lines(drawn).with_cli_context(|| "failed to redraw selector")?;
                drawn = draw(term, catalog, state)?;
            }
            SelectionOutcome::Committed(ids) => {
                return Ok(ids.iter().map(ToString::to_string).collect());
            }
            SelectionOutcome::Cancelled => return Err(CliError::Cancelled),
        }
    }
}

/// Draw one line per item and return how many lines were written.
fn draw(term: &Term, catalog: &FeatureCatalog, state: &SelectionState) -> CliResult<usize> {
    for (index, id) in state.items().iter().enumerate() {
        let pointer = if index == state.cursor() { ">" } else { " " };
        let mark = if state.is_selected(index) { "[x]" } else { "[ ]" };
        let description = catalog
            .get(id.as_str())
            .map(|f| f.description().to_string())
            .unwrap_or_default();

        let line = format!("{pointer} {mark} {:<14} {}", id.as_str(), style(description).dim());
        let line = if index == state.cursor() {
            style(line).bold().to_string()
        } else {
            line
        };
        term.write_line(&line).with_cli_context(|| "failed to draw selector")?;
    }
    Ok(state.items().len())
}

/// Yes/no prompt defaulting to yes.
pub fn confirm(prompt: &str) -> CliResult<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation".into(),
            source: io::Error::other(e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_vim_keys_move() {
        assert_eq!(event_for(&Key::ArrowUp), Some(SelectionEvent::Up));
        assert_eq!(event_for(&Key::Char('k')), Some(SelectionEvent::Up));
        assert_eq!(event_for(&Key::ArrowDown), Some(SelectionEvent::Down));
        assert_eq!(event_for(&Key::Char('j')), Some(SelectionEvent::Down));
    }

    #[test]
    fn space_toggles_and_enter_commits() {
        assert_eq!(event_for(&Key::Char(' ')), Some(SelectionEvent::Toggle));
        assert_eq!(event_for(&Key::Enter), Some(SelectionEvent::Commit));
    }

    #[test]
    fn bulk_and_cancel_keys() {
        assert_eq!(event_for(&Key::Char('a')), Some(SelectionEvent::SelectAll));
        assert_eq!(event_for(&Key::Char('n')), Some(SelectionEvent::SelectNone));
        assert_eq!(event_for(&Key::Escape), Some(SelectionEvent::Cancel));
        assert_eq!(event_for(&Key::Char('q')), Some(SelectionEvent::Cancel));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(event_for(&Key::Char('x')), None);
        assert_eq!(event_for(&Key::Tab), None);
    }

    #[test]
    fn scripted_keys_drive_the_state() {
        let catalog = djinit_core::domain::FeatureCatalog::new(vec![
            djinit_core::domain::Feature::builder("drf").build().unwrap(),
            djinit_core::domain::Feature::builder("cors").build().unwrap(),
        ])
        .unwrap();
        let mut state = SelectionState::new(&catalog);

        let mut outcome = SelectionOutcome::Pending;
        for key in [Key::ArrowDown, Key::Char(' '), Key::Char('x'), Key::Enter] {
            if let Some(event) = event_for(&key) {
                outcome = state.apply(event);
            }
        }
        match outcome {
            SelectionOutcome::Committed(ids) => {
                let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
                assert_eq!(ids, ["cors"]);
            }
            other => panic!("expected commit, got {other:?}"),
        }
    }
}
