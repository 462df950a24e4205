//! Scripted filter session over stdin/stdout.
//!
//! Input lines are UI events stamped with a session clock that only moves
//! on `wait`, so a piped script replays identically every run.

use crate::command::{parse_line, Command, HELP};
use log::{info, warn};
use projfilter_core::{CatalogStore, FilterEngine, VisibilityResult};
use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::time::Instant;

/// Replays commands from `input` against `engine`, writing renders to `output`.
///
/// Every completed recomputation prints one visibility table, the way the
/// screen would re-render its rows.
pub fn run_session<C, R, W>(
    mut engine: FilterEngine<C>,
    input: R,
    output: &mut W,
) -> io::Result<()>
where
    C: CatalogStore,
    R: BufRead,
    W: Write,
{
    let dirty = Rc::new(Cell::new(false));
    let flag = Rc::clone(&dirty);
    let subscription = engine.on_visibility_changed(move |_| flag.set(true));

    let mut now = Instant::now();
    render(engine.visibility(), output)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                warn!("event=command_rejected module=cli status=error");
                writeln!(output, "error: {message}")?;
                continue;
            }
        };

        match command {
            Command::ToggleTag(tag) => {
                if !engine.toggle_tag(&tag) {
                    writeln!(output, "unknown tag `{tag}`")?;
                }
            }
            Command::ClearTags => {
                engine.clear_tags();
            }
            Command::Query(text) => {
                engine.set_query(&text, now);
            }
            Command::Wait(duration) => {
                now += duration;
                engine.poll(now);
            }
            Command::Flush => {
                engine.flush();
            }
            Command::Show => render(engine.visibility(), output)?,
            Command::Tags => {
                for tag in engine.tag_universe() {
                    let mark = if engine.state().selected_tags.contains(tag) {
                        "x"
                    } else {
                        " "
                    };
                    writeln!(output, "[{mark}] {tag}")?;
                }
            }
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Quit => break,
        }

        if dirty.replace(false) {
            render(engine.visibility(), output)?;
        }
    }

    engine.unsubscribe(subscription);
    let state = engine.close();
    info!(
        "event=session_end module=cli status=ok tags_selected={}",
        state.selected_tags.len()
    );
    Ok(())
}

fn render<W: Write>(visibility: &VisibilityResult, output: &mut W) -> io::Result<()> {
    for entry in visibility.entries() {
        let mark = if entry.visible { "+" } else { "-" };
        writeln!(output, "{mark} {}", entry.name)?;
    }
    if visibility.is_empty_result() {
        writeln!(output, "(no matching projects)")?;
    }
    writeln!(output, "--")
}
