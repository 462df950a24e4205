//! Line-based commands read from stdin.

use std::time::Duration;

/// One scripted UI event or inspection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Toggle one tag in the selection.
    ToggleTag(String),
    ClearTags,
    /// Replace the search box text; the remainder of the line, verbatim.
    Query(String),
    /// Advance the session clock.
    Wait(Duration),
    Flush,
    Show,
    Tags,
    Help,
    Quit,
}

/// Parses one input line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
        return Ok(None);
    }

    let line = line.trim_start();
    let (verb, rest) = match line.split_once(' ') {
        Some((verb, rest)) => (verb, rest),
        None => (line, ""),
    };

    let command = match verb {
        "tag" => {
            if rest.is_empty() {
                return Err("usage: tag <name>".to_string());
            }
            Command::ToggleTag(rest.to_string())
        }
        "clear-tags" => Command::ClearTags,
        "query" => Command::Query(rest.to_string()),
        "wait" => {
            let ms = rest
                .trim()
                .parse::<u64>()
                .map_err(|_| format!("usage: wait <milliseconds>, got `{}`", rest.trim()))?;
            Command::Wait(Duration::from_millis(ms))
        }
        "flush" => Command::Flush,
        "show" => Command::Show,
        "tags" => Command::Tags,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`; try `help`")),
    };
    Ok(Some(command))
}

pub const HELP: &str = "\
commands:
  tag <name>        toggle a tag filter
  clear-tags        deselect all tags
  query <text>      set search text (debounced; text kept verbatim)
  wait <ms>         advance the session clock
  flush             apply pending search text now
  show              print project visibility
  tags              list known tags
  quit              end the session";
