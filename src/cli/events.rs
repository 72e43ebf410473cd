//! Parsing of `simulate` event arguments.

use crate::carousel::Direction;
use crate::page::PageEvent;

/// Parse one event argument. Some arguments expand to several events.
pub fn parse_event(arg: &str) -> Result<Vec<PageEvent>, String> {
    let (name, value) = match arg.split_once(':') {
        Some((name, value)) => (name, Some(value)),
        None => (arg, None),
    };

    let events = match (name, value) {
        ("nav", None) => vec![PageEvent::NavToggleClick],
        ("next", None) => vec![PageEvent::CarouselMove(Direction::Next)],
        ("prev", None) => vec![PageEvent::CarouselMove(Direction::Prev)],
        ("goto", Some(index)) => {
            let index = index
                .parse()
                .map_err(|_| format!("Invalid slide index: {}", index))?;
            vec![PageEvent::CarouselGoTo(index)]
        }
        ("input", Some(text)) => vec![PageEvent::SearchInput(text.to_string())],
        ("key", Some(key)) => vec![PageEvent::SearchKeyPress(key.to_string())],
        ("enter", None) => vec![PageEvent::SearchKeyPress("Enter".to_string())],
        ("click", None) => vec![PageEvent::SearchButtonClick],
        ("search", Some(text)) => vec![
            PageEvent::SearchInput(text.to_string()),
            PageEvent::SearchKeyPress("Enter".to_string()),
        ],
        ("dismiss", None) => vec![PageEvent::DismissResults],
        _ => return Err(format!("Unknown event: {}", arg)),
    };
    Ok(events)
}
