// Author: Dustin Pilgrim
// License: MIT
//
// Gesture scripts: a tiny text form of pointer input for driving the editor
// without a touchscreen.
//
//   press 150 250; move 100 100
//   move -50 -50   # overshoot
//   release

use eventline::debug;
use scanit_core::{CropEditor, EditorHost, PointerEvent};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("gesture script entry {index} (\"{entry}\"): {reason}")]
pub struct ScriptError {
    /// 1-based position among the `;`/newline separated entries.
    pub index: usize,
    pub entry: String,
    pub reason: String,
}

pub fn parse_script(src: &str) -> Result<Vec<PointerEvent>, ScriptError> {
    let mut events = Vec::new();

    for (i, raw) in src.split([';', '\n']).enumerate() {
        let entry = match raw.find('#') {
            Some(at) => &raw[..at],
            None => raw,
        }
        .trim();

        if entry.is_empty() {
            continue;
        }

        let fail = |reason: String| ScriptError {
            index: i + 1,
            entry: entry.to_string(),
            reason,
        };

        let mut words = entry.split_whitespace();
        let cmd = words.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = words.collect();

        let ev = match (cmd.as_str(), args.as_slice()) {
            ("press", [x, y]) => {
                let (x, y) = parse_xy(x, y).map_err(fail)?;
                PointerEvent::Press { x, y }
            }
            ("move", [x, y]) => {
                let (x, y) = parse_xy(x, y).map_err(fail)?;
                PointerEvent::Move { x, y }
            }
            ("release", []) => PointerEvent::Release,
            ("cancel", []) => PointerEvent::Cancel,
            ("press" | "move", _) => {
                return Err(fail(format!("{cmd} takes X Y, got {} argument(s)", args.len())));
            }
            ("release" | "cancel", _) => {
                return Err(fail(format!("{cmd} takes no arguments")));
            }
            _ => return Err(fail("expected press|move|release|cancel".into())),
        };
        events.push(ev);
    }

    Ok(events)
}

fn parse_xy(x: &str, y: &str) -> Result<(f32, f32), String> {
    let x = x.parse::<f32>().map_err(|_| format!("bad x coordinate \"{x}\""))?;
    let y = y.parse::<f32>().map_err(|_| format!("bad y coordinate \"{y}\""))?;
    Ok((x, y))
}

/// `EditorHost` for headless runs: counts redraws and remembers the lock.
#[derive(Debug, Default)]
pub struct ScriptHost {
    pub redraws: usize,
    pub locked: bool,
    pub lock_changes: usize,
}

impl EditorHost for ScriptHost {
    fn request_redraw(&mut self) {
        self.redraws += 1;
        debug!("redraw requested (#{})", self.redraws);
    }

    fn set_intercept_lock(&mut self, enabled: bool) {
        if self.locked != enabled {
            self.lock_changes += 1;
            debug!("intercept lock -> {enabled}");
        }
        self.locked = enabled;
    }
}

/// Feeds every event to the editor; returns how many were handled.
pub fn replay(editor: &mut CropEditor, events: &[PointerEvent], host: &mut ScriptHost) -> usize {
    let mut handled = 0;

    for ev in events {
        let ok = editor.handle_event(*ev, host);
        debug!(
            "{ev:?} -> handled={ok} mode={:?} rect={:?}",
            editor.mode(),
            editor.current_rect()
        );
        if ok {
            handled += 1;
        }
    }

    handled
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanit_core::{CropRect, EditorMetrics, GestureMode};

    #[test]
    fn parses_mixed_separators_and_comments() {
        let src = "press 150 250; move 100 100\n# whole-line comment\n\n move -50 -50 # overshoot ;RELEASE";
        let events = parse_script(src).unwrap();
        assert_eq!(
            events,
            vec![
                PointerEvent::Press { x: 150.0, y: 250.0 },
                PointerEvent::Move { x: 100.0, y: 100.0 },
                PointerEvent::Move { x: -50.0, y: -50.0 },
                PointerEvent::Release,
            ]
        );
    }

    #[test]
    fn empty_script_is_fine() {
        assert_eq!(parse_script("").unwrap(), vec![]);
        assert_eq!(parse_script(" ; ;\n# nothing").unwrap(), vec![]);
    }

    #[test]
    fn errors_carry_the_entry_index() {
        let err = parse_script("press 1 2; move 3; release").unwrap_err();
        assert_eq!(err.index, 2);
        assert_eq!(err.entry, "move 3");

        let err = parse_script("press 1 2;;tap 5 5").unwrap_err();
        assert_eq!(err.index, 3);
        assert!(err.reason.contains("press|move|release|cancel"));

        let err = parse_script("press x 2").unwrap_err();
        assert_eq!(err.index, 1);
        assert!(err.reason.contains("\"x\""));

        let err = parse_script("release now").unwrap_err();
        assert!(err.to_string().starts_with("gesture script entry 1"));
    }

    #[test]
    fn replay_drives_the_editor_and_host() {
        let mut host = ScriptHost::default();
        let mut ed = CropEditor::new(EditorMetrics::from_density(1.0));
        ed.on_surface_resized(1000.0, 1000.0, &mut host);

        let events = parse_script("press 150 250; move 100 100; move -50 -50").unwrap();
        assert_eq!(replay(&mut ed, &events, &mut host), 3);
        assert_eq!(ed.mode(), GestureMode::ResizeTopLeft);
        assert!(host.locked);

        let events = parse_script("release; move 10 10").unwrap();
        assert_eq!(replay(&mut ed, &events, &mut host), 1);
        assert!(!host.locked);
        assert_eq!(host.lock_changes, 2);
        assert_eq!(host.redraws, 3);
        assert_eq!(ed.current_rect(), CropRect::from_ltrb(0.0, 0.0, 850.0, 750.0));
    }
}
