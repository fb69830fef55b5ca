//! Terminal prompter
//!
//! Renders prompts on stderr. On a TTY, selections are made with the arrow
//! keys (or j/k) in raw mode; otherwise answers are read line by line from
//! stdin.

use super::select::{fit_width, parse_answer, SelectAction, SelectState};
use super::Prompter;
use crate::error::{HalError, HalResult};
use crossterm::{
    cursor,
    event::{read, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Print, Stylize},
    terminal::{self, disable_raw_mode, enable_raw_mode, ClearType},
};
use std::io::{self, BufRead, IsTerminal, Write};

/// Restores cooked mode and the cursor when dropped
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stderr(), cursor::Show);
        let _ = disable_raw_mode();
    }
}

fn io_error(e: io::Error) -> HalError {
    HalError::InvalidInput(format!("terminal error: {}", e))
}

fn cancelled(prompt: &str) -> HalError {
    HalError::InvalidInput(format!("no answer given for '{}'", prompt))
}

/// Prompter bound to the process terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }

    fn interactive() -> bool {
        io::stdin().is_terminal() && io::stderr().is_terminal()
    }

    fn read_line(prompt: &str) -> HalResult<String> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Err(cancelled(prompt));
        }
        Ok(line.trim().to_string())
    }

    /// Draw the prompt and the visible part of the list, one row per line,
    /// then move back to the prompt row
    fn draw_list(
        out: &mut impl Write,
        prompt: &str,
        candidates: &[String],
        state: &mut SelectState,
    ) -> io::Result<()> {
        let (cols, rows) = terminal::size().unwrap_or((80, 24));
        let width = usize::from(cols).saturating_sub(5).max(1);
        // prompt row plus one spare row keep the list from scrolling the screen
        let window = state.visible(usize::from(rows).saturating_sub(2));

        let title = if window.len() < candidates.len() {
            format!("{} ({}/{})", prompt, state.selected + 1, candidates.len())
        } else {
            prompt.to_string()
        };
        queue!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::FromCursorDown),
            Print(format!("{} {}\r\n", "?".green().bold(), fit_width(&title, width).bold())),
        )?;
        let drawn = window.len();
        for i in window {
            let candidate = fit_width(&candidates[i], width);
            if i == state.selected {
                queue!(out, Print(format!("  {} {}\r\n", ">".cyan(), candidate.cyan())))?;
            } else {
                queue!(out, Print(format!("    {}\r\n", candidate)))?;
            }
        }
        let up = u16::try_from(drawn + 1).unwrap_or(u16::MAX);
        queue!(out, cursor::MoveUp(up))?;
        out.flush()
    }

    fn select_raw(&self, prompt: &str, candidates: &[String]) -> HalResult<String> {
        let mut state = SelectState::new(candidates.len());
        let mut err = io::stderr();

        let outcome = {
            let _guard = RawModeGuard::enable().map_err(io_error)?;
            queue!(err, cursor::Hide).map_err(io_error)?;
            let outcome = loop {
                Self::draw_list(&mut err, prompt, candidates, &mut state).map_err(io_error)?;
                if let Event::Key(key) = read().map_err(io_error)? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match state.handle_key(key.code, key.modifiers) {
                        SelectAction::Continue => {},
                        other => break other,
                    }
                }
            };
            queue!(
                err,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::FromCursorDown)
            )
            .map_err(io_error)?;
            err.flush().map_err(io_error)?;
            outcome
        };

        match outcome {
            SelectAction::Chosen(idx) => Ok(candidates[idx].clone()),
            _ => Err(cancelled(prompt)),
        }
    }

    fn select_lines(&self, prompt: &str, candidates: &[String]) -> HalResult<String> {
        let mut err = io::stderr();
        let _ = writeln!(err, "{} {}", "?".green().bold(), prompt.bold());
        for (i, candidate) in candidates.iter().enumerate() {
            let _ = writeln!(err, "  {}) {}", i + 1, candidate);
        }

        loop {
            let _ = write!(err, "  Choose [1-{}]: ", candidates.len());
            let _ = err.flush();
            let answer = Self::read_line(prompt)?;
            match parse_answer(&answer, candidates) {
                Some(idx) => return Ok(candidates[idx].clone()),
                None => {
                    let _ = writeln!(err, "  {} '{}' is not a valid choice", "!".yellow(), answer);
                },
            }
        }
    }
}

impl Prompter for TerminalPrompter {
    fn select(&self, prompt: &str, candidates: &[String]) -> HalResult<String> {
        if candidates.is_empty() {
            return Err(HalError::InvalidInput(format!(
                "nothing to choose from for '{}'",
                prompt
            )));
        }
        if Self::interactive() {
            self.select_raw(prompt, candidates)
        } else {
            self.select_lines(prompt, candidates)
        }
    }

    fn confirm(&self, prompt: &str) -> HalResult<bool> {
        let mut err = io::stderr();

        if Self::interactive() {
            let _ = write!(err, "{} {} [y/N] ", "?".green().bold(), prompt.bold());
            let _ = err.flush();
            let answer = {
                let _guard = RawModeGuard::enable().map_err(io_error)?;
                loop {
                    if let Event::Key(key) = read().map_err(io_error)? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        match key.code {
                            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                                break None;
                            },
                            KeyCode::Char('y') | KeyCode::Char('Y') => break Some(true),
                            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter => {
                                break Some(false)
                            },
                            KeyCode::Esc => break None,
                            _ => {},
                        }
                    }
                }
            };
            let _ = writeln!(err);
            return answer.ok_or_else(|| cancelled(prompt));
        }

        let _ = write!(err, "{} {} [y/N] ", "?".green().bold(), prompt.bold());
        let _ = err.flush();
        let answer = Self::read_line(prompt)?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    fn announce_selection(&self, label: &str, value: &str) {
        let _ = writeln!(
            io::stderr(),
            "{} {}: {}",
            "\u{2714}".green(),
            label,
            value.cyan()
        );
    }
}
