//! Console helpers for the interactive session

use colored::*;
use crossterm::{
    event::{self, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use std::io::{self, IsTerminal, Write};

use outlander_core::Result;

/// Display the startup banner for the interactive session
pub fn display_banner() {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(60, terminal_width.saturating_sub(4));

    println!();
    for line in banner_lines(banner_width) {
        println!("{}", line.green());
    }
    println!();
}

fn banner_lines(banner_width: usize) -> Vec<String> {
    let inner_width = banner_width.saturating_sub(2);
    let top_border = format!("┌{}┐", "─".repeat(inner_width));
    let bottom_border = format!("└{}┘", "─".repeat(inner_width));
    let empty_line = format!("│{}│", " ".repeat(inner_width));

    let text = [
        "Outlander Gear Co. Copilot",
        "",
        "Ask about products in the Outlander catalog:",
        "pricing, features, warranties, specifications.",
        "Answers come from the product index only.",
        "",
        "Type 'exit' or 'quit' to leave",
    ];

    let mut lines = vec![top_border, empty_line.clone()];
    for line in text {
        if line.is_empty() {
            lines.push(empty_line.clone());
        } else {
            let padding = inner_width.saturating_sub(line.chars().count() + 2);
            lines.push(format!("│  {}{}│", line, " ".repeat(padding)));
        }
    }
    lines.push(empty_line);
    lines.push(bottom_border);
    lines
}

/// Read one question, with Up/Down history recall. Falls back to a plain
/// line read when stdin is not a terminal. Returns `None` on end of input.
pub async fn read_question(history: &mut Vec<String>) -> Result<Option<String>> {
    if !io::stdin().is_terminal() {
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let input = input.trim().to_string();
        if !input.is_empty() {
            history.push(input.clone());
        }
        return Ok(Some(input));
    }

    enable_raw_mode()?;
    let mut input = String::new();
    let mut recall: Option<usize> = None;

    print!("{} ", "outlander>".green().bold());
    io::stdout().flush()?;

    loop {
        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Enter => {
                    disable_raw_mode()?;
                    println!();
                    let input = input.trim().to_string();
                    if !input.is_empty() {
                        history.push(input.clone());
                    }
                    return Ok(Some(input));
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    redraw(&input)?;
                }
                KeyCode::Backspace => {
                    input.pop();
                    redraw(&input)?;
                }
                KeyCode::Up => {
                    if !history.is_empty() {
                        let next = match recall {
                            None => history.len() - 1,
                            Some(0) => 0,
                            Some(index) => index - 1,
                        };
                        recall = Some(next);
                        input = history[next].clone();
                        redraw(&input)?;
                    }
                }
                KeyCode::Down => {
                    if let Some(index) = recall {
                        if index + 1 < history.len() {
                            recall = Some(index + 1);
                            input = history[index + 1].clone();
                        } else {
                            recall = None;
                            input.clear();
                        }
                        redraw(&input)?;
                    }
                }
                KeyCode::Esc => {
                    disable_raw_mode()?;
                    println!();
                    return Ok(Some(String::new()));
                }
                _ => {}
            }
        }
    }
}

fn redraw(input: &str) -> Result<()> {
    print!(
        "\r{} {}  \r{} {}",
        "outlander>".green().bold(),
        " ".repeat(60),
        "outlander>".green().bold(),
        input
    );
    io::stdout().flush()?;
    Ok(())
}
