// File: ./src/cli.rs
//! Command-line parsing, help and plain-text rendering for `harmony`.
use crate::color_utils::parse_hex_to_u8;
use crate::model::{BasicEventInfo, TodoItem};
use anyhow::{Result, bail};
use crossterm::style::{Color, Stylize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Parse { text: String, json: bool },
    Add { text: String },
    Today { show_completed: Option<bool>, json: bool },
    Complete { id: String },
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub root: Option<PathBuf>,
    pub command: Command,
}

fn join_text(words: &[String], command: &str) -> Result<String> {
    let text = words.join(" ");
    if text.trim().is_empty() {
        bail!("'{}' needs some text, e.g. harmony {} \"almoço sexta\"", command, command);
    }
    Ok(text)
}

/// Parses arguments after the binary name.
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut root = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-r" | "--root" => match iter.next() {
                Some(path) => root = Some(PathBuf::from(path)),
                None => bail!("--root needs a path"),
            },
            _ => rest.push(arg.clone()),
        }
    }

    let Some((name, tail)) = rest.split_first() else {
        return Ok(Invocation {
            root,
            command: Command::Today {
                show_completed: None,
                json: false,
            },
        });
    };

    let json = tail.iter().any(|a| a == "--json");
    let words: Vec<String> = tail.iter().filter(|a| *a != "--json").cloned().collect();

    let command = match name.as_str() {
        "-h" | "--help" | "help" => Command::Help,
        "parse" => Command::Parse {
            text: join_text(&words, "parse")?,
            json,
        },
        "add" => Command::Add {
            text: join_text(&words, "add")?,
        },
        "today" => {
            let mut show_completed = None;
            for w in &words {
                match w.as_str() {
                    "--all" => show_completed = Some(true),
                    "--pending" => show_completed = Some(false),
                    other => bail!("Unknown option for today: {}", other),
                }
            }
            Command::Today {
                show_completed,
                json,
            }
        }
        "complete" => match words.as_slice() {
            [id] => Command::Complete { id: id.clone() },
            _ => bail!("'complete' takes exactly one id"),
        },
        "export" => Command::Export,
        other => bail!("Unknown command '{}'. Try 'harmony --help'.", other),
    };

    Ok(Invocation { root, command })
}

pub fn format_event_info(info: &BasicEventInfo) -> String {
    let mut lines = vec![
        format!("Title:    {}", info.title),
        format!("Type:     {}", info.task_type),
        format!("Date:     {}", info.date.format("%Y-%m-%d (%A)")),
    ];
    if let Some(time) = &info.time {
        lines.push(format!("Time:     {}", time));
    }
    if let Some(category) = &info.category {
        lines.push(format!("Category: {}", category));
    }
    if let Some(location) = &info.location {
        lines.push(format!("Location: {}", location));
    }
    if let Some(details) = &info.details {
        lines.push(format!("Details:  {}", details));
    }
    lines.join("\n")
}

pub fn format_todo_line(item: &TodoItem, color: bool) -> String {
    let check = if item.is_completed() { "[x]" } else { "[ ]" };
    let marker = match item.color().and_then(parse_hex_to_u8) {
        Some((r, g, b)) if color => format!("{} ", "●".with(Color::Rgb { r, g, b })),
        Some(_) => "* ".to_string(),
        None => "  ".to_string(),
    };
    let extra = match item {
        TodoItem::Task(t) => t.task.time.clone(),
        TodoItem::Habit(h) => h.duration.as_ref().map(|d| format!("{} min", d)),
    };
    let mut line = format!(
        "{} {}{} ({})",
        check,
        marker,
        item.title(),
        item.kind()
    );
    if let Some(extra) = extra {
        line.push_str(&format!(" · {}", extra));
    }
    line.push_str(&format!("  [{}]", item.id()));
    line
}

pub fn print_help(binary_name: &str) {
    println!(
        "Life Harmony v{} - tasks, habits and goals across your life areas",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [COMMAND]", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    today [--all|--pending] [--json]   Show today's tasks and habits (default)");
    println!("    parse <text> [--json]             Show what would be extracted from text");
    println!("    add <text>                        Create a task from text");
    println!("    complete <id>                     Toggle completion of a task or habit");
    println!("    export                            Print the stored snapshot as JSON");
    println!("    help                              Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("SMART INPUT:");
    println!("    almoço | jantar | café            Event at 12:30 | 20:00 | 09:00 (social)");
    println!("    com família de Maria              Adds companion, location 'Casa de Maria'");
    println!("    domingo ... sábado                Next occurrence of that weekday");
    println!();
    println!("EXAMPLES:");
    println!("    {} add \"almoço domingo com família de Gardenia\"", binary_name);
    println!("    {} parse jantar sexta", binary_name);
    println!("    {} today --pending", binary_name);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_shows_today() {
        let inv = parse_args(&[]).unwrap();
        assert_eq!(
            inv.command,
            Command::Today {
                show_completed: None,
                json: false
            }
        );
        assert_eq!(inv.root, None);
    }

    #[test]
    fn root_may_appear_anywhere() {
        let inv = parse_args(&args(&["parse", "almoço", "--root", "/tmp/x", "--json"])).unwrap();
        assert_eq!(inv.root, Some(PathBuf::from("/tmp/x")));
        assert_eq!(
            inv.command,
            Command::Parse {
                text: "almoço".to_string(),
                json: true
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(&args(&["parse"])).is_err());
        assert!(parse_args(&args(&["complete"])).is_err());
        assert!(parse_args(&args(&["today", "--bogus"])).is_err());
        assert!(parse_args(&args(&["frobnicate"])).is_err());
        assert!(parse_args(&args(&["--root"])).is_err());
    }

    #[test]
    fn today_flags() {
        let inv = parse_args(&args(&["today", "--pending"])).unwrap();
        assert_eq!(
            inv.command,
            Command::Today {
                show_completed: Some(false),
                json: false
            }
        );
    }
}
