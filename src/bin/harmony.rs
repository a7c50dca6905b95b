use anyhow::Result;
use chrono::Utc;
use life_harmony::cli::{self, Command};
use life_harmony::config::Config;
use life_harmony::context::{AppContext, StandardContext};
use life_harmony::logging;
use life_harmony::model::extract_event_info_now;
use life_harmony::storage::{CompletionTarget, LocalStorage};
use std::env;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = cli::parse_args(&args)?;

    if invocation.command == Command::Help {
        cli::print_help("harmony");
        return Ok(());
    }

    let ctx = StandardContext::new(invocation.root);
    let config = Config::load_or_default(&ctx)?;

    // A broken log file should not stop the planner from working.
    if let Err(e) = logging::init_file_logger(&ctx, config.log_level_filter()) {
        eprintln!("Warning: {}", e);
    }

    run(invocation.command, &ctx, &config)
}

fn run(command: Command, ctx: &dyn AppContext, config: &Config) -> Result<()> {
    match command {
        Command::Help => cli::print_help("harmony"),
        Command::Parse { text, json } => {
            let info = extract_event_info_now(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", cli::format_event_info(&info));
            }
        }
        Command::Add { text } => {
            let task = extract_event_info_now(&text).into_task(Utc::now());
            let (id, title) = (task.id.clone(), task.title.clone());
            LocalStorage::modify(ctx, |snapshot| {
                snapshot.add_task(task);
                Ok(())
            })?;
            log::info!("Added task {} from input '{}'", id, text);
            println!("Added '{}' [{}]", title, id);
        }
        Command::Today {
            show_completed,
            json,
        } => {
            let snapshot = LocalStorage::load(ctx)?;
            let items = snapshot.today_items(show_completed.unwrap_or(config.show_completed));
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if items.is_empty() {
                println!("Nothing planned.");
            } else {
                for item in &items {
                    println!("{}", cli::format_todo_line(item, config.color_output));
                }
            }
        }
        Command::Complete { id } => {
            let (target, done) =
                LocalStorage::modify(ctx, |snapshot| snapshot.toggle_completion(&id))?;
            let what = match target {
                CompletionTarget::Task => "Task",
                CompletionTarget::Habit => "Habit",
            };
            let state = if done { "completed" } else { "reopened" };
            println!("{} {} {}", what, id, state);
        }
        Command::Export => {
            let snapshot = LocalStorage::load(ctx)?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }
    Ok(())
}
