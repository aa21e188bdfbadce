use chrono::{DateTime, Utc};
use rosterlist_core::{Checklist, KeyValueStore, Phase, Progress};
use serde::Serialize;

use super::Context;

#[derive(Serialize)]
struct TaskView<'a> {
    name: &'a str,
    done: bool,
}

#[derive(Serialize)]
struct CharacterView<'a> {
    name: &'a str,
    progress: Progress,
    tasks: Vec<TaskView<'a>>,
}

#[derive(Serialize)]
struct ChecklistView<'a> {
    phase: Phase,
    last_checked: Option<DateTime<Utc>>,
    characters: Vec<CharacterView<'a>>,
}

fn view<S: KeyValueStore>(checklist: &Checklist<S>) -> ChecklistView<'_> {
    let state = checklist.state();
    let characters = checklist
        .catalog()
        .characters()
        .iter()
        .map(|character| CharacterView {
            name: &character.name,
            progress: state.progress(character),
            tasks: character
                .tasks
                .iter()
                .map(|task| TaskView {
                    name: task,
                    done: state.is_done(&character.name, task),
                })
                .collect(),
        })
        .collect();

    ChecklistView {
        phase: checklist.phase(),
        last_checked: checklist.last_checked(),
        characters,
    }
}

pub fn run(ctx: &Context, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let checklist = ctx.ready_checklist()?;
    let view = view(&checklist);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Task List");
    for character in &view.characters {
        println!();
        println!(
            "{} ({}/{})",
            character.name, character.progress.done, character.progress.total
        );
        for task in &character.tasks {
            let mark = if task.done { "x" } else { " " };
            println!("  [{mark}] {}", task.name);
        }
    }
    Ok(())
}
