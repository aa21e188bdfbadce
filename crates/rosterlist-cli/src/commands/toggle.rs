use super::Context;

pub fn run(ctx: &Context, character: &str, task: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut checklist = ctx.ready_checklist()?;

    if checklist.catalog().character(character).is_none() {
        eprintln!("warning: '{character}' is not in the catalog");
    } else if checklist
        .catalog()
        .task_names(character)
        .is_some_and(|tasks| !tasks.iter().any(|t| t == task))
    {
        eprintln!("warning: '{task}' is not a catalog task for {character}");
    }

    let done = checklist.toggle(character, task)?;
    let mark = if done { "done" } else { "not done" };
    println!("{character}: {task} -> {mark}");
    Ok(())
}
