use std::io::{BufRead, Write};

use super::{print_notices, Context};

/// Ask on stderr, read the answer from stdin. Anything but y/yes declines.
fn prompt_stdin(prompt: &str) -> bool {
    eprint!("{prompt} [y/N] ");
    let _ = std::io::stderr().flush();

    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn run(ctx: &Context, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut checklist = ctx.ready_checklist()?;

    let reset = if yes {
        checklist.manual_reset(&|_: &str| true)?
    } else {
        checklist.manual_reset(&prompt_stdin)?
    };
    print_notices(&mut checklist);

    if !reset {
        println!("reset cancelled");
    }
    Ok(())
}
