use std::io::{BufRead, Write};

use crate::error::Result;
use crate::store::AccountStore;

use super::open_db;

/// Read a y/N answer. Anything but `y`/`yes` is a refusal.
pub fn confirm(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "{prompt} [y/N]: ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub fn run(yes: bool) -> Result<()> {
    let conn = open_db()?;
    let mut store = AccountStore::load(&conn)?;

    let pending = store.request_reset();
    let confirmed = yes || {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        confirm(
            "Are you sure you want to reset all values to default?",
            &mut stdin.lock(),
            &mut stdout,
        )?
    };

    if confirmed {
        let accounts = store.commit_reset(&conn, pending)?;
        println!("Reset {} accounts to their default amounts.", accounts.len());
    } else {
        pending.cancel();
        println!("Nothing changed.");
    }
    Ok(())
}
