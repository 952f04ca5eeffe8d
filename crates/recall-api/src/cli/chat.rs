//! Interactive chat loop.
//!
//! Reads lines from stdin, runs each as a conversation turn, and prints the
//! exact context sent to the model followed by the reply. `exit`/`quit`
//! (case-insensitive) or EOF ends the loop. Turn-level degradations surface
//! as warn-level log lines; a primary-call failure propagates and ends the
//! process.

use std::io::{BufRead, Write};

use console::style;

use crate::state::AppState;

/// `exit` and `quit` terminate the loop, case-insensitively.
pub fn is_exit_command(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "exit" | "quit")
}

pub async fn run_chat_loop(state: &AppState, thread_id: &str) -> anyhow::Result<()> {
    println!(
        "{}",
        style(">>> Recall: long-term memory chat (Postgres + pgvector)")
            .cyan()
            .bold()
    );
    println!(
        "Thread: {}  --  type {} or {} to leave\n",
        style(thread_id).yellow(),
        style("exit").dim(),
        style("quit").dim()
    );

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        print!("{} ", style("You:").bold());
        std::io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if is_exit_command(input) {
            break;
        }

        let output = state.service.send(thread_id, input).await?;

        println!();
        println!("{}", style("--- context sent to the model ---").dim());
        for message in &output.context {
            println!(
                "{} : {}",
                style(message.role.to_string().to_uppercase()).bold(),
                message.content
            );
        }
        println!("{}", style("---------------------------------").dim());
        println!("{} {}\n", style("AI:").green().bold(), output.reply.content);
    }

    Ok(())
}
