use std::io::{stdin, stdout, BufRead, Write};

use log::warn;

use crate::{ConfirmPrompt, Confirmation};

/// Terminal confirmation: prints the question and reads `y`/`yes` from stdin.
///
/// With `force` set the question is skipped and every prompt is approved.
pub struct StdinConfirmation {
    force: bool,
}

impl StdinConfirmation {
    pub fn new(force: bool) -> Self {
        Self { force }
    }
}

impl Confirmation for StdinConfirmation {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        if self.force {
            return true;
        }

        print!("{} [y/N]: ", prompt);
        if let Err(e) = stdout().flush() {
            warn!("Failed to flush prompt: {}", e);
        }

        let mut input = String::new();
        match stdin().lock().read_line(&mut input) {
            Ok(_) => is_yes(&input),
            Err(e) => {
                warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes" || input == "s" || input == "sim"
}
