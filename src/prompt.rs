use anyhow::Result;

use crate::types::Candidate;

/// The user-facing side of a cleanup: choosing candidates and confirming risky removals.
pub trait Prompter {
    /// `None` means the user dismissed the picker.
    fn pick(&self, items: &[Candidate], multi_select: bool, prompt: &str) -> Result<Option<Vec<Candidate>>>;

    fn confirm(&self, message: &str) -> Result<bool>;
}

/// Non-interactive mode for `--yes`: everything is picked and every question is answered yes.
pub struct AutoPrompter;

impl Prompter for AutoPrompter {
    fn pick(&self, items: &[Candidate], multi_select: bool, _prompt: &str) -> Result<Option<Vec<Candidate>>> {
        if multi_select {
            Ok(Some(items.to_vec()))
        } else {
            Ok(items.first().cloned().map(|item| vec![item]))
        }
    }

    fn confirm(&self, _message: &str) -> Result<bool> {
        Ok(true)
    }
}

#[cfg(feature = "full")]
pub use terminal::TerminalPrompter;

#[cfg(feature = "full")]
mod terminal {
    use anyhow::{Context, Result};
    use dialoguer::{Confirm, MultiSelect, Select};

    use super::Prompter;
    use crate::types::Candidate;

    pub struct TerminalPrompter;

    impl Prompter for TerminalPrompter {
        fn pick(&self, items: &[Candidate], multi_select: bool, prompt: &str) -> Result<Option<Vec<Candidate>>> {
            let labels: Vec<String> = items.iter().map(|item| item.to_string()).collect();

            let chosen = if multi_select {
                MultiSelect::new()
                    .with_prompt(format!("{prompt} (space to toggle, enter to confirm)"))
                    .items(&labels)
                    .interact_opt()
                    .context("Failed to read selection")?
            } else {
                Select::new()
                    .with_prompt(prompt)
                    .items(&labels)
                    .default(0)
                    .interact_opt()
                    .context("Failed to read selection")?
                    .map(|index| vec![index])
            };

            Ok(chosen.map(|indices| indices.into_iter().filter_map(|i| items.get(i).cloned()).collect()))
        }

        fn confirm(&self, message: &str) -> Result<bool> {
            Confirm::new().with_prompt(message).default(false).interact().context("Failed to read confirmation")
        }
    }
}
