use crate::models::{EditProposal, ProposalStatus};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use similar::{ChangeTag, TextDiff};
use std::time::Duration;

/// Manages CLI display and output formatting.
pub struct CliDisplayManager {
    spinner: Option<ProgressBar>,
}

impl Default for CliDisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CliDisplayManager {
    /// Creates a new `CliDisplayManager`.
    pub fn new() -> Self {
        CliDisplayManager { spinner: None }
    }

    /// Prints the application header.
    pub fn print_header(&self) {
        let title = format!("│  ✎ redline v{:<8}│", env!("CARGO_PKG_VERSION"));
        println!("\n{}", "╭──────────────────────╮".bright_magenta());
        println!("{}", title.bright_magenta().bold());
        println!("{}\n", "╰──────────────────────╯".bright_magenta());
    }

    /// Prints where the server listens and whether it can reach the model.
    pub fn print_server_start(&self, address: &str, model: &str, configured: bool) {
        self.print_section("🌐", "Serving edit proposals", &format!("POST {}", address));
        self.print_info(&format!("Model: {}", model));
        if !configured {
            println!(
                "   {} {}",
                "✗".bright_red(),
                "No API key found; every request will fail until restarted with one"
                    .bright_red()
                    .bold()
            );
        }
    }

    /// Starts a spinner while waiting on the model.
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template(&format!(
            "   {} {{spinner}} {}",
            "→".bright_white(),
            message.italic().bright_white()
        )) {
            spinner.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
        }
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Stops the spinner.
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Prints a proposal. Edits are shown as diffs; nothing is applied.
    pub fn print_proposal(&self, document: &str, proposal: &EditProposal, duration: Duration) {
        let status = proposal.status();
        let headline = format!("Proposal: {}", status);
        let headline = match status {
            ProposalStatus::Success | ProposalStatus::MultipleEdits | ProposalStatus::ReplaceAll => {
                headline.bright_green().bold()
            }
            ProposalStatus::ClarificationNeeded => headline.bright_yellow().bold(),
            ProposalStatus::Conversation => headline.bright_cyan().bold(),
            ProposalStatus::Rejected | ProposalStatus::Error => headline.bright_red().bold(),
        };
        println!("\n{}", headline);

        match proposal {
            EditProposal::Success {
                old_string,
                new_string,
            } => self.print_diff(old_string, new_string),
            EditProposal::MultipleEdits { edits } => {
                for (index, edit) in edits.iter().enumerate() {
                    self.print_info(&format!("Edit {} of {}", index + 1, edits.len()));
                    self.print_diff(&edit.old_string, &edit.new_string);
                }
            }
            EditProposal::ReplaceAll { content } => self.print_diff(document, content),
            EditProposal::ClarificationNeeded { message }
            | EditProposal::Conversation { message }
            | EditProposal::Rejected { message }
            | EditProposal::Error { message } => println!("{}", message),
        }

        println!();
        println!(
            "{}",
            format!("⚡ Completed in {:.2?}", duration)
                .bright_white()
                .dimmed(),
        );
    }

    fn print_diff(&self, old: &str, new: &str) {
        for line in diff_lines(old, new) {
            match line.chars().next() {
                Some('-') => println!("{}", line.bright_red()),
                Some('+') => println!("{}", line.bright_green()),
                _ => println!("{}", line.dimmed()),
            }
        }
    }

    /// Helper function to print a section header.
    fn print_section(&self, icon: &str, title: &str, description: &str) {
        println!("{} {}", icon.bright_yellow(), title.bright_cyan().bold());
        if !description.is_empty() {
            self.print_info(description);
        }
    }

    /// Helper function to print an informational message.
    fn print_info(&self, message: &str) {
        println!(
            "   {} {}",
            "→".bright_white(),
            message.italic().bright_white()
        );
    }
}

/// Line diff of `old` against `new`, each line prefixed with `-`, `+` or a space.
pub fn diff_lines(old: &str, new: &str) -> Vec<String> {
    TextDiff::from_lines(old, new)
        .iter_all_changes()
        .map(|change| {
            let sign = match change.tag() {
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
                ChangeTag::Equal => ' ',
            };
            format!("{} {}", sign, change.value().trim_end_matches('\n'))
        })
        .collect()
}
