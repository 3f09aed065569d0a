use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tafel_core::error::TafelError;
use tafel_core::extraction::pdftotext::PdftotextExtractor;
use tafel_core::output::ConfirmOverwrite;
use tafel_core::ExtractRequest;

use crate::output;

/// Asks on the terminal before replacing an existing file.
struct PromptConfirm;

impl ConfirmOverwrite for PromptConfirm {
    fn confirm_overwrite(&self, path: &Path) -> bool {
        eprint!(
            "The output file {} already exists. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush().ok();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "j" | "ja")
}

pub fn run(
    input_file: PathBuf,
    pages: String,
    output_base: Option<String>,
    config_file: Option<PathBuf>,
    assume_yes: bool,
    output_format: &str,
) -> Result<(), TafelError> {
    let config = super::load_or_default(config_file.as_deref())?;
    let request = ExtractRequest {
        document: input_file,
        pages,
        output: output_base,
        config,
    };

    let extractor = PdftotextExtractor::new();
    let always = |_: &Path| true;
    let confirm: &dyn ConfirmOverwrite = if assume_yes { &always } else { &PromptConfirm };

    let status = tafel_core::run(&request, &extractor, confirm)?;

    match output_format {
        "json" => output::json::print(&status)?,
        _ => output::table::print_status(&status),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("Yes"));
        assert!(is_yes(" ja "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("nope"));
    }
}
