use anyhow::Result;
use inquire::{
    Confirm, CustomType, CustomUserError, InquireError, Select, Text, validator::Validation,
};

/// Line-based terminal interaction used by the location flows.
pub trait Console {
    fn print(&mut self, message: &str);

    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    fn text(&mut self, prompt: &str) -> Result<String>;

    /// Ask for a 1-based position among `count` listed items; returns it 0-based.
    fn get_index(&mut self, count: usize) -> Result<usize>;

    /// Pick one entry of a menu; returns its 0-based position.
    fn select(&mut self, prompt: &str, options: &[&str]) -> Result<usize>;
}

/// [`Console`] on stdin/stdout through `inquire`.
#[derive(Debug, Default)]
pub struct InquireConsole;

impl Console for InquireConsole {
    fn print(&mut self, message: &str) {
        println!("{message}");
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(Confirm::new(prompt).with_default(false).prompt()?)
    }

    fn text(&mut self, prompt: &str) -> Result<String> {
        Ok(Text::new(prompt).prompt()?)
    }

    fn get_index(&mut self, count: usize) -> Result<usize> {
        let index = CustomType::<usize>::new("Enter a number:")
            .with_error_message("Please type a whole number.")
            .with_validator(move |n: &usize| -> Result<Validation, CustomUserError> {
                if (1..=count).contains(n) {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid(format!("Choose between 1 and {count}.").into()))
                }
            })
            .prompt()?;

        Ok(index - 1)
    }

    fn select(&mut self, prompt: &str, options: &[&str]) -> Result<usize> {
        let choice = Select::new(prompt, options.to_vec()).raw_prompt()?;
        Ok(choice.index)
    }
}

/// Ctrl-C or Esc inside a prompt.
pub fn is_interrupt(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InquireError>(),
        Some(InquireError::OperationInterrupted | InquireError::OperationCanceled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupts_are_recognised() {
        assert!(is_interrupt(&InquireError::OperationInterrupted.into()));
        assert!(is_interrupt(&InquireError::OperationCanceled.into()));
        assert!(!is_interrupt(&anyhow::anyhow!("disk full")));
    }
}
