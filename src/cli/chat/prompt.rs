use rustyline::{Config, Editor, Result};

use crate::planner::Field;

/// Prompt showing how many travel details have been collected, e.g. `trip [2/5]> `.
pub fn generate_prompt(collected: usize) -> String {
    format!("trip [{}/{}]> ", collected.min(Field::ALL.len()), Field::ALL.len())
}

pub fn rl() -> Result<Editor<()>> {
    let config = Config::builder().history_ignore_space(true).build();
    Editor::with_config(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_shows_progress() {
        assert_eq!(generate_prompt(0), "trip [0/5]> ");
        assert_eq!(generate_prompt(3), "trip [3/5]> ");
        assert_eq!(generate_prompt(9), "trip [5/5]> ");
    }
}
