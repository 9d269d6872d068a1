use super::render::movie_label;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::{Confirm, Input, Select};
use movie_catalog_models::{Movie, MovieId};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact_text()
        .map_err(|e| eyre!("Failed to read input: {}", e))
}

/// Prompt for yes/no with optional default
pub fn prompt_yes_no(prompt: &str, default: Option<bool>) -> Result<bool> {
    let mut confirm_builder = Confirm::new().with_prompt(prompt);

    if let Some(default_value) = default {
        confirm_builder = confirm_builder.default(default_value);
    }

    confirm_builder
        .interact()
        .map_err(|e| eyre!("Failed to read confirmation: {}", e))
}

/// Pick one entry from a menu, returning its index
pub fn prompt_select(prompt: &str, items: &[&str]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| eyre!("Failed to read selection: {}", e))
}

/// Pick a movie from the catalog; `None` when the list is empty or the user backs out
pub fn prompt_movie(prompt: &str, movies: &[Movie]) -> Result<Option<MovieId>> {
    if movies.is_empty() {
        return Ok(None);
    }

    let labels: Vec<String> = movies.iter().map(movie_label).collect();
    let choice = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()
        .map_err(|e| eyre!("Failed to read selection: {}", e))?;

    Ok(choice.map(|index| movies[index].id))
}
