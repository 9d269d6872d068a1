use super::prompts::{prompt_movie, prompt_select, prompt_string, prompt_yes_no};
use super::{open_catalog, render};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_catalog_config::Config;
use movie_catalog_core::{CatalogStore, FormController, ImageStaging};
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::info;

const MENU: &[&str] = &[
    "Add movie",
    "Edit movie",
    "Delete movie",
    "Toggle watched",
    "Toggle watchlist",
    "Show catalog",
    "Show watchlist",
    "Quit",
];

pub fn run_session(config: &Config, no_seed: bool, output: &Output) -> Result<()> {
    if !output.is_human() {
        return Err(eyre!("Interactive sessions only support --output human; use 'replay' for JSON output"));
    }

    let (mut store, mut staging) = open_catalog(config, no_seed)?;
    let mut form = FormController::new();
    info!("Session started with {} movies", store.len());

    println!("\n{}", "Movie Catalog".bright_cyan().bold());
    println!("{}", "Changes last for this session only.".dimmed());
    render::print_catalog(&store, output);

    loop {
        println!();
        match prompt_select("What would you like to do?", MENU)? {
            0 => {
                form.cancel(&mut staging);
                fill_form(&mut form, &mut staging, output)?;
                submit(&mut form, &mut store, &mut staging, output)?;
            }
            1 => {
                let Some(id) = prompt_movie("Movie to edit", store.movies())? else {
                    output.warn("No movies available");
                    continue;
                };
                if let Some(movie) = store.get(id).cloned() {
                    form.start_editing(&movie, &mut staging);
                }
                fill_form(&mut form, &mut staging, output)?;
                if prompt_yes_no("Save changes?", Some(true))? {
                    submit(&mut form, &mut store, &mut staging, output)?;
                } else {
                    form.cancel(&mut staging);
                    output.info("Edit cancelled");
                }
            }
            2 => {
                let Some(id) = prompt_movie("Movie to delete", store.movies())? else {
                    output.warn("No movies available");
                    continue;
                };
                if let Some(movie) = form.delete(&mut store, &mut staging, id) {
                    output.success(format!("Deleted '{}'", movie.title));
                }
            }
            3 => {
                let Some(id) = prompt_movie("Mark watched / unwatched", store.movies())? else {
                    output.warn("No movies available");
                    continue;
                };
                if let Some(watched) = store.toggle_watched(id) {
                    let state = if watched { "watched" } else { "not watched" };
                    output.success(format!("Movie #{} marked {}", id, state));
                }
            }
            4 => {
                let Some(id) = prompt_movie("Add to / remove from watchlist", store.movies())? else {
                    output.warn("No movies available");
                    continue;
                };
                if let Some(in_watchlist) = store.toggle_watchlist(id) {
                    let change = if in_watchlist { "added to" } else { "removed from" };
                    output.success(format!("Movie #{} {} the watchlist", id, change));
                }
            }
            5 => render::print_catalog(&store, output),
            6 => render::print_watchlist(&store, output),
            _ => break,
        }
    }

    form.cancel(&mut staging);
    info!(
        "Session ended with {} movies, {} staged images still attached",
        store.len(),
        staging.live_handles()
    );
    Ok(())
}

fn fill_form(form: &mut FormController, staging: &mut ImageStaging, output: &Output) -> Result<()> {
    println!("{}", form.heading().bold());

    let title = prompt_string("Title", non_empty(form.title()))?;
    form.set_title(title);
    let genre = prompt_string("Genre", non_empty(form.genre()))?;
    form.set_genre(genre);
    let year = prompt_string("Release year", non_empty(form.year()))?;
    form.set_year(year);

    let current = form
        .image()
        .map(|image| image.to_string())
        .unwrap_or_else(|| "none".to_string());
    let path = prompt_string(&format!("Image file (current: {}, empty keeps it)", current), None)?;
    let path = path.trim();
    if !path.is_empty() {
        match form.choose_image(staging, Path::new(path)) {
            Ok(handle) => output.info(format!("Image staged as {}", handle)),
            Err(e) => output.error(e.to_string()),
        }
    }
    Ok(())
}

/// Submit the form, offering to correct the kept values after each rejection
fn submit(
    form: &mut FormController,
    store: &mut CatalogStore,
    staging: &mut ImageStaging,
    output: &Output,
) -> Result<()> {
    loop {
        let editing = form.is_editing();
        match form.submit(store, staging) {
            Ok(id) => {
                let verb = if editing { "Updated" } else { "Added" };
                output.success(format!("{} movie #{}", verb, id));
                return Ok(());
            }
            Err(e) => {
                output.error(e.to_string());
                if !prompt_yes_no("Correct the form and try again?", Some(true))? {
                    form.cancel(staging);
                    output.info("Draft discarded");
                    return Ok(());
                }
                fill_form(form, staging, output)?;
            }
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
