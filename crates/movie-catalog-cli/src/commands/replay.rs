use super::{open_catalog, render};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_catalog_config::Config;
use movie_catalog_core::{CatalogError, CatalogStore, FormController, ImageStaging};
use movie_catalog_models::{ImageRef, MovieId};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One scripted catalog action
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Add {
        title: String,
        genre: String,
        year: YearInput,
        #[serde(default)]
        image: Option<String>,
        /// Local file to stage, relative to the script
        #[serde(default)]
        image_path: Option<PathBuf>,
    },
    /// Fields left out keep the record's current values
    Edit {
        id: u64,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        genre: Option<String>,
        #[serde(default)]
        year: Option<YearInput>,
        #[serde(default)]
        image: Option<String>,
        #[serde(default)]
        image_path: Option<PathBuf>,
    },
    Delete {
        id: u64,
    },
    ToggleWatched {
        id: u64,
    },
    ToggleWatchlist {
        id: u64,
    },
}

/// Year as written in the script; text is passed through so bad input is
/// rejected the same way as typed form input
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum YearInput {
    Number(i64),
    Text(String),
}

impl fmt::Display for YearInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearInput::Number(year) => write!(f, "{}", year),
            YearInput::Text(text) => f.write_str(text),
        }
    }
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Add { .. } => "add",
            Action::Edit { .. } => "edit",
            Action::Delete { .. } => "delete",
            Action::ToggleWatched { .. } => "toggle_watched",
            Action::ToggleWatchlist { .. } => "toggle_watchlist",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepOutcome {
    pub step: usize,
    pub action: &'static str,
    pub ok: bool,
    pub message: String,
}

pub fn run_replay(config: &Config, file: &Path, no_seed: bool, output: &Output) -> Result<()> {
    let actions = load_actions(file)?;
    let (mut store, mut staging) = open_catalog(config, no_seed)?;
    let mut form = FormController::new();
    let base_dir = file.parent().unwrap_or_else(|| Path::new("."));

    info!("Replaying {} actions from {}", actions.len(), file.display());
    let outcomes = apply_actions(&mut store, &mut staging, &mut form, &actions, base_dir);
    let failed = outcomes.iter().filter(|outcome| !outcome.ok).count();

    if output.is_human() {
        for outcome in &outcomes {
            let line = format!("[{}] {}: {}", outcome.step, outcome.action, outcome.message);
            if outcome.ok {
                output.success(line);
            } else {
                output.error(line);
            }
        }
        render::print_catalog(&store, output);
        render::print_watchlist(&store, output);
        if failed > 0 {
            output.warn(format!("{} of {} actions failed", failed, outcomes.len()));
        }
    } else {
        output.json(&json!({
            "steps": outcomes,
            "failed": failed,
            "catalog": render::snapshot_json(&store),
        }));
    }

    Ok(())
}

pub fn load_actions(file: &Path) -> Result<Vec<Action>> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| eyre!("Failed to read {}: {}", file.display(), e))?;
    serde_json::from_str(&content).map_err(|e| eyre!("Invalid action script {}: {}", file.display(), e))
}

/// Apply actions in order; a failing action is reported and the rest still run
pub fn apply_actions(
    store: &mut CatalogStore,
    staging: &mut ImageStaging,
    form: &mut FormController,
    actions: &[Action],
    base_dir: &Path,
) -> Vec<StepOutcome> {
    actions
        .iter()
        .enumerate()
        .map(|(index, action)| {
            let result = apply_action(store, staging, form, action, base_dir);
            if let Err(message) = &result {
                // The next action starts from a clean form
                form.cancel(staging);
                debug!("Action {} ({}) failed: {}", index + 1, action.name(), message);
            }
            let (ok, message) = match result {
                Ok(message) => (true, message),
                Err(message) => (false, message),
            };
            StepOutcome {
                step: index + 1,
                action: action.name(),
                ok,
                message,
            }
        })
        .collect()
}

fn apply_action(
    store: &mut CatalogStore,
    staging: &mut ImageStaging,
    form: &mut FormController,
    action: &Action,
    base_dir: &Path,
) -> std::result::Result<String, String> {
    match action {
        Action::Add { title, genre, year, image, image_path } => {
            form.cancel(staging);
            form.set_title(title.as_str());
            form.set_genre(genre.as_str());
            form.set_year(year.to_string());
            attach_image(form, staging, image.as_deref(), image_path.as_deref(), base_dir)?;

            let id = form.submit(store, staging).map_err(|e| e.to_string())?;
            Ok(format!("added movie #{}", id))
        }
        Action::Edit { id, title, genre, year, image, image_path } => {
            let id = MovieId(*id);
            let movie = store
                .get(id)
                .cloned()
                .ok_or_else(|| CatalogError::EditTargetNotFound(id).to_string())?;

            form.start_editing(&movie, staging);
            if let Some(title) = title {
                form.set_title(title.as_str());
            }
            if let Some(genre) = genre {
                form.set_genre(genre.as_str());
            }
            if let Some(year) = year {
                form.set_year(year.to_string());
            }
            attach_image(form, staging, image.as_deref(), image_path.as_deref(), base_dir)?;

            form.submit(store, staging).map_err(|e| e.to_string())?;
            Ok(format!("updated movie #{}", id))
        }
        Action::Delete { id } => {
            let id = MovieId(*id);
            Ok(match form.delete(store, staging, id) {
                Some(movie) => format!("deleted movie #{} '{}'", id, movie.title),
                None => format!("movie #{} not found, nothing to delete", id),
            })
        }
        Action::ToggleWatched { id } => {
            let id = MovieId(*id);
            Ok(match store.toggle_watched(id) {
                Some(true) => format!("movie #{} marked watched", id),
                Some(false) => format!("movie #{} marked not watched", id),
                None => format!("movie #{} not found, nothing to toggle", id),
            })
        }
        Action::ToggleWatchlist { id } => {
            let id = MovieId(*id);
            Ok(match store.toggle_watchlist(id) {
                Some(true) => format!("movie #{} added to watchlist", id),
                Some(false) => format!("movie #{} removed from watchlist", id),
                None => format!("movie #{} not found, nothing to toggle", id),
            })
        }
    }
}

fn attach_image(
    form: &mut FormController,
    staging: &mut ImageStaging,
    image: Option<&str>,
    image_path: Option<&Path>,
    base_dir: &Path,
) -> std::result::Result<(), String> {
    if let Some(path) = image_path {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        };
        form.choose_image(staging, &path).map_err(|e| e.to_string())?;
    } else if let Some(image) = image {
        form.set_image(staging, Some(ImageRef::new(image)))
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}
