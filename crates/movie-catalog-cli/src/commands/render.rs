use crate::output::Output;
use comfy_table::{Cell, Color, Table};
use movie_catalog_core::CatalogStore;
use movie_catalog_models::Movie;
use owo_colors::OwoColorize;

const NO_IMAGE: &str = "No Image";

pub fn print_catalog(store: &CatalogStore, output: &Output) {
    if !output.is_human() {
        output.json(&snapshot_json(store));
        return;
    }
    if output.is_quiet() {
        return;
    }

    println!("\n{}", "Movies".bright_cyan().bold());
    if store.is_empty() {
        println!("{}", "No movies in the catalog".dimmed());
        return;
    }
    println!("{}", movie_table(store.movies()));
}

pub fn print_watchlist(store: &CatalogStore, output: &Output) {
    let watchlist = store.watchlist_view();

    if !output.is_human() {
        output.json(&serde_json::json!({ "watchlist": watchlist }));
        return;
    }
    if output.is_quiet() {
        return;
    }

    println!("\n{}", "My Watchlist".bright_cyan().bold());
    if watchlist.is_empty() {
        println!("{}", "No movies in the watchlist yet".dimmed());
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Status").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for movie in watchlist {
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title),
            status_cell(movie),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);
}

pub fn snapshot_json(store: &CatalogStore) -> serde_json::Value {
    serde_json::to_value(store.snapshot()).unwrap_or_default()
}

fn movie_table(movies: &[Movie]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Genre").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Status").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Watchlist").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Image").add_attribute(comfy_table::Attribute::Bold),
    ]);

    for movie in movies {
        let bookmark = if movie.in_watchlist {
            Cell::new("★").fg(Color::Yellow)
        } else {
            Cell::new("")
        };
        let image = movie
            .image
            .as_ref()
            .map(|image| image.to_string())
            .unwrap_or_else(|| NO_IMAGE.to_string());

        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title),
            Cell::new(&movie.genre),
            Cell::new(movie.year),
            status_cell(movie),
            bookmark,
            Cell::new(image),
        ]);
    }

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn status_cell(movie: &Movie) -> Cell {
    if movie.watched {
        Cell::new("✓ Watched").fg(Color::Green)
    } else {
        Cell::new("Not watched")
    }
}

/// One-line label used in selection menus
pub fn movie_label(movie: &Movie) -> String {
    let mut label = format!("#{} {} ({}, {})", movie.id, movie.title, movie.genre, movie.year);
    if movie.watched {
        label.push_str(" ✓");
    }
    if movie.in_watchlist {
        label.push_str(" ★");
    }
    label
}
