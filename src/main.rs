use std::fs;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use movie_den::app::{App, Step};
use movie_den::client::{DenProxyClient, RecommendationProvider};
use movie_den::config::Config;
use movie_den::store::{DenStore, FileStorage};
use movie_den::view::ViewModel;

const EXPORT_FILE: &str = "movie-den-favorites.json";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("movie_den=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let storage = FileStorage::new(config.data_dir())
        .map_err(|e| anyhow::anyhow!("storage setup failed: {}", e))?;
    let store = DenStore::new(Box::new(storage));

    let client = DenProxyClient::new(
        &config.den_server_url,
        Duration::from_secs(config.request_timeout_secs),
    )
    .map_err(|e| anyhow::anyhow!("HTTP client setup failed: {}", e))?;

    println!("{}", "=== Gemi's Movie Den ===".bright_magenta().bold());
    match client.check_ready().await {
        Ok(()) => println!("{}", "Den server is ready.".bright_green()),
        Err(e) => {
            tracing::warn!(error = %e, "Den server readiness check failed");
            println!(
                "{}",
                "Den server not reachable; mood search is offline, genre picks still work."
                    .yellow()
            );
        }
    }
    println!("{}", "Type '?' for help, 'q' to quit.".bright_black());
    println!();

    let mut app = App::new(store, Arc::new(client));
    let mut rl = DefaultEditor::new()?;

    render(&app.view());

    loop {
        let readline = rl.readline(">> ");
        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'q' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Input error: {:?}", err).red());
                break;
            }
        };

        let trimmed = line.trim().to_string();
        if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
            println!("{}", "Happy watching!".bright_green());
            break;
        }
        if !trimmed.is_empty() {
            let _ = rl.add_history_entry(&line);
        }

        dispatch(&mut app, &mut rl, &trimmed).await;
        render(&app.view());
    }

    Ok(())
}

/// Routes one line of input to a controller action
async fn dispatch(app: &mut App, rl: &mut DefaultEditor, input: &str) {
    // Global verbs first, then step-specific interpretation.
    match input {
        "?" | "help" => {
            print_help();
            return;
        }
        "/" => {
            app.begin_mood_entry();
            return;
        }
        "m" | "list" => {
            app.open_my_list();
            return;
        }
        "b" | "back" | "esc" => {
            app.back();
            return;
        }
        "n" | "reset" => {
            app.reset();
            return;
        }
        "r" => {
            app.randomize_mood();
            return;
        }
        "f" => {
            app.toggle_favorite();
            return;
        }
        "h" | "hype" => {
            app.generate_hype().await;
            return;
        }
        _ => {}
    }

    let step = app.state().step;
    match step {
        Step::GenreSelect => {
            if input.is_empty() {
                return;
            }
            app.pick_genre(input);
        }
        Step::MoodInput => {
            if !input.is_empty() {
                app.set_mood(input);
            }
            app.submit_mood().await;
        }
        Step::Result => {
            if !input.is_empty() {
                println!("{}", "Try 'h' for hype, 'f' to favorite, 'n' for a new pick.".bright_black());
            }
        }
        Step::MyList => {
            dispatch_my_list(app, rl, input);
        }
    }
}

fn dispatch_my_list(app: &mut App, rl: &mut DefaultEditor, input: &str) {
    if let Some(id) = input.strip_prefix("rm ") {
        app.remove_favorite(id.trim());
    } else if input == "export" {
        if let Some(blob) = app.export_favorites() {
            match fs::write(EXPORT_FILE, blob) {
                Ok(()) => println!(
                    "{}",
                    format!("Favorites exported to ./{}", EXPORT_FILE).bright_green()
                ),
                Err(e) => println!("{}", format!("Export failed: {}", e).red()),
            }
        }
    } else if let Some(path) = input.strip_prefix("import ") {
        match fs::read_to_string(path.trim()) {
            Ok(blob) => app.import_favorites(&blob),
            Err(e) => println!("{}", format!("Could not read {}: {}", path.trim(), e).red()),
        }
    } else if input == "clear favorites" {
        if confirm(rl, "Wipe ALL favorites?") {
            app.clear_favorites();
        }
    } else if input == "clear history" {
        if confirm(rl, "Wipe the whole watch history?") {
            app.clear_history();
        }
    } else if !input.is_empty() {
        println!(
            "{}",
            "Commands here: rm <id>, export, import <path>, clear favorites, clear history, b"
                .bright_black()
        );
    }
}

fn confirm(rl: &mut DefaultEditor, question: &str) -> bool {
    let prompt = format!("{} (y/n) ", question);
    matches!(rl.readline(&prompt), Ok(answer) if answer.trim().eq_ignore_ascii_case("y"))
}

/// Rebuilds the terminal view from scratch each pass
fn render(view: &ViewModel) {
    println!();
    match view {
        ViewModel::GenreSelect { genres, notice } => {
            print_notice(notice);
            println!("{}", "What are we feeling tonight?".bold());
            println!(
                "{}",
                "  /  Mood Ta Bol Dekhi? — describe a mood, let the model pick".bright_cyan()
            );
            for genre in genres {
                println!(
                    "  {} {}",
                    format!("{:<8}", genre.name).bright_white().bold(),
                    genre.tagline.bright_black()
                );
            }
            println!(
                "{}",
                "Type a genre name, '/' for mood search, 'm' for your list.".bright_black()
            );
        }
        ViewModel::MoodInput {
            draft,
            is_loading,
            notice,
        } => {
            print_notice(notice);
            println!("{}", "Ki icche korche?".bold());
            println!(
                "{}",
                "Mon khule bol. Ami judge korbo na.".bright_black()
            );
            if !draft.is_empty() {
                println!("  draft: {}", draft.italic());
            }
            if *is_loading {
                println!("{}", "Wait kor, khujchi...".yellow());
            } else {
                println!(
                    "{}",
                    "Type your mood and press enter ('r' for a random one, 'b' to go back)."
                        .bright_black()
                );
            }
        }
        ViewModel::Result {
            movie,
            label,
            is_favorite,
            hype,
            is_hype_loading,
            notice,
        } => {
            print_notice(notice);
            let heart = if *is_favorite { "♥" } else { " " };
            println!(
                "{}  {}",
                format!("VIBE: {}", label.to_uppercase()).bright_black(),
                format!("IMDb {}", movie.rating).bright_yellow()
            );
            println!(
                "{} {} {}",
                heart.bright_red(),
                movie.title.bright_white().bold(),
                format!("({})", movie.year).bright_black()
            );
            println!("  \"{}\"", movie.description.italic());
            println!(
                "{}",
                format!(
                    "  director: {} | cast: {} | runtime: {}",
                    movie.director, movie.cast, movie.runtime
                )
                .bright_black()
            );
            println!(
                "{}",
                format!(
                    "  box office: {} | streaming: {}",
                    movie.box_office, movie.streaming_hint
                )
                .bright_black()
            );
            if *is_hype_loading {
                println!("{}", "Gemi is typing...".yellow());
            }
            if let Some(pitch) = hype {
                println!("{}", "Gemi says:".bright_magenta().bold());
                for line in pitch.lines() {
                    println!("  {}", line.bright_blue());
                }
            } else if !is_hype_loading {
                println!(
                    "{}",
                    "'h' Keno Dekhbo? (hype me) | 'f' favorite | 'n' mood swing".bright_black()
                );
            }
        }
        ViewModel::MyList {
            favorites,
            history,
            notice,
        } => {
            print_notice(notice);
            println!("{}", "Your favorites".bold());
            if favorites.is_empty() {
                println!("{}", "  (none yet — press 'f' on a result)".bright_black());
            }
            for entry in favorites {
                println!(
                    "  {} ({}) — {} {}",
                    entry.movie.title.bright_white(),
                    entry.movie.year,
                    entry.genre_label.bright_black(),
                    format!("[{}]", entry.id).bright_black()
                );
            }
            println!("{}", "Watch history (latest first)".bold());
            if history.is_empty() {
                println!("{}", "  (empty)".bright_black());
            }
            for entry in history {
                println!(
                    "  {} {} ({}) — {}",
                    entry.viewed_at.format("%Y-%m-%d %H:%M").to_string().bright_black(),
                    entry.movie.title,
                    entry.movie.year,
                    entry.genre_label.bright_black()
                );
            }
            println!(
                "{}",
                "rm <id> | export | import <path> | clear favorites | clear history | b"
                    .bright_black()
            );
        }
    }
    println!();
}

fn print_notice(notice: &Option<String>) {
    if let Some(msg) = notice {
        println!("{}", format!("! {}", msg).yellow());
    }
}

fn print_help() {
    println!("{}", "Shortcuts".bold());
    println!("  /          describe a mood (model pick)");
    println!("  <genre>    random pick from that genre (on the genre screen)");
    println!("  r          random mood seed");
    println!("  h          hype pitch for the current movie");
    println!("  f          toggle favorite for the current movie");
    println!("  m          favorites & watch history");
    println!("  b          back to genres");
    println!("  n          reset (mood swing)");
    println!("  q          quit");
}
