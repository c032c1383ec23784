//! bunpo: a terminal viewer for a sectioned grammar reference.
#![allow(clippy::multiple_crate_versions)]

use bunpo::app_state::{self, AppState, Focus, View, ViewOptions};
use bunpo::config::Config;
use bunpo::error::ViewerError;
use bunpo::highlight::Highlighter;
use bunpo::section::Document;
use bunpo::source::Source;
use bunpo::storage::LocalStorage;
use bunpo::{html, nav, ui};
use clap::{Parser, Subcommand};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Longest the event loop sleeps when no live filter is pending.
const IDLE_POLL: Duration = Duration::from_millis(500);

#[derive(Parser)]
#[command(name = "bunpo")]
#[command(about = "Browse and search a sectioned grammar reference", long_about = None)]
struct Args {
    /// Reference document path or http(s) URL (defaults to the configured document)
    #[arg(long, short = 'd', value_name = "PATH|URL")]
    document: Option<String>,

    /// Section to open first, as a title or a #fragment
    #[arg(long, short = 's', value_name = "TITLE|#FRAGMENT")]
    section: Option<String>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the table of contents
    Toc {
        /// Emit an HTML list of fragment links
        #[arg(long)]
        html: bool,
    },
    /// Print one section
    Show {
        /// Section title or #fragment
        title: String,
        /// Render the section as HTML
        #[arg(long)]
        html: bool,
    },
    /// Full-text search over titles and bodies
    Search {
        /// Case-insensitive search term
        query: String,
        /// Emit the HTML results page
        #[arg(long)]
        html: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Override config with command line args
    if let Some(document) = args.document {
        cfg.document = document;
    }
    if let Some(log_file) = args.log_file {
        cfg.log_file = log_file.to_string_lossy().to_string();
    }

    let interactive = args.command.is_none();
    if let Err(e) = init_logging(&cfg, interactive) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let source = Source::parse(&cfg.document);
    let result = match args.command {
        None => run_tui(&cfg, &source, args.section.as_deref()).map_err(|e| e.to_string()),
        Some(command) => run_command(&cfg, &source, command),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Sends logs to stderr for subcommands, and only to a file for the interactive viewer.
fn init_logging(cfg: &Config, interactive: bool) -> Result<(), ViewerError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match cfg.log_path() {
        Some(path) => {
            let file = File::create(path).map_err(|e| ViewerError::io(path_str(path), e))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if interactive => {}
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}

fn open_storage(cfg: &Config) -> LocalStorage {
    LocalStorage::open(&cfg.storage_file).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "local storage unavailable, preferences will not persist");
        LocalStorage::in_memory()
    })
}

fn run_command(cfg: &Config, source: &Source, command: Command) -> Result<ExitCode, String> {
    let document = match source.load() {
        Ok(document) => document,
        Err(e) => {
            let detail = e.to_string();
            if matches!(command, Command::Toc { html: true }
                | Command::Show { html: true, .. }
                | Command::Search { html: true, .. })
            {
                print!("{}", html::render_error(source.location(), &detail));
                return Ok(ExitCode::FAILURE);
            }
            return Err(detail);
        }
    };

    match command {
        Command::Toc { html: true } => print!("{}", html::render_toc(&document)),
        Command::Toc { html: false } => {
            for (i, section) in document.sections().iter().enumerate() {
                let key = document.key(i).unwrap_or(&section.title);
                println!("{}\t{}", section.title, nav::fragment_for(key));
            }
        }
        Command::Show { title, html } => {
            let Some(section) = find_section(&document, &title) else {
                tracing::warn!(%title, "section not found");
                return Ok(ExitCode::FAILURE);
            };
            if html {
                print!("{}", html::render_section(section));
            } else {
                print!("{}", section.body);
            }
        }
        Command::Search { query, html } => {
            let hits = document.search(&query, cfg.preview_width);
            if html {
                print!(
                    "{}",
                    html::render_search_results(&document, query.trim(), &hits)
                );
            } else {
                for hit in &hits {
                    println!("{}\n    {}", hit.title, hit.preview);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Looks a section up by fragment, navigation key or title.
fn find_section<'a>(document: &'a Document, target: &str) -> Option<&'a bunpo::section::Section> {
    let key = nav::decode_fragment(target);
    document.resolve(&key).and_then(|i| document.get(i))
}

fn run_tui(cfg: &Config, source: &Source, section: Option<&str>) -> io::Result<ExitCode> {
    let options = ViewOptions::from(cfg);
    let storage = open_storage(cfg);

    let mut app = match source.load() {
        Ok(document) => {
            let mut app = AppState::new(
                document,
                source.location(),
                options,
                storage,
                Highlighter::new(&cfg.theme),
            );
            if let Some(target) = section {
                app.navigate(target);
            }
            app
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load document");
            AppState::failed(source.location(), &e, options, storage)
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.resize(terminal.size()?.width);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    if app.current_view == View::Error {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

#[allow(clippy::too_many_lines)]
fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = app.next_deadline(Instant::now()).unwrap_or(IDLE_POLL);
        if !event::poll(timeout)? {
            app.tick(Instant::now());
            continue;
        }

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            Event::Resize(width, _) => {
                app.resize(width);
                continue;
            }
            _ => continue,
        };

        if app.current_view == View::Error {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(());
            }
            continue;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(());
        }

        app.message = None;

        match app.focus {
            Focus::SearchInput => match key.code {
                KeyCode::Char(c) => {
                    app.search_input.push(c);
                    app.on_search_input(Instant::now());
                }
                KeyCode::Backspace => {
                    app.search_input.pop();
                    app.on_search_input(Instant::now());
                }
                KeyCode::Enter => {
                    if app.submit_search() {
                        app.focus = Focus::Content;
                    }
                }
                KeyCode::Esc => {
                    app.clear_search();
                    app.cycle_focus();
                }
                KeyCode::Tab => app.cycle_focus(),
                KeyCode::Down if app.sidebar_visible() => {
                    app.focus = Focus::Sidebar;
                }
                _ => {}
            },
            Focus::Sidebar => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Up | KeyCode::Char('k') => app.toc_prev(),
                KeyCode::Down | KeyCode::Char('j') => app.toc_next(),
                KeyCode::Enter => {
                    app.select_toc_entry();
                    app.focus = Focus::Content;
                }
                KeyCode::Char('/') => app.focus = Focus::SearchInput,
                KeyCode::Tab => app.cycle_focus(),
                KeyCode::Char('s') => app.toggle_sidebar(),
                KeyCode::Char('o') => app.show_overview(),
                KeyCode::Char('[') => {
                    app.back();
                }
                KeyCode::Char(']') => {
                    app.forward();
                }
                _ => {}
            },
            Focus::Content => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Up | KeyCode::Char('k') => app.content_up(),
                KeyCode::Down | KeyCode::Char('j') => app.content_down(),
                KeyCode::Enter => app.content_select(),
                KeyCode::Char('/') => app.focus = Focus::SearchInput,
                KeyCode::Tab => app.cycle_focus(),
                KeyCode::Char('s') => app.toggle_sidebar(),
                KeyCode::Char('o') => app.show_overview(),
                KeyCode::Left | KeyCode::Char('[') => {
                    app.back();
                }
                KeyCode::Right | KeyCode::Char(']') => {
                    app.forward();
                }
                _ => {}
            },
        }
    }
}
