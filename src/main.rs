use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tracing_subscriber::EnvFilter;

mod config;
mod editor;
mod error;
mod filetype;
mod input;
mod picker;
mod render;
mod runconfig;
mod scripting;

use editor::Editor;
use error::Result;
use render::Renderer;
use runconfig::{Project, RunConfigurationStore};
use scripting::ScriptEngine;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("lark-worksheet: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to a file under the config directory; stdout belongs to the UI.
/// Set RUST_LOG=debug for verbose logging.
fn init_logging() {
    let Some(dir) = ScriptEngine::config_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("worksheet.log"))
    else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

async fn run() -> Result<()> {
    // Parse command line args
    let args: Vec<String> = env::args().collect();
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut scripts = ScriptEngine::new();
    let script_error = scripts.load_default().err();
    let settings = scripts.settings();

    let project = Project::open(&cwd, settings.modules.clone());
    let store = match args.get(1) {
        Some(path) => RunConfigurationStore::new(path),
        None => {
            RunConfigurationStore::for_project_dir(project.base_dir().unwrap_or(cwd.as_path()))
        }
    };

    let mut editor = Editor::open(project, store, &settings)?;
    if let Some(e) = script_error {
        tracing::warn!("{}", e);
        editor.set_message(format!("Config: {}", e));
    }

    // Set up terminal
    Renderer::setup()?;
    let result = event_loop(&mut editor).await;
    Renderer::teardown()?;

    result
}

async fn event_loop(editor: &mut Editor) -> Result<()> {
    let mut renderer = Renderer::new()?;
    renderer.render(editor)?;

    // Event stream for async key reading
    let mut event_stream = EventStream::new();

    // Main loop
    while editor.running {
        tokio::select! {
            Some(Ok(event)) = event_stream.next() => {
                if let Event::Resize(width, height) = event {
                    renderer.resize(width, height);
                }
                input::handle_event(editor, event);
                renderer.render(editor)?;
            }
            else => break,
        }
    }

    Ok(())
}
