use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use quizgen_tui::{
    draw, load_content, logger, spawn_api_worker, ApiResponse, Config, Controller, HttpBackend,
    KeyOutcome,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("quizgen: {}", e);
            std::process::exit(2);
        }
    };
    logger::init(&config.log_file);
    logger::log(&format!("Starting against {}", config.base_url));

    let initial_content = match std::env::args().nth(1) {
        Some(path) => Some(load_content(Path::new(&path))?),
        None => None,
    };

    let backend = HttpBackend::new(&config).map_err(|e| io::Error::other(e.to_string()))?;
    match config.credentials() {
        Some((email, password)) => backend
            .login(email, password)
            .await
            .map_err(|e| io::Error::other(e.to_string()))?,
        None => logger::log("No credentials configured, calls will run without a session"),
    }
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (response_tx, mut response_rx) = mpsc::unbounded_channel();
    let worker = spawn_api_worker(Arc::new(backend), request_rx, response_tx);

    let mut controller = Controller::new(request_tx);
    if let Some(content) = initial_content {
        controller.view.content.set(content);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut controller, &mut response_rx, &config.base_url).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    drop(controller);
    worker.abort();
    logger::log("Exiting");

    result
}

async fn run_app(
    terminal: &mut AppTerminal,
    controller: &mut Controller,
    response_rx: &mut UnboundedReceiver<ApiResponse>,
    base_url: &str,
) -> io::Result<()> {
    let mut events = EventStream::new();

    loop {
        terminal.draw(|f| draw(f, &controller.view, base_url))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if controller.handle_key(key) == KeyOutcome::Quit {
                        return Ok(());
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => return Ok(()),
            },
            Some(response) = response_rx.recv() => controller.apply_response(response),
        }
    }
}
