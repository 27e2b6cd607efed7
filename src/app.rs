use std::io;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::thread;

use anyhow::Context;
use crossterm::cursor::SetCursorStyle;
use crossterm::event;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::error;
use tracing::trace;

use crate::engine::{Engine, EngineFault};
use crate::input::{HostEvent, InputHandler};
use crate::state::Mode;
use crate::text_buffer::TextBuffer;
use crate::ui::Renderer;

pub struct App {
    engine: Engine<TextBuffer>,
    renderer: Renderer,
    runtime: compio::runtime::Runtime,
    event_tx: flume::Sender<HostEvent>,
    event_rx: flume::Receiver<HostEvent>,
    fault_rx: flume::Receiver<EngineFault>,
    message: String,
}

impl App {
    pub fn new(file: Option<PathBuf>) -> anyhow::Result<Self> {
        let runtime = compio::runtime::Runtime::new().context("create io runtime")?;
        let (text, message) = match file {
            Some(path) => {
                let text = runtime
                    .block_on(read_file_text(path.clone()))
                    .with_context(|| format!("read {}", path.display()))?;
                (text, path.display().to_string())
            }
            None => (String::new(), "new buffer".to_string()),
        };

        let (event_tx, event_rx) = flume::bounded(1024);
        let (fault_tx, fault_rx) = flume::unbounded();
        let engine = Engine::new(TextBuffer::new(&text), fault_tx);

        Ok(Self {
            engine,
            renderer: Renderer::new(),
            runtime,
            event_tx,
            event_rx,
            fault_rx,
            message,
        })
    }

    pub fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, SetTitle("vix"))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        self.sync_cursor_style(&mut terminal)?;
        self.start_input_pump();

        loop {
            terminal.draw(|frame| self.renderer.render(frame, &self.engine, &self.message))?;
            trace!("redraw");

            let event = self.event_rx.recv().map_err(|err| {
                error!("event bus disconnected while waiting for input: {}", err);
                anyhow::anyhow!("event bus disconnected")
            })?;
            match event {
                HostEvent::Quit => break,
                HostEvent::Redraw => {}
                HostEvent::Key(key) => {
                    // One keystroke runs to completion, buffer edits
                    // included, before the next is accepted.
                    if let Err(err) = self.runtime.block_on(self.engine.handle_key(&key)) {
                        error!("keystroke {:?} failed: {}", key, err);
                        self.message = format!("edit failed: {}", err);
                    }
                    self.drain_faults();
                }
            }
            self.sync_cursor_style(&mut terminal)?;
        }

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            SetCursorStyle::DefaultUserShape,
            LeaveAlternateScreen
        )?;
        Ok(())
    }

    fn drain_faults(&mut self) {
        while let Ok(fault) = self.fault_rx.try_recv() {
            self.message = fault.to_string();
        }
    }

    fn start_input_pump(&self) {
        let event_tx = self.event_tx.clone();
        let input_handler = InputHandler::new();
        thread::spawn(move || {
            loop {
                let evt = match event::read() {
                    Ok(evt) => evt,
                    Err(err) => {
                        error!("input pump stopped: failed to read terminal event: {}", err);
                        break;
                    }
                };
                let Some(host_event) = input_handler.event(&evt) else {
                    continue;
                };
                if let Err(err) = event_tx.send(host_event) {
                    error!(
                        "input pump stopped: failed to send event to event bus: {}",
                        err
                    );
                    break;
                }
            }
        });
    }

    fn sync_cursor_style(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let style = match self.engine.state().mode {
            Mode::Insert => SetCursorStyle::SteadyBar,
            _ => SetCursorStyle::SteadyBlock,
        };
        execute!(terminal.backend_mut(), style)?;
        Ok(())
    }
}

async fn read_file_text(path: PathBuf) -> io::Result<String> {
    let file_bytes = compio::fs::read(path).await?;
    String::from_utf8(file_bytes).map_err(|err| io::Error::new(ErrorKind::InvalidData, err))
}
