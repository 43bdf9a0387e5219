/// Terminal host for the rotating wireframe cube
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::{debug, info};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wirecube_core::{
    apply_commands, Axis, FrameScheduler, RenderLoop, Settings, SettingsUpdate, TickOutcome,
};

pub mod config;
pub mod renderer;

pub use config::TerminalConfig;
pub use renderer::TerminalSurface;

use config::{format_axes, DISTANCE_STEP, SIZE_STEP};

/// Sleeps out the remainder of each frame to hold a target frame rate
pub struct FramePacer {
    target_frame_time: Duration,
    frame_start: Instant,
}

impl FramePacer {
    pub fn new(target_frame_time: Duration) -> Self {
        Self {
            target_frame_time,
            frame_start: Instant::now(),
        }
    }
}

impl FrameScheduler for FramePacer {
    fn next_frame(&mut self) -> bool {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.target_frame_time {
            std::thread::sleep(self.target_frame_time - elapsed);
        }
        self.frame_start = Instant::now();
        true
    }
}

/// What the keyboard is currently driving
#[derive(Debug, Clone, PartialEq, Eq)]
enum InputMode {
    Keys,
    Command(String),
}

/// Main application struct for terminal cube rendering
pub struct TerminalApp {
    render_loop: RenderLoop<TerminalSurface>,
    pacer: FramePacer,
    input: InputMode,
    status: Option<String>,
    show_hud: bool,
    last_fps_sample: Instant,
    frames_since_sample: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(settings: Settings, config: TerminalConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(settings, config, width as usize, height as usize))
    }

    /// Build the app for a fixed grid size without querying the terminal
    pub fn with_size(settings: Settings, config: TerminalConfig, width: usize, height: usize) -> Self {
        let surface = TerminalSurface::new(width, height, config.density);

        Self {
            render_loop: RenderLoop::new(surface, settings),
            pacer: FramePacer::new(config.frame_time()),
            input: InputMode::Keys,
            status: None,
            show_hud: config.hud,
            last_fps_sample: Instant::now(),
            frames_since_sample: 0,
            fps: 0.0,
        }
    }

    pub fn settings(&self) -> &Settings {
        self.render_loop.settings()
    }

    pub fn render_loop(&self) -> &RenderLoop<TerminalSurface> {
        &self.render_loop
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        info!("drew {} frames", self.render_loop.frames());
        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        loop {
            // Handle input
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            if self.render_loop.tick() == TickOutcome::Stopped {
                return Ok(());
            }
            self.render()?;
            self.sample_fps();

            if !self.pacer.next_frame() {
                self.render_loop.stop();
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Resize(width, height) => {
                debug!("terminal resized to {}x{}", width, height);
                self.render_loop
                    .surface_mut()
                    .resize(width as usize, height as usize);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let InputMode::Command(line) = &mut self.input {
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.input = InputMode::Keys;
                    self.render_loop.stop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => line.push(c),
                KeyCode::Backspace => {
                    line.pop();
                }
                KeyCode::Esc => self.input = InputMode::Keys,
                KeyCode::Enter => {
                    let line = std::mem::take(line);
                    self.input = InputMode::Keys;
                    self.run_command(&line);
                }
                _ => {}
            }
            return;
        }

        let update = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.render_loop.stop();
                return;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.render_loop.stop();
                return;
            }
            KeyCode::Char(':') => {
                self.input = InputMode::Command(String::new());
                self.status = None;
                return;
            }
            KeyCode::Char('h') => {
                self.show_hud = !self.show_hud;
                return;
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                SettingsUpdate::NudgeSize(SIZE_STEP)
            }
            KeyCode::Char('-') | KeyCode::Down => SettingsUpdate::NudgeSize(-SIZE_STEP),
            KeyCode::Char(']') | KeyCode::Right => SettingsUpdate::NudgeDistance(DISTANCE_STEP),
            KeyCode::Char('[') | KeyCode::Left => SettingsUpdate::NudgeDistance(-DISTANCE_STEP),
            KeyCode::Char('x') => SettingsUpdate::ToggleRotation(Axis::X),
            KeyCode::Char('y') => SettingsUpdate::ToggleRotation(Axis::Y),
            KeyCode::Char('z') => SettingsUpdate::ToggleRotation(Axis::Z),
            KeyCode::Char('o') | KeyCode::Char('p') => SettingsUpdate::ToggleProjection,
            _ => return,
        };

        if let Err(e) = self.render_loop.update(update) {
            debug!("rejected {:?}: {}", update, e);
            self.status = Some(e.to_string());
        }
    }

    fn run_command(&mut self, line: &str) {
        match apply_commands(self.render_loop.settings_mut(), line) {
            Ok(count) => {
                debug!("applied {} command(s) from {:?}", count, line);
                self.status = Some(format!("ok: {}", line.trim()));
            }
            Err(e) => {
                debug!("command {:?} failed: {}", line, e);
                self.status = Some(format!("error: {}", e));
            }
        }
    }

    fn sample_fps(&mut self) {
        self.frames_since_sample += 1;
        let now = Instant::now();
        let elapsed = now - self.last_fps_sample;
        if elapsed.as_secs() >= 1 {
            self.fps = self.frames_since_sample as f32 / elapsed.as_secs_f32();
            self.frames_since_sample = 0;
            self.last_fps_sample = now;
        }
    }

    fn status_line(&self) -> String {
        let settings = self.render_loop.settings();
        format!(
            "Wirecube | FPS: {:.1} | size {:.0} | distance {:.1} | axes {} | {} | \
             +/- size  [/] distance  x/y/z axes  o projection  : command  q quit",
            self.fps,
            settings.size(),
            settings.distance(),
            format_axes(settings.rotation()),
            settings.projection().name(),
        )
    }

    fn render(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        let surface = self.render_loop.surface();
        surface.draw(&mut stdout)?;

        let width = surface.width();
        let bottom = surface.height().saturating_sub(1) as u16;

        // Draw UI overlay
        if self.show_hud {
            let line: String = self.status_line().chars().take(width).collect();
            queue!(
                stdout,
                cursor::MoveTo(0, 0),
                SetForegroundColor(Color::Yellow),
                Print(line),
                ResetColor
            )?;
        }

        let footer = match (&self.input, &self.status) {
            (InputMode::Command(line), _) => Some((Color::White, format!(":{}", line))),
            (InputMode::Keys, Some(status)) => Some((Color::DarkGrey, status.clone())),
            (InputMode::Keys, None) => None,
        };
        if let Some((color, text)) = footer {
            let text: String = text.chars().take(width).collect();
            queue!(
                stdout,
                cursor::MoveTo(0, bottom),
                terminal::Clear(ClearType::CurrentLine),
                SetForegroundColor(color),
                Print(text),
                ResetColor
            )?;
        }

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirecube_core::{LoopState, ProjectionMode, RotationAxes};

    fn app() -> TerminalApp {
        TerminalApp::with_size(Settings::default(), TerminalConfig::default(), 80, 24)
    }

    fn press(app: &mut TerminalApp, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_command(app: &mut TerminalApp, text: &str) {
        press(app, KeyCode::Char(':'));
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_keys_update_settings() {
        let mut app = app();
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Char('y'));
        press(&mut app, KeyCode::Char('o'));

        let settings = app.settings();
        assert_eq!(settings.size(), 110.0);
        assert!((settings.distance() - 2.1).abs() < 1e-6);
        assert_eq!(
            settings.rotation(),
            RotationAxes {
                x: true,
                y: false,
                z: true
            }
        );
        assert_eq!(settings.projection(), ProjectionMode::Orthographic);
    }

    #[test]
    fn test_command_prompt() {
        let mut app = app();
        type_command(&mut app, "size 42; z off");
        assert_eq!(app.settings().size(), 42.0);
        assert!(!app.settings().rotation().z);
        assert_eq!(app.status.as_deref(), Some("ok: size 42; z off"));

        // Keys typed at the prompt are not shortcuts
        press(&mut app, KeyCode::Char(':'));
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input, InputMode::Keys);
        assert_eq!(app.render_loop.tick(), TickOutcome::Continue);
    }

    #[test]
    fn test_bad_command_reports_error() {
        let mut app = app();
        type_command(&mut app, "size huge");
        assert_eq!(app.settings(), &Settings::default());
        assert!(app.status.as_deref().unwrap_or("").starts_with("error:"));
    }

    #[test]
    fn test_ctrl_c_quits_from_command_prompt() {
        let mut app = app();
        press(&mut app, KeyCode::Char(':'));
        press(&mut app, KeyCode::Char('s'));
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));

        assert_eq!(app.input, InputMode::Keys);
        assert_eq!(app.render_loop.tick(), TickOutcome::Stopped);
    }

    #[test]
    fn test_control_chars_not_typed_into_prompt() {
        let mut app = app();
        press(&mut app, KeyCode::Char(':'));
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('w'),
            KeyModifiers::CONTROL,
        )));
        assert_eq!(app.input, InputMode::Command(String::new()));
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut app = app();
        assert_eq!(app.render_loop.tick(), TickOutcome::Continue);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.render_loop.tick(), TickOutcome::Stopped);
        assert_eq!(app.render_loop().state(), LoopState::Stopped);
    }

    #[test]
    fn test_resize_event() {
        let mut app = app();
        app.handle_event(Event::Resize(100, 30));
        assert_eq!(app.render_loop().surface().width(), 100);
        assert_eq!(app.render_loop().surface().height(), 30);
    }

    #[test]
    fn test_status_line_reflects_settings() {
        let mut app = app();
        press(&mut app, KeyCode::Char('x'));
        let line = app.status_line();
        assert!(line.contains("size 100"));
        assert!(line.contains("axes yz"));
        assert!(line.contains("perspective"));
    }

    #[test]
    fn test_frame_pacer_holds_frame_time() {
        let mut pacer = FramePacer::new(Duration::from_millis(5));
        let start = Instant::now();
        assert!(pacer.next_frame());
        assert!(start.elapsed() >= Duration::from_millis(4));
    }
}
