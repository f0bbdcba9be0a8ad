use std::io::stdout;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
};
use log::{info, warn};
use platonic_config::Config;
use platonic_core::{Element, SceneState, palette};
use platonic_scene::{Scene, SceneView};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::Line,
};

mod logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init();
    let config = load_config();
    let mouse = config.mouse;

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    if mouse && let Err(err) = execute!(stdout(), DisableMouseCapture) {
        warn!("could not release mouse capture: {err}");
    }
    ratatui::restore();
    result
}

/// Load the config, writing a starter file on first run.
fn load_config() -> Config {
    let config = Config::load();
    if let Ok(path) = Config::default_path()
        && !path.exists()
    {
        match config.save_to(&path) {
            Ok(()) => info!("wrote starter config to {}", path.display()),
            Err(err) => warn!("could not write starter config: {err}"),
        }
    }
    config
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Hover and finale state.
    state: SceneState,
    /// Everything that moves.
    scene: Scene,
    config: Config,
    /// Show the key help line.
    show_help: bool,
    /// Shape currently under the mouse pointer.
    pointer_over: Option<Element>,
    /// Area the scene was last drawn into, for hit testing.
    viewport: Rect,
    /// Start of the animation clock.
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        // Capture system time as seed for the snow layout
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let scene = Scene::new(config.tuning.clone(), config.particle_count, seed)
            .with_speed(config.speed);

        Self {
            running: false,
            state: SceneState::new(),
            scene,
            show_help: config.show_help,
            config,
            pointer_over: None,
            viewport: Rect::default(),
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        if self.config.mouse {
            execute!(stdout(), EnableMouseCapture)?;
        }
        info!("starting at {} fps, speed {}", self.config.fps, self.scene.speed());

        self.running = true;
        while self.running {
            let elapsed_ms = self.started.elapsed().as_millis() as u64;
            self.scene.advance(&self.state, elapsed_ms);
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.viewport = area;

        let commands = self.scene.render(&self.state, self.scene.time());
        frame.render_widget(SceneView::new(&commands, self.scene.camera()), area);

        if !self.show_help || self.state.is_finale() {
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Scene
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let color = palette::GOLD.to_color();
        let help = Line::from(vec![
            "1-5".bold().fg(color),
            " hover  ".dark_gray(),
            "0".bold().fg(color),
            " leave  ".dark_gray(),
            "s".bold().fg(color),
            format!(" speed: {}  ", self.scene.speed()).dark_gray(),
            "h".bold().fg(color),
            " hide help  ".dark_gray(),
            "q".bold().fg(color),
            " quit".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with the frame interval as timeout so the animation keeps running.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.config.frame_interval())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('0') | KeyCode::Char(' ')) => self.leave(),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            (_, KeyCode::Char('h')) => self.show_help = !self.show_help,
            (_, KeyCode::Char(c)) => {
                if let Some(element) = Element::from_shortcut(c) {
                    self.state.on_hover(element);
                }
            }
            _ => {}
        }
    }

    /// Handles pointer movement and clicks over the shapes.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer_moved(mouse.column, mouse.row)
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(element) =
                    self.scene
                        .pick(&self.state, self.viewport, mouse.column, mouse.row)
                {
                    self.state.on_hover(element);
                    self.pointer_over = Some(element);
                }
            }
            _ => {}
        }
    }

    /// Turn pointer motion into hover-enter and hover-leave events.
    fn pointer_moved(&mut self, column: u16, row: u16) {
        let hit = self.scene.pick(&self.state, self.viewport, column, row);
        if hit == self.pointer_over {
            return;
        }
        if self.pointer_over.is_some() {
            self.state.on_hover_leave();
        }
        if let Some(element) = hit {
            self.state.on_hover(element);
        }
        self.pointer_over = hit;
    }

    /// Clear the hover from the keyboard.
    fn leave(&mut self) {
        self.state.on_hover_leave();
        self.pointer_over = None;
    }

    /// Cycle through the animation speeds.
    fn cycle_speed(&mut self) {
        let speed = self.scene.speed().next();
        self.scene.set_speed(speed);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platonic_core::AnimationSpeed;

    fn app() -> App {
        let config = Config {
            particle_count: 50,
            ..Default::default()
        };
        let mut app = App::new(config);
        app.viewport = Rect::new(0, 0, 120, 40);
        app
    }

    fn cell_of(app: &App, element: Element) -> (u16, u16) {
        let shape = app.scene.shape(element).unwrap();
        let p = app
            .scene
            .camera()
            .project(shape.transform.position, app.viewport)
            .unwrap();
        (p.col as u16, p.row as u16)
    }

    fn press(app: &mut App, c: char) {
        app.on_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }

    #[test]
    fn test_pointer_enter_and_leave() {
        let mut app = app();
        let (col, row) = cell_of(&app, Element::Water);

        app.pointer_moved(col, row);
        assert_eq!(app.state.active_element(), Element::Water);

        app.pointer_moved(60, 1);
        assert_eq!(app.state.active_element(), Element::None);
        assert!(!app.state.is_finale());
    }

    #[test]
    fn test_pointer_moves_between_shapes() {
        let mut app = app();
        let (col, row) = cell_of(&app, Element::Fire);
        app.pointer_moved(col, row);
        let (col, row) = cell_of(&app, Element::Air);
        app.pointer_moved(col, row);
        assert_eq!(app.state.active_element(), Element::Air);
    }

    #[test]
    fn test_hovering_ether_starts_finale() {
        let mut app = app();
        let (col, row) = cell_of(&app, Element::Ether);
        app.pointer_moved(col, row);
        assert!(app.state.is_finale());

        app.pointer_moved(60, 1);
        assert_eq!(app.state.active_element(), Element::Ether);
        assert!(app.state.is_finale());
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let mut app = app();
        press(&mut app, '4');
        assert_eq!(app.state.active_element(), Element::Fire);
        press(&mut app, '0');
        assert_eq!(app.state.active_element(), Element::None);
        press(&mut app, '3');
        assert!(app.state.is_finale());
    }

    #[test]
    fn test_speed_and_help_toggles() {
        let mut app = app();
        assert_eq!(app.scene.speed(), AnimationSpeed::Medium);
        press(&mut app, 's');
        assert_eq!(app.scene.speed(), AnimationSpeed::Fast);
        assert!(app.show_help);
        press(&mut app, 'h');
        assert!(!app.show_help);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.running = true;
        press(&mut app, 'q');
        assert!(!app.running);

        app.running = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
