/// Terminal front-end for the cube projector
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal,
};
use log::{debug, info};
use projector_core::{DepthOrderedRenderer, RenderConfig, Scene, Surface, Viewport};
use std::io::{self, stdout, Write};

pub mod canvas;
pub mod controls;
pub mod logging;

pub use canvas::Canvas;
pub use controls::{Action, AngleSlider, Controls};

/// Model-space radius the auto-fitted view must keep on screen: the cube's
/// half diagonal plus a little room for the vertex discs.
const FIT_RADIUS: f64 = 1.85;

/// Interactive terminal session: draws the scene whenever an input changes.
pub struct TerminalApp {
    scene: Scene,
    controls: Controls,
    config: RenderConfig,
    /// Fixed pixels per unit; `None` fits the cube to the terminal.
    scale: Option<f64>,
    canvas: Canvas,
    running: bool,
}

impl TerminalApp {
    pub fn new(
        scene: Scene,
        controls: Controls,
        config: RenderConfig,
        scale: Option<f64>,
    ) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        debug!("terminal is {}x{} cells", columns, rows);

        Ok(Self {
            scene,
            controls,
            config,
            scale,
            canvas: Canvas::for_terminal(columns, rows),
            running: true,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.render()?;

        while self.running {
            if self.handle_event(event::read()?) {
                self.render()?;
            }
        }

        info!(
            "leaving at pitch {}, yaw {}, roll {}",
            self.controls.pitch.degrees(),
            self.controls.yaw.degrees(),
            self.controls.roll.degrees()
        );
        Ok(())
    }

    /// Returns whether the picture needs redrawing.
    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match self.controls.handle_key(code, &mut self.config) {
                Action::Redraw => true,
                Action::Quit => {
                    self.running = false;
                    false
                }
                Action::Ignore => false,
            },
            Event::Resize(columns, rows) => {
                debug!("resized to {}x{} cells", columns, rows);
                self.canvas.resize(columns as usize, rows as usize * 2);
                true
            }
            _ => false,
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        let scale = self
            .scale
            .unwrap_or_else(|| Viewport::fit_scale(width, height, FIT_RADIUS));
        let config = self.config.with_scale(scale);

        DepthOrderedRenderer::with_config(&self.scene, config)
            .render(&self.controls.angles(), &mut self.canvas);

        let mut stdout = stdout();
        self.canvas.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "Projector | X {:>3}° Y {:>3}° Z {:>3}° | W/S A/D E/R rotate, 1/2/3 faces/edges/points, Q quit",
                self.controls.pitch.degrees(),
                self.controls.yaw.degrees(),
                self.controls.roll.degrees()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
