//! Discrete commands fed into the frame loop.

/// Something the user asked the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Tear down the current world and load scene N
    SwitchScene(usize),
    /// Stop after the current frame
    Quit,
}

/// Supplies the commands to apply after each frame.
pub trait InputSource {
    /// Commands issued after frame `frame` (counted from zero since the run began).
    fn poll(&mut self, frame: u64) -> Vec<Command>;
}

/// Replays a fixed list of commands, optionally quitting after a frame budget.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: Vec<(u64, Command)>,
    frame_budget: Option<u64>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quit once `frames` frames have been rendered.
    pub fn with_frame_budget(mut self, frames: u64) -> Self {
        self.frame_budget = Some(frames);
        self
    }

    /// Issue `command` after frame `frame`.
    pub fn with_command(mut self, frame: u64, command: Command) -> Self {
        self.events.push((frame, command));
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, frame: u64) -> Vec<Command> {
        let mut commands: Vec<Command> = self
            .events
            .iter()
            .filter(|(at, _)| *at == frame)
            .map(|(_, command)| *command)
            .collect();

        if self.frame_budget.is_some_and(|budget| frame + 1 >= budget) {
            commands.push(Command::Quit);
        }
        commands
    }
}
