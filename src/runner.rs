use std::{
    sync::{
        mpsc::{self, Receiver, Sender, TryRecvError},
        Arc,
    },
    time::Duration,
};

use parking_lot::Mutex;

use crate::{
    chip8::{ChipSet, Frame},
    devices::{AudioCommands, DisplayCommands},
    error::ConfigError,
    quirks::CompatibilityMode,
    resources::Rom,
    timer::{TimedWorker, Worker},
};

/// The requests the host can send to a running chip, they are
/// applied at the start of the next tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetKey(usize, bool),
    SetHostKey(char, bool),
    SetRunning(bool),
    ToggleRunning,
    SetMode(CompatibilityMode),
    Load(Rom),
}

/// What the host can observe of a running chip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerStatus {
    /// The amount of ticks run so far.
    pub ticks: u64,
    pub running: bool,
    /// The summary of the last tick.
    pub last_frame: Option<Frame>,
    /// The last error that was reported by a command.
    pub last_error: Option<String>,
}

/// A cloneable handle to talk to the chip owned by the [`Runner`].
#[derive(Debug, Clone)]
pub struct RunnerHandle {
    sender: Sender<Command>,
    status: Arc<Mutex<RunnerStatus>>,
}

impl RunnerHandle {
    /// Will send the command, returns false if the runner is gone.
    pub fn send(&self, command: Command) -> bool {
        self.sender.send(command).is_ok()
    }

    pub fn set_key(&self, key: usize, pressed: bool) -> bool {
        self.send(Command::SetKey(key, pressed))
    }

    pub fn set_host_key(&self, code: char, pressed: bool) -> bool {
        self.send(Command::SetHostKey(code, pressed))
    }

    pub fn set_running(&self, running: bool) -> bool {
        self.send(Command::SetRunning(running))
    }

    pub fn toggle_running(&self) -> bool {
        self.send(Command::ToggleRunning)
    }

    pub fn load(&self, rom: Rom) -> bool {
        self.send(Command::Load(rom))
    }

    /// A snapshot of the current status.
    pub fn status(&self) -> RunnerStatus {
        self.status.lock().clone()
    }
}

/// Owns the chip and drives it on a worker thread at the configured tick rate.
pub struct Runner<W: TimedWorker = Worker> {
    worker: W,
    handle: RunnerHandle,
}

impl<W: TimedWorker> Runner<W> {
    /// Will move the chip onto the worker, the display and audio
    /// are called from the worker thread.
    ///
    /// Fails if the settings of the chip can not drive the scheduler.
    pub fn start<D, A>(
        mut chip: ChipSet,
        mut display: D,
        mut audio: A,
    ) -> Result<Self, ConfigError>
    where
        D: DisplayCommands + Send + 'static,
        A: AudioCommands + Send + 'static,
    {
        chip.get_settings().validate()?;

        let (sender, receiver) = mpsc::channel();
        let status = Arc::new(Mutex::new(RunnerStatus {
            running: chip.is_running(),
            ..RunnerStatus::default()
        }));
        let interval = Duration::from_secs(1) / chip.get_settings().ticks_per_second;

        let shared = status.clone();
        let inner_run = move || {
            let mut status = shared.lock();
            apply_commands(&mut chip, &receiver, &mut status);
            run_tick(&mut chip, &mut display, &mut audio, &mut status);
        };

        let mut worker = W::new();
        worker.start(inner_run, interval);
        log::info!("Started the runner with a tick every {:?}", interval);

        Ok(Self {
            worker,
            handle: RunnerHandle { sender, status },
        })
    }

    pub fn handle(&self) -> RunnerHandle {
        self.handle.clone()
    }

    pub fn is_alive(&self) -> bool {
        self.worker.is_alive()
    }

    /// Will stop the worker, the chip is dropped with it.
    pub fn stop(&mut self) {
        self.worker.stop();
    }
}

/// Will run the given amount of ticks on the current thread.
pub fn run_headless<D, A>(
    chip: &mut ChipSet,
    display: &mut D,
    audio: &mut A,
    ticks: u64,
) -> RunnerStatus
where
    D: DisplayCommands + ?Sized,
    A: AudioCommands + ?Sized,
{
    let mut status = RunnerStatus::default();
    for _ in 0..ticks {
        run_tick(chip, display, audio, &mut status);
    }
    status.running = chip.is_running();
    status
}

fn apply_commands(chip: &mut ChipSet, receiver: &Receiver<Command>, status: &mut RunnerStatus) {
    loop {
        let command = match receiver.try_recv() {
            Ok(command) => command,
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        };
        match command {
            Command::SetKey(key, pressed) => chip.set_key(key, pressed),
            Command::SetHostKey(code, pressed) => {
                if chip.set_host_key(code, pressed).is_none() {
                    log::debug!("No key is bound to '{}'", code);
                }
            }
            Command::SetRunning(running) => chip.set_running(running),
            Command::ToggleRunning => {
                chip.toggle_running();
            }
            Command::SetMode(mode) => chip.set_mode(mode),
            Command::Load(rom) => {
                if let Err(err) = chip.load_rom(&rom) {
                    log::error!("Unable to load '{}': {}", rom.get_name(), err);
                    status.last_error = Some(err.to_string());
                }
            }
        }
    }
    status.running = chip.is_running();
}

/// A single tick followed by the end of frame work.
fn run_tick<D, A>(chip: &mut ChipSet, display: &mut D, audio: &mut A, status: &mut RunnerStatus)
where
    D: DisplayCommands + ?Sized,
    A: AudioCommands + ?Sized,
{
    let frame = chip.tick(display);
    audio.sound(frame.sound);
    chip.acknowledge_frame();

    status.ticks += 1;
    status.last_frame = Some(frame);
}
