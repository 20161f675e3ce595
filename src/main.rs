use std::{env, error::Error, path::Path, process};

use chip::{
    chip8::ChipSet,
    devices::{self, Mute, NoDisplay},
    resources::{Rom, RomArchive},
    run_headless,
    settings::Settings,
};

/// The amount of ticks run if none are given, five seconds at 60 Hz.
const DEFAULT_TICKS: u64 = 300;

const USAGE: &str = "usage: chip8 <rom> [ticks]\n       chip8 <archive.zip> <rom name> [ticks]";

fn load(args: &[String]) -> Result<(Rom, Option<&String>), Box<dyn Error>> {
    let path = Path::new(&args[0]);
    let is_archive = path
        .extension()
        .map_or(false, |extension| extension.eq_ignore_ascii_case("zip"));

    if !is_archive {
        return Ok((Rom::from_file(path)?, args.get(1)));
    }

    let mut archive = RomArchive::open(path)?;
    match args.get(1) {
        Some(name) => Ok((archive.get_file_data(name)?, args.get(2))),
        None => {
            for name in archive.file_names() {
                println!("{}", name);
            }
            process::exit(0);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{}", USAGE);
        process::exit(2);
    }

    let settings = Settings::from_env()?;
    let (rom, ticks) = load(&args)?;
    let ticks = match ticks {
        Some(ticks) => ticks.parse()?,
        None => DEFAULT_TICKS,
    };

    log::info!("Running '{}' for {} ticks in {} mode", rom.get_name(), ticks, settings.mode);
    let mut chip = ChipSet::with_rom(settings, &rom)?;
    let status = run_headless(&mut chip, &mut NoDisplay, &mut Mute, ticks);

    if let Some(fault) = status.last_frame.and_then(|frame| frame.fault) {
        log::warn!("The last tick stopped early: {}", fault);
    }
    print!("{}", devices::render_text(chip.get_display()));
    Ok(())
}
