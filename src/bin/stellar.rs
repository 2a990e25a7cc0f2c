use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use stellar_stories::{
    AudioBackend as _, BookConfig, CoverPose, DryRunBackend, FlapPose, FlipEvent, FlipPulse,
    Millis, NarrativeFrame, NarrativeSession, PageSpread, Starfield, Story, builtin_story,
    builtin_story_json, render_starfield, voice_path,
};

/// Virtual frame interval for starfield simulation.
const FRAME_MS: u64 = 16;

#[derive(Parser, Debug)]
#[command(name = "stellar", version)]
struct Cli {
    /// Log to stderr (`-v` debug, `-vv` trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the narrative frame for one scroll position as JSON.
    Frame(FrameArgs),
    /// Simulate a scroll sweep on a virtual clock, one JSON line per step.
    Sweep(SweepArgs),
    /// Load and validate a story file.
    Validate(ValidateArgs),
    /// Report which music and narration files exist under an asset root.
    AudioCheck(AudioCheckArgs),
    /// Simulate the starfield and write it as a PNG.
    Starfield(StarfieldArgs),
    /// Print the built-in story as JSON.
    DumpStory,
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Story JSON (defaults to the built-in story).
    #[arg(long)]
    story: Option<PathBuf>,

    /// Book config JSON (defaults apply to missing fields).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scroll fraction in [0, 1]; out-of-range values are clamped.
    #[arg(long, allow_negative_numbers = true)]
    scroll: f64,

    /// Host clock at the scroll event, in milliseconds.
    #[arg(long, default_value_t = 0)]
    at: u64,

    /// Let any flip triggered by the scroll finish before reporting.
    #[arg(long)]
    settle: bool,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Number of steps from top to bottom.
    #[arg(long, default_value_t = 100)]
    steps: u32,

    /// Virtual time between steps.
    #[arg(long, default_value_t = 250)]
    step_ms: u64,

    /// Sweep from the bottom back to the top.
    #[arg(long)]
    reverse: bool,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Story JSON to check.
    #[arg(long)]
    story: PathBuf,
}

#[derive(Parser, Debug)]
struct AudioCheckArgs {
    /// Asset root containing `sounds/`.
    #[arg(long)]
    root: PathBuf,

    /// List every missing narration file.
    #[arg(long)]
    list_missing: bool,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Parser, Debug)]
struct StarfieldArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Seed override; by default the layout derives from the story title.
    #[arg(long)]
    seed: Option<u64>,

    /// Frames to simulate before rendering.
    #[arg(long, default_value_t = 0)]
    frames: u64,

    /// Frame at which a flip pulse hits the field.
    #[arg(long)]
    pulse_at: Option<u64>,

    #[command(flatten)]
    source: SourceArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Validate(args) => cmd_validate(args),
        Command::AudioCheck(args) => cmd_audio_check(args),
        Command::Starfield(args) => cmd_starfield(args),
        Command::DumpStory => cmd_dump_story(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_story(path: Option<&Path>) -> anyhow::Result<Story> {
    match path {
        Some(p) => Ok(Story::from_path(p)?),
        None => Ok(builtin_story().context("load built-in story")?),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BookConfig> {
    match path {
        Some(p) => Ok(BookConfig::from_path(p)?),
        None => Ok(BookConfig::default()),
    }
}

fn open_session(source: &SourceArgs) -> anyhow::Result<NarrativeSession> {
    let story = load_story(source.story.as_deref())?;
    let config = load_config(source.config.as_deref())?;
    Ok(NarrativeSession::new(story, config)?)
}

#[derive(serde::Serialize)]
struct FrameReport<'a> {
    #[serde(flatten)]
    frame: NarrativeFrame,
    events: &'a [FlipEvent],
    cover: CoverPose,
    #[serde(skip_serializing_if = "Option::is_none")]
    flap: Option<FlapPose>,
    pages: PageSpread,
}

impl<'a> FrameReport<'a> {
    fn new(session: &NarrativeSession, frame: NarrativeFrame, events: &'a [FlipEvent]) -> Self {
        Self {
            frame,
            events,
            cover: CoverPose::from_open_progress(frame.book_open_progress),
            flap: FlapPose::from_state(&frame.flip, &session.config().book),
            pages: PageSpread::resolve(session.story(), &frame),
        }
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.source)?;
    let at = Millis(args.at);
    let mut update = session.on_scroll_fraction(args.scroll, at);
    if args.settle {
        let later = session.tick(at.after(session.config().flip.end_ms));
        update.events.extend(later.events);
        update.frame = later.frame;
    }
    let report = FrameReport::new(&session, update.frame, &update.events);
    let s = serde_json::to_string_pretty(&report).context("serialize frame")?;
    println!("{s}");
    Ok(())
}

#[derive(serde::Serialize)]
struct SweepLine<'a> {
    step: u32,
    #[serde(flatten)]
    frame: NarrativeFrame,
    events: &'a [FlipEvent],
    pulses: Vec<FlipPulse>,
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.steps > 0, "--steps must be at least 1");
    let mut session = open_session(&args.source)?;

    let pulses = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&pulses);
    session.subscribe_pulses(move |p| sink.borrow_mut().push(*p));

    let emit = |step: u32, frame: NarrativeFrame, events: &[FlipEvent]| {
        let line = SweepLine {
            step,
            frame,
            events,
            pulses: pulses.borrow_mut().drain(..).collect(),
        };
        serde_json::to_string(&line).context("serialize sweep step")
    };

    let at = |step: u32| Millis(u64::from(step).saturating_mul(args.step_ms));
    for step in 0..=args.steps {
        let mut fraction = f64::from(step) / f64::from(args.steps);
        if args.reverse {
            fraction = 1.0 - fraction;
        }
        let update = session.on_scroll_fraction(fraction, at(step));
        println!("{}", emit(step, update.frame, &update.events)?);
    }

    // Let the last flip land.
    let tail = session.tick(at(args.steps).after(session.config().flip.end_ms));
    if !tail.events.is_empty() {
        println!("{}", emit(args.steps + 1, tail.frame, &tail.events)?);
    }
    session.teardown();
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let story = Story::from_path(&args.story)?;
    let lines: usize = story.scenes.iter().map(|s| s.lines.len()).sum();
    println!(
        "{}: {} scenes, {} lines, {} cast members",
        story.title,
        story.len(),
        lines,
        story.cast.len()
    );
    if story.is_empty() {
        eprintln!("warning: story has no scenes");
    }
    Ok(())
}

fn cmd_audio_check(args: AudioCheckArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.root.is_dir(),
        "asset root '{}' is not a directory",
        args.root.display()
    );
    let story = load_story(args.source.story.as_deref())?;
    let config = load_config(args.source.config.as_deref())?;
    let backend = DryRunBackend::new(&args.root);

    let music = &config.audio.music_path;
    let music_state = if backend.probe(music) {
        "present"
    } else {
        "missing"
    };
    println!("music: {music_state} ({music})");

    let mut total = 0usize;
    let mut missing = Vec::new();
    for scene in &story.scenes {
        for index in 0..scene.lines.len() {
            total += 1;
            let path = voice_path(&config.audio.voice_dir, scene.id, index);
            if !backend.probe(&path) {
                missing.push(path);
            }
        }
    }
    println!("voices: {}/{} present", total - missing.len(), total);
    if args.list_missing {
        for path in &missing {
            println!("missing: {path}");
        }
    }
    Ok(())
}

fn cmd_starfield(args: StarfieldArgs) -> anyhow::Result<()> {
    let story = load_story(args.source.story.as_deref())?;
    let config = load_config(args.source.config.as_deref())?;
    let (w, h) = (f64::from(args.width), f64::from(args.height));

    let mut field = match args.seed {
        Some(seed) => Starfield::new(
            w,
            h,
            stellar_stories::StarfieldOpts {
                seed,
                ..config.starfield
            },
        ),
        None => Starfield::for_story(&story.title, w, h, config.starfield),
    };

    for frame in 0..args.frames {
        if args.pulse_at == Some(frame) {
            field.on_pulse(&FlipPulse {
                from_scene: 0,
                to_scene: 1,
                direction: stellar_stories::FlipDirection::Forward,
                at: Millis(frame * FRAME_MS),
            });
        }
        field.step();
    }
    let now = Millis(args.frames * FRAME_MS);
    let img = render_starfield(&field, now);

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_dump_story() -> anyhow::Result<()> {
    print!("{}", builtin_story_json());
    Ok(())
}
