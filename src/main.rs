//! VoiceLink main entry point
//!
//! A line-oriented console front end over the session state: compose a
//! message from the symbol catalog, speak it, manage voices and settings,
//! and run live conversation mode. Type `help` for the command list.

use anyhow::Context;
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::process;
use voicelink::catalog::{self, Category};
use voicelink::scenario;
use voicelink::speech::pipeline::SpeakOutcome;
use voicelink::speech::selector::VoiceBackend;
use voicelink::state::Session;
use voicelink::storage::LocalStore;

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to voicelink.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("voicelink.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to open voicelink.log for debug logging: {}",
                    e
                );
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "VoiceLink version {} starting (debug mode, logging to voicelink.log)",
            voicelink::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    if let Err(e) = run() {
        error!("Fatal error: {}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let store = LocalStore::open().context("opening local data store")?;
    info!("Data store at {:?}", store.path());
    let mut session = Session::new(store);

    println!("VoiceLink {} - type 'help' for commands", voicelink::VERSION);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            continue;
        };

        if command == "quit" || command == "exit" {
            break;
        }
        if let Err(e) = dispatch(&mut session, command, args) {
            println!("error: {}", e);
        }
        for notice in session.notifier.take() {
            println!("* {}", notice);
        }
    }

    session.pipeline.cancel();
    Ok(())
}

fn dispatch(session: &mut Session, command: &str, args: &[&str]) -> voicelink::Result<()> {
    match command {
        "help" => print_help(),
        "cats" => {
            for category in Category::ALL {
                println!(
                    "{} ({} symbols)",
                    category,
                    catalog::symbols_for(category).len()
                );
            }
        }
        "cat" => {
            let category: Category = arg(args, 0, "category")?.parse()?;
            session.current_category = category;
            println!("Category: {}", category);
        }
        "ls" => {
            for symbol in catalog::symbols_for(session.current_category) {
                println!("{} {} [{}]", symbol.pictogram, symbol.label, symbol.id);
            }
        }
        "find" => {
            let query = args.join(" ");
            for symbol in catalog::search(&query) {
                println!(
                    "{} {} [{}] ({})",
                    symbol.pictogram, symbol.label, symbol.id, symbol.category
                );
            }
        }
        "add" => {
            let id = arg(args, 0, "symbol id")?;
            let symbol = session.add_symbol(session.current_category, id)?;
            println!("+ {} {}", symbol.pictogram, symbol.label);
        }
        "show" => {
            if session.buffer.is_empty() {
                println!("(empty message)");
            } else {
                println!("{}", session.buffer.render_text());
            }
        }
        "speak" => {
            let outcome = session.speak_message();
            println!("{}", describe_outcome(outcome));
        }
        "stop" => session.pipeline.cancel(),
        "clear" => session.clear_message(),
        "save" => session.save_phrase()?,
        "phrases" => {
            for phrase in session.saved_phrases() {
                println!("{}  ({})", phrase.text, phrase.timestamp.format("%Y-%m-%d"));
            }
        }
        "share" => session.share_message()?,
        "history" => {
            for entry in session.history.recent(10) {
                println!("{}  ({})", entry.text, entry.timestamp.format("%H:%M"));
            }
        }
        "patterns" => {
            for (label, count) in session.patterns.top(10) {
                println!("{:>4}  {}", count, label);
            }
        }
        "voice" => {
            let backend: VoiceBackend = arg(args, 0, "backend")?.parse()?;
            session.select_voice(backend)?;
        }
        "voices" => {
            println!("system:");
            for voice in session.pipeline.system_voices() {
                println!("  {} [{}]", voice.name, voice.id);
            }
            if !session.remote.voices().is_empty() {
                println!("remote:");
                for voice in session.remote.voices() {
                    println!("  {} [{}] - {}", voice.name, voice.id, voice.description);
                }
            }
        }
        "sysvoice" => session.select_system_voice(arg(args, 0, "voice id")?)?,
        "remvoice" => session.select_remote_voice(arg(args, 0, "voice id")?)?,
        "rate" => {
            let rate: f32 = parse_number(arg(args, 0, "rate")?)?;
            session.set_rate(rate)?;
            println!("rate = {}", session.voice.speech_rate);
        }
        "pitch" => {
            let pitch: f32 = parse_number(arg(args, 0, "pitch")?)?;
            session.set_pitch(pitch)?;
            println!("pitch = {}", session.voice.voice_pitch);
        }
        "apikey" => match args.first().copied() {
            Some("clear") | None => session.set_api_key(None)?,
            Some(key) => session.set_api_key(Some(key))?,
        },
        "test" => {
            let status = session.test_connection()?;
            println!("{}", status);
        }
        "upload" => {
            let path = std::path::Path::new(arg(args, 0, "clip path")?);
            session.upload_custom_voice(path)?;
        }
        "emotion" => match args.first().copied() {
            Some("clear") | None => session.select_emotion(None),
            Some(name) => session.select_emotion(Some(name)),
        },
        "toggle" => {
            session.toggle_setting(arg(args, 0, "setting name")?)?;
        }
        "grid" => session.set_grid_size(arg(args, 0, "size")?.parse()?)?,
        "touch" => session.set_touch_target_size(arg(args, 0, "size")?.parse()?)?,
        "settings" => print_settings(session),
        "live" => {
            session.toggle_live_mode()?;
        }
        "record" => {
            session.toggle_recording()?;
        }
        "scenario" => match args.first().copied() {
            Some(key) => {
                let scenario = session.select_scenario(key)?;
                println!("{} {} - {}", scenario.icon, scenario.name, scenario.context);
                for suggestion in scenario.suggestions {
                    println!("  - {}", suggestion);
                }
            }
            None => {
                for scenario in scenario::all() {
                    println!("{} {} [{}]", scenario.icon, scenario.name, scenario.key);
                }
            }
        },
        "transcript" => println!("{}", session.transcript()),
        "wipe" => session.clear_all_data()?,
        other => println!("unknown command: {} (try 'help')", other),
    }
    Ok(())
}

fn arg<'a>(args: &[&'a str], index: usize, what: &str) -> voicelink::Result<&'a str> {
    args.get(index)
        .copied()
        .ok_or_else(|| voicelink::VoicelinkError::Config(format!("missing {}", what)))
}

fn parse_number(s: &str) -> voicelink::Result<f32> {
    s.parse()
        .map_err(|_| voicelink::VoicelinkError::Config(format!("not a number: {}", s)))
}

fn describe_outcome(outcome: SpeakOutcome) -> &'static str {
    match outcome {
        SpeakOutcome::Empty => "(nothing to speak)",
        SpeakOutcome::Remote => "spoken (remote voice)",
        SpeakOutcome::Custom => "spoken (custom voice)",
        SpeakOutcome::System => "spoken (system voice)",
        SpeakOutcome::Failed => "(speech failed)",
        SpeakOutcome::Unsupported => "(speech unavailable)",
    }
}

fn print_settings(session: &Session) {
    let s = &session.settings;
    println!(
        "grid: {:?} ({} columns)",
        s.grid_size,
        s.grid_size.columns()
    );
    println!(
        "touch targets: {:?} ({}px)",
        s.touch_target_size,
        s.touch_target_size.min_height_px()
    );
    println!("symbol labels: {}", s.show_symbol_labels);
    println!("audio feedback: {}", s.audio_feedback);
    println!("conversation history: {}", s.conversation_history);
    println!("usage analytics: {}", s.usage_analytics);
    println!("auto-save: {}", s.auto_save);
    println!("smart predictions: {}", s.smart_predictions);
    println!("learning mode: {}", s.learning_mode);
    println!(
        "accessibility: contrast={} largetext={} motion={}",
        s.accessibility.high_contrast, s.accessibility.large_text, s.accessibility.reduced_motion
    );
    println!("voice: {}", session.voice.selected_voice);
    println!(
        "rate: {}  pitch: {}",
        session.voice.speech_rate, session.voice.voice_pitch
    );
}

fn print_help() {
    println!("message:   cats | cat <name> | ls | find <text> | add <id> | show");
    println!("           speak | stop | clear | save | phrases | share");
    println!("voice:     voice <system|elevenlabs|custom> | voices | sysvoice <id>");
    println!("           remvoice <id> | rate <n> | pitch <n> | upload <path>");
    println!("remote:    apikey [key|clear] | test");
    println!("history:   history | patterns");
    println!("settings:  settings | toggle <name> | grid <size> | touch <size>");
    println!("           emotion [name|clear] | wipe");
    println!("live:      live | record | scenario [key] | transcript");
    println!("           quit");
}
