//! voxbeacon CLI — headless beacon operation and CW WAV export.
//!
//! Usage:
//!   voxbeacon tone [--freq 700] [--amp 0.8] [--burst 5] [--pause 10]
//!   voxbeacon cw "CQ CQ DE W1AW" [--wpm 20] [--freq 700] [--pause 10]
//!   voxbeacon cw "CQ CQ DE W1AW" --wav ident.wav
//!   voxbeacon message path/to/clip.wav [--pause 30]

use std::io::Write;
use std::time::Instant;
use std::{env, fs};
use vb_core::CadencePhase;
use vb_master::{render_morse_to_wav, BeaconController, BeaconMode, TICK_INTERVAL};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mode = args.get(1).cloned().unwrap_or_else(|| usage());

    let freq = flag_value(&args, "--freq").unwrap_or(700.0);
    let amp = flag_value(&args, "--amp").unwrap_or(0.8);
    let wpm = flag_value(&args, "--wpm").unwrap_or(20.0) as u8;
    let pause = flag_value(&args, "--pause").unwrap_or(10.0);
    let burst = flag_value(&args, "--burst").unwrap_or(5.0);
    let continuous = args.iter().any(|a| a == "--continuous");

    let mut beacon = BeaconController::new();
    beacon.set_frequency_hz(freq);
    beacon.set_amplitude(amp);
    beacon.set_wpm(wpm);
    beacon.set_pause_secs(pause);
    beacon.set_burst_secs(burst);
    beacon.set_continuous(continuous);

    match mode.as_str() {
        "tone" => {
            beacon.set_mode(BeaconMode::Tone);
        }
        "cw" => {
            let text = args.get(2).cloned().unwrap_or_else(|| usage());
            if let Some(out) = flag_string(&args, "--wav") {
                export_wav(&text, wpm, freq, amp, &out);
                return;
            }
            beacon.set_morse_text(&text);
            beacon.set_mode(BeaconMode::Morse);
        }
        "message" => {
            let path = args.get(2).cloned().unwrap_or_else(|| usage());
            let id = beacon.register_recording(&path).unwrap_or_else(|e| {
                eprintln!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            });
            beacon.set_mode(BeaconMode::Message(id));
        }
        _ => usage(),
    };

    beacon.start().unwrap_or_else(|e| {
        eprintln!("Failed to start beacon: {}", e);
        std::process::exit(1);
    });
    println!("Beacon running ({} mode). Ctrl-C to stop.", mode);

    run(&mut beacon);
}

fn run(beacon: &mut BeaconController) {
    while beacon.is_running() {
        let now = Instant::now();
        beacon.poll(now);

        if let Some(err) = beacon.take_last_error() {
            eprintln!("\nBeacon stopped: {}", err);
            std::process::exit(1);
        }

        match beacon.phase() {
            CadencePhase::Transmitting => print!("\rTransmitting...          "),
            CadencePhase::Waiting => {
                let remaining = beacon
                    .time_remaining(now)
                    .map(|d| d.as_secs_f32())
                    .unwrap_or(0.0);
                print!("\rWaiting {:5.1}s          ", remaining);
            }
            CadencePhase::Idle => break,
        }
        let _ = std::io::stdout().flush();
        std::thread::sleep(TICK_INTERVAL);
    }
    println!("\rDone.                    ");
}

fn export_wav(text: &str, wpm: u8, freq: f32, amp: f32, out: &str) {
    let sample_rate: u32 = 44100;
    println!("Rendering CW to {} at {} Hz...", out, sample_rate);

    let wav = render_morse_to_wav(text, wpm, freq, amp, sample_rate).unwrap_or_else(|e| {
        eprintln!("Failed to render: {}", e);
        std::process::exit(1);
    });
    println!("Rendered {} bytes", wav.len());

    fs::write(out, &wav).unwrap_or_else(|e| {
        eprintln!("Failed to write {}: {}", out, e);
        std::process::exit(1);
    });

    println!("Done.");
}

fn flag_value(args: &[String], name: &str) -> Option<f32> {
    flag_string(args, name).and_then(|v| v.parse().ok())
}

fn flag_string(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn usage() -> ! {
    eprintln!("Usage: voxbeacon tone|cw <TEXT>|message <file.wav> [options]");
    eprintln!("Options: --freq HZ --amp 0..1 --wpm N --pause SECS --burst SECS --continuous");
    eprintln!("         --wav OUT.wav   (cw only: render to file instead of transmitting)");
    std::process::exit(1);
}
