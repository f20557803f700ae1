//! Raffle CLI - demo and smoke-test entry point
//!
//! Runs one draw against the demo roster so the engine can be exercised
//! without a presentation layer.
//!
//! Usage: `raffle [settings.json]`. With a settings file the state is
//! persisted to the configured snapshot path; without one it stays in memory.

use std::path::Path;

use env_logger::Env;

use raffle_core::config::{DrawMode, Settings};
use raffle_core::draw::DrawOutcome;
use raffle_core::{Raffle, RaffleCommand, RaffleEvent};

const DEMO_ROSTER: [&str; 16] = [
    "Lin Xiaobei",
    "Zhao Qing",
    "Wang Zhe",
    "Li Jia",
    "He Yuqing",
    "Zhou Qi",
    "Song Zhiyuan",
    "Gu Yinuo",
    "Ye Chi",
    "Xu Lan",
    "Sun Shiguang",
    "Han Zimo",
    "Shen Xinghe",
    "Cheng Ruolan",
    "Ji Yan",
    "Tang Xiaoran",
];

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    println!("Raffle Core - Lucky Draw Engine");
    println!("===============================");
    println!();

    let mut raffle = match std::env::args().nth(1) {
        Some(path) => match Settings::load(Path::new(&path)) {
            Ok(settings) => Raffle::open_file(settings),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => Raffle::in_memory(Settings::default()),
    };

    if raffle.engine().participant_count() == 0 {
        raffle.apply(RaffleCommand::ReplaceParticipants {
            names: DEMO_ROSTER.iter().map(|name| name.to_string()).collect(),
        });
    }

    println!("Current Configuration:");
    let engine = raffle.engine();
    println!("  - Mode: {:?}", engine.mode());
    if engine.mode() == DrawMode::Batch {
        println!("  - Slots per draw: {}", engine.batch_size());
    }
    println!("  - Rule: {:?}", engine.rule());
    println!("  - Participants: {}", engine.participant_count());
    println!("  - Remaining: {}", engine.remaining_count());
    println!("  - Prizes: {}", engine.prize_count());
    println!();

    let RaffleEvent::Drawn { outcome } = raffle.apply(RaffleCommand::Draw) else {
        println!("Draw did not run.");
        return;
    };

    match outcome {
        DrawOutcome::Session(session) => {
            println!("Ten-pull results ({}):", session.time.format("%Y-%m-%d %H:%M:%S"));
            for (slot, card) in session.cards.iter().enumerate() {
                match &card.winner {
                    Some(winner) => println!(
                        "  {:>2}. [{:<3}] {} - {}",
                        slot + 1,
                        card.rarity,
                        winner,
                        card.prize_name
                    ),
                    None => println!("  {:>2}. [{:<3}] {}", slot + 1, card.rarity, card.prize_name),
                }
            }
        }
        DrawOutcome::Winners(record) => {
            let prize = if record.prize.is_empty() {
                "Unnamed prize"
            } else {
                record.prize.as_str()
            };
            println!("Prize: {}", prize);
            println!("Winners: {}", record.names.join(" · "));
        }
        DrawOutcome::Empty => {
            println!("The remaining pool is empty. Save a roster first.");
        }
    }

    println!();
    println!("Remaining participants: {}", raffle.engine().remaining_count());
}
