use clap::Parser;
use log::{info, warn};
use std::collections::HashMap;
use zilch::ai::{play_turn, AiPolicy};
use zilch::engine::{Game, Winner};
use zilch::player::Player;

/// Turns after which a match is abandoned as a draw.
const MAX_TURNS_PER_MATCH: usize = 10_000;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Pit the Zilch AI policies against each other", long_about = None)]
struct Args {
    /// Matches per ordered pair of policies
    #[clap(short, long, default_value_t = 100)]
    matches: u64,

    /// First seed; match i uses seed + i
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Win threshold for every match
    #[clap(short, long, default_value_t = 10000)]
    threshold: i32,
}

#[derive(Default)]
struct Record {
    games: u64,
    wins: u64,
    ties: u64,
    total_score: i64,
}

impl Record {
    fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }

    fn average_score(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games as f64
        }
    }
}

/// Plays one seeded match; `None` if it did not finish.
fn play_match(first: AiPolicy, second: AiPolicy, seed: u64, threshold: i32) -> Option<(Winner, [i32; 2])> {
    let mut game = Game::with_seed(seed);
    if let Err(e) = game.set_win_threshold(threshold) {
        warn!("{}", e);
        return None;
    }
    game.set_player(0, Player::ai(first));
    game.set_player(1, Player::ai(second));

    for _ in 0..MAX_TURNS_PER_MATCH {
        if let Some(result) = game.winner_result() {
            return Some((result.winner, result.scores));
        }
        if let Err(e) = play_turn(&mut game) {
            warn!("match {} vs {} (seed {}) stopped: {}", first, second, seed, e);
            return None;
        }
    }
    None
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut records: HashMap<AiPolicy, Record> = HashMap::new();
    for policy in AiPolicy::ALL {
        records.insert(policy, Record::default());
    }

    println!(
        "Starting policy evaluation: {} matches per pairing, threshold {}",
        args.matches, args.threshold
    );

    for first in AiPolicy::ALL {
        for second in AiPolicy::ALL {
            let mut first_wins = 0;
            let mut second_wins = 0;
            let mut ties = 0;
            for i in 0..args.matches {
                let Some((winner, scores)) =
                    play_match(first, second, args.seed + i, args.threshold)
                else {
                    continue;
                };
                for (seat, policy) in [(0, first), (1, second)] {
                    if let Some(record) = records.get_mut(&policy) {
                        record.games += 1;
                        record.total_score += i64::from(scores[seat]);
                        match winner {
                            Winner::Player(w) if w == seat => record.wins += 1,
                            Winner::Tie => record.ties += 1,
                            Winner::Player(_) => {}
                        }
                    }
                }
                match winner {
                    Winner::Player(0) => first_wins += 1,
                    Winner::Player(_) => second_wins += 1,
                    Winner::Tie => ties += 1,
                }
            }
            info!("{} vs {} finished", first, second);
            println!(
                "  {:<10} (first) vs {:<10}: {:>4} - {:<4} ties {}",
                first.to_string(),
                second.to_string(),
                first_wins,
                second_wins,
                ties
            );
        }
    }

    println!("\n--- Evaluation Complete ---");
    let mut sorted: Vec<(AiPolicy, &Record)> = records.iter().map(|(p, r)| (*p, r)).collect();
    sorted.sort_by(|a, b| {
        b.1.win_rate()
            .partial_cmp(&a.1.win_rate())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (policy, record) in sorted {
        println!(
            "Policy {:<10}: games {:>5}, wins {:>5} ({:>5.1}%), ties {:>3}, average score {:.0}",
            policy.to_string(),
            record.games,
            record.wins,
            record.win_rate() * 100.0,
            record.ties,
            record.average_score()
        );
    }
}
