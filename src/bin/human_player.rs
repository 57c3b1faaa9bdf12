use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zilch::achievements::Progress;
use zilch::ai::{self, AiPolicy};
use zilch::engine::{Game, RollOutcome, TurnOutcome, Winner, BANK_MINIMUM};
use zilch::player::Player;
use zilch::utils::dice_from_str;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Opponent {
    Human,
    Aggressive,
    Cautious,
    Adaptive,
}

impl Opponent {
    fn policy(self) -> Option<AiPolicy> {
        match self {
            Opponent::Human => None,
            Opponent::Aggressive => Some(AiPolicy::Aggressive),
            Opponent::Cautious => Some(AiPolicy::Cautious),
            Opponent::Adaptive => Some(AiPolicy::Adaptive),
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play Zilch in the terminal", long_about = None)]
struct Args {
    /// Who sits in the second seat
    #[clap(short, long, value_enum, default_value = "adaptive")]
    opponent: Opponent,

    /// Points needed to trigger the end of the match (1000-20000, steps of 500)
    #[clap(short, long, default_value_t = 10000)]
    threshold: i32,

    /// Seed for reproducible dice
    #[clap(short, long)]
    seed: Option<u64>,

    /// Achievements and statistics file, used when playing against an AI
    #[clap(short, long, default_value = "progress.json")]
    progress: PathBuf,

    /// Your name
    #[clap(short, long, default_value = "Player 1")]
    name: String,
}

fn load_progress(path: &Path) -> Result<Progress, String> {
    if !path.exists() {
        return Ok(Progress::new());
    }
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let mut progress: Progress = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid progress file {}: {}", path.display(), e))?;
    progress.normalize();
    Ok(progress)
}

fn save_progress(path: &Path, progress: &Progress) -> Result<(), String> {
    let json = serde_json::to_string_pretty(progress)
        .map_err(|e| format!("Failed to serialize progress: {}", e))?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

fn read_command(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn print_scores(game: &Game) {
    for (seat, player) in game.players().iter().enumerate() {
        let marker = if seat == game.current_player_index() && !game.is_game_over() {
            ">"
        } else {
            " "
        };
        let recent: Vec<String> = player
            .history()
            .iter()
            .rev()
            .take(5)
            .map(|entry| entry.to_string())
            .collect();
        println!(
            "{} {:<16} {:>6}   recent: {}",
            marker,
            player.name,
            player.hard_points(),
            recent.join(", ")
        );
    }
}

fn print_turn(game: &Game) {
    println!("---------------------");
    print_scores(game);
    println!("Target: {}", game.win_threshold());
    println!();
    println!("{}'s turn, soft points: {}", game.current_player().name, game.soft_points());
    if game.current_combinations().is_empty() {
        return;
    }
    println!("Dice: {}", game.dice());
    for (id, combo) in game.current_combinations().iter().enumerate() {
        let mark = if game.is_selected(id) { "x" } else { " " };
        println!("  {}) [{}] {}", id + 1, mark, combo);
    }
}

fn print_outcome(game: &Game, outcome: TurnOutcome) {
    let name = &game.player(outcome.player()).name;
    match outcome {
        TurnOutcome::Banked { points, .. } => println!("{} banks {} points.", name, points),
        TurnOutcome::Zilched { penalty: 0, .. } => println!("{} zilched!", name),
        TurnOutcome::Zilched { penalty, .. } => {
            println!("{} zilched three times in a row and loses {} points!", name, penalty)
        }
    }
}

fn report_result(game: &Game) {
    let Some(result) = game.winner_result() else {
        return;
    };
    println!();
    println!("---------------------");
    println!("GAME OVER");
    print_scores(game);
    match result.winner {
        Winner::Player(seat) => println!("{} wins!", game.player(seat).name),
        Winner::Tie => println!("It's a tie!"),
    }
    println!("---------------------");
}

fn handle_roll(game: &Game, outcome: Option<RollOutcome>, rejected: &str) {
    match outcome {
        None => println!("{}", rejected),
        Some(RollOutcome::Scoring) => {}
        Some(RollOutcome::Zilched(turn)) => {
            println!("Dice: {}", game.dice());
            print_outcome(game, turn);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut game = match args.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };
    if let Err(e) = game.set_win_threshold(args.threshold) {
        eprintln!("Invalid threshold: {}", e);
        std::process::exit(2);
    }
    game.set_player(0, Player::human(args.name.clone()));
    if let Some(policy) = args.opponent.policy() {
        game.set_player(1, Player::ai(policy));
    }

    let against_ai = game.player(1).is_ai();
    let mut progress = if against_ai {
        load_progress(&args.progress).unwrap_or_else(|e| {
            eprintln!("{}; starting with fresh progress.", e);
            Progress::new()
        })
    } else {
        Progress::new()
    };
    let mut recorded = false;

    println!("Welcome to Zilch!");
    println!(
        "{} vs {}, first to {} points (the other player gets one last turn).",
        game.player(0).name,
        game.player(1).name,
        game.win_threshold()
    );

    loop {
        if game.is_game_over() {
            if !recorded {
                report_result(&game);
                if against_ai {
                    for name in progress.record_match(&game) {
                        println!("Achievement unlocked: {}", name);
                    }
                    if let Err(e) = save_progress(&args.progress, &progress) {
                        eprintln!("{}", e);
                    }
                }
                recorded = true;
            }
            match read_command("Enter 'n' for a new match, 'q' to quit: ").as_deref() {
                Some("n") => {
                    game.restart_match();
                    recorded = false;
                }
                Some("q") | None => {
                    println!("Thanks for playing!");
                    break;
                }
                Some(_) => println!("Invalid input."),
            }
            continue;
        }

        if game.current_player().is_ai() {
            println!("{} is playing...", game.current_player().name);
            match ai::play_turn(&mut game) {
                Ok(outcome) => print_outcome(&game, outcome),
                Err(e) => {
                    eprintln!("AI error: {}", e);
                    break;
                }
            }
            continue;
        }

        print_turn(&game);
        let Some(input) = read_command(
            "Enter 'r' to roll, a number to hold/unhold, 'b' to bank, 't <faces>' to practice-roll, 'q' to quit: ",
        ) else {
            break;
        };

        match input.as_str() {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "r" => {
                let outcome = game.roll();
                handle_roll(
                    &game,
                    outcome,
                    "You must select at least one combination from the last roll before rolling again.",
                );
            }
            "b" => {
                if game.bank() {
                    if let Some(outcome) = game.last_outcome() {
                        print_outcome(&game, outcome);
                    }
                } else {
                    println!(
                        "Cannot bank: select a combination from this roll and reach {} soft points.",
                        BANK_MINIMUM
                    );
                }
            }
            _ => {
                if let Some(faces) = input.strip_prefix("t ") {
                    match dice_from_str(faces) {
                        Ok(faces) => {
                            let outcome = game.roll_with_faces(&faces);
                            handle_roll(
                                &game,
                                outcome,
                                "Cannot roll those dice: select a combination first and give one face per free die.",
                            );
                        }
                        Err(e) => println!("Invalid dice: {}", e),
                    }
                } else if let Ok(n) = input.parse::<usize>() {
                    if n == 0 || !game.toggle_combination(n - 1) {
                        println!("Cannot toggle combination {}: it overlaps dice already held, or does not exist.", n);
                    }
                } else {
                    println!("Invalid input. Use 'r', a combination number, 'b', 't <faces>' or 'q'.");
                }
            }
        }
    }
}
