//! Interactive loop for the digits game.
//!
//! User lines and timer ticks arrive over one channel and are applied to the
//! session one at a time, so the session sees a single serialized stream of
//! intents.

use std::{
    io::{self, BufRead as _},
    sync::mpsc,
    thread,
};

use digitforge_core::{Difficulty, Operation};
use digitforge_game::{GameMode, Session, SessionIntent, Ticker};

use crate::AppError;

#[derive(Debug, Clone)]
enum Event {
    Line(String),
    Tick,
    Eof,
}

/// What a parsed input line asks for.
enum Input {
    Intent(SessionIntent),
    Dismiss,
    Show,
    Help,
    Quit,
    Unknown,
}

pub fn run(
    difficulty: Difficulty,
    mode: GameMode,
    seed: Option<u64>,
    player: Option<&str>,
) -> Result<(), AppError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut session = Session::seeded(difficulty, mode, seed);

    let (tx, rx) = mpsc::channel();
    // The session ignores ticks whenever no countdown is running, so one
    // always-on ticker serves every mode.
    let _ticker = Ticker::spawn(tx.clone(), Event::Tick);
    spawn_stdin_reader(tx);

    if let Some(name) = player {
        println!("Player: {name}");
    }
    print_help();
    render(&session);

    for event in rx {
        match event {
            Event::Tick => {
                let was_over = session.timeout_overlay_visible()
                    || session.challenge_results_visible();
                session.apply(SessionIntent::Tick);
                let is_over = session.timeout_overlay_visible()
                    || session.challenge_results_visible();
                if is_over && !was_over {
                    render(&session);
                }
            }
            Event::Line(line) => match parse(&line) {
                Input::Intent(intent) => {
                    session.apply(intent);
                    render(&session);
                }
                Input::Dismiss => {
                    dismiss(&mut session);
                    render(&session);
                }
                Input::Show => render(&session),
                Input::Help => print_help(),
                Input::Quit => break,
                Input::Unknown => println!("Unrecognized command; try 'help'."),
            },
            Event::Eof => break,
        }
    }
    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::Sender<Event>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(Event::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Event::Eof);
    });
}

/// Sends the dismissal matching whichever overlay is up.
fn dismiss(session: &mut Session) {
    if session.win_overlay_visible() {
        session.apply(SessionIntent::DismissWin);
    } else if session.timeout_overlay_visible() {
        session.apply(SessionIntent::DismissTimeout);
    } else if session.challenge_results_visible() {
        session.apply(SessionIntent::DismissChallengeResults);
    }
}

fn parse(line: &str) -> Input {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Input::Show,
        [index] if index.parse::<usize>().is_ok() => match index.parse() {
            Ok(index) => Input::Intent(SessionIntent::SelectNumber(index)),
            Err(_) => Input::Unknown,
        },
        ["pick", index] => match index.parse() {
            Ok(index) => Input::Intent(SessionIntent::SelectNumber(index)),
            Err(_) => Input::Unknown,
        },
        ["add" | "+"] => Input::Intent(SessionIntent::SelectOperation(Operation::Add)),
        ["sub" | "-"] => Input::Intent(SessionIntent::SelectOperation(Operation::Sub)),
        ["mul" | "x" | "*"] => Input::Intent(SessionIntent::SelectOperation(Operation::Mul)),
        ["div" | "/"] => Input::Intent(SessionIntent::SelectOperation(Operation::Div)),
        ["undo"] => Input::Intent(SessionIntent::Undo),
        ["restart"] => Input::Intent(SessionIntent::Restart),
        ["new"] => Input::Intent(SessionIntent::NewPuzzle),
        ["skip"] => Input::Intent(SessionIntent::Skip),
        ["explain"] => Input::Intent(SessionIntent::ShowExplanation),
        ["hide"] => Input::Intent(SessionIntent::HideExplanation),
        ["ok" | "dismiss"] => Input::Dismiss,
        ["level", level] => match *level {
            "easy" => Input::Intent(SessionIntent::SetDifficulty(Difficulty::Easy)),
            "medium" => Input::Intent(SessionIntent::SetDifficulty(Difficulty::Medium)),
            "hard" => Input::Intent(SessionIntent::SetDifficulty(Difficulty::Hard)),
            _ => Input::Unknown,
        },
        ["mode", mode] => match *mode {
            "classic" => Input::Intent(SessionIntent::SetMode(GameMode::Classic)),
            "timer" => Input::Intent(SessionIntent::SetMode(GameMode::Timer)),
            "challenge" => Input::Intent(SessionIntent::SetMode(GameMode::Challenge)),
            _ => Input::Unknown,
        },
        ["show"] => Input::Show,
        ["help" | "?"] => Input::Help,
        ["quit" | "q" | "exit"] => Input::Quit,
        _ => Input::Unknown,
    }
}

fn render(session: &Session) {
    let game = session.game();

    println!();
    println!(
        "Target: {}   Moves: {}   [{} / {}]",
        game.target(),
        game.move_count(),
        session.difficulty(),
        session.mode(),
    );

    let tiles = game
        .numbers()
        .iter()
        .enumerate()
        .map(|(i, n)| {
            if game.selected_indices().contains(&i) {
                format!("{i}:[{n}]")
            } else {
                format!("{i}: {n} ")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    println!("Tiles: {tiles}");

    if let Some(remaining) = session.time_remaining() {
        println!("Time left: {remaining}s");
    }
    if session.mode().is_challenge() {
        let stats = session.challenge_stats();
        println!(
            "Solved: {}   Streak: {}   Time used: {}s",
            stats.puzzles_solved, stats.current_streak, stats.total_time,
        );
    }
    if !game.message().is_empty() {
        println!("> {}", game.message());
    }

    if session.explanation_visible() {
        match game.solution() {
            Some(steps) if steps.is_empty() => println!("Solution: already solved."),
            Some(steps) => {
                println!("Solution:");
                for step in steps {
                    println!("  {step}");
                }
            }
            None => println!("No solution found."),
        }
        println!("('hide' to close)");
    }
    if session.win_overlay_visible() {
        println!("*** You reached {}! ('ok' to continue) ***", game.target());
    }
    if session.timeout_overlay_visible() {
        println!("*** Time's up! ('ok' to close, 'new' to retry) ***");
    }
    if session.challenge_results_visible() {
        let stats = session.challenge_stats();
        println!(
            "*** Challenge over: {} solved, {}s used. ('ok' to close) ***",
            stats.puzzles_solved, stats.total_time,
        );
    }
}

fn print_help() {
    println!("Commands:");
    println!("  <i> / pick <i>      toggle tile i");
    println!("  add sub mul div     choose the operator (runs the move)");
    println!("  undo restart        take back / start the puzzle over");
    println!("  new skip            next puzzle / skip (challenge)");
    println!("  explain hide        show or hide a solution");
    println!("  ok                  dismiss the current overlay");
    println!("  level <easy|medium|hard>   switch difficulty");
    println!("  mode <classic|timer|challenge>   switch mode");
    println!("  show help quit");
}
