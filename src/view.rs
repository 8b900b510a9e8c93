use std::io::{self, Write};

use crate::predictor::{Prediction, PredictionSource};
use crate::session::SessionState;

pub fn banner() {
    println!("drawtrack — track numbers, see what is likely next");
    println!("type `help` for commands");
}

pub fn pin_prompt() {
    print!("PIN: ");
    let _ = io::stdout().flush();
}

pub fn pin_rejected() {
    println!("wrong PIN");
}

pub fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

pub fn notice(message: &str) {
    println!("{message}");
}

pub fn help() {
    println!("commands:");
    println!("  add <n,n,...>      record observed numbers");
    println!("  correct <n,n,...>  submit the numbers that actually came up");
    println!("  wrong              flag the current predictions as wrong");
    println!("  table              show the frequency table");
    println!("  reset              clear all recorded data");
    println!("  quit               exit");
}

pub fn predictions(state: &SessionState) {
    println!(
        "{}",
        prediction_line(PredictionSource::Frequency, state.last_frequency.as_ref())
    );
    println!(
        "{}",
        prediction_line(PredictionSource::Ai, state.last_ai.as_ref())
    );
}

pub fn frequency_table(rows: &[(u32, usize)]) {
    if rows.is_empty() {
        println!("no numbers recorded yet");
        return;
    }

    println!("value  count");
    for (value, count) in rows {
        println!("{value:>5}  {count:>5}");
    }
}

fn prediction_line(slot: PredictionSource, prediction: Option<&Prediction>) -> String {
    let label = match slot {
        PredictionSource::Frequency => "frequency",
        PredictionSource::Ai => "ai",
    };
    match prediction {
        None => format!("{label} prediction: (none yet)"),
        Some(p) if p.numbers.is_empty() => format!("{label} prediction: (none)"),
        Some(p) => {
            let joined = p
                .numbers
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            if p.source == slot {
                format!("{label} prediction: {joined}")
            } else {
                format!("{label} prediction: {joined} (frequency fallback)")
            }
        }
    }
}
