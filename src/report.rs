//! Text rendering of sequences, programs and search outcomes.

use crate::search::Prediction;
use crate::vm::Program;

/// Space-separated decimal rendering.
pub fn format_sequence(values: &[u16]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per instruction: `index: op val -> redirect / zero:zero_redirect`.
pub fn format_program(program: &Program) -> String {
    let width = (program.len().saturating_sub(1)).to_string().len();
    program
        .instructions()
        .iter()
        .enumerate()
        .map(|(i, ins)| {
            format!(
                "{:>width$}: {} {} -> {} / zero:{}",
                i,
                ins.op,
                ins.val,
                ins.redirect,
                ins.zero_redirect,
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncated hex fingerprint for display.
pub fn short_fingerprint(program: &Program) -> String {
    let hex = program.fingerprint().to_hex();
    hex[..16].to_string()
}

/// One-line outcome summary for stderr.
pub fn format_summary(prediction: &Prediction) -> String {
    let program = prediction.machine.program();
    let fit = if prediction.is_exact() {
        "exact".to_string()
    } else if prediction.output().len() < prediction.target_len {
        "no full-length output".to_string()
    } else {
        format!("score {}", prediction.score)
    };
    format!(
        "{}, program {} ({} instruction(s)), {} of {} predicted value(s), seed {}",
        fit,
        short_fingerprint(program),
        program.len(),
        prediction.continuation().len(),
        prediction.extra,
        prediction.seed,
    )
}
