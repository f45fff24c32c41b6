// Command-line arguments and the non-interactive draw.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use giftdraw_core::roster::{parse_participants, validate_setup};
use giftdraw_core::{Assignment, DrawStrategy, Session};
use serde::Serialize;
use tracing::info;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "giftdraw")]
#[command(about = "Draw a gift-exchange cycle where nobody draws themselves")]
pub struct Cli {
    #[arg(long, help = "Names file, one per line; draws without the TUI")]
    pub names: Option<PathBuf>,
    #[arg(
        long,
        requires = "names",
        help = "Participant who draws first (default: first listed)"
    )]
    pub first: Option<String>,
    #[arg(long, help = "RNG seed for a reproducible draw")]
    pub seed: Option<u64>,
    #[arg(long, help = "Draw strategy: sequential or cycle")]
    pub strategy: Option<DrawStrategy>,
    #[arg(
        long,
        requires = "names",
        default_value_t = false,
        help = "Print results as JSON"
    )]
    pub json: bool,
    #[arg(
        long,
        help = "Config file (default: ./config/giftdraw.toml, then the user config dir)"
    )]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Whether to draw straight to stdout instead of starting the TUI.
    pub fn is_batch(&self) -> bool {
        self.names.is_some()
    }

    /// Let command-line flags win over the config file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.draw.seed = Some(seed);
        }
        if let Some(strategy) = self.strategy {
            config.draw.strategy = strategy;
        }
    }
}

/// JSON shape of a finished batch draw.
#[derive(Debug, Serialize)]
struct BatchReport<'a> {
    participants: &'a [String],
    first_drawer: &'a str,
    strategy: DrawStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    assignments: &'a [Assignment],
}

/// Run a complete draw over `names_text` and render the result.
///
/// Without `first`, the first listed name draws first. Plain output is one
/// `giver -> receiver` line per draw.
pub fn run_batch(
    names_text: &str,
    first: Option<&str>,
    json: bool,
    config: &Config,
) -> anyhow::Result<String> {
    let names = parse_participants(names_text);
    let first_drawer = first
        .map(str::to_owned)
        .or_else(|| names.first().cloned())
        .unwrap_or_default();
    validate_setup(&names, &first_drawer).context("invalid participant list")?;

    let mut rng = config.draw.rng();
    let mut session = Session::start_with(names, &first_drawer, config.draw.strategy, &mut rng)
        .context("failed to start draw")?;
    session
        .draw_all(&mut rng)
        .context("draw engine invariant violated")?;
    info!(
        "Batch draw finished: {} assignments",
        session.assignments().len()
    );

    if json {
        let report = BatchReport {
            participants: session.participants(),
            first_drawer: &first_drawer,
            strategy: session.strategy(),
            seed: config.draw.seed,
            assignments: session.assignments(),
        };
        let mut out = serde_json::to_string_pretty(&report).context("failed to encode JSON")?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(session
            .assignments()
            .iter()
            .map(|a| format!("{a}\n"))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftdraw_core::is_single_cycle;

    fn seeded(seed: u64) -> Config {
        let mut config = Config::default();
        config.draw.seed = Some(seed);
        config
    }

    #[test]
    fn parses_batch_flags() {
        let cli = Cli::try_parse_from([
            "giftdraw",
            "--names",
            "friends.txt",
            "--first",
            "Mei",
            "--seed",
            "9",
            "--strategy",
            "cycle",
            "--json",
        ])
        .unwrap();
        assert!(cli.is_batch());
        assert_eq!(cli.first.as_deref(), Some("Mei"));
        assert_eq!(cli.strategy, Some(DrawStrategy::Cycle));

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.draw.seed, Some(9));
        assert_eq!(config.draw.strategy, DrawStrategy::Cycle);
    }

    #[test]
    fn no_flags_means_tui() {
        let cli = Cli::try_parse_from(["giftdraw"]).unwrap();
        assert!(!cli.is_batch());
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn first_requires_names() {
        assert!(Cli::try_parse_from(["giftdraw", "--first", "A"]).is_err());
        assert!(Cli::try_parse_from(["giftdraw", "--strategy", "lottery"]).is_err());
    }

    #[test]
    fn plain_output_is_one_line_per_draw() {
        let out = run_batch("A\nB\nC\nD\n", Some("C"), false, &seeded(3)).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("C -> "));
        assert!(lines[3].ends_with(" -> C"));
    }

    #[test]
    fn defaults_to_first_listed_drawer() {
        let out = run_batch("Ming\nHua\n", None, false, &seeded(1)).unwrap();
        assert_eq!(out, "Ming -> Hua\nHua -> Ming\n");
    }

    #[test]
    fn same_seed_same_draw() {
        let text = "A\nB\nC\nD\nE\nF\n";
        let a = run_batch(text, None, false, &seeded(42)).unwrap();
        let b = run_batch(text, None, false, &seeded(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn json_output_round_trips_to_a_cycle() {
        let mut config = seeded(5);
        config.draw.strategy = DrawStrategy::Cycle;
        let out = run_batch("A\nB\nC\nD\nE\n", Some("B"), true, &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["first_drawer"], "B");
        assert_eq!(value["strategy"], "cycle");
        assert_eq!(value["seed"], 5);
        let assignments: Vec<Assignment> =
            serde_json::from_value(value["assignments"].clone()).unwrap();
        assert!(is_single_cycle(&assignments));
    }

    #[test]
    fn bad_input_is_reported() {
        let err = run_batch("Solo\n", None, false, &seeded(0)).unwrap_err();
        assert!(format!("{err:#}").contains("at least two names"));

        let err = run_batch("A\nB\n", Some("Z"), false, &seeded(0)).unwrap_err();
        assert!(format!("{err:#}").contains("valid first drawer"));
    }
}
