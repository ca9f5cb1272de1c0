//! A simple CLI tool for dry-running a full synthetic election in memory.
//! It drives the same ledger and generators as the server, so a locations
//! file can be sanity-checked (and a plausible result distribution eyeballed)
//! before anything is deployed.

use std::fmt::{Display, Formatter};

use clap::{Arg, ArgAction, ArgMatches, Command};
use rand::thread_rng;

use election_ledger::error::Error;
use election_ledger::generate::{
    create_ballots, generate_votes, parse_locations_file, register_locations, AbstentionRange,
    AccountPool,
};
use election_ledger::ledger::Ledger;
use election_ledger::model::{Address, Ballot, Round};

const PROGRAM_NAME: &str = "simulate-election";

const ABOUT_TEXT: &str = "Run a synthetic election over a locations file.

EXIT CODES:
     0: Simulation ran to completion.
 Other: Error.";

const LOCATIONS_PATH: &str = "LOCATIONS_PATH";

const LOCATIONS_PATH_HELP: &str = "The path to a locations file:\n\
one `name voterCount centerCount` line per location";

const MIN_ABSTENTION: &str = "min-abstention";

const MAX_ABSTENTION: &str = "max-abstention";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    clap::command!(PROGRAM_NAME)
        .about(ABOUT_TEXT)
        .arg(
            Arg::new(LOCATIONS_PATH)
                .help(LOCATIONS_PATH_HELP)
                .action(ArgAction::Set)
                .required(true),
        )
        .arg(
            Arg::new(MIN_ABSTENTION)
                .long(MIN_ABSTENTION)
                .help("Lower abstention bound, as a fraction of the electorate")
                .value_parser(clap::value_parser!(f64))
                .default_value("0.1"),
        )
        .arg(
            Arg::new(MAX_ABSTENTION)
                .long(MAX_ABSTENTION)
                .help("Upper abstention bound, as a fraction of the electorate")
                .value_parser(clap::value_parser!(f64))
                .default_value("0.3"),
        )
}

/// The final state of one ballot, ready for printing.
#[derive(Debug, PartialEq, Eq)]
struct Standings {
    title: String,
    round: Round,
    /// (candidate, votes), best tally first.
    tallies: Vec<(Address, u64)>,
}

impl Display for Standings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} (round {}):", self.title, self.round)?;
        for (candidate, votes) in &self.tallies {
            writeln!(
                f,
                "  {candidate}: {votes} vote{}",
                if *votes != 1 { "s" } else { "" }
            )?;
        }
        Ok(())
    }
}

/// Run the whole synthetic election and collect per-ballot standings.
fn simulate(path: &str, range: AbstentionRange) -> Result<Vec<Standings>, Error> {
    let admin = Address::new("0xsimulation00000000000000000000000000admin");
    let mut ledger = Ledger::new(admin.clone());

    let records = parse_locations_file(path)?;
    let mut accounts = AccountPool::new(thread_rng());
    register_locations(&mut ledger, &admin, &records, &mut accounts, &mut thread_rng())?;
    create_ballots(&mut ledger, &admin, &mut thread_rng())?;
    generate_votes(&mut ledger, range, &mut thread_rng())?;

    Ok(ledger
        .ballots()
        .iter()
        .map(|ballot| standings(&ledger, ballot))
        .collect())
}

fn standings(ledger: &Ledger, ballot: &Ballot) -> Standings {
    let title = match ballot.location_id {
        Some(location_id) => {
            // Governor ballots always reference a registered location.
            let location = ledger
                .locations()
                .iter()
                .find(|l| l.id == location_id)
                .unwrap();
            format!("Governor of {}", location.name)
        }
        None => "President".to_string(),
    };
    let mut tallies: Vec<(Address, u64)> = ledger
        .candidates()
        .iter()
        .filter(|c| c.ballot_id == ballot.id && c.round_id == ballot.round)
        .map(|c| (c.id.clone(), c.votes_count))
        .collect();
    tallies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Standings {
        title,
        round: ballot.round,
        tallies,
    }
}

/// Run the simulation, report the result, and return the exit code.
fn run(args: &ArgMatches) -> u8 {
    // Required / defaulted arguments are guaranteed to be present.
    let path: &String = args.get_one(LOCATIONS_PATH).unwrap();
    let min: f64 = *args.get_one(MIN_ABSTENTION).unwrap();
    let max: f64 = *args.get_one(MAX_ABSTENTION).unwrap();

    let range = match AbstentionRange::new(min, max) {
        Ok(range) => range,
        Err(err) => {
            println!("{err}");
            return 1;
        }
    };
    match simulate(path, range) {
        Ok(all_standings) => {
            println!("Simulation ran to completion.");
            for standings in all_standings {
                println!("{standings}");
            }
            0
        }
        Err(err) => {
            println!("{err}");
            1
        }
    }
}

fn main() {
    let args = cli().get_matches();
    let exit_code = run(&args);
    std::process::exit(exit_code.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_cli_usage() {
        let command_line = [PROGRAM_NAME, "example_data/locations.txt"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 0);

        let command_line = [PROGRAM_NAME, "not a real file"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 1);

        // Bounds that collapse to an empty range.
        let command_line = [
            PROGRAM_NAME,
            "example_data/locations.txt",
            "--min-abstention",
            "0.3",
            "--max-abstention",
            "0.1",
        ];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 1);
    }

    #[test]
    fn bad_cli_usage() {
        // Something very wrong.
        let command_line = [PROGRAM_NAME, "--frobnicate", "everything"];
        cli().try_get_matches_from(command_line).unwrap_err();

        // No options at all.
        let command_line = [PROGRAM_NAME];
        cli().try_get_matches_from(command_line).unwrap_err();

        // Abstention bounds must be numbers.
        let command_line = [
            PROGRAM_NAME,
            "example_data/locations.txt",
            "--min-abstention",
            "low",
        ];
        cli().try_get_matches_from(command_line).unwrap_err();
    }

    #[test]
    fn standings_cover_every_ballot() {
        let all = simulate("example_data/locations.txt", AbstentionRange::default()).unwrap();
        // One governor ballot per location plus the president ballot.
        assert_eq!(all.len(), 4 + 1);
        assert_eq!(all.last().unwrap().title, "President");
        for standings in &all {
            assert!(standings.tallies.len() >= 2);
            assert_eq!(standings.round, 1);
        }
    }
}
