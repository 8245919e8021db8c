//! CLI argument parsing tests.

use clap::Parser;
use questlog::cli::{Cli, Commands};
use questlog::cli::commands::quest::QuestCommands;
use questlog::cli::commands::reward::RewardCommands;

#[test]
fn test_quest_add_with_options() {
    let cli = Cli::parse_from([
        "questlog", "quest", "add", "Morning Run", "--user", "alex", "--category", "Health",
        "--xp", "35", "--time-estimate", "30 min",
    ]);

    let Commands::Quest(args) = cli.command else {
        panic!("expected quest command");
    };
    let QuestCommands::Add {
        user,
        title,
        category,
        xp,
        time_estimate,
        description,
    } = args.command
    else {
        panic!("expected quest add");
    };
    assert_eq!(user, "alex");
    assert_eq!(title, "Morning Run");
    assert_eq!(category, "Health");
    assert_eq!(xp, Some(35));
    assert_eq!(time_estimate.as_deref(), Some("30 min"));
    assert!(description.is_none());
}

#[test]
fn test_quest_complete_takes_id() {
    let cli = Cli::parse_from(["questlog", "quest", "complete", "ab12cd34"]);
    let Commands::Quest(args) = cli.command else {
        panic!("expected quest command");
    };
    assert!(matches!(args.command, QuestCommands::Complete { id } if id == "ab12cd34"));
}

#[test]
fn test_global_json_flag() {
    let cli = Cli::parse_from(["questlog", "user", "list", "--json"]);
    assert!(cli.json);

    let cli = Cli::parse_from(["questlog", "--json", "achievement", "list", "--user", "alex"]);
    assert!(cli.json);
}

#[test]
fn test_reward_add_thresholds() {
    let cli = Cli::parse_from([
        "questlog", "reward", "add", "Movie Night", "--user", "alex", "--streak-required", "3",
        "--icon", "🎬",
    ]);
    let Commands::Reward(args) = cli.command else {
        panic!("expected reward command");
    };
    let RewardCommands::Add {
        title,
        streak_required,
        xp_required,
        icon,
        ..
    } = args.command
    else {
        panic!("expected reward add");
    };
    assert_eq!(title, "Movie Night");
    assert_eq!(streak_required, Some(3));
    assert!(xp_required.is_none());
    assert_eq!(icon.as_deref(), Some("🎬"));
}

#[test]
fn test_invalid_subcommand_rejected() {
    assert!(Cli::try_parse_from(["questlog", "frobnicate"]).is_err());
    assert!(Cli::try_parse_from(["questlog", "quest"]).is_err());
}
