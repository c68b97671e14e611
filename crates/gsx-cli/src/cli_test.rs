use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_deploy_defaults() {
    let cli = Cli::try_parse_from(["gsx", "deploy"]).unwrap();
    assert_eq!(cli.global.workspace, ".");
    assert!(!cli.global.verbose);
    match cli.command {
        Commands::Deploy(args) => {
            assert!(!args.deploy);
            assert_eq!(args.target.commit, "HEAD");
            assert!(args.target.schema.is_none());
        }
        other => panic!("expected deploy, got {:?}", other),
    }
}

#[test]
fn test_deploy_flags() {
    let cli = Cli::try_parse_from([
        "gsx",
        "-w",
        "/tmp/repo",
        "deploy",
        "--deploy",
        "--commit",
        "abc123",
        "--dsn",
        "dev.duckdb",
        "--table",
        "marker",
        "--schema",
        "db/schema.sql",
        "--dialect",
        "mysql",
        "-v",
    ])
    .unwrap();
    assert_eq!(cli.global.workspace, "/tmp/repo");
    assert!(cli.global.verbose);
    let Commands::Deploy(args) = cli.command else {
        panic!("expected deploy");
    };
    assert!(args.deploy);
    assert_eq!(args.target.commit, "abc123");
    assert_eq!(args.target.dsn.as_deref(), Some("dev.duckdb"));
    assert_eq!(args.target.table.as_deref(), Some("marker"));
    assert_eq!(args.target.schema.as_deref(), Some("db/schema.sql"));
    assert_eq!(args.target.dialect.as_deref(), Some("mysql"));
}

#[test]
fn test_status_output_format() {
    let cli = Cli::try_parse_from(["gsx", "status", "--output", "json"]).unwrap();
    let Commands::Status(args) = cli.command else {
        panic!("expected status");
    };
    assert_eq!(args.output, OutputFormat::Json);
}

#[test]
fn test_unknown_output_format_rejected() {
    assert!(Cli::try_parse_from(["gsx", "status", "--output", "xml"]).is_err());
}
