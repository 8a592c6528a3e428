mod config;
mod error;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use guards::{RouteOutcome, Session};
use policy::{Capability, PolicyMatrix, Position, Principal, RawPrincipal, Role, RouteMap};
use tracing_subscriber::EnvFilter;

use config::{Config, NavigationConfig};
use error::{Error, Result};

const CONFIG_FILE: &str = "frontdesk.toml";

#[derive(Parser)]
#[command(name = "frontdesk")]
#[command(about = "Inspect the staff console's authorization policy", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./frontdesk.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Evaluate as this role instead of the configured principal
    #[arg(short, long, global = true)]
    role: Option<String>,

    /// Staff position to go with --role
    #[arg(short, long, global = true, requires = "role")]
    position: Option<String>,

    /// Evaluate with nobody signed in
    #[arg(long, global = true, conflicts_with = "role")]
    anonymous: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check capabilities for the principal
    Check {
        /// Capability identifiers (e.g. create_booking, canViewRoom)
        #[arg(required = true)]
        capabilities: Vec<String>,
    },
    /// Evaluate navigation to one or more paths
    Route {
        /// Paths such as /booking/42
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print the policy matrix
    Matrix {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the route map and which areas the principal may enter
    Routes,
    /// Verify the invariants of the policy tables
    Verify,
    /// Show the principal and its capabilities
    Whoami,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config);

    let session = build_session(&cli, &config)?;

    match cli.command {
        Commands::Check { capabilities } => cmd_check(&session, &capabilities),
        Commands::Route { paths } => cmd_route(&session, &paths, &config.navigation),
        Commands::Matrix { json } => cmd_matrix(json),
        Commands::Routes => cmd_routes(&session),
        Commands::Verify => cmd_verify(),
        Commands::Whoami => cmd_whoami(&session),
    }
}

fn init_logging(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if !path.exists() => Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        }),
        Some(path) => Ok(Config::load(path)?),
        None if Path::new(CONFIG_FILE).exists() => Ok(Config::load(CONFIG_FILE)?),
        None => Ok(Config::default()),
    }
}

/// Resolve the principal from flags or config.
///
/// Flags are operator input and are parsed strictly. The configured
/// principal stands in for session data and goes through the same lenient,
/// fail-closed path the console uses.
fn build_session(cli: &Cli, config: &Config) -> Result<Session> {
    let mut session = Session::anonymous();

    if cli.anonymous {
        return Ok(session);
    }

    if let Some(role) = &cli.role {
        let role: Role = role.parse()?;
        let position = cli
            .position
            .as_deref()
            .map(str::parse::<Position>)
            .transpose()?;
        session.login(Principal::new(role, position));
    } else if let Some(raw) = &config.principal {
        session.login_raw(raw);
        if !session.is_authenticated() {
            tracing::warn!(role = %raw.role, "configured principal has an unknown role; evaluating as signed out");
        }
    }

    Ok(session)
}

fn cmd_check(session: &Session, names: &[String]) -> Result<()> {
    for name in names {
        let verdict = match name.parse::<Capability>() {
            Ok(capability) if session.has_capability(capability) => "granted".to_string(),
            Ok(_) => "denied".to_string(),
            Err(e) => format!("denied ({e})"),
        };
        println!("{name:<28}  {verdict}");
    }
    Ok(())
}

fn cmd_route(session: &Session, paths: &[String], nav: &NavigationConfig) -> Result<()> {
    for path in paths {
        let outcome = session.navigate(path);
        println!("{path:<28}  {}", describe_outcome(outcome, nav));
    }
    Ok(())
}

/// What the navigation layer would do with an outcome.
fn describe_outcome(outcome: RouteOutcome, nav: &NavigationConfig) -> String {
    match (outcome, nav.redirect_for(outcome)) {
        (RouteOutcome::Allow, _) => "allow".to_string(),
        (RouteOutcome::MaskAsNotFound, _) => "404 not found".to_string(),
        (outcome, Some(target)) => format!("{outcome} -> {target}"),
        (outcome, None) => outcome.to_string(),
    }
}

fn cmd_matrix(json: bool) -> Result<()> {
    let table = PolicyMatrix::global().to_table();

    if json {
        let rows: BTreeMap<String, Vec<Capability>> = table
            .iter()
            .map(|(key, caps)| (key.to_string(), caps.iter().copied().collect()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let keys: Vec<_> = table.keys().collect();
    print!("{:<22}", "CAPABILITY");
    for key in &keys {
        print!("  {:<20}", key.to_string());
    }
    println!();
    println!("{}", "-".repeat(22 + keys.len() * 22));

    for capability in Capability::ALL {
        print!("{:<22}", capability.as_str());
        for key in &keys {
            let mark = if table[*key].contains(capability) { "x" } else { "." };
            print!("  {mark:<20}");
        }
        println!();
    }

    Ok(())
}

fn cmd_routes(session: &Session) -> Result<()> {
    println!("{:<16}  {:<22}  ENTER", "ROUTE", "CAPABILITY");
    println!("{}", "-".repeat(48));

    for (segment, capability) in RouteMap::global().entries() {
        let path = format!("/{segment}");
        let enter = if policy::can_enter_route(session.principal(), &path) {
            "yes"
        } else {
            "no"
        };
        println!("{path:<16}  {:<22}  {enter}", capability.as_str());
    }

    Ok(())
}

fn cmd_verify() -> Result<()> {
    PolicyMatrix::global().verify()?;
    RouteMap::global().verify()?;
    println!("policy matrix and route map OK");
    Ok(())
}

fn cmd_whoami(session: &Session) -> Result<()> {
    let Some(principal) = session.principal() else {
        println!("not signed in");
        return Ok(());
    };

    println!("principal: {principal}");
    let raw = RawPrincipal::from(*principal);
    println!("session data: {}", serde_json::to_string(&raw)?);

    let capabilities = policy::capabilities_of(Some(principal));
    if capabilities.is_empty() {
        println!("capabilities: none");
    } else {
        println!("capabilities:");
        for capability in capabilities {
            println!("  {capability}");
        }
    }

    let routes: Vec<String> = policy::accessible_routes(Some(principal))
        .into_iter()
        .map(|segment| format!("/{segment}"))
        .collect();
    println!("routes: {}", routes.join(" "));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_for(args: &[&str]) -> Result<Session> {
        let cli = Cli::try_parse_from(args).unwrap();
        build_session(&cli, &Config::default())
    }

    #[test]
    fn test_flags_build_principal() {
        let session = session_for(&["frontdesk", "-r", "STAFF", "-p", "manager", "whoami"]).unwrap();
        assert_eq!(session.principal(), Some(&Principal::staff(Position::Manager)));
    }

    #[test]
    fn test_flags_reject_unknown_role() {
        let err = session_for(&["frontdesk", "--role", "owner", "verify"]).unwrap_err();
        assert!(matches!(err, Error::Policy(policy::Error::UnknownRole(_))));
    }

    #[test]
    fn test_anonymous_flag() {
        let session = session_for(&["frontdesk", "--anonymous", "routes"]).unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_configured_principal_is_lenient() {
        let config = Config::parse(
            r#"
[principal]
role = "staff"
position = "Concierge"
"#,
        )
        .unwrap();
        let cli = Cli::try_parse_from(["frontdesk", "whoami"]).unwrap();
        let session = build_session(&cli, &config).unwrap();
        assert_eq!(session.principal(), Some(&Principal::new(Role::Staff, None)));
        assert_eq!(session.navigate("/home"), RouteOutcome::RedirectToUnauthorized);
    }

    #[test]
    fn test_position_requires_role() {
        assert!(Cli::try_parse_from(["frontdesk", "-p", "manager", "whoami"]).is_err());
    }

    #[test]
    fn test_describe_outcome() {
        let nav = NavigationConfig::default();
        assert_eq!(describe_outcome(RouteOutcome::Allow, &nav), "allow");
        assert_eq!(
            describe_outcome(RouteOutcome::MaskAsNotFound, &nav),
            "404 not found"
        );
        assert_eq!(
            describe_outcome(RouteOutcome::RedirectToLogin, &nav),
            "redirect_to_login -> /login"
        );
        assert_eq!(
            describe_outcome(RouteOutcome::RedirectToUnauthorized, &nav),
            "redirect_to_unauthorized -> /unauthorized"
        );
    }
}
