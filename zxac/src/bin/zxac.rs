use clap::{
    Parser,
    Subcommand,
};
use http::Method;
use zxac::{
    conf::PlatformArgs,
    route::RouteTable,
};
use zxcore::ac::{
    action::Action,
    agent::Agent,
    principal::Principal,
    resource::Resource,
    role::{
        Role,
        Roles,
    },
    traits::Enforcer as _,
};
use zxrbac::{
    manage,
    validate,
};

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[clap(flatten)]
    platform: PlatformArgs,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Evaluate whether a role may perform an action on a resource;
    /// exits with status 1 when denied
    #[command(arg_required_else_help = true)]
    Check {
        #[arg(value_enum)]
        resource: Resource,
        #[arg(value_enum)]
        action: Action,
        /// Omit to evaluate as an anonymous agent
        #[arg(value_enum)]
        role: Option<Role>,
    },
    #[command(arg_required_else_help = true)]
    Role {
        #[command(subcommand)]
        cmd: RoleCmd,
    },
    /// Report guarded permits that no role in the policy holds
    Validate,
    #[command(arg_required_else_help = true)]
    Token {
        #[command(subcommand)]
        cmd: TokenCmd,
    },
    /// Show what a request path requires
    #[command(arg_required_else_help = true)]
    Route {
        path: String,
        #[arg(long, default_value = "GET")]
        method: Method,
    },
}

#[derive(Debug, Subcommand)]
enum RoleCmd {
    List,
    #[command(arg_required_else_help = true)]
    Show {
        #[arg(value_enum)]
        role: Role,
    },
}

#[derive(Debug, Subcommand)]
enum TokenCmd {
    #[command(arg_required_else_help = true)]
    Issue {
        id: String,
        email: String,
        #[arg(value_enum)]
        role: Role,
        #[arg(long)]
        name: Option<String>,
        /// Lifetime of the token in hours
        #[arg(long, default_value = "24")]
        hours: i64,
    },
    #[command(arg_required_else_help = true)]
    Verify {
        token: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    stderrlog::new()
        .module(module_path!())
        .module("zxac")
        .module("zxrbac")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    match args.command {
        Commands::Check { resource, action, role } => {
            let enforcer = args.platform.zxrbac_builder()?.build().await?;
            let agent = role
                .map(|role| Principal::new("-", "cli@localhost", None, role).into())
                .unwrap_or(Agent::Anonymous);
            let decision = enforcer.enforce(&agent, resource, action);
            println!("{resource}:{action} for {agent}: {decision:?}");
            if !decision.is_allowed() {
                std::process::exit(1);
            }
        },
        Commands::Role { cmd } => {
            parse_role(&args.platform, cmd)?;
        },
        Commands::Validate => {
            let table = args.platform.zxrbac_builder()?.table()?;
            let unreachable = validate::unreachable_permits(
                &table,
                RouteTable::default().guarded_permits(),
            );
            if unreachable.is_empty() {
                println!("every guarded permit is held by at least one role");
            } else {
                for permit in unreachable.iter() {
                    println!("unreachable: {permit}");
                }
                std::process::exit(1);
            }
        },
        Commands::Token { cmd } => {
            parse_token(&args.platform, cmd)?;
        },
        Commands::Route { path, method } => {
            match RouteTable::default().classify(&method, &path) {
                Some(route) => println!("{method} {path}: {:?} {:?}", route.surface, route.requirement),
                None => println!("{method} {path}: not guarded"),
            }
        },
    }

    Ok(())
}

fn parse_role(
    platform: &PlatformArgs,
    arg: RoleCmd,
) -> anyhow::Result<()> {
    match arg {
        RoleCmd::List => {
            let mut roles = Roles::all().iter().collect::<Vec<_>>();
            roles.sort_by_key(|role| std::cmp::Reverse(role.level()));
            for role in roles {
                println!("{:<12} {:>3}  {}", role.to_string(), role.level(), role.display_name());
            }
        },
        RoleCmd::Show { role } => {
            let table = platform.zxrbac_builder()?.table()?;
            println!("{} ({role})", role.display_name());
            println!("{}", role.description());
            println!("level: {}", role.level());
            let assignable = manage::assignable_roles(role)
                .iter()
                .map(|role| role.to_string())
                .collect::<Vec<_>>();
            println!("assignable roles: {}", assignable.join(", "));
            println!("permissions:");
            for permit in table.permits(role) {
                println!("  {permit}");
            }
        },
    }
    Ok(())
}

fn parse_token(
    platform: &PlatformArgs,
    arg: TokenCmd,
) -> anyhow::Result<()> {
    let keys = platform.token_keys()?;
    match arg {
        TokenCmd::Issue { id, email, role, name, hours } => {
            let principal = Principal::new(id, email, name, role);
            let token = keys
                .lifetime(chrono::Duration::hours(hours))
                .issue(&principal)?;
            println!("{token}");
        },
        TokenCmd::Verify { token } => {
            let principal = keys.verify(&token)?;
            println!("id: {}", principal.id);
            println!("email: {}", principal.email);
            println!("name: {}", principal.name);
            println!("role: {}", principal.role);
        },
    }
    Ok(())
}
