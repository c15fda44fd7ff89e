use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use paranames::{
    Availability, ChainedResolver, ClassRegistry, ParameterNameResolver, RegistryEntry,
    CONSTRUCTOR_NAME,
};

#[derive(Parser)]
#[command(
    name = "paranames",
    version,
    about = "Look up JVM method and constructor parameter names"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a member and print its parameter names
    Names(NamesArgs),
    /// Report how specifically parameter names are available
    Check(CheckArgs),
}

#[derive(Args)]
struct NamesArgs {
    /// Fully qualified class name, e.g. com.example.Sample
    class: String,
    /// Method name; omit to look up a constructor
    #[arg(long)]
    method: Option<String>,
    /// Comma-separated parameter types, e.g. "java.lang.String,int"
    #[arg(long, default_value = "")]
    params: String,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct CheckArgs {
    /// Fully qualified class name
    class: String,
    /// Method name, or <init> for constructors
    member: String,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct CommonArgs {
    /// Classpath entry: a directory of .class files or a jar; repeatable
    #[arg(long = "classpath", short = 'c', value_name = "PATH")]
    classpath: Vec<PathBuf>,
    /// Emit JSON
    #[arg(long)]
    json: bool,
}

impl CommonArgs {
    fn registry(&self) -> ClassRegistry {
        ClassRegistry::new(self.classpath.iter().map(RegistryEntry::from_path).collect())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            2
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Names(args) => run_names(args),
        Command::Check(args) => run_check(args),
    }
}

#[derive(Serialize)]
struct NamesReport<'a> {
    class: &'a str,
    member: &'a str,
    descriptor: &'a str,
    parameter_names: &'a [String],
}

fn run_names(args: NamesArgs) -> Result<i32> {
    let registry = args.common.registry();
    let resolver = ChainedResolver::default();

    let (member_name, descriptor, names) = match args.method.as_deref() {
        Some(method) => {
            let Some(handle) =
                resolver.resolve_method(&registry, &args.class, method, &args.params)
            else {
                return no_match(&args.common);
            };
            let names = resolver.method_parameter_names(&handle);
            (method.to_string(), handle.descriptor().to_string(), names)
        }
        None => {
            let Some(handle) =
                resolver.resolve_constructor(&registry, &args.class, &args.params)
            else {
                return no_match(&args.common);
            };
            let names = resolver.constructor_parameter_names(&handle);
            (
                CONSTRUCTOR_NAME.to_string(),
                handle.descriptor().to_string(),
                names,
            )
        }
    };

    let Some(names) = names else {
        if args.common.json {
            println!(
                "{}",
                serde_json::json!({ "found": true, "names_available": false })
            );
        } else {
            eprintln!("member found, but no parameter names are recorded for it");
        }
        return Ok(1);
    };

    if args.common.json {
        let report = NamesReport {
            class: &args.class,
            member: &member_name,
            descriptor: &descriptor,
            parameter_names: &names,
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", names.join(", "));
    }
    Ok(0)
}

fn no_match(common: &CommonArgs) -> Result<i32> {
    if common.json {
        println!("{}", serde_json::json!({ "found": false }));
    } else {
        eprintln!("no matching member on the classpath");
    }
    Ok(1)
}

#[derive(Serialize)]
struct CheckReport<'a> {
    class: &'a str,
    member: &'a str,
    availability: &'a str,
}

fn run_check(args: CheckArgs) -> Result<i32> {
    let registry = args.common.registry();
    let resolver = ChainedResolver::default();

    let availability = resolver.availability(&registry, &args.class, &args.member);
    if args.common.json {
        let report = CheckReport {
            class: &args.class,
            member: &args.member,
            availability: availability.as_str(),
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{availability}");
    }
    Ok(if availability == Availability::Found { 0 } else { 1 })
}
