use clap::{Parser, Subcommand};
use serde_json::Value;

use device_portal::app;
use device_portal::config::RoutingConfig;
use device_portal::routing::{NavigationEvent, Router};
use device_portal::views::View;

#[derive(Parser)]
#[command(name = "portal-cli")]
#[command(about = "Inspect the device portal route table", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the routes of a running portal
    Routes,
    /// Ask a running portal what a location resolves to
    Resolve { path: String },
    /// Replay navigation steps against a local router ("back" and "forward" move in history)
    Walk {
        #[arg(required = true)]
        steps: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Routes => {
            let res = client
                .get(format!("{}/_portal/routes", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Resolve { path } => {
            let res = client
                .get(format!("{}/_portal/resolve", cli.url))
                .query(&[("path", path)])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Walk { steps } => {
            let mut router = app::build_router(&RoutingConfig::default())?;
            walk(&mut router, &steps)?;
        }
    }

    Ok(())
}

fn walk(router: &mut Router, steps: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut events = router.subscribe();

    for step in steps {
        match step.as_str() {
            "back" => {
                router.back();
            }
            "forward" => {
                router.forward();
            }
            url => {
                router.push(url)?;
            }
        }

        match events.try_recv() {
            Ok(event) => print_event(router, &event),
            Err(_) => println!("{step:<8} (nothing to navigate to)"),
        }
    }
    Ok(())
}

fn print_event(router: &Router, event: &NavigationEvent) {
    let target = match router.current() {
        Some(matched) => {
            let params: Vec<String> = matched
                .params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            format!("{} [{}] {}", matched.name, matched.view.name(), params.join(" "))
        }
        None => "no route".to_string(),
    };
    println!(
        "{:<8} {:<24} -> {}",
        event.kind.as_str(),
        event.to.to_string(),
        target.trim_end()
    );
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: portal returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
