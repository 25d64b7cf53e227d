use clap::Parser;
use log::warn;
use recipe_import::{load_config, ImportConfig, RecipeImporter};

#[derive(Parser, Debug)]
#[command(name = "recipe-import")]
#[command(about = "Extract clean recipe records from web pages", long_about = None)]
struct Args {
    /// Recipe page URLs
    #[arg(required = true)]
    urls: Vec<String>,

    /// Print each record as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = load_config().unwrap_or_else(|e| {
        warn!("Ignoring configuration: {e}");
        ImportConfig::default()
    });
    let importer = match RecipeImporter::new(config) {
        Ok(importer) => importer,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            std::process::exit(1);
        }
    };

    let mut failed = false;
    for url in &args.urls {
        let recipe = match importer.import(url).await {
            Ok(recipe) => recipe,
            Err(e) => {
                eprintln!("[ERROR] {url}: {e}");
                failed = true;
                continue;
            }
        };

        if args.json {
            match serde_json::to_string_pretty(&recipe) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("[ERROR] {url}: {e}");
                    failed = true;
                }
            }
        } else {
            println!("{recipe}");
        }
    }

    if failed {
        std::process::exit(1);
    }
}
