use baking_time::{load_settings, Recipe, RecipeClient};
use clap::Parser;
use log::debug;

/// Fetch a baking recipe feed and print it
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Feed URL (defaults to recipes_url from the settings)
    url: Option<String>,

    /// Print the recipes as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Settings file name, extension optional
    #[arg(long, default_value = "config")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let settings = load_settings(&args.config)?;
    debug!("{:?}", settings);

    let url = args.url.unwrap_or_else(|| settings.recipes_url.clone());
    let client = RecipeClient::from_settings(&settings)?;

    let recipes = match client.try_fetch_recipes(&url).await {
        Ok(recipes) => recipes,
        Err(e) => {
            eprintln!("Could not fetch recipes from {url}: {e}");
            std::process::exit(1);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
    } else {
        for recipe in &recipes {
            print!("{}", render(recipe));
        }
    }

    Ok(())
}

fn render(recipe: &Recipe) -> String {
    let mut out = format!(
        "# {}\nServings: {}\n\n{}\n",
        recipe.name, recipe.servings, recipe.ingredients
    );

    for (i, step) in recipe.steps.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, step.description));
        if step.has_video() {
            out.push_str(&format!("   Video: {}\n", step.video_url));
        }
    }

    out.push('\n');
    out
}
