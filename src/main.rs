use std::env;
use std::process;

use fridgechef::{
    default_provider, flows, parse_ingredient_list, FlowError, Language, SubstitutionRequest,
};

const USAGE: &str = "Usage:
  fridgechef suggest <comma-separated ingredients> [--language en|ar]
  fridgechef substitute <recipe name> <missing ingredient> <comma-separated available> [--language en|ar]";

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), FlowError> {
    let mut language = Language::En;
    let mut positional: Vec<String> = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--language" || arg == "-l" {
            let tag = args
                .next()
                .ok_or_else(|| FlowError::InvalidInput("--language requires a value".to_string()))?;
            language = Language::from_tag(&tag)
                .ok_or_else(|| FlowError::InvalidInput(format!("unknown language '{tag}'")))?;
        } else {
            positional.push(arg);
        }
    }

    match positional.first().map(String::as_str) {
        Some("suggest") => {
            let raw = positional
                .get(1)
                .ok_or_else(|| FlowError::InvalidInput(USAGE.to_string()))?;
            let ingredients = parse_ingredient_list(raw);

            let provider = default_provider()?;
            let suggestions =
                flows::suggest_recipes(provider.as_ref(), &ingredients, language).await?;

            if suggestions.recipes.is_empty() {
                println!("No recipes found.");
                return Ok(());
            }
            for recipe in &suggestions.recipes {
                println!("## {}", recipe.name);
                println!();
                for ingredient in &recipe.ingredients {
                    println!("- {ingredient}");
                }
                println!();
                println!("{}", recipe.instructions);
                println!();
            }
            Ok(())
        }
        Some("substitute") => {
            let recipe_name = positional
                .get(1)
                .ok_or_else(|| FlowError::InvalidInput(USAGE.to_string()))?;
            let original_ingredient = positional
                .get(2)
                .ok_or_else(|| FlowError::InvalidInput(USAGE.to_string()))?;
            let available = positional
                .get(3)
                .ok_or_else(|| FlowError::InvalidInput(USAGE.to_string()))?;

            let request = SubstitutionRequest {
                recipe_name: recipe_name.clone(),
                original_ingredient: original_ingredient.clone(),
                available_ingredients: parse_ingredient_list(available),
                language,
            };

            let provider = default_provider()?;
            let substitution = flows::substitute_ingredient(provider.as_ref(), &request).await?;

            if substitution.suggested_substitutes.is_empty() {
                println!("No substitutes found for '{original_ingredient}'.");
            } else {
                println!("Substitutes for '{original_ingredient}':");
                for substitute in &substitution.suggested_substitutes {
                    println!("- {substitute}");
                }
            }
            println!();
            println!("{}", substitution.reasoning);
            Ok(())
        }
        _ => Err(FlowError::InvalidInput(USAGE.to_string())),
    }
}
