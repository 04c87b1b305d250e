use crate::api::validation::MAX_RANDOM_COUNT;
use crate::cli::SearchKind;
use crate::config::Config;
use crate::domain::SearchCriteria;
use crate::state::SharedState;

use super::print_recipes;

pub async fn cmd_search(config: &Config, kind: SearchKind, query: &str) -> anyhow::Result<()> {
    let criteria = kind.criteria(query)?;
    println!("Searching by {}: {query}", criteria.label());
    run_search(config, &criteria, &format!("No recipes found matching '{query}'")).await
}

pub async fn cmd_ingredients(config: &Config, list: &str) -> anyhow::Result<()> {
    let criteria = SearchCriteria::ingredient_set_from_csv(list);
    if let SearchCriteria::ByIngredientSet(set) = &criteria {
        if set.is_empty() {
            anyhow::bail!("Give at least one ingredient, e.g. gitchen ingredients egg,milk");
        }
        println!(
            "Recipes with {}",
            set.iter().cloned().collect::<Vec<_>>().join(" + ")
        );
    }
    run_search(config, &criteria, "No recipe uses all of those ingredients").await
}

pub async fn cmd_random(config: &Config, count: Option<usize>) -> anyhow::Result<()> {
    let count = random_count(count, config.provider.random_sample_size);
    run_search(config, &SearchCriteria::RandomSample(count), "No recipes drawn").await
}

/// Draw count for `gitchen random`, kept within the provider fan-out bound.
fn random_count(requested: Option<usize>, default: usize) -> usize {
    requested.unwrap_or(default).clamp(1, MAX_RANDOM_COUNT)
}

async fn run_search(
    config: &Config,
    criteria: &SearchCriteria,
    empty_message: &str,
) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let results = state.search_service.search(criteria).await;

    if results.is_empty() {
        println!("{empty_message}");
        return Ok(());
    }

    println!();
    println!("{} recipes:", results.len());
    print_recipes(&results);
    println!("To see a recipe: gitchen show <id>");
    Ok(())
}
