use crate::config::Config;
use crate::services::SearchError;
use crate::state::SharedState;

use super::print_recipes;

pub async fn cmd_show(config: &Config, id: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    let rated = match state.search_service.lookup_recipe(id).await {
        Ok(r) => r,
        Err(SearchError::NotFound(_)) => {
            println!("Recipe {id} not found");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let recipe = &rated.recipe;

    println!();
    println!("{}", recipe.name);
    println!("{:=<60}", "");
    if let Some(category) = &recipe.category {
        println!("Category: {category}");
    }
    if let Some(area) = &recipe.area {
        println!("Area:     {area}");
    }
    if !recipe.tags.is_empty() {
        println!("Tags:     {}", recipe.tags.join(", "));
    }
    if rated.review_count > 0 {
        println!("Rating:   ★ {:.1} ({} reviews)", rated.rating, rated.review_count);
    } else {
        println!("Rating:   no reviews yet");
    }

    println!();
    println!("Ingredients:");
    for line in &recipe.ingredients {
        if line.measure.is_empty() {
            println!("  - {}", line.ingredient);
        } else {
            println!("  - {} ({})", line.ingredient, line.measure);
        }
    }

    if let Some(instructions) = &recipe.instructions {
        println!();
        println!("Instructions:");
        println!("{instructions}");
    }

    if let Some(video) = &recipe.video_url {
        println!();
        println!("Video:  {video}");
    }
    if let Some(source) = &recipe.source_url {
        println!("Source: {source}");
    }

    let reviews = state.review_service.list(&recipe.id).await?;
    if !reviews.is_empty() {
        println!();
        println!("Reviews:");
        for review in &reviews {
            println!("  {} - {}/5: {}", review.user_name, review.rating, review.comment);
        }
    }

    let limit = config.provider.recommendation_limit;
    let recommendations = state
        .search_service
        .recommend(
            recipe.category.as_deref(),
            recipe.area.as_deref(),
            &recipe.id,
            limit,
        )
        .await;
    if !recommendations.is_empty() {
        println!();
        println!("You might also like:");
        print_recipes(&recommendations);
    }

    Ok(())
}
