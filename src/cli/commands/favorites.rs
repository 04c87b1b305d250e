use crate::config::Config;
use crate::identity::{IdentityProvider, SessionIdentity, UserIdentity};
use crate::services::{AddOutcome, RemoveOutcome};
use crate::state::SharedState;

fn current_user(config: &Config) -> anyhow::Result<UserIdentity> {
    SessionIdentity::from_config(&config.identity)
        .current_user()
        .ok_or_else(|| {
            anyhow::anyhow!("No user configured. Set [identity] user_id in config.toml")
        })
}

pub async fn cmd_favorites_list(config: &Config) -> anyhow::Result<()> {
    let user = current_user(config)?;
    let state = SharedState::new(config.clone()).await?;

    let favorites = state.favorite_service.list(&user.id).await?;
    if favorites.is_empty() {
        println!("{} has no favorites yet", user.name);
        return Ok(());
    }

    let recipes = state.search_service.favorite_recipes(favorites).await;
    println!("Favorites of {}:", user.name);
    println!("{:-<60}", "");
    for fav in &recipes {
        println!("• {} (ID: {})", fav.title, fav.favorite.meal_id);
        println!("  Added: {}", fav.favorite.added_at);
    }

    Ok(())
}

pub async fn cmd_favorites_add(config: &Config, meal_id: &str) -> anyhow::Result<()> {
    let user = current_user(config)?;
    let state = SharedState::new(config.clone()).await?;

    let Some(recipe) = state.provider.lookup(meal_id).await? else {
        println!("Recipe {meal_id} not found");
        return Ok(());
    };

    match state
        .favorite_service
        .add(&user.id, &recipe.id, &recipe.name)
        .await?
    {
        AddOutcome::Added => println!("✓ Added {} to favorites", recipe.name),
        AddOutcome::AlreadyExists => println!("{} is already a favorite", recipe.name),
    }
    Ok(())
}

pub async fn cmd_favorites_remove(config: &Config, meal_id: &str) -> anyhow::Result<()> {
    let user = current_user(config)?;
    let state = SharedState::new(config.clone()).await?;

    match state.favorite_service.remove(&user.id, meal_id).await? {
        RemoveOutcome::Removed => println!("✓ Removed {meal_id} from favorites"),
        RemoveOutcome::NotFound => println!("{meal_id} is not a favorite"),
    }
    Ok(())
}

pub async fn cmd_favorites_clear(config: &Config) -> anyhow::Result<()> {
    let user = current_user(config)?;
    let state = SharedState::new(config.clone()).await?;

    let removed = state.favorite_service.clear_all(&user.id).await?;
    println!("✓ Removed {removed} favorites");
    Ok(())
}
