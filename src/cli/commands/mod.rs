mod favorites;
mod read;
mod search;
mod show;

pub use favorites::{cmd_favorites_add, cmd_favorites_clear, cmd_favorites_list, cmd_favorites_remove};
pub use read::cmd_read;
pub use search::{cmd_ingredients, cmd_random, cmd_search};
pub use show::cmd_show;

use crate::models::recipe::RatedRecipe;

fn print_recipes(recipes: &[RatedRecipe]) {
    println!("{:-<60}", "");
    for item in recipes {
        let r = &item.recipe;
        println!("• {} (ID: {})", r.name, r.id);

        let origin: Vec<&str> = [r.category.as_deref(), r.area.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !origin.is_empty() {
            println!("  {}", origin.join(" | "));
        }

        if item.review_count > 0 {
            println!("  ★ {:.1} ({} reviews)", item.rating, item.review_count);
        }
    }
    println!();
}
