use crate::clients::{MealDbClient, RecipeProvider};
use crate::config::Config;
use crate::reading::{JsonFileStore, ReadingProgress, segment_paragraphs};
use crate::state::build_shared_http_client;

pub async fn cmd_read(
    config: &Config,
    id: &str,
    mark: Option<usize>,
    unmark: Option<usize>,
    reset: bool,
) -> anyhow::Result<()> {
    let client = MealDbClient::with_shared_client(
        build_shared_http_client(config.provider.request_timeout_seconds.into())?,
        config.provider.base_url.clone(),
    );

    let Some(recipe) = client.lookup(id).await? else {
        println!("Recipe {id} not found");
        return Ok(());
    };

    let paragraphs = segment_paragraphs(recipe.instructions.as_deref().unwrap_or_default());
    if paragraphs.is_empty() {
        println!("{} has no instructions", recipe.name);
        return Ok(());
    }

    let store = JsonFileStore::new(config.state_dir().join("reading.json"));
    let mut progress = ReadingProgress::load(&store, &recipe.id)?;

    for index in [mark, unmark].into_iter().flatten() {
        if index >= paragraphs.len() {
            anyhow::bail!(
                "Paragraph {index} does not exist ({} paragraphs)",
                paragraphs.len()
            );
        }
    }

    if reset {
        progress.reset()?;
    }
    if let Some(index) = mark {
        progress.mark(index)?;
    }
    if let Some(index) = unmark {
        progress.unmark(index)?;
    }

    println!("{}", recipe.name);
    println!("{:-<60}", "");
    for (i, paragraph) in paragraphs.iter().enumerate() {
        let tick = if progress.is_checked(i) { "x" } else { " " };
        println!("[{tick}] {i:>2}  {paragraph}");
    }
    println!();
    println!(
        "{}/{} read. Mark one with: gitchen read {} --mark <n>",
        progress.checked().len(),
        paragraphs.len(),
        recipe.id
    );

    Ok(())
}
