use log::{debug, error};
use pantry_chef::{Kitchen, RecipeController, SessionView};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  <ingredient>       add an ingredient (same as `add <ingredient>`)
  remove <name>      remove an ingredient
  clear              empty the list
  list               show the current list
  recipe             ask for a recipe
  cancel             stop waiting for the current recipe
  help               show this message
  quit               leave";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let controller = Kitchen::builder().build().map_err(|e| {
        error!("Could not set up the kitchen: {}", e);
        e
    })?;
    debug!("Using provider {}", controller.provider_name());

    println!("{}\n", HELP);
    render(&controller.view().await);

    // Redraw whenever a background request changes the session.
    let mut updates = controller.subscribe();
    updates.borrow_and_update();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = updates.borrow_and_update().clone();
                render(&view);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !dispatch(&controller, line.trim()).await {
                    break;
                }
                // Commands render their own result.
                updates.borrow_and_update();
            }
        }
    }

    Ok(())
}

/// One line of input
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Nothing,
    Quit,
    Help,
    List,
    Add(&'a str),
    Remove(&'a str),
    Clear,
    Recipe,
    Cancel,
}

/// Keywords only count on their own, or with an argument for `add` and
/// `remove`. Anything else is an ingredient, so "clear broth" is added.
fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    let (keyword, argument) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    match (keyword, argument.is_empty()) {
        ("", _) => Command::Nothing,
        ("add", false) => Command::Add(argument),
        ("remove" | "rm", false) => Command::Remove(argument),
        ("quit" | "exit", true) => Command::Quit,
        ("help", true) => Command::Help,
        ("list", true) => Command::List,
        ("clear", true) => Command::Clear,
        ("recipe" | "generate", true) => Command::Recipe,
        ("cancel", true) => Command::Cancel,
        _ => Command::Add(line),
    }
}

/// Run one command. Returns false to quit.
async fn dispatch(controller: &RecipeController, line: &str) -> bool {
    match parse_command(line) {
        Command::Nothing => return true,
        Command::Quit => return false,
        Command::Help => {
            println!("{}", HELP);
            return true;
        }
        Command::List => {}
        Command::Add(ingredient) => {
            controller.set_draft(ingredient).await;
            if let Err(e) = controller.submit_draft().await {
                debug!("Ingredient rejected: {:?}", e);
            }
        }
        Command::Remove(name) => {
            if !controller.remove_ingredient(name).await {
                println!("\"{}\" is not in the list.", name);
            }
        }
        Command::Clear => controller.clear_ingredients().await,
        Command::Recipe => {
            let background = controller.clone();
            tokio::spawn(async move {
                if let Err(e) = background.request_recipe().await {
                    debug!("Recipe request not started: {}", e);
                }
            });
            return true;
        }
        Command::Cancel => {
            if !controller.cancel_request().await {
                println!("No recipe request is running.");
            }
        }
    }

    render(&controller.view().await);
    true
}

fn render(view: &SessionView) {
    if let Some(error) = &view.error {
        println!("❌ {}", error);
    }
    if let Some(warning) = &view.warning {
        println!("⚠️  {}", warning);
    }

    if let Some(prompt) = &view.empty_prompt {
        println!("{}", prompt);
    } else {
        println!("Ingredients on hand:");
        for ingredient in &view.ingredients {
            println!("  - {}", ingredient);
        }
        let generate = if view.can_generate {
            format!("[{}] (type `recipe`)", view.generate_label)
        } else {
            format!("[{}]", view.generate_label)
        };
        println!("{}  [{}]", generate, view.clear_label);
        if let Some(hint) = &view.hint {
            println!("💡 {}", hint);
        }
    }

    if let Some(message) = &view.loading_message {
        println!("🧑‍🍳 {}", message);
    }
    if let Some(recipe) = &view.recipe {
        println!("\n{}\n", recipe);
    }
}
