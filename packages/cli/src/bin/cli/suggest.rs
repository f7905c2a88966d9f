use clap::Args;
use colored::*;
use guilted_cli::client::GiftClient;
use guilted_cli::config::Config;
use guilted_cli::views::{self, IdeaAction, RecipeAction};
use guilted_core::{GiftType, LoveLanguages, PreferencesInput};
use guilted_gifts::{GiftError, GiftSession, LoadState, View};

#[derive(Args)]
pub struct SuggestArgs {
    /// Server base URL (overrides GUILTED_SERVER_URL)
    #[arg(long)]
    server: Option<String>,
    /// Friend's interests
    #[arg(long)]
    interests: Option<String>,
    /// Friend's love language; repeat for several
    #[arg(long = "love-language")]
    love_language: Vec<String>,
    /// Budget, e.g. "$40"
    #[arg(long)]
    budget: Option<String>,
    /// Occasion, e.g. "Birthday"
    #[arg(long)]
    occasion: Option<String>,
    /// Your own skills and preferences
    #[arg(long)]
    gifter_preferences: Option<String>,
    /// Time you have to make the gift
    #[arg(long)]
    time_available: Option<String>,
    /// Solo or group gift
    #[arg(long)]
    gift_type: Option<GiftType>,
}

impl SuggestArgs {
    fn preferences(&mut self) -> PreferencesInput {
        PreferencesInput {
            interests: self.interests.take(),
            love_language: Some(LoveLanguages::new(std::mem::take(&mut self.love_language))),
            budget: self.budget.take(),
            occasion: self.occasion.take(),
            gifter_preferences: self.gifter_preferences.take(),
            time_available: self.time_available.take(),
            gift_type: self.gift_type.take().map(|g| g.as_str().to_string()),
        }
    }
}

pub async fn run(mut args: SuggestArgs) -> anyhow::Result<()> {
    let server_url = match args.server.take() {
        Some(url) => url,
        None => Config::from_env()?.server_url,
    };

    let mut session = GiftSession::new(GiftClient::new(&server_url)?);
    // Flags only prefill the first form; "start over" asks again
    let mut prefilled = Some(args.preferences());

    loop {
        match session.view() {
            View::Form => {
                let prefs = views::prompt_preferences(prefilled.take().unwrap_or_default())?;
                println!("{}", "Generating gift ideas...".dimmed());
                if let Err(e) = session.submit(prefs).await {
                    print_error(&e);
                }
            }
            View::Ideas => {
                if session.ideas_state() == &LoadState::Loaded {
                    println!("{}", "💡 Gift Ideas".blue().bold());
                    println!("{}", views::render_ideas(session.ideas()));
                }

                match views::choose_idea_action(session.ideas())? {
                    IdeaAction::Select(index) => {
                        println!("{}", "Generating gift recipe...".dimmed());
                        let result = session.select(index).await.map(|_| ());
                        if let Err(e) = result {
                            print_error(&e);
                            session.back();
                        }
                    }
                    IdeaAction::Regenerate => {
                        println!("{}", "Generating new gift ideas...".dimmed());
                        if let Err(e) = session.regenerate().await {
                            print_error(&e);
                        }
                    }
                    IdeaAction::StartOver => session.reset(),
                    IdeaAction::Quit => return Ok(()),
                }
            }
            View::Recipe => {
                if let Some(recipe) = session.recipe() {
                    println!();
                    println!("{}", views::render_recipe(recipe));
                    println!();
                }

                match views::choose_recipe_action()? {
                    RecipeAction::Back => session.back(),
                    RecipeAction::StartOver => session.reset(),
                    RecipeAction::Quit => return Ok(()),
                }
            }
        }
    }
}

fn print_error(err: &GiftError) {
    eprintln!("{} {}", "✗".red().bold(), err.to_string().red());
    eprintln!("{}", views::error_hint(err).dimmed());
}
