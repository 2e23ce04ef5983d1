use clap::{ArgAction, Parser, Subcommand};
use log::{debug, LevelFilter};

use recipe_nutrition::config::load_config;
use recipe_nutrition::{
    AppError, FileStorage, Ingredient, IngredientName, InputProvider, NutritionClient,
    NutritionResolver, Outcome, Recipe, RecipeDraft, RecipeStore, TerminalInput,
};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file, without extension
    #[arg(long, default_value = "config", global = true)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List saved recipes
    List,
    /// Show one recipe with its nutrition totals
    Show { id: String },
    /// Save a new recipe
    Add(RecipeArgs),
    /// Update a saved recipe; only the given parts are replaced
    Edit {
        id: String,
        #[command(flatten)]
        recipe: RecipeArgs,
    },
    /// Delete a saved recipe
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Look up nutrition for an ingredient, adding it to the catalog if missing
    Nutrition { name: String },
    /// Look up nutrition for every ingredient of a saved recipe
    Enrich { id: String },
}

#[derive(Debug, clap::Args)]
struct RecipeArgs {
    /// Recipe title
    #[arg(short, long)]
    title: Option<String>,

    /// Ingredient as name:amount:unit (repeatable)
    #[arg(short, long = "ingredient")]
    ingredients: Vec<Ingredient>,

    /// Cooking step (repeatable, in order)
    #[arg(short, long = "step")]
    steps: Vec<String>,
}

impl RecipeArgs {
    fn apply(self, draft: &mut RecipeDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if !self.ingredients.is_empty() {
            draft.ingredients = self.ingredients;
        }
        if !self.steps.is_empty() {
            draft.steps = self.steps;
        }
    }
}

struct App {
    store: RecipeStore<FileStorage>,
    resolver: NutritionResolver,
    input: TerminalInput,
}

impl App {
    fn recipe(&self, id: &str) -> Result<Recipe, AppError> {
        self.store
            .get(id)
            .ok_or_else(|| AppError::RecipeNotFound(id.to_string()))
    }

    fn save(&mut self, draft: &RecipeDraft) -> Result<(), AppError> {
        let recipe = draft.build()?;
        debug!("Saving recipe {}", recipe.id);
        self.store.save(recipe, draft.is_edit())?;

        self.input.notify(if draft.is_edit() {
            "Recipe updated successfully!"
        } else {
            "Recipe saved successfully!"
        });
        Ok(())
    }

    async fn run(&mut self, command: Command) -> Result<(), AppError> {
        match command {
            Command::List => {
                for recipe in self.store.load_all() {
                    println!(
                        "{}  {}  ({} ingredients • {} steps, {})",
                        recipe.id,
                        recipe.title,
                        recipe.ingredients.len(),
                        recipe.steps.len(),
                        recipe.created_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
            Command::Show { id } => print_recipe(&self.recipe(&id)?),
            Command::Add(args) => {
                let mut draft = RecipeDraft::default();
                args.apply(&mut draft);
                self.save(&draft)?;
            }
            Command::Edit { id, recipe } => {
                let mut draft = RecipeDraft::edit(&self.recipe(&id)?);
                recipe.apply(&mut draft);
                self.save(&draft)?;
            }
            Command::Delete { id, yes } => {
                if yes
                    || self
                        .input
                        .confirm("Are you sure you want to delete this recipe?")
                {
                    self.store.delete(&id)?;
                }
            }
            Command::Nutrition { name } => match IngredientName::parse(&name) {
                Ok(name) => {
                    let outcome = self.resolver.resolve(&name, &mut self.input).await;
                    self.report(&name, &outcome);
                }
                Err(e) => self.input.notify(&e.to_string()),
            },
            Command::Enrich { id } => {
                let mut draft = RecipeDraft::edit(&self.recipe(&id)?);
                for index in 0..draft.ingredients.len() {
                    let name = match draft.ingredient_name(index) {
                        Ok(name) => name,
                        Err(e) => {
                            self.input.notify(&e.to_string());
                            continue;
                        }
                    };
                    let outcome = self.resolver.resolve(&name, &mut self.input).await;
                    self.report(&name, &outcome);
                    if let Some(nutrition) = outcome.nutrition() {
                        draft.set_nutrition(index, nutrition);
                    }
                }
                self.save(&draft)?;
            }
        }
        Ok(())
    }

    fn report(&mut self, name: &IngredientName, outcome: &Outcome) {
        if let Some(message) = outcome.message() {
            self.input.notify(message);
        }
        if let Some(nutrition) = outcome.nutrition() {
            println!("{}: {}", name, nutrition);
        }
    }
}

fn print_recipe(recipe: &Recipe) {
    println!("{}", recipe.title);
    println!("created {}", recipe.created_at.format("%Y-%m-%d %H:%M"));
    println!();
    for ingredient in &recipe.ingredients {
        let amount = format!("{} {}", ingredient.amount, ingredient.unit);
        match &ingredient.nutrition {
            Some(n) => println!("- {} {} ({})", amount.trim(), ingredient.name, n),
            None => println!("- {} {}", amount.trim(), ingredient.name),
        }
    }
    println!();
    for (i, step) in recipe.steps.iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }
    if let Some(total) = recipe.total_nutrition() {
        println!();
        println!("Total: {}", total);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = load_config(&cli.config)?;
    debug!("{:?}", config);

    let mut app = App {
        store: RecipeStore::new(FileStorage::new(&config.storage.data_dir)),
        resolver: NutritionResolver::new(NutritionClient::new(&config.nutrition)?),
        input: TerminalInput,
    };
    app.run(cli.command).await
}
