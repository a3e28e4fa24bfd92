use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use onlearn_cli::{category_names, find_profile, seed_categories, set_role};
use onlearn_db::{DatabaseConfig, init_db_pool};
use onlearn_models::Role;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "onlearn-cli")]
#[command(about = "OnLearn CLI - Administrative tools for OnLearn", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign a role to an existing profile (use it to create the first admin)
    SetRole {
        /// Profile id (same as the identity provider's user id)
        #[arg(short = 'u', long)]
        user_id: Uuid,

        /// One of: client, pending_instructor, instructor, admin
        #[arg(short = 'r', long)]
        role: Role,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Insert course categories, skipping existing names
    SeedCategories {
        /// Category names; a default set is used when empty
        names: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::SetRole { user_id, role, yes } => {
            let Some(profile) = find_profile(&pool, user_id).await? else {
                bail!("No profile found with id {}", user_id);
            };

            let current = profile
                .role
                .map(|r| r.to_string())
                .unwrap_or_else(|| "none".to_string());

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Change role of {} from {} to {}?",
                        profile.email.as_deref().unwrap_or("<no email>"),
                        current,
                        role
                    ))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("Aborted.");
                    return Ok(());
                }
            }

            set_role(&pool, user_id, role).await?;
            println!("✅ Role of {} set to {}", user_id, role);
        }
        Commands::SeedCategories { names } => {
            let names = category_names(names);
            let created = seed_categories(&pool, &names).await?;

            println!(
                "✅ {} categories created ({} already existed)",
                created.len(),
                names.len() - created.len()
            );
            for category in created {
                println!("   {} {}", category.id, category.name);
            }
        }
    }

    Ok(())
}
