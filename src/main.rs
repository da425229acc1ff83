use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dermalens::domain::{
    ConditionProfile, ImageOutcome, JournalEntry, NaturalCures, SkinAnalysis,
};
use dermalens::AppError;
use dialoguer::Confirm;

#[derive(Parser)]
#[command(name = "derma")]
#[command(version)]
#[command(about = "AI-assisted skincare analysis and advisory", long_about = None)]
struct Cli {
    /// Data directory for the journal and config (defaults to the platform
    /// data dir, or DERMALENS_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose a skin condition from a photo
    #[clap(visible_alias = "a")]
    Analyze {
        /// Path to the photo (png, jpg, webp, gif, bmp)
        image: PathBuf,
    },
    /// Explain a named skin condition
    Explain {
        /// Condition name, e.g. "Eczema"
        condition: String,
    },
    /// Suggest natural remedies and foods for a condition
    Cures {
        condition: String,
    },
    /// Full condition overview: explanation and natural cures together
    Overview {
        condition: String,
    },
    /// Ask a follow-up question about the saved analysis
    #[clap(visible_alias = "c")]
    Chat {
        /// Your question
        question: String,
        /// Start a fresh conversation first
        #[arg(long)]
        reset: bool,
    },
    /// Scan a product's ingredient list photo against a condition
    Scan {
        /// Path to the ingredient-list photo
        image: PathBuf,
        /// Condition to check against (defaults to the saved analysis)
        #[arg(short, long)]
        condition: Option<String>,
    },
    /// Recommend skincare products
    Products {
        /// What you are looking for, e.g. "a gentle daily moisturizer"
        description: Option<String>,
        /// Condition to shop for (defaults to the saved analysis)
        #[arg(short, long)]
        condition: Option<String>,
    },
    /// Recommend yoga poses for skin health
    Yoga {
        /// Condition to target (defaults to the saved analysis)
        #[arg(short, long)]
        condition: Option<String>,
        /// Also generate an illustration per pose
        #[arg(long)]
        illustrate: bool,
        /// Directory for generated illustrations
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Generate images from text prompts
    Illustrate {
        /// One or more prompts, one image each
        #[arg(required = true)]
        prompts: Vec<String>,
        /// Directory for generated images
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Manage the skin journal
    #[clap(visible_alias = "j")]
    Journal {
        #[command(subcommand)]
        command: JournalCommands,
    },
}

#[derive(Subcommand)]
enum JournalCommands {
    /// Save the current analysis with notes and a 0-10 severity
    Add {
        /// Free-text notes for the entry
        #[arg(long, default_value = "")]
        notes: String,
        /// Self-reported severity, 0-10
        #[arg(long)]
        severity: u8,
    },
    /// List saved entries, newest first
    List,
    /// Show one entry by id (prefix accepted)
    Show { id: String },
    /// Delete one entry by id (prefix accepted)
    Delete { id: String },
    /// Delete all entries
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.as_deref();

    let result: Result<(), AppError> = match cli.command {
        Commands::Analyze { image } => dermalens::analyze(&image, data_dir).map(|analysis| {
            print_analysis(&analysis);
            println!();
            println!("Saved as current analysis. Try 'derma chat', 'derma scan', or 'derma journal add'.");
        }),
        Commands::Explain { condition } => {
            dermalens::explain(&condition, data_dir).map(|profile| print_profile(&profile))
        }
        Commands::Cures { condition } => {
            dermalens::natural_cures(&condition, data_dir).map(|cures| print_cures(&cures))
        }
        Commands::Overview { condition } => {
            dermalens::overview(&condition, data_dir).map(|(profile, cures)| {
                print_profile(&profile);
                println!();
                print_cures(&cures);
            })
        }
        Commands::Chat { question, reset } => {
            dermalens::follow_up(&question, reset, data_dir).map(|answer| {
                println!("{}", answer.answer);
            })
        }
        Commands::Scan { image, condition } => {
            dermalens::scan_ingredients(&image, condition, data_dir).map(|report| {
                print_list("Beneficial ingredients", &report.beneficial_ingredients);
                print_list("Potentially harmful ingredients", &report.harmful_ingredients);
                println!("Summary: {}", report.summary);
            })
        }
        Commands::Products { description, condition } => {
            dermalens::recommend_products(condition, description, data_dir).map(|products| {
                println!("Note: recommendations are model-generated, not catalog-backed.");
                println!();
                for (i, item) in products.recommendations.iter().enumerate() {
                    println!("{}. {}", i + 1, item.product_name);
                    println!("   {}", item.reason);
                    println!("   {}", item.purchase_link);
                }
            })
        }
        Commands::Yoga { condition, illustrate, out } => {
            run_yoga(condition, illustrate, &out, data_dir)
        }
        Commands::Illustrate { prompts, out } => run_illustrate(&prompts, &out, data_dir),
        Commands::Journal { command } => run_journal(command, data_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_yoga(
    condition: Option<String>,
    illustrate: bool,
    out: &std::path::Path,
    data_dir: Option<&std::path::Path>,
) -> Result<(), AppError> {
    if !illustrate {
        let poses = dermalens::recommend_yoga(condition, data_dir)?;
        for (i, pose) in poses.recommendations.iter().enumerate() {
            println!("{}. {}", i + 1, pose.pose_name);
            println!("   {}", pose.description);
            println!("   Benefits: {}", pose.benefits);
        }
        return Ok(());
    }

    let illustrated = dermalens::recommend_yoga_illustrated(condition, data_dir)?;
    for (i, item) in illustrated.iter().enumerate() {
        println!("{}. {}", i + 1, item.pose.pose_name);
        println!("   {}", item.pose.description);
        println!("   Benefits: {}", item.pose.benefits);
        match &item.illustration {
            ImageOutcome::Generated(image) => {
                let path = out.join(format!("{}.{}", slugify(&item.pose.pose_name), image.file_extension()));
                std::fs::create_dir_all(out)?;
                std::fs::write(&path, image.bytes())?;
                println!("   Illustration: {}", path.display());
            }
            ImageOutcome::Failed(reason) => {
                eprintln!("   Illustration failed: {}", reason);
            }
        }
    }
    Ok(())
}

fn run_illustrate(
    prompts: &[String],
    out: &std::path::Path,
    data_dir: Option<&std::path::Path>,
) -> Result<(), AppError> {
    let outcomes = dermalens::generate_images(prompts, data_dir)?;

    let mut generated = 0usize;
    for (i, outcome) in outcomes.iter().enumerate() {
        match outcome {
            ImageOutcome::Generated(image) => {
                let path = out.join(format!("image-{}.{}", i + 1, image.file_extension()));
                std::fs::create_dir_all(out)?;
                std::fs::write(&path, image.bytes())?;
                println!("[{}/{}] {}", i + 1, outcomes.len(), path.display());
                generated += 1;
            }
            ImageOutcome::Failed(reason) => {
                eprintln!("[{}/{}] failed: {}", i + 1, outcomes.len(), reason);
            }
        }
    }

    if generated == 0 && !outcomes.is_empty() {
        return Err(AppError::HttpTransport("every image generation failed".to_string()));
    }
    Ok(())
}

fn run_journal(
    command: JournalCommands,
    data_dir: Option<&std::path::Path>,
) -> Result<(), AppError> {
    match command {
        JournalCommands::Add { notes, severity } => {
            let entry = dermalens::journal_add(&notes, severity, data_dir)?;
            println!("✅ Saved journal entry {}", entry.id);
            Ok(())
        }
        JournalCommands::List => {
            let entries = dermalens::journal_list(data_dir)?;
            if entries.is_empty() {
                println!("Journal is empty.");
                return Ok(());
            }
            for entry in entries {
                println!(
                    "{}  {}  {} ({})  severity {}",
                    entry.id,
                    entry.date.format("%Y-%m-%d"),
                    entry.analysis.condition,
                    entry.analysis.severity,
                    entry.self_severity
                );
            }
            Ok(())
        }
        JournalCommands::Show { id } => {
            let entry = dermalens::journal_show(&id, data_dir)?;
            print_entry(&entry);
            Ok(())
        }
        JournalCommands::Delete { id } => {
            let removed = dermalens::journal_delete(&id, data_dir)?;
            println!("✅ Deleted journal entry {}", removed.id);
            Ok(())
        }
        JournalCommands::Clear { yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Permanently delete all journal entries?")
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::InvalidConfig(format!("confirmation failed: {}", e)))?;
                if !confirmed {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            let count = dermalens::journal_clear(data_dir)?;
            println!("✅ Deleted {} journal entries", count);
            Ok(())
        }
    }
}

fn print_analysis(analysis: &SkinAnalysis) {
    println!("Condition: {} ({}, {})", analysis.condition, analysis.severity, analysis.stage);
    println!();
    println!("{}", analysis.explanation);
    println!();
    print_list("Possible causes", &analysis.possible_causes);
    print_list("Related vitamin deficiencies", &analysis.vitamin_deficiencies);
    print_list("Natural remedies", &analysis.natural_remedies);
}

fn print_profile(profile: &ConditionProfile) {
    println!("Condition: {} ({}, {})", profile.condition, profile.severity, profile.stage);
    println!();
    println!("{}", profile.explanation);
    println!();
    print_list("Possible causes", &profile.possible_causes);
    println!("Vitamin deficiencies: {}", profile.vitamin_deficiency);
}

fn print_cures(cures: &NaturalCures) {
    print_list("Natural remedies", &cures.natural_remedies);
    print_list("Recommended foods", &cures.recommended_foods);
}

fn print_entry(entry: &JournalEntry) {
    println!("Entry {}  ({})", entry.id, entry.date.format("%Y-%m-%d %H:%M UTC"));
    println!("Self-reported severity: {}", entry.self_severity);
    if !entry.notes.is_empty() {
        println!("Notes: {}", entry.notes);
    }
    println!();
    print_analysis(&entry.analysis);
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{}:", title);
    for item in items {
        println!("  - {}", item);
    }
}

fn slugify(name: &str) -> String {
    let mut slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }
    slug.trim_matches('-').to_string()
}
