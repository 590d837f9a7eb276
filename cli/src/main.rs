use std::path::PathBuf;

use clap::{Parser, Subcommand};
use masterclass::auth::{UserClaims, generate_token};
use masterclass::catalog::{CatalogQuery, Selection, SortOrder, query};
use masterclass::error::AppResult;
use masterclass::model::entity::Course;
use masterclass::model::{CourseRepository, ModelManager, StaticCatalog};
use masterclass::utils::format::{format_category_name, format_time};

#[derive(Parser, Debug)]
#[command(about = "Browse the masterclass catalog and mint dev tokens", long_about = None)]
pub struct Cli {
    /// Catalog document to read instead of the bundled one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search, filter and sort the catalog
    Courses {
        #[arg(long, default_value = "")]
        search: String,
        /// Category slug, repeatable
        #[arg(long)]
        category: Vec<String>,
        /// Level name, repeatable
        #[arg(long)]
        level: Vec<String>,
        /// Required feature, repeatable
        #[arg(long)]
        feature: Vec<String>,
        #[arg(long, default_value = "Most Popular")]
        sort: String,
    },

    /// Show one course with its curriculum
    Course { id: u32 },

    /// List category slugs with display names
    Categories,

    /// Mint a JWT for the `SID` cookie
    Token {
        #[arg(long)]
        user_id: Option<uuid::Uuid>,
        #[arg(long, default_value_t = 0)]
        loyalty_points: u32,
        #[arg(long, default_value_t = 24)]
        hours: i64,
        /// Signing secret, `JWT_SECRET` from the environment by default
        #[arg(long, env = "JWT_SECRET")]
        secret: String,
    },
}

fn print_course_row(course: &Course) {
    let discount = match course.discount_percent() {
        0 => String::new(),
        off => format!(" (-{off}%)"),
    };
    println!(
        "{:>3}  {:<55} {:<14} {:>4.1}  {:>7} students  {}{}",
        course.id(),
        course.title(),
        course.level(),
        course.rating(),
        course.students(),
        course.price(),
        discount,
    );
}

fn print_course_detail(course: &Course) {
    println!("{} [{}]", course.title(), format_category_name(course.category()));
    println!("by {}, {} lessons, {}", course.instructor(), course.lesson_count(), course.duration());
    if let Some(progress) = course.progress() {
        println!("progress: {progress}%");
    }
    println!();

    for module in course.curriculum() {
        println!("{}. {}", module.id(), module.title());
        for lesson in module.lessons() {
            let mark = if lesson.is_completed() { "x" } else { " " };
            let length = lesson
                .duration_secs()
                .map(|secs| format_time(secs.into()))
                .unwrap_or_else(|| lesson.duration().to_string());
            println!(
                "   [{mark}] {:>3} {:<50} {:>6} {:?}",
                lesson.id(),
                lesson.title(),
                length,
                lesson.lesson_type()
            );
        }
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let catalog = match &args.catalog {
        Some(path) => StaticCatalog::load(path)?,
        None => StaticCatalog::seed()?,
    };
    let mm = ModelManager::new(catalog);

    match args.command {
        Commands::Courses {
            search,
            category,
            level,
            feature,
            sort,
        } => {
            let mut params = CatalogQuery::new()
                .with_search(search)
                .with_categories(Selection::from_params(category))
                .with_levels(Selection::from_params(level))
                .with_sort(SortOrder::parse_lenient(&sort));
            for f in feature {
                params = params.with_feature(f);
            }

            let all = mm.repo().all().await;
            let found = query(&all, &params);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&found).unwrap_or_default());
            } else {
                found.iter().for_each(print_course_row);
                println!("Showing {} of {} courses", found.len(), all.len());
            }
        }

        Commands::Course { id } => match mm.repo().find_by_id(id).await {
            Some(course) if args.json => {
                println!("{}", serde_json::to_string_pretty(&course).unwrap_or_default());
            }
            Some(course) => print_course_detail(&course),
            None => {
                eprintln!("course {id} not found");
                std::process::exit(1);
            }
        },

        Commands::Categories => {
            for slug in mm.repo().categories().await {
                println!("{:<30} {}", slug, format_category_name(&slug));
            }
        }

        Commands::Token {
            user_id,
            loyalty_points,
            hours,
            secret,
        } => {
            let user_id = user_id.unwrap_or_else(uuid::Uuid::new_v4);
            let claims = UserClaims::new(user_id, loyalty_points, chrono::Duration::hours(hours));
            match generate_token(&claims, &secret) {
                Ok(token) => println!("{token}"),
                Err(e) => {
                    eprintln!("unable to sign token: {e}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
