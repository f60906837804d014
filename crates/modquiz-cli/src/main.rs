//! The `modquiz` command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "modquiz", version, about = "Course authoring and quiz grading")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored courses
    ListCourses,

    /// List the modules of a course
    ListModules {
        /// Course id
        #[arg(long)]
        course: i64,
    },

    /// Export a course to an XML directory
    ExportCourse {
        /// Course id
        #[arg(long)]
        course: i64,

        /// Output directory (default: export_dir from config)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Import a course from an XML directory
    ImportCourse {
        /// Directory containing course.xml
        #[arg(long)]
        input: PathBuf,
    },

    /// Delete a course and everything it owns
    DeleteCourse {
        /// Course id
        #[arg(long)]
        course: i64,
    },

    /// Check an XML course directory for authoring problems
    Validate {
        /// Directory containing course.xml
        #[arg(long)]
        input: PathBuf,
    },

    /// Grade a module quiz from a JSON answers file and record the attempt
    Grade {
        /// Module id
        #[arg(long)]
        module: i64,

        /// JSON object mapping question id to answer
        #[arg(long)]
        answers: PathBuf,
    },

    /// Show recorded attempts
    Report {
        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::ListCourses => commands::list_courses::execute(config),
        Commands::ListModules { course } => commands::list_modules::execute(course, config),
        Commands::ExportCourse { course, output } => {
            commands::export::execute(course, output, config)
        }
        Commands::ImportCourse { input } => commands::import::execute(input, config),
        Commands::DeleteCourse { course } => commands::delete::execute(course, config),
        Commands::Validate { input } => commands::validate::execute(input),
        Commands::Grade { module, answers } => commands::grade::execute(module, answers, config),
        Commands::Report { format } => commands::report::execute(format, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
