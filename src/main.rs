use std::path::PathBuf;

use assembly_bom::commands::{self, PageSize};
use assembly_bom::config::BomConfig;
use assembly_bom::info::{self, InfoChanges};
use assembly_bom::{Result, ToolError};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&cli.log_level).and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|error| ToolError::Logging(error.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Bom(args) => execute_bom(args),
        Command::Info(args) => execute_info(args),
        Command::TitleBlock(args) => execute_title_block(args),
    }
}

fn execute_bom(args: BomArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => BomConfig::load(path)?,
        None => BomConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(title) = args.title {
        config.title = title;
    }
    if let Some(sheet_name) = args.sheet_name {
        config.sheet_name = sheet_name;
    }
    if args.required_from_model {
        config.use_required_info = true;
    }
    if !args.required.is_empty() {
        config.required_fields = Some(args.required);
    }

    let grid = commands::make_bom_sheet(&args.input, &args.output, &config)?;
    println!(
        "wrote {} part(s) across {} column(s) to {}",
        grid.body().len(),
        grid.width(),
        args.output.display()
    );
    Ok(())
}

fn execute_info(args: InfoArgs) -> Result<()> {
    let record = match args.action {
        InfoAction::Show => commands::show_info(&args.input, &args.part)?,
        InfoAction::Add { name } => {
            let stored = commands::add_info_field(&args.input, &args.part, &name)?;
            println!("added field {stored}");
            commands::show_info(&args.input, &args.part)?
        }
        InfoAction::Set { fields } => {
            let mut changes = InfoChanges::new();
            for field in &fields {
                let (key, value) = info::parse_assignment(field)?;
                changes = changes.set(key, value);
            }
            commands::edit_info(&args.input, &args.part, &changes)?
        }
        InfoAction::Remove { fields } => {
            let changes = fields
                .into_iter()
                .fold(InfoChanges::new(), InfoChanges::mark_for_deletion);
            commands::edit_info(&args.input, &args.part, &changes)?
        }
    };

    for (key, value) in record.iter() {
        println!("{}: {}", info::display_label(key), value);
    }
    Ok(())
}

fn execute_title_block(args: TitleBlockArgs) -> Result<()> {
    let page = PageSize {
        width: args.page_width,
        height: args.page_height,
    };
    let fields =
        commands::make_title_block(&args.input, &args.template, &args.output, &args.date, page)?;
    println!("filled {} field(s) into {}", fields.len(), args.output.display());
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate bills of materials and manage part information for assemblies."
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the bill of materials of an assembly to a workbook.
    Bom(BomArgs),
    /// Inspect or edit the information fields of a part.
    Info(InfoArgs),
    /// Fill the title block fields of a drawing template.
    TitleBlock(TitleBlockArgs),
}

#[derive(clap::Args)]
struct BomArgs {
    /// Assembly document (JSON).
    #[arg(long)]
    input: PathBuf,

    /// Output workbook path.
    #[arg(long)]
    output: PathBuf,

    /// Optional JSON settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Share of parts that must define a field for it to get its own column.
    #[arg(long)]
    threshold: Option<f64>,

    /// Fixed list of dedicated columns; disables threshold selection.
    #[arg(long, value_delimiter = ',')]
    required: Vec<String>,

    /// Use the assembly's required part information fields as the columns.
    #[arg(long, conflicts_with = "required")]
    required_from_model: bool,

    /// Title written above the table.
    #[arg(long)]
    title: Option<String>,

    /// Worksheet name.
    #[arg(long)]
    sheet_name: Option<String>,
}

#[derive(clap::Args)]
struct InfoArgs {
    /// Assembly document (JSON).
    #[arg(long)]
    input: PathBuf,

    /// Identifier of the part to inspect or edit.
    #[arg(long)]
    part: String,

    #[command(subcommand)]
    action: InfoAction,
}

#[derive(Subcommand)]
enum InfoAction {
    /// Print the part's information fields.
    Show,
    /// Add an empty field; whitespace is removed from the name.
    Add {
        #[arg(long)]
        name: String,
    },
    /// Set field values given as key=value.
    Set {
        #[arg(long = "field", required = true)]
        fields: Vec<String>,
    },
    /// Remove fields that are not required by the assembly.
    Remove {
        #[arg(long = "field", required = true)]
        fields: Vec<String>,
    },
}

#[derive(clap::Args)]
struct TitleBlockArgs {
    /// Assembly document (JSON).
    #[arg(long)]
    input: PathBuf,

    /// JSON object of the template's editable texts and their defaults.
    #[arg(long)]
    template: PathBuf,

    /// Output JSON path for the filled fields.
    #[arg(long)]
    output: PathBuf,

    /// Date written into date fields, e.g. 2024-05-01.
    #[arg(long)]
    date: String,

    /// Page width in millimetres.
    #[arg(long, default_value_t = 297.0)]
    page_width: f64,

    /// Page height in millimetres.
    #[arg(long, default_value_t = 210.0)]
    page_height: f64,
}
