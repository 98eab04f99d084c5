use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use inkspire::ai::AiDialog;
use inkspire::api::{BoardApi, HttpApi};
use inkspire::boards::{BoardDraft, BoardList};
use inkspire::canvas::CanvasController;
use inkspire::config::ClientConfig;
use inkspire::error::{AiError, ApiError, BoardsError, CanvasError};
use inkspire::model::{BoardPatch, ElementPatch, Position, ShapeKind};
use inkspire::tool::Tool;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error(transparent)]
    Boards(#[from] BoardsError),
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("image elements need --url")]
    MissingImageUrl,
    #[error("nothing to update; pass --title or --description")]
    EmptyPatch,
    #[error("refusing to delete board {0} without --yes")]
    NotConfirmed(String),
    #[error("no element was created")]
    NothingCreated,
}

#[derive(Parser, Debug)]
#[command(name = "inkspire", about = "InkSpire board API client")]
struct Cli {
    /// Backend origin. Falls back to NEXT_PUBLIC_API_URL, then localhost.
    #[arg(long, env = "INKSPIRE_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Board(BoardCommand),
    Element(ElementCommand),
    Ai(AiCommand),
}

#[derive(Args, Debug)]
struct BoardCommand {
    #[command(subcommand)]
    command: BoardSubcommand,
}

#[derive(Subcommand, Debug)]
enum BoardSubcommand {
    List,
    Show {
        board_id: String,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        board_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        board_id: String,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct ElementCommand {
    #[command(subcommand)]
    command: ElementSubcommand,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ElementKind {
    Sticky,
    Shape,
    Text,
    Image,
}

#[derive(Subcommand, Debug)]
enum ElementSubcommand {
    List {
        board_id: String,
    },
    Add {
        board_id: String,
        #[arg(long, value_enum)]
        kind: ElementKind,
        #[arg(long, value_parser = parse_shape, default_value = "rectangle")]
        shape: ShapeKind,
        #[arg(long, default_value_t = 0.0)]
        x: f64,
        #[arg(long, default_value_t = 0.0)]
        y: f64,
        #[arg(long)]
        url: Option<String>,
    },
    Move {
        element_id: String,
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
    },
    Delete {
        element_id: String,
    },
}

#[derive(Args, Debug)]
struct AiCommand {
    #[command(subcommand)]
    command: AiSubcommand,
}

#[derive(Subcommand, Debug)]
enum AiSubcommand {
    Generate { board_id: String, text: String },
    Analyze { board_id: String },
}

fn parse_shape(raw: &str) -> Result<ShapeKind, String> {
    ShapeKind::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = ShapeKind::ALL.iter().map(|k| k.as_str()).collect();
        format!("unknown shape `{raw}`; expected one of {}", known.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inkspire=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url);
    }
    let api: Arc<dyn BoardApi> = Arc::new(HttpApi::new(&config)?);

    match cli.command {
        Command::Board(board) => run_board(api, board).await,
        Command::Element(element) => run_element(api, &config, element).await,
        Command::Ai(ai) => run_ai(api, ai).await,
    }
}

async fn run_board(api: Arc<dyn BoardApi>, board: BoardCommand) -> Result<(), CliError> {
    match board.command {
        BoardSubcommand::List => print_json(&api.list_boards().await?),
        BoardSubcommand::Show { board_id } => print_json(&api.get_board(&board_id).await?),
        BoardSubcommand::Create { title, description } => {
            let mut boards = BoardList::new(api);
            boards.draft = BoardDraft { title, description: description.unwrap_or_default() };
            print_json(&boards.create().await?)
        }
        BoardSubcommand::Update { board_id, title, description } => {
            let patch = BoardPatch { title, description };
            if patch.is_empty() {
                return Err(CliError::EmptyPatch);
            }
            let mut boards = BoardList::new(api);
            print_json(&boards.rename(&board_id, &patch).await?)
        }
        BoardSubcommand::Delete { board_id, yes } => {
            let mut boards = BoardList::new(api);
            if !boards.delete(&board_id, yes).await? {
                return Err(CliError::NotConfirmed(board_id));
            }
            print_json(&serde_json::json!({ "deleted": board_id }))
        }
    }
}

async fn run_element(api: Arc<dyn BoardApi>, config: &ClientConfig, element: ElementCommand) -> Result<(), CliError> {
    match element.command {
        ElementSubcommand::List { board_id } => print_json(&api.list_elements(&board_id).await?),
        ElementSubcommand::Add { board_id, kind, shape, x, y, url } => {
            let at = Position::new(x, y);
            let mut canvas = CanvasController::new(api, &board_id, config);
            canvas.load().await?;

            let created = match kind {
                ElementKind::Image => {
                    let url = url.ok_or(CliError::MissingImageUrl)?;
                    Some(canvas.create_image(&url, at).await?)
                }
                ElementKind::Sticky => {
                    canvas.set_tool(Tool::Sticky);
                    canvas.create_at(at).await?
                }
                ElementKind::Text => {
                    canvas.set_tool(Tool::Text);
                    canvas.create_at(at).await?
                }
                ElementKind::Shape => {
                    canvas.set_shape(shape);
                    canvas.create_at(at).await?
                }
            };
            print_json(&created.ok_or(CliError::NothingCreated)?)
        }
        ElementSubcommand::Move { element_id, x, y } => {
            let patch = ElementPatch::position(Position::new(x, y));
            print_json(&api.update_element(&element_id, &patch).await?)
        }
        ElementSubcommand::Delete { element_id } => {
            api.delete_element(&element_id).await?;
            print_json(&serde_json::json!({ "deleted": element_id }))
        }
    }
}

async fn run_ai(api: Arc<dyn BoardApi>, ai: AiCommand) -> Result<(), CliError> {
    match ai.command {
        AiSubcommand::Generate { board_id, text } => {
            let mut dialog = AiDialog::new(api, &board_id);
            dialog.prompt = text;
            print_json(&dialog.generate().await?)
        }
        AiSubcommand::Analyze { board_id } => {
            let mut dialog = AiDialog::new(api, &board_id);
            print_json(dialog.analyze().await?)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
