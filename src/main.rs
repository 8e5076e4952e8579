use std::time::Duration;

use clap::Parser;
use geosentinel_lib::{
    server::start_api_server,
    submit::{SubmitError, SubmitFiles, SubmitSession, UploadProgress},
    util::station,
    ClientSettings, Error, Result, Settings,
};
use geosentinel_proto::{dto::UploadMetadataDto, DEFAULT_BASE_URL, DEFAULT_PORT};
use itertools::Itertools;
use simple_logger::SimpleLogger;

use crate::ui::{FileProgressBar, InteractiveUI, PromptUI};

mod ui;

#[derive(Parser)]
struct Args {
    /// Base URL of the intake API
    #[arg(long, env = "GEOSENTINEL_API_URL", default_value = DEFAULT_BASE_URL)]
    server: String,

    /// Do not use nerd fonts
    #[arg(long)]
    no_nerd: bool,

    #[clap(subcommand)]
    cmd: SubCommand,
}

#[derive(clap::Subcommand)]
enum SubCommand {
    /// Run the intake API server
    Serve(ServeArgs),
    /// Upload an image set for analysis
    Submit(SubmitArgs),
    /// Query the processing status of a job
    Status(StatusArgs),
    /// Fetch past analysis runs
    History(HistoryArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Port of the intake API server
    #[arg(long, env = "GEOSENTINEL_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[derive(Parser)]
struct SubmitArgs {
    /// Image files or directories to upload
    #[arg(required = true)]
    input: Vec<String>,

    /// Area of interest name, prompted for when omitted
    #[arg(long, env = "GEOSENTINEL_AOI")]
    aoi: Option<String>,

    /// Analysis type, prompted for when omitted
    #[arg(long)]
    analysis: Option<String>,

    /// Free-form description of the submission
    #[arg(long)]
    description: Option<String>,

    /// Acquisition date of the imagery (YYYY-MM-DD)
    #[arg(long)]
    acquisition_date: Option<String>,

    /// Source satellite (e.g. liss4, landsat8, sentinel2)
    #[arg(long)]
    satellite: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, env = "GEOSENTINEL_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Upload without asking for confirmation
    #[arg(short = 'y', long)]
    yes: bool,
}

#[derive(Parser)]
struct StatusArgs {
    /// Job id returned by a submission
    job_id: String,
}

#[derive(Parser)]
struct HistoryArgs {
    /// Restrict the history to one area of interest
    #[arg(long)]
    aoi: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .expect("Failed to init logger");

    let args: Args = Args::parse();

    let mut ui = PromptUI::default();
    ui.use_nerd_fonts = !args.no_nerd;

    match args.cmd {
        SubCommand::Serve(serve) => {
            start_api_server(serve.port, Settings::default()).await?;
            Ok(())
        }
        SubCommand::Submit(submit) => run_submit(args.server, submit, &ui).await,
        SubCommand::Status(status) => {
            let settings = client_settings(args.server, None);
            let result = ui
                .show_loading("Fetching status".to_string(), async move {
                    SubmitSession::processing_status(&settings, &status.job_id).await
                })
                .await;
            print_json(&ui, result)
        }
        SubCommand::History(history) => {
            let settings = client_settings(args.server, None);
            let result = ui
                .show_loading("Fetching history".to_string(), async move {
                    SubmitSession::analysis_history(&settings, history.aoi.as_deref()).await
                })
                .await;
            print_json(&ui, result)
        }
    }
}

async fn run_submit(server: String, args: SubmitArgs, ui: &PromptUI) -> Result<()> {
    let settings = client_settings(server, args.timeout_ms);
    for warning in settings.warnings() {
        log::warn!("{}", warning);
    }

    let mut files = SubmitFiles::with_limit(settings.max_file_size);
    for input in args.input.iter().unique().collect_vec() {
        let path = std::fs::canonicalize(input)?;
        if path.is_dir() {
            files.add_dir(path)?;
        } else {
            files.add_file(path, None)?;
        }
    }
    if files.is_empty() {
        ui.print_error(&Error::Submit(SubmitError::NothingSelected));
        return Ok(());
    }

    let aoi = match args.aoi.clone().or_else(|| ui.prompt_aoi()) {
        Some(aoi) => aoi,
        None => return Ok(()),
    };
    let analysis = match args.analysis.clone() {
        Some(analysis) => analysis,
        None => match ui.prompt_analysis() {
            Some(analysis) => analysis.as_str().to_string(),
            None => return Ok(()),
        },
    };

    let mut metadata = UploadMetadataDto::new(&aoi, &analysis);
    metadata.description = args.description.clone();
    metadata.acquisition_date = args.acquisition_date.clone();
    metadata.satellite = args.satellite.clone();
    metadata.submitted_by = Some(station::station_name());

    ui.print_files(&files);
    if !args.yes && !ui.confirm_upload(files.len()) {
        return Ok(());
    }

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::channel::<UploadProgress>(100);
    let mut pb = FileProgressBar::new(files.files.clone(), ui.use_nerd_fonts);
    tokio::spawn(async move {
        while let Some(progress) = progress_rx.recv().await {
            pb.update(progress);
        }
    });

    let session = SubmitSession::new(settings, metadata, files);
    match session.upload(progress_tx).await {
        Ok(job) => {
            println!();
            ui.print_job(&job);
        }
        Err(e) => {
            println!();
            ui.print_error(&e);
        }
    }
    Ok(())
}

fn client_settings(server: String, timeout_ms: Option<u64>) -> ClientSettings {
    let mut settings = ClientSettings {
        base_url: server,
        ..Default::default()
    };
    if let Some(timeout_ms) = timeout_ms {
        settings.timeout = Duration::from_millis(timeout_ms);
    }
    settings
}

fn print_json(ui: &PromptUI, result: Result<serde_json::Value>) -> Result<()> {
    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) => {
            ui.print_error(&e);
            Ok(())
        }
    }
}
