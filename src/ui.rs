use std::{collections::HashMap, fmt::Write, future::Future, time::Duration};

use async_trait::async_trait;
use colored::Colorize;
use comfy_table::Table;
use geosentinel_lib::{
    submit::{SubmitFile, SubmitFiles, UploadProgress},
    Error,
};
use geosentinel_proto::{dto::JobDto, AnalysisType, ImageFormat};
use indicatif::{ProgressBar, ProgressState, ProgressStyle};

const PROGRESS_BAR_NO_NERD_TICK_CHARS: &'static str = "+x*";

pub struct FileProgressBar {
    style: ProgressStyle,
    pbs: HashMap<usize, ProgressBar>,
    files: Vec<SubmitFile>,
}

impl FileProgressBar {
    pub fn new(files: Vec<SubmitFile>, use_nerd_fonts: bool) -> Self {
        let mut style = ProgressStyle::with_template("{prefix:.bold.dim} {spinner} [{elapsed_precise}] [{msg}] [{bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap()
            .with_key("eta", |state: &ProgressState, w: &mut dyn Write| write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap())
            .progress_chars("#>-");
        if !use_nerd_fonts {
            style = style.tick_chars(PROGRESS_BAR_NO_NERD_TICK_CHARS);
        }
        Self {
            style,
            pbs: HashMap::new(),
            files,
        }
    }

    pub fn update(&mut self, progress: UploadProgress) {
        if let Some(pb) = self.pbs.get(&progress.file_index) {
            pb.set_position(progress.position);
            if progress.finish {
                pb.finish();
            }
            return;
        }

        let file = self.files.get(progress.file_index).unwrap();

        let pb = indicatif::ProgressBar::new(file.size)
            .with_prefix(format!("[{}/{}]", file.index + 1, self.files.len()))
            .with_style(self.style.clone())
            .with_message(file.file_name.clone())
            .with_position(progress.position);

        if progress.finish {
            pb.finish();
        }
        self.pbs.insert(progress.file_index, pb);
    }
}

#[async_trait]
pub trait InteractiveUI {
    async fn show_loading<T>(&self, message: String, task: T) -> T::Output
    where
        T: Future + Send + 'static,
        T::Output: Send + 'static;

    fn prompt_aoi(&self) -> Option<String>;

    fn prompt_analysis(&self) -> Option<AnalysisType>;

    fn confirm_upload(&self, count: usize) -> bool;

    fn print_files(&self, files: &SubmitFiles);

    fn print_job(&self, job: &JobDto);

    fn print_error(&self, error: &Error);
}

#[derive(Clone)]
pub struct PromptUI {
    pub use_nerd_fonts: bool,
}

impl Default for PromptUI {
    fn default() -> Self {
        Self {
            use_nerd_fonts: true,
        }
    }
}

#[async_trait]
impl InteractiveUI for PromptUI {
    async fn show_loading<T>(&self, message: String, task: T) -> T::Output
    where
        T: Future + Send + 'static,
        T::Output: Send + 'static,
    {
        let mut style = ProgressStyle::default_spinner();
        if !self.use_nerd_fonts {
            style = style.tick_chars(PROGRESS_BAR_NO_NERD_TICK_CHARS);
        }
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_message(message);
        pb.set_style(style);
        let l = pb.clone();
        let timer = tokio::spawn(async move {
            loop {
                l.inc(1);
                tokio::time::sleep(Duration::from_millis(64)).await;
            }
        });
        let output = task.await;
        pb.finish_and_clear();
        timer.abort();
        output
    }

    fn prompt_aoi(&self) -> Option<String> {
        inquire::Text::new("Area of interest name")
            .with_help_message("enter to confirm, esc to cancel")
            .prompt_skippable()
            .ok()
            .flatten()
            .filter(|name| !name.is_empty())
    }

    fn prompt_analysis(&self) -> Option<AnalysisType> {
        inquire::Select::new(
            "Select the analysis you want to run",
            AnalysisType::ALL.to_vec(),
        )
        .with_help_message("↑↓ to move, enter to select, esc to cancel")
        .with_vim_mode(true)
        .prompt_skippable()
        .ok()
        .flatten()
    }

    fn confirm_upload(&self, count: usize) -> bool {
        inquire::Confirm::new(&format!("Upload {} file(s) for analysis?", count))
            .with_default(true)
            .with_help_message("enter to upload, n to abort")
            .prompt_skippable()
            .is_ok_and(|r| r == Some(true))
    }

    fn print_files(&self, files: &SubmitFiles) {
        let mut table = Table::new();
        table.set_header(vec!["No.", "Name", "Format", "Size"]);
        for file in &files.files {
            table.add_row(vec![
                &format!("{}", file.index + 1),
                &self.file_name(file),
                &format!("{}", file.format),
                &self.file_size(file),
            ]);
        }
        println!("{}", table);
    }

    fn print_job(&self, job: &JobDto) {
        let rows = [
            ("Job ID", job.job_id.clone()),
            ("Status", job.status.as_str().to_string()),
            ("Estimated time", job.estimated_time.clone()),
            ("Files processed", format!("{}", job.files_processed)),
            ("Analysis type", job.analysis_type.clone()),
            ("AOI", job.aoi_name.clone()),
        ];
        let mut table = Table::new();
        for (name, value) in rows {
            table.add_row(vec![name.to_string(), value]);
        }
        println!("{}", table);
    }

    fn print_error(&self, error: &Error) {
        println!("{}", error.to_string().bold().red());
    }
}

impl PromptUI {
    fn file_name(&self, file: &SubmitFile) -> String {
        format!("{} {}", self.file_icon(&file.format), file.file_name)
    }

    fn file_icon(&self, format: &ImageFormat) -> &'static str {
        if !self.use_nerd_fonts {
            return "";
        }
        match format {
            ImageFormat::Tiff | ImageFormat::Png | ImageFormat::Jpeg => "󰈟",
            ImageFormat::Other => "󰈔",
        }
    }

    fn file_size(&self, file: &SubmitFile) -> String {
        humansize::format_size(file.size, humansize::DECIMAL)
    }
}
