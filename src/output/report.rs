//! File-backed reporter
//!
//! Writes failures and the run summary to the error file and hits to the log
//! file inside the output directory, optionally echoing both to stdout.

use crate::config::OutputConfig;
use crate::output::traits::{OutputResult, Reporter, RunSummary};
use crate::output::{format_hit, format_summary};
use crate::query::Hit;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Reporter writing `err.txt` / `log.txt` style files
pub struct FileReporter {
    errors: BufWriter<File>,
    log: BufWriter<File>,
    error_path: PathBuf,
    log_path: PathBuf,
    echo: bool,
}

impl FileReporter {
    /// Creates the output directory and truncates both report files
    ///
    /// # Arguments
    ///
    /// * `config` - Output locations
    /// * `echo` - Also print every record to stdout
    pub fn create(config: &OutputConfig, echo: bool) -> OutputResult<Self> {
        let directory = Path::new(&config.directory);
        fs::create_dir_all(directory)?;

        let error_path = directory.join(&config.error_file);
        let log_path = directory.join(&config.log_file);

        let errors = BufWriter::new(File::create(&error_path)?);
        let log = BufWriter::new(File::create(&log_path)?);

        tracing::debug!(
            "Writing reports to {} and {}",
            error_path.display(),
            log_path.display()
        );

        Ok(Self {
            errors,
            log,
            error_path,
            log_path,
            echo,
        })
    }

    pub fn error_path(&self) -> &Path {
        &self.error_path
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    fn echo(&self, text: &str) -> OutputResult<()> {
        if self.echo {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
        Ok(())
    }
}

impl Reporter for FileReporter {
    fn record_failure(&mut self, message: &str) -> OutputResult<()> {
        let line = format!("{}\n", message);
        self.errors.write_all(line.as_bytes())?;
        self.echo(&line)
    }

    fn record_hit(&mut self, hit: &Hit) -> OutputResult<()> {
        let entry = format_hit(hit);
        self.log.write_all(entry.as_bytes())?;
        self.echo(&entry)
    }

    fn record_summary(&mut self, summary: &RunSummary) -> OutputResult<()> {
        let line = format!("{}\n", format_summary(summary));
        self.errors.write_all(line.as_bytes())?;
        self.echo(&line)
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.errors.flush()?;
        self.log.flush()?;
        Ok(())
    }
}
