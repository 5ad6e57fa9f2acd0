//! End-to-end characterization run
//!
//! Ties the external tools and the reporting together:
//!
//! 1. Validate options and create the output folder
//! 2. Disk image only: write DFXML, recover files into `carved_files/`
//! 3. Virus scan (unless disabled)
//! 4. Identify formats with siegfried, load the CSV into SQLite
//! 5. Export CSV reports, directory tree and the HTML report
//! 6. Disk image only: optionally delete the recovered files

pub mod config;
pub mod logging;

use chrono::Local;
use fondscan_core::{FondscanError, OutputLayout, Result, RunOptions};
use fondscan_report::{
    CollectionStats, Database, ReportContext, export_reports, read_siegfried_csv, write_html,
};
use fondscan_tools::clamav::{self, VirusScanSummary};
use fondscan_tools::{SystemRunner, ToolPaths, ToolRunner, siegfried, sleuthkit, tree};
use std::fs;
use std::path::PathBuf;

pub use config::Config;

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub layout: OutputLayout,
    /// Rows read from siegfried's CSV
    pub records: usize,
    /// Files recovered from the disk image
    pub carved_files: Option<usize>,
    pub stats: CollectionStats,
    pub virus_scan: Option<VirusScanSummary>,
    pub html_report: PathBuf,
}

pub struct Characterizer<R: ToolRunner> {
    runner: R,
    tools: ToolPaths,
}

impl Characterizer<SystemRunner> {
    /// Characterizer that spawns the real tools named in `config`
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(SystemRunner, config.tools.clone())
    }
}

impl<R: ToolRunner> Characterizer<R> {
    #[must_use]
    pub fn new(runner: R, tools: ToolPaths) -> Self {
        Self { runner, tools }
    }

    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Characterize `options.source` into `<destination>/<basename>`
    ///
    /// # Errors
    ///
    /// Returns the first failing stage's error. A virus scan that finds
    /// infections is reported in the summary, not as an error.
    pub fn run(&self, options: &RunOptions) -> Result<RunSummary> {
        options.validate()?;
        if options.remove_carved && !options.disk_image {
            log::warn!("--removefiles only applies to disk images; ignoring it");
        }

        let layout = OutputLayout::new(&options.destination, &options.basename);
        layout.create(options.overwrite)?;
        log::info!("Writing output to {}", layout.root().display());

        let (source, carved_files) = if options.disk_image {
            (layout.carved_files(), Some(self.extract_disk_image(options, &layout)?))
        } else {
            (options.source.clone(), None)
        };

        let virus_scan = if options.virus_scan {
            Some(self.scan_for_viruses(options, &layout, &source)?)
        } else {
            log::info!("Skipping virus scan");
            None
        };

        log::info!("Identifying file formats in {}", source.display());
        siegfried::identify(
            &self.runner,
            &self.tools.sf,
            &source,
            options.hash,
            options.scan_archives,
            &layout.siegfried_csv(),
        )?;
        let siegfried_version = siegfried::version(&self.runner, &self.tools.sf)?;

        let records = read_siegfried_csv(&layout.siegfried_csv(), options.hash)?;
        let mut db = Database::create(&layout.siegfried_db())?;
        db.import(&records)?;

        log::info!("Writing CSV reports to {}", layout.csv_reports().display());
        export_reports(&db, &layout)?;
        tree::render(&self.runner, &self.tools.tree, &source, &layout.tree())?;

        let stats = db.stats()?;
        let context = ReportContext {
            source: options.source.clone(),
            basename: options.basename.clone(),
            run_date: Local::now(),
            siegfried_version,
            disk_image: options.disk_image,
            virus_scan,
        };
        let html_report = write_html(&db, &context, &layout)?;
        log::info!("HTML report written to {}", html_report.display());

        if options.disk_image && options.remove_carved {
            let carved = layout.carved_files();
            fs::remove_dir_all(&carved).map_err(|e| FondscanError::io(&carved, e))?;
            log::info!("Removed {}", carved.display());
        }

        Ok(RunSummary {
            layout,
            records: records.len(),
            carved_files,
            stats,
            virus_scan,
            html_report,
        })
    }

    fn extract_disk_image(&self, options: &RunOptions, layout: &OutputLayout) -> Result<usize> {
        log::info!("Describing disk image {} as DFXML", options.source.display());
        sleuthkit::write_dfxml(&self.runner, &self.tools.fiwalk, &options.source, &layout.dfxml())?;

        log::info!("Recovering files from {}", options.source.display());
        let count = sleuthkit::carve(
            &self.runner,
            &self.tools.tsk_recover,
            &options.source,
            &layout.carved_files(),
            options.allocated_only,
        )?;
        log::info!("Recovered {count} files");
        Ok(count)
    }

    fn scan_for_viruses(
        &self,
        options: &RunOptions,
        layout: &OutputLayout,
        source: &std::path::Path,
    ) -> Result<VirusScanSummary> {
        log::info!("Scanning {} for viruses", source.display());
        let summary = clamav::scan(
            &self.runner,
            &self.tools.clamscan,
            source,
            options.large_files,
            &layout.virus_log(),
        )?;
        if summary.is_clean() {
            log::info!(
                "Scanned {} files, no infections found",
                summary.scanned_files
            );
        } else {
            log::warn!(
                "{} infected files found; see {}",
                summary.infected_files,
                layout.virus_log().display()
            );
        }
        Ok(summary)
    }
}
