// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for corpus scans
// reference: uses indicatif for progress bars and tracks scan metrics

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    pub files_listed: usize,
    pub files_scanned: usize,
    pub files_failed: usize,
    pub files_matched: usize,
    pub total_bytes_scanned: u64,
    pub duration_ms: u64,
}

impl ScanStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files_per_second(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        self.files_scanned as f64 * 1000.0 / self.duration_ms as f64
    }

    pub fn match_rate(&self) -> f64 {
        if self.files_scanned == 0 {
            return 0.0;
        }
        (self.files_matched as f64 / self.files_scanned as f64) * 100.0
    }

    pub fn summary(&self) -> String {
        format!(
            "Scanned {} of {} files ({} failed, {} matched, {:.1}%) in {} ms",
            self.files_scanned,
            self.files_listed,
            self.files_failed,
            self.files_matched,
            self.match_rate(),
            self.duration_ms
        )
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    files_listed: usize,
    files_scanned: Arc<AtomicUsize>,
    files_failed: Arc<AtomicUsize>,
    files_matched: Arc<AtomicUsize>,
    bytes_scanned: Arc<AtomicU64>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_files: usize) -> Self {
        Self::with_color(total_files, true)
    }

    pub fn with_color(total_files: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_files as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self::from_bars(total_files, main_bar, detail_bar)
    }

    /// Tracker that counts but never draws; used by library callers and tests.
    pub fn hidden(total_files: usize) -> Self {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let main_bar = multi_progress.add(ProgressBar::new(total_files as u64));
        let detail_bar = multi_progress.add(ProgressBar::new(0));

        Self::from_bars(total_files, main_bar, detail_bar)
    }

    fn from_bars(total_files: usize, main_bar: ProgressBar, detail_bar: ProgressBar) -> Self {
        Self {
            main_bar,
            detail_bar,
            files_listed: total_files,
            files_scanned: Arc::new(AtomicUsize::new(0)),
            files_failed: Arc::new(AtomicUsize::new(0)),
            files_matched: Arc::new(AtomicUsize::new(0)),
            bytes_scanned: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_files_scanned(&self, bytes: u64) {
        self.files_scanned.fetch_add(1, Ordering::SeqCst);
        self.bytes_scanned.fetch_add(bytes, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_files_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn add_match(&self) {
        self.files_matched.fetch_add(1, Ordering::SeqCst);
    }

    pub fn finish(&self) {
        self.main_bar.finish_and_clear();
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> ScanStats {
        ScanStats {
            files_listed: self.files_listed,
            files_scanned: self.files_scanned.load(Ordering::SeqCst),
            files_failed: self.files_failed.load(Ordering::SeqCst),
            files_matched: self.files_matched.load(Ordering::SeqCst),
            total_bytes_scanned: self.bytes_scanned.load(Ordering::SeqCst),
            duration_ms: self.start_time.elapsed().as_millis() as u64,
        }
    }

    fn update_detail_bar(&self) {
        let matched = self.files_matched.load(Ordering::SeqCst);
        let failed = self.files_failed.load(Ordering::SeqCst);

        let message = format!("Matched: {} | Failed: {}", matched, failed);

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} files {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}
