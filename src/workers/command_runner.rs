use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;
use crate::config::config_manager::ConfigManager;
use crate::enums::analysis_status::AnalysisStatus;
use crate::enums::commands::Commands;
use crate::enums::tracker_state::TrackerState;
use crate::errors::{ClientError, ClientResult};
use crate::logger::animated_logger::AnimatedLogger;
use crate::logger::report_logger::ReportLogger;
use crate::services::analysis_tracker::AnalysisTracker;
use crate::services::api_client::ApiClient;
use crate::services::notification_poller::NotificationPoller;
use crate::services::status_resolver::{PollOutcome, ResolveError, StatusResolver};
use crate::structs::analysis::analysis_filter::AnalysisFilter;
use crate::structs::config::config::Config;
use crate::structs::poller_options::PollerOptions;
use crate::structs::staged_file::StagedFile;
use crate::structs::tracker_options::TrackerOptions;
use crate::traits::threat_modeling_api::ThreatModelingApi;

pub struct CommandRunner {
    config: ClientResult<Config>,
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new(config: ClientResult<Config>) -> Self {
        Self {
            config,
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> ClientResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::Validate => self.validate_command(),
            Commands::Health => self.health_command().await,
            Commands::Analyze { file, confidence, iou } => self.analyze_command(&file, confidence, iou).await,
            Commands::Submit { file, no_wait } => self.submit_command(&file, no_wait).await,
            Commands::Status { id, wait } => self.status_command(&id, wait).await,
            Commands::List { code, status, from, to, page, size } => {
                self.list_command(code, status, from, to, page, size).await
            }
            Commands::Notifications { watch, limit } => self.notifications_command(watch, limit).await,
            Commands::Read { id } => self.read_command(&id).await,
            Commands::Open { analysis_id } => self.open_command(&analysis_id),
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::debug!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    fn config(&self) -> ClientResult<&Config> {
        self.config.as_ref().map_err(|e| {
            log::error!("❌ Failed to load configuration: {}", e);
            log::error!("💡 Run 'threatmodel init' to create a configuration file.");
            e.clone()
        })
    }

    fn client(&self) -> ClientResult<Arc<ApiClient>> {
        let config = self.config()?;
        Ok(Arc::new(ApiClient::new(config.api.clone())?))
    }

    fn init_command(&self) -> ClientResult<()> {
        log::info!("🚀 Initializing threatmodel configuration...");

        let path = ConfigManager::create_sample_config()?;
        log::info!("📝 Edit {} to point at your backend.", path.display());
        log::info!("🔧 Run 'threatmodel validate' to check your configuration.");
        Ok(())
    }

    fn validate_command(&self) -> ClientResult<()> {
        log::info!("🔍 Validating threatmodel configuration...");

        let config = self.config()?;
        match ConfigManager::config_path() {
            Some(path) if path.exists() => log::info!("✅ Loaded {}", path.display()),
            _ => log::info!("⚠️ No configuration file found, using defaults"),
        }

        match ConfigManager::validate_config(config) {
            Ok(()) => {
                log::info!("✅ Configuration is valid");
                log::info!("🌐 API: {}", config.api.endpoint("/"));
                Ok(())
            }
            Err(issues) => {
                log::info!("❌ Issues found:");
                for issue in &issues {
                    log::info!("   - {}", issue);
                }
                Err(ClientError::config_error(
                    &format!("{} configuration issue(s)", issues.len()),
                    None,
                    Some("Fix the listed keys in ~/.threatmodel/config.toml"),
                ))
            }
        }
    }

    async fn health_command(&self) -> ClientResult<()> {
        let client = self.client()?;
        let url = client.config().endpoint("/health");

        let mut spinner = AnimatedLogger::new(format!("🩺 Checking {}", url));
        spinner.start();
        if client.health_check().await {
            spinner.stop("Backend is healthy").await;
            Ok(())
        } else {
            spinner.error("Backend is not reachable or unhealthy").await;
            Err(ClientError::network_error("health check", Some(&url), "backend did not report healthy"))
        }
    }

    async fn analyze_command(&self, path: &Path, confidence: Option<f64>, iou: Option<f64>) -> ClientResult<()> {
        let config = self.config()?;
        let client = self.client()?;

        let file = StagedFile::from_path(path).await?;
        file.validate(config.detection.max_upload_size_mb)?;
        let thresholds = config.detection.thresholds(confidence, iou);
        thresholds.validate()?;

        let mut spinner = AnimatedLogger::new(format!("🔍 Analyzing {}", file.file_name));
        spinner.start();
        match client.analyze_diagram(&file, &thresholds).await {
            Ok(report) => {
                spinner.stop(&format!("Found {} threats", report.threat_count)).await;
                if let Err(e) = report.validate() {
                    log::warn!("⚠️ Report is inconsistent: {}", e);
                }
                ReportLogger::print_report(&report);
                Ok(())
            }
            Err(e) => {
                spinner.error("Analysis failed").await;
                Err(e)
            }
        }
    }

    async fn submit_command(&self, path: &Path, no_wait: bool) -> ClientResult<()> {
        let config = self.config()?;
        let client = self.client()?;
        let tracker = AnalysisTracker::new(client, TrackerOptions::from_config(config));

        tracker.stage_file(StagedFile::from_path(path).await?)?;

        let mut spinner = AnimatedLogger::new("📤 Uploading".to_string());
        spinner.start();
        let created = match tracker.create().await {
            Ok(created) => created,
            Err(e) => {
                spinner.error("Upload failed").await;
                return Err(e);
            }
        };

        if no_wait {
            spinner.stop(&format!("Created {} ({})", created.code, created.id)).await;
            log::info!("🔗 {}", config.api.analysis_page_url(&created.id));
            log::info!("💡 Run 'threatmodel status {} --wait' to follow it.", created.id);
            return Ok(());
        }

        spinner.set_message(format!("{} {} is {}", created.status.emoji(), created.code, created.status));
        let cancel = Self::cancel_on_ctrl_c();
        let mut updates = tracker.subscribe();
        let code = created.code.clone();
        let state = {
            let track = tracker.track(cancel.clone());
            tokio::pin!(track);
            loop {
                tokio::select! {
                    state = &mut track => break state,
                    changed = updates.changed() => {
                        if changed.is_err() {
                            continue;
                        }
                        let current = updates.borrow_and_update().clone();
                        if let TrackerState::Polling { status, attempts, consecutive_failures, .. } = current {
                            let mut message = format!("{} {} is {} (check {})", status.emoji(), code, status, attempts);
                            if consecutive_failures > 0 {
                                message.push_str(&format!(", retrying after {} failure(s)", consecutive_failures));
                            }
                            spinner.set_message(message);
                        }
                    }
                }
            }
        };
        cancel.cancel();

        match state {
            Ok(state) => Self::finish_tracking(&mut spinner, state).await,
            Err(e) => {
                spinner.error("Tracking could not start").await;
                Err(e)
            }
        }
    }

    async fn finish_tracking(spinner: &mut AnimatedLogger, state: TrackerState) -> ClientResult<()> {
        match state {
            TrackerState::Resolved { detail } => {
                spinner.stop(&format!("{} analyzed", detail.code)).await;
                ReportLogger::print_detail(&detail);
                Ok(())
            }
            TrackerState::Failed { analysis_id, message } => {
                spinner.error(&format!("Analysis {} failed", analysis_id)).await;
                Err(ClientError::analysis_failed(&analysis_id, &message))
            }
            TrackerState::Abandoned { analysis_id, reason } => {
                spinner.warn(&format!("Stopped following {}: {}", analysis_id, reason)).await;
                log::info!("💡 Run 'threatmodel status {}' later to check on it.", analysis_id);
                Ok(())
            }
            other => {
                spinner.warn(&format!("Tracking ended in state {}", other.name())).await;
                Ok(())
            }
        }
    }

    async fn status_command(&self, id: &str, wait: bool) -> ClientResult<()> {
        let config = self.config()?;
        let resolver = StatusResolver::new(self.client()?);

        let mut detail = resolver.resolve(id).await.map_err(Self::resolve_failure)?;
        if wait && detail.status.is_pending() {
            let cancel = Self::cancel_on_ctrl_c();
            let mut spinner = AnimatedLogger::new(format!("{} {} is {}", detail.status.emoji(), detail.code, detail.status));
            spinner.start();

            let policy = TrackerOptions::from_config(config).poll_policy();
            let code = detail.code.clone();
            let outcome = resolver
                .poll_until_terminal(id, detail.status, policy, true, &cancel, |progress| {
                    spinner.set_message(format!("{} {} is {}", progress.status.emoji(), code, progress.status));
                })
                .await;
            cancel.cancel();

            match outcome {
                PollOutcome::Finished(finished) => {
                    detail = *finished;
                    spinner.stop(&format!("{} is {}", detail.code, detail.status)).await;
                }
                PollOutcome::Cancelled => {
                    spinner.warn("Stopped waiting").await;
                    return Ok(());
                }
                PollOutcome::GaveUp(e) | PollOutcome::Stopped(e) => {
                    spinner.error("Lost track of the analysis").await;
                    return Err(Self::resolve_failure(e));
                }
            }
        }

        ReportLogger::print_detail(&detail);
        Ok(())
    }

    async fn list_command(
        &self,
        code: Option<String>,
        status: Option<AnalysisStatus>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        page: Option<u32>,
        size: Option<u32>,
    ) -> ClientResult<()> {
        let client = self.client()?;
        let filter = AnalysisFilter {
            code,
            status,
            created_at_from: from,
            created_at_to: to,
            page,
            size,
        };

        log::info!("📋 Loading analyses...");
        let summaries = client.list_analyses(&filter).await?;
        ReportLogger::print_summaries(&summaries);
        Ok(())
    }

    async fn notifications_command(&self, watch: bool, limit: Option<u32>) -> ClientResult<()> {
        let config = self.config()?;
        let mut options = PollerOptions::from_config(config);
        if let Some(limit) = limit {
            options.limit = limit;
        }
        let poller = NotificationPoller::new(self.client()?, options);

        if !watch {
            ReportLogger::print_inbox(&poller.refresh().await);
            return Ok(());
        }

        log::info!("🔔 Watching notifications every {}s. Press Ctrl+C to stop.", options.interval.as_secs());
        let mut updates = poller.subscribe();
        poller.start();
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let inbox = updates.borrow_and_update().clone();
                    println!();
                    ReportLogger::print_inbox(&inbox);
                }
            }
        }
        poller.stop().await;
        log::info!("🔕 Stopped after {} refreshes", poller.refreshes());
        Ok(())
    }

    async fn read_command(&self, id: &str) -> ClientResult<()> {
        let config = self.config()?;
        let poller = NotificationPoller::new(self.client()?, PollerOptions::from_config(config));

        let result = poller.mark_read(id).await;
        match &result {
            Ok(()) => log::info!("✅ Notification {} marked as read", id),
            Err(e) => log::error!("❌ Could not mark {} as read: {}", id, e),
        }
        ReportLogger::print_inbox(&poller.inbox());
        result
    }

    fn open_command(&self, analysis_id: &str) -> ClientResult<()> {
        let config = self.config()?;
        let url = config.api.analysis_page_url(analysis_id);

        log::info!("🌐 Opening {}", url);
        webbrowser::open(&url).map_err(|e| {
            ClientError::config_error(
                &format!("could not open a browser: {}", e),
                Some("api.web_url"),
                Some(&format!("Open {} manually", url)),
            )
        })
    }

    fn resolve_failure(error: ResolveError) -> ClientError {
        match error {
            ResolveError::NotFound { id } => ClientError::not_found("Analysis", &id),
            ResolveError::Transient(e) | ResolveError::Rejected(e) => e,
            ResolveError::Malformed { reason, .. } => ClientError::parse_error("analysis detail", &reason),
            error @ ResolveError::Regressed { .. } => ClientError::parse_error("analysis status", &error.to_string()),
        }
    }

    fn cancel_on_ctrl_c() -> CancellationToken {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                result = tokio::signal::ctrl_c() => {
                    if result.is_ok() {
                        log::info!("⏹️  Interrupted");
                    }
                    token.cancel();
                }
            }
        });
        cancel
    }
}
