use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use threatmodel::errors::{ClientError, ClientResult};
use threatmodel::structs::analysis::analysis_created::AnalysisCreated;
use threatmodel::structs::analysis::analysis_detail::AnalysisDetail;
use threatmodel::structs::analysis::analysis_filter::AnalysisFilter;
use threatmodel::structs::analysis::analysis_summary::AnalysisSummary;
use threatmodel::structs::detection_thresholds::DetectionThresholds;
use threatmodel::structs::notification::notification::Notification;
use threatmodel::structs::notification::unread_notifications::UnreadNotifications;
use threatmodel::structs::report::threat_report::ThreatReport;
use threatmodel::structs::staged_file::StagedFile;
use threatmodel::traits::threat_modeling_api::ThreatModelingApi;
use super::fixtures;

/// In-memory backend. Detail answers are served in order and the last one
/// repeats; notifications behave like the real store.
pub struct FakeApi {
    create_answer: Mutex<Option<ClientResult<AnalysisCreated>>>,
    create_delay: Option<Duration>,
    detail_answers: Mutex<VecDeque<ClientResult<AnalysisDetail>>>,
    notifications: Mutex<Vec<Notification>>,
    notifications_down: AtomicBool,
    pub create_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub unread_calls: AtomicUsize,
    pub mark_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            create_answer: Mutex::new(None),
            create_delay: None,
            detail_answers: Mutex::new(VecDeque::new()),
            notifications: Mutex::new(Vec::new()),
            notifications_down: AtomicBool::new(false),
            create_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            unread_calls: AtomicUsize::new(0),
            mark_calls: AtomicUsize::new(0),
        }
    }

    pub fn on_create(self, answer: ClientResult<AnalysisCreated>) -> Self {
        *self.create_answer.lock().unwrap() = Some(answer);
        self
    }

    pub fn with_create_delay(mut self, delay: Duration) -> Self {
        self.create_delay = Some(delay);
        self
    }

    pub fn on_detail(self, answers: Vec<ClientResult<AnalysisDetail>>) -> Self {
        *self.detail_answers.lock().unwrap() = answers.into();
        self
    }

    pub fn with_notifications(self, notifications: Vec<Notification>) -> Self {
        *self.notifications.lock().unwrap() = notifications;
        self
    }

    pub fn set_notifications_down(&self, down: bool) {
        self.notifications_down.store(down, Ordering::SeqCst);
    }

    pub fn push_notification(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ThreatModelingApi for FakeApi {
    async fn analyze_diagram(&self, _file: &StagedFile, _thresholds: &DetectionThresholds) -> ClientResult<ThreatReport> {
        Ok(fixtures::report())
    }

    async fn create_analysis(&self, _file: &StagedFile) -> ClientResult<AnalysisCreated> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.create_delay {
            tokio::time::sleep(delay).await;
        }
        self.create_answer
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(ClientError::server_error(Some(500), "no create answer scripted", None)))
    }

    async fn get_analysis_detail(&self, id: &str) -> ClientResult<AnalysisDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let mut answers = self.detail_answers.lock().unwrap();
        let answer = if answers.len() > 1 { answers.pop_front() } else { answers.front().cloned() };
        answer.unwrap_or_else(|| Err(ClientError::not_found("Analysis", id)))
    }

    async fn list_analyses(&self, _filter: &AnalysisFilter) -> ClientResult<Vec<AnalysisSummary>> {
        Ok(Vec::new())
    }

    async fn get_unread_notifications(&self, limit: u32) -> ClientResult<UnreadNotifications> {
        self.unread_calls.fetch_add(1, Ordering::SeqCst);
        if self.notifications_down.load(Ordering::SeqCst) {
            return Err(ClientError::network_error("fetch unread notifications", None, "connection refused"));
        }
        let notifications: Vec<Notification> = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| !n.is_read)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(UnreadNotifications {
            unread_count: notifications.len(),
            notifications,
        })
    }

    async fn mark_notification_read(&self, id: &str) -> ClientResult<()> {
        self.mark_calls.fetch_add(1, Ordering::SeqCst);
        let mut notifications = self.notifications.lock().unwrap();
        match notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.is_read = true;
                Ok(())
            }
            None => Err(ClientError::not_found("Notification", id)),
        }
    }

    async fn health_check(&self) -> bool {
        true
    }
}
