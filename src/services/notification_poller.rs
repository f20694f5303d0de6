use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use crate::errors::ClientResult;
use crate::structs::notification::inbox::Inbox;
use crate::structs::poller_options::PollerOptions;
use crate::traits::threat_modeling_api::ThreatModelingApi;

/// Keeps an [`Inbox`] fresh by polling the unread notifications on a fixed
/// interval. The background task lives until [`NotificationPoller::stop`]
/// is awaited or the poller is dropped.
pub struct NotificationPoller<A: ThreatModelingApi + 'static> {
    inner: Arc<PollerInner<A>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

struct PollerInner<A: ThreatModelingApi> {
    api: Arc<A>,
    options: PollerOptions,
    inbox: watch::Sender<Inbox>,
    // One fetch in flight at a time; a tick that lands mid-refresh waits.
    refresh_lock: tokio::sync::Mutex<()>,
    cancel: CancellationToken,
    refreshes: AtomicUsize,
}

impl<A: ThreatModelingApi + 'static> NotificationPoller<A> {
    pub fn new(api: Arc<A>, options: PollerOptions) -> Self {
        let (inbox, _) = watch::channel(Inbox::empty());
        Self {
            inner: Arc::new(PollerInner {
                api,
                options,
                inbox,
                refresh_lock: tokio::sync::Mutex::new(()),
                cancel: CancellationToken::new(),
                refreshes: AtomicUsize::new(0),
            }),
            handle: Mutex::new(None),
        }
    }

    /// Spawns the polling task. The first fetch happens immediately.
    /// Calling it again while running, or after `stop`, does nothing.
    pub fn start(&self) {
        let mut handle = self.handle.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if handle.is_some() || self.inner.cancel.is_cancelled() {
            return;
        }

        let inner = Arc::clone(&self.inner);
        log::debug!("🔔 Polling notifications every {:?}", inner.options.interval);
        *handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(inner.options.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = inner.cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        inner.refresh().await;
                    }
                }
            }
            log::debug!("🔕 Notification polling stopped");
        }));
    }

    pub async fn refresh(&self) -> Inbox {
        self.inner.refresh().await
    }

    /// Marks one notification read, then refreshes whatever the outcome so
    /// the inbox reflects the server. The transport result is returned.
    pub async fn mark_read(&self, id: &str) -> ClientResult<()> {
        let result = self.inner.api.mark_notification_read(id).await;
        if let Err(e) = &result {
            log::warn!("Could not mark notification {} as read: {}", id, e);
        }
        self.inner.refresh().await;
        result
    }

    pub fn inbox(&self) -> Inbox {
        self.inner.inbox.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Inbox> {
        self.inner.inbox.subscribe()
    }

    pub fn refreshes(&self) -> usize {
        self.inner.refreshes.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        let handle = self.handle.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        handle.is_some() && !self.inner.cancel.is_cancelled()
    }

    /// Cancels the task and waits for it to exit. After this returns no
    /// further inbox updates are published.
    pub async fn stop(&self) {
        self.inner.cancel.cancel();
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                log::warn!("Notification task ended abnormally: {}", e);
            }
        }
    }
}

impl<A: ThreatModelingApi + 'static> Drop for NotificationPoller<A> {
    fn drop(&mut self) {
        self.inner.cancel.cancel();
    }
}

impl<A: ThreatModelingApi> PollerInner<A> {
    async fn refresh(&self) -> Inbox {
        let _guard = self.refresh_lock.lock().await;
        if self.cancel.is_cancelled() {
            return self.inbox.borrow().clone();
        }

        let fetched = tokio::select! {
            _ = self.cancel.cancelled() => return self.inbox.borrow().clone(),
            fetched = self.api.get_unread_notifications(self.options.limit) => fetched,
        };
        self.refreshes.fetch_add(1, Ordering::SeqCst);

        let inbox = match fetched {
            Ok(unread) => Inbox::from_unread(unread, Utc::now()),
            Err(e) => {
                log::warn!("Failed to fetch notifications: {}", e);
                Inbox::empty()
            }
        };

        if self.cancel.is_cancelled() {
            return inbox;
        }
        self.inbox.send_replace(inbox.clone());
        inbox
    }
}
