use std::io::Write;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use crate::config::constants::SPINNER_FRAME_MILLIS;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Stderr spinner shown while a request or a poll loop is in flight.
pub struct AnimatedLogger {
    message: watch::Sender<String>,
    stop_sender: Option<mpsc::UnboundedSender<()>>,
    task_handle: Option<JoinHandle<()>>,
}

impl AnimatedLogger {
    pub fn new(message: String) -> Self {
        let (message, _) = watch::channel(message);
        Self {
            message,
            stop_sender: None,
            task_handle: None,
        }
    }

    pub fn start(&mut self) {
        if self.task_handle.is_some() {
            return;
        }
        let (stop_tx, mut stop_rx) = mpsc::unbounded_channel();
        let message = self.message.subscribe();

        let handle = tokio::spawn(async move {
            let mut frame = 0;
            let mut interval = tokio::time::interval(tokio::time::Duration::from_millis(SPINNER_FRAME_MILLIS));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let text = message.borrow().clone();
                        eprint!("\r\x1b[K{} {} ", text, FRAMES[frame]);
                        let _ = std::io::stderr().flush();
                        frame = (frame + 1) % FRAMES.len();
                    }
                    _ = stop_rx.recv() => {
                        break;
                    }
                }
            }
        });

        self.stop_sender = Some(stop_tx);
        self.task_handle = Some(handle);
    }

    /// Replaces the text next to the spinner from the next frame on.
    pub fn set_message(&self, message: String) {
        self.message.send_replace(message);
    }

    pub async fn stop(&mut self, final_message: &str) {
        self.halt().await;
        eprint!("\r\x1b[K✅  {}\n", final_message);
        let _ = std::io::stderr().flush();
    }

    pub async fn warn(&mut self, warning_message: &str) {
        self.halt().await;
        eprint!("\r\x1b[K⚠️  {}\n", warning_message);
        let _ = std::io::stderr().flush();
    }

    pub async fn error(&mut self, error_message: &str) {
        self.halt().await;
        eprint!("\r\x1b[K❌ {}\n", error_message);
        let _ = std::io::stderr().flush();
    }

    async fn halt(&mut self) {
        if let Some(sender) = self.stop_sender.take() {
            let _ = sender.send(());
        }

        if let Some(handle) = self.task_handle.take() {
            let _ = handle.await;
        }
    }
}
