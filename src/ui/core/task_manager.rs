use super::actions::{Action, DialogType};
use crate::backend::{
    AlertStatus, AlertUpdate, BackendError, ListResource, MonitoringBackend, Overview, ReportRequest, Statistics,
};
use crate::constants::ALERT_PROCESSED_BY;
use crate::export;
use crate::list::FetchTicket;
use log::{debug, error, warn};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Server-generated files that can be saved from the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Download {
    AlertDetails(String),
    Parameters,
    Report(ReportRequest),
}

impl Download {
    pub fn file_name(&self) -> String {
        let date = crate::utils::datetime::format_ymd(crate::utils::datetime::export_date());
        match self {
            Self::AlertDetails(alert_id) => format!("alert_{}_details_{}.csv", alert_id, date),
            Self::Parameters => format!("system_parameters_{}.csv", date),
            Self::Report(request) => request.file_name(),
        }
    }

    async fn fetch(&self, backend: &dyn MonitoringBackend) -> Result<Vec<u8>, BackendError> {
        match self {
            Self::AlertDetails(alert_id) => backend.download_alert_details(alert_id).await,
            Self::Parameters => backend.export_parameters().await,
            Self::Report(request) => backend.generate_report(request).await,
        }
    }
}

/// Requests where only the newest one matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Slot {
    Fetch(ListResource),
    Statistics(ListResource),
    Overview,
}

pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    /// In-flight task per superseding slot
    active: HashMap<Slot, TaskId>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                active: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    fn track(&mut self, handle: JoinHandle<()>, description: String) -> TaskId {
        let task_id = self.next_task_id;
        self.next_task_id += 1;
        debug!("Background: task {} started: {}", task_id, description);

        self.tasks.insert(
            task_id,
            BackgroundTask {
                id: task_id,
                handle,
                description,
                started_at: std::time::Instant::now(),
            },
        );
        task_id
    }

    /// Abort whatever still runs in `slot`
    fn supersede(&mut self, slot: Slot) {
        if let Some(previous) = self.active.remove(&slot) {
            if let Some(task) = self.tasks.remove(&previous) {
                if !task.handle.is_finished() {
                    debug!("Background: aborting superseded task {} ({})", previous, task.description);
                }
                task.handle.abort();
            }
        }
    }

    /// Spawn a list fetch, aborting the fetch it supersedes for the same view
    pub fn spawn_fetch(&mut self, backend: Arc<dyn MonitoringBackend>, ticket: FetchTicket) -> TaskId {
        self.supersede(Slot::Fetch(ticket.resource));

        let action_sender = self.action_sender.clone();
        let resource = ticket.resource;
        let description = format!("Fetch {} #{}", resource, ticket.seq);

        let handle = tokio::spawn(async move {
            let result = backend.fetch_list(ticket.resource, &ticket.query).await;
            let _ = action_sender.send(Action::PageLoaded {
                resource: ticket.resource,
                seq: ticket.seq,
                result,
            });
        });

        let task_id = self.track(handle, description);
        self.active.insert(Slot::Fetch(resource), task_id);
        task_id
    }

    /// Spawn statistics refresh `seq` for a view, aborting the previous one.
    /// Failures are logged and reported as empty counters.
    pub fn spawn_statistics(
        &mut self,
        backend: Arc<dyn MonitoringBackend>,
        resource: ListResource,
        seq: u64,
    ) -> TaskId {
        self.supersede(Slot::Statistics(resource));
        let action_sender = self.action_sender.clone();

        let handle = tokio::spawn(async move {
            let statistics = match backend.fetch_statistics(resource).await {
                Ok(statistics) => statistics,
                Err(e) => {
                    warn!("Failed to fetch {} statistics: {}", resource, e);
                    Statistics::new()
                }
            };
            let _ = action_sender.send(Action::StatisticsLoaded {
                resource,
                seq,
                statistics,
            });
        });

        let task_id = self.track(handle, format!("Statistics {} #{}", resource, seq));
        self.active.insert(Slot::Statistics(resource), task_id);
        task_id
    }

    /// Spawn overview refresh `seq`: dashboard counters and model metrics,
    /// fetched together. Either half that fails reads as empty.
    pub fn spawn_overview(&mut self, backend: Arc<dyn MonitoringBackend>, seq: u64) -> TaskId {
        self.supersede(Slot::Overview);
        let action_sender = self.action_sender.clone();

        let handle = tokio::spawn(async move {
            let (counters, model) = tokio::join!(backend.fetch_overview(), backend.fetch_model_performance());
            let overview = Overview {
                counters: counters.unwrap_or_else(|e| {
                    warn!("Failed to fetch dashboard overview: {}", e);
                    Statistics::new()
                }),
                model: model.unwrap_or_else(|e| {
                    warn!("Failed to fetch model performance: {}", e);
                    Statistics::new()
                }),
            };
            let _ = action_sender.send(Action::OverviewLoaded { seq, overview });
        });

        let task_id = self.track(handle, format!("Overview #{}", seq));
        self.active.insert(Slot::Overview, task_id);
        task_id
    }

    /// Spawn an alert status update
    pub fn spawn_alert_update(
        &mut self,
        backend: Arc<dyn MonitoringBackend>,
        alert_id: String,
        status: AlertStatus,
    ) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Update alert {} to {}", alert_id, status.code());

        let handle = tokio::spawn(async move {
            let update = AlertUpdate {
                statut_alerte: status,
                processed_by: ALERT_PROCESSED_BY.to_string(),
            };
            let action = match backend.update_alert(&alert_id, &update).await {
                Ok(()) => Action::AlertUpdated { alert_id, status },
                Err(e) => {
                    error!("Failed to update alert {}: {}", alert_id, e);
                    Action::ShowDialog(DialogType::Error(format!(
                        "{} #{}: {}",
                        crate::constants::ERROR_ALERT_UPDATE_FAILED,
                        alert_id,
                        e
                    )))
                }
            };
            let _ = action_sender.send(action);
        });

        self.track(handle, description)
    }

    /// Spawn the download of a server-generated file into `directory`
    pub fn spawn_download(
        &mut self,
        backend: Arc<dyn MonitoringBackend>,
        download: Download,
        directory: PathBuf,
    ) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Download {:?}", download);

        let handle = tokio::spawn(async move {
            let bytes = download.fetch(backend.as_ref()).await;

            let action = match bytes {
                Ok(bytes) => match export::write_file(&bytes, &download.file_name(), &directory) {
                    Ok(path) => Action::FileSaved(path),
                    Err(e) => {
                        error!("Failed to save {:?}: {}", download, e);
                        Action::ShowDialog(DialogType::Error(format!(
                            "{}: {}",
                            crate::constants::ERROR_REPORT_FAILED,
                            e
                        )))
                    }
                },
                Err(e) => {
                    error!("Failed to download {:?}: {}", download, e);
                    Action::ShowDialog(DialogType::Error(format!(
                        "{}: {}",
                        crate::constants::ERROR_REPORT_FAILED,
                        e
                    )))
                }
            };
            let _ = action_sender.send(action);
        });

        self.track(handle, description)
    }

    /// Drop bookkeeping for tasks that have finished
    pub fn cleanup_finished_tasks(&mut self) -> Vec<TaskId> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(id, _)| *id)
            .collect();

        for task_id in &finished {
            if let Some(task) = self.tasks.remove(task_id) {
                debug!(
                    "Background: task {} finished after {:?}: {}",
                    task.id,
                    task.started_at.elapsed(),
                    task.description
                );
            }
        }
        self.active.retain(|_, id| !finished.contains(id));
        finished
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        self.active.clear();
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.cancel_all_tasks();
    }
}
