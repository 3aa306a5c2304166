use crate::backend::{ListResource, MonitoringBackend, Overview, Statistics};
use crate::config::Config;
use crate::constants::{
    ERROR_EXPORT_FAILED, ERROR_INVALID_PAGE, NOTICE_NO_DATA_TO_EXPORT, PER_PAGE_CHOICES, SUCCESS_ALERT_UPDATED,
    SUCCESS_EXPORTED, SUCCESS_REPORT_SAVED,
};
use crate::export::{self, ExportError, GridExporter};
use crate::list::{FetchOutcome, FetchTicket, ListController};
use crate::logger::Logger;
use crate::pages::{self, PageDefinition};
use crate::ui::components::{DialogComponent, GridTableComponent, StatsBar, StatusBar, ViewTabs};
use crate::ui::core::{
    actions::{Action, DialogType},
    event_handler::EventType,
    task_manager::{Download, TaskManager},
    Component,
};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::utils::datetime;
use log::{debug, info, warn};
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// One list view: its static definition, list state and counters
pub struct ViewState {
    pub page: PageDefinition,
    pub controller: ListController,
    pub statistics: Statistics,
    /// Sequence of the newest statistics request; older answers are dropped
    pub statistics_seq: u64,
}

/// Application state separate from UI concerns
#[derive(Debug, Clone)]
pub struct AppState {
    pub current: ListResource,
    /// Last transient message, shown in the status bar
    pub notice: Option<String>,
}

pub struct AppComponent {
    // Component composition
    grid: GridTableComponent,
    dialog: DialogComponent,

    // Application state
    views: Vec<ViewState>,
    state: AppState,
    overview: Option<Overview>,
    overview_seq: u64,

    // Services
    backend: Arc<dyn MonitoringBackend>,
    exporter: GridExporter,
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,
    logger: Logger,

    stats_refresh: Option<Duration>,
    last_stats_refresh: Instant,
    should_quit: bool,
}

impl AppComponent {
    pub fn new(config: &Config, backend: Arc<dyn MonitoringBackend>, logger: Logger) -> Self {
        let (task_manager, background_action_rx) = TaskManager::new();
        let views = ListResource::ALL
            .into_iter()
            .map(|resource| {
                let page = pages::definition(resource);
                let controller = page.controller(config.grid.per_page);
                ViewState {
                    page,
                    controller,
                    statistics: Statistics::new(),
                    statistics_seq: 0,
                }
            })
            .collect();

        let mut dialog = DialogComponent::new();
        dialog.set_logger(logger.clone());

        let stats_refresh = match config.stats.refresh_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Self {
            grid: GridTableComponent::new(),
            dialog,
            views,
            overview: None,
            overview_seq: 0,
            state: AppState {
                current: config.default_view().unwrap_or(ListResource::Transactions),
                notice: None,
            },
            backend,
            exporter: GridExporter::new(config.export.directory.clone()),
            task_manager,
            background_action_rx,
            logger,
            stats_refresh,
            last_stats_refresh: Instant::now(),
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self, resource: ListResource) -> Option<&ViewState> {
        self.views.iter().find(|view| view.page.resource == resource)
    }

    fn view_mut(&mut self, resource: ListResource) -> Option<&mut ViewState> {
        self.views.iter_mut().find(|view| view.page.resource == resource)
    }

    fn current_view(&self) -> Option<&ViewState> {
        self.view(self.state.current)
    }

    /// Last overview received, if any
    pub fn overview(&self) -> Option<&Overview> {
        self.overview.as_ref()
    }

    /// Log whether the backend answers its health endpoint
    pub async fn check_backend(&self) {
        match self.backend.health_check().await {
            Ok(_) => info!("Backend reachable at {}", self.backend.base_url()),
            Err(e) => warn!("Backend health check failed for {}: {}", self.backend.base_url(), e),
        }
    }

    /// Load the startup view
    pub fn start(&mut self) {
        self.logger.log(format!("App: starting on {}", self.state.current));
        self.refresh_current();
    }

    /// Push the current view's rows into the grid
    fn sync_component_data(&mut self) {
        let Some(view) = self.views.iter().find(|view| view.page.resource == self.state.current) else {
            return;
        };
        self.grid.update_data(
            view.page.title.to_string(),
            view.page.columns.clone(),
            view.controller.rows().to_vec(),
            view.controller.is_loading(),
        );
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        self.task_manager.spawn_fetch(self.backend.clone(), ticket);
        self.sync_component_data();
    }

    fn spawn_statistics(&mut self, resource: ListResource) {
        let Some(view) = self.view_mut(resource) else {
            return;
        };
        view.statistics_seq += 1;
        let seq = view.statistics_seq;
        self.task_manager.spawn_statistics(self.backend.clone(), resource, seq);
        self.last_stats_refresh = Instant::now();
    }

    fn spawn_overview(&mut self) {
        self.overview_seq += 1;
        self.task_manager.spawn_overview(self.backend.clone(), self.overview_seq);
    }

    fn refresh_current(&mut self) {
        let resource = self.state.current;
        if let Some(view) = self.view_mut(resource) {
            let ticket = view.controller.fetch_page();
            self.spawn_fetch(ticket);
        }
        self.spawn_statistics(resource);
    }

    /// Apply a controller operation that may produce a request
    fn with_controller<F>(&mut self, operation: F) -> Option<FetchTicket>
    where
        F: FnOnce(&PageDefinition, &mut ListController) -> Option<FetchTicket>,
    {
        let resource = self.state.current;
        let view = self.view_mut(resource)?;
        let ticket = operation(&view.page, &mut view.controller)?;
        self.spawn_fetch(ticket.clone());
        Some(ticket)
    }

    /// Drain actions reported by background tasks
    pub fn process_background_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = self.background_action_rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Periodic housekeeping: finished tasks and statistics refresh
    pub fn on_tick(&mut self) -> Action {
        self.task_manager.cleanup_finished_tasks();
        match self.stats_refresh {
            Some(interval) if self.last_stats_refresh.elapsed() >= interval => Action::RefreshStatistics,
            _ => Action::None,
        }
    }

    /// Route a terminal event and apply the resulting actions
    pub fn handle_event(&mut self, event: EventType) {
        if let EventType::Key(key) = event {
            let action = self.handle_key_events(key);
            self.dispatch(action);
        }
    }

    /// Apply `action` and every follow-up action it produces
    pub fn dispatch(&mut self, action: Action) {
        let mut action = action;
        while !matches!(action, Action::None) {
            action = self.handle_app_action(action);
        }
    }

    /// Handle global keyboard shortcuts that aren't component-specific
    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => {
                self.logger.log("Global key: 'q' - quitting application".to_string());
                Action::Quit
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.logger.log("Global key: Ctrl+C - quitting application".to_string());
                Action::Quit
            }
            KeyCode::Esc => Action::Quit,
            KeyCode::Char('?') => Action::ShowDialog(DialogType::Help),
            KeyCode::Char('G') => Action::ShowDialog(DialogType::Logs),
            KeyCode::Char('1') => Action::SwitchView(ListResource::Transactions),
            KeyCode::Char('2') => Action::SwitchView(ListResource::Alerts),
            KeyCode::Char('3') => Action::SwitchView(ListResource::Reactivations),
            KeyCode::Tab => Action::NextView,
            KeyCode::Char('n') | KeyCode::Right => Action::NextPage,
            KeyCode::Char('p') | KeyCode::Left => Action::PreviousPage,
            KeyCode::Char('g') => Action::ShowDialog(DialogType::GoToPage),
            KeyCode::Char('+') => Action::CyclePerPage,
            KeyCode::Char('s') => Action::CycleSortField,
            KeyCode::Char('o') => Action::ToggleSortOrder,
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('f') => match self.current_view() {
                Some(view) => Action::ShowDialog(DialogType::Filters(view.controller.filters().clone())),
                None => Action::None,
            },
            KeyCode::Char('x') => Action::ResetFilters,
            KeyCode::Char('e') => Action::Export,
            KeyCode::Char('P') => Action::ExportParameters,
            KeyCode::Char('R') => Action::ShowDialog(DialogType::Report(pages::reports::form(datetime::export_date()))),
            KeyCode::Char('D') => Action::ShowOverview,
            _ => Action::None,
        }
    }

    /// Handle app-level actions; returns a follow-up action or `Action::None`
    pub fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Action::None
            }
            Action::SwitchView(resource) => {
                self.logger.log(format!("Navigation: switching to {}", resource));
                self.state.current = resource;
                self.state.notice = None;
                self.refresh_current();
                Action::None
            }
            Action::NextView => {
                let all = ListResource::ALL;
                let index = all.iter().position(|r| *r == self.state.current).unwrap_or(0);
                Action::SwitchView(all[(index + 1) % all.len()])
            }
            Action::OpenSelectedRow => self.open_selected_row(),
            Action::NextPage => {
                self.with_controller(|_, controller| controller.next_page());
                Action::None
            }
            Action::PreviousPage => {
                self.with_controller(|_, controller| controller.previous_page());
                Action::None
            }
            Action::GoToPage(page) => match self.with_controller(|_, controller| controller.go_to_page(page)) {
                Some(_) => Action::None,
                None => Action::ShowDialog(DialogType::Error(format!("{}: {}", ERROR_INVALID_PAGE, page))),
            },
            Action::CyclePerPage => {
                self.with_controller(|_, controller| {
                    let current = controller.per_page();
                    let next = PER_PAGE_CHOICES
                        .iter()
                        .copied()
                        .find(|choice| *choice > current)
                        .unwrap_or(PER_PAGE_CHOICES[0]);
                    Some(controller.set_per_page(next))
                });
                Action::None
            }
            Action::CycleSortField => {
                self.with_controller(|page, controller| {
                    let next = page.next_sort_field(controller.sort_by());
                    Some(controller.set_sort_by(next))
                });
                Action::None
            }
            Action::ToggleSortOrder => {
                self.with_controller(|_, controller| Some(controller.toggle_sort_order()));
                Action::None
            }
            Action::ApplyFilters(filters) => {
                self.logger
                    .log(format!("Filters: applying {} active filters", filters.active_count()));
                self.with_controller(move |_, controller| {
                    *controller.filters_mut() = filters;
                    Some(controller.apply_filters())
                });
                Action::None
            }
            Action::ResetFilters => {
                self.with_controller(|_, controller| Some(controller.reset_filters()));
                Action::None
            }
            Action::Refresh => {
                self.refresh_current();
                Action::None
            }
            Action::RefreshStatistics => {
                self.spawn_statistics(self.state.current);
                if self.dialog.showing_overview() {
                    Action::RefreshOverview
                } else {
                    Action::None
                }
            }
            Action::PageLoaded { resource, seq, result } => self.apply_page(resource, seq, result),
            Action::StatisticsLoaded {
                resource,
                seq,
                statistics,
            } => {
                if let Some(view) = self.view_mut(resource) {
                    if seq == view.statistics_seq {
                        view.statistics = statistics;
                    } else {
                        debug!("Discarding stale {} statistics #{} (latest #{})", resource, seq, view.statistics_seq);
                    }
                }
                Action::None
            }
            Action::ShowOverview => {
                self.dialog
                    .update(Action::ShowDialog(DialogType::Overview(self.overview.clone())));
                Action::RefreshOverview
            }
            Action::RefreshOverview => {
                self.spawn_overview();
                Action::None
            }
            Action::OverviewLoaded { seq, overview } => {
                if seq == self.overview_seq {
                    self.dialog.refresh_overview(overview.clone());
                    self.overview = Some(overview);
                } else {
                    debug!("Discarding stale overview #{} (latest #{})", seq, self.overview_seq);
                }
                Action::None
            }
            Action::ExportOverview => self.export_overview(),
            Action::UpdateAlert { alert_id, status } => {
                info!("Updating alert {} to {}", alert_id, status.code());
                self.task_manager
                    .spawn_alert_update(self.backend.clone(), alert_id, status);
                Action::None
            }
            Action::AlertUpdated { alert_id, status } => {
                self.state.notice = Some(format!("{}: #{} → {}", SUCCESS_ALERT_UPDATED, alert_id, status.label()));
                if let Some(view) = self.view_mut(ListResource::Alerts) {
                    let ticket = view.controller.fetch_page();
                    self.spawn_fetch(ticket);
                }
                self.spawn_statistics(ListResource::Alerts);
                Action::None
            }
            Action::Export => self.export_current(),
            Action::DownloadAlertDetails(alert_id) => {
                self.task_manager.spawn_download(
                    self.backend.clone(),
                    Download::AlertDetails(alert_id),
                    self.exporter.directory().to_path_buf(),
                );
                Action::None
            }
            Action::ExportParameters => {
                self.task_manager.spawn_download(
                    self.backend.clone(),
                    Download::Parameters,
                    self.exporter.directory().to_path_buf(),
                );
                Action::None
            }
            Action::GenerateReport(request) => {
                info!("Generating {} report {} to {}", request.kind, request.start_date, request.end_date);
                self.state.notice = Some(format!("Generating {}...", request.kind.label()));
                self.task_manager.spawn_download(
                    self.backend.clone(),
                    Download::Report(request),
                    self.exporter.directory().to_path_buf(),
                );
                Action::None
            }
            Action::FileSaved(path) => Action::ShowDialog(DialogType::Info(format!(
                "{}: {}",
                SUCCESS_REPORT_SAVED,
                path.display()
            ))),
            Action::ShowDialog(ref dialog_type) => {
                self.logger.log(format!("Dialog: showing {:?}", dialog_type));
                self.dialog.update(action)
            }
            Action::HideDialog => {
                let resource = self.state.current;
                if let Some(view) = self.view_mut(resource) {
                    view.controller.dismiss_error();
                }
                self.dialog.update(action)
            }
            Action::None => Action::None,
        }
    }

    fn apply_page(
        &mut self,
        resource: ListResource,
        seq: u64,
        result: Result<crate::backend::ListPage, crate::backend::BackendError>,
    ) -> Action {
        let Some(view) = self.view_mut(resource) else {
            return Action::None;
        };
        let outcome = view.controller.apply_response(seq, result);
        if resource == self.state.current {
            self.sync_component_data();
        }

        match outcome {
            FetchOutcome::Applied { rejected, .. } if rejected > 0 && resource == self.state.current => {
                self.state.notice = Some(format!("{} rows without a usable key were skipped", rejected));
                Action::None
            }
            FetchOutcome::Applied { .. } | FetchOutcome::Stale => Action::None,
            FetchOutcome::Failed(message) => Action::ShowDialog(DialogType::Error(message)),
        }
    }

    fn open_selected_row(&mut self) -> Action {
        if self.state.current != ListResource::Alerts {
            return Action::None;
        }
        let (Some(view), Some(row)) = (self.current_view(), self.grid.selected_row()) else {
            return Action::None;
        };
        match view.page.row_key.key_of(row) {
            Some(alert_id) => Action::ShowDialog(DialogType::AlertDetails {
                alert_id,
                row: row.clone(),
            }),
            None => Action::None,
        }
    }

    /// Export the rows on screen through the same columns the grid renders
    fn export_current(&mut self) -> Action {
        let Some(view) = self.current_view() else {
            return Action::None;
        };
        let result = self
            .exporter
            .export(Some(view.controller.rows()), &view.page.columns, view.page.export_name);

        match result {
            Ok(path) => {
                self.state.notice = Some(format!("{} {}", SUCCESS_EXPORTED, path.display()));
                Action::ShowDialog(DialogType::Info(format!("{} {}", SUCCESS_EXPORTED, path.display())))
            }
            Err(ExportError::NoData) => Action::ShowDialog(DialogType::Info(NOTICE_NO_DATA_TO_EXPORT.to_string())),
            Err(e) => {
                warn!("Export failed: {}", e);
                Action::ShowDialog(DialogType::Error(format!("{}: {}", ERROR_EXPORT_FAILED, e)))
            }
        }
    }

    /// Write the overview counters, as displayed, to `dashboard_overview_{date}.csv`
    fn export_overview(&mut self) -> Action {
        let Some(overview) = &self.overview else {
            return Action::ShowDialog(DialogType::Info(NOTICE_NO_DATA_TO_EXPORT.to_string()));
        };
        let records = export::records_from_objects(&pages::overview::metric_rows(overview));

        match export::write_csv(&records, pages::overview::EXPORT_NAME, self.exporter.directory()) {
            Ok(Some(path)) => {
                self.state.notice = Some(format!("{} {}", SUCCESS_EXPORTED, path.display()));
                Action::ShowDialog(DialogType::Info(format!("{} {}", SUCCESS_EXPORTED, path.display())))
            }
            Ok(None) => Action::ShowDialog(DialogType::Info(NOTICE_NO_DATA_TO_EXPORT.to_string())),
            Err(e) => {
                warn!("Overview export failed: {}", e);
                Action::ShowDialog(DialogType::Error(format!("{}: {}", ERROR_EXPORT_FAILED, e)))
            }
        }
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.dialog.is_visible() {
            return self.dialog.handle_key_events(key);
        }

        match self.handle_global_key(key) {
            Action::None => self.grid.handle_key_events(key),
            action => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let areas = LayoutManager::main_layout(rect);
        let tabs: Vec<(ListResource, &str)> = self
            .views
            .iter()
            .map(|view| (view.page.resource, view.page.title))
            .collect();
        ViewTabs::render(f, areas.tabs, &tabs, self.state.current);

        if let Some(view) = self.views.iter().find(|view| view.page.resource == self.state.current) {
            StatsBar::render(f, areas.statistics, &view.page.stat_cards, &view.statistics);
            ViewTabs::render_summary(f, areas.filters, &view.page, &view.controller);
            StatusBar::render(
                f,
                areas.status,
                &view.controller,
                self.state.notice.as_deref(),
                self.task_manager.task_count(),
            );
        }

        self.grid.render(f, areas.grid);

        if self.dialog.is_visible() {
            self.dialog.render(f, rect);
        }
    }
}
