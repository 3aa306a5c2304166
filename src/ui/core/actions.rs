use crate::backend::{AlertStatus, BackendError, ListPage, ListResource, Overview, ReportRequest, Statistics};
use crate::grid::Row;
use crate::list::FilterSet;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SwitchView(ListResource),
    NextView,
    OpenSelectedRow,

    // Paging and sorting
    NextPage,
    PreviousPage,
    GoToPage(u32),
    CyclePerPage,
    CycleSortField,
    ToggleSortOrder,

    // Filters
    ApplyFilters(FilterSet),
    ResetFilters,

    // Data loading
    Refresh,
    RefreshStatistics,
    PageLoaded {
        resource: ListResource,
        seq: u64,
        result: Result<ListPage, BackendError>,
    },
    StatisticsLoaded {
        resource: ListResource,
        seq: u64,
        statistics: Statistics,
    },

    // Dashboard overview
    ShowOverview,
    RefreshOverview,
    OverviewLoaded {
        seq: u64,
        overview: Overview,
    },
    ExportOverview,

    // Alert review
    UpdateAlert {
        alert_id: String,
        status: AlertStatus,
    },
    AlertUpdated {
        alert_id: String,
        status: AlertStatus,
    },

    // Files
    Export,
    DownloadAlertDetails(String),
    ExportParameters,
    GenerateReport(ReportRequest),
    FileSaved(PathBuf),

    // UI operations
    ShowDialog(DialogType),
    HideDialog,

    // App control
    Quit,
    None,
}

#[derive(Debug, Clone)]
pub enum DialogType {
    Error(String),
    Info(String),
    Help,
    Logs,
    Filters(FilterSet),
    GoToPage,
    AlertDetails { alert_id: String, row: Row },
    /// Report form: type and date range
    Report(FilterSet),
    /// Dashboard counters; `None` until the first response arrives
    Overview(Option<Overview>),
}
