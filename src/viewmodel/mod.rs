mod app_viewmodel;
mod picker_viewmodel;
mod scan_viewmodel;
mod selection;
mod tree_viewmodel;

pub use app_viewmodel::{Action, AppViewModel, LastScan, ViewMode};
pub use picker_viewmodel::{PickerEntry, PickerViewModel, PARENT_LABEL};
pub use scan_viewmodel::ScanViewModel;
pub use selection::Selectable;
pub use tree_viewmodel::{SliceView, SortKey, TreeViewModel};
