mod entity_panel;
mod filter_panel;
mod focus_panel;
mod load_status;
pub mod network_map;
mod network_controls;
mod stats_panel;
mod timeline;

pub use entity_panel::EntityPanel;
pub use filter_panel::FilterPanel;
pub use focus_panel::FocusPanel;
pub use load_status::LoadStatus;
pub use network_controls::NetworkControls;
pub use stats_panel::StatsPanel;
pub use timeline::Timeline;

/// A `<select>` value, where the blank first option means no selection.
fn select_value(value: String) -> Option<String> {
	(!value.is_empty()).then_some(value)
}
