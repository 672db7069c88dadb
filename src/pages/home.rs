use leptos::prelude::*;

use crate::components::network_map::NetworkMap;
use crate::components::{
	EntityPanel, FilterPanel, FocusPanel, LoadStatus, NetworkControls, StatsPanel, Timeline,
};
use crate::context::provide_dashboard;

/// Dashboard page: map in the middle, filters on the left, statistics and
/// network controls on the right, timeline along the bottom.
#[component]
pub fn Home() -> impl IntoView {
	provide_dashboard();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="dashboard">
				<header class="dashboard-header">
					<h1>"Press atlas"</h1>
					<LoadStatus />
				</header>
				<aside class="dashboard-left">
					<FilterPanel />
				</aside>
				<main class="dashboard-map">
					<NetworkMap />
				</main>
				<aside class="dashboard-right">
					<StatsPanel />
					<NetworkControls />
					<EntityPanel />
					<FocusPanel />
				</aside>
				<footer class="dashboard-timeline">
					<Timeline />
				</footer>
			</div>
		</ErrorBoundary>
	}
}
