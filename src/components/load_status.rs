use leptos::prelude::*;

use crate::context::use_dashboard;

/// Progress and failures of the startup loads.
#[component]
pub fn LoadStatus() -> impl IntoView {
	let dash = use_dashboard();

	let loading = move || {
		dash.map.with(|m| m.load_state().is_loading()) || dash.network.with(|n| n.load_state().is_loading())
	};

	let errors = move || {
		let mut messages = Vec::new();
		dash.map.with(|m| messages.extend(m.load_state().error().map(str::to_string)));
		dash.network.with(|n| messages.extend(n.load_state().error().map(str::to_string)));
		dash.entities.with(|e| messages.extend(e.load_state().error().map(str::to_string)));
		messages
			.into_iter()
			.map(|message| view! { <p class="load-error">{message}</p> })
			.collect_view()
	};

	view! {
		<div class="load-status">
			<Show when=loading>
				<p class="loading">"Loading data..."</p>
			</Show>
			{errors}
			<button
				class="reload"
				disabled=loading
				on:click=move |_| dash.load_all()
			>
				"Reload data"
			</button>
		</div>
	}
}
