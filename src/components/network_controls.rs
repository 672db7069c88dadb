use leptos::prelude::*;

use crate::context::use_dashboard;

/// Country visibility, weight threshold, isolated-node switch and reset for
/// the spatial network, plus details of the selected node.
#[component]
pub fn NetworkControls() -> impl IntoView {
	let network = use_dashboard().network;

	let max_weight = move || network.with(|n| n.weight_ceiling().to_string());
	let weight_min = move || network.with(|n| n.params().weight_min);

	let countries = move || {
		let rows: Vec<(String, bool)> = network.with(|n| {
			n.all_countries()
				.into_iter()
				.map(|c| {
					let visible = n.params().visible_countries.contains(&c);
					(c, visible)
				})
				.collect()
		});
		rows.into_iter()
			.map(|(country, visible)| {
				let value = country.clone();
				view! {
					<label class="check-row">
						<input
							type="checkbox"
							prop:checked=visible
							on:change=move |_| network.update(|n| n.toggle_country(&value))
						/>
						{country}
					</label>
				}
			})
			.collect_view()
	};

	let summary = move || {
		network.with(|n| {
			let meta = &n.filtered().meta;
			let mut text = format!("{} places, {} links", meta.total_nodes, meta.total_edges);
			if !n.report().is_clean() {
				text.push_str(&format!(" ({} data warnings)", n.report().warning_count()));
			}
			text
		})
	};

	let isolation = move || {
		network
			.with(|n| {
				let target = n.isolation().target()?;
				let name = n.raw()?.node(target).map_or(target, |node| node.display_name());
				Some(format!("Isolating {}", name))
			})
			.map(|text| {
				view! {
					<p class="isolation-status">
						{text}
						<button on:click=move |_| network.update(|n| n.disable_isolation())>"Show all"</button>
					</p>
				}
			})
	};

	let selected = move || {
		network.with(|n| {
			let id = n.selected_node()?;
			let node = n.raw()?.node(id)?;
			let mut details = vec![format!("{} articles", node.count)];
			if let Some(country) = &node.country {
				details.push(country.clone());
			}
			if let Some(region) = &node.region {
				details.push(region.clone());
			}
			if let Some(prefecture) = &node.prefecture {
				details.push(prefecture.clone());
			}
			Some((node.display_name().to_string(), details.join(" · ")))
		})
		.map(|(name, details)| {
			view! {
				<div class="selected-node">
					<h3>{name}</h3>
					<p>{details}</p>
				</div>
			}
		})
	};

	view! {
		<section class="panel network-controls">
			<h2>"Place network"</h2>
			<p class="network-summary">{summary}</p>
			{isolation}
			{selected}
			<fieldset class="check-list">
				<legend>"Countries"</legend>
				{countries}
			</fieldset>
			<label class="weight-min">
				{move || format!("Minimum co-mentions: {}", weight_min())}
				<input
					type="range"
					min="1"
					max=max_weight
					prop:value=move || weight_min().to_string()
					on:input=move |ev| {
						if let Ok(weight) = event_target_value(&ev).parse::<u32>() {
							network.update(|n| n.set_weight_min(weight));
						}
					}
				/>
			</label>
			<label class="check-row">
				<input
					type="checkbox"
					prop:checked=move || network.with(|n| n.params().show_isolated_nodes)
					on:change=move |ev| {
						let show = event_target_checked(&ev);
						network.update(|n| n.set_show_isolated_nodes(show));
					}
				/>
				"Show places without links"
			</label>
			<button on:click=move |_| network.update(|n| n.reset())>"Reset network"</button>
		</section>
	}
}
