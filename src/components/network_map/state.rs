use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::data::{ArticleDataset, Bounds, ProcessedItem, SpatialNetworkData};
use crate::network::IsolationMode;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#bcbd22",
	"#17becf",
];
const NO_COUNTRY_COLOR: &str = "#7f7f7f";

pub const MIN_NODE_RADIUS: f64 = 3.0;
pub const MAX_NODE_RADIUS: f64 = 14.0;
/// Extra hit slack around a node, screen pixels.
pub const HIT_PADDING: f64 = 4.0;
/// Pointer travel below which a press counts as a click.
pub const CLICK_SLOP: f64 = 4.0;
const MARGIN: f64 = 24.0;

/// West Africa, for when nothing carries coordinates yet.
const FALLBACK_BOUNDS: Bounds = Bounds {
	north: 16.0,
	south: 4.0,
	east: 4.0,
	west: -9.0,
};

/// Equirectangular fit of a geographic box into the canvas, north up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
	pub west: f64,
	pub north: f64,
	pub scale: f64,
	pub offset_x: f64,
	pub offset_y: f64,
}

impl Projection {
	pub fn fit(bounds: &Bounds, width: f64, height: f64) -> Self {
		let lng_span = bounds.lng_span().max(1e-6);
		let lat_span = bounds.lat_span().max(1e-6);
		let usable_w = (width - 2.0 * MARGIN).max(1.0);
		let usable_h = (height - 2.0 * MARGIN).max(1.0);
		let scale = (usable_w / lng_span).min(usable_h / lat_span);
		Self {
			west: bounds.west,
			north: bounds.north,
			scale,
			offset_x: (width - lng_span * scale) / 2.0,
			offset_y: (height - lat_span * scale) / 2.0,
		}
	}

	pub fn project(&self, lat: f64, lng: f64) -> (f64, f64) {
		(
			self.offset_x + (lng - self.west) * self.scale,
			self.offset_y + (self.north - lat) * self.scale,
		)
	}
}

/// Everything the map draws, as handed over by the stores.
#[derive(Clone, Debug, Default)]
pub struct MapScene {
	pub network: Arc<SpatialNetworkData>,
	pub dataset: Arc<ArticleDataset>,
	pub articles: Arc<Vec<ProcessedItem>>,
	pub isolation: IsolationMode,
	pub selected: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapNode {
	pub id: String,
	pub label: String,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapEdge {
	pub source: usize,
	pub target: usize,
	pub width: f64,
}

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
}

pub struct NetworkMapState {
	pub nodes: Vec<MapNode>,
	pub edges: Vec<MapEdge>,
	/// Projected outer rings of the country outlines.
	pub outlines: Vec<Vec<(f64, f64)>>,
	/// Projected positions of the visible articles.
	pub articles: Vec<(f64, f64)>,
	pub projection: Projection,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub hover: HoverState,
	pub highlight_t: f64,
	pub flow_time: f64,
	pub width: f64,
	pub height: f64,
	scene: MapScene,
}

impl NetworkMapState {
	pub fn new(width: f64, height: f64) -> Self {
		let mut state = Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			outlines: Vec::new(),
			articles: Vec::new(),
			projection: Projection::fit(&FALLBACK_BOUNDS, width, height),
			transform: ViewTransform::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			highlight_t: 0.0,
			flow_time: 0.0,
			width,
			height,
			scene: MapScene::default(),
		};
		state.rebuild();
		state
	}

	pub fn set_scene(&mut self, scene: MapScene) {
		let same_network = Arc::ptr_eq(&scene.network, &self.scene.network);
		self.scene = scene;
		self.rebuild();
		if !same_network {
			self.hover = HoverState::default();
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.rebuild();
	}

	pub fn is_selected(&self, idx: usize) -> bool {
		self.scene.selected.is_some() && self.scene.selected.as_deref() == self.node_id(idx)
	}

	pub fn node_id(&self, idx: usize) -> Option<&str> {
		self.nodes.get(idx).map(|n| n.id.as_str())
	}

	fn rebuild(&mut self) {
		let network = Arc::clone(&self.scene.network);
		let bounds = network
			.bounds
			.or_else(|| Bounds::around(network.nodes.iter().filter_map(|n| n.coordinates)))
			.or_else(|| Bounds::around(article_points(&self.scene.articles)))
			.unwrap_or(FALLBACK_BOUNDS);
		self.projection = Projection::fit(&bounds, self.width, self.height);

		let countries: BTreeSet<&str> = network.nodes.iter().filter_map(|n| n.country.as_deref()).collect();
		let max_count = network.nodes.iter().map(|n| n.count).max().unwrap_or(0).max(1) as f64;
		let max_weight = network.edges.iter().map(|e| e.weight).max().unwrap_or(0).max(1) as f64;

		self.nodes.clear();
		let mut index = HashMap::new();
		for node in &network.nodes {
			let Some([lat, lng]) = node.coordinates else {
				continue;
			};
			let (x, y) = self.projection.project(lat, lng);
			let color = node
				.country
				.as_deref()
				.and_then(|c| countries.iter().position(|k| *k == c))
				.map_or(NO_COUNTRY_COLOR, |i| COLORS[i % COLORS.len()]);
			index.insert(node.id.as_str(), self.nodes.len());
			self.nodes.push(MapNode {
				id: node.id.clone(),
				label: node.display_name().to_string(),
				x,
				y,
				radius: MIN_NODE_RADIUS + (MAX_NODE_RADIUS - MIN_NODE_RADIUS) * (node.count as f64 / max_count).sqrt(),
				color,
			});
		}

		self.edges = network
			.edges
			.iter()
			.filter_map(|e| {
				let (&source, &target) = (index.get(e.source.as_str())?, index.get(e.target.as_str())?);
				Some(MapEdge {
					source,
					target,
					width: 0.5 + 3.5 * (e.weight as f64 / max_weight).sqrt(),
				})
			})
			.collect();

		self.outlines = match &self.scene.dataset.world {
			Some(world) => world
				.areas
				.iter()
				.flat_map(|a| &a.polygons)
				.filter_map(|p| p.rings.first())
				.filter(|ring| ring.iter().any(|&[lng, lat]| near(&bounds, lat, lng)))
				.map(|ring| ring.iter().map(|&[lng, lat]| self.projection.project(lat, lng)).collect())
				.collect(),
			None => Vec::new(),
		};

		self.articles = article_points(&self.scene.articles)
			.map(|[lat, lng]| self.projection.project(lat, lng))
			.collect();

		if self.hover.node.is_some_and(|i| i >= self.nodes.len()) {
			self.hover = HoverState::default();
		}
	}

	pub fn screen_to_map(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the pointer.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (mx, my) = self.screen_to_map(sx, sy);
		let slack = HIT_PADDING / self.transform.k;
		self.nodes.iter().rposition(|n| {
			let (dx, dy) = (n.x - mx, n.y - my);
			(dx * dx + dy * dy).sqrt() < n.radius + slack
		})
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors.clear();
		if let Some(idx) = node {
			for edge in &self.edges {
				if edge.source == idx {
					self.hover.neighbors.insert(edge.target);
				} else if edge.target == idx {
					self.hover.neighbors.insert(edge.source);
				}
			}
		}
	}

	/// Isolation wins over hover.
	pub fn is_emphasized(&self, idx: usize) -> bool {
		match self.scene.isolation.highlighted() {
			Some(highlighted) => self.node_id(idx).is_some_and(|id| highlighted.contains(id)),
			None => self.hover.node == Some(idx) || self.hover.neighbors.contains(&idx),
		}
	}

	pub fn is_focus(&self, idx: usize) -> bool {
		match self.scene.isolation.target() {
			Some(target) => self.node_id(idx) == Some(target),
			None => self.hover.node == Some(idx),
		}
	}

	pub fn has_active_highlight(&self) -> bool {
		self.scene.isolation.is_active() || self.hover.node.is_some()
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			moved: false,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn drag_pan(&mut self, x: f64, y: f64) {
		if !self.pan.active {
			return;
		}
		let (dx, dy) = (x - self.pan.start_x, y - self.pan.start_y);
		if dx.abs() > CLICK_SLOP || dy.abs() > CLICK_SLOP {
			self.pan.moved = true;
		}
		if !self.pan.moved {
			return;
		}
		self.transform.x = self.pan.transform_start_x + dx;
		self.transform.y = self.pan.transform_start_y + dy;
	}

	/// Ends the pan; true when the press never moved far enough to pan.
	pub fn end_pan(&mut self) -> bool {
		let was_click = self.pan.active && !self.pan.moved;
		self.pan.active = false;
		was_click
	}

	/// Zoom by `factor` keeping the point under the pointer fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(0.5, 20.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
		let target = if self.has_active_highlight() { 1.0 } else { 0.0 };
		self.highlight_t += (target - self.highlight_t) * (6.0 * dt).min(1.0);
		if target == 0.0 && self.highlight_t < 0.01 {
			self.highlight_t = 0.0;
		}
	}
}

fn article_points(items: &[ProcessedItem]) -> impl Iterator<Item = [f64; 2]> + '_ {
	items.iter().filter_map(|i| i.coordinates.as_ref()).flatten().copied()
}

fn near(bounds: &Bounds, lat: f64, lng: f64) -> bool {
	let (lat_pad, lng_pad) = (bounds.lat_span(), bounds.lng_span());
	lat <= bounds.north + lat_pad
		&& lat >= bounds.south - lat_pad
		&& lng <= bounds.east + lng_pad
		&& lng >= bounds.west - lng_pad
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::{NetworkEdge, NetworkMeta, SpatialNetworkNode};

	fn node(id: &str, coordinates: Option<[f64; 2]>, count: u32) -> SpatialNetworkNode {
		SpatialNetworkNode {
			id: id.into(),
			country: Some("Togo".into()),
			coordinates,
			count,
			label: None,
			region: None,
			prefecture: None,
			degree: None,
			strength: None,
		}
	}

	fn edge(source: &str, target: &str) -> NetworkEdge {
		NetworkEdge {
			source: source.into(),
			target: target.into(),
			weight: 3,
			kind: None,
			weight_norm: None,
			article_ids: Vec::new(),
		}
	}

	fn scene() -> MapScene {
		MapScene {
			network: Arc::new(SpatialNetworkData {
				nodes: vec![
					node("lome", Some([6.13, 1.22]), 10),
					node("kara", Some([9.55, 1.19]), 2),
					node("nowhere", None, 4),
				],
				edges: vec![edge("lome", "kara"), edge("kara", "nowhere")],
				bounds: Some(Bounds {
					north: 11.0,
					south: 6.0,
					east: 2.0,
					west: 0.0,
				}),
				meta: NetworkMeta::default(),
			}),
			..Default::default()
		}
	}

	fn state() -> NetworkMapState {
		let mut state = NetworkMapState::new(800.0, 600.0);
		state.set_scene(scene());
		state
	}

	#[test]
	fn projection_keeps_north_up_inside_canvas() {
		let bounds = Bounds {
			north: 10.0,
			south: 0.0,
			east: 10.0,
			west: 0.0,
		};
		let p = Projection::fit(&bounds, 400.0, 300.0);
		let (nw_x, nw_y) = p.project(10.0, 0.0);
		let (se_x, se_y) = p.project(0.0, 10.0);
		assert!(nw_y < se_y);
		assert!(nw_x < se_x);
		for v in [nw_x, se_x] {
			assert!((0.0..=400.0).contains(&v));
		}
		for v in [nw_y, se_y] {
			assert!((0.0..=300.0).contains(&v));
		}
	}

	#[test]
	fn unplaced_nodes_and_their_edges_are_skipped() {
		let state = state();
		assert_eq!(state.nodes.len(), 2);
		assert_eq!(state.edges.len(), 1);
		assert!(state.nodes[0].radius > state.nodes[1].radius);
	}

	#[test]
	fn hit_test_and_hover_neighbours() {
		let mut state = state();
		let (x, y) = (state.nodes[1].x, state.nodes[1].y);
		assert_eq!(state.node_at_position(x, y), Some(1));
		assert_eq!(state.node_at_position(x + 100.0, y + 100.0), None);
		state.set_hover(Some(1));
		assert!(state.is_emphasized(0));
		assert!(state.is_focus(1));
	}

	#[test]
	fn isolation_overrides_hover() {
		let mut state = state();
		let mut isolation = IsolationMode::Off;
		isolation.toggle("lome", &state.scene.network.edges);
		state.set_scene(MapScene {
			isolation,
			..scene()
		});
		state.set_hover(None);
		assert!(state.has_active_highlight());
		assert!(state.is_focus(0));
		assert!(state.is_emphasized(1));
	}

	#[test]
	fn short_press_is_a_click() {
		let mut state = state();
		state.begin_pan(10.0, 10.0);
		state.drag_pan(11.0, 12.0);
		assert!(state.end_pan());
		assert_eq!((state.transform.x, state.transform.y), (0.0, 0.0));
		state.begin_pan(10.0, 10.0);
		state.drag_pan(60.0, 10.0);
		assert!(!state.end_pan());
		assert_eq!(state.transform.x, 50.0);
	}

	#[test]
	fn pan_jitter_below_slop_leaves_map_still() {
		let mut state = state();
		state.begin_pan(100.0, 100.0);
		state.drag_pan(103.0, 97.0);
		assert_eq!((state.transform.x, state.transform.y), (0.0, 0.0));
		// once past the slop the whole travel applies
		state.drag_pan(110.0, 100.0);
		assert_eq!((state.transform.x, state.transform.y), (10.0, 0.0));
		assert!(!state.end_pan());
	}

	#[test]
	fn zoom_keeps_pointer_fixed() {
		let mut state = state();
		let before = state.screen_to_map(200.0, 150.0);
		state.zoom_at(200.0, 150.0, 2.0);
		let after = state.screen_to_map(200.0, 150.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}
}
