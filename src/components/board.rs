//! The group board: one card per group, merge by drag and drop.
//!
//! Dragging a card's header onto another card merges the dragged group into
//! the one it is dropped on. The toolbar steps back and forth through the
//! grouping history or restores the default grouping. Opening a card shows its
//! group in a larger detail canvas.

use leptos::prelude::*;
use web_sys::{DragEvent, MouseEvent};

use super::force_graph::ForceGraphCanvas;
use crate::config::BoardConfig;
use crate::grouping::{GroupLink, GroupSummary, GroupingSession, display_name};

/// MIME type carrying the dragged group key.
const DRAG_FORMAT: &str = "text/plain";

/// Renders every group of `session` as a card, plus the toolbar and detail view.
#[component]
pub fn GroupBoard(session: RwSignal<GroupingSession>, config: BoardConfig) -> impl IntoView {
	let selected = RwSignal::new(None::<String>);
	let keys = Memo::new(move |_| session.with(|s| s.group_keys()));
	let links = Memo::new(move |_| session.with(|s| s.cross_group_links()));
	let (card_height, detail_height) = (config.card_height, config.detail_height);

	view! {
		<Toolbar session />
		<Show
			when=move || keys.with(|k| !k.is_empty())
			fallback=|| view! { <p class="notice">"No resources loaded."</p> }
		>
			<div class="group-board">
				<For
					each=move || keys.get()
					key=|key| key.clone()
					children=move |key| {
						view! { <GroupCard session group_key=key links height=card_height selected /> }
					}
				/>
			</div>
		</Show>
		{move || {
			selected
				.get()
				.map(|key| {
					view! { <GroupDetail session group_key=key height=detail_height selected /> }
				})
		}}
	}
}

#[component]
fn Toolbar(session: RwSignal<GroupingSession>) -> impl IntoView {
	let can_undo = move || session.with(|s| s.can_undo());
	let can_redo = move || session.with(|s| s.can_redo());

	view! {
		<nav class="toolbar">
			<button
				on:click=move |_| session.update(|s| {
					s.undo();
				})
				disabled=move || !can_undo()
				title=move || format!("{} step(s)", session.with(|s| s.undo_depth()))
			>
				"Undo"
			</button>
			<button
				on:click=move |_| session.update(|s| {
					s.redo();
				})
				disabled=move || !can_redo()
				title=move || format!("{} step(s)", session.with(|s| s.redo_depth()))
			>
				"Redo"
			</button>
			<button on:click=move |_| session.update(|s| {
				s.reset_to_default_partition();
			})>"Reset grouping"</button>
		</nav>
	}
}

#[component]
fn GroupCard(
	session: RwSignal<GroupingSession>,
	group_key: String,
	links: Memo<Vec<GroupLink>>,
	height: f64,
	selected: RwSignal<Option<String>>,
) -> impl IntoView {
	let summary = Memo::new({
		let key = group_key.clone();
		move |_| session.with(|s| s.summary(&key))
	});
	let elements = Memo::new({
		let key = group_key.clone();
		move |_| session.with(|s| s.elements(&key).unwrap_or_default())
	});
	let figure = move |f: fn(&GroupSummary) -> usize| {
		move || summary.with(|s| s.as_ref().map(f).unwrap_or(0))
	};
	let outgoing = {
		let key = group_key.clone();
		move || link_total(&links.get(), |l| l.source == key)
	};
	let incoming = {
		let key = group_key.clone();
		move || link_total(&links.get(), |l| l.target == key)
	};

	let on_dragstart = {
		let key = group_key.clone();
		move |ev: DragEvent| {
			if let Some(transfer) = ev.data_transfer() {
				let _ = transfer.set_data(DRAG_FORMAT, &key);
				transfer.set_effect_allowed("move");
			}
		}
	};
	let on_dragover = move |ev: DragEvent| {
		ev.prevent_default();
		if let Some(transfer) = ev.data_transfer() {
			transfer.set_drop_effect("move");
		}
	};
	let on_drop = {
		let key = group_key.clone();
		move |ev: DragEvent| {
			ev.prevent_default();
			let Some(source) = ev
				.data_transfer()
				.and_then(|t| t.get_data(DRAG_FORMAT).ok())
				.filter(|s| !s.is_empty())
			else {
				return;
			};
			session.update(|s| {
				let _ = s.merge_groups(&source, &key);
			});
		}
	};
	let open = {
		let key = group_key.clone();
		move |_: MouseEvent| selected.set(Some(key.clone()))
	};

	view! {
		<article class="group-card" on:dragover=on_dragover on:drop=on_drop>
			<header class="group-card-header" draggable="true" on:dragstart=on_dragstart>
				<h3>{display_name(&group_key)}</h3>
				<span class="badge layer-foundations" title="foundations">
					"F " {figure(|s| s.layers.foundations)}
				</span>
				<span class="badge layer-platforms" title="platforms">
					"P " {figure(|s| s.layers.platforms)}
				</span>
				<span class="badge layer-apps" title="apps">
					"A " {figure(|s| s.layers.apps)}
				</span>
				<button on:click=open>"Open"</button>
			</header>
			<ForceGraphCanvas data=elements height />
			<footer class="group-card-figures">
				<span class="badge">{figure(|s| s.resources)} " resources"</span>
				<span class="badge">{figure(|s| s.links)} " links"</span>
				<span class="badge">{figure(|s| s.accounts)} " accounts"</span>
				<span class="badge">{figure(|s| s.regions)} " regions"</span>
				<span class="badge" title="edges to other groups">"→ " {outgoing}</span>
				<span class="badge" title="edges from other groups">"← " {incoming}</span>
			</footer>
		</article>
	}
}

#[component]
fn GroupDetail(
	session: RwSignal<GroupingSession>,
	group_key: String,
	height: f64,
	selected: RwSignal<Option<String>>,
) -> impl IntoView {
	let elements = Memo::new({
		let key = group_key.clone();
		move |_| session.with(|s| s.elements(&key))
	});

	view! {
		<section class="group-detail">
			<header>
				<h2>{display_name(&group_key)}</h2>
				<button on:click=move |_| selected.set(None)>"Close"</button>
			</header>
			<Show
				when=move || elements.with(Option::is_some)
				fallback=|| view! { <p class="notice">"No such group."</p> }
			>
				<ForceGraphCanvas
					data=Signal::derive(move || elements.get().unwrap_or_default())
					height
				/>
			</Show>
		</section>
	}
}

fn link_total(links: &[GroupLink], matches: impl Fn(&GroupLink) -> bool) -> usize {
	links.iter().filter(|l| matches(l)).map(|l| l.count).sum()
}
