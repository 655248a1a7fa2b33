//! Ordered suggestion gathering.
//!
//! Sources run in priority order. An exclusive source with results
//! short-circuits the walk; survivors are deduplicated by display name and
//! filtered against the blacklist. "Nothing to show" is an explicit [`None`],
//! distinct from rendering an empty list, so callers close the popup instead.

use rustc_hash::FxHashSet;
use vellum_primitives::Position;

use crate::buffer::Buffer;
use crate::provider::blacklist::SuggestionBlacklist;
use crate::provider::{Suggestion, SuggestionContext, SuggestionProvider};
use crate::settings::Settings;

/// The outcome of a pipeline run that produced at least one suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatherResult {
	/// The surviving suggestions, in source priority order.
	pub suggestions: Vec<Suggestion>,
	/// Popup anchor correction propagated from an exclusive source.
	pub override_start: Option<Position>,
}

/// Runs `providers` in order and collects their suggestions.
///
/// Returns [`None`] when nothing survives deduplication and the blacklist.
pub fn gather_suggestions(
	providers: &[&dyn SuggestionProvider],
	buffer: &Buffer,
	ctx: &SuggestionContext,
	settings: &Settings,
	blacklist: &SuggestionBlacklist,
) -> Option<GatherResult> {
	let mut suggestions = Vec::new();
	let mut override_start = None;
	for provider in providers {
		let results = provider.get_suggestions(buffer, ctx, settings);
		let exclusive = provider.blocks_all_other_providers() && !results.is_empty();
		if exclusive {
			override_start = results.iter().find_map(|s| s.override_start);
		}
		suggestions.extend(results);
		if exclusive {
			break;
		}
	}

	let mut seen: FxHashSet<String> = FxHashSet::default();
	suggestions.retain(|s| seen.insert(s.display_name.clone()) && !blacklist.has(s));

	if suggestions.is_empty() {
		None
	} else {
		Some(GatherResult { suggestions, override_start })
	}
}
