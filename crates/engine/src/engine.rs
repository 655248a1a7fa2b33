//! The completion engine facade.
//!
//! Owns the settings, the suggestion sources, the snippet manager, and the
//! event-coalescing state that separates "cursor moved because of my own
//! edit" from "the user moved the cursor". Everything runs synchronously on
//! the host's event thread.

use regex::Regex;
use tracing::debug;
use vellum_primitives::Position;

use crate::buffer::Buffer;
use crate::period::PeriodInserter;
use crate::pipeline::{GatherResult, gather_suggestions};
use crate::provider::blacklist::SuggestionBlacklist;
use crate::provider::callout::CalloutProvider;
use crate::provider::front_matter::FrontMatterProvider;
use crate::provider::latex::LatexProvider;
use crate::provider::scanner::ScannerProvider;
use crate::provider::word_list::WordListProvider;
use crate::provider::{Suggestion, SuggestionContext, SuggestionProvider};
use crate::settings::{Settings, SettingsError};
use crate::snippet::SnippetManager;

/// The engine: trigger, gather, apply, and event coalescing.
///
/// The provider fields are public so the host can feed them (word lists,
/// scanned documents, the callout catalog, front matter metadata) through
/// its own load/unload lifecycle.
pub struct CompletionEngine {
	settings: Settings,
	word_char: Regex,
	/// Words loaded from word lists.
	pub word_list: WordListProvider,
	/// Words harvested from scanned documents.
	pub scanner: ScannerProvider,
	/// Front matter key/value completion.
	pub front_matter: FrontMatterProvider,
	/// Callout type completion.
	pub callout: CalloutProvider,
	/// LaTeX command completion.
	pub latex: LatexProvider,
	/// Display names never suggested.
	pub blacklist: SuggestionBlacklist,
	/// Live snippet placeholders.
	pub snippets: SnippetManager,
	period: PeriodInserter,
	/// One-shot: suppresses the popup from reopening right after a
	/// completion was applied.
	just_closed: bool,
	/// One-shot: marks the next cursor-activity event as caused by an
	/// engine edit.
	self_edit: bool,
}

impl CompletionEngine {
	/// Creates an engine with the given settings.
	pub fn new(settings: Settings) -> Result<Self, SettingsError> {
		let word_char = settings.word_char_pattern()?;
		Ok(Self {
			settings,
			word_char,
			word_list: WordListProvider::new(),
			scanner: ScannerProvider::new(),
			front_matter: FrontMatterProvider::new(),
			callout: CalloutProvider::new(),
			latex: LatexProvider::new(),
			blacklist: SuggestionBlacklist::new(),
			snippets: SnippetManager::new(),
			period: PeriodInserter::new(),
			just_closed: false,
			self_edit: false,
		})
	}

	/// The current settings.
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// Replaces the settings, recompiling the word character class.
	pub fn set_settings(&mut self, settings: Settings) -> Result<(), SettingsError> {
		self.word_char = settings.word_char_pattern()?;
		self.settings = settings;
		Ok(())
	}

	/// Computes the completion context at `cursor`, or [`None`] when the
	/// popup should not open.
	///
	/// Consumes the one-shot just-closed flag; a cursor at column zero never
	/// triggers.
	pub fn trigger(&mut self, buffer: &Buffer, cursor: Position) -> Option<SuggestionContext> {
		if self.just_closed {
			self.just_closed = false;
			return None;
		}
		if cursor.ch == 0 {
			return None;
		}

		let (query, separator_char) = buffer.match_word_backwards(
			cursor,
			|c| self.word_char.is_match(c.encode_utf8(&mut [0; 4])),
			self.settings.max_look_back_distance,
		);
		let start = Position::new(cursor.line, cursor.ch - query.chars().count());
		Some(SuggestionContext {
			query,
			start,
			end: cursor,
			separator_char,
		})
	}

	/// Runs the pipeline for a context produced by [`Self::trigger`].
	pub fn gather(&self, buffer: &Buffer, ctx: &SuggestionContext) -> Option<GatherResult> {
		if ctx.query.is_empty() {
			return None;
		}
		let providers: [&dyn SuggestionProvider; 5] = [
			&self.front_matter,
			&self.latex,
			&self.callout,
			&self.word_list,
			&self.scanner,
		];
		gather_suggestions(&providers, buffer, ctx, &self.settings, &self.blacklist)
	}

	/// Inserts `suggestion` over the context range, honoring its override
	/// positions, and hands snippet markers to the placeholder manager.
	pub fn apply(&mut self, buffer: &mut Buffer, ctx: &SuggestionContext, suggestion: &Suggestion) {
		let start = suggestion.override_start.unwrap_or(ctx.start);
		let end = suggestion.override_end.unwrap_or(ctx.end);

		self.begin_self_edit();
		buffer.replace_range(&suggestion.replacement, start, end);
		if suggestion.has_snippet_markers() {
			self.snippets.handle_snippet(&suggestion.replacement, start, buffer);
		} else if self.settings.insert_period_after_spaces {
			self.period.allow_insert_period();
		}
		self.just_closed = true;
		debug!(suggestion = %suggestion.display_name, "applied suggestion");
	}

	/// Flags the next cursor-activity event as caused by an engine edit, so
	/// it neither closes the popup state nor drops placeholders.
	pub fn begin_self_edit(&mut self) {
		self.self_edit = true;
	}

	/// Cursor-activity callback.
	///
	/// A move caused by the engine's own edit (see [`Self::begin_self_edit`])
	/// is ignored; any other move disarms the period inserter and drops the
	/// placeholders the cursor left.
	pub fn on_cursor_activity(&mut self, buffer: &mut Buffer, pos: Position) {
		if self.self_edit {
			self.self_edit = false;
			return;
		}

		self.period.cancel_insert_period();
		if self.snippets.placeholder_at_pos(buffer, pos).is_none() {
			self.snippets.clear_all_placeholders(buffer);
		}
	}

	/// Tab/Enter entry point.
	///
	/// Consumes the placeholder at the cursor and advances to the next one;
	/// when the chain is exhausted, the cursor steps past the consumed
	/// placeholder instead. Returns false when the key should fall through
	/// to the default editor behavior.
	pub fn jump_to_placeholder(&mut self, buffer: &mut Buffer) -> bool {
		let cursor = buffer.cursor();
		let Some(placeholder) = self.snippets.placeholder_at_pos(buffer, cursor) else {
			return false;
		};
		let end = buffer.find_mark(placeholder.mark()).map(|(_, to)| to);

		self.begin_self_edit();
		if !self.snippets.consume_and_goto_next_marker(buffer)
			&& let Some(end) = end
		{
			buffer.clear_selection();
			buffer.set_cursor(Position::new(end.line, (end.ch + 1).min(buffer.line_len(end.line))));
		}
		true
	}

	/// Space keystroke hook for the period inserter; call before forwarding
	/// the keystroke to the editor.
	pub fn on_space_typed(&mut self, buffer: &mut Buffer) {
		if self.settings.insert_period_after_spaces && self.period.can_insert_period() {
			self.begin_self_edit();
			self.period.attempt_insert(buffer);
		}
	}

	/// Whether the period inserter is armed. Exposed for the host's
	/// keystroke routing.
	pub fn period_armed(&self) -> bool {
		self.period.can_insert_period()
	}
}
