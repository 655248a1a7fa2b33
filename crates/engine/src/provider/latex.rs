//! LaTeX command completion inside math blocks.

use super::{Suggestion, SuggestionContext, SuggestionProvider};
use crate::buffer::Buffer;
use crate::context::is_in_math_or_code_block;
use crate::settings::Settings;
use vellum_primitives::Position;

/// Commands offered as-is. Brace arguments carry `#` tab-stops.
const COMMANDS: &[&str] = &[
	"\\frac{#}{#}",
	"\\sqrt{#}",
	"\\sqrt[#]{#}",
	"\\sum_{#}^{#}",
	"\\prod_{#}^{#}",
	"\\int_{#}^{#}",
	"\\lim_{#}",
	"\\binom{#}{#}",
	"\\overline{#}",
	"\\underline{#}",
	"\\overbrace{#}",
	"\\underbrace{#}",
	"\\vec{#}",
	"\\hat{#}",
	"\\tilde{#}",
	"\\dot{#}",
	"\\ddot{#}",
	"\\bar{#}",
	"\\text{#}",
	"\\textbf{#}",
	"\\mathbb{#}",
	"\\mathbf{#}",
	"\\mathcal{#}",
	"\\mathrm{#}",
	"\\operatorname{#}",
	"\\left(#\\right)",
	"\\left[#\\right]",
	"\\left\\{#\\right\\}",
	"\\alpha",
	"\\beta",
	"\\gamma",
	"\\delta",
	"\\epsilon",
	"\\varepsilon",
	"\\theta",
	"\\lambda",
	"\\mu",
	"\\pi",
	"\\rho",
	"\\sigma",
	"\\tau",
	"\\phi",
	"\\varphi",
	"\\chi",
	"\\psi",
	"\\omega",
	"\\Gamma",
	"\\Delta",
	"\\Theta",
	"\\Lambda",
	"\\Pi",
	"\\Sigma",
	"\\Phi",
	"\\Psi",
	"\\Omega",
	"\\infty",
	"\\partial",
	"\\nabla",
	"\\cdot",
	"\\cdots",
	"\\dots",
	"\\times",
	"\\pm",
	"\\mp",
	"\\leq",
	"\\geq",
	"\\neq",
	"\\approx",
	"\\equiv",
	"\\sim",
	"\\subset",
	"\\subseteq",
	"\\supset",
	"\\in",
	"\\notin",
	"\\cup",
	"\\cap",
	"\\setminus",
	"\\emptyset",
	"\\forall",
	"\\exists",
	"\\land",
	"\\lor",
	"\\lnot",
	"\\implies",
	"\\iff",
	"\\rightarrow",
	"\\leftarrow",
	"\\Rightarrow",
	"\\Leftarrow",
	"\\leftrightarrow",
	"\\mapsto",
];

/// Multi-line environments, offered by name. The `~` drops the cursor hint
/// left on the middle line.
const ENVIRONMENTS: &[&str] = &["matrix", "pmatrix", "bmatrix", "vmatrix", "cases", "align", "aligned", "gather"];

/// Completes LaTeX commands and environments inside math blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexProvider;

impl LatexProvider {
	/// Creates the provider.
	pub fn new() -> Self {
		Self
	}
}

impl SuggestionProvider for LatexProvider {
	fn get_suggestions(&self, buffer: &Buffer, ctx: &SuggestionContext, settings: &Settings) -> Vec<Suggestion> {
		if !settings.latex_provider_enabled || ctx.query.is_empty() {
			return Vec::new();
		}
		if !is_in_math_or_code_block(buffer, ctx.start, settings.latex_trigger_in_code_blocks) {
			return Vec::new();
		}

		// A typed backslash sits just before the query; widen the
		// replacement range over it so the command's own backslash does not
		// double up.
		let override_start = (ctx.separator_char == Some('\\')).then(|| Position::new(ctx.start.line, ctx.start.ch - 1));

		// Smart case: an all-lowercase query matches case-insensitively.
		let fold = ctx.query.chars().all(|c| !c.is_uppercase());
		let query = if fold { ctx.query.to_lowercase() } else { ctx.query.clone() };

		let mut results: Vec<Suggestion> = COMMANDS
			.iter()
			.filter(|command| {
				let name = command.trim_start_matches('\\');
				let name = if fold { name.to_lowercase() } else { name.to_string() };
				name.starts_with(&query)
			})
			.map(|command| Suggestion::from_string(*command).with_override(override_start, None))
			.collect();

		results.extend(
			ENVIRONMENTS
				.iter()
				.filter(|env| env.starts_with(&query))
				.map(|env| {
					Suggestion::new(format!("\\begin{{{env}}}"), format!("\\begin{{{env}}}\n~\n\\end{{{env}}}"))
						.with_override(override_start, None)
				}),
		);

		results.sort_by_key(|s| s.display_name.chars().count());
		results
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn math_context(query: &str) -> (Buffer, SuggestionContext) {
		let text = format!("$ {query}");
		let buffer = Buffer::new(&text);
		let start = Position::new(0, 2);
		let end = Position::new(0, 2 + query.chars().count());
		(
			buffer,
			SuggestionContext {
				query: query.to_string(),
				start,
				end,
				separator_char: Some(' '),
			},
		)
	}

	fn names(suggestions: &[Suggestion]) -> Vec<&str> {
		suggestions.iter().map(|s| s.display_name.as_str()).collect()
	}

	#[test]
	fn completes_commands_inside_math() {
		let (buffer, ctx) = math_context("fra");
		let provider = LatexProvider::new();
		let results = provider.get_suggestions(&buffer, &ctx, &Settings::default());
		assert_eq!(names(&results), vec!["\\frac{#}{#}"]);
	}

	#[test]
	fn outside_math_yields_nothing() {
		let buffer = Buffer::new("plain fra");
		let ctx = SuggestionContext {
			query: "fra".to_string(),
			start: Position::new(0, 6),
			end: Position::new(0, 9),
			separator_char: Some(' '),
		};
		assert!(LatexProvider::new().get_suggestions(&buffer, &ctx, &Settings::default()).is_empty());
	}

	#[test]
	fn typed_backslash_is_absorbed_into_the_replacement() {
		let buffer = Buffer::new("$ \\fra");
		let ctx = SuggestionContext {
			query: "fra".to_string(),
			start: Position::new(0, 3),
			end: Position::new(0, 6),
			separator_char: Some('\\'),
		};
		let results = LatexProvider::new().get_suggestions(&buffer, &ctx, &Settings::default());
		assert_eq!(results[0].override_start, Some(Position::new(0, 2)));
	}

	#[test]
	fn smart_case_distinguishes_greek_letters() {
		let (buffer, ctx) = math_context("Sig");
		let results = LatexProvider::new().get_suggestions(&buffer, &ctx, &Settings::default());
		assert_eq!(names(&results), vec!["\\Sigma"]);

		let (buffer, ctx) = math_context("sig");
		let results = LatexProvider::new().get_suggestions(&buffer, &ctx, &Settings::default());
		assert_eq!(names(&results), vec!["\\sigma", "\\Sigma"]);
	}

	#[test]
	fn environment_snippets_wrap_a_cursor_hint() {
		let (buffer, ctx) = math_context("cas");
		let results = LatexProvider::new().get_suggestions(&buffer, &ctx, &Settings::default());
		assert_eq!(results[0].display_name, "\\begin{cases}");
		assert_eq!(results[0].replacement, "\\begin{cases}\n~\n\\end{cases}");
	}

	#[test]
	fn disabled_provider_returns_nothing() {
		let (buffer, ctx) = math_context("fra");
		let settings = Settings {
			latex_provider_enabled: false,
			..Settings::default()
		};
		assert!(LatexProvider::new().get_suggestions(&buffer, &ctx, &settings).is_empty());
	}
}
