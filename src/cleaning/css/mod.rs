
use fancy_regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::catalog::{PatternCatalog, TryRegex};
use crate::{PrepError, Result};

/// Suspicious lines tolerated inside an open block before the scan aborts
pub const DEFAULT_WARN_LIMIT: usize = 7;

static SINGLE_LINE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{\{.*\}\}").expect("regex is valid"));

static WRAPPER_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{\{([)(#\w:\s-]*,*)*").expect("regex is valid"));

/// Line-by-line state of the standard pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssScanState {
    pub net_bracket_depth: usize,
    pub suspicious_run: usize,
    pub suspicious_lines: Vec<String>,
}

impl CssScanState {
    fn reset_suspicion(&mut self) {
        self.suspicious_run = 0;
        self.suspicious_lines.clear();
    }
}

fn bracket_delta(line: &str) -> isize {
    let opens = line.matches('{').count() as isize;
    let closes = line.matches('}').count() as isize;
    opens - closes
}

/// Whether a line is recognisably CSS: a catalog match, or a one-line
/// `.selector { ... }` rule
#[inline]
pub fn is_known_css(line: &str, catalog: &PatternCatalog) -> Result<bool> {
    let line = line.trim();
    if catalog.matches_noisy_css(line)? {
        return Ok(true);
    }
    Ok(line.starts_with('.') && line.contains('{') && line.contains('}'))
}

/// Remove `{{wrapper ...}}` blocks, keeping the prose they wrap
fn strip_wrappers<'a>(lines: &[&'a str], catalog: &PatternCatalog) -> Result<Vec<&'a str>> {
    let mut kept = Vec::with_capacity(lines.len());
    let mut wrappers = 0usize;

    for &line in lines {
        let trimmed = line.trim();
        if bracket_delta(line) > 0 && WRAPPER_OPEN.try_is_match(trimmed)? {
            wrappers += 1;
        } else if trimmed == "}}" {
            wrappers = wrappers.saturating_sub(1);
        } else if wrappers == 0 || !is_known_css(line, catalog)? {
            kept.push(line);
        }
    }

    Ok(kept)
}

/// Remove stylesheet blocks, failing if a block seems to swallow prose
fn strip_standard<'a>(
    lines: &[&'a str],
    catalog: &PatternCatalog,
    warn_limit: usize,
) -> Result<Vec<&'a str>> {
    let mut kept = Vec::with_capacity(lines.len());
    let mut state = CssScanState::default();

    for &line in lines {
        let prev_depth = state.net_bracket_depth;
        let depth = prev_depth as isize + bracket_delta(line);
        state.net_bracket_depth = depth.max(0) as usize;

        if is_known_css(line, catalog)? {
            state.reset_suspicion();
        } else if prev_depth == 0 && state.net_bracket_depth == 0 {
            kept.push(line);
        } else if prev_depth > 0 && !line.trim().is_empty() && line.trim() != "}" {
            state.suspicious_run += 1;
            state.suspicious_lines.push(line.to_string());
        }

        if prev_depth > 0 && state.net_bracket_depth == 0 {
            state.reset_suspicion();
        }

        if state.suspicious_run > warn_limit {
            warn!(
                "Open brace block with {} unrecognised lines, refusing to guess",
                state.suspicious_run
            );
            return Err(PrepError::CssDetection {
                limit: warn_limit,
                lines: state.suspicious_lines.join("\n"),
            });
        }
    }

    Ok(kept)
}

/// Strip CSS from a document.
///
/// Runs the wrapper pass, then the standard block pass, then drops any
/// stray lone braces. Fails with [`PrepError::CssDetection`] when more than
/// `warn_limit` consecutive unrecognised lines sit inside an open block,
/// which usually means a brace typo in prose rather than a stylesheet.
#[inline]
pub fn strip_css(text: &str, catalog: &PatternCatalog, warn_limit: usize) -> Result<String> {
    let mut lines = Vec::new();
    for line in text.split('\n') {
        if !SINGLE_LINE_BLOCK.try_is_match(line)? {
            lines.push(line);
        }
    }

    let lines = strip_wrappers(&lines, catalog)?;
    let lines = strip_standard(&lines, catalog, warn_limit)?;

    let before = text.split('\n').count();
    let kept: Vec<&str> = lines
        .into_iter()
        .filter(|line| *line != "{" && *line != "}")
        .collect();
    debug!("CSS scan kept {} of {} lines", kept.len(), before);

    Ok(kept.join("\n"))
}
