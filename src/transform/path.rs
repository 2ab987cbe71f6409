//! Named-group path transformer
//!
//! A [`PathTransformer`] pairs a regular expression declaring named capture
//! groups with a format template made of `${name}` placeholders. The pair is
//! validated once when the transformer is built and can then be applied to any
//! number of paths.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{
    Result, invalid_arguments_error, invalid_pattern_error, no_match_error,
    template_unused_error, unresolved_placeholder_error,
};

const PLACEHOLDER_OPEN: &str = "${";
const PLACEHOLDER_CLOSE: char = '}';

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([^}]*)\}").expect("Failed to compile regex pattern for PLACEHOLDER_RE")
});

/// Rewrites paths by substituting named captures into a format template
///
/// The transformer is immutable once built, so a single instance can be shared
/// between threads and applied concurrently.
///
/// # Examples
/// ```
/// use drive_fetch::transform::PathTransformer;
///
/// let transformer = PathTransformer::new(
///     r"(?P<month>[^-]+)-(?P<day>[^-]+)-(?P<year>[^-]+)-.*\.TRANSCRIPT$",
///     "${year}-${month}-${day}.TRANSCRIPT",
/// )
/// .unwrap();
///
/// let output = transformer
///     .transform("apr-10-2025-17-27-28-ROOM/audio_transcript.TRANSCRIPT")
///     .unwrap();
/// assert_eq!(output, "2025-apr-10.TRANSCRIPT");
/// ```
#[derive(Debug, Clone)]
pub struct PathTransformer {
    pattern: Regex,
    template: String,
}

impl PathTransformer {
    /// Compiles a pattern and validates it against a format template
    ///
    /// # Arguments
    /// * `pattern` - Regular expression source, may declare `(?P<name>...)` groups
    /// * `template` - Output format using `${name}` placeholders
    ///
    /// # Errors
    /// * `InvalidArguments` if either argument is empty
    /// * `InvalidPattern` if the pattern does not compile
    /// * `TemplateUnused` if the template references none of the declared groups
    pub fn new(pattern: &str, template: &str) -> Result<Self> {
        if pattern.is_empty() || template.is_empty() {
            return Err(invalid_arguments_error(
                "both pattern and format must be non-empty",
            ));
        }

        let compiled = Regex::new(pattern).map_err(|e| invalid_pattern_error(e, pattern))?;

        let references_group = compiled
            .capture_names()
            .flatten()
            .any(|name| template.contains(&placeholder(name)));
        if !references_group {
            return Err(template_unused_error(pattern, template));
        }

        Ok(PathTransformer {
            pattern: compiled,
            template: template.to_string(),
        })
    }

    /// The pattern source text
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The format template, verbatim
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Names of the groups declared by the pattern, in declaration order
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.pattern.capture_names().flatten()
    }

    /// Placeholders in the template that name no declared group
    ///
    /// Any name returned here makes every call to [`transform`](Self::transform)
    /// fail with `UnresolvedPlaceholder`.
    pub fn undeclared_placeholders(&self) -> Vec<&str> {
        let mut undeclared: Vec<&str> = Vec::new();
        for captures in PLACEHOLDER_RE.captures_iter(&self.template) {
            let Some(name) = captures.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if !self.group_names().any(|group| group == name) && !undeclared.contains(&name) {
                undeclared.push(name);
            }
        }
        undeclared
    }

    /// Applies the transformation to a single path
    ///
    /// The pattern is searched anywhere in `input`; anchors must be part of the
    /// pattern itself. Named groups that did not take part in the match are
    /// substituted as the empty string. Substitution is a single left-to-right
    /// pass over the template, so captured text is never re-scanned.
    ///
    /// # Errors
    /// * `NoMatch` if the pattern does not match `input`
    /// * `UnresolvedPlaceholder` if `${...}` text remains after substitution,
    ///   including text that came from a captured value
    pub fn transform(&self, input: &str) -> Result<String> {
        let captures = self
            .pattern
            .captures(input)
            .ok_or_else(|| no_match_error(self.pattern(), input))?;

        let values: HashMap<&str, &str> = self
            .group_names()
            .map(|name| (name, captures.name(name).map_or("", |m| m.as_str())))
            .collect();

        let result = substitute(&self.template, &values);

        if has_placeholder(&result) {
            return Err(unresolved_placeholder_error(&result));
        }

        Ok(result)
    }
}

fn placeholder(name: &str) -> String {
    format!("{PLACEHOLDER_OPEN}{name}{PLACEHOLDER_CLOSE}")
}

/// Replaces every `${name}` whose name is in `values`; anything else is copied as is
fn substitute(template: &str, values: &HashMap<&str, &str>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + PLACEHOLDER_OPEN.len()..];

        let resolved = after_open
            .find(PLACEHOLDER_CLOSE)
            .and_then(|end| values.get(&after_open[..end]).map(|value| (end, *value)));

        match resolved {
            Some((end, value)) => {
                result.push_str(value);
                rest = &after_open[end + PLACEHOLDER_CLOSE.len_utf8()..];
            }
            None => {
                result.push('$');
                rest = &rest[start + 1..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// True if `text` holds a `${` followed somewhere later by `}`
fn has_placeholder(text: &str) -> bool {
    text.find(PLACEHOLDER_OPEN).is_some_and(|start| {
        text[start + PLACEHOLDER_OPEN.len()..].contains(PLACEHOLDER_CLOSE)
    })
}
