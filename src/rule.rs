//! Replacement rules and rule sets
//!
//! A [`Rule`] is a search/replace pair. Rules in a [`RuleSet`] run in
//! declaration order, each one against the output of the previous rule.
//! Every rule replaces all non-overlapping occurrences of its search text,
//! scanning left to right in a single pass.
//!
//! # Examples
//!
//! ```
//! use chatpatch::rule::Rule;
//!
//! let rule = Rule::literal("swap", "a", "b");
//! let (patched, occurrences) = rule.apply("a-a-c");
//! assert_eq!(patched, "b-b-c");
//! assert_eq!(occurrences, 2);
//! ```

use std::fmt;
use std::path::PathBuf;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Target file patched when no path is given, relative to the working directory
pub const DEFAULT_TARGET: &str = "components/LeadFullViewModal.tsx";

/// How a rule's search text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Exact, whitespace-sensitive substring
    #[default]
    Literal,
    /// Regular expression; the replacement may use `$n` / `${name}` captures
    Regex,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal => write!(f, "literal"),
            Self::Regex => write!(f, "regex"),
        }
    }
}

/// A single search/replace rule
#[derive(Debug, Clone)]
pub struct Rule {
    /// Human-readable name shown in progress output
    pub name: String,
    search: String,
    replace: String,
    kind: RuleKind,
    pattern: Option<Regex>,
}

impl Rule {
    /// Create an exact-text rule
    #[must_use]
    pub fn literal(
        name: impl Into<String>,
        search: impl Into<String>,
        replace: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            search: search.into(),
            replace: replace.into(),
            kind: RuleKind::Literal,
            pattern: None,
        }
    }

    /// Create a regex rule, compiling the pattern up front
    pub fn regex(
        name: impl Into<String>,
        pattern: impl Into<String>,
        replace: impl Into<String>,
    ) -> Result<Self, RuleError> {
        let name = name.into();
        let search = pattern.into();
        let pattern = Regex::new(&search).map_err(|source| RuleError::InvalidRegex {
            name: name.clone(),
            source,
        })?;
        let rule = Self {
            name,
            search,
            replace: replace.into(),
            kind: RuleKind::Regex,
            pattern: Some(pattern),
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Text (or pattern) to search for
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replacement text
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replace
    }

    /// Build a rule of the given kind
    pub fn new(
        kind: RuleKind,
        name: impl Into<String>,
        search: impl Into<String>,
        replace: impl Into<String>,
    ) -> Result<Self, RuleError> {
        let rule = match kind {
            RuleKind::Literal => Self::literal(name, search, replace),
            RuleKind::Regex => return Self::regex(name, search, replace),
        };
        rule.validate()?;
        Ok(rule)
    }

    /// How the search text is interpreted
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Reject rules whose search could match the empty string
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.search.is_empty() {
            return Err(RuleError::EmptySearch {
                name: self.name.clone(),
            });
        }
        if self.pattern.as_ref().is_some_and(|re| re.is_match("")) {
            return Err(RuleError::MatchesEmpty {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Apply the rule to `content`.
    ///
    /// Returns the rewritten text and the number of occurrences replaced.
    /// When nothing matches the content is returned as-is with a count of 0.
    #[must_use]
    pub fn apply(&self, content: &str) -> (String, usize) {
        if self.search.is_empty() {
            return (content.to_string(), 0);
        }

        match &self.pattern {
            None => {
                let occurrences = content.matches(self.search.as_str()).count();
                if occurrences == 0 {
                    return (content.to_string(), 0);
                }
                (content.replace(self.search.as_str(), &self.replace), occurrences)
            },
            Some(re) => {
                let occurrences = re.find_iter(content).count();
                if occurrences == 0 {
                    return (content.to_string(), 0);
                }
                (re.replace_all(content, self.replace.as_str()).into_owned(), occurrences)
            },
        }
    }
}

/// An ordered list of rules plus the target they are meant for
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// File patched when the caller does not name one
    pub target: PathBuf,
    /// Rules, applied in order
    pub rules: Vec<Rule>,
    /// Bulleted summary of intended effects, printed after a successful patch
    pub summary: Vec<String>,
}

impl RuleSet {
    /// Create a rule set for `target`
    #[must_use]
    pub fn new(target: impl Into<PathBuf>, rules: Vec<Rule>) -> Self {
        Self {
            target: target.into(),
            rules,
            summary: Vec::new(),
        }
    }

    /// Attach the summary lines printed on success
    #[must_use]
    pub fn with_summary<I, S>(mut self, summary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.summary = summary.into_iter().map(Into::into).collect();
        self
    }

    /// Number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The built-in rules that let the lead modal's chat tab take the full screen.
    ///
    /// The matches are whitespace-sensitive. If the target's indentation
    /// drifts, the affected rules silently become no-ops.
    #[must_use]
    pub fn chat_fullscreen() -> Self {
        let rules = vec![
            Rule::literal(
                "Conditional border",
                r#"<div className="flex-1 flex flex-col min-w-0 border-r border-border-light dark:border-white/[0.08]">"#,
                r"<div className={`flex-1 flex flex-col min-w-0 ${activeTab === 'chat' ? '' : 'border-r border-border-light dark:border-white/[0.08]'}`}>",
            ),
            Rule::literal(
                "Hide tab bar",
                "               {/* Tabs Header */}\n               <div className={`flex items-center px-6 border-b ${",
                "               {/* Tabs Header - Esconder quando em modo chat */}\n               {activeTab !== 'chat' && (\n               <div className={`flex items-center px-6 border-b ${",
            ),
            Rule::literal(
                "Close tab bar condition",
                "               </div>\n\n               {/* Tab Content */",
                "               </div>\n               )}\n\n               {/* Tab Content */",
            ),
            Rule::literal(
                "Hide sidebar",
                "            {/* Right Column - Sidebar */}\n            <div className={`w-80 flex-shrink-0 border-l overflow-y-auto ${",
                "            {/* Right Column - Sidebar - Esconder quando em modo chat */}\n            {activeTab !== 'chat' && (\n            <div className={`w-80 flex-shrink-0 border-l overflow-y-auto scrollbar-thin ${",
            ),
            Rule::literal(
                "Close sidebar condition",
                "               </div>\n            </div>\n\n         </div>\n       </div>\n     </div>",
                "               </div>\n            </div>\n            )}\n\n         </div>\n       </div>\n     </div>",
            ),
        ];

        Self::new(DEFAULT_TARGET, rules).with_summary([
            "Border removed while the chat tab is active",
            "Tab bar hidden while the chat tab is active",
            "Sidebar hidden while the chat tab is active",
            "Thin scrollbar added to the sidebar",
        ])
    }
}
