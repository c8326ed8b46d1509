use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::ast::Expr;
use crate::parser::{Operand, ParseError, Parser};
use crate::value::StatId;

/// Keywords and stat identifiers share one shape: a leading letter or
/// underscore followed by letters, digits, and underscores. The anchored
/// pattern also excludes whitespace and control characters.
static IDENTIFIER_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

/// Registration failure. These indicate a defect in the embedding
/// application's content-load phase, not in user-authored scripts, and
/// are surfaced fast and loud at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("a production requires at least one keyword")]
    EmptyKeywordList,

    #[error(
        "invalid keyword '{0}': keywords start with a letter or underscore \
         and contain only letters, digits, and underscores"
    )]
    InvalidKeyword(String),

    #[error("keyword '{0}' is already registered")]
    DuplicateKeyword(String),

    #[error(
        "invalid stat identifier '{0}': identifiers start with a letter or \
         underscore and contain only letters, digits, and underscores"
    )]
    InvalidIdentifier(String),

    #[error("stat identifier '{0}' is already registered")]
    DuplicateIdentifier(String),
}

/// Reads a production's operands through the parser's cursor surface
/// ([`Parser::value_operand`], [`Parser::logic_operand`],
/// [`Parser::at_close`]), recursing into nested productions as needed.
pub type OperandReader<N> =
    Box<dyn Fn(&mut Parser<'_, N>) -> Result<Vec<Operand<N>>, ParseError> + Send + Sync>;

/// Turns a production's collected operand list into a tree node.
pub type NodeBuilder<N> = Box<dyn Fn(Vec<Operand<N>>) -> Result<Expr<N>, ParseError> + Send + Sync>;

/// A grammar rule: the keywords that select it, how it consumes operands,
/// and how it builds its node.
pub struct Production<N> {
    keywords: Vec<String>,
    operands: OperandReader<N>,
    build: NodeBuilder<N>,
}

impl<N> Production<N> {
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub(crate) fn read_operands(
        &self,
        parser: &mut Parser<'_, N>,
    ) -> Result<Vec<Operand<N>>, ParseError> {
        (self.operands)(parser)
    }

    pub(crate) fn build_node(&self, operands: Vec<Operand<N>>) -> Result<Expr<N>, ParseError> {
        (self.build)(operands)
    }
}

/// Binds keywords to productions. Populated once during the content-load
/// phase, then treated as frozen; there is no removal operation.
pub struct ExpressionRegistry<N> {
    productions: HashMap<String, Arc<Production<N>>>,
}

impl<N> Default for ExpressionRegistry<N> {
    fn default() -> Self {
        ExpressionRegistry::new()
    }
}

impl<N> ExpressionRegistry<N> {
    pub fn new() -> Self {
        ExpressionRegistry {
            productions: HashMap::new(),
        }
    }

    /// Register one production under every keyword in `keywords`.
    ///
    /// Each keyword must be well-formed and unclaimed, across the whole
    /// registry and within this call.
    pub fn add(
        &mut self,
        keywords: &[&str],
        operands: OperandReader<N>,
        build: NodeBuilder<N>,
    ) -> Result<(), RegistryError> {
        if keywords.is_empty() {
            return Err(RegistryError::EmptyKeywordList);
        }
        for (index, keyword) in keywords.iter().enumerate() {
            if !IDENTIFIER_SHAPE.is_match(keyword) {
                return Err(RegistryError::InvalidKeyword(keyword.to_string()));
            }
            let claimed_earlier = keywords[..index].contains(keyword);
            if claimed_earlier || self.productions.contains_key(*keyword) {
                return Err(RegistryError::DuplicateKeyword(keyword.to_string()));
            }
        }

        let production = Arc::new(Production {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            operands,
            build,
        });
        for keyword in keywords {
            self.productions
                .insert(keyword.to_string(), Arc::clone(&production));
        }
        debug!(keywords = ?keywords, "registered production");
        Ok(())
    }

    /// Look up a production by exact keyword.
    pub fn production(&self, keyword: &str) -> Option<Arc<Production<N>>> {
        self.productions.get(keyword).cloned()
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }
}

/// Binds stat identifiers to stat identities, case-insensitively.
/// Populated once at load time, frozen thereafter.
#[derive(Debug, Default, Clone)]
pub struct StatRegistry {
    stats: HashMap<String, StatId>,
}

impl StatRegistry {
    pub fn new() -> Self {
        StatRegistry {
            stats: HashMap::new(),
        }
    }

    /// Register `identifier` as the textual name of `stat`. Identifiers
    /// are unique case-insensitively: `"Armor"` then `"armor"` collide.
    pub fn add(&mut self, identifier: &str, stat: StatId) -> Result<(), RegistryError> {
        if !IDENTIFIER_SHAPE.is_match(identifier) {
            return Err(RegistryError::InvalidIdentifier(identifier.to_string()));
        }
        let key = identifier.to_lowercase();
        if self.stats.contains_key(&key) {
            return Err(RegistryError::DuplicateIdentifier(identifier.to_string()));
        }
        self.stats.insert(key, stat);
        debug!(identifier, %stat, "registered stat");
        Ok(())
    }

    /// Resolve an identifier to its stat identity, case-insensitively.
    pub fn resolve(&self, identifier: &str) -> Option<StatId> {
        self.stats.get(&identifier.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

impl<N> std::fmt::Debug for ExpressionRegistry<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keywords: Vec<_> = self.productions.keys().collect();
        keywords.sort();
        f.debug_struct("ExpressionRegistry")
            .field("keywords", &keywords)
            .finish()
    }
}
