//! Immutable token registry and layered resolver
//!
//! Tokens live in an arena sorted by name; a token's id is its index. Values
//! hold references by name and are looked up on demand, so the registry owns
//! no cyclic structure and can be shared across threads behind an `Arc`.
//!
//! Resolution of `(token, theme)`:
//! - take the theme's override if present, else the base value
//! - a literal is the answer
//! - a reference is followed within the same theme

use crate::cache::{CacheStats, ResolutionCache};
use crate::config::RegistryConfig;
use crate::error::{BuildError, ResolveError};
use crate::graph::ReferenceGraph;
use crate::snapshot::{ConcreteValue, ThemeSnapshot};
use crate::theme::ThemeName;
use dtk_token::{Category, TokenName, TokenValue};
use std::collections::{BTreeMap, HashMap};

/// Base-layer token
#[derive(Debug, Clone)]
pub(crate) struct TokenEntry {
    pub(crate) name: TokenName,
    pub(crate) category: Category,
    pub(crate) value: TokenValue,
    pub(crate) description: Option<String>,
}

/// Named override set keyed by token id
#[derive(Debug, Clone)]
pub(crate) struct ThemeLayer {
    pub(crate) name: ThemeName,
    pub(crate) overrides: HashMap<usize, TokenValue>,
}

impl ThemeLayer {
    pub(crate) fn new(name: ThemeName) -> Self {
        Self {
            name,
            overrides: HashMap::new(),
        }
    }
}

/// Validated, immutable token registry
///
/// Built by [`RegistryBuilder`](crate::RegistryBuilder). All queries take
/// `&self`; concurrent readers need no coordination.
#[derive(Debug)]
pub struct TokenRegistry {
    tokens: Vec<TokenEntry>,
    index: HashMap<TokenName, usize>,
    /// Index 0 is the base layer
    themes: Vec<ThemeLayer>,
    theme_index: HashMap<ThemeName, usize>,
    /// One reference graph per theme, parallel to `themes`
    graphs: Vec<ReferenceGraph>,
    config: RegistryConfig,
    cache: ResolutionCache,
}

impl TokenRegistry {
    /// Assemble from parts without validation
    ///
    /// `tokens` must be sorted by name and `themes[0]` must be the base layer.
    /// References to unknown names are left out of the graphs.
    pub(crate) fn assemble(
        config: RegistryConfig,
        tokens: Vec<TokenEntry>,
        themes: Vec<ThemeLayer>,
    ) -> Self {
        let index: HashMap<TokenName, usize> = tokens
            .iter()
            .enumerate()
            .map(|(id, entry)| (entry.name.clone(), id))
            .collect();
        let theme_index = themes
            .iter()
            .enumerate()
            .map(|(id, layer)| (layer.name.clone(), id))
            .collect();

        let graphs = themes
            .iter()
            .map(|layer| {
                let mut graph = ReferenceGraph::with_nodes(tokens.len());
                for (id, entry) in tokens.iter().enumerate() {
                    let value = layer.overrides.get(&id).unwrap_or(&entry.value);
                    if let Some(&target) = value.reference().and_then(|t| index.get(t)) {
                        graph.add_reference(id, target);
                    }
                }
                graph
            })
            .collect();

        let cache = if config.cache_enabled {
            ResolutionCache::new(config.cache_capacity)
        } else {
            ResolutionCache::disabled()
        };

        Self {
            tokens,
            index,
            themes,
            theme_index,
            graphs,
            config,
            cache,
        }
    }

    /// Reject the first cycle, base layer first
    pub(crate) fn check_acyclic(&self) -> Result<(), BuildError> {
        for (layer, graph) in self.themes.iter().zip(&self.graphs) {
            if let Some(path) = graph.find_cycle() {
                return Err(BuildError::CycleDetected {
                    theme: layer.name.to_string(),
                    cycle: self.names(&path),
                });
            }
        }
        Ok(())
    }

    /// Reject chains longer than `max_depth`; requires an acyclic registry
    pub(crate) fn check_depth(&self) -> Result<(), BuildError> {
        let max_depth = self.config.max_depth;
        for (layer, graph) in self.themes.iter().zip(&self.graphs) {
            let Some(lengths) = graph.chain_lengths() else {
                continue;
            };
            let deepest = lengths
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)));
            if let Some((id, &depth)) = deepest {
                if depth > max_depth {
                    return Err(BuildError::ChainTooDeep {
                        token: self.tokens[id].name.clone(),
                        theme: layer.name.to_string(),
                        depth,
                        max_depth,
                    });
                }
            }
        }
        Ok(())
    }

    /// Resolve a token to its concrete value under a theme
    ///
    /// # Errors
    /// - [`ResolveError::UnknownTheme`] / [`ResolveError::UnknownToken`] for bad input
    /// - [`ResolveError::CycleDetected`], [`ResolveError::CategoryMismatch`]
    ///   and [`ResolveError::MaxDepthExceeded`] only if validation was bypassed
    pub fn resolve(&self, token: &str, theme: &str) -> Result<ConcreteValue, ResolveError> {
        let theme_id = self.theme_id(theme)?;
        let id = self.token_id(token)?;
        self.resolve_id(id, theme_id)
    }

    /// Resolve every base token under a theme
    ///
    /// Either every token resolves or the first error is returned.
    ///
    /// # Errors
    /// Same as [`resolve`](Self::resolve).
    pub fn resolve_all(&self, theme: &str) -> Result<ThemeSnapshot, ResolveError> {
        let theme_id = self.theme_id(theme)?;
        let order = self.graphs[theme_id]
            .resolution_order()
            .unwrap_or_else(|| (0..self.tokens.len()).collect());

        let mut values = BTreeMap::new();
        for id in order {
            let value = self.resolve_id(id, theme_id)?;
            values.insert(self.tokens[id].name.clone(), value);
        }
        Ok(ThemeSnapshot::new(self.themes[theme_id].name.clone(), values))
    }

    /// Token names sorted lexicographically, optionally filtered by category
    #[must_use]
    pub fn list_tokens(&self, category: Option<Category>) -> Vec<&TokenName> {
        self.tokens
            .iter()
            .filter(|entry| category.map_or(true, |c| entry.category == c))
            .map(|entry| &entry.name)
            .collect()
    }

    /// Theme names, base layer first then by name
    #[must_use]
    pub fn themes(&self) -> Vec<&ThemeName> {
        self.themes.iter().map(|layer| &layer.name).collect()
    }

    /// Check if a theme is declared (`"default"` always is)
    #[inline]
    #[must_use]
    pub fn has_theme(&self, theme: &str) -> bool {
        self.theme_index.contains_key(theme)
    }

    /// Check if a base token exists
    #[inline]
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Number of base tokens
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Category of a token
    #[must_use]
    pub fn category_of(&self, token: &str) -> Option<Category> {
        self.entry(token).map(|entry| entry.category)
    }

    /// Documentation string of a token
    #[must_use]
    pub fn description(&self, token: &str) -> Option<&str> {
        self.entry(token).and_then(|entry| entry.description.as_deref())
    }

    /// Unresolved base value
    #[must_use]
    pub fn base_value(&self, token: &str) -> Option<&TokenValue> {
        self.entry(token).map(|entry| &entry.value)
    }

    /// Unresolved override of a token in a theme, if the theme has one
    #[must_use]
    pub fn override_value(&self, token: &str, theme: &str) -> Option<&TokenValue> {
        let id = *self.index.get(token)?;
        let theme_id = *self.theme_index.get(theme)?;
        self.themes[theme_id].overrides.get(&id)
    }

    /// Tokens a theme overrides directly, sorted
    ///
    /// # Errors
    /// Returns [`ResolveError::UnknownTheme`] for undeclared themes.
    pub fn overridden_tokens(&self, theme: &str) -> Result<Vec<&TokenName>, ResolveError> {
        let theme_id = self.theme_id(theme)?;
        let mut ids: Vec<usize> = self.themes[theme_id].overrides.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids.into_iter().map(|id| &self.tokens[id].name).collect())
    }

    /// Tokens whose value references `token` directly under `theme`, sorted
    ///
    /// # Errors
    /// Returns [`ResolveError::UnknownTheme`] or [`ResolveError::UnknownToken`].
    pub fn dependents(&self, token: &str, theme: &str) -> Result<Vec<&TokenName>, ResolveError> {
        let theme_id = self.theme_id(theme)?;
        let id = self.token_id(token)?;
        Ok(self.graphs[theme_id]
            .dependents(id)
            .into_iter()
            .map(|dep| &self.tokens[dep].name)
            .collect())
    }

    /// Number of references under a theme
    ///
    /// # Errors
    /// Returns [`ResolveError::UnknownTheme`] for undeclared themes.
    pub fn reference_count(&self, theme: &str) -> Result<usize, ResolveError> {
        Ok(self.graphs[self.theme_id(theme)?].edge_count())
    }

    /// Configuration this registry was built with
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Resolution cache statistics
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn entry(&self, token: &str) -> Option<&TokenEntry> {
        self.index.get(token).map(|&id| &self.tokens[id])
    }

    fn token_id(&self, token: &str) -> Result<usize, ResolveError> {
        self.index
            .get(token)
            .copied()
            .ok_or_else(|| ResolveError::UnknownToken(token.to_string()))
    }

    fn theme_id(&self, theme: &str) -> Result<usize, ResolveError> {
        self.theme_index
            .get(theme)
            .copied()
            .ok_or_else(|| ResolveError::UnknownTheme(theme.to_string()))
    }

    /// Effective value: theme override, else base
    #[inline]
    fn effective(&self, id: usize, theme_id: usize) -> &TokenValue {
        self.themes[theme_id]
            .overrides
            .get(&id)
            .unwrap_or(&self.tokens[id].value)
    }

    fn resolve_id(&self, start: usize, theme_id: usize) -> Result<ConcreteValue, ResolveError> {
        if let Some(cached) = self.cache.get(start, theme_id) {
            return Ok(cached);
        }

        let category = self.tokens[start].category;
        let mut visited = vec![start];
        let mut current = start;

        let value = loop {
            let target_name = match self.effective(current, theme_id) {
                TokenValue::Literal(literal) => break ConcreteValue::new(category, literal.clone()),
                TokenValue::Reference(target) => target,
            };
            let target = self.token_id(target_name.as_str())?;

            if let Some(pos) = visited.iter().position(|&seen| seen == target) {
                return Err(ResolveError::CycleDetected {
                    theme: self.themes[theme_id].name.to_string(),
                    cycle: self.names(&close_cycle(&visited[pos..])),
                });
            }
            let target_category = self.tokens[target].category;
            if target_category != category {
                return Err(ResolveError::CategoryMismatch {
                    token: self.tokens[current].name.clone(),
                    category,
                    target: target_name.clone(),
                    target_category,
                });
            }
            if visited.len() > self.config.max_depth {
                return Err(ResolveError::MaxDepthExceeded {
                    token: self.tokens[start].name.clone(),
                    theme: self.themes[theme_id].name.to_string(),
                    max_depth: self.config.max_depth,
                });
            }
            if let Some(cached) = self.cache.get(target, theme_id) {
                break cached;
            }

            visited.push(target);
            current = target;
        };

        self.cache.insert(start, theme_id, value.clone());
        Ok(value)
    }

    fn names(&self, ids: &[usize]) -> Vec<TokenName> {
        ids.iter().map(|&id| self.tokens[id].name.clone()).collect()
    }
}

/// Rotate cycle members to start at the smallest id and close the path
fn close_cycle(members: &[usize]) -> Vec<usize> {
    let start = members
        .iter()
        .enumerate()
        .min_by_key(|(_, id)| **id)
        .map_or(0, |(pos, _)| pos);
    let mut path: Vec<usize> = members[start..]
        .iter()
        .chain(&members[..start])
        .copied()
        .collect();
    if let Some(&first) = path.first() {
        path.push(first);
    }
    path
}
