//! Keyword table driving the text-based link heuristics
//!
//! Every literal phrase the crawler reacts to lives here as a
//! `(keyword, effect)` row, so a site or locale with different navigation
//! wording can be supported from the config file alone.

use serde::Deserialize;

/// What a keyword does when it appears in a link's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeywordEffect {
    /// Navigation or utility link; never a chapter
    Exclude,
    /// Link to the complete chapter catalog
    CatalogLink,
    /// Link to the next page of a paginated catalog
    NextPage,
}

/// One row of the keyword table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeywordRule {
    /// Literal phrase, matched as a case-sensitive substring
    pub text: String,

    /// Effect of the phrase
    pub effect: KeywordEffect,
}

impl KeywordRule {
    pub fn new(text: impl Into<String>, effect: KeywordEffect) -> Self {
        Self {
            text: text.into(),
            effect,
        }
    }
}

const DEFAULT_EXCLUDE: &[&str] = &[
    "首页",
    "登录",
    "注册",
    "上一页",
    "下一页",
    "返回",
    "加入书架",
    "投票",
    "留言",
    "下载",
    "更多",
    "直达",
    "底部",
];

const DEFAULT_CATALOG_LINK: &[&str] = &["查看更多", "全部章节", "完整目录"];

const DEFAULT_NEXT_PAGE: &[&str] = &["下一页"];

/// Ordered table of keyword rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    rules: Vec<KeywordRule>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        let rules = DEFAULT_EXCLUDE
            .iter()
            .map(|k| KeywordRule::new(*k, KeywordEffect::Exclude))
            .chain(
                DEFAULT_CATALOG_LINK
                    .iter()
                    .map(|k| KeywordRule::new(*k, KeywordEffect::CatalogLink)),
            )
            .chain(
                DEFAULT_NEXT_PAGE
                    .iter()
                    .map(|k| KeywordRule::new(*k, KeywordEffect::NextPage)),
            )
            .collect();

        Self { rules }
    }
}

impl KeywordTable {
    /// Creates a table from explicit rules, replacing the defaults entirely
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    /// Iterates over the keywords carrying the given effect, in table order
    pub fn keywords(&self, effect: KeywordEffect) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(move |rule| rule.effect == effect)
            .map(|rule| rule.text.as_str())
    }

    /// Returns true if `text` contains any keyword carrying `effect`
    pub fn matches(&self, text: &str, effect: KeywordEffect) -> bool {
        self.keywords(effect).any(|keyword| text.contains(keyword))
    }
}
