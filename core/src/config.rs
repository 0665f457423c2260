use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::index::Weighting;
use crate::indexer::SentenceIndexer;
use crate::matcher::{MatchConfig, Matcher};
use crate::segmenter::{RuleSegmenter, SegmenterConfig};
use crate::tokenizer::Analyzer;

/// Everything that shapes how a document is indexed and queried. Every field
/// has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub segmenter: SegmenterConfig,
    pub analyzer: Analyzer,
    pub weighting: Weighting,
    pub matcher: MatchConfig,
}

impl ChatConfig {
    /// Read a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut f = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
        let mut buf = String::new();
        f.read_to_string(&mut buf)?;
        let config: ChatConfig = serde_json::from_str(&buf).with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let t = self.matcher.threshold;
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            bail!("matcher.threshold must be within [0, 1], got {t}");
        }
        Ok(())
    }

    pub fn indexer(&self) -> SentenceIndexer {
        SentenceIndexer::new(RuleSegmenter::new(&self.segmenter), self.analyzer, self.weighting)
    }

    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.matcher.clone())
    }
}
