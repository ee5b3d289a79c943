use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use astcheck_compare::CompareOptions;
use astcheck_report::ReportOptions;

use crate::cli::CompareArgs;

/// Settings read from a `--config` TOML file.
///
/// ```toml
/// [compare]
/// ignored_keys = ["tokens"]
/// max_depth = 256
///
/// [report]
/// depth_budget = 2
/// reference_label = "acorn"
/// target_label = "acorn-loose"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub compare: CompareOptions,
    pub report: ReportOptions,
}

impl CheckConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line flags on top of file values.
    pub fn apply_args(mut self, args: &CompareArgs) -> Self {
        for key in &args.ignore {
            self.compare = self.compare.ignore(key.clone());
        }
        if let Some(max_depth) = args.max_depth {
            self.compare.max_depth = max_depth;
        }
        if let Some(depth_budget) = args.depth_budget {
            self.report.depth_budget = depth_budget;
        }
        if let Some(label) = &args.reference_label {
            self.report.reference_label = label.clone();
        }
        if let Some(label) = &args.target_label {
            self.report.target_label = label.clone();
        }
        if args.no_diff {
            self.report.line_diff = false;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn args() -> CompareArgs {
        CompareArgs {
            reference: PathBuf::from("a.json"),
            target: PathBuf::from("b.json"),
            config: None,
            ignore: Vec::new(),
            depth_budget: None,
            reference_label: None,
            target_label: None,
            max_depth: None,
            no_diff: false,
        }
    }

    #[test]
    fn load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[compare]\nignored_keys = [\"tokens\"]\n\n[report]\nreference_label = \"acorn\"").unwrap();

        let config = CheckConfig::load(file.path()).unwrap();
        assert_eq!(config.compare.ignored_keys, vec!["tokens"]);
        assert_eq!(config.compare.max_depth, 512);
        assert_eq!(config.report.reference_label, "acorn");
        assert_eq!(config.report.target_label, "target");
        assert_eq!(config.report.depth_budget, 2);
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CheckConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn invalid_toml_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[compare\nmax_depth = ").unwrap();
        let err = CheckConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("parsing config"));
    }

    #[test]
    fn no_path_gives_defaults() {
        assert_eq!(CheckConfig::load_or_default(None).unwrap(), CheckConfig::default());
    }

    #[test]
    fn flags_override_file_values() {
        let mut config = CheckConfig::default();
        config.compare = config.compare.ignore("tokens");
        config.report.depth_budget = 4;

        let mut args = args();
        args.ignore = vec!["tokens".into(), "comments".into()];
        args.depth_budget = Some(1);
        args.target_label = Some("loose".into());
        args.no_diff = true;

        let config = config.apply_args(&args);
        assert_eq!(config.compare.ignored_keys, vec!["tokens", "comments"]);
        assert_eq!(config.report.depth_budget, 1);
        assert_eq!(config.report.target_label, "loose");
        assert_eq!(config.report.reference_label, "reference");
        assert!(!config.report.line_diff);
    }
}
