use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Defaults that can be saved to and loaded from an rc file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_toc: bool,
    pub no_witnesses: bool,
    pub expand_all: bool,
    pub perf: bool,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_toc: self.no_toc || other.no_toc,
            no_witnesses: self.no_witnesses || other.no_witnesses,
            expand_all: self.expand_all || other.expand_all,
            perf: self.perf || other.perf,
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
        }
    }
}

/// Per-user configuration directory for lectio.
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("lectio");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("lectio");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("lectio");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("lectio");
        }
    }

    PathBuf::from(".lectio")
}

pub fn global_config_path() -> PathBuf {
    config_dir().join("config")
}

/// File backing the persisted viewer preferences (theme).
pub fn preferences_path() -> PathBuf {
    config_dir().join("prefs")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".lectiorc")
}

/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// # Errors
///
/// Returns an error if the config directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# lectio defaults (saved with --save)".to_string()];
    if flags.no_toc {
        lines.push("--no-toc".to_string());
    }
    if flags.no_witnesses {
        lines.push("--no-witnesses".to_string());
    }
    if flags.expand_all {
        lines.push("--expand-all".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.render_debug_log {
        lines.push(format!("--render-debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// # Errors
///
/// Returns an error if an existing config file cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the saveable flags out of raw argument tokens. Unknown tokens are
/// ignored, so the full command line can be passed in.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--no-toc" => flags.no_toc = true,
            "--no-witnesses" => flags.no_witnesses = true,
            "--expand-all" => flags.expand_all = true,
            "--perf" => flags.perf = true,
            "--render-debug-log" => {
                if let Some(next) = tokens.get(i + 1) {
                    flags.render_debug_log = Some(PathBuf::from(next));
                    i += 1;
                }
            }
            _ => {
                if let Some(value) = token.strip_prefix("--render-debug-log=") {
                    flags.render_debug_log = Some(PathBuf::from(value));
                }
            }
        }
        i += 1;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "lectio".to_string(),
            "body.json".to_string(),
            "--no-toc".to_string(),
            "--expand-all".to_string(),
            "--render-debug-log".to_string(),
            "render.log".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert!(flags.no_toc);
        assert!(flags.expand_all);
        assert!(!flags.no_witnesses);
        assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            no_witnesses: true,
            perf: true,
            render_debug_log: Some(PathBuf::from("debug.log")),
            ..ConfigFlags::default()
        };
        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);
    }

    #[test]
    fn test_clear_removes_file_and_tolerates_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, "--perf\n").unwrap();
        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        clear_config_flags(&path).unwrap();
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let flags = load_config_flags(&dir.path().join("absent")).unwrap();
        assert_eq!(flags, ConfigFlags::default());
    }

    #[test]
    fn test_preferences_live_next_to_config() {
        assert_eq!(preferences_path().parent(), global_config_path().parent());
    }
}
