use std::path::PathBuf;

use lectio::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".lectiorc");
    let content = r"
# comment
--no-toc

--expand-all
   
--render-debug-log=render.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_toc);
    assert!(flags.expand_all);
    assert!(!flags.no_witnesses);
    assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
}

#[test]
fn test_cli_flags_extend_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".lectiorc");
    std::fs::write(&path, "--no-witnesses\n--render-debug-log file.log\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "lectio".to_string(),
        "edition/body.json".to_string(),
        "--perf".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_witnesses, "file flags should remain enabled");
    assert!(effective.perf, "cli flags should be applied");
    assert_eq!(
        effective.render_debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_cli_debug_log_overrides_file() {
    let file = ConfigFlags {
        render_debug_log: Some(PathBuf::from("file.log")),
        ..ConfigFlags::default()
    };
    let cli = parse_flag_tokens(&["--render-debug-log=cli.log".to_string()]);
    assert_eq!(
        file.union(&cli).render_debug_log,
        Some(PathBuf::from("cli.log"))
    );
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_export_path_is_not_a_saved_default() {
    let flags = parse_flag_tokens(&[
        "--export".to_string(),
        "site/index.html".to_string(),
        "--no-toc".to_string(),
    ]);
    assert_eq!(
        flags,
        ConfigFlags {
            no_toc: true,
            ..ConfigFlags::default()
        }
    );
}
